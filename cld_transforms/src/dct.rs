// Copyright (c) the JPEG XL Project Authors. All rights reserved.
//
// Use of this source code is governed by a BSD-style
// license that can be found in the LICENSE file.

use std::f64::consts::PI;

/// Orthonormal DCT-II scale factor for frequency `u` of an `n`-point transform.
#[inline(always)]
pub fn alpha(u: usize, n: usize) -> f64 {
    if u == 0 {
        (1.0 / n as f64).sqrt()
    } else {
        (2.0 / n as f64).sqrt()
    }
}

/// Precomputed basis of the `N`-point orthonormal DCT.
///
/// `basis[u][i]` is `alpha(u) * cos(pi * (2i + 1) * u / 2N)`. The same matrix
/// drives both the forward transform (DCT-II) and, transposed, the inverse
/// transform (DCT-III).
#[derive(Clone, Debug)]
pub struct DctBasis<const N: usize> {
    basis: [[f64; N]; N],
}

impl<const N: usize> Default for DctBasis<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const N: usize> DctBasis<N> {
    pub fn new() -> Self {
        const { assert!(N > 0, "transform size must be positive") };
        let mut basis = [[0.0f64; N]; N];
        for (u_freq, row) in basis.iter_mut().enumerate() {
            let alpha_u = alpha(u_freq, N);
            for (spatial, coeff) in row.iter_mut().enumerate() {
                *coeff = alpha_u
                    * (PI * (2 * spatial + 1) as f64 * u_freq as f64 / (2 * N) as f64).cos();
            }
        }
        Self { basis }
    }

    fn forward_1d(&self, input: &[f64; N]) -> [f64; N] {
        std::array::from_fn(|u| {
            self.basis[u]
                .iter()
                .zip(input.iter())
                .map(|(b, x)| b * x)
                .sum()
        })
    }

    fn inverse_1d(&self, input: &[f64; N]) -> [f64; N] {
        std::array::from_fn(|i| (0..N).map(|u| self.basis[u][i] * input[u]).sum())
    }

    /// Forward 2D DCT-II.
    ///
    /// `input[y][x]` is the spatial sample at column `x`, row `y`. The result
    /// is indexed as `out[y_freq][x_freq]`.
    pub fn forward(&self, input: &[[f64; N]; N]) -> [[f64; N]; N] {
        let rows: [[f64; N]; N] = std::array::from_fn(|y| self.forward_1d(&input[y]));
        let cols: [[f64; N]; N] = std::array::from_fn(|x| {
            let column: [f64; N] = std::array::from_fn(|y| rows[y][x]);
            self.forward_1d(&column)
        });
        transpose(&cols)
    }

    /// Inverse 2D transform (DCT-III); undoes [`DctBasis::forward`].
    pub fn inverse(&self, input: &[[f64; N]; N]) -> [[f64; N]; N] {
        let cols: [[f64; N]; N] = std::array::from_fn(|x| {
            let column: [f64; N] = std::array::from_fn(|v| input[v][x]);
            self.inverse_1d(&column)
        });
        let cols = transpose(&cols);
        std::array::from_fn(|y| self.inverse_1d(&cols[y]))
    }
}

fn transpose<const N: usize>(matrix: &[[f64; N]; N]) -> [[f64; N]; N] {
    std::array::from_fn(|i| std::array::from_fn(|j| matrix[j][i]))
}

pub fn dct2d<const N: usize>(input: &[[f64; N]; N]) -> [[f64; N]; N] {
    DctBasis::<N>::new().forward(input)
}

pub fn idct2d<const N: usize>(input: &[[f64; N]; N]) -> [[f64; N]; N] {
    DctBasis::<N>::new().inverse(input)
}
