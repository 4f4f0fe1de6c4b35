// Copyright (c) the JPEG XL Project Authors. All rights reserved.
//
// Use of this source code is governed by a BSD-style
// license that can be found in the LICENSE file.

use std::sync::OnceLock;

use cld_transforms::dct::DctBasis;

use crate::{block_reduce::BlockGrid, BLOCK_DIM, SAMPLE_CENTER};

/// DCT output for one channel, indexed as `coeffs[y_freq][x_freq]`.
pub type CoefficientGrid = [[f64; BLOCK_DIM]; BLOCK_DIM];

fn basis() -> &'static DctBasis<BLOCK_DIM> {
    static BASIS: OnceLock<DctBasis<BLOCK_DIM>> = OnceLock::new();
    BASIS.get_or_init(DctBasis::new)
}

fn centered<const N: usize>(grid: &[[i64; N]; N]) -> [[f64; N]; N] {
    std::array::from_fn(|y| std::array::from_fn(|x| (grid[y][x] - SAMPLE_CENTER) as f64))
}

/// Orthonormal 2D DCT-II of a grid of 8-bit means, centered on
/// [`SAMPLE_CENTER`].
pub fn transform_with<const N: usize>(
    grid: &[[i64; N]; N],
    basis: &DctBasis<N>,
) -> [[f64; N]; N] {
    basis.forward(&centered(grid))
}

pub fn transform(grid: &BlockGrid) -> CoefficientGrid {
    transform_with(grid, basis())
}

/// Reconstructs the spatial grid, with the center offset added back.
pub fn inverse_transform(coeffs: &CoefficientGrid) -> [[f64; BLOCK_DIM]; BLOCK_DIM] {
    basis()
        .inverse(coeffs)
        .map(|row| row.map(|v| v + SAMPLE_CENTER as f64))
}
