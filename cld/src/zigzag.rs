// Copyright (c) the JPEG XL Project Authors. All rights reserved.
//
// Use of this source code is governed by a BSD-style
// license that can be found in the LICENSE file.

use std::sync::OnceLock;

use crate::{spectral::CoefficientGrid, BLOCK_DIM, BLOCK_SIZE};

/// Zigzag scan of an `m`x`m` grid as row-major linear indices.
///
/// Diagonal `i` holds the cells whose row and column sum to `i`. Odd
/// diagonals are walked top-right to bottom-left, even ones bottom-left to
/// top-right, giving the usual alternating scan.
pub fn zigzag_order(m: usize) -> Vec<usize> {
    let mut order = Vec::with_capacity(m * m);
    for i in 0..(2 * m).saturating_sub(1) {
        let first = (i + 1).saturating_sub(m);
        let last = i.min(m - 1);
        for j in first..=last {
            order.push(if i % 2 != 0 {
                j * (m - 1) + i
            } else {
                (i - j) * m + j
            });
        }
    }
    order
}

/// The shared scan order for the descriptor's block size.
pub fn block_zigzag() -> &'static [usize; BLOCK_SIZE] {
    static ORDER: OnceLock<[usize; BLOCK_SIZE]> = OnceLock::new();
    ORDER.get_or_init(|| {
        let order = zigzag_order(BLOCK_DIM);
        std::array::from_fn(|k| order[k])
    })
}

/// Linearizes `coeffs` in zigzag order: slot `k` receives the coefficient
/// at row `order[k] / 8`, column `order[k] % 8`.
pub fn reorder(coeffs: &CoefficientGrid) -> [f64; BLOCK_SIZE] {
    block_zigzag().map(|pos| coeffs[pos / BLOCK_DIM][pos % BLOCK_DIM])
}
