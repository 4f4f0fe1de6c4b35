// Copyright (c) the JPEG XL Project Authors. All rights reserved.
//
// Use of this source code is governed by a BSD-style
// license that can be found in the LICENSE file.

use std::ops::Range;

use crate::{
    error::{Error, Result},
    image::Plane,
    util::tracing_wrappers::*,
    BLOCK_DIM,
};

/// Per-cell truncated means of one plane, indexed as `grid[row][column]`.
pub type BlockGrid = [[i64; BLOCK_DIM]; BLOCK_DIM];

/// Half-open sample range covered by cell `index` when `len` samples are
/// split into `cells` cells.
///
/// Cell edges are `round(k * len / cells)`; neighbouring cells compute their
/// shared edge identically, so the ranges tile `0..len` without gaps or
/// overlaps.
pub fn cell_bounds(len: usize, cells: usize, index: usize) -> Range<usize> {
    debug_assert!(index < cells);
    let interval = len as f64 / cells as f64;
    let start = (index as f64 * interval).round() as usize;
    let end = ((index + 1) as f64 * interval).round() as usize;
    start.min(len)..end.min(len)
}

/// Reduces `plane` to an `N`x`N` grid of cell means.
///
/// Planes with fewer than `N` samples along either axis would leave some
/// cells empty and are rejected.
pub fn reduce_plane_to<const N: usize>(plane: &Plane<'_>) -> Result<[[i64; N]; N]> {
    let (xsize, ysize) = plane.size();
    if xsize < N || ysize < N {
        debug!(xsize, ysize, "plane too small for block grid");
        return Err(Error::DegenerateGeometry(xsize, ysize, N));
    }
    let xbounds: [Range<usize>; N] = std::array::from_fn(|i| cell_bounds(xsize, N, i));
    let mut grid = [[0i64; N]; N];
    for (j, grid_row) in grid.iter_mut().enumerate() {
        let ybounds = cell_bounds(ysize, N, j);
        let mut sums = [0u64; N];
        for y in ybounds.clone() {
            let row = plane.row(y);
            for (sum, xb) in sums.iter_mut().zip(xbounds.iter()) {
                *sum += row[xb.clone()].iter().map(|&v| v as u64).sum::<u64>();
            }
        }
        for ((cell, sum), xb) in grid_row.iter_mut().zip(sums).zip(xbounds.iter()) {
            let count = (xb.len() * ybounds.len()) as u64;
            // Integer division truncates like casting the floating-point mean.
            *cell = (sum / count) as i64;
        }
    }
    Ok(grid)
}

pub fn reduce_plane(plane: &Plane<'_>) -> Result<BlockGrid> {
    let grid = reduce_plane_to::<BLOCK_DIM>(plane)?;
    trace!(?plane, ?grid, "reduced plane");
    Ok(grid)
}
