// Copyright (c) the JPEG XL Project Authors. All rights reserved.
//
// Use of this source code is governed by a BSD-style
// license that can be found in the LICENSE file.

use std::fmt::Debug;

use crate::{
    error::{Error, Result},
    util::tracing_wrappers::*,
};

/// Read-only view of one 8-bit image plane.
///
/// Rows are `stride` bytes apart; only the first `size.0` bytes of each row
/// are samples, the rest is padding.
#[derive(Clone, Copy)]
pub struct Plane<'a> {
    data: &'a [u8],
    size: (usize, usize),
    stride: usize,
}

impl Debug for Plane<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "plane {}x{} stride {}",
            self.size.0, self.size.1, self.stride
        )
    }
}

fn check_size(size: (usize, usize)) -> Result<()> {
    let (xsize, ysize) = size;
    // These limits let us not worry about overflows when summing samples.
    if xsize as u64 >= i64::MAX as u64 / 4 || ysize as u64 >= i64::MAX as u64 / 4 {
        return Err(Error::ImageSizeTooLarge(xsize, ysize));
    }
    xsize
        .checked_mul(ysize)
        .ok_or(Error::ImageSizeTooLarge(xsize, ysize))?;
    if xsize == 0 || ysize == 0 {
        return Err(Error::InvalidImageSize(xsize, ysize));
    }
    Ok(())
}

fn required_len(size: (usize, usize), stride: usize) -> Result<usize> {
    (size.1 - 1)
        .checked_mul(stride)
        .and_then(|x| x.checked_add(size.0))
        .ok_or(Error::ArithmeticOverflow)
}

impl<'a> Plane<'a> {
    pub fn new(data: &'a [u8], size: (usize, usize), stride: usize) -> Result<Plane<'a>> {
        check_size(size)?;
        if stride < size.0 {
            return Err(Error::StrideTooSmall(stride, size.0));
        }
        let required = required_len(size, stride)?;
        if data.len() < required {
            return Err(Error::PlaneDataTooShort(data.len(), required));
        }
        Ok(Plane { data, size, stride })
    }

    pub fn size(&self) -> (usize, usize) {
        self.size
    }

    pub fn stride(&self) -> usize {
        self.stride
    }

    pub fn row(&self, row: usize) -> &'a [u8] {
        debug_assert!(row < self.size.1);
        let start = row * self.stride;
        &self.data[start..start + self.size.0]
    }

    pub fn iter(&self) -> impl Iterator<Item = u8> + '_ {
        (0..self.size.1).flat_map(|y| self.row(y).iter().copied())
    }
}

impl PartialEq for Plane<'_> {
    fn eq(&self, other: &Plane<'_>) -> bool {
        self.size == other.size && self.iter().eq(other.iter())
    }
}

impl Eq for Plane<'_> {}

/// Heap-allocated plane, used by frames and tests.
#[derive(Clone)]
pub struct OwnedPlane {
    size: (usize, usize),
    stride: usize,
    data: Vec<u8>,
}

impl Debug for OwnedPlane {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "owned {:?}", self.as_plane())
    }
}

impl OwnedPlane {
    pub fn new(size: (usize, usize)) -> Result<OwnedPlane> {
        Self::new_with_stride(size, size.0)
    }

    pub fn new_with_stride(size: (usize, usize), stride: usize) -> Result<OwnedPlane> {
        check_size(size)?;
        if stride < size.0 {
            return Err(Error::StrideTooSmall(stride, size.0));
        }
        let total_size = size
            .1
            .checked_mul(stride)
            .ok_or(Error::ImageSizeTooLarge(size.0, size.1))?;
        debug!(?size, stride, "allocating plane");
        let mut data = vec![];
        data.try_reserve_exact(total_size)?;
        data.resize(total_size, 0);
        Ok(OwnedPlane { size, stride, data })
    }

    pub fn from_fn(
        size: (usize, usize),
        mut f: impl FnMut(usize, usize) -> u8,
    ) -> Result<OwnedPlane> {
        let mut plane = Self::new(size)?;
        for y in 0..size.1 {
            for (x, v) in plane.row_mut(y).iter_mut().enumerate() {
                *v = f(x, y);
            }
        }
        Ok(plane)
    }

    /// Takes ownership of `data`, laid out with the given stride.
    pub fn from_vec(data: Vec<u8>, size: (usize, usize), stride: usize) -> Result<OwnedPlane> {
        Plane::new(&data, size, stride)?;
        Ok(OwnedPlane { size, stride, data })
    }

    #[cfg(test)]
    pub fn new_random<R: rand::Rng>(size: (usize, usize), rng: &mut R) -> Result<OwnedPlane> {
        let mut plane = Self::new(size)?;
        rng.fill_bytes(&mut plane.data);
        Ok(plane)
    }

    pub fn size(&self) -> (usize, usize) {
        self.size
    }

    pub fn as_plane(&self) -> Plane<'_> {
        Plane {
            data: &self.data,
            size: self.size,
            stride: self.stride,
        }
    }

    pub fn row_mut(&mut self, row: usize) -> &mut [u8] {
        debug_assert!(row < self.size.1);
        let start = row * self.stride;
        &mut self.data[start..start + self.size.0]
    }

    pub fn fill(&mut self, value: u8) {
        for y in 0..self.size.1 {
            self.row_mut(y).fill(value);
        }
    }
}
