// Copyright (c) the JPEG XL Project Authors. All rights reserved.
//
// Use of this source code is governed by a BSD-style
// license that can be found in the LICENSE file.

use std::collections::TryReserveError;

use thiserror::Error;

use crate::frame::{ColorFamily, SampleType};

#[derive(Error, Debug)]
pub enum Error {
    #[error(
        "Only 8-bit YUV input supported, got {bits_per_sample}-bit {sample_type:?} {color_family:?}"
    )]
    InvalidInputFormat {
        bits_per_sample: u32,
        sample_type: SampleType,
        color_family: ColorFamily,
    },
    #[error("Plane of size {0}x{1} is smaller than the {2}x{2} block grid")]
    DegenerateGeometry(usize, usize, usize),
    #[error("Invalid image size: {0}x{1}")]
    InvalidImageSize(usize, usize),
    #[error("Image size too large: {0}x{1}")]
    ImageSizeTooLarge(usize, usize),
    #[error("Row stride {0} is smaller than the plane width {1}")]
    StrideTooSmall(usize, usize),
    #[error("Plane data has {0} bytes, at least {1} are required")]
    PlaneDataTooShort(usize, usize),
    #[error("Plane {0} is missing from the frame")]
    MissingPlane(usize),
    #[error("Expected {0} channels, found {1}")]
    ChannelCountMismatch(usize, usize),
    #[error("Out of memory: {0}")]
    OutOfMemory(#[from] TryReserveError),
    // Generic arithmetic overflow. Prefer using other errors if possible.
    #[error("Arithmetic overflow")]
    ArithmeticOverflow,
}

pub type Result<T> = std::result::Result<T, Error>;
