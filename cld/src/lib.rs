// Copyright (c) the JPEG XL Project Authors. All rights reserved.
//
// Use of this source code is governed by a BSD-style
// license that can be found in the LICENSE file.

#![deny(unsafe_code)]
pub mod block_reduce;
pub mod descriptor;
pub mod error;
pub mod frame;
pub mod image;
pub mod spectral;
pub mod util;
pub mod zigzag;

pub use descriptor::{compute_descriptor, Descriptor};
pub use error::{Error, Result};

/// Side of the square grid every plane is reduced to.
pub const BLOCK_DIM: usize = 8;
pub const BLOCK_SIZE: usize = BLOCK_DIM * BLOCK_DIM;

/// Number of color channels in a descriptor: one luma and two chroma.
pub const NUM_CHANNELS: usize = 3;

/// Frame property names, in channel order.
pub const CHANNEL_PROPERTY_NAMES: [&str; NUM_CHANNELS] = ["CLD_y", "CLD_u", "CLD_v"];

/// Mid-level of an 8-bit sample; subtracted before the transform.
pub const SAMPLE_CENTER: i64 = 128;
