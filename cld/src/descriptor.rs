// Copyright (c) the JPEG XL Project Authors. All rights reserved.
//
// Use of this source code is governed by a BSD-style
// license that can be found in the LICENSE file.

use crate::{
    block_reduce::reduce_plane,
    error::{Error, Result},
    image::Plane,
    spectral::transform,
    util::tracing_wrappers::*,
    zigzag::reorder,
    BLOCK_SIZE, CHANNEL_PROPERTY_NAMES, NUM_CHANNELS,
};

/// Color Layout Descriptor of one frame: 64 zigzag-ordered DCT coefficients
/// per channel, channel 0 being luma.
#[derive(Clone, Debug, PartialEq)]
pub struct Descriptor {
    channels: [[f64; BLOCK_SIZE]; NUM_CHANNELS],
}

impl Descriptor {
    pub fn channel(&self, channel: usize) -> &[f64; BLOCK_SIZE] {
        &self.channels[channel]
    }

    pub fn channels(&self) -> &[[f64; BLOCK_SIZE]; NUM_CHANNELS] {
        &self.channels
    }

    /// Channel coefficients paired with their frame property names.
    pub fn properties(&self) -> impl Iterator<Item = (&'static str, &[f64; BLOCK_SIZE])> + '_ {
        CHANNEL_PROPERTY_NAMES
            .iter()
            .copied()
            .zip(self.channels.iter())
    }
}

/// Runs reduction, transform and zigzag scan on a single plane.
pub fn compute_channel(plane: &Plane<'_>) -> Result<[f64; BLOCK_SIZE]> {
    let grid = reduce_plane(plane)?;
    let coeffs = transform(&grid);
    Ok(reorder(&coeffs))
}

/// Computes the descriptor of a frame given one plane per channel.
///
/// Either every channel succeeds or an error is returned; there is no
/// partial result.
pub fn compute_descriptor(planes: &[Plane<'_>]) -> Result<Descriptor> {
    if planes.len() != NUM_CHANNELS {
        return Err(Error::ChannelCountMismatch(NUM_CHANNELS, planes.len()));
    }
    let mut channels = [[0.0; BLOCK_SIZE]; NUM_CHANNELS];
    for (out, plane) in channels.iter_mut().zip(planes) {
        *out = compute_channel(plane)?;
        trace!(dc = out[0], "computed channel");
    }
    Ok(Descriptor { channels })
}
