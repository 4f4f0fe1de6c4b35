// Copyright (c) the JPEG XL Project Authors. All rights reserved.
//
// Use of this source code is governed by a BSD-style
// license that can be found in the LICENSE file.

use std::io::{BufRead, Write};

use cld::frame::{Frame, compute_descriptors};
use color_eyre::eyre::{Result, WrapErr};

use crate::output::write_frame_props;
use crate::y4m::Y4mReader;

#[derive(Clone, Copy, Debug)]
pub struct RunOptions {
    /// Stop after this many frames.
    pub frames: Option<usize>,
    /// Digits printed after the decimal point.
    pub precision: usize,
    /// Frames decoded before descriptors are computed.
    pub batch_size: usize,
}

/// Decodes frames in batches, computes their descriptors and writes the
/// resulting properties. Returns the number of frames written.
pub fn write_descriptors<R: BufRead, W: Write>(
    mut reader: Y4mReader<R>,
    out: &mut W,
    options: &RunOptions,
) -> Result<usize> {
    let limit = options.frames.unwrap_or(usize::MAX);
    let batch_size = options.batch_size.max(1);
    let mut written = 0;
    let mut batch: Vec<Frame> = Vec::with_capacity(batch_size);
    loop {
        while batch.len() < batch_size && written + batch.len() < limit {
            match reader.read_frame()? {
                Some(frame) => batch.push(frame),
                None => break,
            }
        }
        if batch.is_empty() {
            return Ok(written);
        }
        let descriptors = compute_descriptors(&batch)
            .wrap_err_with(|| format!("computing descriptors after frame {written}"))?;
        for (mut frame, descriptor) in batch.drain(..).zip(descriptors) {
            frame.attach_descriptor(&descriptor);
            write_frame_props(out, written, &frame, options.precision)?;
            written += 1;
        }
    }
}
