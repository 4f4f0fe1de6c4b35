// Copyright (c) the JPEG XL Project Authors. All rights reserved.
//
// Use of this source code is governed by a BSD-style
// license that can be found in the LICENSE file.

use std::io::{self, Write};

use cld::frame::Frame;
use cld::CHANNEL_PROPERTY_NAMES;

/// Writes one line per descriptor property of `frame`:
/// `<frame index> <property name> <values...>`.
///
/// Properties that are not attached to the frame are skipped.
pub fn write_frame_props<W: Write>(
    out: &mut W,
    index: usize,
    frame: &Frame,
    precision: usize,
) -> io::Result<()> {
    for name in CHANNEL_PROPERTY_NAMES {
        let Some(values) = frame.prop(name) else {
            continue;
        };
        write!(out, "{index} {name}")?;
        for v in values {
            write!(out, " {v:.precision$}")?;
        }
        writeln!(out)?;
    }
    Ok(())
}
