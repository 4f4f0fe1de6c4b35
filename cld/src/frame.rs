// Copyright (c) the JPEG XL Project Authors. All rights reserved.
//
// Use of this source code is governed by a BSD-style
// license that can be found in the LICENSE file.

use std::collections::BTreeMap;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::{
    descriptor::{compute_descriptor, Descriptor},
    error::{Error, Result},
    image::{OwnedPlane, Plane},
    util::tracing_wrappers::*,
    NUM_CHANNELS,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SampleType {
    Integer,
    Float,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ColorFamily {
    Gray,
    Rgb,
    Yuv,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct VideoFormat {
    pub bits_per_sample: u32,
    pub sample_type: SampleType,
    pub color_family: ColorFamily,
    pub num_planes: usize,
    /// log2 of the horizontal and vertical chroma subsampling factors.
    pub chroma_shift: (u32, u32),
}

impl VideoFormat {
    pub const fn yuv8(chroma_shift: (u32, u32)) -> VideoFormat {
        VideoFormat {
            bits_per_sample: 8,
            sample_type: SampleType::Integer,
            color_family: ColorFamily::Yuv,
            num_planes: 3,
            chroma_shift,
        }
    }

    /// Descriptors are only defined for 8-bit integer YUV.
    pub fn check_supported(&self) -> Result<()> {
        if self.bits_per_sample != 8
            || self.sample_type != SampleType::Integer
            || self.color_family != ColorFamily::Yuv
        {
            return Err(Error::InvalidInputFormat {
                bits_per_sample: self.bits_per_sample,
                sample_type: self.sample_type,
                color_family: self.color_family,
            });
        }
        Ok(())
    }

    pub fn plane_size(&self, plane: usize, size: (usize, usize)) -> (usize, usize) {
        if plane == 0 || self.color_family != ColorFamily::Yuv {
            return size;
        }
        let (sx, sy) = self.chroma_shift;
        (size.0.div_ceil(1 << sx), size.1.div_ceil(1 << sy))
    }
}

/// A decoded frame together with its property map.
#[derive(Clone, Debug)]
pub struct Frame {
    format: VideoFormat,
    planes: Vec<OwnedPlane>,
    props: BTreeMap<String, Vec<f64>>,
}

impl Frame {
    pub fn new(format: VideoFormat, planes: Vec<OwnedPlane>) -> Frame {
        Frame {
            format,
            planes,
            props: BTreeMap::new(),
        }
    }

    pub fn plane(&self, plane: usize) -> Option<Plane<'_>> {
        self.planes.get(plane).map(OwnedPlane::as_plane)
    }

    pub fn props(&self) -> &BTreeMap<String, Vec<f64>> {
        &self.props
    }

    pub fn prop(&self, name: &str) -> Option<&[f64]> {
        self.props.get(name).map(Vec::as_slice)
    }

    pub fn set_prop(&mut self, name: impl Into<String>, values: &[f64]) {
        self.props.insert(name.into(), values.to_vec());
    }

    pub fn descriptor(&self) -> Result<Descriptor> {
        self.format.check_supported()?;
        let planes = (0..NUM_CHANNELS)
            .map(|c| self.plane(c).ok_or(Error::MissingPlane(c)))
            .collect::<Result<Vec<_>>>()?;
        compute_descriptor(&planes)
    }

    pub fn attach_descriptor(&mut self, descriptor: &Descriptor) {
        for (name, values) in descriptor.properties() {
            self.set_prop(name, values);
        }
    }

    /// Returns a copy of this frame with the descriptor attached as
    /// properties. `self` is not modified.
    pub fn with_descriptor(&self) -> Result<Frame> {
        let descriptor = self.descriptor()?;
        let mut dst = self.clone();
        dst.attach_descriptor(&descriptor);
        Ok(dst)
    }
}

/// Computes one descriptor per frame, preserving order. Stops at the first
/// failing frame.
pub fn compute_descriptors(frames: &[Frame]) -> Result<Vec<Descriptor>> {
    debug!(num_frames = frames.len(), "computing descriptors");
    #[cfg(feature = "parallel")]
    let descriptors = frames.par_iter().map(Frame::descriptor).collect();
    #[cfg(not(feature = "parallel"))]
    let descriptors = frames.iter().map(Frame::descriptor).collect();
    descriptors
}

#[cfg(test)]
mod test {
    use rand::SeedableRng;
    use rand_xorshift::XorShiftRng;
    use test_log::test;

    use super::*;
    use crate::CHANNEL_PROPERTY_NAMES;

    fn random_frame(rng: &mut XorShiftRng, format: VideoFormat) -> Result<Frame> {
        let size = (40, 24);
        let planes = (0..format.num_planes)
            .map(|p| OwnedPlane::new_random(format.plane_size(p, size), rng))
            .collect::<Result<Vec<_>>>()?;
        Ok(Frame::new(format, planes))
    }

    #[test]
    fn plane_sizes_round_up() {
        let format = VideoFormat::yuv8((1, 1));
        assert_eq!(format.plane_size(0, (17, 9)), (17, 9));
        assert_eq!(format.plane_size(1, (17, 9)), (9, 5));
        assert_eq!(VideoFormat::yuv8((1, 0)).plane_size(2, (17, 9)), (9, 9));
    }

    #[test]
    fn unsupported_formats() {
        let high_depth = VideoFormat {
            bits_per_sample: 10,
            ..VideoFormat::yuv8((0, 0))
        };
        assert!(matches!(
            high_depth.check_supported(),
            Err(Error::InvalidInputFormat {
                bits_per_sample: 10,
                ..
            })
        ));
        let rgb = VideoFormat {
            color_family: ColorFamily::Rgb,
            ..VideoFormat::yuv8((0, 0))
        };
        assert!(rgb.check_supported().is_err());
        let float = VideoFormat {
            sample_type: SampleType::Float,
            ..VideoFormat::yuv8((0, 0))
        };
        assert!(float.check_supported().is_err());
        assert!(VideoFormat::yuv8((1, 1)).check_supported().is_ok());
    }

    #[test]
    fn attaches_properties_to_copy() -> Result<()> {
        let mut rng = XorShiftRng::seed_from_u64(1);
        let frame = random_frame(&mut rng, VideoFormat::yuv8((1, 1)))?;
        let with_cld = frame.with_descriptor()?;
        assert!(frame.props().is_empty());
        let descriptor = frame.descriptor()?;
        for (c, name) in CHANNEL_PROPERTY_NAMES.iter().enumerate() {
            assert_eq!(with_cld.prop(name), Some(&descriptor.channel(c)[..]));
        }
        assert_eq!(with_cld.plane(0), frame.plane(0));
        Ok(())
    }

    #[test]
    fn missing_plane() -> Result<()> {
        let luma = OwnedPlane::new((16, 16))?;
        let frame = Frame::new(VideoFormat::yuv8((0, 0)), vec![luma.clone(), luma]);
        assert!(matches!(frame.descriptor(), Err(Error::MissingPlane(2))));
        Ok(())
    }

    #[test]
    fn rejects_unsupported_frame() -> Result<()> {
        let mut rng = XorShiftRng::seed_from_u64(2);
        let format = VideoFormat {
            color_family: ColorFamily::Gray,
            num_planes: 1,
            ..VideoFormat::yuv8((0, 0))
        };
        let frame = random_frame(&mut rng, format)?;
        assert!(matches!(
            frame.with_descriptor(),
            Err(Error::InvalidInputFormat { .. })
        ));
        Ok(())
    }

    #[test]
    fn batch_matches_single_frames() -> Result<()> {
        let mut rng = XorShiftRng::seed_from_u64(3);
        let frames = (0..6)
            .map(|_| random_frame(&mut rng, VideoFormat::yuv8((1, 0))))
            .collect::<Result<Vec<_>>>()?;
        let batch = compute_descriptors(&frames)?;
        assert_eq!(batch.len(), frames.len());
        for (frame, descriptor) in frames.iter().zip(&batch) {
            assert_eq!(&frame.descriptor()?, descriptor);
        }
        Ok(())
    }

    #[test]
    fn batch_propagates_errors() -> Result<()> {
        let mut rng = XorShiftRng::seed_from_u64(4);
        let mut frames = vec![random_frame(&mut rng, VideoFormat::yuv8((0, 0)))?];
        frames.push(Frame::new(VideoFormat::yuv8((0, 0)), vec![]));
        assert!(matches!(
            compute_descriptors(&frames),
            Err(Error::MissingPlane(0))
        ));
        Ok(())
    }
}
