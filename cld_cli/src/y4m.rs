// Copyright (c) the JPEG XL Project Authors. All rights reserved.
//
// Use of this source code is governed by a BSD-style
// license that can be found in the LICENSE file.

//! Minimal YUV4MPEG2 reader.

use std::io::{self, BufRead, Read};

use cld::frame::{ColorFamily, Frame, SampleType, VideoFormat};
use cld::image::OwnedPlane;
use thiserror::Error;

const SIGNATURE: &str = "YUV4MPEG2";
const FRAME_MARKER: &str = "FRAME";
// Header and frame lines are short; anything longer is not Y4M.
const MAX_LINE_LENGTH: u64 = 1024;

#[derive(Error, Debug)]
pub enum Y4mError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("Not a YUV4MPEG2 stream")]
    InvalidSignature,
    #[error("Missing {0} tag in stream header")]
    MissingDimension(char),
    #[error("Invalid stream header tag {0:?}")]
    InvalidTag(String),
    #[error("Unknown colorspace {0:?}")]
    UnknownColorspace(String),
    #[error("Expected FRAME marker, found {0:?}")]
    InvalidFrameMarker(String),
    #[error("Stream truncated in frame {0}")]
    Truncated(usize),
    #[error(transparent)]
    Cld(#[from] cld::Error),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Y4mHeader {
    pub size: (usize, usize),
    pub format: VideoFormat,
}

fn parse_colorspace(tag: &str) -> Result<VideoFormat, Y4mError> {
    let (layout, bits) = match tag.split_once('p') {
        Some((layout, bits)) if !bits.is_empty() && bits.bytes().all(|b| b.is_ascii_digit()) => {
            let bits = bits
                .parse()
                .map_err(|_| Y4mError::UnknownColorspace(tag.to_string()))?;
            (layout, bits)
        }
        // "420paldv" also contains a 'p'.
        _ => (tag, 8),
    };
    let (chroma_shift, color_family, num_planes) = match layout {
        "420" | "420jpeg" | "420paldv" | "420mpeg2" => ((1, 1), ColorFamily::Yuv, 3),
        "422" => ((1, 0), ColorFamily::Yuv, 3),
        "444" => ((0, 0), ColorFamily::Yuv, 3),
        "mono" => ((0, 0), ColorFamily::Gray, 1),
        "mono16" => return Ok(mono(16)),
        _ => return Err(Y4mError::UnknownColorspace(tag.to_string())),
    };
    Ok(VideoFormat {
        bits_per_sample: bits,
        sample_type: SampleType::Integer,
        color_family,
        num_planes,
        chroma_shift,
    })
}

fn mono(bits_per_sample: u32) -> VideoFormat {
    VideoFormat {
        bits_per_sample,
        sample_type: SampleType::Integer,
        color_family: ColorFamily::Gray,
        num_planes: 1,
        chroma_shift: (0, 0),
    }
}

fn parse_dimension(value: &str, tag: &str) -> Result<usize, Y4mError> {
    match value.parse::<usize>() {
        Ok(v) if v > 0 => Ok(v),
        _ => Err(Y4mError::InvalidTag(tag.to_string())),
    }
}

impl Y4mHeader {
    pub fn parse(line: &str) -> Result<Y4mHeader, Y4mError> {
        let mut tokens = line.split_ascii_whitespace();
        if tokens.next() != Some(SIGNATURE) {
            return Err(Y4mError::InvalidSignature);
        }
        let (mut width, mut height) = (None, None);
        let mut format = VideoFormat::yuv8((1, 1));
        for token in tokens {
            let mut chars = token.chars();
            let Some(tag) = chars.next() else {
                continue;
            };
            let value = chars.as_str();
            match tag {
                'W' => width = Some(parse_dimension(value, token)?),
                'H' => height = Some(parse_dimension(value, token)?),
                'C' => format = parse_colorspace(value)?,
                // Frame rate, interlacing, aspect ratio and extensions do not
                // affect the samples.
                'F' | 'I' | 'A' | 'X' => {}
                _ => return Err(Y4mError::InvalidTag(token.to_string())),
            }
        }
        Ok(Y4mHeader {
            size: (
                width.ok_or(Y4mError::MissingDimension('W'))?,
                height.ok_or(Y4mError::MissingDimension('H'))?,
            ),
            format,
        })
    }

    pub fn plane_size(&self, plane: usize) -> (usize, usize) {
        self.format.plane_size(plane, self.size)
    }
}

pub struct Y4mReader<R: BufRead> {
    reader: R,
    header: Y4mHeader,
    frames_read: usize,
}

fn read_line<R: BufRead>(reader: &mut R) -> io::Result<Option<String>> {
    let mut line = Vec::new();
    let read = reader
        .by_ref()
        .take(MAX_LINE_LENGTH)
        .read_until(b'\n', &mut line)?;
    if read == 0 {
        return Ok(None);
    }
    if line.pop() != Some(b'\n') {
        return Err(io::Error::new(
            io::ErrorKind::InvalidData,
            "unterminated header line",
        ));
    }
    Ok(Some(String::from_utf8_lossy(&line).into_owned()))
}

impl<R: BufRead> Y4mReader<R> {
    pub fn new(mut reader: R) -> Result<Y4mReader<R>, Y4mError> {
        let line = read_line(&mut reader)?.ok_or(Y4mError::InvalidSignature)?;
        let header = Y4mHeader::parse(&line)?;
        Ok(Y4mReader {
            reader,
            header,
            frames_read: 0,
        })
    }

    pub fn header(&self) -> &Y4mHeader {
        &self.header
    }

    /// Reads the next frame, or `None` at the end of the stream.
    pub fn read_frame(&mut self) -> Result<Option<Frame>, Y4mError> {
        let format = self.header.format;
        format.check_supported()?;
        let Some(line) = read_line(&mut self.reader)? else {
            return Ok(None);
        };
        if line.split_ascii_whitespace().next() != Some(FRAME_MARKER) {
            return Err(Y4mError::InvalidFrameMarker(line));
        }
        let mut planes = Vec::with_capacity(format.num_planes);
        for p in 0..format.num_planes {
            let size = self.header.plane_size(p);
            let len = size
                .0
                .checked_mul(size.1)
                .ok_or(cld::Error::ImageSizeTooLarge(size.0, size.1))?;
            let mut data = Vec::new();
            data.try_reserve_exact(len).map_err(cld::Error::from)?;
            // The buffer only holds bytes actually present in the stream.
            self.reader
                .by_ref()
                .take(len as u64)
                .read_to_end(&mut data)?;
            if data.len() < len {
                return Err(Y4mError::Truncated(self.frames_read));
            }
            planes.push(OwnedPlane::from_vec(data, size, size.0)?);
        }
        self.frames_read += 1;
        Ok(Some(Frame::new(format, planes)))
    }
}

impl<R: BufRead> Iterator for Y4mReader<R> {
    type Item = Result<Frame, Y4mError>;

    fn next(&mut self) -> Option<Self::Item> {
        self.read_frame().transpose()
    }
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use test_log::test;

    use super::*;

    fn stream(header: &str, frames: &[Vec<u8>]) -> Vec<u8> {
        let mut data = format!("{header}\n").into_bytes();
        for frame in frames {
            data.extend_from_slice(b"FRAME\n");
            data.extend_from_slice(frame);
        }
        data
    }

    #[test]
    fn parses_header() -> Result<(), Y4mError> {
        let header = Y4mHeader::parse("YUV4MPEG2 W64 H48 F25:1 Ip A1:1 C422 XYSCSS=422")?;
        assert_eq!(header.size, (64, 48));
        assert_eq!(header.format, VideoFormat::yuv8((1, 0)));
        assert_eq!(header.plane_size(1), (32, 48));
        Ok(())
    }

    #[test]
    fn default_colorspace_is_420() -> Result<(), Y4mError> {
        let header = Y4mHeader::parse("YUV4MPEG2 W17 H9")?;
        assert_eq!(header.format, VideoFormat::yuv8((1, 1)));
        assert_eq!(header.plane_size(2), (9, 5));
        Ok(())
    }

    #[test]
    fn colorspaces() -> Result<(), Y4mError> {
        assert_eq!(parse_colorspace("420paldv")?, VideoFormat::yuv8((1, 1)));
        assert_eq!(parse_colorspace("444p10")?.bits_per_sample, 10);
        assert_eq!(parse_colorspace("mono")?.color_family, ColorFamily::Gray);
        assert_eq!(parse_colorspace("mono16")?.bits_per_sample, 16);
        assert!(matches!(
            parse_colorspace("411"),
            Err(Y4mError::UnknownColorspace(_))
        ));
        Ok(())
    }

    #[test]
    fn header_errors() {
        assert!(matches!(
            Y4mHeader::parse("YUV4MPEG W8 H8"),
            Err(Y4mError::InvalidSignature)
        ));
        assert!(matches!(
            Y4mHeader::parse("YUV4MPEG2 W8"),
            Err(Y4mError::MissingDimension('H'))
        ));
        assert!(matches!(
            Y4mHeader::parse("YUV4MPEG2 W0 H8"),
            Err(Y4mError::InvalidTag(_))
        ));
    }

    #[test]
    fn reads_frames() -> Result<(), Y4mError> {
        let frame: Vec<u8> = (0..16 * 16 + 2 * 8 * 8).map(|i| i as u8).collect();
        let data = stream("YUV4MPEG2 W16 H16 C420jpeg", &[frame.clone(), frame]);
        let reader = Y4mReader::new(Cursor::new(data))?;
        let frames = reader.collect::<Result<Vec<_>, _>>()?;
        assert_eq!(frames.len(), 2);
        let chroma = frames[1].plane(1).expect("chroma plane");
        assert_eq!(chroma.size(), (8, 8));
        assert_eq!(chroma.row(0)[0], 0);
        assert_eq!(frames[0].plane(2).expect("chroma plane").row(0)[0], 64);
        Ok(())
    }

    #[test]
    fn truncated_frame() -> Result<(), Y4mError> {
        let data = stream("YUV4MPEG2 W16 H16 C444", &[vec![0; 100]]);
        let mut reader = Y4mReader::new(Cursor::new(data))?;
        assert!(matches!(reader.read_frame(), Err(Y4mError::Truncated(0))));
        Ok(())
    }

    #[test]
    fn oversized_header_is_an_error() -> Result<(), Y4mError> {
        let data = b"YUV4MPEG2 W8589934592 H8589934592 C444\nFRAME\n".to_vec();
        let mut reader = Y4mReader::new(Cursor::new(data))?;
        assert!(matches!(
            reader.read_frame(),
            Err(Y4mError::Cld(cld::Error::ImageSizeTooLarge(
                8589934592,
                8589934592
            )))
        ));
        Ok(())
    }

    #[test]
    fn large_header_with_short_data() -> Result<(), Y4mError> {
        let data = stream("YUV4MPEG2 W100000 H100000 C444", &[vec![0; 64]]);
        let mut reader = Y4mReader::new(Cursor::new(data))?;
        assert!(matches!(
            reader.read_frame(),
            Err(Y4mError::Truncated(0)) | Err(Y4mError::Cld(cld::Error::OutOfMemory(_)))
        ));
        Ok(())
    }

    #[test]
    fn bad_frame_marker() -> Result<(), Y4mError> {
        let data = b"YUV4MPEG2 W8 H8 C444\nFRAMX\n".to_vec();
        let mut reader = Y4mReader::new(Cursor::new(data))?;
        assert!(matches!(
            reader.read_frame(),
            Err(Y4mError::InvalidFrameMarker(_))
        ));
        Ok(())
    }

    #[test]
    fn unsupported_format_is_rejected() -> Result<(), Y4mError> {
        let data = stream("YUV4MPEG2 W8 H8 C444p10", &[vec![0; 8 * 8 * 3 * 2]]);
        let mut reader = Y4mReader::new(Cursor::new(data))?;
        assert!(matches!(
            reader.read_frame(),
            Err(Y4mError::Cld(cld::Error::InvalidInputFormat { .. }))
        ));
        Ok(())
    }
}
