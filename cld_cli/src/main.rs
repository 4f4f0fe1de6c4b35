// Copyright (c) the JPEG XL Project Authors. All rights reserved.
//
// Use of this source code is governed by a BSD-style
// license that can be found in the LICENSE file.

use std::fs;
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::PathBuf;

use clap::Parser;
use cld_cli::run::{RunOptions, write_descriptors};
use cld_cli::y4m::Y4mReader;
use color_eyre::eyre::{Result, WrapErr};

#[derive(Parser)]
#[command(about = "Compute MPEG-7 Color Layout Descriptors for each frame of a Y4M stream")]
struct Opt {
    /// Input .y4m file, or - for stdin
    input: PathBuf,

    /// Output text file; defaults to stdout
    #[clap(long, short)]
    output: Option<PathBuf>,

    /// Stop after this many frames
    #[clap(long)]
    frames: Option<usize>,

    /// Digits printed after the decimal point
    #[clap(long, default_value_t = 6)]
    precision: usize,

    /// Frames decoded before descriptors are computed
    #[clap(long, default_value_t = 16)]
    batch_size: usize,
}

fn main() -> Result<()> {
    color_eyre::install()?;

    #[cfg(feature = "tracing-subscriber")]
    {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};
        tracing_subscriber::registry()
            .with(fmt::layer().with_writer(io::stderr))
            .with(EnvFilter::from_default_env())
            .init();
    }

    let opt = Opt::parse();
    let input: Box<dyn BufRead> = if opt.input.as_os_str() == "-" {
        Box::new(io::stdin().lock())
    } else {
        let file = fs::File::open(&opt.input)
            .wrap_err_with(|| format!("cannot open {}", opt.input.display()))?;
        Box::new(BufReader::new(file))
    };
    let reader = Y4mReader::new(input).wrap_err("cannot parse stream header")?;
    let header = *reader.header();
    header
        .format
        .check_supported()
        .wrap_err("unsupported input format")?;
    eprintln!(
        "Stream: {}x{}, {} planes, chroma shift {:?}",
        header.size.0, header.size.1, header.format.num_planes, header.format.chroma_shift
    );

    let options = RunOptions {
        frames: opt.frames,
        precision: opt.precision,
        batch_size: opt.batch_size,
    };
    let written = match &opt.output {
        Some(path) => {
            let file = fs::File::create(path)
                .wrap_err_with(|| format!("cannot create {}", path.display()))?;
            let mut out = BufWriter::new(file);
            let written = write_descriptors(reader, &mut out, &options)?;
            out.flush()?;
            written
        }
        None => {
            let mut out = io::stdout().lock();
            write_descriptors(reader, &mut out, &options)?
        }
    };
    eprintln!("Computed descriptors for {written} frames");
    Ok(())
}
