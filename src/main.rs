// Copyright 2019 Amazon.com, Inc. or its affiliates. All Rights Reserved.
// SPDX-License-Identifier: MIT-0

// Permission is hereby granted, free of charge, to any person obtaining a copy of this
// software and associated documentation files (the "Software"), to deal in the Software
// without restriction, including without limitation the rights to use, copy, modify,
// merge, publish, distribute, sublicense, and/or sell copies of the Software, and to
// permit persons to whom the Software is furnished to do so.

// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND, EXPRESS OR IMPLIED,
// INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY, FITNESS FOR A
// PARTICULAR PURPOSE AND NONINFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR COPYRIGHT
// HOLDERS BE LIABLE FOR ANY CLAIM, DAMAGES OR OTHER LIABILITY, WHETHER IN AN ACTION
// OF CONTRACT, TORT OR OTHERWISE, ARISING FROM, OUT OF OR IN CONNECTION WITH THE
// SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.
use std::io;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{anyhow, Context, Result};
use clap::{ArgAction, CommandFactory, Parser};
use nv12topnm::{convert, resolve_config, write_ppm, ConfigArgs, ErrorKind, Input, Output};
use tracing::info;
use tracing_subscriber::EnvFilter;

const EXIT_FAILURE: u8 = 255;

/// Converts a raw NV12 (YCbCr 4:2:0) buffer to a PNM.
#[derive(Parser, Debug)]
#[command(name = "nv12topnm", disable_help_flag = true)]
struct Args {
    /// Width of the input image in pixels
    #[arg(short = 'w', value_name = "width", allow_negative_numbers = true)]
    width: Option<i64>,

    /// Height of the input image in pixels
    #[arg(short = 'h', value_name = "height", allow_negative_numbers = true)]
    height: Option<i64>,

    /// Bytes per line of both planes (default: width)
    #[arg(short = 'b', value_name = "bytes per line", allow_negative_numbers = true)]
    bytes_per_line: Option<i64>,

    /// Output file, `-` for standard output
    #[arg(short = 'o', value_name = "output filename")]
    output: Option<PathBuf>,

    /// Luminance only
    #[arg(short = 'l')]
    luminance_only: bool,

    /// Chrominance only
    #[arg(short = 'c')]
    chrominance_only: bool,

    /// Swap cb and cr
    #[arg(short = 's')]
    swap_chrominance: bool,

    /// Number of conversion threads
    #[arg(short = 'j', value_name = "threads")]
    threads: Option<usize>,

    /// More diagnostics on standard error, repeat for more
    #[arg(short = 'v', action = ArgAction::Count)]
    verbose: u8,

    /// Print help
    #[arg(long, action = ArgAction::Help)]
    help: Option<bool>,

    /// Input file, `-` or nothing for standard input
    input: Option<PathBuf>,
}

impl Args {
    fn config_args(&self) -> ConfigArgs {
        ConfigArgs {
            width: self.width,
            height: self.height,
            bytes_per_line: self.bytes_per_line,
            luminance_only: self.luminance_only,
            chrominance_only: self.chrominance_only,
            swap_chrominance: self.swap_chrominance,
        }
    }
}

fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn run(args: &Args) -> Result<()> {
    let config = resolve_config(&args.config_args())?;

    if let Some(threads) = args.threads {
        rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .build_global()
            .map_err(|e| anyhow!("rayon init failed: {}", e))?;
    }

    let input = Input::from_arg(args.input.as_deref());
    let output = Output::from_arg(args.output.as_deref());

    let frame_size = config.frame_size()?;
    let source = input.open()?;
    let mut sink = output.open()?;
    let frame = source
        .read_frame(frame_size)
        .with_context(|| format!("reading {input}"))?;

    let pixels = convert(&frame, &config).context("converting frame")?;
    write_ppm(&mut sink, config.width, config.height, &pixels)
        .with_context(|| format!("writing {output}"))?;

    info!(%input, %output, width = config.width, height = config.height, "done");
    Ok(())
}

fn main() -> ExitCode {
    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(err) => {
            if err.use_stderr() {
                eprint!("{err}");
            } else {
                print!("{err}");
            }
            return if err.use_stderr() {
                ExitCode::from(EXIT_FAILURE)
            } else {
                ExitCode::SUCCESS
            };
        }
    };

    init_tracing(args.verbose);

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {err:#}");
            if matches!(
                err.downcast_ref::<ErrorKind>(),
                Some(ErrorKind::MissingDimensions)
            ) {
                eprintln!("{}", Args::command().render_usage());
            }

            ExitCode::from(EXIT_FAILURE)
        }
    }
}
