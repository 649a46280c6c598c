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
#![warn(missing_docs)]
#![deny(trivial_casts)]
#![deny(trivial_numeric_casts)]
#![deny(unstable_features)]
#![deny(unused_import_braces)]
#![deny(
    clippy::complexity,
    clippy::correctness,
    clippy::perf,
    clippy::style,
    clippy::pedantic
)]
#![allow(
    clippy::inline_always,
    // Yield false positives
    clippy::must_use_candidate,
    clippy::missing_panics_doc,
    clippy::module_name_repetitions,
)]

//! nv12topnm converts a raw NV12 frame to a binary PPM image.
//!
//! NV12 is YCbCr 4:2:0 with one full resolution luma plane followed by one plane with
//! cb and cr interleaved, sub-sampled by a factor of 2 in both dimensions. Both planes
//! are stored in a single buffer and share the same stride.
//!
//! Colors are converted with a fixed point ITU-R Recommendation BT.601 (full range)
//! transform, see [`ycbcr_to_rgb`].
//!
//! # Examples
//!
//! Convert a tightly packed 2x2 frame and write it as PPM:
//! ```
//! use nv12topnm::{convert, write_ppm, Config};
//! use std::error;
//!
//! fn to_ppm() -> Result<Vec<u8>, Box<dyn error::Error>> {
//!     let config = Config::new(2, 2);
//!     let frame = [16, 235, 16, 235, 128, 128];
//!
//!     let pixels = convert(&frame, &config)?;
//!     let mut ppm = Vec::new();
//!     write_ppm(&mut ppm, config.width, config.height, &pixels)?;
//!
//!     Ok(ppm)
//! }
//! # assert_eq!(&to_ppm().unwrap()[..11], b"P6\n2 2\n255\n");
//! ```
//!
//! Resolve command line style options, then read the frame from a file:
//! ```no_run
//! use nv12topnm::{convert, load_frame_from, resolve_config, ConfigArgs, Input};
//! use std::error;
//! use std::path::Path;
//!
//! fn from_file() -> Result<Vec<u8>, Box<dyn error::Error>> {
//!     let config = resolve_config(&ConfigArgs {
//!         width: Some(640),
//!         height: Some(480),
//!         bytes_per_line: Some(704),
//!         swap_chrominance: true,
//!         ..ConfigArgs::default()
//!     })?;
//!
//!     let input = Input::from_arg(Some(Path::new("frame.nv12")));
//!     let frame = load_frame_from(&input, config.frame_size()?)?;
//!
//!     Ok(convert(&frame, &config)?)
//! }
//! ```
mod color_space;
mod config;
mod convert_image;
mod dispatcher;
mod frame;
mod pixel_format;
mod ppm;

use rayon::prelude::*;
use std::error;
use std::fmt;
use std::io;
use std::path::PathBuf;
use std::time::Instant;
use tracing::{debug, trace};

pub use color_space::ycbcr_to_rgb;
pub use config::{resolve_config, ChannelMode, Config, ConfigArgs};
pub use frame::{load_frame, load_frame_from, FrameSource, Input};
pub use ppm::{write_ppm, Output};

/// An enumeration of errors.
#[derive(Debug)]
pub enum ErrorKind {
    /// Width or height is missing or not positive
    MissingDimensions,
    /// One or more parameters have invalid values for the called function
    InvalidValue,
    /// A file could not be opened
    Open {
        /// Path of the file
        path: PathBuf,
        /// Underlying error
        source: io::Error,
    },
    /// The input ended before a whole frame was read
    Truncated {
        /// Frame size in bytes
        expected: usize,
        /// Bytes available
        actual: usize,
    },
    /// A buffer of the given size could not be allocated
    AllocationFailed(usize),
    /// Not enough data was provided to the called function. Typically, provided
    /// arrays are not correctly sized
    NotEnoughData,
    /// A sample address falls outside the frame
    OutOfBounds {
        /// Offending byte offset
        index: usize,
        /// Frame size in bytes
        len: usize,
    },
    /// Reading or writing failed
    Io(io::Error),
}

#[cfg(not(tarpaulin_include))]
impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ErrorKind::MissingDimensions => {
                write!(f, "Must specify width and height of input image")
            }
            ErrorKind::InvalidValue => write!(
                f,
                "One or more parameters have not legal values for the command"
            ),
            ErrorKind::Open { path, .. } => write!(f, "Error opening {}", path.display()),
            ErrorKind::Truncated { expected, actual } => write!(
                f,
                "Input file not big enough: expected {expected} bytes, got {actual}"
            ),
            ErrorKind::AllocationFailed(size) => {
                write!(f, "Not enough memory to allocate {size} bytes")
            }
            ErrorKind::NotEnoughData => write!(f, "Not enough data provided"),
            ErrorKind::OutOfBounds { index, len } => write!(
                f,
                "Sample offset {index} is outside of the {len} byte frame"
            ),
            ErrorKind::Io(_) => write!(f, "I/O error"),
        }
    }
}

#[cfg(not(tarpaulin_include))]
impl error::Error for ErrorKind {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match self {
            ErrorKind::Open { source, .. } => Some(source),
            ErrorKind::Io(err) => Some(err),
            _ => None,
        }
    }
}

impl From<io::Error> for ErrorKind {
    fn from(err: io::Error) -> Self {
        ErrorKind::Io(err)
    }
}

/// Converts an NV12 frame to packed rgb, writing into a caller provided buffer.
///
/// `dst` receives `width * height` pixels of 3 bytes each, row-major, without padding.
/// Bytes of `dst` past that are left untouched.
///
/// Rows are converted in parallel on the global rayon thread pool. The result does
/// not depend on the number of threads.
///
/// # Errors
///
/// * [`InvalidValue`] if width, height or bytes per line is zero, or a size overflows
///
/// * [`NotEnoughData`] if `frame` is shorter than [`Config::frame_size`] or `dst` is
///   shorter than [`Config::rgb_size`]
///
/// * [`OutOfBounds`] if a sample read by the conversion lies past the end of the frame.
///   This happens with odd dimensions or a stride narrower than the width.
///   Nothing is written to `dst` in that case
///
/// [`InvalidValue`]: ./enum.ErrorKind.html#variant.InvalidValue
/// [`NotEnoughData`]: ./enum.ErrorKind.html#variant.NotEnoughData
/// [`OutOfBounds`]: ./enum.ErrorKind.html#variant.OutOfBounds
pub fn convert_into(frame: &[u8], config: &Config, dst: &mut [u8]) -> Result<(), ErrorKind> {
    let layout = config.layout()?;
    let frame_size = layout.buffer_size().ok_or(ErrorKind::InvalidValue)?;
    let rgb_stride = layout.rgb_stride().ok_or(ErrorKind::InvalidValue)?;
    let rgb_size = layout.rgb_size().ok_or(ErrorKind::InvalidValue)?;
    if frame.len() < frame_size || dst.len() < rgb_size {
        return Err(ErrorKind::NotEnoughData);
    }

    let frame = &frame[..frame_size];
    layout.check_bounds(config.mode, frame_size)?;

    let mode = config.mode;
    let width = layout.width();
    let convert_row = dispatcher::get_row_converter(mode, config.swap_chrominance);

    let start = Instant::now();
    dst[..rgb_size]
        .par_chunks_exact_mut(rgb_stride)
        .enumerate()
        .for_each(|(row, rgb_row)| {
            let y_row: &[u8] = if mode.reads_luma() {
                &frame[layout.luma_offset(row)..]
            } else {
                &[]
            };

            let uv_row: &[u8] = if mode.reads_chroma() {
                &frame[layout.chroma_offset(row)..]
            } else {
                &[]
            };

            convert_row(width, y_row, uv_row, rgb_row);
        });

    trace!(
        rows = layout.height(),
        elapsed = ?start.elapsed(),
        "converted frame"
    );

    Ok(())
}

/// Converts an NV12 frame to a newly allocated packed rgb buffer.
///
/// See [`convert_into`] for the layout of the result.
///
/// # Errors
///
/// * [`AllocationFailed`] if the output buffer cannot be allocated
///
/// * every error of [`convert_into`]
///
/// [`AllocationFailed`]: ./enum.ErrorKind.html#variant.AllocationFailed
pub fn convert(frame: &[u8], config: &Config) -> Result<Vec<u8>, ErrorKind> {
    let rgb_size = config.rgb_size()?;

    let mut pixels = Vec::new();
    pixels
        .try_reserve_exact(rgb_size)
        .map_err(|_| ErrorKind::AllocationFailed(rgb_size))?;
    pixels.resize(rgb_size, 0);

    debug!(
        width = config.width,
        height = config.height,
        mode = %config.mode,
        "converting frame"
    );
    convert_into(frame, config, &mut pixels)?;

    Ok(pixels)
}
