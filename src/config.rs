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
use crate::pixel_format::Nv12Layout;
use crate::ErrorKind;
use std::fmt;
use tracing::{debug, warn};

/// Which channels of the source frame contribute to the output.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ChannelMode {
    /// Luma and chroma, the regular conversion
    Full,
    /// Luma only. Chroma is held at zero color difference, output is gray
    LuminanceOnly,
    /// Chroma only. Luma is held at 128
    ChrominanceOnly,
}

impl ChannelMode {
    /// Resolve the two independent channel flags.
    ///
    /// When both are requested, luminance only takes precedence.
    pub const fn from_flags(luminance_only: bool, chrominance_only: bool) -> Self {
        if luminance_only {
            ChannelMode::LuminanceOnly
        } else if chrominance_only {
            ChannelMode::ChrominanceOnly
        } else {
            ChannelMode::Full
        }
    }

    pub(crate) const fn reads_luma(self) -> bool {
        !matches!(self, ChannelMode::ChrominanceOnly)
    }

    pub(crate) const fn reads_chroma(self) -> bool {
        !matches!(self, ChannelMode::LuminanceOnly)
    }
}

#[cfg(not(tarpaulin_include))]
impl fmt::Display for ChannelMode {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ChannelMode::Full => write!(f, "full"),
            ChannelMode::LuminanceOnly => write!(f, "luminance-only"),
            ChannelMode::ChrominanceOnly => write!(f, "chrominance-only"),
        }
    }
}

/// Raw, unvalidated conversion options, as they come from the command line.
///
/// Numeric values are signed so that zero and negative inputs can be told apart
/// from absent ones and rejected with a proper error.
#[derive(Clone, Debug, Default)]
pub struct ConfigArgs {
    /// Width of the image in pixels
    pub width: Option<i64>,
    /// Height of the image in pixels
    pub height: Option<i64>,
    /// Distance in bytes between the starts of consecutive lines
    pub bytes_per_line: Option<i64>,
    /// Render luma only
    pub luminance_only: bool,
    /// Render chroma only
    pub chrominance_only: bool,
    /// Exchange cb and cr
    pub swap_chrominance: bool,
}

/// Validated conversion configuration. Immutable for the whole run.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Config {
    /// Width of the image in pixels
    pub width: u32,
    /// Height of the image in pixels
    pub height: u32,
    /// Distance in bytes between the starts of consecutive lines, in both planes
    pub bytes_per_line: usize,
    /// Channels that contribute to the output
    pub mode: ChannelMode,
    /// Exchange cb and cr after they are read
    pub swap_chrominance: bool,
}

impl Config {
    /// Full conversion of a tightly packed frame
    pub const fn new(width: u32, height: u32) -> Self {
        Config {
            width,
            height,
            bytes_per_line: width as usize,
            mode: ChannelMode::Full,
            swap_chrominance: false,
        }
    }

    pub(crate) fn layout(&self) -> Result<Nv12Layout, ErrorKind> {
        if self.width == 0 || self.height == 0 || self.bytes_per_line == 0 {
            return Err(ErrorKind::InvalidValue);
        }

        Ok(Nv12Layout::new(
            self.width as usize,
            self.height as usize,
            self.bytes_per_line,
        ))
    }

    /// Number of bytes in one raw frame: `bytes_per_line * height * 3 / 2`
    ///
    /// # Errors
    ///
    /// * [`InvalidValue`] if a dimension is zero or the size does not fit in `usize`
    ///
    /// [`InvalidValue`]: ./enum.ErrorKind.html#variant.InvalidValue
    pub fn frame_size(&self) -> Result<usize, ErrorKind> {
        self.layout()?.buffer_size().ok_or(ErrorKind::InvalidValue)
    }

    /// Number of bytes of rgb output: `width * height * 3`
    ///
    /// # Errors
    ///
    /// * [`InvalidValue`] if a dimension is zero or the size does not fit in `usize`
    ///
    /// [`InvalidValue`]: ./enum.ErrorKind.html#variant.InvalidValue
    pub fn rgb_size(&self) -> Result<usize, ErrorKind> {
        self.layout()?.rgb_size().ok_or(ErrorKind::InvalidValue)
    }
}

fn positive(value: Option<i64>) -> Option<i64> {
    value.filter(|&v| v > 0)
}

/// Validate raw options and fill in defaults.
///
/// `bytes_per_line` defaults to `width` when absent or not positive.
///
/// # Errors
///
/// * [`MissingDimensions`] if width or height is absent or not positive
///
/// * [`InvalidValue`] if a value does not fit the target integer type
///
/// [`MissingDimensions`]: ./enum.ErrorKind.html#variant.MissingDimensions
/// [`InvalidValue`]: ./enum.ErrorKind.html#variant.InvalidValue
pub fn resolve_config(args: &ConfigArgs) -> Result<Config, ErrorKind> {
    let (Some(width), Some(height)) = (positive(args.width), positive(args.height)) else {
        return Err(ErrorKind::MissingDimensions);
    };

    let width = u32::try_from(width).map_err(|_| ErrorKind::InvalidValue)?;
    let height = u32::try_from(height).map_err(|_| ErrorKind::InvalidValue)?;
    let bytes_per_line = match positive(args.bytes_per_line) {
        Some(stride) => usize::try_from(stride).map_err(|_| ErrorKind::InvalidValue)?,
        None => usize::try_from(width).map_err(|_| ErrorKind::InvalidValue)?,
    };

    if args.luminance_only && args.chrominance_only {
        warn!("both luminance-only and chrominance-only requested, using luminance-only");
    }

    let config = Config {
        width,
        height,
        bytes_per_line,
        mode: ChannelMode::from_flags(args.luminance_only, args.chrominance_only),
        swap_chrominance: args.swap_chrominance,
    };

    debug!(
        width,
        height,
        bytes_per_line,
        mode = %config.mode,
        swap_chrominance = config.swap_chrominance,
        "resolved configuration"
    );

    Ok(config)
}
