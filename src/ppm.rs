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
use crate::pixel_format::RGB_DEPTH;
use crate::ErrorKind;
use std::fmt;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

/// Where the image goes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Output {
    /// Standard output
    Stdout,
    /// A file on disk, created or truncated
    File(PathBuf),
}

impl Output {
    /// `None` and `-` both select standard output
    pub fn from_arg(path: Option<&Path>) -> Self {
        match path {
            None => Output::Stdout,
            Some(path) if path == Path::new("-") => Output::Stdout,
            Some(path) => Output::File(path.to_path_buf()),
        }
    }

    /// Open the destination for buffered writing.
    ///
    /// # Errors
    ///
    /// * [`Open`] if the output file cannot be created
    ///
    /// [`Open`]: ./enum.ErrorKind.html#variant.Open
    pub fn open(&self) -> Result<BufWriter<Box<dyn Write>>, ErrorKind> {
        let sink: Box<dyn Write> = match self {
            Output::Stdout => Box::new(io::stdout().lock()),
            Output::File(path) => Box::new(File::create(path).map_err(|source| {
                ErrorKind::Open {
                    path: path.clone(),
                    source,
                }
            })?),
        };

        Ok(BufWriter::new(sink))
    }
}

#[cfg(not(tarpaulin_include))]
impl fmt::Display for Output {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Output::Stdout => write!(f, "standard output"),
            Output::File(path) => write!(f, "{}", path.display()),
        }
    }
}

/// Write a binary PPM (P6) image with a maximum value of 255.
///
/// The header is `P6\n<width> <height>\n255\n`, followed by `pixels` as is.
/// The sink is flushed before returning.
///
/// # Errors
///
/// * [`NotEnoughData`] if `pixels` is not exactly `width * height * 3` bytes long.
///   Nothing is written in that case
///
/// * [`Io`] if writing fails
///
/// [`NotEnoughData`]: ./enum.ErrorKind.html#variant.NotEnoughData
/// [`Io`]: ./enum.ErrorKind.html#variant.Io
pub fn write_ppm<W: Write>(
    sink: &mut W,
    width: u32,
    height: u32,
    pixels: &[u8],
) -> Result<(), ErrorKind> {
    let expected = (width as usize)
        .checked_mul(height as usize)
        .and_then(|count| count.checked_mul(RGB_DEPTH));
    if expected != Some(pixels.len()) {
        return Err(ErrorKind::NotEnoughData);
    }

    write!(sink, "P6\n{width} {height}\n255\n")?;
    sink.write_all(pixels)?;
    sink.flush()?;

    Ok(())
}
