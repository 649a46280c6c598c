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
use crate::ErrorKind;
use memmap2::Mmap;
use std::fmt;
use std::fs::File;
use std::io::{self, BufReader, Read};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Where the raw frame comes from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Input {
    /// Standard input
    Stdin,
    /// A file on disk
    File(PathBuf),
}

impl Input {
    /// `None` and `-` both select standard input
    pub fn from_arg(path: Option<&Path>) -> Self {
        match path {
            None => Input::Stdin,
            Some(path) if path == Path::new("-") => Input::Stdin,
            Some(path) => Input::File(path.to_path_buf()),
        }
    }
}

#[cfg(not(tarpaulin_include))]
impl fmt::Display for Input {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Input::Stdin => write!(f, "standard input"),
            Input::File(path) => write!(f, "{}", path.display()),
        }
    }
}

/// Read exactly `size` bytes from `source` into a newly allocated buffer.
///
/// Bytes past `size` are left unread.
///
/// # Errors
///
/// * [`AllocationFailed`] if the buffer cannot be reserved
///
/// * [`Truncated`] if `source` reaches end of stream before `size` bytes
///
/// * [`Io`] if reading fails
///
/// [`AllocationFailed`]: ./enum.ErrorKind.html#variant.AllocationFailed
/// [`Truncated`]: ./enum.ErrorKind.html#variant.Truncated
/// [`Io`]: ./enum.ErrorKind.html#variant.Io
pub fn load_frame<R: Read>(source: &mut R, size: usize) -> Result<Vec<u8>, ErrorKind> {
    let mut buffer = Vec::new();
    buffer
        .try_reserve_exact(size)
        .map_err(|_| ErrorKind::AllocationFailed(size))?;

    let limit = u64::try_from(size).map_err(|_| ErrorKind::InvalidValue)?;
    source.take(limit).read_to_end(&mut buffer)?;

    if buffer.len() < size {
        return Err(ErrorKind::Truncated {
            expected: size,
            actual: buffer.len(),
        });
    }

    Ok(buffer)
}

/// An opened input, ready to be read.
#[derive(Debug)]
pub enum FrameSource {
    /// Standard input
    Stdin(io::Stdin),
    /// An opened file and its path
    File(File, PathBuf),
}

impl Input {
    /// Open the input without reading from it.
    ///
    /// # Errors
    ///
    /// * [`Open`] if the input file cannot be opened
    ///
    /// [`Open`]: ./enum.ErrorKind.html#variant.Open
    pub fn open(&self) -> Result<FrameSource, ErrorKind> {
        match self {
            Input::Stdin => Ok(FrameSource::Stdin(io::stdin())),
            Input::File(path) => File::open(path)
                .map(|file| FrameSource::File(file, path.clone()))
                .map_err(|source| ErrorKind::Open {
                    path: path.clone(),
                    source,
                }),
        }
    }
}

impl FrameSource {
    /// Read one frame of `size` bytes.
    ///
    /// Regular files are memory-mapped. Pipes, devices and standard input are streamed.
    ///
    /// # Errors
    ///
    /// * every error of [`load_frame`]
    ///
    /// [`load_frame`]: ./fn.load_frame.html
    pub fn read_frame(self, size: usize) -> Result<Vec<u8>, ErrorKind> {
        match self {
            FrameSource::Stdin(stdin) => load_frame(&mut stdin.lock(), size),
            FrameSource::File(file, path) => read_file(file, &path, size),
        }
    }
}

fn read_file(file: File, path: &Path, size: usize) -> Result<Vec<u8>, ErrorKind> {
    let metadata = file.metadata()?;

    // Zero length mappings are rejected on some platforms
    if !metadata.is_file() || metadata.len() == 0 {
        debug!(path = %path.display(), "streaming input");
        return load_frame(&mut BufReader::new(file), size);
    }

    // The mapping is private to this call and the file is only read.
    let mmap = unsafe { Mmap::map(&file)? };
    debug!(path = %path.display(), len = mmap.len(), "mapped input");

    load_frame(&mut &mmap[..], size)
}

/// Read one frame of `size` bytes from `input`.
///
/// # Errors
///
/// * [`Open`] if the input file cannot be opened
///
/// * every error of [`load_frame`]
///
/// [`Open`]: ./enum.ErrorKind.html#variant.Open
/// [`load_frame`]: ./fn.load_frame.html
pub fn load_frame_from(input: &Input, size: usize) -> Result<Vec<u8>, ErrorKind> {
    input.open()?.read_frame(size)
}
