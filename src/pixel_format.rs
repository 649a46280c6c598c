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
use crate::config::ChannelMode;
use crate::ErrorKind;

/// Bytes per pixel of the packed rgb output
pub const RGB_DEPTH: usize = 3;

/// Memory layout of a single-buffer NV12 frame.
///
/// pixel format | subsampling | #planes | #1   | #2
/// -------------|:-----------:|:-------:|:----:|:------:
/// NV12         | 4:2:0       | 1       | y:1  | uv:1/2
///
/// Both planes share the same stride. Chroma row `r` serves luma rows `2r` and `2r + 1`,
/// and holds cb at even and cr at odd offsets for each pair of luma columns.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Nv12Layout {
    width: usize,
    height: usize,
    stride: usize,
}

impl Nv12Layout {
    pub fn new(width: usize, height: usize, stride: usize) -> Self {
        Nv12Layout {
            width,
            height,
            stride,
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn luma_size(&self) -> Option<usize> {
        self.stride.checked_mul(self.height)
    }

    /// `stride * height * 3 / 2`, rounded down
    pub fn buffer_size(&self) -> Option<usize> {
        self.luma_size()?.checked_mul(3).map(|size| size / 2)
    }

    pub fn rgb_stride(&self) -> Option<usize> {
        self.width.checked_mul(RGB_DEPTH)
    }

    pub fn rgb_size(&self) -> Option<usize> {
        self.rgb_stride()?.checked_mul(self.height)
    }

    /// Offset of the first luma sample of `row`
    ///
    /// Does not overflow for any row below `height` once [`check_bounds`] succeeded.
    ///
    /// [`check_bounds`]: #method.check_bounds
    pub fn luma_offset(&self, row: usize) -> usize {
        row * self.stride
    }

    /// Offset of the first chroma sample serving `row`
    pub fn chroma_offset(&self, row: usize) -> usize {
        self.stride * self.height + (row / 2) * self.stride
    }

    /// Offsets of the cb and cr samples of `column`, relative to the chroma row
    pub const fn chroma_columns(column: usize) -> (usize, usize) {
        (column & !1, column | 1)
    }

    fn last_luma_index(&self) -> Option<usize> {
        (self.height - 1)
            .checked_mul(self.stride)?
            .checked_add(self.width - 1)
    }

    fn last_chroma_index(&self) -> Option<usize> {
        let (_, last_cr) = Self::chroma_columns(self.width - 1);
        ((self.height - 1) / 2)
            .checked_mul(self.stride)?
            .checked_add(self.luma_size()?)?
            .checked_add(last_cr)
    }

    /// Verify that every sample the conversion will read lies inside a buffer of
    /// `len` bytes.
    ///
    /// Only the planes read by `mode` are checked. Odd widths and odd heights, or a
    /// stride narrower than the width, can place the last chroma pair past the end
    /// of the frame.
    ///
    /// Width and height must be positive.
    pub fn check_bounds(&self, mode: ChannelMode, len: usize) -> Result<(), ErrorKind> {
        let mut last_indices = [None, None];
        if mode.reads_luma() {
            last_indices[0] = Some(self.last_luma_index().ok_or(ErrorKind::InvalidValue)?);
        }

        if mode.reads_chroma() {
            last_indices[1] = Some(self.last_chroma_index().ok_or(ErrorKind::InvalidValue)?);
        }

        match last_indices.into_iter().flatten().max() {
            Some(index) if index >= len => Err(ErrorKind::OutOfBounds { index, len }),
            _ => Ok(()),
        }
    }
}
