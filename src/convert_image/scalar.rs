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

use crate::color_space::{center_chroma, ycbcr_to_rgb, Y_NEUTRAL};
use crate::config::ChannelMode;
use crate::pixel_format::{Nv12Layout, RGB_DEPTH};
use paste::paste;

/// Deinterleave the cb, cr pair serving `column`
fn unpack_cbcr(uv_row: &[u8], column: usize) -> (i8, i8) {
    let (cb, cr) = Nv12Layout::chroma_columns(column);
    (center_chroma(uv_row[cb]), center_chroma(uv_row[cr]))
}

/// Convert one output row.
///
/// `y_row` starts at the first luma sample of the row and `uv_row` at the first chroma
/// sample serving it. A plane that `mode` does not read may be empty.
#[inline(always)]
fn nv12_to_rgb_row(
    width: usize,
    y_row: &[u8],
    uv_row: &[u8],
    rgb_row: &mut [u8],
    mode: ChannelMode,
    swap: bool,
) {
    for (column, rgb) in rgb_row
        .chunks_exact_mut(RGB_DEPTH)
        .take(width)
        .enumerate()
    {
        let y = if mode.reads_luma() {
            y_row[column]
        } else {
            Y_NEUTRAL
        };

        let (cb, cr) = if mode.reads_chroma() {
            let (cb, cr) = unpack_cbcr(uv_row, column);
            if swap {
                (cr, cb)
            } else {
                (cb, cr)
            }
        } else {
            (0, 0)
        };

        rgb.copy_from_slice(&ycbcr_to_rgb(y, cb, cr));
    }
}

macro_rules! row_converter {
    ($name:ident, $mode:ident, $swap:expr) => {
        paste! {
            pub fn [<nv12_ $name _rgb>](width: usize, y_row: &[u8], uv_row: &[u8], rgb_row: &mut [u8]) {
                nv12_to_rgb_row(width, y_row, uv_row, rgb_row, ChannelMode::$mode, $swap);
            }
        }
    };
}

row_converter!(full, Full, false);
row_converter!(full_swap, Full, true);
row_converter!(luma, LuminanceOnly, false);
row_converter!(chroma, ChrominanceOnly, false);
row_converter!(chroma_swap, ChrominanceOnly, true);
