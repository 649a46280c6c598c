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
use crate::convert_image::scalar;

/// Converts one row: width, luma row, chroma row, rgb row
pub type RowConverter = fn(usize, &[u8], &[u8], &mut [u8]);

/// Select the row kernel for a channel mode and chroma order.
///
/// Swapping has no effect when chroma is not read.
pub fn get_row_converter(mode: ChannelMode, swap_chrominance: bool) -> RowConverter {
    match (mode, swap_chrominance) {
        (ChannelMode::Full, false) => scalar::nv12_full_rgb,
        (ChannelMode::Full, true) => scalar::nv12_full_swap_rgb,
        (ChannelMode::LuminanceOnly, _) => scalar::nv12_luma_rgb,
        (ChannelMode::ChrominanceOnly, false) => scalar::nv12_chroma_rgb,
        (ChannelMode::ChrominanceOnly, true) => scalar::nv12_chroma_swap_rgb,
    }
}
