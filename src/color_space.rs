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

//! Fixed-point ITU-R BT.601 (full range) ycbcr to rgb transform.
//!
//! Coefficients are scaled by 2^16. Products are divided (not shifted) by the scale,
//! so the fractional part is truncated toward zero for negative chroma as well:
//! ```text
//! r = y + (91881 * cr) / 65536
//! g = y - (22572 * cb + 46802 * cr) / 65536
//! b = y + (116130 * cb) / 65536
//! ```
//! Each component is then saturated to [0, 255].

pub const FIX16: i32 = 16;
pub const FIX16_MULT: i32 = 1 << FIX16;

// Coefficient table for 601 (full range)
pub const RCR_601: i32 = 91881;
pub const GCB_601: i32 = 22572;
pub const GCR_601: i32 = 46802;
pub const BCB_601: i32 = 116130;

/// Chroma value that encodes zero color difference
pub const C_HALF: u8 = 128;

/// Luma used when only the chrominance contribution is rendered
pub const Y_NEUTRAL: u8 = 128;

/// Remove the chroma offset from a stored sample
///
/// [0, 255] maps onto [-128, 127], so the result always fits a signed byte.
#[allow(clippy::cast_possible_wrap)]
pub const fn center_chroma(sample: u8) -> i8 {
    sample.wrapping_sub(C_HALF) as i8
}

/// Saturate to the [0, 255] range
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn sat_u8(value: i32) -> u8 {
    value.clamp(0, 255) as u8
}

/// Multiply by a fixed point weight and scale back, truncating toward zero
fn fix16_mul(weight: i32, value: i32) -> i32 {
    (weight * value) / FIX16_MULT
}

/// Convert one sample from ycbcr to rgb.
///
/// `cb` and `cr` are centered chroma values (stored sample minus 128).
/// The result is `[r, g, b]`.
///
/// # Examples
/// ```
/// use nv12topnm::ycbcr_to_rgb;
///
/// assert_eq!(ycbcr_to_rgb(235, 0, 0), [235, 235, 235]);
/// assert_eq!(ycbcr_to_rgb(0, 127, 127), [178, 0, 225]);
/// ```
pub fn ycbcr_to_rgb(y: u8, cb: i8, cr: i8) -> [u8; 3] {
    let y = i32::from(y);
    let cb = i32::from(cb);
    let cr = i32::from(cr);

    let r = y + fix16_mul(RCR_601, cr);
    let g = y - (GCB_601 * cb + GCR_601 * cr) / FIX16_MULT;
    let b = y + fix16_mul(BCB_601, cb);

    [sat_u8(r), sat_u8(g), sat_u8(b)]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn neutral_chroma_is_gray() {
        for y in 0..=255_u8 {
            assert_eq!(ycbcr_to_rgb(y, 0, 0), [y, y, y]);
        }
    }

    #[test]
    fn center_chroma_range() {
        assert_eq!(center_chroma(0), -128);
        assert_eq!(center_chroma(127), -1);
        assert_eq!(center_chroma(128), 0);
        assert_eq!(center_chroma(255), 127);
    }

    #[test]
    fn truncates_toward_zero() {
        // 91881 * -1 / 65536 = -1.40..., truncated to -1 (a shift would give -2)
        assert_eq!(ycbcr_to_rgb(100, 0, -1), [99, 100, 100]);
        // 116130 * -1 / 65536 = -1.77..., truncated to -1
        assert_eq!(ycbcr_to_rgb(100, -1, 0), [100, 100, 99]);
        assert_eq!(ycbcr_to_rgb(100, 1, 1), [101, 99, 101]);
    }

    #[test]
    fn saturates() {
        assert_eq!(ycbcr_to_rgb(255, 127, 127), [255, 121, 255]);
        assert_eq!(ycbcr_to_rgb(0, -128, -128), [0, 135, 0]);
        assert_eq!(ycbcr_to_rgb(0, 127, 127), [178, 0, 225]);
        assert_eq!(ycbcr_to_rgb(255, -128, -128), [76, 255, 29]);
    }
}
