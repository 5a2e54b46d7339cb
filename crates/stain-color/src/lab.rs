//! CIE L\*a\*b\* conversion (D65) and its 8-bit encoding.
//!
//! RGB primaries and white point follow sRGB. The XYZ matrices rows sum to
//! the white point, so neutral grays land exactly on `a* = b* = 0`.
//!
//! # Formula
//!
//! ```text
//! f(t) = t^(1/3)              if t > 0.008856
//!        7.787 * t + 16/116   otherwise
//!
//! L* = 116 * f(Y) - 16        if Y > 0.008856
//!      903.3 * Y              otherwise
//! a* = 500 * (f(X/Xn) - f(Y))
//! b* = 200 * (f(Y) - f(Z/Zn))
//! ```
//!
//! # Example
//!
//! ```rust
//! use stain_color::lab::{lab8_to_rgb8, rgb8_to_lab8};
//!
//! let lab = rgb8_to_lab8([200, 50, 50]);
//! assert_eq!(lab, [116, 186, 164]);
//! let back = lab8_to_rgb8(lab);
//! assert!(back.iter().zip([200u8, 50, 50]).all(|(&a, b)| a.abs_diff(b) <= 1));
//! ```

use crate::srgb;

/// D65 reference white, X component (Y is 1).
pub const WHITE_X: f32 = 0.950456;
/// D65 reference white, Z component (Y is 1).
pub const WHITE_Z: f32 = 1.088754;

/// Linear sRGB to XYZ (D65).
pub const RGB_TO_XYZ: [[f32; 3]; 3] = [
    [0.412453, 0.357580, 0.180423],
    [0.212671, 0.715160, 0.072169],
    [0.019334, 0.119193, 0.950227],
];

/// XYZ (D65) to linear sRGB.
pub const XYZ_TO_RGB: [[f32; 3]; 3] = [
    [3.240479, -1.537150, -0.498535],
    [-0.969256, 1.875991, 0.041556],
    [0.055648, -0.204043, 1.057311],
];

const EPSILON: f32 = 0.008856;
const KAPPA: f32 = 903.3;
const SLOPE: f32 = 7.787;
const OFFSET: f32 = 16.0 / 116.0;
// f(EPSILON); boundary of the cubic segment on the inverse side.
const F_EPSILON: f32 = 0.206893;

/// Offset applied to a\* and b\* in the 8-bit encoding.
pub const CHROMA_OFFSET: f32 = 128.0;
/// Scale from L\* in [0, 100] to the 8-bit encoding.
pub const LIGHTNESS_SCALE: f32 = 255.0 / 100.0;

#[inline]
fn f(t: f32) -> f32 {
    if t > EPSILON {
        t.cbrt()
    } else {
        SLOPE * t + OFFSET
    }
}

#[inline]
fn f_inv(t: f32) -> f32 {
    if t > F_EPSILON {
        t * t * t
    } else {
        (t - OFFSET) / SLOPE
    }
}

#[inline]
fn mul(m: &[[f32; 3]; 3], v: [f32; 3]) -> [f32; 3] {
    [
        m[0][0] * v[0] + m[0][1] * v[1] + m[0][2] * v[2],
        m[1][0] * v[0] + m[1][1] * v[1] + m[1][2] * v[2],
        m[2][0] * v[0] + m[2][1] * v[1] + m[2][2] * v[2],
    ]
}

/// Converts linear RGB to CIE L\*a\*b\*.
///
/// Returns `[L*, a*, b*]` with L\* in [0, 100].
pub fn linear_rgb_to_lab(rgb: [f32; 3]) -> [f32; 3] {
    let [x, y, z] = mul(&RGB_TO_XYZ, rgb);
    let fx = f(x / WHITE_X);
    let fy = f(y);
    let fz = f(z / WHITE_Z);

    let l = if y > EPSILON { 116.0 * fy - 16.0 } else { KAPPA * y };
    [l, 500.0 * (fx - fy), 200.0 * (fy - fz)]
}

/// Converts CIE L\*a\*b\* to linear RGB.
///
/// The result is not clamped; out-of-gamut colors produce values outside
/// [0, 1].
pub fn lab_to_linear_rgb(lab: [f32; 3]) -> [f32; 3] {
    let [l, a, b] = lab;
    let (y, fy) = if l <= 8.0 {
        let y = l / KAPPA;
        (y, SLOPE * y + OFFSET)
    } else {
        let fy = (l + 16.0) / 116.0;
        (fy * fy * fy, fy)
    };
    let fx = a / 500.0 + fy;
    let fz = fy - b / 200.0;

    let xyz = [f_inv(fx) * WHITE_X, y, f_inv(fz) * WHITE_Z];
    mul(&XYZ_TO_RGB, xyz)
}

#[inline]
fn saturate(v: f32) -> u8 {
    v.round().clamp(0.0, 255.0) as u8
}

/// Quantizes `[L*, a*, b*]` to the 8-bit encoding.
#[inline]
pub fn encode_lab8(lab: [f32; 3]) -> [u8; 3] {
    [
        saturate(lab[0] * LIGHTNESS_SCALE),
        saturate(lab[1] + CHROMA_OFFSET),
        saturate(lab[2] + CHROMA_OFFSET),
    ]
}

/// Expands the 8-bit encoding back to `[L*, a*, b*]`.
#[inline]
pub fn decode_lab8(lab: [u8; 3]) -> [f32; 3] {
    [
        lab[0] as f32 / LIGHTNESS_SCALE,
        lab[1] as f32 - CHROMA_OFFSET,
        lab[2] as f32 - CHROMA_OFFSET,
    ]
}

/// Converts an 8-bit sRGB pixel to 8-bit encoded Lab.
#[inline]
pub fn rgb8_to_lab8(rgb: [u8; 3]) -> [u8; 3] {
    let linear = [
        srgb::decode_u8(rgb[0]),
        srgb::decode_u8(rgb[1]),
        srgb::decode_u8(rgb[2]),
    ];
    encode_lab8(linear_rgb_to_lab(linear))
}

/// Converts an 8-bit encoded Lab pixel to 8-bit sRGB.
///
/// Out-of-gamut results are clamped per channel before encoding.
#[inline]
pub fn lab8_to_rgb8(lab: [u8; 3]) -> [u8; 3] {
    let [r, g, b] = lab_to_linear_rgb(decode_lab8(lab));
    [srgb::encode_u8(r), srgb::encode_u8(g), srgb::encode_u8(b)]
}
