//! # stain-color
//!
//! Color-space conversion between 8-bit display RGB and a perceptually
//! uniform lightness/chrominance space (CIE L\*a\*b\*, D65).
//!
//! - [`srgb`] - sRGB transfer functions
//! - [`lab`] - CIE L\*a\*b\* math and its 8-bit encoding
//! - [`convert`] - Whole-buffer conversion, parallel per pixel
//!
//! # 8-bit Lab Encoding
//!
//! Perceptual samples are stored on the same 0-255 scale as display samples:
//!
//! | Channel | Encoded value |
//! |---------|---------------|
//! | L | `L* * 255 / 100` |
//! | a | `a* + 128` |
//! | b | `b* + 128` |
//!
//! Each is rounded to nearest and saturated to `[0, 255]`.
//!
//! # Example
//!
//! ```rust
//! use stain_color::convert::{encode_perceptual, to_display};
//!
//! let rgb = [128u8, 128, 128];
//! let lab = encode_perceptual(&rgb);
//! assert_eq!(lab, vec![137, 128, 128]);
//! assert_eq!(to_display(&lab), rgb.to_vec());
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod convert;
pub mod lab;
pub mod srgb;

pub use convert::{encode_perceptual, to_display, to_perceptual};
pub use lab::{lab8_to_rgb8, rgb8_to_lab8};
