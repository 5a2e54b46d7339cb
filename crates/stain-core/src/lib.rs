//! # stain-core
//!
//! Core types shared by every crate of the stain normalization workspace.
//!
//! - [`ImageData`] - Row-major, channel-interleaved pixel buffer of any numeric type
//! - [`PixelData`], [`PixelFormat`] - Typed sample storage
//! - [`Error`], [`Result`] - The error kinds surfaced by normalization
//!
//! ## Crate Structure
//!
//! ```text
//! stain-core (this crate)
//!    ^
//!    |
//!    +-- stain-color (sRGB / CIE Lab conversion)
//!    +-- stain-io (decode / encode through the image crate)
//!    +-- stain-norm (Reinhard transfer)
//! ```
//!
//! ## Indexing
//!
//! Samples are addressed as (row, column, channel):
//!
//! ```rust
//! use stain_core::ImageData;
//!
//! let img = ImageData::filled_u8(4, 2, &[200, 50, 50]).unwrap();
//! assert_eq!(img.shape(), (2, 4, 3));
//! assert_eq!(img.pixel_u8(3, 1), Some([200, 50, 50]));
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod error;
pub mod image;

pub use error::{Error, Result};
pub use image::{ImageData, PixelData, PixelFormat};

/// Number of channels in the display color space (R, G, B).
pub const RGB_CHANNELS: u32 = 3;

/// Prelude module for convenient imports.
///
/// ```
/// use stain_core::prelude::*;
/// ```
pub mod prelude {
    pub use crate::error::{Error, Result};
    pub use crate::image::{ImageData, PixelData, PixelFormat};
    pub use crate::RGB_CHANNELS;
}
