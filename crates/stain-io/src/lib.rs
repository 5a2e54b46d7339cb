//! # stain-io
//!
//! Raster image I/O for stain normalization, built on the `image` crate.
//!
//! Any container the `image` crate decodes (PNG, JPEG, TIFF, BMP, WebP) is
//! accepted. Decoded images are delivered as 8-bit [`ImageData`]:
//!
//! | Source | Channels |
//! |--------|----------|
//! | Gray, RGB | 3 (gray replicated) |
//! | Gray + alpha, RGBA | 4 (gray replicated) |
//!
//! Higher bit depths are scaled down to 8 bits by the decoder.
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use stain_io::{read, write};
//!
//! let image = read("slide_patch.png")?;
//! write("copy.tiff", &image)?;
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

mod error;

pub use error::{IoError, IoResult};

use std::path::Path;

use image::{DynamicImage, ImageFormat, ImageReader};
use stain_core::ImageData;
use tracing::trace;

/// Reads an image from a file.
///
/// The container is detected from the file content, falling back to the
/// extension.
///
/// # Errors
///
/// Returns an error if the file cannot be opened or decoded.
pub fn read<P: AsRef<Path>>(path: P) -> IoResult<ImageData> {
    let path = path.as_ref();
    trace!(path = %path.display(), "stain_io::read");

    let img = ImageReader::open(path)?
        .with_guessed_format()?
        .decode()
        .map_err(|e| IoError::DecodeError(e.to_string()))?;

    dynamic_to_image_data(img)
}

/// Decodes an in-memory encoded image (PNG, JPEG, ... bytes).
///
/// # Errors
///
/// Returns [`IoError::DecodeError`] if the bytes are not a recognised image.
pub fn decode(bytes: &[u8]) -> IoResult<ImageData> {
    let img = image::load_from_memory(bytes).map_err(|e| IoError::DecodeError(e.to_string()))?;
    dynamic_to_image_data(img)
}

/// Writes an image, choosing the container from the file extension.
///
/// Samples are clipped to 8 bits first. 1-4 channel images are supported.
///
/// # Errors
///
/// Returns an error if the extension is unknown, the layout cannot be
/// encoded, or the file cannot be written.
pub fn write<P: AsRef<Path>>(path: P, image: &ImageData) -> IoResult<()> {
    let path = path.as_ref();
    trace!(path = %path.display(), shape = ?image.shape(), "stain_io::write");

    let format = ImageFormat::from_path(path).map_err(|_| {
        IoError::UnsupportedFormat(
            path.extension()
                .and_then(|e| e.to_str())
                .unwrap_or("unknown")
                .to_string(),
        )
    })?;

    let dyn_img = image_data_to_dynamic(image)?;
    dyn_img
        .save_with_format(path, format)
        .map_err(|e| IoError::EncodeError(e.to_string()))
}

/// Returns `true` if the path ends in an extension the encoder recognises.
pub fn is_image_path<P: AsRef<Path>>(path: P) -> bool {
    ImageFormat::from_path(path.as_ref()).is_ok()
}

/// Converts a decoded image to an 8-bit RGB or RGBA [`ImageData`].
pub fn dynamic_to_image_data(img: DynamicImage) -> IoResult<ImageData> {
    let (width, height) = (img.width(), img.height());
    let image = if img.color().has_alpha() {
        ImageData::from_u8(width, height, 4, img.into_rgba8().into_raw())?
    } else {
        ImageData::from_u8(width, height, 3, img.into_rgb8().into_raw())?
    };
    Ok(image)
}

/// Converts an [`ImageData`] to a `DynamicImage` for encoding.
pub fn image_data_to_dynamic(image: &ImageData) -> IoResult<DynamicImage> {
    let (width, height) = (image.width(), image.height());
    let data = image.to_u8_clipped();
    let layout_err = || IoError::UnsupportedLayout(image.channels());

    let dyn_img = match image.channels() {
        1 => DynamicImage::ImageLuma8(
            image::GrayImage::from_raw(width, height, data).ok_or_else(layout_err)?,
        ),
        2 => DynamicImage::ImageLumaA8(
            image::GrayAlphaImage::from_raw(width, height, data).ok_or_else(layout_err)?,
        ),
        3 => DynamicImage::ImageRgb8(
            image::RgbImage::from_raw(width, height, data).ok_or_else(layout_err)?,
        ),
        4 => DynamicImage::ImageRgba8(
            image::RgbaImage::from_raw(width, height, data).ok_or_else(layout_err)?,
        ),
        _ => return Err(layout_err()),
    };
    Ok(dyn_img)
}
