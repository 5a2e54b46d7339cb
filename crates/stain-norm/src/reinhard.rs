//! Reinhard stain normalization.
//!
//! The reference image is reduced once to [`ChannelStats`] in the 8-bit Lab
//! encoding. Each transformed image is converted to the same space, its own
//! statistics are remapped onto the reference ones, and the result is
//! converted back to 8-bit RGB.
//!
//! # Pipeline
//!
//! ```text
//! input ──clip/truncate──> RGB u8 ──encode──> Lab f32 ──stats──> source
//!                                                 │
//!                         remap(source → reference)
//!                                                 │
//! output <──decode── Lab u8 <──clip/truncate──────┘
//! ```
//!
//! # Example
//!
//! ```rust
//! use stain_core::ImageData;
//! use stain_norm::StainNormalization;
//!
//! let reference = ImageData::filled_u8(4, 4, &[128, 128, 128]).unwrap();
//! let normalizer = StainNormalization::new(&reference).unwrap();
//!
//! let patch = ImageData::filled_u8(4, 4, &[128, 128, 128]).unwrap();
//! let out = normalizer.transform(&patch).unwrap();
//! assert_eq!(out.pixel_u8(0, 0), Some([128, 128, 128]));
//! ```

use std::path::Path;

use stain_color::convert::{to_display, to_perceptual};
use stain_core::{Error, ImageData, RGB_CHANNELS, Result};
use tracing::{debug, trace};

use crate::remap::{quantize, remap_channels};
use crate::stats::ChannelStats;

/// Normalizes images to the color statistics of a reference image.
///
/// Construction is the only expensive step; afterwards the value is
/// immutable, so one instance can be shared across threads and applied to
/// any number of images.
#[derive(Debug, Clone, PartialEq)]
pub struct StainNormalization {
    reference: ChannelStats,
}

impl StainNormalization {
    /// Builds a normalizer from a decoded reference image.
    ///
    /// Gray and gray+alpha references are expanded to RGB; an alpha channel
    /// is dropped.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidReferenceImage`] if the image has no pixels or a
    /// channel layout that cannot be read as RGB.
    pub fn new(reference: &ImageData) -> Result<Self> {
        if reference.is_empty() {
            return Err(Error::invalid_reference(format!(
                "reference has no pixels ({}x{})",
                reference.width(),
                reference.height()
            )));
        }
        let rgb = reference.to_rgb_u8().ok_or_else(|| {
            Error::invalid_reference(format!(
                "cannot read {} channels as RGB",
                reference.channels()
            ))
        })?;

        let stats = ChannelStats::compute(&to_perceptual(&rgb));
        debug!(
            width = reference.width(),
            height = reference.height(),
            mean = ?stats.mean,
            std = ?stats.std,
            "reference statistics"
        );
        Ok(Self { reference: stats })
    }

    /// Builds a normalizer from an encoded reference image (PNG, JPEG, ...).
    ///
    /// # Errors
    ///
    /// [`Error::InvalidReferenceImage`] if the bytes cannot be decoded.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let image = stain_io::decode(bytes).map_err(|e| Error::invalid_reference(e.to_string()))?;
        Self::new(&image)
    }

    /// Builds a normalizer from a reference image file.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidReferenceImage`] if the file cannot be read or decoded.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let image = stain_io::read(path)
            .map_err(|e| Error::invalid_reference(format!("{}: {}", path.display(), e)))?;
        Self::new(&image)
    }

    /// Builds a normalizer from previously computed reference statistics.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidReferenceImage`] if a value is not finite or a
    /// deviation is negative.
    pub fn from_stats(stats: ChannelStats) -> Result<Self> {
        if !stats.is_valid() {
            return Err(Error::invalid_reference(format!(
                "invalid statistics: mean {:?}, std {:?}",
                stats.mean, stats.std
            )));
        }
        Ok(Self { reference: stats })
    }

    /// Reference statistics in the 8-bit Lab encoding.
    pub fn reference_stats(&self) -> &ChannelStats {
        &self.reference
    }

    /// Normalizes one RGB image.
    ///
    /// Samples of any numeric format are clipped to `[0, 255]` and
    /// truncated to 8 bits first. The output has the input's width and
    /// height, 3 channels and `u8` samples.
    ///
    /// # Errors
    ///
    /// [`Error::UnsupportedChannelLayout`] unless the image has exactly
    /// 3 channels.
    pub fn transform(&self, image: &ImageData) -> Result<ImageData> {
        if image.channels() != RGB_CHANNELS {
            return Err(Error::unsupported_channel_layout(
                RGB_CHANNELS,
                image.channels(),
            ));
        }
        let (width, height) = (image.width(), image.height());
        trace!(width, height, format = ?image.format(), "StainNormalization::transform");

        let rgb = image.to_u8_clipped();
        let lab = to_perceptual(&rgb);
        let source = ChannelStats::compute(&lab);
        trace!(mean = ?source.mean, std = ?source.std, "source statistics");

        let lab8 = quantize(&remap_channels(&lab, &source, &self.reference));
        ImageData::from_u8(width, height, RGB_CHANNELS, to_display(&lab8))
    }
}
