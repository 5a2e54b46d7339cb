//! Error types for stain normalization.
//!
//! Normalization has exactly two failure modes visible to a pipeline:
//!
//! - [`Error::InvalidReferenceImage`] - raised while building a normalizer
//! - [`Error::UnsupportedChannelLayout`] - raised by a transform call
//!
//! [`Error::InvalidDimensions`] only guards buffer construction: an
//! [`ImageData`](crate::ImageData) that exists is always well formed.
//!
//! # Usage
//!
//! ```rust
//! use stain_core::{Error, Result};
//!
//! fn require_rgb(channels: u32) -> Result<()> {
//!     if channels != 3 {
//!         return Err(Error::unsupported_channel_layout(3, channels));
//!     }
//!     Ok(())
//! }
//!
//! assert!(require_rgb(4).unwrap_err().is_channel_layout_error());
//! ```

use thiserror::Error;

/// Result type alias using [`Error`] as the error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors surfaced by image buffers and normalization.
#[derive(Debug, Error)]
pub enum Error {
    /// The reference image cannot be coerced to a 3-channel raster.
    ///
    /// Returned at construction time only, never deferred to the first
    /// transform call. Covers undecodable data, unreadable files, empty
    /// images and channel counts that have no RGB interpretation.
    #[error("invalid reference image: {reason}")]
    InvalidReferenceImage {
        /// What made the reference unusable
        reason: String,
    },

    /// The input buffer does not have the expected channel count.
    #[error("unsupported channel layout: expected {expected} channels, got {got}")]
    UnsupportedChannelLayout {
        /// Required channel count
        expected: u32,
        /// Channel count of the rejected buffer
        got: u32,
    },

    /// Buffer length does not match its declared dimensions.
    #[error("invalid dimensions: {width}x{height} ({reason})")]
    InvalidDimensions {
        /// Declared width
        width: u32,
        /// Declared height
        height: u32,
        /// Why the dimensions were rejected
        reason: String,
    },
}

impl Error {
    /// Creates an [`Error::InvalidReferenceImage`] error.
    #[inline]
    pub fn invalid_reference(reason: impl Into<String>) -> Self {
        Self::InvalidReferenceImage {
            reason: reason.into(),
        }
    }

    /// Creates an [`Error::UnsupportedChannelLayout`] error.
    #[inline]
    pub fn unsupported_channel_layout(expected: u32, got: u32) -> Self {
        Self::UnsupportedChannelLayout { expected, got }
    }

    /// Creates an [`Error::InvalidDimensions`] error.
    #[inline]
    pub fn invalid_dimensions(width: u32, height: u32, reason: impl Into<String>) -> Self {
        Self::InvalidDimensions {
            width,
            height,
            reason: reason.into(),
        }
    }

    /// Returns `true` if this error was raised while building a reference.
    #[inline]
    pub fn is_reference_error(&self) -> bool {
        matches!(self, Self::InvalidReferenceImage { .. })
    }

    /// Returns `true` if this is a channel layout error.
    #[inline]
    pub fn is_channel_layout_error(&self) -> bool {
        matches!(self, Self::UnsupportedChannelLayout { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_reference() {
        let err = Error::invalid_reference("not an image");
        assert!(err.is_reference_error());
        assert!(!err.is_channel_layout_error());
        assert!(err.to_string().contains("not an image"));
    }

    #[test]
    fn test_channel_layout() {
        let err = Error::unsupported_channel_layout(3, 4);
        let msg = err.to_string();
        assert!(msg.contains('3'));
        assert!(msg.contains('4'));
        assert!(err.is_channel_layout_error());
    }

    #[test]
    fn test_invalid_dimensions() {
        let err = Error::invalid_dimensions(8, 8, "expected 192 samples, got 10");
        let msg = err.to_string();
        assert!(msg.contains("8x8"));
        assert!(msg.contains("192"));
    }
}
