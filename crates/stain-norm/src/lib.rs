//! # stain-norm
//!
//! Reinhard stain normalization for histopathology images.
//!
//! Stain intensity and hue vary between labs, scanners and staining
//! batches. [`StainNormalization`] matches the per-channel mean and standard
//! deviation of an image, measured in CIE Lab, to those of a reference image
//! chosen as the target appearance.
//!
//! # Quick Start
//!
//! ```rust
//! use stain_core::ImageData;
//! use stain_norm::{StainNormalization, Subfunction};
//!
//! let reference = ImageData::filled_u8(8, 8, &[230, 180, 210]).unwrap();
//! let normalizer = StainNormalization::new(&reference).unwrap();
//!
//! let patch = ImageData::filled_u8(16, 16, &[200, 50, 50]).unwrap();
//! let out = normalizer.transform(&patch).unwrap();
//! assert_eq!(out.shape(), (16, 16, 3));
//!
//! // Usable wherever a generic image step is expected
//! let step: &dyn Subfunction = &normalizer;
//! assert_eq!(step.transform(&patch).unwrap(), out);
//! ```
//!
//! # Modules
//!
//! - [`reinhard`] - The normalizer itself
//! - [`stats`] - Per-channel statistics and their YAML/JSON persistence
//! - [`remap`] - Mean/deviation matching and 8-bit quantization
//! - [`subfunction`] - Common interface for image-to-image steps

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod reinhard;
pub mod remap;
pub mod stats;
pub mod subfunction;

pub use reinhard::StainNormalization;
pub use stats::{ChannelStats, StatsFileError};
pub use subfunction::{Subfunction, apply_chain};

pub use stain_core::{Error, ImageData, Result};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::{ChannelStats, StainNormalization, Subfunction};
    pub use stain_core::{Error, ImageData, PixelFormat, Result};
}
