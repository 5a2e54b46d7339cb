//! Per-channel statistics of a perceptual buffer.
//!
//! [`ChannelStats`] holds the mean and population standard deviation of
//! each of the three channels. Reference statistics can be persisted as
//! YAML or JSON and loaded back, so a normalizer can be rebuilt without the
//! reference image.
//!
//! # Example
//!
//! ```rust
//! use stain_norm::ChannelStats;
//!
//! // Two pixels: [10, 128, 128] and [30, 128, 128]
//! let stats = ChannelStats::compute(&[10.0, 128.0, 128.0, 30.0, 128.0, 128.0]);
//! assert_eq!(stats.mean, [20.0, 128.0, 128.0]);
//! assert_eq!(stats.std, [10.0, 0.0, 0.0]);
//! assert!(stats.is_flat(1));
//! ```

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Mean and standard deviation of each channel.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ChannelStats {
    /// Per-channel mean.
    pub mean: [f64; 3],
    /// Per-channel population standard deviation (divides by N).
    pub std: [f64; 3],
}

/// Failure to read or write a statistics file.
#[derive(Debug, Error)]
pub enum StatsFileError {
    /// File I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// YAML (de)serialization error.
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// JSON (de)serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl ChannelStats {
    /// Computes statistics over interleaved 3-channel samples.
    ///
    /// Two passes: means first, then squared deviations from them. A
    /// constant channel therefore yields a standard deviation of exactly
    /// zero. An empty buffer yields all-zero statistics.
    pub fn compute(samples: &[f32]) -> Self {
        let n = samples.len() / 3;
        if n == 0 {
            return Self {
                mean: [0.0; 3],
                std: [0.0; 3],
            };
        }

        let mut sum = [0.0f64; 3];
        for px in samples.chunks_exact(3) {
            for c in 0..3 {
                sum[c] += px[c] as f64;
            }
        }
        let mean = sum.map(|s| s / n as f64);

        let mut sq = [0.0f64; 3];
        for px in samples.chunks_exact(3) {
            for c in 0..3 {
                let d = px[c] as f64 - mean[c];
                sq[c] += d * d;
            }
        }
        let std = sq.map(|s| (s / n as f64).sqrt());

        Self { mean, std }
    }

    /// Returns `true` if `channel` has no spread to rescale.
    #[inline]
    pub fn is_flat(&self, channel: usize) -> bool {
        let s = self.std[channel];
        s.is_nan() || s <= 0.0
    }

    /// Returns `true` if every value is finite and no deviation is negative.
    pub fn is_valid(&self) -> bool {
        self.mean.iter().all(|m| m.is_finite())
            && self.std.iter().all(|s| s.is_finite() && *s >= 0.0)
    }

    /// Serializes to YAML.
    pub fn to_yaml(&self) -> Result<String, StatsFileError> {
        Ok(serde_yaml::to_string(self)?)
    }

    /// Parses YAML produced by [`to_yaml`](Self::to_yaml).
    pub fn from_yaml(text: &str) -> Result<Self, StatsFileError> {
        Ok(serde_yaml::from_str(text)?)
    }

    /// Serializes to pretty-printed JSON.
    pub fn to_json(&self) -> Result<String, StatsFileError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Parses JSON produced by [`to_json`](Self::to_json).
    pub fn from_json(text: &str) -> Result<Self, StatsFileError> {
        Ok(serde_json::from_str(text)?)
    }

    /// Saves to a file; `.json` selects JSON, anything else YAML.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), StatsFileError> {
        let path = path.as_ref();
        let text = if is_json(path) {
            self.to_json()?
        } else {
            self.to_yaml()?
        };
        fs::write(path, text)?;
        Ok(())
    }

    /// Loads a file written by [`save`](Self::save).
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, StatsFileError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path)?;
        if is_json(path) {
            Self::from_json(&text)
        } else {
            Self::from_yaml(&text)
        }
    }
}

fn is_json(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("json"))
}
