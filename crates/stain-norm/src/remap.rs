//! Channel remapping and quantization.
//!
//! Each channel is shifted and scaled so that its mean and standard
//! deviation match a target:
//!
//! ```text
//! out = (x - source_mean) * (target_std / source_std) + target_mean
//! ```
//!
//! A channel with zero source deviation has nothing to scale and is passed
//! through unchanged. The three channels never influence each other.

use rayon::prelude::*;
use tracing::trace;

use crate::stats::ChannelStats;

/// Per-channel affine map derived from source and target statistics.
#[derive(Debug, Clone, Copy, PartialEq)]
struct ChannelMap {
    gain: [f64; 3],
    source_mean: [f64; 3],
    target_mean: [f64; 3],
    active: [bool; 3],
}

impl ChannelMap {
    fn new(source: &ChannelStats, target: &ChannelStats) -> Self {
        let mut gain = [1.0; 3];
        let mut active = [false; 3];
        for c in 0..3 {
            if !source.is_flat(c) {
                gain[c] = target.std[c] / source.std[c];
                active[c] = true;
            }
        }
        Self {
            gain,
            source_mean: source.mean,
            target_mean: target.mean,
            active,
        }
    }

    #[inline]
    fn apply(&self, channel: usize, v: f32) -> f32 {
        if !self.active[channel] {
            return v;
        }
        ((v as f64 - self.source_mean[channel]) * self.gain[channel] + self.target_mean[channel])
            as f32
    }
}

/// Remaps interleaved 3-channel samples from `source` to `target` statistics.
///
/// Results are unclamped; use [`quantize`] to bring them back to 8 bits.
pub fn remap_channels(lab: &[f32], source: &ChannelStats, target: &ChannelStats) -> Vec<f32> {
    let map = ChannelMap::new(source, target);
    trace!(gain = ?map.gain, active = ?map.active, "remap_channels");

    lab.par_iter()
        .enumerate()
        .map(|(i, &v)| map.apply(i % 3, v))
        .collect()
}

/// Clips samples to `[0, 255]` and truncates them toward zero.
///
/// Same coercion as the input side: `127.9` becomes `127`, NaN becomes 0.
pub fn quantize(values: &[f32]) -> Vec<u8> {
    values
        .par_iter()
        .map(|&v| if v.is_nan() { 0 } else { v.clamp(0.0, 255.0) as u8 })
        .collect()
}
