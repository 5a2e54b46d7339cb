//! Whole-buffer color-space conversion.
//!
//! Buffers are interleaved 3-channel samples (`[R G B R G B ...]` or
//! `[L a b L a b ...]`). Every pixel is converted independently, so the
//! work is split across the rayon pool without affecting the result.
//!
//! # Example
//!
//! ```rust
//! use stain_color::convert::{to_perceptual, to_display, encode_perceptual};
//!
//! let rgb = vec![255u8, 255, 255, 0, 0, 0];
//! assert_eq!(to_perceptual(&rgb), vec![255.0, 128.0, 128.0, 0.0, 128.0, 128.0]);
//! assert_eq!(to_display(&encode_perceptual(&rgb)), rgb);
//! ```

use rayon::prelude::*;

use crate::lab::{lab8_to_rgb8, rgb8_to_lab8};

/// Converts 8-bit display RGB to 8-bit encoded Lab.
///
/// Trailing samples that do not form a whole pixel are ignored.
pub fn encode_perceptual(rgb: &[u8]) -> Vec<u8> {
    debug_assert!(rgb.len() % 3 == 0, "buffer is not 3-channel interleaved");
    let mut dst = vec![0u8; rgb.len() - rgb.len() % 3];
    dst.par_chunks_exact_mut(3)
        .zip(rgb.par_chunks_exact(3))
        .for_each(|(out, px)| {
            out.copy_from_slice(&rgb8_to_lab8([px[0], px[1], px[2]]));
        });
    dst
}

/// Converts 8-bit display RGB to perceptual samples.
///
/// The values are the 8-bit Lab encoding widened to `f32`, so they are
/// integral and lie in `[0, 255]`.
pub fn to_perceptual(rgb: &[u8]) -> Vec<f32> {
    encode_perceptual(rgb).into_par_iter().map(f32::from).collect()
}

/// Converts 8-bit encoded Lab back to 8-bit display RGB.
///
/// Trailing samples that do not form a whole pixel are ignored.
pub fn to_display(lab: &[u8]) -> Vec<u8> {
    debug_assert!(lab.len() % 3 == 0, "buffer is not 3-channel interleaved");
    let mut dst = vec![0u8; lab.len() - lab.len() % 3];
    dst.par_chunks_exact_mut(3)
        .zip(lab.par_chunks_exact(3))
        .for_each(|(out, px)| {
            out.copy_from_slice(&lab8_to_rgb8([px[0], px[1], px[2]]));
        });
    dst
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gradient(pixels: usize) -> Vec<u8> {
        (0..pixels * 3).map(|i| ((i * 37) % 256) as u8).collect()
    }

    #[test]
    fn test_perceptual_matches_per_pixel() {
        let rgb = gradient(500);
        let lab = encode_perceptual(&rgb);
        for (px, out) in rgb.chunks_exact(3).zip(lab.chunks_exact(3)) {
            assert_eq!(out, rgb8_to_lab8([px[0], px[1], px[2]]));
        }
        let floats = to_perceptual(&rgb);
        assert_eq!(floats.len(), rgb.len());
        assert!(floats.iter().zip(&lab).all(|(&f, &b)| f == b as f32));
    }

    #[test]
    fn test_display_matches_per_pixel() {
        let lab = gradient(500);
        let rgb = to_display(&lab);
        for (px, out) in lab.chunks_exact(3).zip(rgb.chunks_exact(3)) {
            assert_eq!(out, lab8_to_rgb8([px[0], px[1], px[2]]));
        }
    }

    #[test]
    fn test_double_roundtrip_idempotent() {
        let rgb = gradient(1000);
        let once = to_display(&encode_perceptual(&rgb));
        let twice = to_display(&encode_perceptual(&once));
        let thrice = to_display(&encode_perceptual(&twice));
        let max_diff = twice
            .iter()
            .zip(&thrice)
            .map(|(a, b)| a.abs_diff(*b))
            .max()
            .unwrap_or(0);
        assert!(max_diff <= 1, "max diff {}", max_diff);
    }

    #[test]
    fn test_empty_buffer() {
        assert!(encode_perceptual(&[]).is_empty());
        assert!(to_perceptual(&[]).is_empty());
        assert!(to_display(&[]).is_empty());
    }
}
