//! sRGB decoding and encoding of 8-bit code values.
//!
//! Conversion to Lab needs linear light, so every 8-bit sample is decoded
//! through the IEC 61966-2-1 curve. Only 256 inputs exist, so decoding is a
//! table lookup; encoding goes through the curve and rounds back to a code.

use std::sync::OnceLock;

/// Largest encoded value on the linear toe.
const ENCODED_KNEE: f32 = 0.04045;
/// Largest linear value on the linear toe (`ENCODED_KNEE / TOE_SLOPE`).
const LINEAR_KNEE: f32 = 0.0031308;
const TOE_SLOPE: f32 = 12.92;
const GAMMA: f32 = 2.4;
const ALPHA: f32 = 0.055;
const SCALE: f32 = 1.055;

/// Encoded `[0, 1]` to linear light.
#[inline]
pub fn eotf(v: f32) -> f32 {
    match v {
        v if v <= ENCODED_KNEE => v / TOE_SLOPE,
        v => ((v + ALPHA) / SCALE).powf(GAMMA),
    }
}

/// Linear light to encoded `[0, 1]`; inverse of [`eotf`].
#[inline]
pub fn oetf(l: f32) -> f32 {
    match l {
        l if l <= LINEAR_KNEE => l * TOE_SLOPE,
        l => SCALE * l.powf(1.0 / GAMMA) - ALPHA,
    }
}

/// Linear light of an 8-bit code value.
#[inline]
pub fn decode_u8(v: u8) -> f32 {
    static TABLE: OnceLock<[f32; 256]> = OnceLock::new();
    let table = TABLE.get_or_init(|| std::array::from_fn(|i| eotf(i as f32 / 255.0)));
    table[v as usize]
}

/// 8-bit code value of a linear intensity.
///
/// Out-of-range input saturates at 0 or 255.
#[inline]
pub fn encode_u8(l: f32) -> u8 {
    let v = oetf(l.clamp(0.0, 1.0)) * 255.0;
    v.round().clamp(0.0, 255.0) as u8
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_every_code_survives_decode_encode() {
        for v in 0..=255u8 {
            assert_eq!(encode_u8(decode_u8(v)), v);
        }
    }

    #[test]
    fn test_table_is_strictly_increasing() {
        for v in 1..=255u8 {
            assert!(decode_u8(v) > decode_u8(v - 1), "code {}", v);
        }
        assert_eq!(decode_u8(0), 0.0);
        assert_abs_diff_eq!(decode_u8(255), 1.0, epsilon = 1e-6);
    }

    #[test]
    fn test_segments_meet_at_knee() {
        let below = ENCODED_KNEE / TOE_SLOPE;
        let above = ((ENCODED_KNEE + ALPHA) / SCALE).powf(GAMMA);
        assert_abs_diff_eq!(below, above, epsilon = 1e-6);
        assert_abs_diff_eq!(oetf(LINEAR_KNEE), ENCODED_KNEE, epsilon = 1e-5);
    }

    #[test]
    fn test_known_codes() {
        // Code 10 sits on the linear toe, 128 on the power segment
        assert_abs_diff_eq!(decode_u8(10), 10.0 / 255.0 / 12.92, epsilon = 1e-7);
        assert_abs_diff_eq!(decode_u8(128), 0.2158605, epsilon = 1e-5);
    }

    #[test]
    fn test_encode_saturates() {
        assert_eq!(encode_u8(-0.5), 0);
        assert_eq!(encode_u8(3.0), 255);
        assert_eq!(encode_u8(f32::MIN_POSITIVE), 0);
    }
}
