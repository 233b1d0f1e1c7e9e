//! Analog axis quantization between `[-1.0, 1.0]` and a single wire byte.
//!
//! The mapping is `round((axis + 1) * 127.5)`, with an exact `0.0` pinned to
//! [`AXIS_NEUTRAL`] so a centred stick always encodes identically no matter
//! which way the rounding would otherwise go. The ends map to `0` and `255`.

/// Wire value of a centred axis.
pub const AXIS_NEUTRAL: u8 = 127;

/// Scale between the unit interval width and the byte range.
const AXIS_SCALE: f32 = 127.5;

/// Encoding scales in double precision. In `f32` the product moves near-tie
/// readings, and small negative ones, up by a byte.
const AXIS_SCALE_WIDE: f64 = 127.5;

/// Quantize an axis reading for the primary packet format.
///
/// Readings outside `[-1.0, 1.0]` are clamped and NaN encodes as neutral.
/// Ties round up, matching `Math.round` on the sending side of existing
/// receivers.
///
/// ```
/// use keylink_proto::axis::encode_axis;
///
/// assert_eq!(encode_axis(-1.0), 0);
/// assert_eq!(encode_axis(0.0), 127);
/// assert_eq!(encode_axis(1.0), 255);
/// ```
#[inline]
#[must_use]
pub fn encode_axis(axis: f32) -> u8 {
    match scaled(axis) {
        // Non-negative after clamping, so truncating `x + 0.5` rounds half up.
        Some(x) => (x + 0.5) as u8,
        None => AXIS_NEUTRAL,
    }
}

/// Quantize an axis reading for the legacy fixed-width format, which
/// truncates instead of rounding.
#[inline]
#[must_use]
pub fn encode_axis_truncated(axis: f32) -> u8 {
    match scaled(axis) {
        Some(x) => x as u8,
        None => AXIS_NEUTRAL,
    }
}

/// Recover an axis reading from its wire byte.
///
/// The result is within `1/255` of the reading that produced the byte. The
/// byte range has no exact centre, so [`AXIS_NEUTRAL`] decodes to `-1/255`;
/// receivers that need a hard zero should compare the byte against
/// [`AXIS_NEUTRAL`] instead.
#[inline]
#[must_use]
pub fn decode_axis(byte: u8) -> f32 {
    f32::from(byte) / AXIS_SCALE - 1.0
}

/// `(axis + 1) * 127.5` clamped to `[0, 255]`, or `None` for neutral/NaN.
#[inline]
fn scaled(axis: f32) -> Option<f64> {
    if axis == 0.0 || axis.is_nan() {
        return None;
    }
    Some((f64::from(axis.clamp(-1.0, 1.0)) + 1.0) * AXIS_SCALE_WIDE)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoints_and_neutral() {
        assert_eq!(encode_axis(-1.0), 0);
        assert_eq!(encode_axis(0.0), AXIS_NEUTRAL);
        assert_eq!(encode_axis(-0.0), AXIS_NEUTRAL);
        assert_eq!(encode_axis(1.0), 255);
    }

    #[test]
    fn test_rounds_to_nearest() {
        // 0.5 -> 191.25
        assert_eq!(encode_axis(0.5), 191);
        // -0.5 -> 63.75
        assert_eq!(encode_axis(-0.5), 64);
        // Tiny non-zero readings are not pinned, they round to 128.
        assert_eq!(encode_axis(0.001), 128);
        assert_eq!(encode_axis(-0.001), 127);
    }

    #[test]
    fn test_small_negative_stays_neutral() {
        assert_eq!(encode_axis(-1e-8), 127);
        assert_eq!(encode_axis_truncated(-1e-8), 127);
    }

    #[test]
    fn test_near_tie_rounds_in_double_precision() {
        // Just below the 0/1 boundary at 1/255 - 1.
        assert_eq!(encode_axis(-0.996_078_43), 0);
        assert_eq!(encode_axis(-0.996_078_4), 1);
    }

    #[test]
    fn test_out_of_range_is_clamped() {
        assert_eq!(encode_axis(1.5), 255);
        assert_eq!(encode_axis(-7.0), 0);
        assert_eq!(encode_axis(f32::INFINITY), 255);
        assert_eq!(encode_axis(f32::NEG_INFINITY), 0);
        assert_eq!(encode_axis(f32::NAN), AXIS_NEUTRAL);
    }

    #[test]
    fn test_truncated_variant() {
        assert_eq!(encode_axis_truncated(0.0), AXIS_NEUTRAL);
        assert_eq!(encode_axis_truncated(-0.5), 63);
        assert_eq!(encode_axis_truncated(0.5), 191);
        assert_eq!(encode_axis_truncated(1.0), 255);
        assert_eq!(encode_axis_truncated(-1.0), 0);
    }

    #[test]
    fn test_decode_endpoints() {
        assert_eq!(decode_axis(0), -1.0);
        assert_eq!(decode_axis(255), 1.0);
        let centre = decode_axis(AXIS_NEUTRAL);
        assert!(centre < 0.0 && centre > -1.0 / 255.0 - 1e-6);
    }

    #[test]
    fn test_quantization_error_bound() {
        let mut axis = -1.0f32;
        while axis <= 1.0 {
            let byte = encode_axis(axis);
            let back = f64::from(byte) / 127.5 - 1.0;
            let error = (back - f64::from(axis)).abs();
            assert!(error <= 1.0 / 255.0, "axis {axis} encoded as {byte}");
            axis += 0.001;
        }
    }
}
