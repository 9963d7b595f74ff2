//! Intensity adjustment functions.

/// Clamp a value to [0, 1] range.
#[inline]
pub fn clamp01(value: f32) -> f32 {
    value.clamp(0.0, 1.0)
}

/// Quantize a [0, 1] channel to an 8-bit value, clamping first.
///
/// NaN maps to 0.
#[inline]
pub fn quantize_u8(value: f32) -> u8 {
    if value.is_nan() {
        return 0;
    }
    (clamp01(value) * 255.0 + 0.5) as u8
}
