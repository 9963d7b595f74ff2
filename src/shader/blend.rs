//! Blending and interpolation functions.

/// Linear interpolation between two values.
///
/// Returns `a` when `t=0`, `b` when `t=1`, and linear blend in between.
#[inline]
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

/// Smoothstep interpolation.
///
/// Hermite interpolation that is smooth at the endpoints.
/// Returns 0 when x <= edge0, 1 when x >= edge1, and smooth curve in between.
/// Callers keep `edge0 < edge1`; equal edges divide by zero.
#[inline]
pub fn smoothstep(edge0: f32, edge1: f32, x: f32) -> f32 {
    let t = ((x - edge0) / (edge1 - edge0)).clamp(0.0, 1.0);
    t * t * (3.0 - 2.0 * t)
}

/// Hard threshold: 0 below `edge`, 1 at or above.
#[inline]
pub fn step(edge: f32, x: f32) -> f32 {
    if x >= edge { 1.0 } else { 0.0 }
}

/// Gaussian band centered on `center` with standard width `width`.
///
/// Peaks at 1 when `x == center`.
#[inline]
pub fn band(x: f32, center: f32, width: f32) -> f32 {
    let t = (x - center) / width;
    (-t * t).exp()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lerp() {
        assert!((lerp(0.0, 10.0, 0.0) - 0.0).abs() < 1e-6);
        assert!((lerp(0.0, 10.0, 1.0) - 10.0).abs() < 1e-6);
        assert!((lerp(0.0, 10.0, 0.5) - 5.0).abs() < 1e-6);
    }

    #[test]
    fn test_smoothstep() {
        assert!((smoothstep(0.0, 1.0, -0.5) - 0.0).abs() < 1e-6);
        assert!((smoothstep(0.0, 1.0, 1.5) - 1.0).abs() < 1e-6);
        assert!((smoothstep(0.0, 1.0, 0.5) - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_step() {
        assert_eq!(step(0.98, 0.97), 0.0);
        assert_eq!(step(0.98, 0.98), 1.0);
        assert_eq!(step(0.98, 0.99), 1.0);
    }

    #[test]
    fn test_band() {
        assert!((band(0.3, 0.3, 0.01) - 1.0).abs() < 1e-6);
        assert!(band(0.35, 0.3, 0.01) < 1e-6);
        // Offsets exactly representable in f32, so both sides round alike
        assert_eq!(band(0.25, 0.5, 0.25), band(0.75, 0.5, 0.25));
        assert!((band(0.29, 0.3, 0.01) - band(0.31, 0.3, 0.01)).abs() < 1e-5);
    }
}
