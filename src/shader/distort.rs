//! Spatial distortion functions.
//!
//! The distortion field pulls sampling coordinates toward a focal point
//! with an inverse-square falloff and twists them into a vortex close to
//! the center. It returns a new coordinate, never a color.

use super::transform::rotate;

/// Distances below this are floored to avoid the singularity at the center.
pub const MIN_DISTANCE: f32 = 0.001;

/// Swirl radius used by [`distort`].
pub const DEFAULT_SWIRL_RADIUS: f32 = 0.2;

const PULL_SCALE: f32 = 5.0e-4;
/// Pull never moves a sample more than this fraction of its distance.
const MAX_PULL_FRACTION: f32 = 0.9;
const BREATHE_AMPLITUDE: f32 = 0.1;
const BREATHE_RATE: f32 = 0.5;
const SWIRL_TWIST: f32 = 1.5;
const SWIRL_RATE: f32 = 0.25;

/// Slow sinusoidal multiplier on the pull so the field breathes over time.
#[inline]
pub fn breathe(time: f32) -> f32 {
    1.0 + BREATHE_AMPLITUDE * (time * BREATHE_RATE).sin()
}

/// Swirl weight: 1 at the center, 0 at and beyond `swirl_radius`.
///
/// Quadratic so both the value and the slope vanish at the threshold.
#[inline]
pub fn swirl_weight(d: f32, swirl_radius: f32) -> f32 {
    if swirl_radius <= 0.0 {
        return 0.0;
    }
    let w = (1.0 - d / swirl_radius).max(0.0);
    w * w
}

/// Gravitational distortion with the default swirl radius.
///
/// See [`distort_with`].
#[inline]
pub fn distort(u: f32, v: f32, cx: f32, cy: f32, strength: f32, time: f32) -> (f32, f32) {
    distort_with(u, v, cx, cy, strength, time, DEFAULT_SWIRL_RADIUS)
}

/// Gravitational distortion with a configurable swirl radius.
///
/// # Parameters
/// - `u`, `v`: Sample coordinate
/// - `cx`, `cy`: Focal point
/// - `strength`: Pull strength (0 = identity, negative pushes outward)
/// - `time`: Elapsed seconds, drives breathing and swirl growth
/// - `swirl_radius`: Distance below which the vortex is applied
///
/// # Returns
/// Warped (u, v) coordinate to resample at. With `strength == 0.0` the
/// input is returned bit-for-bit.
pub fn distort_with(
    u: f32,
    v: f32,
    cx: f32,
    cy: f32,
    strength: f32,
    time: f32,
    swirl_radius: f32,
) -> (f32, f32) {
    let dx = u - cx;
    let dy = v - cy;
    let d = (dx * dx + dy * dy).sqrt().max(MIN_DISTANCE);
    let nx = dx / d;
    let ny = dy / d;

    let limit = d * MAX_PULL_FRACTION;
    let pull = (strength * breathe(time) * PULL_SCALE / (d * d))
        .max(-limit)
        .min(limit);

    // Pulled position relative to the focal point
    let px = dx - nx * pull;
    let py = dy - ny * pull;

    let angle = strength * swirl_weight(d, swirl_radius) * (SWIRL_TWIST + time * SWIRL_RATE);
    let (rx, ry) = rotate(px, py, angle);

    (u + (rx - dx), v + (ry - dy))
}

/// Exponential falloff.
///
/// Returns a value that falls off exponentially with distance.
///
/// # Returns
/// Value in [0, 1] where 1 is at dist=0
#[inline]
pub fn falloff_exp(dist: f32, rate: f32) -> f32 {
    (-dist * rate).exp()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shader::dist;

    #[test]
    fn test_zero_strength_is_identity() {
        for j in 0..20 {
            for i in 0..20 {
                let u = i as f32 / 19.0;
                let v = j as f32 / 19.0;
                for &time in &[0.0, 1.7, 250.0] {
                    let (wu, wv) = distort(u, v, 0.4, 0.55, 0.0, time);
                    assert_eq!((wu.to_bits(), wv.to_bits()), (u.to_bits(), v.to_bits()));
                }
            }
        }
    }

    #[test]
    fn test_pull_toward_center() {
        // Outside the swirl radius only the radial pull acts
        let (wu, wv) = distort(0.8, 0.5, 0.5, 0.5, 2.0, 0.0);
        assert!(wu < 0.8, "sample should move toward the center");
        assert!((wv - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_pull_never_crosses_center() {
        for &d in &[0.0005, 0.002, 0.01, 0.05] {
            let (wu, _) = distort_with(0.5 + d, 0.5, 0.5, 0.5, 50.0, 0.0, 0.0);
            assert!(wu >= 0.5, "crossed center at d={}", d);
        }
    }

    #[test]
    fn test_center_is_finite() {
        let (wu, wv) = distort(0.5, 0.5, 0.5, 0.5, 10.0, 3.0);
        assert!(wu.is_finite() && wv.is_finite());
    }

    #[test]
    fn test_swirl_seam_continuity() {
        let radius = 0.25;
        let eps = 1e-4;
        for k in 0..16 {
            let theta = k as f32 * std::f32::consts::TAU / 16.0;
            let (c, s) = (theta.cos(), theta.sin());
            let (ri, ro) = (radius - eps, radius + eps);
            let inside = distort_with(0.5 + c * ri, 0.5 + s * ri, 0.5, 0.5, 3.0, 4.0, radius);
            let outside = distort_with(0.5 + c * ro, 0.5 + s * ro, 0.5, 0.5, 3.0, 4.0, radius);
            let jump = dist(inside.0, inside.1, outside.0, outside.1);
            assert!(jump < 1e-3, "seam at angle {}: jump {}", theta, jump);
        }
    }

    #[test]
    fn test_swirl_rotates_inside_radius() {
        // Inside the swirl radius the sample leaves the radial line
        let (_, wv) = distort_with(0.55, 0.5, 0.5, 0.5, 1.0, 0.0, 0.2);
        assert!((wv - 0.5).abs() > 1e-4);
    }

    #[test]
    fn test_swirl_weight() {
        assert_eq!(swirl_weight(0.0, 0.2), 1.0);
        assert_eq!(swirl_weight(0.2, 0.2), 0.0);
        assert_eq!(swirl_weight(0.3, 0.2), 0.0);
        assert_eq!(swirl_weight(0.1, 0.0), 0.0);
    }

    #[test]
    fn test_falloff_exp() {
        assert!((falloff_exp(0.0, 1.0) - 1.0).abs() < 1e-6);
        assert!(falloff_exp(1.0, 1.0) < 0.5);
        assert!(falloff_exp(10.0, 1.0) < 0.001);
    }
}
