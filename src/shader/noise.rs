//! Hash and noise functions for procedural generation.
//!
//! All functions are pure: identical input always yields identical output,
//! which keeps frames reproducible and lets tests compare exact values.

/// Largest f32 strictly below 1.0.
const BELOW_ONE: f32 = 1.0 - f32::EPSILON / 2.0;

/// Persistence used by [`fractal_noise`].
pub const PERSISTENCE: f32 = 0.6;

/// Sine-based 2D hash.
///
/// Returns a pseudo-random value in [0, 1). Neither the value nor its
/// derivative is continuous; use [`value_noise`] for smooth variation.
#[inline]
pub fn hash(x: f32, y: f32) -> f32 {
    let h = (x * 127.1 + y * 311.7).sin() * 43758.5453;
    // h - floor(h) rounds up to exactly 1.0 for tiny negative h
    (h - h.floor()).min(BELOW_ONE)
}

/// Cubic easing `3t² - 2t³` applied to lattice fractions.
#[inline]
fn ease(t: f32) -> f32 {
    t * t * (3.0 - 2.0 * t)
}

/// 2D value noise with smooth interpolation.
///
/// Returns a value in [0, 1] that varies smoothly across the plane.
/// Corners are hashed at the integer lattice and blended bilinearly with
/// an eased fraction, so the result is C¹ across cell boundaries.
pub fn value_noise(x: f32, y: f32) -> f32 {
    let xi = x.floor();
    let yi = y.floor();
    let u = ease(x - xi);
    let v = ease(y - yi);

    let n00 = hash(xi, yi);
    let n10 = hash(xi + 1.0, yi);
    let n01 = hash(xi, yi + 1.0);
    let n11 = hash(xi + 1.0, yi + 1.0);

    let nx0 = n00 * (1.0 - u) + n10 * u;
    let nx1 = n01 * (1.0 - u) + n11 * u;
    nx0 * (1.0 - v) + nx1 * v
}

/// Fractal noise: layered value noise with decreasing amplitude.
///
/// Octaves are summed from low to high frequency. The first octave has
/// amplitude 0.5; each subsequent octave doubles the frequency and scales
/// the amplitude by [`PERSISTENCE`]. The sum is not renormalized, so the
/// range grows slightly with the octave count (always below 1.25).
pub fn fractal_noise(x: f32, y: f32, octaves: u32) -> f32 {
    let mut value = 0.0;
    let mut amplitude = 0.5;
    let mut frequency = 1.0;

    for _ in 0..octaves {
        value += value_noise(x * frequency, y * frequency) * amplitude;
        amplitude *= PERSISTENCE;
        frequency *= 2.0;
    }

    value
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_deterministic() {
        assert_eq!(hash(4.2, 1.3).to_bits(), hash(4.2, 1.3).to_bits());
        assert_ne!(hash(4.2, 1.3), hash(4.3, 1.3));
    }

    #[test]
    fn test_hash_range() {
        for y in -100..100 {
            for x in -100..100 {
                let v = hash(x as f32 * 0.37, y as f32 * 1.91);
                assert!((0.0..1.0).contains(&v), "hash out of range: {}", v);
            }
        }
    }

    #[test]
    fn test_value_noise_range() {
        for y in 0..100 {
            for x in 0..100 {
                let v = value_noise(x as f32 * 0.13, y as f32 * 0.13);
                assert!((0.0..=1.0).contains(&v), "value_noise out of range: {}", v);
            }
        }
    }

    #[test]
    fn test_value_noise_matches_lattice() {
        // At integer points the easing weights collapse onto one corner
        assert_eq!(value_noise(3.0, 7.0), hash(3.0, 7.0));
    }

    #[test]
    fn test_value_noise_continuity_across_cells() {
        for i in -5..5 {
            let edge = i as f32;
            let a = value_noise(edge - 1e-3, 0.37);
            let b = value_noise(edge + 1e-3, 0.37);
            assert!((a - b).abs() < 1e-2, "seam at x={}: {} vs {}", edge, a, b);

            let a = value_noise(0.61, edge - 1e-3);
            let b = value_noise(0.61, edge + 1e-3);
            assert!((a - b).abs() < 1e-2, "seam at y={}: {} vs {}", edge, a, b);
        }
    }

    #[test]
    fn test_fractal_noise_octaves() {
        assert_eq!(fractal_noise(1.5, 2.5, 0), 0.0);
        assert_eq!(fractal_noise(1.5, 2.5, 1), value_noise(1.5, 2.5) * 0.5);
        for y in 0..40 {
            for x in 0..40 {
                let v = fractal_noise(x as f32 * 0.21, y as f32 * 0.21, 6);
                assert!((0.0..1.25).contains(&v), "fractal_noise out of range: {}", v);
            }
        }
    }
}
