//! # Gravitational Lensing
//!
//! Resamples a source image through the distortion field with the swirl
//! confined to `radius`. No color is added: the lens only bends what is
//! behind it.

use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::Effect;
use crate::error::{Result, WarpError};
use crate::shader::{Rgba, distort_with};
use crate::source::SourceImage;

/// Parameters for the lensing effect.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Params {
    /// Lens center in UV space. Default: (0.5, 0.5)
    pub center: [f32; 2],
    /// Pull strength. Default: 0.5
    pub strength: f32,
    /// Scales elapsed time for breathing and swirl. Default: 0.2
    pub rotation_speed: f32,
    /// Elapsed seconds. Default: 0.0
    pub time: f32,
    /// Swirl radius. Default: 0.15
    pub radius: f32,
}

impl Default for Params {
    fn default() -> Self {
        Self {
            center: [0.5, 0.5],
            strength: 0.5,
            rotation_speed: 0.2,
            time: 0.0,
            radius: 0.15,
        }
    }
}

impl Params {
    /// Generate randomized parameters.
    pub fn random() -> Self {
        let mut rng = rand::rng();
        Self {
            center: [rng.random_range(0.3..0.7), rng.random_range(0.3..0.7)],
            strength: rng.random_range(0.2..1.5),
            rotation_speed: rng.random_range(0.05..0.5),
            time: 0.0,
            radius: rng.random_range(0.08..0.25),
        }
    }

    pub fn validate(&self) -> Result<()> {
        let fields = [
            self.center[0],
            self.center[1],
            self.strength,
            self.rotation_speed,
            self.time,
            self.radius,
        ];
        if fields.iter().any(|v| !v.is_finite()) {
            return Err(WarpError::invalid("lensing", "all fields must be finite"));
        }
        if self.radius < 0.0 {
            return Err(WarpError::invalid("lensing", "radius must not be negative"));
        }
        Ok(())
    }
}

impl fmt::Display for Params {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "center=({:.2},{:.2}) strength={:.2} rotation={:.2} radius={:.3} t={:.2}",
            self.center[0], self.center[1], self.strength, self.rotation_speed, self.radius, self.time
        )
    }
}

/// Compute the lensed sample at a UV coordinate.
pub fn shade(u: f32, v: f32, params: &Params, source: &dyn SourceImage) -> Rgba {
    let [cx, cy] = params.center;
    let (wu, wv) = distort_with(
        u,
        v,
        cx,
        cy,
        params.strength,
        params.time * params.rotation_speed,
        params.radius,
    );
    source.sample(wu, wv)
}

impl Effect for Params {
    fn name(&self) -> &'static str {
        "lensing"
    }

    fn sample(&self, u: f32, v: f32, source: Option<&dyn SourceImage>) -> Rgba {
        match source {
            Some(source) => shade(u, v, self, source),
            None => Rgba::TRANSPARENT,
        }
    }

    fn validate(&self) -> Result<()> {
        Params::validate(self)
    }

    fn needs_source(&self) -> bool {
        true
    }

    fn time(&self) -> f32 {
        self.time
    }

    fn set_time(&mut self, time: f32) {
        self.time = time;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::{Checkerboard, Solid};
    use pretty_assertions::assert_eq;

    #[test]
    fn test_solid_source_unchanged() {
        let color = Rgba::new(0.3, 0.6, 0.9, 1.0);
        let params = Params {
            strength: 3.0,
            ..Params::default()
        };
        assert_eq!(shade(0.52, 0.49, &params, &Solid(color)), color);
    }

    #[test]
    fn test_zero_strength_identity() {
        let board = Checkerboard::default();
        let params = Params {
            strength: 0.0,
            time: 40.0,
            ..Params::default()
        };
        for i in 0..50 {
            let u = i as f32 / 49.0;
            assert_eq!(shade(u, 0.3, &params, &board), board.sample(u, 0.3));
        }
    }

    #[test]
    fn test_far_field_nearly_unbent() {
        let board = Checkerboard {
            cells: 2.0,
            ..Checkerboard::default()
        };
        let params = Params::default();
        // Well away from cell boundaries and the lens, samples match
        assert_eq!(shade(0.05, 0.05, &params, &board), board.sample(0.05, 0.05));
    }

    #[test]
    fn test_validate() {
        assert!(Params::default().validate().is_ok());
        let bad = Params {
            radius: -0.1,
            ..Params::default()
        };
        assert!(bad.validate().is_err());
    }
}
