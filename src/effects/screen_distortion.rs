//! # Screen Distortion
//!
//! Warps an existing frame around a focal point given in pixels, then adds
//! a faint blue glow at the focus. The only compositor besides lensing that
//! reads a [`SourceImage`].

use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::Effect;
use crate::error::{Result, WarpError};
use crate::shader::{Rgb, Rgba, dist, distort, falloff_exp};
use crate::source::SourceImage;

const GLOW_TINT: Rgb = Rgb::new(0.2, 0.4, 1.0);
const GLOW_GAIN: f32 = 0.15;
const GLOW_FALLOFF: f32 = 8.0;

/// Parameters for the screen distortion effect.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Params {
    /// Focal point in pixels. Default: (400, 300)
    pub focal: [f32; 2],
    /// Warp strength; also scales the glow. Default: 1.0
    pub strength: f32,
    /// Screen size in pixels used to normalize `focal`. Default: (800, 600)
    pub screen_size: [f32; 2],
    /// Elapsed seconds. Default: 0.0
    pub time: f32,
}

impl Default for Params {
    fn default() -> Self {
        Self {
            focal: [400.0, 300.0],
            strength: 1.0,
            screen_size: [800.0, 600.0],
            time: 0.0,
        }
    }
}

impl Params {
    /// Generate randomized parameters.
    pub fn random() -> Self {
        let mut rng = rand::rng();
        Self {
            focal: [rng.random_range(200.0..600.0), rng.random_range(150.0..450.0)],
            strength: rng.random_range(0.5..1.0),
            ..Self::default()
        }
    }

    pub fn validate(&self) -> Result<()> {
        let fields = [
            self.focal[0],
            self.focal[1],
            self.strength,
            self.screen_size[0],
            self.screen_size[1],
            self.time,
        ];
        if fields.iter().any(|v| !v.is_finite()) {
            return Err(WarpError::invalid("screen_distortion", "all fields must be finite"));
        }
        if self.screen_size[0] <= 0.0 || self.screen_size[1] <= 0.0 {
            return Err(WarpError::invalid(
                "screen_distortion",
                "screen_size must be positive",
            ));
        }
        Ok(())
    }

    /// Focal point in UV space.
    pub fn focal_uv(&self) -> (f32, f32) {
        (
            self.focal[0] / self.screen_size[0],
            self.focal[1] / self.screen_size[1],
        )
    }
}

impl fmt::Display for Params {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "focal=({:.0},{:.0}) strength={:.2} screen={}x{} t={:.2}",
            self.focal[0],
            self.focal[1],
            self.strength,
            self.screen_size[0],
            self.screen_size[1],
            self.time
        )
    }
}

/// Compute the distorted sample at a UV coordinate.
pub fn shade(u: f32, v: f32, params: &Params, source: &dyn SourceImage) -> Rgba {
    let (fu, fv) = params.focal_uv();
    let (wu, wv) = distort(u, v, fu, fv, params.strength, params.time);
    let base = source.sample(wu, wv);

    let glow = GLOW_GAIN * params.strength * falloff_exp(dist(u, v, fu, fv), GLOW_FALLOFF);
    (base.rgb() + GLOW_TINT * glow).with_alpha(base.a)
}

impl Effect for Params {
    fn name(&self) -> &'static str {
        "screen_distortion"
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
    use crate::source::{Checkerboard, ImageSource};
    use pretty_assertions::assert_eq;

    fn gradient() -> ImageSource {
        let (w, h) = (16, 12);
        let pixels = (0..w * h)
            .map(|i| {
                let (x, y) = (i % w, i / w);
                Rgba::new(x as f32 / w as f32, y as f32 / h as f32, 0.5, 1.0)
            })
            .collect();
        ImageSource::from_pixels(w, h, pixels).unwrap()
    }

    #[test]
    fn test_zero_strength_matches_source() {
        let source = gradient();
        let params = Params {
            strength: 0.0,
            time: 7.0,
            ..Params::default()
        };
        for j in 0..24 {
            for i in 0..32 {
                let (u, v) = ((i as f32 + 0.5) / 32.0, (j as f32 + 0.5) / 24.0);
                assert_eq!(shade(u, v, &params, &source), source.sample(u, v));
            }
        }
    }

    #[test]
    fn test_focal_uv() {
        let params = Params {
            focal: [200.0, 450.0],
            ..Params::default()
        };
        assert_eq!(params.focal_uv(), (0.25, 0.75));
    }

    #[test]
    fn test_glow_is_blue() {
        let source = crate::source::Solid(Rgba::new(0.0, 0.0, 0.0, 1.0));
        let c = shade(0.5, 0.5, &Params::default(), &source);
        assert!(c.b > c.g && c.g > c.r);
        assert!(c.b > 0.1);
        assert_eq!(c.a, 1.0);
    }

    #[test]
    fn test_warp_changes_samples_near_focus() {
        let board = Checkerboard::default();
        let params = Params::default();
        let mut changed = 0;
        for i in 0..40 {
            let u = 0.4 + i as f32 * 0.005;
            let c = shade(u, 0.52, &params, &board);
            let plain = board.sample(u, 0.52);
            if (c.r - plain.r).abs() > 0.2 {
                changed += 1;
            }
        }
        assert!(changed > 0);
    }

    #[test]
    fn test_missing_source_is_transparent() {
        assert_eq!(Params::default().sample(0.5, 0.5, None), Rgba::TRANSPARENT);
    }

    #[test]
    fn test_validate() {
        assert!(Params::default().validate().is_ok());
        let flat = Params {
            screen_size: [800.0, 0.0],
            ..Params::default()
        };
        assert!(flat.validate().is_err());
    }
}
