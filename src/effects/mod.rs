//! # Effects
//!
//! Per-pixel compositors. Each effect lives in its own module with a
//! `Params` block implementing the [`Effect`] trait.
//!
//! ## Adding a New Effect
//!
//! 1. Create `src/effects/myeffect.rs` with a `Params` struct implementing [`Effect`]
//! 2. Add `pub mod myeffect;` below
//! 3. Add a variant to [`EffectParams`] and the name to [`EFFECTS`]

pub mod black_hole;
pub mod lensing;
pub mod screen_distortion;
pub mod space_time_rip;

use serde::{Deserialize, Serialize};

use crate::error::{Result, WarpError};
use crate::shader::Rgba;
use crate::source::SourceImage;

/// All available effects, in display order.
pub const EFFECTS: &[&str] = &["black_hole", "space_time_rip", "screen_distortion", "lensing"];

/// Trait for per-pixel compositors.
pub trait Effect: Send + Sync {
    /// Effect name (snake_case, e.g., "black_hole").
    fn name(&self) -> &'static str;

    /// Color at a UV coordinate. Must be total: any finite input yields a
    /// finite sample.
    fn sample(&self, u: f32, v: f32, source: Option<&dyn SourceImage>) -> Rgba;

    /// Check the parameter block before a frame is rendered.
    fn validate(&self) -> Result<()>;

    /// Whether [`Effect::sample`] reads a source image.
    fn needs_source(&self) -> bool {
        false
    }

    /// Elapsed seconds this parameter block renders at.
    fn time(&self) -> f32;

    /// Move the clock to `time` seconds.
    fn set_time(&mut self, time: f32);
}

/// Parameter block for any effect, tagged by name in JSON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "effect", rename_all = "snake_case")]
pub enum EffectParams {
    BlackHole(black_hole::Params),
    SpaceTimeRip(space_time_rip::Params),
    ScreenDistortion(screen_distortion::Params),
    Lensing(lensing::Params),
}

impl Default for EffectParams {
    fn default() -> Self {
        EffectParams::BlackHole(black_hole::Params::default())
    }
}

impl EffectParams {
    /// Default parameters for an effect name.
    pub fn by_name(name: &str) -> Result<Self> {
        match name.to_lowercase().replace('-', "_").as_str() {
            "black_hole" => Ok(EffectParams::BlackHole(Default::default())),
            "space_time_rip" | "rip" => Ok(EffectParams::SpaceTimeRip(Default::default())),
            "screen_distortion" => Ok(EffectParams::ScreenDistortion(Default::default())),
            "lensing" => Ok(EffectParams::Lensing(Default::default())),
            _ => Err(WarpError::UnknownEffect(name.to_string())),
        }
    }

    /// Randomized parameters for an effect name.
    pub fn random(name: &str) -> Result<Self> {
        Ok(match Self::by_name(name)? {
            EffectParams::BlackHole(_) => EffectParams::BlackHole(black_hole::Params::random()),
            EffectParams::SpaceTimeRip(_) => {
                EffectParams::SpaceTimeRip(space_time_rip::Params::random())
            }
            EffectParams::ScreenDistortion(_) => {
                EffectParams::ScreenDistortion(screen_distortion::Params::random())
            }
            EffectParams::Lensing(_) => EffectParams::Lensing(lensing::Params::random()),
        })
    }

    pub fn as_effect(&self) -> &dyn Effect {
        match self {
            EffectParams::BlackHole(p) => p,
            EffectParams::SpaceTimeRip(p) => p,
            EffectParams::ScreenDistortion(p) => p,
            EffectParams::Lensing(p) => p,
        }
    }

    pub fn as_effect_mut(&mut self) -> &mut dyn Effect {
        match self {
            EffectParams::BlackHole(p) => p,
            EffectParams::SpaceTimeRip(p) => p,
            EffectParams::ScreenDistortion(p) => p,
            EffectParams::Lensing(p) => p,
        }
    }

    pub fn name(&self) -> &'static str {
        self.as_effect().name()
    }

    pub fn validate(&self) -> Result<()> {
        self.as_effect().validate()
    }

    pub fn needs_source(&self) -> bool {
        self.as_effect().needs_source()
    }

    pub fn time(&self) -> f32 {
        self.as_effect().time()
    }

    /// Copy of these parameters with the clock set to `time`.
    pub fn at_time(&self, time: f32) -> Self {
        let mut next = self.clone();
        next.as_effect_mut().set_time(time);
        next
    }

    #[inline]
    pub fn sample(&self, u: f32, v: f32, source: Option<&dyn SourceImage>) -> Rgba {
        self.as_effect().sample(u, v, source)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_by_name_covers_all_effects() {
        for name in EFFECTS {
            let params = EffectParams::by_name(name).unwrap();
            assert_eq!(params.name(), *name);
            assert!(params.validate().is_ok());
        }
    }

    #[test]
    fn test_by_name_aliases() {
        assert_eq!(
            EffectParams::by_name("Space-Time-Rip").unwrap().name(),
            "space_time_rip"
        );
        assert!(matches!(
            EffectParams::by_name("wormhole"),
            Err(WarpError::UnknownEffect(_))
        ));
    }

    #[test]
    fn test_random_params_validate() {
        for name in EFFECTS {
            for _ in 0..20 {
                let params = EffectParams::random(name).unwrap();
                assert!(params.validate().is_ok(), "{}: {:?}", name, params);
            }
        }
    }

    #[test]
    fn test_needs_source() {
        let needs: Vec<bool> = EFFECTS
            .iter()
            .map(|n| EffectParams::by_name(n).unwrap().needs_source())
            .collect();
        assert_eq!(needs, vec![false, false, true, true]);
    }

    #[test]
    fn test_at_time_leaves_original() {
        let params = EffectParams::default();
        let later = params.at_time(3.5);
        assert_eq!(params.time(), 0.0);
        assert_eq!(later.time(), 3.5);
    }

    #[test]
    fn test_json_tagging() {
        let json = serde_json::to_value(EffectParams::by_name("lensing").unwrap()).unwrap();
        assert_eq!(json["effect"], "lensing");
        assert_eq!(json["radius"], serde_json::json!(0.15f32));

        let parsed: EffectParams =
            serde_json::from_str(r#"{"effect": "black_hole", "radius": 0.2}"#).unwrap();
        match parsed {
            EffectParams::BlackHole(p) => {
                assert_eq!(p.radius, 0.2);
                assert_eq!(p.accretion_radius, black_hole::Params::default().accretion_radius);
            }
            other => panic!("unexpected {:?}", other),
        }
    }
}
