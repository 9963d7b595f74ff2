//! # Space-Time Rip
//!
//! A jagged tear along a segment (by default the horizontal mid-line),
//! black at its core and crackling with energy along its edge.
//!
//! ## Shape
//!
//! ```text
//! s          = position along the tear, 0 at start, 1 at end
//! half_width = width * 0.01 * sin(PI * s) * max(0, 1 + jag + spikes)
//! distance   = distance_to_segment - half_width      (negative inside)
//! ```
//!
//! `jag` layers three fractal noises of rising frequency, `spikes` is a
//! sharpened sine. Both scroll with `time * animation_speed`.
//!
//! ## Layers
//!
//! The void mask paints the inside solid black. Around it an exponential
//! glow, a noisy electric fringe, vertical streaks and the occasional flare
//! are summed, tinted by the glow color, and faded out with distance.

use rand::Rng;
use serde::{Deserialize, Serialize};
use std::f32::consts::PI;
use std::fmt;

use super::Effect;
use crate::error::{Result, WarpError};
use crate::shader::{
    Rgb, Rgba, band, clamp01, falloff_exp, fractal_noise, hash, lerp, segment_distance,
    smoothstep, value_noise, warp,
};
use crate::source::SourceImage;

/// `width` is expressed in hundredths of the frame.
const WIDTH_SCALE: f32 = 0.01;
const WARP_SCALE: f32 = 0.01;
const SPIKE_FREQ: f32 = 40.0;
const VOID_SOFTNESS: f32 = 0.006;
const GLOW_FALLOFF: f32 = 30.0;
const ELECTRIC_REACH: f32 = 0.04;
const ELECTRIC_GAIN: f32 = 0.8;
const STREAK_FREQ: f32 = 120.0;
const STREAK_REACH: f32 = 0.06;
const STREAK_GAIN: f32 = 0.6;
/// Flare buckets per unit of animated time.
const FLARE_RATE: f32 = 2.0;
/// Hash rolls below this produce no flare.
const FLARE_CHANCE: f32 = 0.6;
const FLARE_SPREAD: f32 = 0.05;
const FLARE_GAIN: f32 = 1.5;
const ALPHA_FALLOFF: f32 = 12.0;
/// Fraction of alpha removed where the void is fully active.
const VOID_ALPHA_CUT: f32 = 0.05;

/// Parameters for the space-time rip effect.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Params {
    /// Tear start in UV space. Default: (0.0, 0.5)
    pub start: [f32; 2],
    /// Tear end in UV space. Default: (1.0, 0.5)
    pub end: [f32; 2],
    /// Peak tear width in hundredths of the frame. Default: 8.0
    pub width: f32,
    /// Edge glow multiplier. Default: 0.8
    pub glow_intensity: f32,
    /// Amount of noise warp applied to the sample position. Default: 1.5
    pub distortion_strength: f32,
    /// Elapsed seconds. Default: 0.0
    pub time: f32,
    /// Energy tint; alpha scales the energy. Default: (0.6, 0.0, 1.0, 0.8)
    pub glow_color: [f32; 4],
    /// Multiplier on `time` for all animation. Default: 0.7
    pub animation_speed: f32,
    /// Width breathing amplitude, `width * (1 + width_pulse * sin(time))`.
    /// Default: 0.0
    pub width_pulse: f32,
}

impl Default for Params {
    fn default() -> Self {
        Self {
            start: [0.0, 0.5],
            end: [1.0, 0.5],
            width: 8.0,
            glow_intensity: 0.8,
            distortion_strength: 1.5,
            time: 0.0,
            glow_color: [0.6, 0.0, 1.0, 0.8],
            animation_speed: 0.7,
            width_pulse: 0.0,
        }
    }
}

impl Params {
    /// Generate randomized parameters.
    pub fn random() -> Self {
        let mut rng = rand::rng();
        let tilt = rng.random_range(-0.1..0.1);
        Self {
            start: [rng.random_range(0.0..0.15), 0.5 - tilt],
            end: [rng.random_range(0.85..1.0), 0.5 + tilt],
            width: rng.random_range(4.0..10.0),
            glow_intensity: rng.random_range(0.5..1.2),
            distortion_strength: rng.random_range(0.5..2.5),
            time: 0.0,
            glow_color: [
                rng.random_range(0.3..1.0),
                rng.random_range(0.0..0.4),
                rng.random_range(0.6..1.0),
                0.8,
            ],
            animation_speed: rng.random_range(0.4..1.2),
            width_pulse: rng.random_range(0.0..0.3),
        }
    }

    pub fn validate(&self) -> Result<()> {
        let fields = [
            self.start[0],
            self.start[1],
            self.end[0],
            self.end[1],
            self.width,
            self.glow_intensity,
            self.distortion_strength,
            self.time,
            self.animation_speed,
            self.width_pulse,
        ];
        if fields.iter().chain(self.glow_color.iter()).any(|v| !v.is_finite()) {
            return Err(WarpError::invalid("space_time_rip", "all fields must be finite"));
        }
        let (dx, dy) = (self.end[0] - self.start[0], self.end[1] - self.start[1]);
        if dx * dx + dy * dy < 1e-6 {
            return Err(WarpError::invalid("space_time_rip", "start and end coincide"));
        }
        if self.width <= 0.0 {
            return Err(WarpError::invalid("space_time_rip", "width must be positive"));
        }
        if self.glow_intensity < 0.0 {
            return Err(WarpError::invalid(
                "space_time_rip",
                "glow_intensity must not be negative",
            ));
        }
        if !(0.0..1.0).contains(&self.width_pulse) {
            return Err(WarpError::invalid("space_time_rip", "width_pulse must be in [0, 1)"));
        }
        Ok(())
    }

    /// Width after breathing is applied.
    pub fn effective_width(&self) -> f32 {
        self.width * (1.0 + self.width_pulse * self.time.sin())
    }

    /// Animated time.
    fn tau(&self) -> f32 {
        self.time * self.animation_speed
    }
}

impl fmt::Display for Params {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "({:.2},{:.2})->({:.2},{:.2}) width={:.1} glow={:.2} strength={:.2} speed={:.2} t={:.2}",
            self.start[0],
            self.start[1],
            self.end[0],
            self.end[1],
            self.width,
            self.glow_intensity,
            self.distortion_strength,
            self.animation_speed,
            self.time
        )
    }
}

/// A flare chosen for one time bucket.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Flare {
    /// Position along the tear, in [0.15, 0.85).
    pub position: f32,
    /// 0 for quiet buckets, up to 1.
    pub strength: f32,
}

/// The flare for a discrete time bucket.
///
/// Stable for every sample in the same bucket, and unrelated between
/// neighbouring buckets.
pub fn flare(bucket: i32) -> Flare {
    let b = bucket as f32;
    let roll = hash(b, 1.7);
    Flare {
        position: 0.15 + 0.7 * hash(b, 9.1),
        strength: ((roll - FLARE_CHANCE) / (1.0 - FLARE_CHANCE)).max(0.0),
    }
}

/// Bucket index for a parameter block's current time.
pub fn flare_bucket(params: &Params) -> i32 {
    (params.tau() * FLARE_RATE).floor() as i32
}

/// Where a sample sits relative to the tear.
#[derive(Debug, Clone, Copy)]
struct TearPoint {
    /// Position along the tear, clamped to [0, 1].
    along: f32,
    /// Signed distance to the tear edge, negative inside.
    distance: f32,
}

fn locate(u: f32, v: f32, params: &Params) -> TearPoint {
    let tau = params.tau();

    let (wu, wv) = warp(
        u,
        v,
        value_noise(u * 6.0 + tau * 0.3, v * 6.0) - 0.5,
        value_noise(u * 6.0 + 5.2, v * 6.0 - tau * 0.3) - 0.5,
        params.distortion_strength * WARP_SCALE,
    );

    let [ax, ay] = params.start;
    let [bx, by] = params.end;
    let (s, to_segment) = segment_distance(wu, wv, ax, ay, bx, by);
    let along = clamp01(s);

    let taper = (along * PI).sin();
    let jag = (fractal_noise(along * 8.0 + tau * 0.5, tau * 0.3, 3) - 0.5) * 0.5
        + (fractal_noise(along * 24.0 - tau, 3.7 + tau * 0.6, 3) - 0.5) * 0.25
        + (fractal_noise(along * 64.0 + tau * 2.0, 9.1, 2) - 0.5) * 0.12;
    let spikes = 0.6 * (along * SPIKE_FREQ + tau * 3.0).sin().max(0.0).powi(12);

    let half_width =
        params.effective_width() * WIDTH_SCALE * taper * (1.0 + jag + spikes).max(0.0);

    TearPoint {
        along,
        distance: to_segment - half_width,
    }
}

/// Signed distance to the tear edge. Negative inside the tear.
pub fn tear_distance(u: f32, v: f32, params: &Params) -> f32 {
    locate(u, v, params).distance
}

/// 1 where `distance <= 0`, fading to 0 just outside the edge.
#[inline]
pub fn void_mask(distance: f32) -> f32 {
    1.0 - smoothstep(0.0, VOID_SOFTNESS, distance)
}

/// Closeness to the edge on either side: 1 on the edge, 0 beyond `reach`.
#[inline]
fn near_edge(distance: f32, reach: f32) -> f32 {
    1.0 - smoothstep(0.0, reach, distance.abs())
}

/// Compute the rip sample at a UV coordinate.
pub fn shade(u: f32, v: f32, params: &Params) -> Rgba {
    let tau = params.tau();
    let point = locate(u, v, params);
    let td = point.distance;
    let outside = td.max(0.0);

    let void = void_mask(td);

    let glow = params.glow_intensity * falloff_exp(outside, GLOW_FALLOFF);

    // Two octaves peak below 0.8
    let crackle = fractal_noise(u * 60.0 + tau * 5.0, v * 60.0 - tau * 4.0, 2) / 0.8;
    let electric = smoothstep(0.55, 0.75, crackle) * near_edge(td, ELECTRIC_REACH) * ELECTRIC_GAIN;

    let streaks = (u * STREAK_FREQ + tau * 2.0).sin().abs().powi(24)
        * near_edge(td, STREAK_REACH)
        * STREAK_GAIN;

    let f = flare(flare_bucket(params));
    let flare_glow = f.strength
        * band(point.along, f.position, FLARE_SPREAD)
        * falloff_exp(outside, GLOW_FALLOFF * 0.66)
        * FLARE_GAIN;

    let combined = glow + electric + streaks + flare_glow;

    let wobble = Rgb::new(
        1.0 + 0.15 * (tau * 1.3).sin(),
        1.0 + 0.15 * (tau * 1.7 + 2.0).sin(),
        1.0 + 0.15 * (tau * 2.1 + 4.0).sin(),
    );
    let pulse = 0.85 + 0.15 * (tau * 3.0).sin();
    let tint = Rgba::from_array(params.glow_color).rgb().tint(wobble);
    let energy = tint * (combined * pulse * params.glow_color[3]);

    let falloff = falloff_exp(outside, ALPHA_FALLOFF);
    let alpha = clamp01(falloff * lerp(1.0, 1.0 - VOID_ALPHA_CUT, void));

    (energy * (1.0 - void)).with_alpha(alpha)
}

impl Effect for Params {
    fn name(&self) -> &'static str {
        "space_time_rip"
    }

    fn sample(&self, u: f32, v: f32, _source: Option<&dyn SourceImage>) -> Rgba {
        shade(u, v, self)
    }

    fn validate(&self) -> Result<()> {
        Params::validate(self)
    }

    fn time(&self) -> f32 {
        self.time
    }

    fn set_time(&mut self, time: f32) {
        self.time = time;
    }
}
