//! # Black Hole
//!
//! Radial zones around a center point, innermost first:
//!
//! ```text
//! event horizon -> accretion disk -> Einstein ring -> lensed stars -> outer glow -> nothing
//!      r             r..accretion     ring radius      beyond ring      everywhere    d > 0.5
//! ```
//!
//! Zones are evaluated from the ordered [`ZONES`] table. Disk and ring take
//! the channel-wise maximum, stars and glow are added on top, and the
//! horizon shadow darkens the result. Opacities are summed and clamped.
//!
//! Radii are expected to nest (`radius < accretion_radius < OUTER_RADIUS`);
//! [`Params::validate`] rejects blocks that do not.

use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::Effect;
use crate::error::{Result, WarpError};
use crate::shader::{
    Rgb, Rgba, band, cart_to_polar, clamp01, dist, distort_with, falloff_exp, fractal_noise,
    lerp, polar_to_cart, smoothstep, stars,
};
use crate::source::SourceImage;

/// Beyond this distance from the center the effect is fully transparent.
pub const OUTER_RADIUS: f32 = 0.5;

/// Preset glow colors, one per gameplay state:
/// shielded, low shield, healthy, critical.
pub const GLOW_PALETTE: [[f32; 4]; 4] = [
    [0.1, 0.33, 1.0, 1.0],
    [0.8, 0.0, 1.0, 1.0],
    [1.0, 0.8, 0.2, 1.0],
    [1.0, 0.3, 0.2, 1.0],
];

const HORIZON_EDGE: f32 = 0.02;
/// Floor for the disk width so degenerate radii stay NaN-free.
const MIN_SPAN: f32 = 1.0e-4;
const DISK_INNER: Rgb = Rgb::new(1.0, 0.85, 0.55);
const DISK_ARMS: f32 = 3.0;
const RING_WIDTH: f32 = 0.008;
const RING_OPACITY: f32 = 0.85;
const STAR_SEED: f32 = 17.0;
const STAR_DRIFT: f32 = 0.05;
const STAR_OPACITY: f32 = 0.6;
const GLOW_FALLOFF: f32 = 6.0;
const GLOW_OPACITY: f32 = 0.35;

/// Parameters for the black hole effect.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Params {
    /// Center in UV space. Default: (0.5, 0.5)
    pub center: [f32; 2],
    /// Event horizon radius. Default: 0.1
    pub radius: f32,
    /// Outer edge of the accretion disk. Default: 0.2
    pub accretion_radius: f32,
    /// Strength of the lensing warp applied to the starfield. Default: 5.0
    pub distortion_strength: f32,
    /// Disk and starlight rotation rate. Default: 0.5
    pub rotation_speed: f32,
    /// Elapsed seconds. Default: 0.0
    pub time: f32,
    /// Glow tint; alpha scales the glow. Default: (0.2, 0.7, 1.0, 1.0)
    pub glow_color: [f32; 4],
}

impl Default for Params {
    fn default() -> Self {
        Self {
            center: [0.5, 0.5],
            radius: 0.1,
            accretion_radius: 0.2,
            distortion_strength: 5.0,
            rotation_speed: 0.5,
            time: 0.0,
            glow_color: [0.2, 0.7, 1.0, 1.0],
        }
    }
}

impl Params {
    /// Generate randomized parameters.
    pub fn random() -> Self {
        let mut rng = rand::rng();
        let radius = rng.random_range(0.05..0.15);
        Self {
            center: [rng.random_range(0.45..0.55), rng.random_range(0.45..0.55)],
            radius,
            accretion_radius: rng.random_range(radius + 0.08..0.42),
            distortion_strength: rng.random_range(3.0..8.0),
            rotation_speed: rng.random_range(0.2..4.0),
            time: 0.0,
            glow_color: GLOW_PALETTE[rng.random_range(0..GLOW_PALETTE.len())],
        }
    }

    /// Reject blocks whose radii do not nest or whose values are not finite.
    pub fn validate(&self) -> Result<()> {
        let fields = [
            self.center[0],
            self.center[1],
            self.radius,
            self.accretion_radius,
            self.distortion_strength,
            self.rotation_speed,
            self.time,
        ];
        if fields.iter().chain(self.glow_color.iter()).any(|v| !v.is_finite()) {
            return Err(WarpError::invalid("black_hole", "all fields must be finite"));
        }
        if self.radius <= 0.0 {
            return Err(WarpError::invalid("black_hole", "radius must be positive"));
        }
        if self.accretion_radius <= self.radius {
            return Err(WarpError::invalid(
                "black_hole",
                format!(
                    "accretion_radius {} must exceed radius {}",
                    self.accretion_radius, self.radius
                ),
            ));
        }
        if self.accretion_radius >= OUTER_RADIUS {
            return Err(WarpError::invalid(
                "black_hole",
                format!("accretion_radius must be below {}", OUTER_RADIUS),
            ));
        }
        Ok(())
    }

    fn glow_rgb(&self) -> Rgb {
        Rgba::from_array(self.glow_color).rgb()
    }

    /// Radius of the Einstein ring, a quarter of the way from the disk edge
    /// to the outer cutoff.
    pub fn ring_radius(&self) -> f32 {
        lerp(self.accretion_radius, OUTER_RADIUS, 0.25)
    }
}

impl fmt::Display for Params {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "center=({:.2},{:.2}) radius={:.3} accretion={:.3} strength={:.1} rotation={:.2} t={:.2}",
            self.center[0],
            self.center[1],
            self.radius,
            self.accretion_radius,
            self.distortion_strength,
            self.rotation_speed,
            self.time
        )
    }
}

/// Radial zones, innermost first.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Zone {
    EventHorizon,
    AccretionDisk,
    EinsteinRing,
    LensedStars,
    OuterGlow,
}

/// How a zone's color joins the sample.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Composite {
    /// Darkens everything else by the zone's opacity.
    Shadow,
    /// Channel-wise maximum with the other `Max` zones.
    Max,
    /// Added after the maximum is taken.
    Add,
}

/// Evaluation order of the zones.
pub const ZONES: [(Zone, Composite); 5] = [
    (Zone::EventHorizon, Composite::Shadow),
    (Zone::AccretionDisk, Composite::Max),
    (Zone::EinsteinRing, Composite::Max),
    (Zone::LensedStars, Composite::Add),
    (Zone::OuterGlow, Composite::Add),
];

/// A sample position relative to the center.
#[derive(Debug, Clone, Copy)]
pub struct Polar {
    pub u: f32,
    pub v: f32,
    /// Distance to the center.
    pub d: f32,
    /// Polar angle around the center, radians.
    pub theta: f32,
}

impl Polar {
    pub fn new(u: f32, v: f32, params: &Params) -> Self {
        let [cx, cy] = params.center;
        Self {
            u,
            v,
            d: dist(u, v, cx, cy),
            theta: (v - cy).atan2(u - cx),
        }
    }
}

/// One zone's contribution.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Layer {
    pub opacity: f32,
    pub color: Rgb,
}

/// Fade applied to every zone except the horizon over the last fifth of
/// the outer radius.
#[inline]
fn edge_fade(d: f32) -> f32 {
    1.0 - smoothstep(OUTER_RADIUS * 0.8, OUTER_RADIUS, d)
}

/// Evaluate a single zone at a position.
pub fn zone_sample(zone: Zone, at: &Polar, params: &Params) -> Layer {
    match zone {
        Zone::EventHorizon => event_horizon(at, params),
        Zone::AccretionDisk => accretion_disk(at, params),
        Zone::EinsteinRing => einstein_ring(at, params),
        Zone::LensedStars => lensed_stars(at, params),
        Zone::OuterGlow => outer_glow(at, params),
    }
}

fn event_horizon(at: &Polar, params: &Params) -> Layer {
    Layer {
        opacity: 1.0 - smoothstep(params.radius, params.radius + HORIZON_EDGE, at.d),
        color: Rgb::BLACK,
    }
}

fn accretion_disk(at: &Polar, params: &Params) -> Layer {
    let span = (params.accretion_radius - params.radius).max(MIN_SPAN);
    let t = clamp01((at.d - params.radius) / span);
    let mask = smoothstep(0.0, 0.15, t) * (1.0 - smoothstep(0.75, 1.0, t)) * edge_fade(at.d);

    let spin = params.time * params.rotation_speed * 2.0;
    let swept = at.theta - params.time * params.rotation_speed;
    let turbulence = fractal_noise(
        swept.cos() * 3.0 + at.d * 10.0,
        swept.sin() * 3.0 + at.d * 10.0,
        3,
    );
    let pattern =
        0.5 + 0.5 * (at.theta * DISK_ARMS - spin + at.d * 25.0 + turbulence * 2.0).sin();

    // Squared position keeps most of the disk near the inner hue
    let hue = DISK_INNER.mix(params.glow_rgb(), t * t);

    Layer {
        opacity: mask * (0.55 + 0.35 * pattern),
        color: hue * ((0.6 + 0.8 * pattern) * mask),
    }
}

fn einstein_ring(at: &Polar, params: &Params) -> Layer {
    let b = band(at.d, params.ring_radius(), RING_WIDTH) * edge_fade(at.d);
    let shimmer = 1.0 + 0.1 * (at.theta * 2.0 + params.time * 2.0).sin();
    let hot = Rgb::WHITE * 0.8 + params.glow_rgb() * 0.6;
    Layer {
        opacity: RING_OPACITY * b,
        color: hot * (b * shimmer),
    }
}

fn lensed_stars(at: &Polar, params: &Params) -> Layer {
    let [cx, cy] = params.center;
    let ring = params.ring_radius();
    let mask = smoothstep(ring, ring + 0.02, at.d) * edge_fade(at.d);
    if mask <= 0.0 {
        return Layer {
            opacity: 0.0,
            color: Rgb::BLACK,
        };
    }

    let (wu, wv) = distort_with(
        at.u,
        at.v,
        cx,
        cy,
        params.distortion_strength,
        params.time,
        params.accretion_radius,
    );
    let (r, theta) = cart_to_polar(wu - cx, wv - cy);
    let bent = theta
        + params.time * STAR_DRIFT
        + 0.1 * (params.time * params.rotation_speed * 0.5 + r * 10.0).sin();
    let (sx, sy) = polar_to_cart(r, bent);
    let s = clamp01(stars(cx + sx, cy + sy, STAR_SEED)) * mask;

    Layer {
        opacity: s * STAR_OPACITY,
        color: Rgb::WHITE * s,
    }
}

fn outer_glow(at: &Polar, params: &Params) -> Layer {
    let g = falloff_exp((at.d - params.radius).max(0.0), GLOW_FALLOFF)
        * edge_fade(at.d)
        * params.glow_color[3];
    Layer {
        opacity: GLOW_OPACITY * g,
        color: params.glow_rgb() * g,
    }
}

/// Compute the black hole sample at a UV coordinate.
pub fn shade(u: f32, v: f32, params: &Params) -> Rgba {
    let at = Polar::new(u, v, params);
    if at.d > OUTER_RADIUS {
        return Rgba::TRANSPARENT;
    }
    if at.d < params.radius {
        return Rgba::OPAQUE_BLACK;
    }

    let mut shadow: f32 = 0.0;
    let mut peak = Rgb::BLACK;
    let mut added = Rgb::BLACK;
    let mut alpha = 0.0;

    for &(zone, composite) in ZONES.iter() {
        let layer = zone_sample(zone, &at, params);
        alpha += layer.opacity;
        match composite {
            Composite::Shadow => shadow = shadow.max(layer.opacity),
            Composite::Max => peak = peak.max(layer.color),
            Composite::Add => added = added + layer.color,
        }
    }

    ((peak + added) * (1.0 - shadow)).with_alpha(clamp01(alpha))
}

impl Effect for Params {
    fn name(&self) -> &'static str {
        "black_hole"
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

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn scenario() -> Params {
        Params {
            radius: 0.1,
            accretion_radius: 0.4,
            ..Params::default()
        }
    }

    #[test]
    fn test_event_horizon_is_opaque_black() {
        assert_eq!(shade(0.55, 0.5, &scenario()), Rgba::new(0.0, 0.0, 0.0, 1.0));
    }

    #[test]
    fn test_inside_horizon_everywhere() {
        let params = Params {
            time: 12.5,
            ..Params::default()
        };
        for k in 0..32 {
            let theta = k as f32 * std::f32::consts::TAU / 32.0;
            for &r in &[0.0, 0.03, 0.07, 0.099] {
                let c = shade(0.5 + r * theta.cos(), 0.5 + r * theta.sin(), &params);
                assert_eq!(c, Rgba::OPAQUE_BLACK);
            }
        }
    }

    #[test]
    fn test_glow_region_partial_alpha() {
        let c = shade(0.9, 0.5, &scenario());
        assert!(c.a > 0.0 && c.a < 1.0, "alpha should be partial, got {}", c.a);
    }

    #[test]
    fn test_outer_cutoff_transparent() {
        let params = Params {
            glow_color: [1.0, 1.0, 1.0, 1.0],
            distortion_strength: 100.0,
            ..Params::random()
        };
        for &(u, v) in &[(1.2, 0.5), (0.5, -0.2), (0.0, 0.0), (0.95, 0.95)] {
            assert_eq!(shade(u, v, &params).a, 0.0);
        }
    }

    #[test]
    fn test_alpha_continuous_at_horizon() {
        let params = scenario();
        let just_outside = shade(0.5 + params.radius + 1e-4, 0.5, &params);
        assert!(just_outside.a > 0.99);
        assert!(just_outside.r < 0.05 && just_outside.g < 0.05 && just_outside.b < 0.05);
    }

    #[test]
    fn test_ring_peaks_at_ring_radius() {
        let params = Params::default();
        let ring = params.ring_radius();
        let on = zone_sample(Zone::EinsteinRing, &Polar::new(0.5 + ring, 0.5, &params), &params);
        let off = zone_sample(Zone::EinsteinRing, &Polar::new(0.5 + ring + 0.05, 0.5, &params), &params);
        assert!((on.opacity - RING_OPACITY).abs() < 1e-4);
        assert!(off.opacity < 1e-6);
    }

    #[test]
    fn test_disk_confined_to_annulus() {
        let params = Params::default();
        let mid = (params.radius + params.accretion_radius) / 2.0;
        let inside = zone_sample(Zone::AccretionDisk, &Polar::new(0.5 + mid, 0.5, &params), &params);
        let beyond = zone_sample(
            Zone::AccretionDisk,
            &Polar::new(0.5 + params.accretion_radius + 0.01, 0.5, &params),
            &params,
        );
        assert!(inside.opacity > 0.3);
        assert_eq!(beyond.opacity, 0.0);
    }

    #[test]
    fn test_stars_only_beyond_ring() {
        let params = Params::default();
        let at = Polar::new(0.5 + params.accretion_radius, 0.5, &params);
        assert_eq!(zone_sample(Zone::LensedStars, &at, &params).opacity, 0.0);
    }

    #[test]
    fn test_horizon_shadow_fades() {
        let params = Params::default();
        let edge = zone_sample(Zone::EventHorizon, &Polar::new(0.5 + params.radius, 0.5, &params), &params);
        let far = zone_sample(Zone::EventHorizon, &Polar::new(0.5 + 0.3, 0.5, &params), &params);
        assert_eq!(edge.opacity, 1.0);
        assert_eq!(far.opacity, 0.0);
    }

    #[test]
    fn test_deterministic() {
        let params = Params {
            time: 3.3,
            ..Params::default()
        };
        for i in 0..100 {
            let u = i as f32 / 99.0;
            let a = shade(u, 0.37, &params);
            let b = shade(u, 0.37, &params);
            assert_eq!(a, b);
            assert!(a.is_finite());
            assert!((0.0..=1.0).contains(&a.a));
        }
    }

    #[test]
    fn test_degenerate_radii_stay_finite() {
        let params = Params {
            radius: 0.2,
            accretion_radius: 0.2,
            ..Params::default()
        };
        assert!(params.validate().is_err());
        for i in 0..50 {
            assert!(shade(i as f32 / 49.0, 0.5, &params).is_finite());
        }
    }

    #[test]
    fn test_validate() {
        assert!(Params::default().validate().is_ok());
        assert!(scenario().validate().is_ok());
        let reversed = Params {
            radius: 0.3,
            accretion_radius: 0.2,
            ..Params::default()
        };
        assert!(reversed.validate().is_err());
        let too_wide = Params {
            accretion_radius: 0.6,
            ..Params::default()
        };
        assert!(too_wide.validate().is_err());
        let nan = Params {
            time: f32::NAN,
            ..Params::default()
        };
        assert!(nan.validate().is_err());
        for _ in 0..20 {
            assert!(Params::random().validate().is_ok());
        }
    }
}
