//! Color samples.
//!
//! Channels are `f32` and unpremultiplied. Color channels may exceed
//! [0, 1] during compositing; alpha is kept in [0, 1] by the compositors.

use std::ops::{Add, Mul};

use super::blend::lerp;

/// RGB triple used while compositing layers.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Rgb {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Rgb {
    pub const BLACK: Rgb = Rgb::new(0.0, 0.0, 0.0);
    pub const WHITE: Rgb = Rgb::new(1.0, 1.0, 1.0);

    #[inline]
    pub const fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    /// Channel-wise maximum.
    #[inline]
    pub fn max(self, other: Rgb) -> Rgb {
        Rgb::new(self.r.max(other.r), self.g.max(other.g), self.b.max(other.b))
    }

    /// Channel-wise multiply.
    #[inline]
    pub fn tint(self, other: Rgb) -> Rgb {
        Rgb::new(self.r * other.r, self.g * other.g, self.b * other.b)
    }

    /// Linear blend toward `other`.
    #[inline]
    pub fn mix(self, other: Rgb, t: f32) -> Rgb {
        Rgb::new(
            lerp(self.r, other.r, t),
            lerp(self.g, other.g, t),
            lerp(self.b, other.b, t),
        )
    }

    #[inline]
    pub fn with_alpha(self, a: f32) -> Rgba {
        Rgba::new(self.r, self.g, self.b, a)
    }
}

impl Add for Rgb {
    type Output = Rgb;

    #[inline]
    fn add(self, rhs: Rgb) -> Rgb {
        Rgb::new(self.r + rhs.r, self.g + rhs.g, self.b + rhs.b)
    }
}

impl Mul<f32> for Rgb {
    type Output = Rgb;

    #[inline]
    fn mul(self, k: f32) -> Rgb {
        Rgb::new(self.r * k, self.g * k, self.b * k)
    }
}

/// One output sample: unpremultiplied color plus alpha.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Rgba {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Rgba {
    pub const TRANSPARENT: Rgba = Rgba::new(0.0, 0.0, 0.0, 0.0);
    pub const OPAQUE_BLACK: Rgba = Rgba::new(0.0, 0.0, 0.0, 1.0);

    #[inline]
    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Build from an `[r, g, b, a]` array as stored in parameter blocks.
    #[inline]
    pub const fn from_array(c: [f32; 4]) -> Self {
        Self::new(c[0], c[1], c[2], c[3])
    }

    #[inline]
    pub fn rgb(self) -> Rgb {
        Rgb::new(self.r, self.g, self.b)
    }

    /// Component-wise linear blend, used by bilinear sampling.
    #[inline]
    pub fn mix(self, other: Rgba, t: f32) -> Rgba {
        Rgba::new(
            lerp(self.r, other.r, t),
            lerp(self.g, other.g, t),
            lerp(self.b, other.b, t),
            lerp(self.a, other.a, t),
        )
    }

    pub fn is_finite(&self) -> bool {
        self.r.is_finite() && self.g.is_finite() && self.b.is_finite() && self.a.is_finite()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rgb_max() {
        let a = Rgb::new(0.2, 0.9, 0.1);
        let b = Rgb::new(0.5, 0.3, 0.1);
        assert_eq!(a.max(b), Rgb::new(0.5, 0.9, 0.1));
    }

    #[test]
    fn test_rgb_ops() {
        let c = Rgb::new(0.1, 0.2, 0.3) + Rgb::new(0.1, 0.1, 0.1);
        assert!((c.b - 0.4).abs() < 1e-6);
        assert_eq!(Rgb::WHITE * 0.5, Rgb::new(0.5, 0.5, 0.5));
        assert_eq!(Rgb::WHITE.tint(Rgb::new(0.2, 0.7, 1.0)), Rgb::new(0.2, 0.7, 1.0));
    }

    #[test]
    fn test_mix_endpoints() {
        let a = Rgba::new(0.0, 0.0, 0.0, 0.0);
        let b = Rgba::new(1.0, 0.5, 0.25, 1.0);
        assert_eq!(a.mix(b, 0.0), a);
        assert_eq!(a.mix(b, 1.0), b);
    }
}
