//! Source images for the resampling effects.
//!
//! The screen-distortion and lensing compositors read an external image
//! through the [`SourceImage`] capability only. Implementations must be
//! shareable across the frame driver's worker threads; none of them are
//! mutated while a frame renders.

use std::path::Path;

use image::DynamicImage;
use log::debug;

use crate::error::{Result, WarpError};
use crate::shader::Rgba;

/// Read-only image that can be sampled at a normalized coordinate.
pub trait SourceImage: Send + Sync {
    /// Filtered color at `(u, v)`. Coordinates outside [0, 1] must be
    /// handled by the implementation's addressing policy.
    fn sample(&self, u: f32, v: f32) -> Rgba;
}

/// Pixel-backed image with bilinear filtering and clamp-to-edge addressing.
#[derive(Debug, Clone)]
pub struct ImageSource {
    width: usize,
    height: usize,
    pixels: Vec<Rgba>,
}

impl ImageSource {
    /// Wrap a row-major pixel buffer.
    pub fn from_pixels(width: usize, height: usize, pixels: Vec<Rgba>) -> Result<Self> {
        if width == 0 || height == 0 || pixels.len() != width * height {
            return Err(WarpError::InvalidDimensions { width, height });
        }
        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    /// Convert a decoded image to normalized f32 channels. Values stay in the
    /// image's own encoding; no sRGB linearization is applied.
    pub fn from_image(img: &DynamicImage) -> Result<Self> {
        let rgba = img.to_rgba32f();
        let (width, height) = (rgba.width() as usize, rgba.height() as usize);
        let pixels = rgba
            .pixels()
            .map(|p| Rgba::new(p[0], p[1], p[2], p[3]))
            .collect();
        Self::from_pixels(width, height, pixels)
    }

    /// Load any format the `image` crate can decode.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let img = image::open(path)?;
        debug!(
            "loaded source {} ({}x{})",
            path.display(),
            img.width(),
            img.height()
        );
        Self::from_image(&img)
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Texel at integer coordinates, clamped to the image edge.
    #[inline]
    pub fn texel(&self, x: isize, y: isize) -> Rgba {
        let x = x.clamp(0, self.width as isize - 1) as usize;
        let y = y.clamp(0, self.height as isize - 1) as usize;
        self.pixels[y * self.width + x]
    }
}

impl SourceImage for ImageSource {
    fn sample(&self, u: f32, v: f32) -> Rgba {
        if !(u.is_finite() && v.is_finite()) {
            return Rgba::TRANSPARENT;
        }
        // Texel centers sit at half-integer positions
        let x = u * self.width as f32 - 0.5;
        let y = v * self.height as f32 - 0.5;
        let x0 = x.floor();
        let y0 = y.floor();
        let fx = x - x0;
        let fy = y - y0;
        let (xi, yi) = (x0 as isize, y0 as isize);

        let top = self.texel(xi, yi).mix(self.texel(xi + 1, yi), fx);
        let bottom = self.texel(xi, yi + 1).mix(self.texel(xi + 1, yi + 1), fx);
        top.mix(bottom, fy)
    }
}

/// Uniform color everywhere.
#[derive(Debug, Clone, Copy)]
pub struct Solid(pub Rgba);

impl SourceImage for Solid {
    fn sample(&self, _u: f32, _v: f32) -> Rgba {
        self.0
    }
}

/// Procedural checkerboard, handy for visualizing distortion.
#[derive(Debug, Clone, Copy)]
pub struct Checkerboard {
    /// Squares per unit of UV.
    pub cells: f32,
    pub even: Rgba,
    pub odd: Rgba,
}

impl Default for Checkerboard {
    fn default() -> Self {
        Self {
            cells: 16.0,
            even: Rgba::new(0.9, 0.9, 0.9, 1.0),
            odd: Rgba::new(0.1, 0.1, 0.15, 1.0),
        }
    }
}

impl SourceImage for Checkerboard {
    fn sample(&self, u: f32, v: f32) -> Rgba {
        let cx = (u * self.cells).floor() as i64;
        let cy = (v * self.cells).floor() as i64;
        if (cx + cy).rem_euclid(2) == 0 {
            self.even
        } else {
            self.odd
        }
    }
}
