//! Frame driver.
//!
//! Evaluates an effect once per pixel and collects the results into a
//! [`Frame`]. Rows are independent, so they are filled in parallel with
//! rayon; the effect and source are only ever borrowed immutably.

use std::path::Path;
use std::time::Instant;

use image::RgbaImage;
use log::{debug, info};
use rayon::prelude::*;

use crate::effects::EffectParams;
use crate::error::{Result, WarpError};
use crate::shader::{Rgba, pixel_to_uv, quantize_u8};
use crate::source::SourceImage;

/// Row-major buffer of samples, row 0 at the top.
#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    pub width: usize,
    pub height: usize,
    pub pixels: Vec<Rgba>,
}

impl Frame {
    /// Sample at pixel `(x, y)`, or `None` outside the frame.
    pub fn get(&self, x: usize, y: usize) -> Option<Rgba> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.pixels.get(y * self.width + x).copied()
    }

    /// Quantize to 8-bit RGBA.
    pub fn to_image(&self) -> RgbaImage {
        let mut img = RgbaImage::new(self.width as u32, self.height as u32);
        for (dst, px) in img.pixels_mut().zip(&self.pixels) {
            *dst = image::Rgba([
                quantize_u8(px.r),
                quantize_u8(px.g),
                quantize_u8(px.b),
                quantize_u8(px.a),
            ]);
        }
        img
    }

    pub fn save_png(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        self.to_image().save(path)?;
        debug!("wrote {}", path.display());
        Ok(())
    }
}

fn check_dimensions(width: usize, height: usize) -> Result<()> {
    // image buffers are addressed with u32
    if width == 0 || height == 0 || width > u32::MAX as usize || height > u32::MAX as usize {
        return Err(WarpError::InvalidDimensions { width, height });
    }
    Ok(())
}

/// Render one frame.
///
/// Parameters are validated once up front; after that every pixel is
/// evaluated with the same immutable parameter block. Effects that read a
/// source image fail with [`WarpError::MissingSource`] when none is given.
pub fn render(
    params: &EffectParams,
    width: usize,
    height: usize,
    source: Option<&dyn SourceImage>,
) -> Result<Frame> {
    check_dimensions(width, height)?;
    params.validate()?;
    if params.needs_source() && source.is_none() {
        return Err(WarpError::MissingSource(params.name()));
    }

    let started = Instant::now();
    let mut pixels = vec![Rgba::TRANSPARENT; width * height];
    pixels
        .par_chunks_mut(width)
        .enumerate()
        .for_each(|(y, row)| {
            for (x, out) in row.iter_mut().enumerate() {
                let (u, v) = pixel_to_uv(x, y, width, height);
                *out = params.sample(u, v, source);
            }
        });

    info!(
        "rendered {} {}x{} t={:.2} in {:.1}ms",
        params.name(),
        width,
        height,
        params.time(),
        started.elapsed().as_secs_f64() * 1000.0
    );

    Ok(Frame {
        width,
        height,
        pixels,
    })
}

/// Render `count` frames starting at `start_time`, `1 / fps` seconds apart,
/// handing each one to `sink` as soon as it is finished.
///
/// Only one frame is alive at a time. The first error from rendering or
/// from `sink` stops the sequence; frames already delivered are kept by the
/// sink.
pub fn for_each_frame<F>(
    params: &EffectParams,
    width: usize,
    height: usize,
    source: Option<&dyn SourceImage>,
    start_time: f32,
    fps: f32,
    count: usize,
    mut sink: F,
) -> Result<()>
where
    F: FnMut(usize, Frame) -> Result<()>,
{
    if !(fps.is_finite() && fps > 0.0) {
        return Err(WarpError::invalid(params.name(), "fps must be positive"));
    }
    for i in 0..count {
        let t = start_time + i as f32 / fps;
        let frame = render(&params.at_time(t), width, height, source)?;
        sink(i, frame)?;
    }
    Ok(())
}

/// Render a whole sequence into memory. See [`for_each_frame`] for long
/// sequences.
pub fn render_sequence(
    params: &EffectParams,
    width: usize,
    height: usize,
    source: Option<&dyn SourceImage>,
    start_time: f32,
    fps: f32,
    count: usize,
) -> Result<Vec<Frame>> {
    let mut frames = Vec::with_capacity(count);
    for_each_frame(params, width, height, source, start_time, fps, count, |_, frame| {
        frames.push(frame);
        Ok(())
    })?;
    Ok(frames)
}
