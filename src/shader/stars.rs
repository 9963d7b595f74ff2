//! Procedural starfield.
//!
//! Stars are sparse lattice cells whose hash clears a high threshold.
//! Three cell sizes give small, medium and large stars.

use super::blend::step;
use super::noise::hash;

/// Hash value a cell must reach to light up.
pub const STAR_THRESHOLD: f32 = 0.98;

/// (cells per unit, brightness) from small to large stars.
const LAYERS: [(f32, f32); 3] = [(500.0, 0.4), (200.0, 0.7), (100.0, 1.0)];

/// Star intensity at a coordinate.
///
/// Each layer hashes the integer cell containing `uv * scale + seed`, so a
/// star covers a whole cell and stays put between frames. The weighted sum
/// is unbounded above 1 where layers overlap; callers clamp.
pub fn stars(u: f32, v: f32, seed: f32) -> f32 {
    LAYERS
        .iter()
        .map(|&(scale, weight)| {
            let cx = (u * scale + seed).floor();
            let cy = (v * scale + seed).floor();
            step(STAR_THRESHOLD, hash(cx, cy)) * weight
        })
        .sum()
}
