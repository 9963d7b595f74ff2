//! # Shader Primitives Library
//!
//! Reusable building blocks for the effect compositors. These functions
//! mirror common operations found in fragment shaders: every one is a pure
//! function of its arguments.
//!
//! ## Categories
//!
//! - [`noise`]: Hash, value noise, fractal noise
//! - [`distort`]: Gravitational pull and swirl, exponential falloff
//! - [`stars`]: Procedural starfield
//! - [`distance`]: Euclidean distance, segment projection
//! - [`transform`]: Rotation, pixel to UV mapping, polar conversion
//! - [`blend`]: Linear interpolation, smoothstep, step, Gaussian band
//! - [`adjust`]: Clamping and quantization
//! - [`color`]: RGB/RGBA sample types
//!
//! ## Example
//!
//! ```rust
//! use warpfield::shader::*;
//!
//! fn ring(u: f32, v: f32) -> f32 {
//!     let r = dist(u, v, 0.5, 0.5);
//!     let wobble = fractal_noise(u * 8.0, v * 8.0, 3) * 0.02;
//!     band(r + wobble, 0.3, 0.01)
//! }
//!
//! assert!(ring(0.5, 0.5) < 0.01);
//! ```

pub mod adjust;
pub mod blend;
pub mod color;
pub mod distance;
pub mod distort;
pub mod noise;
pub mod stars;
pub mod transform;

// Re-export all primitives at the top level for convenience
pub use adjust::*;
pub use blend::*;
pub use color::*;
pub use distance::*;
pub use distort::*;
pub use noise::*;
pub use stars::*;
pub use transform::*;
