//! # Warpfield - Procedural Screen-Space Effects
//!
//! Warpfield evaluates per-pixel effects the way a fragment shader would,
//! on the CPU. It provides:
//!
//! - **Shader primitives**: hashing, value/fractal noise, distortion field, starfield
//! - **Effects**: black hole, space-time rip, screen distortion, lensing
//! - **Frame driver**: parallel evaluation over a pixel grid, PNG output
//!
//! ## Quick Start
//!
//! ```no_run
//! use warpfield::{
//!     effects::{EffectParams, black_hole},
//!     render,
//! };
//!
//! let params = EffectParams::BlackHole(black_hole::Params {
//!     radius: 0.08,
//!     time: 2.0,
//!     ..Default::default()
//! });
//!
//! let frame = render::render(&params, 800, 600, None)?;
//! frame.save_png("black_hole.png")?;
//!
//! # Ok::<(), warpfield::WarpError>(())
//! ```
//!
//! ## Module Overview
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`shader`] | Pure per-pixel building blocks |
//! | [`effects`] | Effect compositors and their parameters |
//! | [`render`] | Frame driver |
//! | [`source`] | Images sampled by the resampling effects |
//! | [`config`] | JSON render jobs |
//! | [`error`] | Error types |
//!
//! ## Coordinates
//!
//! UV space runs from (0, 0) at the top-left to (1, 1) at the bottom-right.
//! Pixel `(x, y)` of a `w`×`h` frame is sampled at its center,
//! `((x + 0.5) / w, (y + 0.5) / h)`.

pub mod config;
pub mod effects;
pub mod error;
pub mod render;
pub mod shader;
pub mod source;

// Re-exports for convenience
pub use config::RenderConfig;
pub use effects::{Effect, EffectParams};
pub use error::WarpError;
pub use render::Frame;
