//! # Rendering Module
//!
//! Drives an effect over a pixel grid.
//!
//! ## Usage Example
//!
//! ```
//! use warpfield::effects::EffectParams;
//! use warpfield::render::render;
//!
//! let params = EffectParams::by_name("black_hole")?.at_time(1.5);
//! let frame = render(&params, 64, 48, None)?;
//! assert_eq!(frame.pixels.len(), 64 * 48);
//! # Ok::<(), warpfield::WarpError>(())
//! ```

pub mod frame;

pub use frame::{Frame, for_each_frame, render, render_sequence};
