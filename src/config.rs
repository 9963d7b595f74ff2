//! # Render Configuration
//!
//! JSON description of a render job: frame size, animation range and the
//! tagged effect parameters. Every field is optional.
//!
//! ```json
//! {
//!   "width": 800,
//!   "height": 600,
//!   "frames": 24,
//!   "fps": 12,
//!   "params": { "effect": "space_time_rip", "width": 6.0, "width_pulse": 0.2 }
//! }
//! ```

use std::path::Path;

use log::debug;
use serde::{Deserialize, Serialize};

use crate::effects::EffectParams;
use crate::error::Result;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Frame width in pixels. Default: 800
    pub width: usize,
    /// Frame height in pixels. Default: 600
    pub height: usize,
    /// Number of frames to render. Default: 1
    pub frames: usize,
    /// Frame rate for sequences. Default: 30
    pub fps: f32,
    /// Effect and its parameters. Default: black hole
    pub params: EffectParams,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            width: 800,
            height: 600,
            frames: 1,
            fps: 30.0,
            params: EffectParams::default(),
        }
    }
}

impl RenderConfig {
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)?;
        let config = Self::from_json(&text)?;
        debug!("loaded config {} ({})", path.display(), config.params.name());
        Ok(config)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
