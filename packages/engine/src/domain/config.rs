//! World configuration surface.
//!
//! Serialized as camelCase JSON so the browser host can ship the same
//! document it uses for its own UI state.

use serde::{Deserialize, Serialize};

use crate::common::{EngineError, EngineResult};
use crate::spatial::chunks::ChunkLayout;

/// Salt mixed into every chunk's tie-break generator unless overridden.
pub const DEFAULT_RNG_SALT: u64 = 0x5EED_0F5A_4D5A_17ED;

/// Optional transition-rule capabilities.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RuleOptions {
    /// Sand sinks into Water beneath it (swap) instead of resting on it.
    #[serde(default)]
    pub sand_displaces_water: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderOptions {
    /// Darken chunks whose physics is asleep (debug view).
    #[serde(default)]
    pub tint_sleeping_chunks: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorldConfig {
    pub chunks_wide: u32,
    pub chunks_tall: u32,
    pub chunk_size: u32,
    #[serde(default = "default_rng_salt")]
    pub rng_salt: u64,
    #[serde(default)]
    pub rules: RuleOptions,
    /// Edits and changes on a chunk border also keep the neighbouring chunk awake.
    #[serde(default)]
    pub wake_adjacent_chunks: bool,
    #[serde(default)]
    pub render: RenderOptions,
}

fn default_rng_salt() -> u64 {
    DEFAULT_RNG_SALT
}

impl WorldConfig {
    pub fn new(chunks_wide: u32, chunks_tall: u32, chunk_size: u32) -> Self {
        Self {
            chunks_wide,
            chunks_tall,
            chunk_size,
            rng_salt: DEFAULT_RNG_SALT,
            rules: RuleOptions::default(),
            wake_adjacent_chunks: false,
            render: RenderOptions::default(),
        }
    }

    /// Build a config from pixel dimensions, which must tile exactly.
    pub fn from_pixel_dimensions(width: u32, height: u32, chunk_size: u32) -> EngineResult<Self> {
        if chunk_size == 0 {
            return Err(EngineError::ZeroDimension { field: "chunkSize" });
        }
        if width == 0 {
            return Err(EngineError::ZeroDimension { field: "width" });
        }
        if height == 0 {
            return Err(EngineError::ZeroDimension { field: "height" });
        }
        if width % chunk_size != 0 || height % chunk_size != 0 {
            return Err(EngineError::NotChunkAligned {
                width,
                height,
                chunk_size,
            });
        }
        Ok(Self::new(width / chunk_size, height / chunk_size, chunk_size))
    }

    pub fn from_json(json: &str) -> EngineResult<Self> {
        let config: WorldConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| "{}".to_string())
    }

    pub fn with_rng_salt(mut self, salt: u64) -> Self {
        self.rng_salt = salt;
        self
    }

    pub fn with_rules(mut self, rules: RuleOptions) -> Self {
        self.rules = rules;
        self
    }

    pub fn with_wake_adjacent_chunks(mut self, enabled: bool) -> Self {
        self.wake_adjacent_chunks = enabled;
        self
    }

    pub fn with_render(mut self, render: RenderOptions) -> Self {
        self.render = render;
        self
    }

    /// Check the geometry without building anything.
    pub fn validate(&self) -> EngineResult<()> {
        self.layout().map(|_| ())
    }

    pub(crate) fn layout(&self) -> EngineResult<ChunkLayout> {
        ChunkLayout::new(self.chunks_wide, self.chunks_tall, self.chunk_size)
    }
}
