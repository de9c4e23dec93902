use crate::coordinates::{ChunkBounds, CHUNK_MAX, CHUNK_MIN};
use crate::core::glam::Vec3A;

use serde::{Deserialize, Serialize};

/// Default cap on voxels sampled by one traversal.
pub const DEFAULT_MAX_TRAVERSAL_STEPS: u32 = 128;

#[derive(Clone, Copy, Debug, Deserialize, PartialEq, Serialize)]
#[serde(default)]
pub struct TraversalConfig {
    /// Upper bound on voxels sampled per ray. Running out counts as a miss.
    pub max_steps: u32,
}

impl Default for TraversalConfig {
    fn default() -> Self {
        Self {
            max_steps: DEFAULT_MAX_TRAVERSAL_STEPS,
        }
    }
}

#[derive(Clone, Copy, Debug, Deserialize, PartialEq, Serialize)]
#[serde(default)]
pub struct MapConfig {
    pub chunk_min: [f32; 3],
    pub chunk_max: [f32; 3],
    pub traversal: TraversalConfig,
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            chunk_min: CHUNK_MIN.to_array(),
            chunk_max: CHUNK_MAX.to_array(),
            traversal: TraversalConfig::default(),
        }
    }
}

impl MapConfig {
    /// Falls back to the default bounds (with a warning) if the configured ones are empty or inverted.
    pub fn bounds(&self) -> ChunkBounds {
        let (min, max) = (Vec3A::from(self.chunk_min), Vec3A::from(self.chunk_max));
        ChunkBounds::new(min, max).unwrap_or_else(|| {
            log::warn!(
                "Ignoring invalid chunk bounds {:?}..{:?}",
                self.chunk_min,
                self.chunk_max
            );
            ChunkBounds::default()
        })
    }
}
