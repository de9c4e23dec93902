use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, Deserialize, PartialEq, Serialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Number of rays traced per pixel path, counting the primary ray. Zero renders black.
    pub max_bounce_depth: u32,
    /// Fraction of light kept at each diffuse bounce.
    pub scatter_attenuation: f32,
    /// Also multiply attenuation by the color of each voxel hit.
    pub tint_with_palette: bool,
    /// Weight of the reprojected history in the resolved output, in [0, 1].
    pub history_blend: f32,
    pub clip_near: f32,
    pub clip_far: f32,
    pub jitter: JitterConfig,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            max_bounce_depth: 2,
            scatter_attenuation: 0.5,
            tint_with_palette: false,
            history_blend: 0.9,
            clip_near: 0.1,
            clip_far: 100.0,
            jitter: JitterConfig::default(),
        }
    }
}

impl RenderConfig {
    /// Same config with out-of-range values pulled back into range.
    pub fn sanitized(mut self) -> Self {
        if !(0.0..=1.0).contains(&self.history_blend) {
            log::warn!("Clamping history_blend {} into [0, 1]", self.history_blend);
            self.history_blend = self.history_blend.clamp(0.0, 1.0);
        }
        if !(self.clip_near > 0.0 && self.clip_far > self.clip_near) {
            let default = Self::default();
            log::warn!(
                "Ignoring invalid clip planes {}..{}",
                self.clip_near,
                self.clip_far
            );
            self.clip_near = default.clip_near;
            self.clip_far = default.clip_far;
        }
        self
    }
}

/// Sub-pixel camera offsets that vary from frame to frame.
#[derive(Clone, Copy, Debug, Deserialize, PartialEq, Serialize)]
#[serde(default)]
pub struct JitterConfig {
    pub enabled: bool,
    pub seed: u64,
    /// Jitter values are drawn from `[-amplitude, amplitude]`, in pixels.
    pub amplitude: f32,
}

impl Default for JitterConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            seed: 0,
            amplitude: 1.0,
        }
    }
}
