//! UI render target and backend settings

use serde::{Deserialize, Serialize};

use super::backend::RenderTextureFormat;
use crate::foundation::math::{self, Vec4};

/// Settings for [`UIRenderTarget`](super::UIRenderTarget)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderTargetConfig {
    /// Texture names are `"{name_prefix} {creation_count}"`
    pub name_prefix: String,
    /// Depth buffer bits (0 = no depth buffer)
    pub depth_bits: u32,
    /// Pixel format of the render texture
    pub format: RenderTextureFormat,
    /// Color used by the per-frame clear (RGBA, 0..1)
    pub clear_color: [f32; 4],
    /// GUI depth reported to the host; higher values draw further behind
    pub gui_depth: i32,
}

impl RenderTargetConfig {
    /// Clear color as a vector
    pub fn clear_color(&self) -> Vec4 {
        Vec4::from(self.clear_color)
    }
}

impl Default for RenderTargetConfig {
    fn default() -> Self {
        Self {
            name_prefix: "DaggerfallUI RenderTexture".to_string(),
            depth_bits: 0,
            format: RenderTextureFormat::Argb32,
            clear_color: math::clear_color().into(),
            gui_depth: 10,
        }
    }
}

/// Settings for [`SoftwareBackend`](super::SoftwareBackend)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SoftwareBackendConfig {
    /// Initial screen width in pixels
    pub screen_width: u32,
    /// Initial screen height in pixels
    pub screen_height: u32,
    /// Largest accepted render texture edge in pixels
    pub max_texture_size: u32,
}

impl Default for SoftwareBackendConfig {
    fn default() -> Self {
        Self {
            screen_width: 1280,
            screen_height: 720,
            max_texture_size: 8192,
        }
    }
}
