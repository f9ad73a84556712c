//! UI Render Backend Trait
//!
//! Defines the interface between the UI layer and the host drawing API.
//! Keeps the render target independent of any particular graphics backend.

use std::ops::{Deref, DerefMut};

use serde::{Deserialize, Serialize};
use slotmap::new_key_type;

use crate::foundation::math::{Rect, Vec4};

new_key_type! {
    /// Handle to a render texture owned by a backend
    pub struct RenderTextureHandle;

    /// Handle to a drawable source image owned by a backend
    pub struct ImageHandle;
}

/// Anything that can be drawn into a render target
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SourceTexture {
    /// A plain uploaded image
    Image(ImageHandle),
    /// Another render texture
    RenderTexture(RenderTextureHandle),
}

impl From<ImageHandle> for SourceTexture {
    fn from(handle: ImageHandle) -> Self {
        Self::Image(handle)
    }
}

impl From<RenderTextureHandle> for SourceTexture {
    fn from(handle: RenderTextureHandle) -> Self {
        Self::RenderTexture(handle)
    }
}

/// Render texture pixel format
///
/// Decides the channel order of pixel data read back from a texture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum RenderTextureFormat {
    /// 8 bits per channel, alpha first
    #[default]
    Argb32,
    /// 8 bits per channel, alpha last
    Rgba32,
}

impl RenderTextureFormat {
    /// Reorder one RGBA pixel into this format's channel order
    pub fn reorder_rgba(self, [r, g, b, a]: [u8; 4]) -> [u8; 4] {
        match self {
            Self::Argb32 => [a, r, g, b],
            Self::Rgba32 => [r, g, b, a],
        }
    }
}

/// Descriptor for creating a render texture
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderTextureDesc {
    /// Debug name
    pub name: String,
    /// Width in pixels
    pub width: u32,
    /// Height in pixels
    pub height: u32,
    /// Depth buffer bits (0 = none)
    pub depth_bits: u32,
    /// Pixel format
    pub format: RenderTextureFormat,
}

/// Errors reported by a UI backend
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum BackendError {
    /// Zero-sized texture requested
    #[error("Invalid texture dimensions {width}x{height}")]
    InvalidDimensions {
        /// Requested width
        width: u32,
        /// Requested height
        height: u32,
    },

    /// Texture larger than the backend supports
    #[error("Texture {width}x{height} exceeds maximum size {max}")]
    TextureTooLarge {
        /// Requested width
        width: u32,
        /// Requested height
        height: u32,
        /// Largest supported edge
        max: u32,
    },

    /// Handle does not refer to a live resource
    #[error("Invalid resource handle")]
    InvalidHandle,

    /// Reading back or writing out texture data failed
    #[error("Export failed: {0}")]
    Export(String),
}

/// Backend-agnostic host drawing interface
///
/// Models the host's 2D drawing primitives, its render texture resources and
/// the global "active render target" slot. Drawing and clearing act on the
/// active render target; `None` means the screen.
pub trait UIRenderBackend {
    /// Current display surface size in pixels
    fn screen_size(&self) -> (u32, u32);

    /// Allocate a render texture
    fn create_render_texture(&mut self, desc: &RenderTextureDesc) -> Result<RenderTextureHandle, BackendError>;

    /// Free a render texture (unknown handles are ignored)
    fn release_render_texture(&mut self, texture: RenderTextureHandle);

    /// True if the texture exists and its storage is allocated
    fn is_created(&self, texture: RenderTextureHandle) -> bool;

    /// Size of a render texture, `None` for unknown handles
    fn texture_size(&self, texture: RenderTextureHandle) -> Option<(u32, u32)>;

    /// Size of any drawable source, `None` for unknown handles
    fn source_size(&self, source: SourceTexture) -> Option<(u32, u32)>;

    /// Currently active render target (`None` = screen)
    fn active_render_target(&self) -> Option<RenderTextureHandle>;

    /// Redirect drawing to a render target (`None` = screen)
    fn set_active_render_target(&mut self, target: Option<RenderTextureHandle>);

    /// Clear the active render target
    fn clear(&mut self, clear_depth: bool, clear_color: bool, color: Vec4);

    /// Draw `tex_coords` of `source` (normalized, origin top-left) into `position`
    /// on the active render target
    fn draw_texture(&mut self, position: Rect, source: SourceTexture, tex_coords: Rect, alpha_blend: bool);
}

/// Redirects a backend's active render target for the lifetime of the scope
///
/// The previously active target is restored when the scope is dropped, so
/// unrelated rendering never sees the redirection.
pub struct ActiveTargetScope<'a, B: UIRenderBackend + ?Sized> {
    backend: &'a mut B,
    previous: Option<RenderTextureHandle>,
}

impl<'a, B: UIRenderBackend + ?Sized> ActiveTargetScope<'a, B> {
    /// Save the current target and make `target` active
    pub fn enter(backend: &'a mut B, target: RenderTextureHandle) -> Self {
        let previous = backend.active_render_target();
        backend.set_active_render_target(Some(target));
        Self { backend, previous }
    }

    /// Target that will be restored on drop
    pub fn previous(&self) -> Option<RenderTextureHandle> {
        self.previous
    }
}

impl<B: UIRenderBackend + ?Sized> Deref for ActiveTargetScope<'_, B> {
    type Target = B;

    fn deref(&self) -> &B {
        self.backend
    }
}

impl<B: UIRenderBackend + ?Sized> DerefMut for ActiveTargetScope<'_, B> {
    fn deref_mut(&mut self) -> &mut B {
        self.backend
    }
}

impl<B: UIRenderBackend + ?Sized> Drop for ActiveTargetScope<'_, B> {
    fn drop(&mut self) {
        self.backend.set_active_render_target(self.previous);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::{SoftwareBackend, SoftwareBackendConfig};

    fn desc(width: u32, height: u32) -> RenderTextureDesc {
        RenderTextureDesc {
            name: "scope test".to_string(),
            width,
            height,
            depth_bits: 0,
            format: RenderTextureFormat::Argb32,
        }
    }

    #[test]
    fn test_scope_restores_screen() {
        let mut backend = SoftwareBackend::new(&SoftwareBackendConfig::default());
        let texture = backend.create_render_texture(&desc(4, 4)).unwrap();

        {
            let scope = ActiveTargetScope::enter(&mut backend, texture);
            assert_eq!(scope.previous(), None);
            assert_eq!(scope.active_render_target(), Some(texture));
        }

        assert_eq!(backend.active_render_target(), None);
    }

    #[test]
    fn test_nested_scopes_restore_in_order() {
        let mut backend = SoftwareBackend::new(&SoftwareBackendConfig::default());
        let outer = backend.create_render_texture(&desc(4, 4)).unwrap();
        let inner = backend.create_render_texture(&desc(2, 2)).unwrap();

        {
            let mut outer_scope = ActiveTargetScope::enter(&mut backend, outer);
            {
                let inner_scope = ActiveTargetScope::enter(&mut *outer_scope, inner);
                assert_eq!(inner_scope.previous(), Some(outer));
                assert_eq!(inner_scope.active_render_target(), Some(inner));
            }
            assert_eq!(outer_scope.active_render_target(), Some(outer));
        }

        assert_eq!(backend.active_render_target(), None);
    }

    #[test]
    fn test_source_texture_from_handles() {
        let mut backend = SoftwareBackend::new(&SoftwareBackendConfig::default());
        let texture = backend.create_render_texture(&desc(3, 5)).unwrap();

        let source: SourceTexture = texture.into();
        assert_eq!(source, SourceTexture::RenderTexture(texture));
        assert_eq!(backend.source_size(source), Some((3, 5)));
    }

    #[test]
    fn test_format_channel_order() {
        assert_eq!(RenderTextureFormat::Argb32.reorder_rgba([1, 2, 3, 4]), [4, 1, 2, 3]);
        assert_eq!(RenderTextureFormat::Rgba32.reorder_rgba([1, 2, 3, 4]), [1, 2, 3, 4]);
    }
}
