//! Secondary (non-diegetic) UI output surface
//!
//! The outer UI can show the render texture on a flat overlay canvas. The
//! canvas is owned by the outer UI and handed to the render target at
//! construction; the render target only queries it and points its raw image
//! at the current texture.

use std::cell::RefCell;
use std::rc::Rc;

use super::backend::{RenderTextureHandle, UIRenderBackend};
use crate::foundation::math::Vec2;

/// Output surface shared between the outer UI and the render target
pub type SharedOutputSurface = Rc<RefCell<dyn OutputSurface>>;

/// Image component displaying a texture on an output canvas
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct RawImage {
    /// Texture currently displayed
    pub texture: Option<RenderTextureHandle>,
    /// Displayed size in pixels
    pub size: Vec2,
}

impl RawImage {
    /// Size the image to its texture's native dimensions
    ///
    /// Leaves the size unchanged if there is no texture or the backend does
    /// not know it.
    pub fn set_native_size(&mut self, backend: &dyn UIRenderBackend) {
        if let Some((width, height)) = self.texture.and_then(|texture| backend.texture_size(texture)) {
            self.size = Vec2::new(width as f32, height as f32);
        }
    }
}

/// A surface the UI render texture can be mirrored onto
pub trait OutputSurface {
    /// Whether the surface and all of its parents are active
    fn is_active_in_hierarchy(&self) -> bool;

    /// Raw image component, if the surface has one
    fn raw_image(&self) -> Option<&RawImage>;

    /// Mutable raw image component, if the surface has one
    fn raw_image_mut(&mut self) -> Option<&mut RawImage>;
}

/// Stock output canvas with an optional raw image component
#[derive(Debug, Clone)]
pub struct OutputCanvas {
    active: bool,
    raw_image: Option<RawImage>,
}

impl OutputCanvas {
    /// Active canvas with an empty raw image component
    pub fn new() -> Self {
        Self {
            active: true,
            raw_image: Some(RawImage::default()),
        }
    }

    /// Active canvas without any raw image component
    pub fn without_raw_image() -> Self {
        Self {
            active: true,
            raw_image: None,
        }
    }

    /// Wrap into the shared form expected by the render target
    pub fn into_shared(self) -> SharedOutputSurface {
        Rc::new(RefCell::new(self))
    }

    /// Activate or deactivate the canvas
    pub fn set_active(&mut self, active: bool) {
        self.active = active;
    }
}

impl Default for OutputCanvas {
    fn default() -> Self {
        Self::new()
    }
}

impl OutputSurface for OutputCanvas {
    fn is_active_in_hierarchy(&self) -> bool {
        self.active
    }

    fn raw_image(&self) -> Option<&RawImage> {
        self.raw_image.as_ref()
    }

    fn raw_image_mut(&mut self) -> Option<&mut RawImage> {
        self.raw_image.as_mut()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::{RenderTextureDesc, RenderTextureFormat, SoftwareBackend, SoftwareBackendConfig};

    #[test]
    fn test_set_native_size() {
        let mut backend = SoftwareBackend::new(&SoftwareBackendConfig::default());
        let texture = backend
            .create_render_texture(&RenderTextureDesc {
                name: "native".to_string(),
                width: 64,
                height: 32,
                depth_bits: 0,
                format: RenderTextureFormat::Argb32,
            })
            .unwrap();

        let mut image = RawImage { texture: Some(texture), size: Vec2::zeros() };
        image.set_native_size(&backend);
        assert_eq!(image.size, Vec2::new(64.0, 32.0));
    }

    #[test]
    fn test_set_native_size_without_texture() {
        let backend = SoftwareBackend::new(&SoftwareBackendConfig::default());
        let mut image = RawImage { texture: None, size: Vec2::new(5.0, 5.0) };
        image.set_native_size(&backend);
        assert_eq!(image.size, Vec2::new(5.0, 5.0));
    }

    #[test]
    fn test_canvas_components() {
        let mut canvas = OutputCanvas::new();
        assert!(canvas.is_active_in_hierarchy());
        assert!(canvas.raw_image().is_some());

        canvas.set_active(false);
        assert!(!canvas.is_active_in_hierarchy());

        assert!(OutputCanvas::without_raw_image().raw_image().is_none());
    }
}
