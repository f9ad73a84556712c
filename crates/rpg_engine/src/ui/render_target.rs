//! UI Render Target
//!
//! Owns the off-screen texture the user interface draws into. The texture
//! tracks the screen size, is cleared once per repaint, and can be mirrored
//! onto a secondary output canvas.
//!
//! Nothing here reports errors to the caller. A missing or unallocated
//! texture turns every draw into a no-op and allocation is retried on the
//! next frame; the worst case is a blank UI frame.

use std::cell::RefMut;

use super::backend::{
    ActiveTargetScope, RenderTextureDesc, RenderTextureHandle, SourceTexture, UIRenderBackend,
};
use super::config::RenderTargetConfig;
use super::output::{RawImage, SharedOutputSurface};
use super::scale_mode::ScaleMode;
use crate::events::{Event, EventArg, EventHandler, EventSystem, EventType, HandlerId};
use crate::foundation::math::Rect;

/// Kind of GUI pass the host is running
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GuiEventType {
    /// Layout pass
    Layout,
    /// Repaint pass (one per frame)
    Repaint,
    /// Mouse button pressed
    MouseDown,
    /// Mouse button released
    MouseUp,
    /// Key pressed
    KeyDown,
    /// Key released
    KeyUp,
}

/// Off-screen render target for the user interface
pub struct UIRenderTarget {
    config: RenderTargetConfig,

    /// Creation counter, only used for naming
    create_count: u64,

    target_texture: Option<RenderTextureHandle>,
    target_rect: Rect,

    /// Secondary output canvas (owned by the outer UI)
    output: Option<SharedOutputSurface>,

    events: EventSystem,

    /// Frames seen through `update`
    frame: u64,

    /// Last size that failed to allocate, to avoid repeating the warning every frame
    failed_size: Option<(u32, u32)>,
}

impl UIRenderTarget {
    /// Create a render target; no texture is allocated until `awake` or `update`
    pub fn new(config: RenderTargetConfig, output: Option<SharedOutputSurface>) -> Self {
        Self {
            config,
            create_count: 0,
            target_texture: None,
            target_rect: Rect::default(),
            output,
            events: EventSystem::new(),
            frame: 0,
            failed_size: None,
        }
    }

    // ===== LIFECYCLE =====

    /// First activation: allocate the texture and mirror it to the output canvas
    pub fn awake(&mut self, backend: &mut dyn UIRenderBackend) {
        self.check_target_texture(backend);
        self.update_non_diegetic_output(backend);
    }

    /// Per-frame refresh; reallocates the texture if the screen size changed
    pub fn update(&mut self, backend: &mut dyn UIRenderBackend) {
        self.frame += 1;
        self.check_target_texture(backend);
    }

    /// GUI pass hook; clears the texture once per frame on repaint
    pub fn on_gui(&mut self, backend: &mut dyn UIRenderBackend, event: GuiEventType) {
        if event != GuiEventType::Repaint {
            return;
        }

        if self.is_ready(backend) {
            self.clear(backend);
        }
    }

    /// Explicitly free the texture (for shutdown)
    ///
    /// The next `update` allocates a fresh texture.
    pub fn release(&mut self, backend: &mut dyn UIRenderBackend) {
        let Some(texture) = self.target_texture.take() else {
            return;
        };

        backend.release_render_texture(texture);
        self.target_rect = Rect::default();
        self.update_non_diegetic_output(backend);

        log::debug!("Released UI render texture");
        self.events.emit(&Event::new(EventType::RenderTargetReleased, self.frame));
    }

    // ===== QUERIES =====

    /// Current render texture, if one has been allocated
    pub fn target_texture(&self) -> Option<RenderTextureHandle> {
        self.target_texture
    }

    /// Extent of the render texture (`0, 0, width, height`)
    pub fn target_rect(&self) -> Rect {
        self.target_rect
    }

    /// Number of textures created so far
    pub fn create_count(&self) -> u64 {
        self.create_count
    }

    /// GUI depth the host should draw this target's clear at
    pub fn gui_depth(&self) -> i32 {
        self.config.gui_depth
    }

    /// True if a texture is held and the backend has it allocated
    pub fn is_ready(&self, backend: &dyn UIRenderBackend) -> bool {
        self.target_texture.is_some_and(|texture| backend.is_created(texture))
    }

    /// Raw image of the output canvas, if the canvas exists, is active and has one
    ///
    /// Returns a copy; edits to it do not reach the canvas. Use
    /// [`diegetic_canvas_raw_image_mut`](Self::diegetic_canvas_raw_image_mut) for that.
    pub fn diegetic_canvas_raw_image(&self) -> Option<RawImage> {
        let output = self.output.as_ref()?;
        let output = output.borrow();

        if !output.is_active_in_hierarchy() {
            return None;
        }

        output.raw_image().copied()
    }

    /// Mutable raw image of the output canvas, under the same conditions
    ///
    /// The guard borrows the shared canvas; drop it before the next `update`.
    pub fn diegetic_canvas_raw_image_mut(&self) -> Option<RefMut<'_, RawImage>> {
        let output = self.output.as_ref()?;
        if !output.borrow().is_active_in_hierarchy() {
            return None;
        }

        RefMut::filter_map(output.borrow_mut(), |output| output.raw_image_mut()).ok()
    }

    // ===== EVENTS =====

    /// Subscribe to texture (re)creation
    pub fn on_create_target_texture(&mut self, handler: impl EventHandler + 'static) -> HandlerId {
        self.events.register_handler(EventType::RenderTargetCreated, Box::new(handler))
    }

    /// Subscribe to explicit texture release
    pub fn on_release_target_texture(&mut self, handler: impl EventHandler + 'static) -> HandlerId {
        self.events.register_handler(EventType::RenderTargetReleased, Box::new(handler))
    }

    /// Remove a subscription
    pub fn unsubscribe(&mut self, id: HandlerId) -> bool {
        self.events.unregister_handler(id)
    }

    // ===== DRAWING =====

    /// Clear the texture to the configured clear color (transparent by default)
    pub fn clear(&self, backend: &mut dyn UIRenderBackend) {
        let color = self.config.clear_color();
        self.with_active_target(backend, |target| target.clear(true, true, color));
    }

    /// Draw an image stretched over `position`
    pub fn draw_texture(&self, backend: &mut dyn UIRenderBackend, position: Rect, image: impl Into<SourceTexture>) {
        self.draw_texture_scaled(backend, position, image, ScaleMode::StretchToFill, true, 0.0);
    }

    /// Draw an image into `position` using a scale mode
    ///
    /// `image_aspect` overrides the image's own aspect when positive.
    pub fn draw_texture_scaled(
        &self,
        backend: &mut dyn UIRenderBackend,
        position: Rect,
        image: impl Into<SourceTexture>,
        scale_mode: ScaleMode,
        alpha_blend: bool,
        image_aspect: f32,
    ) {
        let image = image.into();
        self.with_active_target(backend, |target| {
            let aspect = if image_aspect > 0.0 {
                image_aspect
            } else {
                target
                    .source_size(image)
                    .filter(|&(_, height)| height > 0)
                    .map_or(0.0, |(width, height)| width as f32 / height as f32)
            };

            let (screen, source) = scale_mode.calculate(position, aspect);
            target.draw_texture(screen, image, source, alpha_blend);
        });
    }

    /// Draw a sub-rectangle of an image (normalized `tex_coords`) into `position`
    pub fn draw_texture_with_tex_coords(
        &self,
        backend: &mut dyn UIRenderBackend,
        position: Rect,
        image: impl Into<SourceTexture>,
        tex_coords: Rect,
        alpha_blend: bool,
    ) {
        let image = image.into();
        self.with_active_target(backend, |target| {
            target.draw_texture(position, image, tex_coords, alpha_blend);
        });
    }

    /// Run `op` with this texture as the active render target, restoring the
    /// previous target afterwards. Skipped while not ready.
    fn with_active_target(&self, backend: &mut dyn UIRenderBackend, op: impl FnOnce(&mut dyn UIRenderBackend)) {
        let Some(texture) = self.target_texture.filter(|&texture| backend.is_created(texture)) else {
            log::trace!("UI render target not ready, skipping draw");
            return;
        };

        let mut scope = ActiveTargetScope::enter(backend, texture);
        op(&mut *scope);
    }

    // ===== RENDER TEXTURE MANAGEMENT =====

    /// Make sure the texture exists and matches the screen size
    fn check_target_texture(&mut self, backend: &mut dyn UIRenderBackend) {
        let (width, height) = backend.screen_size();

        // Minimised windows report no area; keep whatever we have
        if width == 0 || height == 0 {
            log::trace!("Screen has no area ({}x{}), keeping current UI texture", width, height);
            return;
        }

        if let Some(texture) = self.target_texture {
            if backend.is_created(texture) && backend.texture_size(texture) == Some((width, height)) {
                return;
            }
        }

        // Release the old texture before replacing it
        if let Some(old) = self.target_texture.take() {
            backend.release_render_texture(old);
            self.target_rect = Rect::default();
        }

        let desc = RenderTextureDesc {
            name: format!("{} {}", self.config.name_prefix, self.create_count),
            width,
            height,
            depth_bits: self.config.depth_bits,
            format: self.config.format,
        };

        match backend.create_render_texture(&desc) {
            Ok(texture) => {
                self.target_texture = Some(texture);
                self.target_rect = Rect::from_size(width as f32, height as f32);
                self.failed_size = None;
                let generation = self.create_count;
                self.create_count += 1;

                self.update_non_diegetic_output(backend);
                self.raise_on_create_target_texture(&desc.name, width, height, generation);
                log::info!("Created UI RenderTexture with dimensions {}, {}", width, height);
            }
            Err(e) => {
                if self.failed_size == Some((width, height)) {
                    log::debug!("UI render texture allocation still failing: {}", e);
                } else {
                    log::warn!("Failed to create UI render texture {}x{}: {}", width, height, e);
                    self.failed_size = Some((width, height));
                }
                self.update_non_diegetic_output(backend);
            }
        }
    }

    /// Point the output canvas raw image at the current texture
    fn update_non_diegetic_output(&self, backend: &dyn UIRenderBackend) {
        let Some(output) = self.output.as_ref() else {
            return;
        };
        let mut output = output.borrow_mut();

        if !output.is_active_in_hierarchy() {
            return;
        }

        if let Some(raw_image) = output.raw_image_mut() {
            raw_image.texture = self.target_texture;
            raw_image.set_native_size(backend);
        }
    }

    fn raise_on_create_target_texture(&mut self, name: &str, width: u32, height: u32, generation: u64) {
        let event = Event::new(EventType::RenderTargetCreated, self.frame)
            .with_arg("size", EventArg::Size(width, height))
            .with_arg("generation", EventArg::Generation(generation))
            .with_arg("name", EventArg::Name(name.to_string()));
        self.events.emit(&event);
    }
}
