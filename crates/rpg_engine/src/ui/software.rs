//! CPU software backend
//!
//! Implements [`UIRenderBackend`] with RGBA8 pixel buffers so the UI render
//! target can run headless: in tests, in tools, and in the demo.

use std::borrow::Cow;
use std::path::Path;

use image::{Rgba, RgbaImage};
use slotmap::SlotMap;

use super::backend::{
    BackendError, ImageHandle, RenderTextureDesc, RenderTextureHandle, SourceTexture, UIRenderBackend,
};
use super::config::SoftwareBackendConfig;
use crate::assets::ImageData;
use crate::foundation::math::{color_to_rgba8, Rect, Vec2, Vec4};

/// Counters for verifying backend usage
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BackendStats {
    /// Render textures allocated
    pub textures_created: u64,
    /// Render textures released
    pub textures_released: u64,
    /// Clear calls
    pub clears: u64,
    /// Draw calls
    pub draws: u64,
}

struct SoftwareRenderTexture {
    desc: RenderTextureDesc,
    pixels: RgbaImage,
    /// Depth values, present when `depth_bits > 0`
    depth: Option<Vec<f32>>,
    /// False once the storage has been lost
    created: bool,
}

/// Headless UI backend drawing into CPU memory
pub struct SoftwareBackend {
    screen: RgbaImage,
    render_textures: SlotMap<RenderTextureHandle, SoftwareRenderTexture>,
    images: SlotMap<ImageHandle, RgbaImage>,
    active: Option<RenderTextureHandle>,
    max_texture_size: u32,
    stats: BackendStats,
}

impl SoftwareBackend {
    /// Create a backend with a screen of the configured size
    pub fn new(config: &SoftwareBackendConfig) -> Self {
        log::debug!(
            "Creating software UI backend: screen {}x{}, max texture {}",
            config.screen_width, config.screen_height, config.max_texture_size
        );

        Self {
            screen: RgbaImage::new(config.screen_width, config.screen_height),
            render_textures: SlotMap::with_key(),
            images: SlotMap::with_key(),
            active: None,
            max_texture_size: config.max_texture_size,
            stats: BackendStats::default(),
        }
    }

    /// Simulate a window resize; screen contents are discarded
    pub fn resize_screen(&mut self, width: u32, height: u32) {
        if self.screen.dimensions() != (width, height) {
            log::debug!("Screen resized to {}x{}", width, height);
            self.screen = RgbaImage::new(width, height);
        }
    }

    /// Upload a source image that can be drawn into render targets
    pub fn upload_image(&mut self, image: &ImageData) -> Result<ImageHandle, BackendError> {
        if image.width == 0 || image.height == 0 {
            return Err(BackendError::InvalidDimensions { width: image.width, height: image.height });
        }

        let pixels = RgbaImage::from_raw(image.width, image.height, image.data.clone())
            .ok_or(BackendError::InvalidDimensions { width: image.width, height: image.height })?;
        Ok(self.images.insert(pixels))
    }

    /// Free a source image
    pub fn release_image(&mut self, image: ImageHandle) {
        self.images.remove(image);
    }

    /// Drop a render texture's storage without freeing the handle, as a
    /// device loss would; `is_created` reports false afterwards
    pub fn invalidate_render_texture(&mut self, texture: RenderTextureHandle) {
        if let Some(texture) = self.render_textures.get_mut(texture) {
            log::debug!("Render texture '{}' lost its storage", texture.desc.name);
            texture.created = false;
            texture.pixels = RgbaImage::new(0, 0);
            texture.depth = None;
        }
    }

    /// Screen pixels (drawn when no render target is active)
    pub fn screen_pixels(&self) -> &RgbaImage {
        &self.screen
    }

    /// Pixels of a live render texture
    pub fn texture_pixels(&self, texture: RenderTextureHandle) -> Option<&RgbaImage> {
        self.render_textures
            .get(texture)
            .filter(|texture| texture.created)
            .map(|texture| &texture.pixels)
    }

    /// Read back a live render texture in its own pixel format
    ///
    /// `texture_pixels` and `save_png` always use RGBA order; this returns
    /// the bytes laid out as the texture's [`RenderTextureFormat`](super::RenderTextureFormat) says.
    pub fn read_pixels(&self, texture: RenderTextureHandle) -> Result<Vec<u8>, BackendError> {
        let texture = self
            .render_textures
            .get(texture)
            .filter(|texture| texture.created)
            .ok_or(BackendError::InvalidHandle)?;

        let format = texture.desc.format;
        Ok(texture.pixels.pixels().flat_map(|pixel| format.reorder_rgba(pixel.0)).collect())
    }

    /// Name the texture was created with
    pub fn texture_name(&self, texture: RenderTextureHandle) -> Option<&str> {
        self.render_textures.get(texture).map(|texture| texture.desc.name.as_str())
    }

    /// True if the texture was created with a depth buffer
    pub fn has_depth_buffer(&self, texture: RenderTextureHandle) -> bool {
        self.render_textures
            .get(texture)
            .is_some_and(|texture| texture.depth.is_some())
    }

    /// Render textures currently allocated (including lost ones not yet released)
    pub fn live_texture_count(&self) -> usize {
        self.render_textures.len()
    }

    /// Usage counters
    pub fn stats(&self) -> BackendStats {
        self.stats
    }

    /// Write a render texture to a PNG file
    pub fn save_png(&self, texture: RenderTextureHandle, path: impl AsRef<Path>) -> Result<(), BackendError> {
        let pixels = self.texture_pixels(texture).ok_or(BackendError::InvalidHandle)?;
        pixels
            .save_with_format(path.as_ref(), image::ImageFormat::Png)
            .map_err(|e| BackendError::Export(e.to_string()))?;

        log::info!("Saved render texture to {:?}", path.as_ref());
        Ok(())
    }

    fn source_pixels(&self, source: SourceTexture) -> Option<&RgbaImage> {
        match source {
            SourceTexture::Image(image) => self.images.get(image),
            SourceTexture::RenderTexture(texture) => self.texture_pixels(texture),
        }
    }
}

impl UIRenderBackend for SoftwareBackend {
    fn screen_size(&self) -> (u32, u32) {
        self.screen.dimensions()
    }

    fn create_render_texture(&mut self, desc: &RenderTextureDesc) -> Result<RenderTextureHandle, BackendError> {
        if desc.width == 0 || desc.height == 0 {
            return Err(BackendError::InvalidDimensions { width: desc.width, height: desc.height });
        }
        if desc.width > self.max_texture_size || desc.height > self.max_texture_size {
            return Err(BackendError::TextureTooLarge {
                width: desc.width,
                height: desc.height,
                max: self.max_texture_size,
            });
        }

        let depth = (desc.depth_bits > 0).then(|| vec![1.0; desc.width as usize * desc.height as usize]);
        let handle = self.render_textures.insert(SoftwareRenderTexture {
            desc: desc.clone(),
            pixels: RgbaImage::new(desc.width, desc.height),
            depth,
            created: true,
        });
        self.stats.textures_created += 1;

        log::debug!("Allocated render texture '{}' ({}x{})", desc.name, desc.width, desc.height);
        Ok(handle)
    }

    fn release_render_texture(&mut self, texture: RenderTextureHandle) {
        if let Some(released) = self.render_textures.remove(texture) {
            self.stats.textures_released += 1;
            if self.active == Some(texture) {
                self.active = None;
            }
            log::debug!("Released render texture '{}'", released.desc.name);
        }
    }

    fn is_created(&self, texture: RenderTextureHandle) -> bool {
        self.render_textures.get(texture).is_some_and(|texture| texture.created)
    }

    fn texture_size(&self, texture: RenderTextureHandle) -> Option<(u32, u32)> {
        self.render_textures
            .get(texture)
            .map(|texture| (texture.desc.width, texture.desc.height))
    }

    fn source_size(&self, source: SourceTexture) -> Option<(u32, u32)> {
        match source {
            SourceTexture::Image(image) => self.images.get(image).map(RgbaImage::dimensions),
            SourceTexture::RenderTexture(texture) => self.texture_size(texture),
        }
    }

    fn active_render_target(&self) -> Option<RenderTextureHandle> {
        self.active
    }

    fn set_active_render_target(&mut self, target: Option<RenderTextureHandle>) {
        self.active = target;
    }

    fn clear(&mut self, clear_depth: bool, clear_color: bool, color: Vec4) {
        self.stats.clears += 1;
        let rgba = Rgba(color_to_rgba8(&color));

        match self.active {
            Some(handle) => {
                let Some(texture) = self.render_textures.get_mut(handle).filter(|texture| texture.created) else {
                    return;
                };
                if clear_color {
                    texture.pixels.pixels_mut().for_each(|pixel| *pixel = rgba);
                }
                if clear_depth {
                    if let Some(depth) = texture.depth.as_mut() {
                        depth.fill(1.0);
                    }
                }
            }
            None => {
                if clear_color {
                    self.screen.pixels_mut().for_each(|pixel| *pixel = rgba);
                }
            }
        }
    }

    fn draw_texture(&mut self, position: Rect, source: SourceTexture, tex_coords: Rect, alpha_blend: bool) {
        if let (SourceTexture::RenderTexture(texture), Some(active)) = (source, self.active) {
            if texture == active {
                log::warn!("Ignoring draw of a render texture into itself");
                return;
            }
        }

        // Render texture sources are copied so the destination can be borrowed mutably
        let src: Cow<'_, RgbaImage> = match source {
            SourceTexture::Image(image) => match self.images.get(image) {
                Some(pixels) => Cow::Borrowed(pixels),
                None => return,
            },
            SourceTexture::RenderTexture(_) => match self.source_pixels(source) {
                Some(pixels) => Cow::Owned(pixels.clone()),
                None => return,
            },
        };

        let dest = match self.active {
            Some(handle) => match self.render_textures.get_mut(handle) {
                Some(texture) if texture.created => &mut texture.pixels,
                _ => return,
            },
            None => &mut self.screen,
        };

        self.stats.draws += 1;
        blit(dest, &src, position, tex_coords, alpha_blend);
    }
}

/// Nearest-neighbour copy of `tex_coords` of `src` into `position` of `dest`
///
/// A destination pixel is covered when its centre lies inside `position`.
fn blit(dest: &mut RgbaImage, src: &RgbaImage, position: Rect, tex_coords: Rect, alpha_blend: bool) {
    if position.is_empty() || src.width() == 0 || src.height() == 0 {
        return;
    }
    let bounds = Rect::from_size(dest.width() as f32, dest.height() as f32);
    let Some(clip) = position.intersection(&bounds) else {
        return;
    };

    let x_start = clip.x_min().floor() as u32;
    let y_start = clip.y_min().floor() as u32;
    let x_end = (clip.x_max().ceil() as u32).min(dest.width());
    let y_end = (clip.y_max().ceil() as u32).min(dest.height());
    let src_max_x = src.width() - 1;
    let src_max_y = src.height() - 1;

    for y in y_start..y_end {
        for x in x_start..x_end {
            let centre = Vec2::new(x as f32 + 0.5, y as f32 + 0.5);
            if !position.contains(centre) {
                continue;
            }

            let u = tex_coords.x + (centre.x - position.x) / position.width * tex_coords.width;
            let v = tex_coords.y + (centre.y - position.y) / position.height * tex_coords.height;
            let sx = ((u * src.width() as f32).floor().max(0.0) as u32).min(src_max_x);
            let sy = ((v * src.height() as f32).floor().max(0.0) as u32).min(src_max_y);

            let src_pixel = *src.get_pixel(sx, sy);
            let dest_pixel = dest.get_pixel_mut(x, y);
            *dest_pixel = if alpha_blend {
                blend_over(src_pixel, *dest_pixel)
            } else {
                src_pixel
            };
        }
    }
}

/// Source-over alpha compositing
fn blend_over(src: Rgba<u8>, dest: Rgba<u8>) -> Rgba<u8> {
    let src_alpha = f32::from(src.0[3]) / 255.0;
    let dest_alpha = f32::from(dest.0[3]) / 255.0;
    let out_alpha = src_alpha + dest_alpha * (1.0 - src_alpha);
    if out_alpha <= 0.0 {
        return Rgba([0, 0, 0, 0]);
    }

    let mut out = [0u8; 4];
    for channel in 0..3 {
        let src_c = f32::from(src.0[channel]) / 255.0;
        let dest_c = f32::from(dest.0[channel]) / 255.0;
        let c = (src_c * src_alpha + dest_c * dest_alpha * (1.0 - src_alpha)) / out_alpha;
        out[channel] = (c * 255.0).round().clamp(0.0, 255.0) as u8;
    }
    out[3] = (out_alpha * 255.0).round().clamp(0.0, 255.0) as u8;
    Rgba(out)
}
