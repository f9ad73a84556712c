//! UI rendering
//!
//! The UI render target is an off-screen texture sized to the screen that
//! the UI layer draws into. Drawing goes through [`UIRenderBackend`] so the
//! target never depends on a particular graphics API.

pub mod backend;
pub mod config;
pub mod output;
pub mod render_target;
pub mod scale_mode;
pub mod software;

pub use backend::{
    ActiveTargetScope, BackendError, ImageHandle, RenderTextureDesc, RenderTextureFormat,
    RenderTextureHandle, SourceTexture, UIRenderBackend,
};
pub use config::{RenderTargetConfig, SoftwareBackendConfig};
pub use output::{OutputCanvas, OutputSurface, RawImage, SharedOutputSurface};
pub use render_target::{GuiEventType, UIRenderTarget};
pub use scale_mode::ScaleMode;
pub use software::{BackendStats, SoftwareBackend};
