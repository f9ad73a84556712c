//! # RPG Engine
//!
//! Engine-side pieces of a role-playing game that sit between the effect
//! system and the user interface.
//!
//! ## Features
//!
//! - **Effect Flags**: Targeting, element and crafting-station flags for magical effects
//! - **UI Render Target**: Off-screen texture that the UI draws into, sized to the screen
//! - **Backend Agnostic**: Host drawing API expressed as a trait, with a CPU software backend
//! - **Configuration**: TOML/RON config files for render target and backend settings
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use rpg_engine::prelude::*;
//!
//! let config = UiConfig::default();
//! let mut backend = SoftwareBackend::new(&config.backend);
//! let mut target = UIRenderTarget::new(config.render_target.clone(), None);
//!
//! target.awake(&mut backend);
//!
//! // Once per frame
//! target.update(&mut backend);
//! target.on_gui(&mut backend, GuiEventType::Repaint);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions, clippy::similar_names, clippy::too_many_arguments)]

pub mod foundation;
pub mod config;
pub mod events;
pub mod assets;
pub mod magic;
pub mod ui;

/// Common imports for engine users
pub mod prelude {
    pub use crate::{
        foundation::math::{Rect, Vec2, Vec4},
        config::{Config, ConfigError, UiConfig},
        events::{Event, EventArg, EventHandler, EventSystem, EventType, HandlerId},
        assets::{AssetError, ImageData},
        magic::{BundleTypes, ElementTypes, MagicCraftingStations, TargetTypes},
        ui::{
            BackendError, GuiEventType, ImageHandle, OutputCanvas, OutputSurface, RawImage,
            RenderTargetConfig, RenderTextureDesc, RenderTextureFormat, RenderTextureHandle,
            ScaleMode, SharedOutputSurface, SoftwareBackend, SoftwareBackendConfig,
            UIRenderBackend, UIRenderTarget,
        },
    };
}
