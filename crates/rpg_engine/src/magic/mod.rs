//! Magic and effects
//!
//! Classification data shared by the effect system: how a bundle targets
//! entities, which element it manifests as, and where it can be crafted.

pub mod enums;

pub use enums::{BundleTypes, ElementTypes, MagicCraftingStations, TargetTypes};
