//! Effect classification flags
//!
//! All flag types are plain bit sets. Combine with `|`, test with `&`,
//! [`contains`](TargetTypes::contains) or [`intersects`](TargetTypes::intersects).
//! The text form used in config files is the bitflags format, e.g. `"FIRE | COLD"`.

use std::fmt;
use std::str::FromStr;

use bitflags::bitflags;
use serde::{Deserialize, Serialize};

bitflags! {
    /// How an effect bundle targets entities in world space.
    ///
    /// Effects declare every target type they support by combining flags.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
    #[serde(transparent)]
    pub struct TargetTypes: u32 {
        /// Affects only the caster
        const CASTER_ONLY            = 1 << 0;
        /// Delivered by touch
        const BY_TOUCH               = 1 << 1;
        /// Single target at range
        const SINGLE_TARGET_AT_RANGE = 1 << 2;
        /// Area centred on the caster
        const AREA_AROUND_CASTER     = 1 << 3;
        /// Area centred on a point at range
        const AREA_AT_RANGE          = 1 << 4;
    }
}

bitflags! {
    /// How an effect bundle manifests for cast animations, billboards and resist checks.
    ///
    /// Effects declare every element they support by combining flags.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
    #[serde(transparent)]
    pub struct ElementTypes: u32 {
        /// Fire damage and resistance
        const FIRE   = 1 << 0;
        /// Frost damage and resistance
        const COLD   = 1 << 1;
        /// Poison damage and resistance
        const POISON = 1 << 2;
        /// Shock damage and resistance
        const SHOCK  = 1 << 3;
        /// Raw magic damage and resistance
        const MAGIC  = 1 << 4;
    }
}

bitflags! {
    /// Magic crafting stations able to produce an effect.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
    #[serde(transparent)]
    pub struct MagicCraftingStations: u32 {
        /// Spell maker
        const SPELL_MAKER  = 1 << 0;
        /// Potion maker
        const POTION_MAKER = 1 << 1;
        /// Item maker (enchanting)
        const ITEM_MAKER   = 1 << 2;
    }
}

// `None` is the zero value of each flag set.
impl TargetTypes {
    /// No target types
    pub const NONE: Self = Self::empty();
}

impl ElementTypes {
    /// No elements
    pub const NONE: Self = Self::empty();
}

impl MagicCraftingStations {
    /// No crafting stations
    pub const NONE: Self = Self::empty();
}

/// Text form (`"FIRE | COLD"`) shared by all flag sets
macro_rules! impl_flag_text {
    ($($flags:ty),+ $(,)?) => {
        $(
            impl fmt::Display for $flags {
                fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                    bitflags::parser::to_writer(self, f)
                }
            }

            impl FromStr for $flags {
                type Err = bitflags::parser::ParseError;

                fn from_str(s: &str) -> Result<Self, Self::Err> {
                    bitflags::parser::from_str(s)
                }
            }
        )+
    };
}

impl_flag_text!(TargetTypes, ElementTypes, MagicCraftingStations);

/// Supported bundle types.
///
/// Determines the lifetime and usage rules applied to an effect bundle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum BundleTypes {
    /// Not a bundle
    #[default]
    None,
    /// Spell bundle
    Spell,
}
