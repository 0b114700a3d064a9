//src/items/src/lib.rs
//! Equipment and the affix table it is scored with.

pub mod affix;
pub mod equipment;

pub use crate::affix::{AffixKind, AffixSet, AffixStats, generate_affixes};
pub use crate::equipment::{Equipment, EquipmentType, Rarity};
