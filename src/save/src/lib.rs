// src/save/src/lib.rs
//! Persistent profile: everything that survives between runs.

mod profile;
mod shop;
mod store;

pub use crate::profile::{
    MageTalents, PersistentProfile, Records, ShopLevels, TalentTree, WarriorTalents,
};
pub use crate::shop::{ShopUpgrade, TalentNode};
pub use crate::store::ProfileStore;
