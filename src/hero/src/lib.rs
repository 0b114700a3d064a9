// src/hero/src/lib.rs
//! Run-scoped player character: stat derivation from the persistent profile,
//! soul collection, consumables and equipment slots.

mod class;
mod core;
mod progression;
mod rng;

pub use self::{
    class::{Class, ClassTraits},
    core::{Character, EventFlags},
    progression::{Attribute, Attributes, Perk, Upgrade},
    rng::GameRng,
};

/// Souls spent per random upgrade in `Character::collect`.
pub const SOULS_PER_UPGRADE: u32 = 20;

/// Most a single potion heals.
pub const POTION_HEAL: i32 = 40;
