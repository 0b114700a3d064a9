// src/combat/src/lib.rs
//! Monsters, dungeon paths and the turn-by-turn encounter resolver.

pub mod encounter;
pub mod enemy;
pub mod loot;
pub mod path;

#[cfg(test)]
mod tests;

pub use crate::encounter::{
    CombatAction, CombatEvent, CombatInput, Encounter, EncounterOutcome, EncounterReport,
    TurnResult, run_encounter,
};
pub use crate::enemy::{Archetype, Monster, MonsterRank, WaveKind};
pub use crate::loot::{Loot, roll_loot};
pub use crate::path::{DungeonPath, PathKind, average_reward_multiplier};

/// Combat configuration constants
mod constants {
    pub const CRIT_CHANCE: f64 = 0.25; // crit perk proc chance
    pub const CRIT_MULTIPLIER: i32 = 2;
    pub const FLEE_CHANCE: f64 = 0.5;
    pub const SHIELD_REDUCTION: i32 = 5; // shield perk flat reduction
    pub const MIN_DAMAGE: i32 = 1; // floor after shield reduction
    pub const DEMON_PACT_MULTIPLIER: f64 = 1.5;
    pub const LIFESTEAL_BASE_HEAL: i32 = 10;
}
