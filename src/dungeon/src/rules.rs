// src/dungeon/src/rules.rs

use combat::{Monster, WaveKind};
use events::EVENT_CHANCE;
use hero::Character;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Tunable constants of a run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunRules {
    pub waves_per_floor: u32,
    pub floors: u32,
    pub hidden_boss_wave: u32,
    /// Potions the hero must hoard to lure the hidden boss
    pub hidden_boss_potions: u32,
    pub event_chance: f64,
    pub victory_base: u32,
    pub hidden_boss_bonus: u32,
    /// Souls per reforge
    pub forge_cost: u32,
}

impl Default for RunRules {
    fn default() -> Self {
        Self {
            waves_per_floor: 4,
            floors: 3,
            hidden_boss_wave: 11,
            hidden_boss_potions: 5,
            event_chance: EVENT_CHANCE,
            victory_base: 150,
            hidden_boss_bonus: 100,
            forge_cost: 30,
        }
    }
}

impl RunRules {
    pub fn final_wave(&self) -> u32 {
        self.waves_per_floor * self.floors
    }

    pub fn floor_of(&self, wave: u32) -> u32 {
        wave.saturating_sub(1) / self.waves_per_floor + 1
    }

    /// Paths are chosen (and hp restored) on the first wave and on every
    /// boss wave.
    pub fn is_path_wave(&self, wave: u32) -> bool {
        wave == 1 || wave % self.waves_per_floor == 0
    }

    /// Position inside the floor, 1-based.
    pub fn stage_of(&self, wave: u32) -> u32 {
        match wave % self.waves_per_floor {
            0 => self.waves_per_floor,
            stage => stage,
        }
    }

    /// Unscaled opponent for `wave`.
    pub fn spawn<R: Rng>(&self, wave: u32, hero: &Character, rng: &mut R) -> Monster {
        if should_spawn_hidden_boss(wave, hero, self) {
            tracing::info!(wave, potions = hero.potions, "hidden boss lured out");
            Monster::hidden_boss()
        } else {
            Monster::spawn(WaveKind::classify(wave), rng)
        }
    }
}

/// All three must hold: the right wave, enough potions, not yet beaten.
pub fn should_spawn_hidden_boss(wave: u32, hero: &Character, rules: &RunRules) -> bool {
    wave == rules.hidden_boss_wave
        && hero.potions >= rules.hidden_boss_potions
        && !hero.hidden_boss_defeated
}
