// src/combat/src/path.rs

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, IntoEnumIterator};

use crate::Monster;

/// The passage chosen at the start of each floor.
#[derive(Clone, Copy, Debug, Display, PartialEq, Eq, Hash, EnumIter, Serialize, Deserialize)]
pub enum PathKind {
    #[strum(serialize = "Safe Passage")]
    Safe,
    #[strum(serialize = "Dangerous Passage")]
    Danger,
}

impl PathKind {
    pub fn path(self) -> DungeonPath {
        match self {
            PathKind::Safe => DungeonPath::new(self, 1.0, 1.0),
            PathKind::Danger => DungeonPath::new(self, 1.5, 2.0),
        }
    }
}

/// Difficulty and reward scaling for the current floor
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DungeonPath {
    pub kind: PathKind,
    pub name: String,
    /// Scales monster hp and attack
    pub difficulty: f64,
    /// Scales the soul payout
    pub reward_multiplier: f64,
}

impl DungeonPath {
    fn new(kind: PathKind, difficulty: f64, reward_multiplier: f64) -> Self {
        Self {
            kind,
            name: kind.to_string(),
            difficulty,
            reward_multiplier,
        }
    }

    pub fn safe() -> Self {
        PathKind::Safe.path()
    }

    pub fn danger() -> Self {
        PathKind::Danger.path()
    }

    /// Scale a freshly spawned monster, truncating each stat.
    pub fn apply_difficulty(&self, monster: &mut Monster) {
        monster.hp = (monster.hp as f64 * self.difficulty) as i32;
        monster.attack = (monster.attack as f64 * self.difficulty) as i32;
        monster.souls = (monster.souls as f64 * self.reward_multiplier) as u32;
    }
}

/// Mean reward multiplier over every path variant.
pub fn average_reward_multiplier() -> f64 {
    let (sum, count) = PathKind::iter().fold((0.0, 0u32), |(sum, count), kind| {
        (sum + kind.path().reward_multiplier, count + 1)
    });
    sum / count as f64
}
