// src/combat/src/enemy.rs

use rand::Rng;
use serde::{Deserialize, Serialize};

/// Static monster template
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Archetype {
    pub name: &'static str,
    pub hp: i32,
    pub attack: i32,
    pub souls: u32,
}

const fn archetype(name: &'static str, hp: i32, attack: i32, souls: u32) -> Archetype {
    Archetype {
        name,
        hp,
        attack,
        souls,
    }
}

pub const NORMAL_MONSTERS: [Archetype; 8] = [
    archetype("Slime", 25, 7, 10),
    archetype("Bat", 30, 8, 10),
    archetype("Goblin", 35, 9, 12),
    archetype("Skeleton", 40, 10, 12),
    archetype("Werewolf", 45, 11, 15),
    archetype("Gargoyle", 50, 12, 15),
    archetype("Shadow Assassin", 35, 13, 15),
    archetype("Venom Spider", 30, 14, 15),
];

pub const ELITE_MONSTERS: [Archetype; 3] = [
    archetype("Elite Slime", 40, 12, 20),
    archetype("Elite Bat", 45, 13, 20),
    archetype("Elite Goblin", 50, 14, 20),
];

pub const BOSS_MONSTERS: [Archetype; 2] = [
    archetype("Skeleton King", 90, 16, 45),
    archetype("Flame Demon", 110, 18, 50),
];

/// Never drawn at random; summoned by the hoard of potions on wave 11.
pub const HIDDEN_BOSS: Archetype = archetype("Greed Chest", 150, 25, 100);

/// Monster tier, which drives loot and boss records.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MonsterRank {
    Normal,
    Elite,
    Boss,
    HiddenBoss,
}

/// What a wave spawns
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WaveKind {
    Normal,
    Elite,
    Boss,
    HiddenBoss,
}

impl WaveKind {
    /// Every 4th wave is a boss, other even waves are elites.
    pub fn classify(wave: u32) -> Self {
        if wave % 4 == 0 {
            WaveKind::Boss
        } else if wave % 2 == 0 {
            WaveKind::Elite
        } else {
            WaveKind::Normal
        }
    }

    fn pool(self) -> &'static [Archetype] {
        match self {
            WaveKind::Normal => &NORMAL_MONSTERS,
            WaveKind::Elite => &ELITE_MONSTERS,
            WaveKind::Boss => &BOSS_MONSTERS,
            WaveKind::HiddenBoss => std::slice::from_ref(&HIDDEN_BOSS),
        }
    }

    fn rank(self) -> MonsterRank {
        match self {
            WaveKind::Normal => MonsterRank::Normal,
            WaveKind::Elite => MonsterRank::Elite,
            WaveKind::Boss => MonsterRank::Boss,
            WaveKind::HiddenBoss => MonsterRank::HiddenBoss,
        }
    }
}

/// One encounter's opponent
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Monster {
    pub name: String,
    pub hp: i32,
    pub attack: i32,
    pub souls: u32,
    pub rank: MonsterRank,
}

impl Monster {
    pub fn from_archetype(archetype: &Archetype, rank: MonsterRank) -> Self {
        Self {
            name: archetype.name.to_string(),
            hp: archetype.hp,
            attack: archetype.attack,
            souls: archetype.souls,
            rank,
        }
    }

    /// Pick a random archetype from the wave's pool (unscaled).
    pub fn spawn<R: Rng>(kind: WaveKind, rng: &mut R) -> Self {
        let pool = kind.pool();
        let archetype = &pool[rng.random_range(0..pool.len())];
        Self::from_archetype(archetype, kind.rank())
    }

    pub fn hidden_boss() -> Self {
        Self::from_archetype(&HIDDEN_BOSS, MonsterRank::HiddenBoss)
    }

    /// Bosses include the hidden boss.
    pub fn is_boss(&self) -> bool {
        matches!(self.rank, MonsterRank::Boss | MonsterRank::HiddenBoss)
    }

    pub fn is_elite(&self) -> bool {
        self.rank == MonsterRank::Elite
    }

    pub fn is_hidden_boss(&self) -> bool {
        self.rank == MonsterRank::HiddenBoss
    }

    pub fn is_alive(&self) -> bool {
        self.hp > 0
    }

    pub fn take_damage(&mut self, amount: i32) {
        self.hp -= amount;
    }
}
