// src/combat/src/loot.rs

use items::{Equipment, Rarity};
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::{Monster, MonsterRank};

const ELITE_EQUIPMENT_CHANCE: f64 = 0.4;
const NORMAL_EQUIPMENT_CHANCE: f64 = 0.2;
const NORMAL_POTION_CHANCE: f64 = 0.5;

/// A single drop
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum Loot {
    Potions(u32),
    Equipment(Equipment),
}

/// Roll the drops for a slain monster.
///
/// Bosses always drop, the hidden boss drops more; normal monsters drop
/// either equipment or, failing that, maybe a potion.
pub fn roll_loot<R: Rng>(monster: &Monster, rng: &mut R) -> Vec<Loot> {
    match monster.rank {
        MonsterRank::HiddenBoss => vec![
            Loot::Potions(3),
            Loot::Equipment(Equipment::roll(Rarity::Epic, rng)),
        ],
        MonsterRank::Boss => {
            let rarity = Rarity::roll_between(rng, Rarity::Rare, Rarity::Epic);
            vec![Loot::Potions(1), Loot::Equipment(Equipment::roll(rarity, rng))]
        }
        MonsterRank::Elite => {
            if rng.random_bool(ELITE_EQUIPMENT_CHANCE) {
                let rarity = Rarity::roll_between(rng, Rarity::Common, Rarity::Rare);
                vec![Loot::Equipment(Equipment::roll(rarity, rng))]
            } else {
                Vec::new()
            }
        }
        MonsterRank::Normal => {
            if rng.random_bool(NORMAL_EQUIPMENT_CHANCE) {
                vec![Loot::Equipment(Equipment::roll(Rarity::Common, rng))]
            } else if rng.random_bool(NORMAL_POTION_CHANCE) {
                vec![Loot::Potions(1)]
            } else {
                Vec::new()
            }
        }
    }
}
