// src/hero/src/progression.rs
//! Run-local growth bought with souls.

use rand::Rng;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, IntoEnumIterator};

/// Run-scoped perks rolled at each soul threshold. Duplicates are allowed.
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, Hash, EnumIter, Serialize, Deserialize)]
pub enum Perk {
    /// 25% chance to double an attack
    Crit,
    /// Heal on kill
    Lifesteal,
    /// Monster hits reduced by 5 (minimum 1)
    Shield,
}

#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, Hash, EnumIter, Serialize, Deserialize)]
pub enum Attribute {
    Strength,
    Agility,
    Intelligence,
}

/// Run-local attribute levels
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attributes {
    pub strength: u32,
    pub agility: u32,
    pub intelligence: u32,
}

impl Attributes {
    pub fn get(&self, attribute: Attribute) -> u32 {
        match attribute {
            Attribute::Strength => self.strength,
            Attribute::Agility => self.agility,
            Attribute::Intelligence => self.intelligence,
        }
    }

    pub fn raise(&mut self, attribute: Attribute) {
        let slot = match attribute {
            Attribute::Strength => &mut self.strength,
            Attribute::Agility => &mut self.agility,
            Attribute::Intelligence => &mut self.intelligence,
        };
        *slot += 1;
    }
}

/// One random upgrade granted by soul collection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Upgrade {
    Perk(Perk),
    Attribute(Attribute),
}

impl Upgrade {
    /// 50/50 between a perk and an attribute point, each uniform over its kinds.
    pub fn roll<R: Rng>(rng: &mut R) -> Self {
        if rng.random_bool(0.5) {
            let perks: Vec<Perk> = Perk::iter().collect();
            Upgrade::Perk(perks[rng.random_range(0..perks.len())])
        } else {
            let attrs: Vec<Attribute> = Attribute::iter().collect();
            Upgrade::Attribute(attrs[rng.random_range(0..attrs.len())])
        }
    }
}
