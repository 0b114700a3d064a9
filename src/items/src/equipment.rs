//src/items/src/equipment.rs
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;
use strum::{Display, EnumIter};

use crate::affix::{AffixKind, AffixSet, AffixStats, generate_affixes};

/// Equipment slot.
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, Hash, EnumIter, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EquipmentType {
    #[strum(serialize = "weapon")]
    Weapon,
    #[strum(serialize = "armor")]
    Armor,
}

/// Item rarity, stored as its ordinal (0/1/2).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, EnumIter, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
pub enum Rarity {
    Common,
    Rare,
    Epic,
}

impl Rarity {
    pub fn ordinal(self) -> u8 {
        match self {
            Rarity::Common => 0,
            Rarity::Rare => 1,
            Rarity::Epic => 2,
        }
    }

    /// Number of affixes an item of this rarity carries.
    pub fn affix_count(self) -> usize {
        self.ordinal() as usize + 1
    }

    /// Uniform pick from the inclusive ordinal range.
    pub fn roll_between<R: Rng>(rng: &mut R, low: Rarity, high: Rarity) -> Rarity {
        let ordinal = rng.random_range(low.ordinal()..=high.ordinal());
        Rarity::try_from(ordinal).unwrap_or(low)
    }
}

impl From<Rarity> for u8 {
    fn from(rarity: Rarity) -> Self {
        rarity.ordinal()
    }
}

impl TryFrom<u8> for Rarity {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Rarity::Common),
            1 => Ok(Rarity::Rare),
            2 => Ok(Rarity::Epic),
            other => Err(format!("unknown rarity ordinal {other}")),
        }
    }
}

impl fmt::Display for Rarity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Rarity::Common => "Common",
            Rarity::Rare => "Rare",
            Rarity::Epic => "Epic",
        };
        write!(f, "{}", name)
    }
}

/// A weapon or armor piece with rarity-pinned affixes.
///
/// Serialized form is the persisted storage entry:
/// `{ "type": "weapon", "rarity": 1, "affixes": { "strength": 4 } }`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Equipment {
    #[serde(rename = "type")]
    kind: EquipmentType,
    rarity: Rarity,
    affixes: AffixSet,
}

impl Equipment {
    /// Create an item of the given type and rarity with freshly rolled affixes.
    pub fn new<R: Rng>(kind: EquipmentType, rarity: Rarity, rng: &mut R) -> Self {
        Self {
            kind,
            rarity,
            affixes: generate_affixes(rarity, rng),
        }
    }

    /// Random type at a fixed rarity (loot drops).
    pub fn roll<R: Rng>(rarity: Rarity, rng: &mut R) -> Self {
        let kind = if rng.random_bool(0.5) {
            EquipmentType::Weapon
        } else {
            EquipmentType::Armor
        };
        Self::new(kind, rarity, rng)
    }

    /// Rebuild an item from already known affixes (storage, tests).
    pub fn with_affixes(kind: EquipmentType, rarity: Rarity, affixes: AffixSet) -> Self {
        Self {
            kind,
            rarity,
            affixes,
        }
    }

    pub fn kind(&self) -> EquipmentType {
        self.kind
    }

    pub fn rarity(&self) -> Rarity {
        self.rarity
    }

    pub fn affixes(&self) -> &AffixSet {
        &self.affixes
    }

    /// Summed stat bonuses of every affix.
    pub fn stats(&self) -> AffixStats {
        AffixStats::from_affixes(&self.affixes)
    }

    /// Re-roll every affix; the count still follows the rarity.
    pub fn reforge<R: Rng>(&mut self, rng: &mut R) {
        self.affixes = generate_affixes(self.rarity, rng);
        tracing::debug!(kind = %self.kind, rarity = %self.rarity, "equipment reforged");
    }

    /// Double one random affix in place (`level += level`).
    ///
    /// Returns the affix and its new level, or `None` when the item carries no
    /// affixes at all.
    pub fn strengthen_random_affix<R: Rng>(&mut self, rng: &mut R) -> Option<(AffixKind, u32)> {
        if self.affixes.is_empty() {
            return None;
        }
        let pick = rng.random_range(0..self.affixes.len());
        let (kind, level) = self.affixes.iter_mut().nth(pick)?;
        *level += *level;
        Some((*kind, *level))
    }

    /// Equipment of rarity rare and above is archived without asking.
    pub fn auto_archived(&self) -> bool {
        self.rarity >= Rarity::Rare
    }
}

impl fmt::Display for Equipment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.rarity, self.kind)?;
        for (kind, level) in &self.affixes {
            write!(f, " [{} +{}]", kind, level)?;
        }
        Ok(())
    }
}
