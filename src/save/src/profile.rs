// src/save/src/profile.rs
use items::Equipment;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Cross-run save state.
///
/// Every struct here is `#[serde(default)]`, so a profile written by an older
/// build loads with the missing keys zeroed and the present ones kept. Unknown
/// top-level keys are carried through `extra` untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PersistentProfile {
    /// Soul fragments, the meta currency
    pub fragments: u32,
    pub shop: ShopLevels,
    pub forge_level: u32,
    pub records: Records,
    pub talent_tree: TalentTree,
    pub equipment_storage: Vec<Equipment>,

    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_json::Value>,
}

/// Permanent shop upgrade levels
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShopLevels {
    pub attack_level: u32,
    pub hp_level: u32,
    pub potion_level: u32,
}

/// Monotonic lifetime counters
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Records {
    pub highest_wave: u32,
    pub total_boss_kills: u32,
    pub total_runs: u32,
    /// Hidden boss (Greed Chest) kills
    pub greed_boss_kills: u32,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TalentTree {
    pub warrior: WarriorTalents,
    pub mage: MageTalents,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WarriorTalents {
    pub strength: u32,
    pub vitality: u32,
    pub shield_master: u32,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MageTalents {
    pub intelligence: u32,
    pub spellpower: u32,
    pub mana_shield: u32,
}

impl PersistentProfile {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a profile, backfilling anything the document lacks.
    pub fn from_json(json: &str) -> Result<Self, error::GameError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> Result<String, error::GameError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Spend fragments, leaving the balance untouched when it falls short.
    pub fn spend_fragments(&mut self, cost: u32) -> Result<(), error::GameError> {
        if self.fragments < cost {
            return Err(error::GameError::insufficient(cost, self.fragments));
        }
        self.fragments -= cost;
        Ok(())
    }

    pub fn add_fragments(&mut self, amount: u32) {
        self.fragments = self.fragments.saturating_add(amount);
    }

    /// Append to the equipment archive (unbounded, insertion-ordered).
    pub fn archive(&mut self, equipment: Equipment) {
        self.equipment_storage.push(equipment);
    }
}

impl Records {
    pub fn record_wave(&mut self, wave: u32) {
        self.highest_wave = self.highest_wave.max(wave);
    }

    pub fn add_boss_kills(&mut self, kills: u32) {
        self.total_boss_kills = self.total_boss_kills.saturating_add(kills);
    }

    pub fn add_run(&mut self) {
        self.total_runs = self.total_runs.saturating_add(1);
    }

    pub fn add_greed_kill(&mut self) {
        self.greed_boss_kills = self.greed_boss_kills.saturating_add(1);
    }
}
