// src/hero/src/core.rs
use error::GameError;
use items::{AffixStats, Equipment, EquipmentType};
use rand::Rng;
use save::PersistentProfile;
use serde::{Deserialize, Serialize};

use crate::{
    POTION_HEAL, SOULS_PER_UPGRADE,
    class::{Class, ClassTraits},
    progression::{Attribute, Attributes, Perk, Upgrade},
};

/// Narrative state written by the event chain. Only ever moves forward,
/// except for the angel's redemption which clears the pact and the curse.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventFlags {
    pub demon_pact: bool,
    pub altar_sacrifice: u32,
    pub holy_blessing: bool,
    pub curse_level: u32,
}

/// The hero of a single run.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Character {
    pub traits: ClassTraits,

    pub hp: i32,
    pub max_hp: i32,
    base_max_hp: i32,
    /// Multiplier on max hp left by the angel's defiance
    #[serde(default = "unscaled")]
    max_hp_factor: f64,
    pub attack: i32,

    pub souls: u32,
    pub perks: Vec<Perk>,
    pub attributes: Attributes,
    pub potions: u32,

    pub weapon: Option<Equipment>,
    pub armor: Option<Equipment>,
    // derived from the equipped items
    pub lifesteal: f64,
    pub thorns: i32,
    pub crit_chance: f64,

    pub flags: EventFlags,
    pub boss_kills: u32,
    pub hidden_boss_defeated: bool,
}

fn unscaled() -> f64 {
    1.0
}

impl Character {
    /// Derive a fresh character from the class and the persistent upgrades.
    pub fn new(class: Class, profile: &PersistentProfile) -> Self {
        let shop = &profile.shop;
        let base_hp = (class.base_hp() + shop.hp_level as i32 * 20) as f64;
        let base_atk = (class.base_attack() + shop.attack_level as i32 * 5) as f64;

        let (max_hp, attack, traits) = match class {
            Class::Warrior => {
                let talents = &profile.talent_tree.warrior;
                let hp_bonus = base_hp * (talents.vitality as f64 * 0.05);
                let atk_bonus = base_atk * (talents.strength as f64 * 0.1);
                (
                    (base_hp + hp_bonus) as i32,
                    (base_atk + atk_bonus) as i32,
                    ClassTraits::Warrior {
                        shield_reduction: talents.shield_master as i32 * 2,
                    },
                )
            }
            Class::Mage => {
                let talents = &profile.talent_tree.mage;
                let hp_bonus = base_hp * (talents.mana_shield as f64 * 0.03);
                (
                    (base_hp + hp_bonus) as i32,
                    base_atk as i32,
                    ClassTraits::Mage {
                        spell_power: talents.spellpower as f64 * 0.15,
                        magic_chance: 0.3 + talents.intelligence as f64 * 0.1,
                    },
                )
            }
        };

        tracing::debug!(%class, max_hp, attack, "character created");

        Self {
            traits,
            hp: max_hp,
            max_hp,
            base_max_hp: max_hp,
            max_hp_factor: unscaled(),
            attack,
            souls: 0,
            perks: Vec::new(),
            attributes: Attributes::default(),
            potions: shop.potion_level,
            weapon: None,
            armor: None,
            lifesteal: 0.0,
            thorns: 0,
            crit_chance: 0.0,
            flags: EventFlags::default(),
            boss_kills: 0,
            hidden_boss_defeated: false,
        }
    }

    pub fn class(&self) -> Class {
        self.traits.class()
    }

    pub fn is_alive(&self) -> bool {
        self.hp > 0
    }

    pub fn has_perk(&self, perk: Perk) -> bool {
        self.perks.contains(&perk)
    }

    /// Outgoing damage before crits and magic.
    ///
    /// Curse levels amplify it by 10% each; the result is truncated.
    pub fn power(&self) -> i32 {
        let base = self.attack
            + self.attributes.strength as i32 * 2
            + self.equipment_stats().attack;

        let curse = self.flags.curse_level;
        if curse > 0 {
            let base = base as f64;
            (base + base * (curse as f64 * 0.1)) as i32
        } else {
            base
        }
    }

    /// Add souls and convert every full 20 into a random upgrade.
    pub fn collect<R: Rng>(&mut self, amount: u32, rng: &mut R) -> Vec<Upgrade> {
        self.souls += amount;
        tracing::debug!(amount, souls = self.souls, "souls collected");

        let mut upgrades = Vec::new();
        while self.souls >= SOULS_PER_UPGRADE {
            self.souls -= SOULS_PER_UPGRADE;
            let upgrade = Upgrade::roll(rng);
            self.apply_upgrade(upgrade);
            upgrades.push(upgrade);
        }
        upgrades
    }

    pub fn apply_upgrade(&mut self, upgrade: Upgrade) {
        match upgrade {
            Upgrade::Perk(perk) => {
                self.perks.push(perk);
                tracing::info!(%perk, "perk gained");
            }
            Upgrade::Attribute(attribute) => {
                self.attributes.raise(attribute);
                tracing::info!(%attribute, "attribute raised");
            }
        }
    }

    /// Spend souls, leaving the balance untouched when it falls short.
    pub fn spend_souls(&mut self, cost: u32) -> Result<(), GameError> {
        if self.souls < cost {
            return Err(GameError::insufficient(cost, self.souls));
        }
        self.souls -= cost;
        Ok(())
    }

    /// Drink a potion. Returns the amount healed, or `None` with nothing
    /// changed when no potion is left.
    pub fn use_consumable(&mut self) -> Option<i32> {
        if self.potions == 0 {
            return None;
        }
        let healed = POTION_HEAL.min(self.max_hp - self.hp).max(0);
        self.hp += healed;
        self.potions -= 1;
        tracing::debug!(healed, potions = self.potions, "potion used");
        Some(healed)
    }

    /// Heal up to max hp; returns the amount actually restored.
    pub fn heal(&mut self, amount: i32) -> i32 {
        let healed = amount.min(self.max_hp - self.hp).max(0);
        self.hp += healed;
        healed
    }

    pub fn take_damage(&mut self, amount: i32) {
        self.hp -= amount;
    }

    pub fn restore_full(&mut self) {
        self.hp = self.max_hp;
    }

    /// Raise max hp permanently for the run.
    pub fn grow_max_hp(&mut self, amount: i32) {
        self.base_max_hp += amount;
        self.refresh_equipment_stats();
    }

    /// Scale max hp for the rest of the run and clamp hp to it.
    ///
    /// The factor applies to base and equipment hp alike, so swapping gear
    /// later keeps the same proportional cut.
    pub fn scale_max_hp(&mut self, factor: f64) {
        self.max_hp_factor *= factor;
        self.refresh_equipment_stats();
    }

    /// Mage magic missile: rolls the trigger chance and returns the bonus
    /// damage. Always `None` for other classes.
    pub fn magic_damage<R: Rng>(&self, rng: &mut R) -> Option<i32> {
        let ClassTraits::Mage {
            spell_power,
            magic_chance,
        } = self.traits
        else {
            return None;
        };

        if rng.random::<f64>() < magic_chance {
            let base = 10 + self.attributes.get(Attribute::Intelligence) as i32 * 3;
            Some((base as f64 * (1.0 + spell_power)) as i32)
        } else {
            None
        }
    }

    pub fn slot(&self, kind: EquipmentType) -> Option<&Equipment> {
        match kind {
            EquipmentType::Weapon => self.weapon.as_ref(),
            EquipmentType::Armor => self.armor.as_ref(),
        }
    }

    pub fn slot_mut(&mut self, kind: EquipmentType) -> &mut Option<Equipment> {
        match kind {
            EquipmentType::Weapon => &mut self.weapon,
            EquipmentType::Armor => &mut self.armor,
        }
    }

    pub fn equipped(&self) -> impl Iterator<Item = &Equipment> {
        self.weapon.iter().chain(self.armor.iter())
    }

    pub fn has_equipment(&self) -> bool {
        self.weapon.is_some() || self.armor.is_some()
    }

    /// Put an item in its slot, returning whatever it replaced.
    pub fn equip(&mut self, equipment: Equipment) -> Option<Equipment> {
        tracing::info!(%equipment, "equipped");
        let old = self.slot_mut(equipment.kind()).replace(equipment);
        self.refresh_equipment_stats();
        old
    }

    /// Sum of both slots' affix bonuses.
    pub fn equipment_stats(&self) -> AffixStats {
        self.equipped().fold(AffixStats::default(), |mut acc, eq| {
            acc += eq.stats();
            acc
        })
    }

    /// Recompute max hp, lifesteal, thorns and crit from the equipped items.
    /// Idempotent: repeated calls never stack the bonuses.
    pub fn refresh_equipment_stats(&mut self) {
        let stats = self.equipment_stats();
        self.max_hp = ((self.base_max_hp + stats.max_hp) as f64 * self.max_hp_factor) as i32;
        self.hp = self.hp.min(self.max_hp);
        self.lifesteal = stats.lifesteal;
        self.thorns = stats.thorns;
        self.crit_chance = stats.crit_chance;
    }

    /// Forge: re-roll the affixes of an equipped item for `cost` souls.
    pub fn reforge<R: Rng>(
        &mut self,
        kind: EquipmentType,
        cost: u32,
        rng: &mut R,
    ) -> Result<&Equipment, GameError> {
        if self.slot(kind).is_none() {
            return Err(GameError::NoEquipmentPresent(kind.to_string()));
        }
        self.spend_souls(cost)?;

        if let Some(equipment) = self.slot_mut(kind).as_mut() {
            equipment.reforge(rng);
        }
        self.refresh_equipment_stats();
        self.slot(kind)
            .ok_or_else(|| GameError::NoEquipmentPresent(kind.to_string()))
    }
}
