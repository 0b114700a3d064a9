// src/save/src/shop.rs
//! Fragment sinks: the permanent shop and the class talent tree.

use error::GameError;
use strum::{Display, EnumIter, IntoEnumIterator};

use crate::PersistentProfile;

/// Permanent upgrades bought with fragments.
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, EnumIter)]
pub enum ShopUpgrade {
    #[strum(serialize = "attack +5")]
    Attack,
    #[strum(serialize = "max hp +20")]
    MaxHp,
    #[strum(serialize = "potion +1")]
    Potion,
}

impl ShopUpgrade {
    pub fn price(self) -> u32 {
        match self {
            ShopUpgrade::Attack => 20,
            ShopUpgrade::MaxHp => 15,
            ShopUpgrade::Potion => 10,
        }
    }

    /// Map a 1-based menu entry to an upgrade.
    pub fn from_choice(input: &str) -> Result<Self, GameError> {
        error::parse_choice(input, ShopUpgrade::iter())
    }

    pub fn level(self, profile: &PersistentProfile) -> u32 {
        match self {
            ShopUpgrade::Attack => profile.shop.attack_level,
            ShopUpgrade::MaxHp => profile.shop.hp_level,
            ShopUpgrade::Potion => profile.shop.potion_level,
        }
    }

    fn level_mut(self, profile: &mut PersistentProfile) -> &mut u32 {
        match self {
            ShopUpgrade::Attack => &mut profile.shop.attack_level,
            ShopUpgrade::MaxHp => &mut profile.shop.hp_level,
            ShopUpgrade::Potion => &mut profile.shop.potion_level,
        }
    }

    /// Buy one level. Returns the new level.
    pub fn purchase(self, profile: &mut PersistentProfile) -> Result<u32, GameError> {
        profile.spend_fragments(self.price())?;
        let level = self.level_mut(profile);
        *level += 1;
        tracing::info!(upgrade = %self, level = *level, "shop upgrade purchased");
        Ok(*level)
    }
}

/// Talent tree nodes: three per class.
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, EnumIter)]
pub enum TalentNode {
    #[strum(serialize = "strength mastery")]
    Strength,
    #[strum(serialize = "vitality mastery")]
    Vitality,
    #[strum(serialize = "shield mastery")]
    ShieldMaster,
    #[strum(serialize = "intelligence mastery")]
    Intelligence,
    #[strum(serialize = "spell power")]
    Spellpower,
    #[strum(serialize = "mana shield")]
    ManaShield,
}

impl TalentNode {
    pub fn cost(self) -> u32 {
        match self {
            TalentNode::Strength | TalentNode::Vitality | TalentNode::Intelligence => 10,
            TalentNode::Spellpower => 12,
            TalentNode::ShieldMaster | TalentNode::ManaShield => 15,
        }
    }

    /// Map a 1-based menu entry (warrior nodes first) to a node.
    pub fn from_choice(input: &str) -> Result<Self, GameError> {
        error::parse_choice(input, TalentNode::iter())
    }

    pub fn level(self, profile: &PersistentProfile) -> u32 {
        let tree = &profile.talent_tree;
        match self {
            TalentNode::Strength => tree.warrior.strength,
            TalentNode::Vitality => tree.warrior.vitality,
            TalentNode::ShieldMaster => tree.warrior.shield_master,
            TalentNode::Intelligence => tree.mage.intelligence,
            TalentNode::Spellpower => tree.mage.spellpower,
            TalentNode::ManaShield => tree.mage.mana_shield,
        }
    }

    fn level_mut(self, profile: &mut PersistentProfile) -> &mut u32 {
        let tree = &mut profile.talent_tree;
        match self {
            TalentNode::Strength => &mut tree.warrior.strength,
            TalentNode::Vitality => &mut tree.warrior.vitality,
            TalentNode::ShieldMaster => &mut tree.warrior.shield_master,
            TalentNode::Intelligence => &mut tree.mage.intelligence,
            TalentNode::Spellpower => &mut tree.mage.spellpower,
            TalentNode::ManaShield => &mut tree.mage.mana_shield,
        }
    }

    /// Raise the node one level. Returns the new level.
    pub fn upgrade(self, profile: &mut PersistentProfile) -> Result<u32, GameError> {
        profile.spend_fragments(self.cost())?;
        let level = self.level_mut(profile);
        *level += 1;
        tracing::info!(talent = %self, level = *level, "talent upgraded");
        Ok(*level)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rich() -> PersistentProfile {
        PersistentProfile {
            fragments: 100,
            ..Default::default()
        }
    }

    #[test]
    fn purchase_spends_fragments_and_raises_level() {
        let mut profile = rich();
        assert_eq!(ShopUpgrade::Attack.purchase(&mut profile).unwrap(), 1);
        assert_eq!(ShopUpgrade::Attack.purchase(&mut profile).unwrap(), 2);
        assert_eq!(profile.fragments, 60);
        assert_eq!(profile.shop.attack_level, 2);
    }

    #[test]
    fn purchase_without_fragments_is_a_no_op() {
        let mut profile = PersistentProfile {
            fragments: 9,
            ..Default::default()
        };
        let err = ShopUpgrade::Potion.purchase(&mut profile).unwrap_err();
        assert!(matches!(
            err,
            GameError::InsufficientCurrency {
                needed: 10,
                available: 9
            }
        ));
        assert_eq!(profile.fragments, 9);
        assert_eq!(profile.shop.potion_level, 0);
    }

    #[test]
    fn talent_costs_match_the_tree() {
        let costs: Vec<u32> = TalentNode::iter().map(TalentNode::cost).collect();
        assert_eq!(costs, vec![10, 10, 15, 10, 12, 15]);

        let mut profile = rich();
        TalentNode::Spellpower.upgrade(&mut profile).unwrap();
        TalentNode::ShieldMaster.upgrade(&mut profile).unwrap();
        assert_eq!(profile.talent_tree.mage.spellpower, 1);
        assert_eq!(profile.talent_tree.warrior.shield_master, 1);
        assert_eq!(profile.fragments, 73);
    }

    #[test]
    fn menu_choices_are_validated() {
        assert_eq!(ShopUpgrade::from_choice("2").unwrap(), ShopUpgrade::MaxHp);
        assert_eq!(TalentNode::from_choice(" 6 ").unwrap(), TalentNode::ManaShield);
        for bad in ["0", "4", "x", ""] {
            assert!(matches!(
                ShopUpgrade::from_choice(bad),
                Err(GameError::InvalidSelection(_))
            ));
        }
        assert!(TalentNode::from_choice("7").is_err());
    }
}
