//src/items/src/affix.rs
use rand::Rng;
use rand::seq::index;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::ops::AddAssign;
use strum::{Display, EnumCount, EnumIter, IntoEnumIterator};

use crate::Rarity;

/// Affix kind -> level. Ordered so serialized equipment is stable.
pub type AffixSet = BTreeMap<AffixKind, u32>;

/// The five affix kinds.
#[derive(
    Debug,
    Display,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    EnumIter,
    EnumCount,
    Serialize,
    Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum AffixKind {
    #[strum(serialize = "Strength")]
    Strength,
    #[strum(serialize = "Vitality")]
    Vitality,
    #[strum(serialize = "Lifesteal")]
    Lifesteal,
    #[strum(serialize = "Thorns")]
    Thorns,
    #[strum(serialize = "Crit")]
    CritChance,
}

impl AffixKind {
    /// Stat contribution of a single affix at `level`.
    pub fn modifier(self, level: u32) -> AffixStats {
        let mut stats = AffixStats::default();
        match self {
            AffixKind::Strength => stats.attack = level as i32 * 3,
            AffixKind::Vitality => stats.max_hp = level as i32 * 10,
            AffixKind::Lifesteal => stats.lifesteal = level as f64 * 0.05,
            AffixKind::Thorns => stats.thorns = level as i32 * 2,
            AffixKind::CritChance => stats.crit_chance = level as f64 * 0.05,
        }
        stats
    }
}

/// Stat bonuses summed over a set of affixes
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct AffixStats {
    pub attack: i32,
    pub max_hp: i32,
    pub lifesteal: f64,
    pub thorns: i32,
    pub crit_chance: f64,
}

impl AddAssign for AffixStats {
    fn add_assign(&mut self, rhs: Self) {
        self.attack += rhs.attack;
        self.max_hp += rhs.max_hp;
        self.lifesteal += rhs.lifesteal;
        self.thorns += rhs.thorns;
        self.crit_chance += rhs.crit_chance;
    }
}

impl AffixStats {
    pub fn from_affixes(affixes: &AffixSet) -> Self {
        affixes
            .iter()
            .fold(Self::default(), |mut acc, (kind, level)| {
                acc += kind.modifier(*level);
                acc
            })
    }
}

/// Roll a fresh affix set for `rarity`.
///
/// `rarity + 1` distinct kinds are sampled without replacement; every level is
/// `1..=3` scaled by `rarity + 1`.
pub fn generate_affixes<R: Rng>(rarity: Rarity, rng: &mut R) -> AffixSet {
    let kinds: Vec<AffixKind> = AffixKind::iter().collect();
    let count = rarity.affix_count().min(AffixKind::COUNT);
    let scale = rarity.ordinal() as u32 + 1;

    index::sample(rng, kinds.len(), count)
        .into_iter()
        .map(|i| (kinds[i], rng.random_range(1..=3u32) * scale))
        .collect()
}
