//! Narrative events offered after boss kills.
//!
//! Each event is a plain tagged variant. [`resolve`] asks the player through
//! [`EventInput`] and dispatches to the pure transition for that tag; the
//! transitions are public so a shell can also drive them directly.

mod base;
mod chain;

use error::GameError;
use hero::Character;
use items::AffixKind;
use items::EquipmentType;
use rand::Rng;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, IntoEnumIterator};

pub use crate::base::{healing_spring, lucky_chest, mirror, traveling_merchant};
pub use crate::chain::{
    AltarChoice, JudgmentChoice, PactChoice, altar, angel_judgment, chain_event, demon_pact,
};

/// Chance that the post-boss eligibility check produces an event
pub const EVENT_CHANCE: f64 = 0.4;

/// Random events offered after boss fights.
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, Hash, EnumIter, Serialize, Deserialize)]
pub enum EventKind {
    #[strum(serialize = "Healing Spring")]
    HealingSpring,
    #[strum(serialize = "Lucky Chest")]
    LuckyChest,
    #[strum(serialize = "Mirror")]
    Mirror,
    #[strum(serialize = "Traveling Merchant")]
    TravelingMerchant,
    #[strum(serialize = "Altar")]
    Altar,
    #[strum(serialize = "Demon Pact")]
    DemonPact,
    #[strum(serialize = "Angel Judgment")]
    AngelJudgment,
}

impl EventKind {
    pub fn title(self) -> String {
        self.to_string()
    }

    pub fn description(self) -> &'static str {
        match self {
            EventKind::HealingSpring => "Restore all hp, but lose every potion.",
            EventKind::LuckyChest => "Gain 1-3 potions or 10-30 souls.",
            EventKind::Mirror => {
                "50%: strengthen an affix of your equipment. 50%: lose 20% of current hp."
            }
            EventKind::TravelingMerchant => "Trade 15 souls for 1 potion.",
            EventKind::Altar => "Sacrifice 30 souls for power, or your blood for a curse.",
            EventKind::DemonPact => "A demon, drawn by your sacrifice, offers a pact.",
            EventKind::AngelJudgment => "Your soul is tainted. Will you seek redemption?",
        }
    }

    /// Souls charged when the event is accepted.
    pub fn cost(self) -> u32 {
        match self {
            EventKind::TravelingMerchant => 15,
            _ => 0,
        }
    }

    pub fn is_chain(self) -> bool {
        matches!(
            self,
            EventKind::Altar | EventKind::DemonPact | EventKind::AngelJudgment
        )
    }

    /// Events available regardless of narrative state.
    pub fn base_events() -> impl Iterator<Item = EventKind> {
        EventKind::iter().filter(|e| !e.is_chain())
    }
}

/// What an applied event did
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum EventOutcome {
    Declined,
    SpringHealed { hp: i32 },
    ChestPotions(u32),
    ChestSouls(u32),
    AffixStrengthened {
        slot: EquipmentType,
        affix: AffixKind,
        level: u32,
    },
    /// Mirror picked an item with no affixes
    MirrorFizzled,
    MirrorWound(i32),
    PotionBought,
    AltarPower,
    AltarCurse { hp_lost: i32, curse_level: u32 },
    PactSigned,
    PactRefused,
    Redeemed,
    Defied { max_hp: i32 },
    Blessed,
}

/// Player decisions the event engine needs
pub trait EventInput {
    /// Accept or walk past a drawn event.
    fn accept_event(&mut self, hero: &Character, event: EventKind) -> bool;
    fn altar(&mut self, hero: &Character) -> AltarChoice;
    fn demon_pact(&mut self, hero: &Character) -> PactChoice;
    /// Only asked while the hero carries a curse.
    fn judgment(&mut self, hero: &Character) -> JudgmentChoice;
}

/// Chain event (at most one) followed by the base events.
pub fn event_pool(hero: &Character) -> Vec<EventKind> {
    chain_event(&hero.flags)
        .into_iter()
        .chain(EventKind::base_events())
        .collect()
}

/// One uniform draw from the current pool.
pub fn draw_event<R: Rng>(hero: &Character, rng: &mut R) -> EventKind {
    let pool = event_pool(hero);
    pool[rng.random_range(0..pool.len())]
}

/// Roll the eligibility check; `Some(event)` when one is offered.
pub fn roll_event<R: Rng>(hero: &Character, chance: f64, rng: &mut R) -> Option<EventKind> {
    if rng.random_bool(chance.clamp(0.0, 1.0)) {
        Some(draw_event(hero, rng))
    } else {
        None
    }
}

/// Offer `event` and apply it if accepted.
///
/// Rule rejections (souls short, nothing equipped for the mirror) come back as
/// errors with the hero untouched.
pub fn resolve<I, R>(
    hero: &mut Character,
    event: EventKind,
    input: &mut I,
    rng: &mut R,
) -> Result<EventOutcome, GameError>
where
    I: EventInput + ?Sized,
    R: Rng,
{
    if !input.accept_event(hero, event) {
        tracing::debug!(%event, "event declined");
        return Ok(EventOutcome::Declined);
    }

    let outcome = match event {
        EventKind::HealingSpring => healing_spring(hero),
        EventKind::LuckyChest => lucky_chest(hero, rng),
        EventKind::Mirror => mirror(hero, rng)?,
        EventKind::TravelingMerchant => traveling_merchant(hero)?,
        EventKind::Altar => {
            let choice = input.altar(hero);
            altar(hero, choice)?
        }
        EventKind::DemonPact => {
            let choice = input.demon_pact(hero);
            demon_pact(hero, choice)
        }
        EventKind::AngelJudgment => {
            let choice = if hero.flags.curse_level > 0 {
                input.judgment(hero)
            } else {
                JudgmentChoice::Redemption
            };
            angel_judgment(hero, choice)
        }
    };

    tracing::info!(%event, ?outcome, "event resolved");
    Ok(outcome)
}
