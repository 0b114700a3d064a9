//! Altar → Demon Pact → Angel Judgment.

use error::GameError;
use hero::{Character, EventFlags};
use serde::{Deserialize, Serialize};
use strum::{EnumIter, IntoEnumIterator};

use crate::{EventKind, EventOutcome};

const ALTAR_SOUL_COST: u32 = 30;
const ALTAR_ATTACK_BONUS: i32 = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, Serialize, Deserialize)]
pub enum AltarChoice {
    /// 30 souls for +5 attack
    Souls,
    /// 20% of current hp for a curse level
    Blood,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, Serialize, Deserialize)]
pub enum PactChoice {
    Accept,
    Decline,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, Serialize, Deserialize)]
pub enum JudgmentChoice {
    Redemption,
    Defiance,
}

macro_rules! menu_choice {
    ($($ty:ty),*) => {
        $(impl $ty {
            /// Map a 1-based menu entry to a choice.
            pub fn from_choice(input: &str) -> Result<Self, GameError> {
                error::parse_choice(input, <$ty>::iter())
            }
        })*
    };
}

menu_choice!(AltarChoice, PactChoice, JudgmentChoice);

/// The chain event currently unlocked, checked in strict priority order.
pub fn chain_event(flags: &EventFlags) -> Option<EventKind> {
    if flags.altar_sacrifice == 0 {
        Some(EventKind::Altar)
    } else if !flags.demon_pact {
        Some(EventKind::DemonPact)
    } else if !flags.holy_blessing {
        Some(EventKind::AngelJudgment)
    } else {
        None
    }
}

/// Either choice counts as a sacrifice; an unaffordable soul offering does not.
pub fn altar(hero: &mut Character, choice: AltarChoice) -> Result<EventOutcome, GameError> {
    match choice {
        AltarChoice::Souls => {
            hero.spend_souls(ALTAR_SOUL_COST)?;
            hero.attack += ALTAR_ATTACK_BONUS;
            hero.flags.altar_sacrifice += 1;
            Ok(EventOutcome::AltarPower)
        }
        AltarChoice::Blood => {
            let hp_lost = (hero.hp as f64 * 0.2) as i32;
            hero.take_damage(hp_lost);
            hero.flags.curse_level += 1;
            hero.flags.altar_sacrifice += 1;
            Ok(EventOutcome::AltarCurse {
                hp_lost,
                curse_level: hero.flags.curse_level,
            })
        }
    }
}

/// Signing doubles attack; monster hits grow by half for the rest of the run.
pub fn demon_pact(hero: &mut Character, choice: PactChoice) -> EventOutcome {
    match choice {
        PactChoice::Accept => {
            hero.attack *= 2;
            hero.flags.demon_pact = true;
            EventOutcome::PactSigned
        }
        PactChoice::Decline => EventOutcome::PactRefused,
    }
}

/// `choice` only matters while cursed; an uncursed hero is simply blessed.
pub fn angel_judgment(hero: &mut Character, choice: JudgmentChoice) -> EventOutcome {
    if hero.flags.curse_level == 0 {
        hero.flags.holy_blessing = true;
        hero.grow_max_hp(20);
        hero.hp += 20;
        return EventOutcome::Blessed;
    }

    match choice {
        JudgmentChoice::Redemption => {
            hero.hp = (hero.hp / 2).max(1);
            hero.flags.demon_pact = false;
            hero.flags.curse_level = 0;
            hero.flags.holy_blessing = true;
            // undo the pact's doubling
            hero.attack = (hero.attack as f64 * 0.5) as i32;
            EventOutcome::Redeemed
        }
        JudgmentChoice::Defiance => {
            hero.scale_max_hp(0.8);
            EventOutcome::Defied {
                max_hp: hero.max_hp,
            }
        }
    }
}
