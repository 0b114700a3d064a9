// src/dungeon/src/settlement.rs

use combat::average_reward_multiplier;
use hero::Character;
use items::Equipment;
use save::PersistentProfile;
use serde::{Deserialize, Serialize};
use strum::Display;

use crate::RunRules;

/// Title awarded on victory.
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Ending {
    #[strum(serialize = "Escape Artist")]
    EscapeArtist,
    #[strum(serialize = "Fledgling")]
    Fledgling,
    #[strum(serialize = "Dungeon Conqueror")]
    DungeonConqueror,
    #[strum(serialize = "Living Legend")]
    LivingLegend,
}

impl Ending {
    pub fn from_boss_kills(kills: u32) -> Self {
        match kills {
            0 => Ending::EscapeArtist,
            1..=2 => Ending::Fledgling,
            3 => Ending::DungeonConqueror,
            _ => Ending::LivingLegend,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RunOutcome {
    Victory,
    Defeat,
}

/// What a finished run paid into the profile
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settlement {
    pub outcome: RunOutcome,
    pub wave: u32,
    pub fragments: u32,
    /// Items moved into the profile's storage
    pub archived: Vec<Equipment>,
    /// Victory only
    pub ending: Option<Ending>,
    pub hidden_boss_defeated: bool,
}

impl RunRules {
    /// Fragments for clearing the dungeon, before souls are added.
    pub fn victory_fragments(&self, hidden_boss_defeated: bool) -> u32 {
        let base = (self.victory_base as f64 * average_reward_multiplier()).floor() as u32;
        if hidden_boss_defeated {
            base + self.hidden_boss_bonus
        } else {
            base
        }
    }

    pub fn settle_victory<F>(
        &self,
        profile: &mut PersistentProfile,
        hero: &Character,
        wave: u32,
        mut confirm: F,
    ) -> Settlement
    where
        F: FnMut(&Equipment) -> bool,
    {
        profile.records.record_wave(wave);
        profile.records.add_boss_kills(hero.boss_kills);
        if hero.hidden_boss_defeated {
            profile.records.add_greed_kill();
        }

        let fragments = self.victory_fragments(hero.hidden_boss_defeated) + hero.souls;
        profile.add_fragments(fragments);

        // rare and better are kept without asking
        let archived: Vec<Equipment> = hero
            .equipped()
            .filter(|eq| eq.auto_archived() || confirm(*eq))
            .cloned()
            .collect();
        for equipment in &archived {
            profile.archive(equipment.clone());
        }

        let ending = Ending::from_boss_kills(hero.boss_kills);
        tracing::info!(
            wave,
            fragments,
            archived = archived.len(),
            %ending,
            "run cleared"
        );

        Settlement {
            outcome: RunOutcome::Victory,
            wave,
            fragments,
            archived,
            ending: Some(ending),
            hidden_boss_defeated: hero.hidden_boss_defeated,
        }
    }

    /// Death pays `wave * 5 + souls / 2`. Records are left alone.
    pub fn settle_defeat(
        &self,
        profile: &mut PersistentProfile,
        hero: &Character,
        wave: u32,
    ) -> Settlement {
        let fragments = wave * 5 + hero.souls / 2;
        profile.add_fragments(fragments);
        tracing::info!(wave, fragments, "hero fell");

        Settlement {
            outcome: RunOutcome::Defeat,
            wave,
            fragments,
            archived: Vec::new(),
            ending: None,
            hidden_boss_defeated: hero.hidden_boss_defeated,
        }
    }
}

/// [`RunRules::settle_victory`] with the default rules.
pub fn settle_victory<F>(
    profile: &mut PersistentProfile,
    hero: &Character,
    wave: u32,
    confirm: F,
) -> Settlement
where
    F: FnMut(&Equipment) -> bool,
{
    RunRules::default().settle_victory(profile, hero, wave, confirm)
}

pub fn settle_defeat(profile: &mut PersistentProfile, hero: &Character, wave: u32) -> Settlement {
    RunRules::default().settle_defeat(profile, hero, wave)
}
