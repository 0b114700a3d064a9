//! Scripted player shared by the integration tests.
#![allow(dead_code)]

use dungeon_souls::combat::{CombatAction, CombatInput, Monster, PathKind};
use dungeon_souls::dungeon::{RunEvent, RunInput};
use dungeon_souls::events::{AltarChoice, EventInput, EventKind, JudgmentChoice, PactChoice};
use dungeon_souls::hero::{Character, Class};
use dungeon_souls::items::Equipment;

/// Deterministic stand-in for a human player.
pub struct ScriptedPlayer {
    pub class: Class,
    pub path: PathKind,
    pub accept_events: bool,
    pub altar: AltarChoice,
    pub pact: PactChoice,
    pub judgment: JudgmentChoice,
    pub equip_drops: bool,
    pub archive_commons: bool,
    pub log: Vec<RunEvent>,
}

impl ScriptedPlayer {
    pub fn new(class: Class) -> Self {
        Self {
            class,
            path: PathKind::Safe,
            accept_events: false,
            altar: AltarChoice::Souls,
            pact: PactChoice::Decline,
            judgment: JudgmentChoice::Redemption,
            equip_drops: true,
            archive_commons: true,
            log: Vec::new(),
        }
    }

    pub fn count(&self, matcher: impl Fn(&RunEvent) -> bool) -> usize {
        self.log.iter().filter(|e| matcher(e)).count()
    }
}

impl CombatInput for ScriptedPlayer {
    fn choose_action(&mut self, _: &Character, _: &Monster) -> CombatAction {
        CombatAction::Attack
    }

    fn equip_drop(&mut self, _: &Character, _: &Equipment) -> bool {
        self.equip_drops
    }
}

impl EventInput for ScriptedPlayer {
    fn accept_event(&mut self, _: &Character, _: EventKind) -> bool {
        self.accept_events
    }

    fn altar(&mut self, _: &Character) -> AltarChoice {
        self.altar
    }

    fn demon_pact(&mut self, _: &Character) -> PactChoice {
        self.pact
    }

    fn judgment(&mut self, _: &Character) -> JudgmentChoice {
        self.judgment
    }
}

impl RunInput for ScriptedPlayer {
    fn choose_class(&mut self) -> Class {
        self.class
    }

    fn choose_path(&mut self, _: &Character, _: u32) -> PathKind {
        self.path
    }

    fn archive_common(&mut self, _: &Equipment) -> bool {
        self.archive_commons
    }

    fn observe(&mut self, event: &RunEvent) {
        self.log.push(event.clone());
    }
}
