// src/dungeon/src/run.rs

use combat::{
    CombatEvent, CombatInput, DungeonPath, Encounter, EncounterOutcome, Monster, PathKind,
    TurnResult,
};
use error::GameError;
use events::{EventInput, EventKind, EventOutcome};
use hero::{Character, Class};
use items::{Equipment, EquipmentType};
use rand::Rng;
use save::PersistentProfile;
use serde::{Deserialize, Serialize};

use crate::{RunRules, Settlement};

/// Where a run currently stands.
///
/// Class selection happens before a [`Run`] exists, in [`begin_run`], so a
/// fresh run opens on the transition into wave 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RunPhase {
    PathSelect,
    Combat,
    LootResolution,
    EventCheck,
    FloorTransition,
    Victory,
    Defeat,
}

impl RunPhase {
    pub fn is_over(self) -> bool {
        matches!(self, RunPhase::Victory | RunPhase::Defeat)
    }
}

/// Everything the orchestrator needs from the player.
pub trait RunInput: CombatInput + EventInput {
    fn choose_class(&mut self) -> Class;
    fn choose_path(&mut self, hero: &Character, floor: u32) -> PathKind;
    /// Asked at victory for equipped items that are not archived automatically.
    fn archive_common(&mut self, equipment: &Equipment) -> bool;

    /// Offered between waves; `None` leaves the forge.
    fn forge(&mut self, _hero: &Character) -> Option<EquipmentType> {
        None
    }

    /// Called with every event as it happens.
    fn observe(&mut self, _event: &RunEvent) {}
}

/// Progress notifications for the shell
#[derive(Debug, Clone, PartialEq)]
pub enum RunEvent {
    PathChosen {
        floor: u32,
        path: DungeonPath,
    },
    WaveStarted {
        floor: u32,
        stage: u32,
        wave: u32,
        monster: Monster,
    },
    Combat(CombatEvent),
    EncounterEnded {
        outcome: EncounterOutcome,
        turns: u32,
    },
    Event {
        kind: EventKind,
        outcome: EventOutcome,
    },
    EventSkipped {
        kind: EventKind,
        reason: String,
    },
    Reforged(Equipment),
    ForgeRefused(String),
    Settled(Settlement),
}

/// Open a new run: counts it in the records and builds the hero.
pub fn begin_run(profile: &mut PersistentProfile, class: Class) -> Character {
    profile.records.add_run();
    tracing::info!(%class, total_runs = profile.records.total_runs, "run started");
    Character::new(class, profile)
}

/// State of a run in progress
#[derive(Debug, Clone)]
pub struct Run {
    hero: Character,
    wave: u32,
    path: DungeonPath,
    phase: RunPhase,
    encounter: Option<Encounter>,
    rules: RunRules,
}

impl Run {
    pub fn new(hero: Character, rules: RunRules) -> Self {
        Self {
            hero,
            wave: 0,
            path: DungeonPath::safe(),
            phase: RunPhase::FloorTransition,
            encounter: None,
            rules,
        }
    }

    pub fn hero(&self) -> &Character {
        &self.hero
    }

    pub fn wave(&self) -> u32 {
        self.wave
    }

    pub fn floor(&self) -> u32 {
        self.rules.floor_of(self.wave)
    }

    pub fn path(&self) -> &DungeonPath {
        &self.path
    }

    pub fn phase(&self) -> RunPhase {
        self.phase
    }

    pub fn rules(&self) -> &RunRules {
        &self.rules
    }

    /// The fight in progress, if any.
    pub fn encounter(&self) -> Option<&Encounter> {
        self.encounter.as_ref()
    }

    /// Advance by one phase, or by one combat turn while fighting.
    ///
    /// Rule rejections inside events and the forge are reported as events;
    /// only unrecoverable errors are returned.
    pub fn step<I, R>(&mut self, input: &mut I, rng: &mut R) -> Result<Vec<RunEvent>, GameError>
    where
        I: RunInput + ?Sized,
        R: Rng,
    {
        let mut out = Vec::new();
        match self.phase {
            RunPhase::FloorTransition => self.transition(input, rng, &mut out)?,
            RunPhase::PathSelect => {
                let floor = self.floor();
                self.path = input.choose_path(&self.hero, floor).path();
                self.hero.restore_full();
                tracing::debug!(floor, path = %self.path.name, "path chosen");
                out.push(RunEvent::PathChosen {
                    floor,
                    path: self.path.clone(),
                });
                self.phase = RunPhase::Combat;
            }
            RunPhase::Combat => self.fight(input, rng, &mut out),
            RunPhase::LootResolution => {
                if let Some(mut encounter) = self.encounter.take() {
                    let seen = encounter.events().len();
                    encounter.claim_spoils(&mut self.hero, input, rng);
                    out.extend(encounter.events()[seen..].iter().cloned().map(RunEvent::Combat));

                    let boss = encounter.monster().is_boss();
                    let report = encounter.into_report(EncounterOutcome::Victory);
                    out.push(RunEvent::EncounterEnded {
                        outcome: report.outcome,
                        turns: report.turns,
                    });
                    self.phase = if boss && self.wave < self.rules.final_wave() {
                        RunPhase::EventCheck
                    } else {
                        RunPhase::FloorTransition
                    };
                } else {
                    self.phase = RunPhase::FloorTransition;
                }
            }
            RunPhase::EventCheck => {
                if let Some(kind) = events::roll_event(&self.hero, self.rules.event_chance, rng) {
                    match events::resolve(&mut self.hero, kind, input, rng) {
                        Ok(outcome) => out.push(RunEvent::Event { kind, outcome }),
                        Err(err) if err.is_recoverable() => out.push(RunEvent::EventSkipped {
                            kind,
                            reason: err.to_string(),
                        }),
                        Err(err) => return Err(err),
                    }
                }
                self.phase = RunPhase::FloorTransition;
            }
            RunPhase::Victory | RunPhase::Defeat => {}
        }

        for event in &out {
            input.observe(event);
        }
        Ok(out)
    }

    /// Between waves: forge visits, then the next wave or the exit.
    fn transition<I, R>(
        &mut self,
        input: &mut I,
        rng: &mut R,
        out: &mut Vec<RunEvent>,
    ) -> Result<(), GameError>
    where
        I: RunInput + ?Sized,
        R: Rng,
    {
        if self.wave > 0 {
            while let Some(kind) = input.forge(&self.hero) {
                match self.hero.reforge(kind, self.rules.forge_cost, rng) {
                    Ok(equipment) => out.push(RunEvent::Reforged(equipment.clone())),
                    Err(err) if err.is_recoverable() => {
                        out.push(RunEvent::ForgeRefused(err.to_string()))
                    }
                    Err(err) => return Err(err),
                }
            }
        }

        if self.wave >= self.rules.final_wave() {
            self.phase = RunPhase::Victory;
            return Ok(());
        }

        self.wave += 1;
        self.phase = if self.rules.is_path_wave(self.wave) {
            RunPhase::PathSelect
        } else {
            RunPhase::Combat
        };
        Ok(())
    }

    fn fight<I, R>(&mut self, input: &mut I, rng: &mut R, out: &mut Vec<RunEvent>)
    where
        I: RunInput + ?Sized,
        R: Rng,
    {
        if self.encounter.is_none() {
            let monster = self.rules.spawn(self.wave, &self.hero, rng);
            let encounter = Encounter::new(monster, &self.path);
            out.push(RunEvent::WaveStarted {
                floor: self.rules.floor_of(self.wave),
                stage: self.rules.stage_of(self.wave),
                wave: self.wave,
                monster: encounter.monster().clone(),
            });
            self.encounter = Some(encounter);
        }
        let Some(encounter) = self.encounter.as_mut() else {
            return;
        };

        let seen = encounter.events().len();
        let action = input.choose_action(&self.hero, encounter.monster());
        let result = encounter.turn(&mut self.hero, action, rng);
        out.extend(encounter.events()[seen..].iter().cloned().map(RunEvent::Combat));

        let finished = match result {
            TurnResult::Continue => return,
            TurnResult::MonsterSlain => {
                self.phase = RunPhase::LootResolution;
                return;
            }
            TurnResult::Fled => {
                self.phase = RunPhase::FloorTransition;
                EncounterOutcome::Fled
            }
            TurnResult::HeroFell => {
                self.phase = RunPhase::Defeat;
                EncounterOutcome::Defeat
            }
        };

        if let Some(encounter) = self.encounter.take() {
            let report = encounter.into_report(finished);
            out.push(RunEvent::EncounterEnded {
                outcome: report.outcome,
                turns: report.turns,
            });
        }
    }

    /// Pay out a finished run. `None` while the run is still going.
    pub fn settle<I>(&self, profile: &mut PersistentProfile, input: &mut I) -> Option<Settlement>
    where
        I: RunInput + ?Sized,
    {
        let settlement = match self.phase {
            RunPhase::Victory => self.rules.settle_victory(profile, &self.hero, self.wave, |eq| {
                input.archive_common(eq)
            }),
            RunPhase::Defeat => self.rules.settle_defeat(profile, &self.hero, self.wave),
            _ => return None,
        };
        input.observe(&RunEvent::Settled(settlement.clone()));
        Some(settlement)
    }
}

/// Play a whole run from class selection to settlement.
pub fn play<I, R>(
    profile: &mut PersistentProfile,
    input: &mut I,
    rng: &mut R,
    rules: RunRules,
) -> Result<Settlement, GameError>
where
    I: RunInput + ?Sized,
    R: Rng,
{
    let class = input.choose_class();
    let mut run = Run::new(begin_run(profile, class), rules);

    loop {
        run.step(input, rng)?;
        if let Some(settlement) = run.settle(profile, input) {
            return Ok(settlement);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Ending, RunOutcome};
    use combat::CombatAction;
    use events::{AltarChoice, JudgmentChoice, PactChoice};
    use hero::GameRng;
    use pretty_assertions::assert_eq;

    /// Always attacks, never takes events, archives everything.
    struct Autopilot {
        class: Class,
        path: PathKind,
        equip: bool,
        forge_requests: Vec<EquipmentType>,
        observed: Vec<RunEvent>,
    }

    impl Autopilot {
        fn new(class: Class) -> Self {
            Self {
                class,
                path: PathKind::Danger,
                equip: true,
                forge_requests: Vec::new(),
                observed: Vec::new(),
            }
        }

        fn paths_chosen(&self) -> usize {
            self.observed
                .iter()
                .filter(|e| matches!(e, RunEvent::PathChosen { .. }))
                .count()
        }
    }

    impl CombatInput for Autopilot {
        fn choose_action(&mut self, _: &Character, _: &Monster) -> CombatAction {
            CombatAction::Attack
        }

        fn equip_drop(&mut self, _: &Character, _: &Equipment) -> bool {
            self.equip
        }
    }

    impl EventInput for Autopilot {
        fn accept_event(&mut self, _: &Character, _: EventKind) -> bool {
            false
        }

        fn altar(&mut self, _: &Character) -> AltarChoice {
            AltarChoice::Souls
        }

        fn demon_pact(&mut self, _: &Character) -> PactChoice {
            PactChoice::Decline
        }

        fn judgment(&mut self, _: &Character) -> JudgmentChoice {
            JudgmentChoice::Redemption
        }
    }

    impl RunInput for Autopilot {
        fn choose_class(&mut self) -> Class {
            self.class
        }

        fn choose_path(&mut self, _: &Character, _: u32) -> PathKind {
            self.path
        }

        fn archive_common(&mut self, _: &Equipment) -> bool {
            true
        }

        fn forge(&mut self, _: &Character) -> Option<EquipmentType> {
            self.forge_requests.pop()
        }

        fn observe(&mut self, event: &RunEvent) {
            self.observed.push(event.clone());
        }
    }

    #[test]
    fn begin_run_counts_the_run() {
        let mut profile = PersistentProfile::default();
        let hero = begin_run(&mut profile, Class::Mage);
        assert_eq!(profile.records.total_runs, 1);
        assert_eq!(hero.class(), Class::Mage);
    }

    #[test]
    fn overpowered_hero_clears_the_dungeon() {
        let mut profile = PersistentProfile::default();
        profile.shop.attack_level = 200;
        let mut input = Autopilot::new(Class::Warrior);
        let mut rng = GameRng::new(2024);

        let settlement = play(&mut profile, &mut input, &mut rng, RunRules::default())
            .expect("no unrecoverable errors");

        assert_eq!(settlement.outcome, RunOutcome::Victory);
        assert_eq!(settlement.wave, 12);
        assert_eq!(profile.records.total_runs, 1);
        assert_eq!(profile.records.highest_wave, 12);
        assert!(profile.records.total_boss_kills >= 3);
        assert!(settlement.fragments >= 225);
        assert_eq!(profile.fragments, settlement.fragments);
        assert_eq!(input.paths_chosen(), 4);
        assert!(matches!(
            settlement.ending,
            Some(Ending::DungeonConqueror | Ending::LivingLegend)
        ));
        assert!(matches!(
            input.observed.last(),
            Some(RunEvent::Settled(_))
        ));
    }

    #[test]
    fn fragile_hero_falls_on_the_first_wave() {
        let mut profile = PersistentProfile::default();
        let mut hero = begin_run(&mut profile, Class::Warrior);
        hero.scale_max_hp(0.01);
        hero.potions = 0;
        let mut run = Run::new(hero, RunRules::default());
        let mut input = Autopilot::new(Class::Warrior);
        input.path = PathKind::Safe;
        let mut rng = GameRng::new(1);

        while !run.phase().is_over() {
            run.step(&mut input, &mut rng).expect("step");
        }
        let settlement = run.settle(&mut profile, &mut input).expect("run is over");

        assert_eq!(run.phase(), RunPhase::Defeat);
        assert_eq!(settlement.wave, 1);
        assert_eq!(settlement.fragments, 5);
        assert_eq!(profile.records.highest_wave, 0);
    }

    #[test]
    fn phases_follow_the_wave_plan() {
        let mut profile = PersistentProfile::default();
        profile.shop.attack_level = 200;
        let hero = begin_run(&mut profile, Class::Warrior);
        let mut run = Run::new(hero, RunRules::default());
        let mut input = Autopilot::new(Class::Warrior);
        input.equip = false;
        let mut rng = GameRng::new(8);

        assert_eq!((run.phase(), run.wave()), (RunPhase::FloorTransition, 0));
        run.step(&mut input, &mut rng).expect("step");
        assert_eq!((run.phase(), run.wave()), (RunPhase::PathSelect, 1));

        let events = run.step(&mut input, &mut rng).expect("step");
        assert!(matches!(events[0], RunEvent::PathChosen { floor: 1, .. }));
        assert_eq!(run.path(), &DungeonPath::danger());

        let events = run.step(&mut input, &mut rng).expect("step");
        assert!(matches!(events[0], RunEvent::WaveStarted { wave: 1, .. }));
        assert_eq!(run.phase(), RunPhase::LootResolution);

        run.step(&mut input, &mut rng).expect("step");
        assert_eq!(run.phase(), RunPhase::FloorTransition);
        assert!(run.encounter().is_none());

        // nothing equipped, so the forge turns the hero away
        input.forge_requests.push(EquipmentType::Weapon);
        let events = run.step(&mut input, &mut rng).expect("step");
        assert!(matches!(events[0], RunEvent::ForgeRefused(_)));
        assert_eq!((run.phase(), run.wave()), (RunPhase::Combat, 2));
    }

    fn champion_run(seed: u64) -> (Run, Autopilot, GameRng) {
        let mut profile = PersistentProfile::default();
        profile.shop.attack_level = 200;
        let hero = begin_run(&mut profile, Class::Warrior);
        let mut input = Autopilot::new(Class::Warrior);
        input.equip = false;
        (
            Run::new(hero, RunRules::default()),
            input,
            GameRng::new(seed),
        )
    }

    #[test]
    fn path_choice_restores_full_hp() {
        let (mut run, mut input, mut rng) = champion_run(5);

        while !(run.phase() == RunPhase::PathSelect && run.wave() == 4) {
            assert!(!run.phase().is_over(), "never reached the wave-4 path choice");
            run.step(&mut input, &mut rng).expect("step");
        }
        run.hero.take_damage(run.hero.hp - 1);
        assert_eq!(run.hero().hp, 1);

        let events = run.step(&mut input, &mut rng).expect("step");
        assert!(matches!(events[0], RunEvent::PathChosen { floor: 1, .. }));
        assert_eq!(run.phase(), RunPhase::Combat);
        assert_eq!(run.hero().hp, run.hero().max_hp);
    }

    #[test]
    fn events_follow_boss_kills_except_the_last() {
        let (mut run, mut input, mut rng) = champion_run(21);
        let mut after_loot = Vec::new();

        while !run.phase().is_over() {
            if run.phase() == RunPhase::LootResolution {
                let boss = run.encounter().is_some_and(|e| e.monster().is_boss());
                let wave = run.wave();
                run.step(&mut input, &mut rng).expect("step");
                after_loot.push((wave, boss, run.phase()));
            } else {
                run.step(&mut input, &mut rng).expect("step");
            }
        }

        assert_eq!(run.phase(), RunPhase::Victory);
        assert_eq!(after_loot.len(), 12);
        for (wave, boss, phase) in after_loot {
            let expected = if boss && wave < 12 {
                RunPhase::EventCheck
            } else {
                RunPhase::FloorTransition
            };
            assert_eq!(phase, expected, "after wave {wave}");
            match wave {
                4 | 8 | 12 => assert!(boss, "wave {wave} is a boss wave"),
                1 | 2 | 3 => assert!(!boss),
                _ => {}
            }
        }
    }
}
