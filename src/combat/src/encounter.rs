// src/combat/src/encounter.rs
//! Turn resolution for a single fight.

use hero::{Character, Perk, Upgrade};
use items::Equipment;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::constants::*;
use crate::{DungeonPath, Loot, Monster, roll_loot};

/// What the player does on their turn.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CombatAction {
    Attack,
    Flee,
    UseConsumable,
}

/// Player decisions during a fight
pub trait CombatInput {
    fn choose_action(&mut self, hero: &Character, monster: &Monster) -> CombatAction;

    /// Whether to equip a dropped item, replacing the same slot.
    fn equip_drop(&mut self, hero: &Character, equipment: &Equipment) -> bool;
}

/// What happened, in order. Rendering is left to the caller.
#[derive(Clone, Debug, PartialEq)]
pub enum CombatEvent {
    Struck {
        damage: i32,
        crit: bool,
        magic: Option<i32>,
    },
    FleeFailed,
    Fled,
    PotionUsed {
        healed: i32,
    },
    NoPotion,
    Thorns {
        damage: i32,
    },
    Retaliated {
        damage: i32,
    },
    MonsterSlain {
        souls: u32,
    },
    Upgraded(Upgrade),
    PotionsFound(u32),
    Equipped {
        equipment: Equipment,
        replaced: Option<Equipment>,
    },
    LeftBehind(Equipment),
    Lifesteal {
        healed: i32,
    },
    HeroFell,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TurnResult {
    Continue,
    MonsterSlain,
    Fled,
    HeroFell,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EncounterOutcome {
    Victory,
    Fled,
    Defeat,
}

#[derive(Clone, Debug)]
pub struct EncounterReport {
    pub outcome: EncounterOutcome,
    /// The opponent as it ended the fight (scaled stats, remaining hp)
    pub monster: Monster,
    pub turns: u32,
    pub events: Vec<CombatEvent>,
}

impl EncounterReport {
    pub fn is_victory(&self) -> bool {
        self.outcome == EncounterOutcome::Victory
    }
}

/// A fight in progress. The monster is scaled by the path once, on creation.
#[derive(Clone, Debug)]
pub struct Encounter {
    monster: Monster,
    last_damage: i32,
    turns: u32,
    events: Vec<CombatEvent>,
}

impl Encounter {
    pub fn new(mut monster: Monster, path: &DungeonPath) -> Self {
        path.apply_difficulty(&mut monster);
        tracing::debug!(
            monster = %monster.name,
            hp = monster.hp,
            attack = monster.attack,
            path = %path.name,
            "encounter started"
        );
        Self {
            monster,
            last_damage: 0,
            turns: 0,
            events: Vec::new(),
        }
    }

    pub fn monster(&self) -> &Monster {
        &self.monster
    }

    pub fn events(&self) -> &[CombatEvent] {
        &self.events
    }

    /// Resolve one player action and, unless it ended the fight or was a
    /// failed potion use, the monster's answer.
    pub fn turn<R: Rng>(
        &mut self,
        hero: &mut Character,
        action: CombatAction,
        rng: &mut R,
    ) -> TurnResult {
        self.turns += 1;
        match action {
            CombatAction::Attack => {
                self.strike(hero, rng);
                if !self.monster.is_alive() {
                    return TurnResult::MonsterSlain;
                }
            }
            CombatAction::Flee => {
                if rng.random_bool(FLEE_CHANCE) {
                    self.events.push(CombatEvent::Fled);
                    return TurnResult::Fled;
                }
                self.events.push(CombatEvent::FleeFailed);
            }
            CombatAction::UseConsumable => match hero.use_consumable() {
                Some(healed) => self.events.push(CombatEvent::PotionUsed { healed }),
                None => {
                    self.events.push(CombatEvent::NoPotion);
                    return TurnResult::Continue;
                }
            },
        }
        self.retaliate(hero)
    }

    fn strike<R: Rng>(&mut self, hero: &Character, rng: &mut R) {
        let mut damage = hero.power();
        let crit = hero.has_perk(Perk::Crit) && rng.random_bool(CRIT_CHANCE);
        if crit {
            damage *= CRIT_MULTIPLIER;
        }
        let magic = hero.magic_damage(rng);
        damage += magic.unwrap_or(0);

        self.monster.take_damage(damage);
        self.last_damage = damage;
        self.events.push(CombatEvent::Struck {
            damage,
            crit,
            magic,
        });
    }

    fn retaliate(&mut self, hero: &mut Character) -> TurnResult {
        let mut damage = self.monster.attack;
        if hero.has_perk(Perk::Shield) {
            damage = (damage - SHIELD_REDUCTION).max(MIN_DAMAGE);
        }
        if hero.flags.demon_pact {
            damage = (damage as f64 * DEMON_PACT_MULTIPLIER) as i32;
        }

        hero.refresh_equipment_stats();
        if hero.thorns > 0 {
            self.monster.take_damage(hero.thorns);
            self.events.push(CombatEvent::Thorns {
                damage: hero.thorns,
            });
        }

        hero.take_damage(damage);
        self.events.push(CombatEvent::Retaliated { damage });

        // a double knockout counts as a defeat
        if !hero.is_alive() {
            self.events.push(CombatEvent::HeroFell);
            TurnResult::HeroFell
        } else if !self.monster.is_alive() {
            TurnResult::MonsterSlain
        } else {
            TurnResult::Continue
        }
    }

    /// Souls, boss bookkeeping, drops and lifesteal for a kill.
    pub fn claim_spoils<I, R>(&mut self, hero: &mut Character, input: &mut I, rng: &mut R)
    where
        I: CombatInput + ?Sized,
        R: Rng,
    {
        let souls = self.monster.souls;
        tracing::info!(monster = %self.monster.name, souls, "monster slain");
        self.events.push(CombatEvent::MonsterSlain { souls });
        for upgrade in hero.collect(souls, rng) {
            self.events.push(CombatEvent::Upgraded(upgrade));
        }

        if self.monster.is_boss() {
            hero.boss_kills += 1;
        }
        if self.monster.is_hidden_boss() {
            hero.hidden_boss_defeated = true;
        }

        for loot in roll_loot(&self.monster, rng) {
            match loot {
                Loot::Potions(count) => {
                    hero.potions += count;
                    self.events.push(CombatEvent::PotionsFound(count));
                }
                Loot::Equipment(equipment) => {
                    if input.equip_drop(hero, &equipment) {
                        let replaced = hero.equip(equipment.clone());
                        self.events.push(CombatEvent::Equipped {
                            equipment,
                            replaced,
                        });
                    } else {
                        self.events.push(CombatEvent::LeftBehind(equipment));
                    }
                }
            }
        }

        if hero.has_perk(Perk::Lifesteal) || hero.lifesteal > 0.0 {
            let amount =
                LIFESTEAL_BASE_HEAL + (hero.lifesteal * self.last_damage as f64).floor() as i32;
            let healed = hero.heal(amount);
            self.events.push(CombatEvent::Lifesteal { healed });
        }
    }

    pub fn into_report(self, outcome: EncounterOutcome) -> EncounterReport {
        EncounterReport {
            outcome,
            monster: self.monster,
            turns: self.turns,
            events: self.events,
        }
    }
}

/// Fight until one side falls or the player escapes.
pub fn run_encounter<I, R>(
    hero: &mut Character,
    monster: Monster,
    path: &DungeonPath,
    input: &mut I,
    rng: &mut R,
) -> EncounterReport
where
    I: CombatInput + ?Sized,
    R: Rng,
{
    let mut encounter = Encounter::new(monster, path);
    let outcome = loop {
        if !hero.is_alive() {
            break EncounterOutcome::Defeat;
        }
        let action = input.choose_action(hero, encounter.monster());
        match encounter.turn(hero, action, rng) {
            TurnResult::Continue => {}
            TurnResult::Fled => break EncounterOutcome::Fled,
            TurnResult::HeroFell => break EncounterOutcome::Defeat,
            TurnResult::MonsterSlain => {
                encounter.claim_spoils(hero, input, rng);
                break EncounterOutcome::Victory;
            }
        }
    };
    tracing::debug!(?outcome, turns = encounter.turns, "encounter finished");
    encounter.into_report(outcome)
}
