#[cfg(test)]
mod combat_tests {
    use crate::*;
    use hero::{Character, Class, GameRng, Perk};
    use items::{AffixKind, AffixSet, Equipment, EquipmentType, Rarity};
    use pretty_assertions::assert_eq;
    use save::PersistentProfile;

    /// Plays back queued actions, then keeps attacking.
    struct Script {
        actions: Vec<CombatAction>,
        equip: bool,
    }

    impl Script {
        fn new(actions: &[CombatAction], equip: bool) -> Self {
            Self {
                actions: actions.to_vec(),
                equip,
            }
        }
    }

    impl CombatInput for Script {
        fn choose_action(&mut self, _hero: &Character, _monster: &Monster) -> CombatAction {
            if self.actions.is_empty() {
                CombatAction::Attack
            } else {
                self.actions.remove(0)
            }
        }

        fn equip_drop(&mut self, _hero: &Character, _equipment: &Equipment) -> bool {
            self.equip
        }
    }

    fn warrior() -> Character {
        Character::new(Class::Warrior, &PersistentProfile::default())
    }

    fn dummy(hp: i32, attack: i32) -> Monster {
        Monster {
            name: "Training Dummy".to_string(),
            hp,
            attack,
            souls: 10,
            rank: MonsterRank::Normal,
        }
    }

    fn thorned_armor(level: u32) -> Equipment {
        let affixes: AffixSet = [(AffixKind::Thorns, level)].into_iter().collect();
        Equipment::with_affixes(EquipmentType::Armor, Rarity::Common, affixes)
    }

    #[test]
    fn kill_ends_the_fight_before_retaliation() {
        let mut hero = warrior();
        hero.attack = 100;
        let mut rng = GameRng::new(1);

        let report = run_encounter(
            &mut hero,
            dummy(25, 50),
            &DungeonPath::safe(),
            &mut Script::new(&[], false),
            &mut rng,
        );

        assert_eq!(report.outcome, EncounterOutcome::Victory);
        assert_eq!(report.turns, 1);
        assert_eq!(hero.hp, 100);
        assert_eq!(hero.souls, 10);
        assert!(matches!(
            report.events[0],
            CombatEvent::Struck { damage: 100, .. }
        ));
    }

    #[test]
    fn missing_potion_skips_the_turn() {
        let mut hero = warrior();
        hero.potions = 0;
        let mut rng = GameRng::new(2);
        let mut encounter = Encounter::new(dummy(30, 9), &DungeonPath::safe());

        let result = encounter.turn(&mut hero, CombatAction::UseConsumable, &mut rng);

        assert_eq!(result, TurnResult::Continue);
        assert_eq!(hero.hp, 100);
        assert_eq!(encounter.monster().hp, 30);
        assert_eq!(encounter.events(), &[CombatEvent::NoPotion]);
    }

    #[test]
    fn potion_use_still_draws_retaliation() {
        let mut hero = warrior();
        hero.hp = 50;
        hero.potions = 1;
        let mut rng = GameRng::new(3);
        let mut encounter = Encounter::new(dummy(30, 7), &DungeonPath::safe());

        encounter.turn(&mut hero, CombatAction::UseConsumable, &mut rng);

        assert_eq!(hero.potions, 0);
        assert_eq!(hero.hp, 50 + 40 - 7);
    }

    #[test]
    fn shield_then_pact_modify_retaliation() {
        let mut hero = warrior();
        hero.potions = 2;
        hero.perks.push(Perk::Shield);
        hero.flags.demon_pact = true;
        let mut rng = GameRng::new(4);

        // 7 - 5 = 2, then x1.5 truncated
        let mut encounter = Encounter::new(dummy(30, 7), &DungeonPath::safe());
        encounter.turn(&mut hero, CombatAction::UseConsumable, &mut rng);
        assert_eq!(hero.hp, 97);

        // shield never drops below 1
        let mut encounter = Encounter::new(dummy(30, 3), &DungeonPath::safe());
        encounter.turn(&mut hero, CombatAction::UseConsumable, &mut rng);
        assert_eq!(
            encounter.events().last(),
            Some(&CombatEvent::Retaliated { damage: 1 })
        );
    }

    #[test]
    fn thorns_can_finish_the_monster() {
        let mut hero = warrior();
        hero.equip(thorned_armor(3));
        hero.potions = 1;
        let mut rng = GameRng::new(5);
        let mut encounter = Encounter::new(dummy(5, 1), &DungeonPath::safe());

        let result = encounter.turn(&mut hero, CombatAction::UseConsumable, &mut rng);

        assert_eq!(result, TurnResult::MonsterSlain);
        assert_eq!(encounter.monster().hp, -1);
        assert_eq!(hero.hp, 99);
    }

    #[test]
    fn double_knockout_is_a_defeat() {
        let mut hero = warrior();
        hero.equip(thorned_armor(3));
        hero.hp = 1;
        hero.potions = 0;
        let mut rng = GameRng::new(6);
        let mut encounter = Encounter::new(dummy(5, 10), &DungeonPath::safe());

        // a failed flee still triggers the retaliation step
        let result = loop {
            let result = encounter.turn(&mut hero, CombatAction::Flee, &mut rng);
            if result != TurnResult::Fled {
                break result;
            }
            encounter = Encounter::new(dummy(5, 10), &DungeonPath::safe());
        };

        assert_eq!(result, TurnResult::HeroFell);
        assert!(!encounter.monster().is_alive());
        assert_eq!(encounter.events().last(), Some(&CombatEvent::HeroFell));
    }

    #[test]
    fn path_scaling_happens_once() {
        let goblin = Monster {
            name: "Goblin".to_string(),
            hp: 35,
            attack: 9,
            souls: 12,
            rank: MonsterRank::Normal,
        };
        let encounter = Encounter::new(goblin, &DungeonPath::danger());
        assert_eq!(encounter.monster().hp, 52);
        assert_eq!(encounter.monster().attack, 13);
        assert_eq!(encounter.monster().souls, 24);
    }

    #[test]
    fn hidden_boss_kill_sets_flags_and_drops() {
        let mut hero = warrior();
        hero.attack = 1000;
        let potions = hero.potions;
        let mut rng = GameRng::new(7);

        let report = run_encounter(
            &mut hero,
            Monster::hidden_boss(),
            &DungeonPath::safe(),
            &mut Script::new(&[CombatAction::Attack], true),
            &mut rng,
        );

        assert!(report.is_victory());
        assert_eq!(hero.boss_kills, 1);
        assert!(hero.hidden_boss_defeated);
        assert_eq!(hero.potions, potions + 3);
        let gear: Vec<&Equipment> = hero.equipped().collect();
        assert_eq!(gear.len(), 1);
        assert_eq!(gear[0].rarity(), Rarity::Epic);
    }

    #[test]
    fn lifesteal_perk_heals_on_kill() {
        let mut hero = warrior();
        hero.attack = 100;
        hero.hp = 50;
        hero.perks.push(Perk::Lifesteal);
        let mut rng = GameRng::new(8);

        let report = run_encounter(
            &mut hero,
            dummy(25, 5),
            &DungeonPath::safe(),
            &mut Script::new(&[], false),
            &mut rng,
        );

        // stat is zero, so only the flat part applies
        assert_eq!(hero.hp, 60);
        assert_eq!(
            report.events.last(),
            Some(&CombatEvent::Lifesteal { healed: 10 })
        );
    }

    #[test]
    fn equipment_lifesteal_scales_with_the_last_hit() {
        let mut hero = warrior();
        hero.attack = 100;
        let affixes: AffixSet = [(AffixKind::Lifesteal, 2)].into_iter().collect();
        hero.equip(Equipment::with_affixes(
            EquipmentType::Weapon,
            Rarity::Common,
            affixes,
        ));
        hero.hp = 20;
        let mut rng = GameRng::new(13);

        let report = run_encounter(
            &mut hero,
            dummy(25, 5),
            &DungeonPath::safe(),
            &mut Script::new(&[], false),
            &mut rng,
        );

        let Some(CombatEvent::Struck { damage, .. }) = report.events.first().cloned() else {
            panic!("the first event is the killing blow");
        };
        // 10 flat plus 10% of the hit, rounded down
        let expected = 10 + damage / 10;
        assert!(expected >= 20);
        assert_eq!(hero.hp, 20 + expected);
        assert_eq!(
            report.events.last(),
            Some(&CombatEvent::Lifesteal { healed: expected })
        );
    }

    #[test]
    fn fleeing_leaves_the_monster_untouched() {
        let mut hero = warrior();
        let mut rng = GameRng::new(9);
        let flee_forever = vec![CombatAction::Flee; 64];

        let report = run_encounter(
            &mut hero,
            dummy(25, 1),
            &DungeonPath::safe(),
            &mut Script::new(&flee_forever, false),
            &mut rng,
        );

        assert_eq!(report.outcome, EncounterOutcome::Fled);
        assert_eq!(report.monster.hp, 25);
        assert_eq!(hero.souls, 0);
        assert!(!report.events.iter().any(|e| matches!(e, CombatEvent::MonsterSlain { .. })));
    }
}
