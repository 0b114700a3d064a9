use std::io::{self, BufRead, Lines, StdinLock, Write};

use anyhow::{Context, Result};
use strum::IntoEnumIterator;

use dungeon_souls::combat::{CombatAction, CombatEvent, CombatInput, Monster, PathKind};
use dungeon_souls::config::AppConfig;
use dungeon_souls::dungeon::{self, RunEvent, RunInput, RunOutcome};
use dungeon_souls::error::handle_error;
use dungeon_souls::events::{AltarChoice, EventInput, EventKind, JudgmentChoice, PactChoice};
use dungeon_souls::hero::{Character, Class};
use dungeon_souls::items::{Equipment, EquipmentType};
use dungeon_souls::save::{PersistentProfile, ProfileStore, ShopUpgrade, TalentNode};

/// Stdin-driven player. A closed stdin falls back to the cautious choice.
struct Console {
    lines: Lines<StdinLock<'static>>,
}

impl Console {
    fn new() -> Self {
        Self {
            lines: io::stdin().lock().lines(),
        }
    }

    fn ask(&mut self, prompt: &str) -> Option<String> {
        print!("{prompt} > ");
        io::stdout().flush().ok()?;
        let line = self.lines.next()?.ok()?;
        Some(line.trim().to_string())
    }

    fn confirm(&mut self, prompt: &str) -> bool {
        self.ask(&format!("{prompt} (y/n)"))
            .is_some_and(|answer| answer.eq_ignore_ascii_case("y"))
    }
}

fn status(hero: &Character) {
    println!(
        "[{}] hp {}/{}  power {}  souls {}  potions {}",
        hero.class(),
        hero.hp,
        hero.max_hp,
        hero.power(),
        hero.souls,
        hero.potions
    );
}

impl CombatInput for Console {
    fn choose_action(&mut self, hero: &Character, monster: &Monster) -> CombatAction {
        status(hero);
        println!("{}: hp {}  attack {}", monster.name, monster.hp, monster.attack);
        loop {
            match self.ask("1) attack 2) flee 3) potion").as_deref() {
                Some("1") | None => return CombatAction::Attack,
                Some("2") => return CombatAction::Flee,
                Some("3") => return CombatAction::UseConsumable,
                Some(_) => println!("enter 1, 2 or 3"),
            }
        }
    }

    fn equip_drop(&mut self, _hero: &Character, equipment: &Equipment) -> bool {
        println!("dropped: {equipment}");
        self.confirm("equip it?")
    }
}

impl EventInput for Console {
    fn accept_event(&mut self, _hero: &Character, event: EventKind) -> bool {
        println!("\n{}\n{}", event.title(), event.description());
        self.confirm("step closer?")
    }

    fn altar(&mut self, _hero: &Character) -> AltarChoice {
        let answer = self.ask("1) offer 30 souls 2) offer blood");
        AltarChoice::from_choice(answer.as_deref().unwrap_or("1")).unwrap_or(AltarChoice::Souls)
    }

    fn demon_pact(&mut self, _hero: &Character) -> PactChoice {
        let answer = self.ask("1) sign the pact 2) refuse");
        PactChoice::from_choice(answer.as_deref().unwrap_or("2")).unwrap_or(PactChoice::Decline)
    }

    fn judgment(&mut self, _hero: &Character) -> JudgmentChoice {
        let answer = self.ask("1) seek redemption 2) defy the angel");
        JudgmentChoice::from_choice(answer.as_deref().unwrap_or("1"))
            .unwrap_or(JudgmentChoice::Redemption)
    }
}

impl RunInput for Console {
    fn choose_class(&mut self) -> Class {
        loop {
            let Some(answer) = self.ask("class: 1) warrior 2) mage") else {
                return Class::Warrior;
            };
            match Class::from_choice(&answer) {
                Ok(class) => return class,
                Err(err) => println!("{}", handle_error(&err)),
            }
        }
    }

    fn choose_path(&mut self, hero: &Character, floor: u32) -> PathKind {
        status(hero);
        println!("floor {floor}: two passages lie ahead");
        match self.ask("1) safe passage 2) dangerous passage").as_deref() {
            Some("2") => PathKind::Danger,
            _ => PathKind::Safe,
        }
    }

    fn archive_common(&mut self, equipment: &Equipment) -> bool {
        self.confirm(&format!("store {equipment}?"))
    }

    fn forge(&mut self, hero: &Character) -> Option<EquipmentType> {
        if !hero.has_equipment() {
            return None;
        }
        match self.ask("forge: 1) reforge weapon 2) reforge armor, enter to move on").as_deref() {
            Some("1") => Some(EquipmentType::Weapon),
            Some("2") => Some(EquipmentType::Armor),
            _ => None,
        }
    }

    fn observe(&mut self, event: &RunEvent) {
        if let Some(line) = describe(event) {
            println!("{line}");
        }
    }
}

fn describe(event: &RunEvent) -> Option<String> {
    let line = match event {
        RunEvent::PathChosen { floor, path } => format!("== floor {floor}, {} ==", path.name),
        RunEvent::WaveStarted {
            floor,
            stage,
            monster,
            ..
        } => format!("\n--- floor {floor} stage {stage}/4: {} appears ---", monster.name),
        RunEvent::Combat(event) => match event {
            CombatEvent::Struck {
                damage,
                crit,
                magic,
            } => {
                let mut line = format!("you deal {damage} damage");
                if *crit {
                    line.push_str(" (critical)");
                }
                if let Some(magic) = magic {
                    line.push_str(&format!(" ({magic} from magic)"));
                }
                line
            }
            CombatEvent::FleeFailed => "you fail to escape".to_string(),
            CombatEvent::Fled => "you escape".to_string(),
            CombatEvent::PotionUsed { healed } => format!("potion restores {healed} hp"),
            CombatEvent::NoPotion => "no potions left".to_string(),
            CombatEvent::Thorns { damage } => format!("thorns reflect {damage} damage"),
            CombatEvent::Retaliated { damage } => format!("you take {damage} damage"),
            CombatEvent::MonsterSlain { souls } => format!("victory! +{souls} souls"),
            CombatEvent::Upgraded(upgrade) => format!("souls coalesce: {upgrade:?}"),
            CombatEvent::PotionsFound(count) => format!("found {count} potion(s)"),
            CombatEvent::Equipped { equipment, .. } => format!("equipped {equipment}"),
            CombatEvent::LeftBehind(equipment) => format!("left {equipment} behind"),
            CombatEvent::Lifesteal { healed } => format!("lifesteal restores {healed} hp"),
            CombatEvent::HeroFell => "you fall...".to_string(),
        },
        RunEvent::EncounterEnded { .. } => return None,
        RunEvent::Event { kind, outcome } => format!("{kind}: {outcome:?}"),
        RunEvent::EventSkipped { kind, reason } => format!("{kind}: {reason}"),
        RunEvent::Reforged(equipment) => format!("reforged: {equipment}"),
        RunEvent::ForgeRefused(reason) => reason.clone(),
        RunEvent::Settled(settlement) => match settlement.outcome {
            RunOutcome::Victory => format!(
                "\nthe dungeon is cleared! +{} fragments{}",
                settlement.fragments,
                settlement
                    .ending
                    .map(|ending| format!(", title: {ending}"))
                    .unwrap_or_default()
            ),
            RunOutcome::Defeat => format!(
                "\nyou fell on wave {}. +{} fragments",
                settlement.wave, settlement.fragments
            ),
        },
    };
    Some(line)
}

fn shop(console: &mut Console, profile: &mut PersistentProfile, store: &ProfileStore) -> Result<()> {
    loop {
        println!("\n=== shop ({} fragments) ===", profile.fragments);
        for (idx, upgrade) in ShopUpgrade::iter().enumerate() {
            println!(
                "{}) {upgrade} (level {}) - {}",
                idx + 1,
                upgrade.level(profile),
                upgrade.price()
            );
        }
        let Some(answer) = console.ask("0) back") else {
            return Ok(());
        };
        if answer == "0" {
            return Ok(());
        }
        match ShopUpgrade::from_choice(&answer).and_then(|u| u.purchase(profile)) {
            Ok(level) => {
                store.save(profile)?;
                println!("upgraded to level {level}");
            }
            Err(err) => println!("{}", handle_error(&err)),
        }
    }
}

fn talents(
    console: &mut Console,
    profile: &mut PersistentProfile,
    store: &ProfileStore,
) -> Result<()> {
    loop {
        println!("\n=== talent tree ({} fragments) ===", profile.fragments);
        for (idx, node) in TalentNode::iter().enumerate() {
            println!(
                "{}) {node} (level {}) - {}",
                idx + 1,
                node.level(profile),
                node.cost()
            );
        }
        let Some(answer) = console.ask("0) back") else {
            return Ok(());
        };
        if answer == "0" {
            return Ok(());
        }
        match TalentNode::from_choice(&answer).and_then(|n| n.upgrade(profile)) {
            Ok(level) => {
                store.save(profile)?;
                println!("talent raised to level {level}");
            }
            Err(err) => println!("{}", handle_error(&err)),
        }
    }
}

fn records(profile: &PersistentProfile) {
    let records = &profile.records;
    println!("\n=== records ===");
    println!("highest wave: {}", records.highest_wave);
    println!("bosses slain: {}", records.total_boss_kills);
    println!("runs: {}", records.total_runs);
    println!("greed chests slain: {}", records.greed_boss_kills);
}

fn storage(profile: &PersistentProfile) {
    println!("\n=== storage ===");
    if profile.equipment_storage.is_empty() {
        println!("(empty)");
    }
    for (idx, equipment) in profile.equipment_storage.iter().enumerate() {
        println!("{}) {equipment}", idx + 1);
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = AppConfig::from_env();
    let store = ProfileStore::new(&config.save_path);
    let mut profile = store
        .load()
        .with_context(|| format!("loading profile from {}", config.save_path.display()))?;
    let mut rng = config.rng();
    tracing::info!(seed = rng.seed(), path = %config.save_path.display(), "session started");

    let mut console = Console::new();
    loop {
        println!("\n=== Dungeon Souls ({} fragments) ===", profile.fragments);
        println!("1) adventure 2) shop 3) talents 4) storage 5) records 0) quit");
        match console.ask("").as_deref() {
            Some("1") => {
                dungeon::play(&mut profile, &mut console, &mut rng, config.rules.clone())?;
                store.save(&profile)?;
            }
            Some("2") => shop(&mut console, &mut profile, &store)?,
            Some("3") => talents(&mut console, &mut profile, &store)?,
            Some("4") => storage(&profile),
            Some("5") => records(&profile),
            Some("0") | None => break,
            Some(_) => println!("enter 0-5"),
        }
    }

    store.save(&profile)?;
    Ok(())
}
