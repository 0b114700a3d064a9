//! Events that are always in the pool.

use error::GameError;
use hero::Character;
use items::EquipmentType;
use rand::Rng;

use crate::{EventKind, EventOutcome};

/// Full heal at the price of every potion.
pub fn healing_spring(hero: &mut Character) -> EventOutcome {
    hero.restore_full();
    hero.potions = 0;
    EventOutcome::SpringHealed { hp: hero.hp }
}

/// Coin flip between 1-3 potions and 10-30 souls. Souls land directly in the
/// purse without triggering upgrades.
pub fn lucky_chest<R: Rng>(hero: &mut Character, rng: &mut R) -> EventOutcome {
    if rng.random_bool(0.5) {
        let potions = rng.random_range(1..=3);
        hero.potions += potions;
        EventOutcome::ChestPotions(potions)
    } else {
        let souls = rng.random_range(10..=30);
        hero.souls += souls;
        EventOutcome::ChestSouls(souls)
    }
}

/// Half the time one affix of a random equipped item doubles in place, the
/// other half the mirror takes 20% of current hp.
pub fn mirror<R: Rng>(hero: &mut Character, rng: &mut R) -> Result<EventOutcome, GameError> {
    if !hero.has_equipment() {
        return Err(GameError::NoEquipmentPresent("any".to_string()));
    }

    if rng.random_bool(0.5) {
        let slots: Vec<EquipmentType> = hero.equipped().map(|eq| eq.kind()).collect();
        let slot = slots[rng.random_range(0..slots.len())];
        let strengthened = hero
            .slot_mut(slot)
            .as_mut()
            .and_then(|eq| eq.strengthen_random_affix(rng));
        hero.refresh_equipment_stats();

        Ok(match strengthened {
            Some((affix, level)) => EventOutcome::AffixStrengthened { slot, affix, level },
            None => EventOutcome::MirrorFizzled,
        })
    } else {
        let damage = (hero.hp as f64 * 0.2) as i32;
        hero.take_damage(damage);
        Ok(EventOutcome::MirrorWound(damage))
    }
}

/// 15 souls for a potion.
pub fn traveling_merchant(hero: &mut Character) -> Result<EventOutcome, GameError> {
    hero.spend_souls(EventKind::TravelingMerchant.cost())?;
    hero.potions += 1;
    Ok(EventOutcome::PotionBought)
}
