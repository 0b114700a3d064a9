// src/hero/src/class.rs

use error::GameError;
use serde::{Deserialize, Serialize};
use strum::{EnumIter, IntoEnumIterator};

/// Playable classes.
#[derive(Default, Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, EnumIter)]
pub enum Class {
    #[default]
    Warrior,

    Mage,
}

impl Class {
    pub fn base_hp(&self) -> i32 {
        match self {
            Class::Warrior => 100,
            Class::Mage => 80,
        }
    }

    pub fn base_attack(&self) -> i32 {
        match self {
            Class::Warrior => 10,
            Class::Mage => 8,
        }
    }

    /// Map a 1-based class-select entry to a class.
    pub fn from_choice(input: &str) -> Result<Self, GameError> {
        error::parse_choice(input, Class::iter())
    }
}

impl std::fmt::Display for Class {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}",
            match self {
                Class::Warrior => "Warrior",
                Class::Mage => "Mage",
            }
        )
    }
}

/// Class-only derived stats, fixed at character creation.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub enum ClassTraits {
    Warrior {
        /// 2 points per shield-mastery level
        shield_reduction: i32,
    },
    Mage {
        /// Fractional bonus to magic damage
        spell_power: f64,
        /// Probability an attack also fires a magic missile
        magic_chance: f64,
    },
}

impl ClassTraits {
    pub fn class(&self) -> Class {
        match self {
            ClassTraits::Warrior { .. } => Class::Warrior,
            ClassTraits::Mage { .. } => Class::Mage,
        }
    }
}
