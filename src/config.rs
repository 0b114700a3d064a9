//! Process configuration read from the environment.
use std::env;
use std::path::PathBuf;

use dungeon::RunRules;
use hero::GameRng;

const DEFAULT_SAVE_PATH: &str = "save.json";

#[derive(Clone, Debug)]
pub struct AppConfig {
    /// Where the persistent profile is stored
    pub save_path: PathBuf,
    /// Fixed seed for reproducible runs; entropy when absent
    pub seed: Option<u64>,
    pub rules: RunRules,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            save_path: PathBuf::from(DEFAULT_SAVE_PATH),
            seed: None,
            rules: RunRules::default(),
        }
    }
}

impl AppConfig {
    /// Construct configuration from environment variables.
    ///
    /// Environment variables:
    /// - `DUNGEON_SOULS_SAVE` - profile path (default: `save.json`)
    /// - `DUNGEON_SOULS_SEED` - u64 seed for the game rng
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Some(path) = read_env::<PathBuf>("DUNGEON_SOULS_SAVE") {
            config.save_path = path;
        }
        config.seed = read_env::<u64>("DUNGEON_SOULS_SEED");

        config
    }

    pub fn rng(&self) -> GameRng {
        match self.seed {
            Some(seed) => GameRng::new(seed),
            None => GameRng::from_entropy(),
        }
    }
}

pub fn read_env<T>(key: &str) -> Option<T>
where
    T: std::str::FromStr,
{
    env::var(key).ok()?.parse().ok()
}
