// src/save/src/store.rs
use anyhow::Context;
use error::{GameError, Result};
use std::{
    fs,
    io::Write,
    path::{Path, PathBuf},
};

use crate::PersistentProfile;

/// JSON file holding the single persistent profile.
pub struct ProfileStore {
    path: PathBuf,
}

impl ProfileStore {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn exists(&self) -> bool {
        self.path.is_file()
    }

    /// Load the profile; a missing file yields a fresh default profile.
    pub fn load(&self) -> Result<PersistentProfile> {
        if !self.exists() {
            tracing::info!(path = %self.path.display(), "no profile found, starting fresh");
            return Ok(PersistentProfile::default());
        }

        let json = fs::read_to_string(&self.path)?;
        let profile = PersistentProfile::from_json(&json).inspect_err(|err| {
            tracing::warn!(path = %self.path.display(), %err, "profile rejected");
        })?;

        tracing::debug!(path = %self.path.display(), fragments = profile.fragments, "profile loaded");
        Ok(profile)
    }

    /// Write the profile through a temporary sibling and rename it into place.
    ///
    /// Plain I/O failures surface as [`GameError::IoError`]; a failed rename
    /// leaves the previous profile in place and is reported as
    /// [`GameError::SaveError`].
    pub fn save(&self, profile: &PersistentProfile) -> Result<()> {
        if let Some(dir) = self.path.parent().filter(|d| !d.as_os_str().is_empty()) {
            fs::create_dir_all(dir)?;
        }

        let json = profile.to_json()?;

        let temp_path = self.path.with_extension("tmp");
        let mut file = fs::File::create(&temp_path)?;
        file.write_all(json.as_bytes())?;
        file.flush()?;

        fs::rename(&temp_path, &self.path)
            .with_context(|| format!("Failed to commit save file: {:?}", self.path))
            .map_err(GameError::SaveError)?;

        tracing::debug!(path = %self.path.display(), "profile saved");
        Ok(())
    }
}
