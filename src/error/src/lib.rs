//! Error types shared by every crate in the workspace.
//!
//! The first three variants are the recoverable game-rule failures: the caller
//! gets the error back and the state it passed in is left untouched. The rest
//! belong to the persistence boundary.

use thiserror::Error;

/// Errors raised by game rules and the profile store
#[derive(Debug, Error)]
pub enum GameError {
    /// A soul or fragment cost exceeds the current balance
    #[error("Insufficient currency: need {needed}, have {available}")]
    InsufficientCurrency { needed: u32, available: u32 },

    /// Out-of-range menu or choice input
    #[error("Invalid selection: {0}")]
    InvalidSelection(String),

    /// Reforge or mirror event attempted with nothing equipped
    #[error("No equipment present: {0}")]
    NoEquipmentPresent(String),

    /// Profile store failure wrapped with context
    #[error("Save system error: {0}")]
    SaveError(#[from] anyhow::Error),

    /// Profile file could not be read or written
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// Profile could not be encoded or decoded
    #[error("Serialization error: {0}")]
    SerializationError(String),

    /// Profile file is not valid JSON
    #[error("Corrupted save data")]
    CorruptedSave,
}

impl From<serde_json::Error> for GameError {
    fn from(err: serde_json::Error) -> Self {
        if err.is_syntax() || err.is_eof() {
            GameError::CorruptedSave
        } else {
            GameError::SerializationError(err.to_string())
        }
    }
}

impl GameError {
    /// Shorthand used by every purchase/cost check.
    pub fn insufficient(needed: u32, available: u32) -> Self {
        GameError::InsufficientCurrency { needed, available }
    }

    /// Whether the error is one of the non-fatal rule rejections.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            GameError::InsufficientCurrency { .. }
                | GameError::InvalidSelection(_)
                | GameError::NoEquipmentPresent(_)
        )
    }
}

/// Render an error as a player-facing message.
pub fn handle_error(error: &GameError) -> String {
    match error {
        GameError::InsufficientCurrency { needed, available } => {
            format!("Not enough currency ({available}/{needed})")
        }
        GameError::InvalidSelection(input) => format!("Please choose a listed option, not '{input}'"),
        GameError::NoEquipmentPresent(slot) => format!("Nothing equipped in the {slot} slot"),
        GameError::CorruptedSave => "Save data is corrupted and cannot be loaded".to_string(),
        GameError::IoError(e) => match e.kind() {
            std::io::ErrorKind::NotFound => "Save file not found".to_string(),
            std::io::ErrorKind::PermissionDenied => "No permission to access the save file".to_string(),
            _ => format!("IO error: {}", e),
        },
        _ => error.to_string(),
    }
}

pub type Result<T, E = GameError> = std::result::Result<T, E>;

/// Map a 1-based menu entry onto the listed options.
pub fn parse_choice<T>(input: &str, options: impl IntoIterator<Item = T>) -> Result<T> {
    let trimmed = input.trim();
    trimmed
        .parse::<usize>()
        .ok()
        .and_then(|n| n.checked_sub(1))
        .and_then(|idx| options.into_iter().nth(idx))
        .ok_or_else(|| GameError::InvalidSelection(trimmed.to_string()))
}
