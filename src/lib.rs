//! Dungeon Souls: a turn-based dungeon crawler with persistent
//! meta-progression.
//!
//! The game itself lives in the workspace crates; this crate ties them
//! together with process configuration and the line-based shell.

pub mod config;

pub use ::combat;
pub use ::dungeon;
pub use ::error;
pub use ::events;
pub use ::hero;
pub use ::items;
pub use ::save;
