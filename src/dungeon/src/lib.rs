//src/dungeon/src/lib.rs
//! Run orchestration: floors, waves, the hidden boss and settlement.

mod rules;
mod run;
mod settlement;

pub use crate::rules::{RunRules, should_spawn_hidden_boss};
pub use crate::run::{Run, RunEvent, RunInput, RunPhase, begin_run, play};
pub use crate::settlement::{Ending, RunOutcome, Settlement, settle_defeat, settle_victory};
