//! Core counseling state machine
//!
//! Implements the Elm Architecture pattern with pure state transitions.

mod effect;
pub mod prompts;
pub mod state;
pub(crate) mod transition;

#[cfg(test)]
mod proptests;

pub use effect::Effect;
pub use state::{CounselState, PendingTurn, Session, TurnRecord};
pub use transition::{is_exit_command, transition, TransitionError, TransitionResult};
