//! Effects produced by state transitions

use super::prompts::PLACEHOLDER;
use super::state::{CounselState, PendingTurn, Session};

/// Effects to be executed, in order, after a transition is planned
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    /// Store the user's career goal
    RecordGoal { goal: String },

    /// Store the user's experience level
    RecordExperience { experience: String },

    /// Move the session to a new stage
    Advance { to: CounselState },

    /// Ask the generator for text; the output becomes the reply
    Generate { prompt: String },

    /// Reply with fixed text, no generation involved
    Reply { text: String },

    /// Append a history entry, completed with the latest generated text
    AppendTurn { turn: PendingTurn },

    /// Replace the session with a fresh default one
    ResetSession,
}

impl Effect {
    pub fn advance(to: CounselState) -> Self {
        Effect::Advance { to }
    }

    pub fn generate(prompt: impl Into<String>) -> Self {
        Effect::Generate {
            prompt: prompt.into(),
        }
    }

    pub fn reply(text: impl Into<String>) -> Self {
        Effect::Reply { text: text.into() }
    }

    pub fn append_turn(turn: PendingTurn) -> Self {
        Effect::AppendTurn { turn }
    }

    /// Apply this effect's session mutation.
    ///
    /// `generated` is the text produced by the most recent `Generate`
    /// effect of the same transition. `Generate` and `Reply` leave the
    /// session untouched; the runtime handles their output.
    pub fn apply_to(self, session: &mut Session, generated: Option<&str>) {
        match self {
            Effect::RecordGoal { goal } => session.goal = Some(goal),
            Effect::RecordExperience { experience } => session.experience = Some(experience),
            Effect::Advance { to } => session.state = to,
            Effect::AppendTurn { turn } => session
                .history
                .push(turn.complete(generated.unwrap_or(PLACEHOLDER))),
            Effect::ResetSession => session.reset(),
            Effect::Generate { .. } | Effect::Reply { .. } => {}
        }
    }
}
