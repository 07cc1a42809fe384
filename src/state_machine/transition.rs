//! Pure state transition function
//!
//! Given a session and an incoming message, plans the ordered effects of
//! one counseling step. No I/O happens here; the runtime executes the
//! effects, including generator calls.

use super::effect::Effect;
use super::prompts::{
    classify_goal, evaluation_prompt, experience_prompt, guidance_prompt, question_prompt,
    PLACEHOLDER, WELCOME_MESSAGE,
};
use super::state::{CounselState, PendingTurn, Session};
use thiserror::Error;

/// Message that ends a guidance session and resets it
pub const EXIT_COMMAND: &str = "/exit";

/// Result of a state transition
#[derive(Debug)]
pub struct TransitionResult {
    pub new_state: CounselState,
    pub effects: Vec<Effect>,
}

impl TransitionResult {
    pub fn new(state: CounselState) -> Self {
        Self {
            new_state: state,
            effects: vec![],
        }
    }

    pub fn with_effect(mut self, effect: Effect) -> Self {
        self.effects.push(effect);
        self
    }

    /// Whether executing this result will call the generator
    pub fn needs_generation(&self) -> bool {
        self.effects.iter().any(|e| matches!(e, Effect::Generate { .. }))
    }
}

/// Errors that can occur during transition
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransitionError {
    #[error("Unknown state")]
    UnknownState(CounselState),
    #[error("Session in state {state} is missing its {field}")]
    MissingContext {
        state: CounselState,
        field: &'static str,
    },
}

/// Exit matching ignores ASCII case but nothing else
pub fn is_exit_command(message: &str) -> bool {
    message.eq_ignore_ascii_case(EXIT_COMMAND)
}

/// Pure transition function
///
/// Effects are listed in the order the session must observe them, so a
/// generator failure midway leaves exactly the earlier mutations applied.
pub fn transition(session: &Session, message: &str) -> Result<TransitionResult, TransitionError> {
    match session.state {
        // Any first message gets the fixed welcome
        CounselState::Start => Ok(TransitionResult::new(CounselState::Goal)
            .with_effect(Effect::advance(CounselState::Goal))
            .with_effect(Effect::reply(WELCOME_MESSAGE))),

        CounselState::Goal => {
            let goal = message.to_lowercase();
            Ok(TransitionResult::new(CounselState::Experience)
                .with_effect(Effect::RecordGoal {
                    goal: message.to_string(),
                })
                .with_effect(Effect::advance(CounselState::Experience))
                .with_effect(Effect::generate(experience_prompt(&goal)))
                .with_effect(Effect::append_turn(PendingTurn::Goal { goal })))
        }

        CounselState::Experience => {
            let goal = session
                .goal
                .as_deref()
                .ok_or(TransitionError::MissingContext {
                    state: session.state,
                    field: "goal",
                })?
                .to_lowercase();
            let experience = message.to_lowercase();
            let prompt = question_prompt(classify_goal(&goal), &experience, &goal);

            Ok(TransitionResult::new(CounselState::EvaluateAnswer)
                .with_effect(Effect::RecordExperience {
                    experience: message.to_string(),
                })
                .with_effect(Effect::advance(CounselState::AskQuestion))
                .with_effect(Effect::generate(prompt))
                .with_effect(Effect::append_turn(PendingTurn::Question { goal, experience }))
                .with_effect(Effect::advance(CounselState::EvaluateAnswer)))
        }

        CounselState::EvaluateAnswer => {
            let question = session.last_question().unwrap_or(PLACEHOLDER);
            Ok(TransitionResult::new(CounselState::Guidance)
                .with_effect(Effect::generate(evaluation_prompt(question, message)))
                .with_effect(Effect::append_turn(PendingTurn::Answer {
                    answer: message.to_string(),
                }))
                .with_effect(Effect::advance(CounselState::Guidance)))
        }

        // Guidance is always generated, even for the exit command
        CounselState::Guidance => {
            let result = TransitionResult::new(CounselState::Guidance)
                .with_effect(Effect::generate(guidance_prompt(session)));

            if is_exit_command(message) {
                let mut result = result.with_effect(Effect::ResetSession);
                result.new_state = CounselState::Start;
                Ok(result)
            } else {
                Ok(result)
            }
        }

        // Only reachable when question generation failed
        CounselState::AskQuestion => Err(TransitionError::UnknownState(session.state)),
    }
}
