//! Runtime for executing counseling turns
//!
//! Resolves the session, plans the transition and executes its effects.

#[cfg(test)]
pub mod testing;

use crate::generator::Generator;
use crate::llm::LlmError;
use crate::session_store::SessionStore;
use crate::state_machine::{transition, CounselState, Effect, TransitionError};
use std::sync::Arc;
use thiserror::Error;

/// Outbound result of one turn
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CounselReply {
    pub message: String,
    /// Session state after the turn
    pub state: CounselState,
}

/// Errors surfaced to the request handler
#[derive(Debug, Error)]
pub enum CounselError {
    #[error(transparent)]
    Transition(#[from] TransitionError),
    #[error("{0}")]
    Generation(#[from] LlmError),
    #[error("No reply produced in state {0}")]
    NoReply(CounselState),
}

impl CounselError {
    pub fn is_unknown_state(&self) -> bool {
        matches!(self, CounselError::Transition(TransitionError::UnknownState(_)))
    }
}

/// Executes counseling turns against a session store and a generator
pub struct Counselor {
    store: Arc<dyn SessionStore>,
    generator: Arc<dyn Generator>,
}

impl Counselor {
    pub fn new(store: Arc<dyn SessionStore>, generator: Arc<dyn Generator>) -> Self {
        Self { store, generator }
    }

    #[cfg(test)]
    pub fn store(&self) -> &Arc<dyn SessionStore> {
        &self.store
    }

    /// Process one inbound message for `user_id`.
    ///
    /// The session lock is held for the whole turn, generation included,
    /// so turns for one user never interleave. Effects already applied
    /// when generation fails stay applied.
    pub async fn handle_message(
        &self,
        user_id: &str,
        message: &str,
    ) -> Result<CounselReply, CounselError> {
        let handle = self.store.get_or_create(user_id).await;
        let mut session = handle.lock().await;
        let from = session.state;

        let result = transition(&session, message).map_err(|e| {
            tracing::warn!(user_id = %user_id, state = %from, error = %e, "Transition rejected");
            e
        })?;
        tracing::debug!(
            user_id = %user_id,
            state = %from,
            planned = %result.new_state,
            generates = result.needs_generation(),
            "Transition planned"
        );

        let mut generated: Option<String> = None;
        let mut reply: Option<String> = None;

        for effect in result.effects {
            match effect {
                Effect::Generate { prompt } => {
                    let text = self.generator.generate(&prompt).await.map_err(|e| {
                        tracing::error!(
                            user_id = %user_id,
                            state = %session.state,
                            error = %e,
                            "Generation failed mid-transition"
                        );
                        e
                    })?;
                    reply = Some(text.clone());
                    generated = Some(text);
                }
                Effect::Reply { text } => reply = Some(text),
                effect => effect.apply_to(&mut session, generated.as_deref()),
            }
        }

        tracing::info!(
            user_id = %user_id,
            from = %from,
            to = %session.state,
            history_len = session.history.len(),
            "Counseling step completed"
        );

        if session.is_fresh() && from == CounselState::Guidance {
            tracing::info!(user_id = %user_id, "Session closed by exit command");
        }

        let message = reply.ok_or(CounselError::NoReply(from))?;
        Ok(CounselReply {
            message,
            state: session.state,
        })
    }

    /// Reset the user's session to defaults
    pub async fn reset(&self, user_id: &str) {
        self.store.reset(user_id).await;
    }
}
