//! Session state types

use serde::{Deserialize, Serialize};
use std::fmt;

// ============================================================================
// Counseling stage
// ============================================================================

/// Stage of the counseling conversation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CounselState {
    /// No message seen yet (or just reset)
    #[default]
    Start,
    /// Welcome sent, waiting for the career goal
    Goal,
    /// Goal recorded, waiting for the experience level
    Experience,
    /// Question generation in progress; a session only rests here when that
    /// generation failed
    AskQuestion,
    /// Question asked, waiting for the answer
    EvaluateAnswer,
    /// Answer evaluated; every further message gets guidance
    Guidance,
}

impl CounselState {
    pub fn as_str(self) -> &'static str {
        match self {
            CounselState::Start => "start",
            CounselState::Goal => "goal",
            CounselState::Experience => "experience",
            CounselState::AskQuestion => "ask_question",
            CounselState::EvaluateAnswer => "evaluate_answer",
            CounselState::Guidance => "guidance",
        }
    }
}

impl fmt::Display for CounselState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// Turn records
// ============================================================================

/// One entry of a session's history
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TurnRecord {
    GoalRecorded {
        goal: String,
    },
    QuestionAsked {
        goal: String,
        experience: String,
        question: String,
    },
    AnswerEvaluated {
        answer: String,
        evaluation: String,
    },
}

impl TurnRecord {
    pub fn question(&self) -> Option<&str> {
        match self {
            TurnRecord::QuestionAsked { question, .. } => Some(question.as_str()),
            _ => None,
        }
    }
}

/// A turn record waiting for the generated text that completes it
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PendingTurn {
    Goal { goal: String },
    Question { goal: String, experience: String },
    Answer { answer: String },
}

impl PendingTurn {
    /// Complete the record with the text generated during the same transition
    pub fn complete(self, generated: &str) -> TurnRecord {
        match self {
            PendingTurn::Goal { goal } => TurnRecord::GoalRecorded { goal },
            PendingTurn::Question { goal, experience } => TurnRecord::QuestionAsked {
                goal,
                experience,
                question: generated.to_string(),
            },
            PendingTurn::Answer { answer } => TurnRecord::AnswerEvaluated {
                answer,
                evaluation: generated.to_string(),
            },
        }
    }
}

// ============================================================================
// Session
// ============================================================================

/// Per-user conversation state
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Session {
    pub state: CounselState,
    /// Career goal as typed by the user
    pub goal: Option<String>,
    /// Experience level as typed by the user
    pub experience: Option<String>,
    pub history: Vec<TurnRecord>,
}

impl Session {
    pub fn reset(&mut self) {
        *self = Session::default();
    }

    pub fn is_fresh(&self) -> bool {
        *self == Session::default()
    }

    /// Question of the most recent history entry, if that entry asked one
    pub fn last_question(&self) -> Option<&str> {
        self.history.last().and_then(TurnRecord::question)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_state_serializes_snake_case() {
        assert_eq!(
            serde_json::to_value(CounselState::EvaluateAnswer).unwrap(),
            serde_json::json!("evaluate_answer")
        );
        assert_eq!(CounselState::AskQuestion.to_string(), "ask_question");
    }

    #[test]
    fn test_default_session() {
        let session = Session::default();
        assert_eq!(session.state, CounselState::Start);
        assert!(session.goal.is_none());
        assert!(session.experience.is_none());
        assert!(session.history.is_empty());
        assert!(session.is_fresh());
    }

    #[test]
    fn test_last_question_only_from_last_entry() {
        let mut session = Session::default();
        assert_eq!(session.last_question(), None);

        session.history.push(TurnRecord::QuestionAsked {
            goal: "developer".to_string(),
            experience: "junior".to_string(),
            question: "What is a closure?".to_string(),
        });
        assert_eq!(session.last_question(), Some("What is a closure?"));

        session.history.push(TurnRecord::AnswerEvaluated {
            answer: "a function".to_string(),
            evaluation: "good".to_string(),
        });
        assert_eq!(session.last_question(), None);
    }

    #[test]
    fn test_pending_turn_completion() {
        let goal = PendingTurn::Goal {
            goal: "backend developer".to_string(),
        }
        .complete("ignored");
        assert_eq!(
            goal,
            TurnRecord::GoalRecorded {
                goal: "backend developer".to_string()
            }
        );

        let answer = PendingTurn::Answer {
            answer: "42".to_string(),
        }
        .complete("Well reasoned");
        assert_eq!(
            answer,
            TurnRecord::AnswerEvaluated {
                answer: "42".to_string(),
                evaluation: "Well reasoned".to_string()
            }
        );
    }

    #[test]
    fn test_reset_restores_defaults() {
        let mut session = Session {
            state: CounselState::Guidance,
            goal: Some("x".to_string()),
            experience: Some("y".to_string()),
            history: vec![TurnRecord::GoalRecorded { goal: "x".to_string() }],
        };
        session.reset();
        assert!(session.is_fresh());
    }
}
