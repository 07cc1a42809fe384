//! Property-based tests for the state machine
//!
//! These tests verify key invariants hold across all possible inputs.

use super::prompts::{classify_goal, QuestionKind, WELCOME_MESSAGE};
use super::*;
use proptest::prelude::*;

// ============================================================================
// Test Helpers
// ============================================================================

/// Run one planned transition, standing in `generated` for every generation
fn step(session: &mut Session, message: &str, generated: &str) -> Result<String, TransitionError> {
    let result = transition(session, message)?;
    let mut reply = None;
    for effect in result.effects {
        match effect {
            Effect::Generate { .. } => reply = Some(generated.to_string()),
            Effect::Reply { text } => reply = Some(text),
            effect => effect.apply_to(session, Some(generated)),
        }
    }
    Ok(reply.unwrap_or_default())
}

/// Forward edges of the counseling flow, plus the guidance loop and reset
fn is_allowed_edge(from: CounselState, to: CounselState) -> bool {
    matches!(
        (from, to),
        (CounselState::Start, CounselState::Goal)
            | (CounselState::Goal, CounselState::Experience)
            | (CounselState::Experience, CounselState::EvaluateAnswer)
            | (CounselState::EvaluateAnswer, CounselState::Guidance)
            | (CounselState::Guidance, CounselState::Guidance | CounselState::Start)
    )
}

// ============================================================================
// Arbitrary Generators
// ============================================================================

fn arb_message() -> impl Strategy<Value = String> {
    prop_oneof![
        4 => "[a-zA-Z ]{0,30}",
        1 => Just("/exit".to_string()),
        1 => Just("/EXIT".to_string()),
        1 => Just("exit".to_string()),
        1 => "(backend|game|data) (developer|programmer|engineer|manager|analyst)",
    ]
}

fn arb_user_state() -> impl Strategy<Value = CounselState> {
    prop_oneof![
        Just(CounselState::Start),
        Just(CounselState::Goal),
        Just(CounselState::Experience),
        Just(CounselState::EvaluateAnswer),
        Just(CounselState::Guidance),
    ]
}

// ============================================================================
// Property Tests
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(500))]

    // Invariant 1: Every step follows the fixed path
    #[test]
    fn prop_transitions_follow_fixed_path(messages in proptest::collection::vec(arb_message(), 0..20)) {
        let mut session = Session::default();

        for message in messages {
            let from = session.state;
            let planned = transition(&session, &message).map(|r| r.new_state);
            prop_assert!(step(&mut session, &message, "generated").is_ok());
            let to = session.state;

            prop_assert_eq!(planned, Ok(to));
            prop_assert!(is_allowed_edge(from, to), "Illegal edge {} -> {}", from, to);
            prop_assert_ne!(to, CounselState::AskQuestion);
        }
    }

    // Invariant 2: A fresh session always answers with the welcome
    #[test]
    fn prop_first_message_welcomes(message in arb_message()) {
        let mut session = Session::default();
        let reply = step(&mut session, &message, "generated").unwrap();
        prop_assert_eq!(reply, WELCOME_MESSAGE);
        prop_assert_eq!(session.state, CounselState::Goal);
    }

    // Invariant 3: Exit only resets in guidance
    #[test]
    fn prop_exit_only_special_in_guidance(state in arb_user_state(), upper in any::<bool>()) {
        let exit = if upper { "/EXIT" } else { "/exit" };
        let session = Session {
            state,
            goal: Some("developer".to_string()),
            ..Session::default()
        };
        let result = transition(&session, exit).unwrap();
        let resets = result.effects.contains(&Effect::ResetSession);
        prop_assert_eq!(resets, state == CounselState::Guidance);
    }

    // Invariant 4: After an exit reset the session is indistinguishable from a new one
    #[test]
    fn prop_reset_round_trip(
        goal in "[a-z ]{1,20}",
        experience in "[a-z]{1,10}",
        loops in 0usize..4,
    ) {
        let mut session = Session::default();
        for message in ["hi", goal.as_str(), experience.as_str(), "answer"] {
            step(&mut session, message, "generated").unwrap();
        }
        for _ in 0..loops {
            step(&mut session, "more", "guidance").unwrap();
        }
        prop_assert_eq!(session.state, CounselState::Guidance);

        step(&mut session, "/Exit", "bye").unwrap();
        prop_assert!(session.is_fresh());

        let reply = step(&mut session, "hello", "generated").unwrap();
        prop_assert_eq!(reply, WELCOME_MESSAGE);
    }

    // Invariant 5: History only grows, except on reset
    #[test]
    fn prop_history_append_only(messages in proptest::collection::vec(arb_message(), 0..20)) {
        let mut session = Session::default();

        for message in messages {
            let before = session.history.clone();
            step(&mut session, &message, "generated").unwrap();
            if !session.is_fresh() {
                prop_assert!(session.history.len() >= before.len());
                prop_assert_eq!(&session.history[..before.len()], &before[..]);
            }
        }
    }

    // Invariant 6: Classification depends only on the coding keywords
    #[test]
    fn prop_classification_by_keyword(
        prefix in "[a-z ]{0,10}",
        keyword in prop_oneof![Just("developer"), Just("Programmer"), Just("ENGINEER")],
        suffix in "[a-z ]{0,10}",
    ) {
        let goal = format!("{prefix}{keyword}{suffix}");
        prop_assert_eq!(classify_goal(&goal), QuestionKind::Coding);
    }

    // Invariant 7: Only a question-generation failure can strand a session
    #[test]
    fn prop_ask_question_always_unknown(message in arb_message()) {
        let session = Session {
            state: CounselState::AskQuestion,
            ..Session::default()
        };
        prop_assert_eq!(
            transition(&session, &message).unwrap_err(),
            TransitionError::UnknownState(CounselState::AskQuestion)
        );
    }
}
