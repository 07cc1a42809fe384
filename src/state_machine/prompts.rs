//! Prompt templates for each counseling stage

use super::state::{Session, TurnRecord};

/// Fixed first reply; the only user-facing text not written by the generator
pub const WELCOME_MESSAGE: &str = "Welcome! What do you want to be in your software career?";

/// Stands in for any field a prompt needs but the session lacks
pub const PLACEHOLDER: &str = "N/A";

/// Goal keywords that call for a coding question
const CODING_KEYWORDS: [&str; 3] = ["developer", "programmer", "engineer"];

/// Kind of question asked after the experience level is known
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuestionKind {
    Coding,
    NonCoding,
}

/// Decide which kind of question suits a career goal.
///
/// Matches case-insensitively against the goal text only.
pub fn classify_goal(goal: &str) -> QuestionKind {
    let goal = goal.to_lowercase();
    if CODING_KEYWORDS.iter().any(|kw| goal.contains(kw)) {
        QuestionKind::Coding
    } else {
        QuestionKind::NonCoding
    }
}

pub fn experience_prompt(goal: &str) -> String {
    format!("Now ask the experience level of the user in {goal}")
}

pub fn question_prompt(kind: QuestionKind, experience: &str, goal: &str) -> String {
    match kind {
        QuestionKind::Coding => format!(
            "Generate a coding question suitable for a '{experience}' level and wants to be '{goal}'."
        ),
        QuestionKind::NonCoding => format!(
            "Generate a technical question (non-coding) suitable for a '{experience}' level and wants to be '{goal}'."
        ),
    }
}

pub fn evaluation_prompt(question: &str, answer: &str) -> String {
    format!(
        "Evaluate the following answer to the question in the role of a software career counselor, \
         providing teaching and a reality check, and guide the user accordingly:\n\
         Question: {question}\nAnswer: {answer}"
    )
}

/// Guidance request built from everything the session has accumulated
pub fn guidance_prompt(session: &Session) -> String {
    let goal = lowered_or_placeholder(session.goal.as_deref());
    let experience = lowered_or_placeholder(session.experience.as_deref());

    format!(
        "Provide career guidance to a '{experience}' level '{goal}'. \
         Offer recommendations on what skills to focus on, next steps in their career, and resources they can use. \
         Consider the following conversation history for context:\n\
         {history}\
         Keep on talking to the user after guidance regarding their interests in the domain their goals.",
        history = render_history(&session.history)
    )
}

fn lowered_or_placeholder(value: Option<&str>) -> String {
    value.map_or_else(|| PLACEHOLDER.to_string(), str::to_lowercase)
}

/// One question with whatever answer and evaluation followed it
#[derive(Default)]
struct Exchange<'a> {
    question: Option<&'a str>,
    answer: Option<&'a str>,
    evaluation: Option<&'a str>,
}

impl Exchange<'_> {
    fn is_empty(&self) -> bool {
        self.question.is_none() && self.answer.is_none() && self.evaluation.is_none()
    }

    fn render(&self, out: &mut String) {
        out.push_str("Question: ");
        out.push_str(self.question.unwrap_or(PLACEHOLDER));
        out.push_str("\nAnswer: ");
        out.push_str(self.answer.unwrap_or(PLACEHOLDER));
        out.push_str("\nEvaluation: ");
        out.push_str(self.evaluation.unwrap_or(PLACEHOLDER));
        out.push_str("\n\n");
    }
}

/// Render history as question/answer/evaluation triples, in order.
///
/// A question starts a new triple; an evaluated answer closes the current
/// one. Goal entries carry nothing for the triples and are skipped.
fn render_history(history: &[TurnRecord]) -> String {
    let mut out = String::new();
    let mut current = Exchange::default();

    for record in history {
        match record {
            TurnRecord::GoalRecorded { .. } => {}
            TurnRecord::QuestionAsked { question, .. } => {
                if !current.is_empty() {
                    current.render(&mut out);
                }
                current = Exchange {
                    question: Some(question.as_str()),
                    ..Exchange::default()
                };
            }
            TurnRecord::AnswerEvaluated { answer, evaluation } => {
                current.answer = Some(answer.as_str());
                current.evaluation = Some(evaluation.as_str());
                current.render(&mut out);
                current = Exchange::default();
            }
        }
    }

    if !current.is_empty() {
        current.render(&mut out);
    }
    out
}
