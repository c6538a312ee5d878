//! Core data model types for quizkit.
//!
//! Field names serialize in camelCase so quiz files written for the
//! original desktop app (`questionText`, `correctAnswerIndex`, ...) load
//! unchanged.

use serde::{Deserialize, Serialize};

/// One prompt with selectable options and a designated correct subset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Question {
    /// The prompt.
    pub question_text: String,
    /// Selectable options. An option's index is its identity.
    pub answers: Vec<String>,
    /// Indices into `answers` that are correct (at least one).
    pub correct_answer_index: Vec<usize>,
    /// When true the full correct set must be selected; otherwise exactly
    /// one selection is expected.
    #[serde(default)]
    pub is_multiple_choice: bool,
    /// Indices the user selected at the last submission.
    #[serde(default)]
    pub user_answers: Vec<usize>,
    /// Verdict from the last evaluation, `None` until evaluated.
    #[serde(default)]
    pub is_correct: Option<bool>,
}

impl Question {
    /// Create an unanswered single-choice question.
    pub fn new(
        question_text: impl Into<String>,
        answers: Vec<String>,
        correct_answer_index: Vec<usize>,
    ) -> Self {
        Self {
            question_text: question_text.into(),
            answers,
            correct_answer_index,
            is_multiple_choice: false,
            user_answers: Vec::new(),
            is_correct: None,
        }
    }

    /// Builder-style toggle for multiple-choice questions.
    pub fn with_multiple_choice(mut self, is_multiple_choice: bool) -> Self {
        self.is_multiple_choice = is_multiple_choice;
        self
    }

    /// Whether the question was submitted at least once.
    pub fn is_evaluated(&self) -> bool {
        self.is_correct.is_some()
    }

    /// Check the data model invariants, returning a reason on violation.
    pub fn check_invariants(&self) -> Result<(), String> {
        if self.answers.is_empty() {
            return Err("question has no answers".into());
        }
        if self.correct_answer_index.is_empty() {
            return Err("question has no correct answer index".into());
        }
        if let Some(bad) = self
            .correct_answer_index
            .iter()
            .find(|&&i| i >= self.answers.len())
        {
            return Err(format!(
                "correct answer index {bad} out of range ({} answers)",
                self.answers.len()
            ));
        }
        Ok(())
    }

    /// Reset user state (selection and verdict).
    pub fn reset(&mut self) {
        self.user_answers.clear();
        self.is_correct = None;
    }
}

/// What the presentation layer renders for the current question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionView {
    /// 0-based position in the quiz.
    pub index: usize,
    /// Number of questions in the quiz.
    pub total: usize,
    pub question_text: String,
    pub answers: Vec<String>,
    pub is_multiple_choice: bool,
    /// Options currently checked.
    pub selected: Vec<usize>,
}

impl QuestionView {
    /// Whether this is the last question (next ends the quiz).
    pub fn is_last(&self) -> bool {
        self.index + 1 == self.total
    }
}

/// Catalog entry for a quiz.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizSummary {
    pub name: String,
    pub question_count: usize,
}
