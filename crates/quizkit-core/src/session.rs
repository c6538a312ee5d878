//! Session navigator: the state machine over the current question.
//!
//! Every transition first captures and evaluates the current question, so
//! each visited question carries a verdict for the selection seen when the
//! user left it.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::SessionError;
use crate::evaluator::evaluate;
use crate::model::{Question, QuestionView};
use crate::report::{build_report, ScoreReport};
use crate::store::QuestionStore;
use crate::traits::SelectionSource;

/// Navigator state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionState {
    /// Showing the question at this index.
    Active(usize),
    /// Terminal: the report has been built.
    Ended,
}

/// What the presentation layer should do after a navigation event.
#[derive(Debug, Clone, PartialEq)]
pub enum Step {
    /// Display the question at this (new) index.
    Show(usize),
    /// Navigation was a no-op (previous at the first question).
    Stay(usize),
    /// The quiz ended; the report is handed to the caller.
    Ended(ScoreReport),
}

/// Runtime state of one in-progress quiz attempt.
#[derive(Debug, Clone)]
pub struct QuizSession {
    quiz_name: String,
    questions: Vec<Question>,
    state: SessionState,
}

impl QuizSession {
    /// Start a session at the first question.
    pub fn new(quiz_name: impl Into<String>, questions: Vec<Question>) -> Result<Self, SessionError> {
        if questions.is_empty() {
            return Err(SessionError::NoActiveQuiz);
        }
        Ok(Self {
            quiz_name: quiz_name.into(),
            questions,
            state: SessionState::Active(0),
        })
    }

    /// Start a session from a loaded store. An empty store yields `NoActiveQuiz`.
    pub fn from_store(store: QuestionStore) -> Result<Self, SessionError> {
        let (quiz_name, questions) = store.into_parts();
        Self::new(quiz_name, questions)
    }

    pub fn quiz_name(&self) -> &str {
        &self.quiz_name
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn is_ended(&self) -> bool {
        self.state == SessionState::Ended
    }

    /// Current index, `None` once ended.
    pub fn current_index(&self) -> Option<usize> {
        match self.state {
            SessionState::Active(i) => Some(i),
            SessionState::Ended => None,
        }
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    /// The question being shown.
    pub fn current_question(&self) -> Result<&Question, SessionError> {
        let index = self.active_index()?;
        Ok(&self.questions[index])
    }

    /// Render data for the question at `index`, with its last submitted
    /// selection pre-checked.
    pub fn view(&self, index: usize) -> Result<QuestionView, SessionError> {
        let question = self
            .questions
            .get(index)
            .ok_or(SessionError::QuestionOutOfRange {
                index,
                len: self.questions.len(),
            })?;

        Ok(QuestionView {
            index,
            total: self.questions.len(),
            question_text: question.question_text.clone(),
            answers: question.answers.clone(),
            is_multiple_choice: question.is_multiple_choice,
            selected: question.user_answers.clone(),
        })
    }

    /// Render data for the current question.
    pub fn current_view(&self) -> Result<QuestionView, SessionError> {
        self.view(self.active_index()?)
    }

    /// Capture the presentation layer's selection into the current
    /// question, replacing any prior value, and evaluate it.
    ///
    /// Rejected selections leave the question untouched.
    pub fn submit_current(&mut self, source: &dyn SelectionSource) -> Result<bool, SessionError> {
        let index = self.active_index()?;
        let question = &mut self.questions[index];

        let selection = source.capture_selections();
        if let Some(&bad) = selection.iter().find(|&&i| i >= question.answers.len()) {
            return Err(SessionError::OptionOutOfRange {
                index: bad,
                len: question.answers.len(),
            });
        }

        question.user_answers = selection;
        let verdict = evaluate(question);
        debug!(question = index, correct = verdict, "answer submitted");
        Ok(verdict)
    }

    /// Submit, then advance. Past the last question the session ends and
    /// the report is built (exactly once).
    pub fn next(&mut self, source: &dyn SelectionSource) -> Result<Step, SessionError> {
        self.submit_current(source)?;
        let index = self.active_index()?;

        if index + 1 < self.questions.len() {
            self.state = SessionState::Active(index + 1);
            debug!(from = index, to = index + 1, "next question");
            Ok(Step::Show(index + 1))
        } else {
            self.state = SessionState::Ended;
            let report = build_report(&self.quiz_name, &self.questions);
            debug!(
                quiz = %self.quiz_name,
                correct = report.correct_answers,
                total = report.total_questions,
                "quiz ended"
            );
            Ok(Step::Ended(report))
        }
    }

    /// Submit, then go back one question. No move at the first question,
    /// but the answer is still captured.
    pub fn previous(&mut self, source: &dyn SelectionSource) -> Result<Step, SessionError> {
        self.submit_current(source)?;
        let index = self.active_index()?;

        if index > 0 {
            self.state = SessionState::Active(index - 1);
            debug!(from = index, to = index - 1, "previous question");
            Ok(Step::Show(index - 1))
        } else {
            Ok(Step::Stay(0))
        }
    }

    fn active_index(&self) -> Result<usize, SessionError> {
        match self.state {
            SessionState::Active(i) => Ok(i),
            SessionState::Ended => Err(SessionError::QuizEnded),
        }
    }
}
