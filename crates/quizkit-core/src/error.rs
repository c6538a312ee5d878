//! Error taxonomy for quiz loading, navigation and content providers.
//!
//! `ProviderError` lives here rather than in `quizkit-providers` so the
//! question store can downcast provider failures and classify them as
//! `LoadError`s without string matching.

use thiserror::Error;

/// The quiz could not be loaded into a question store.
///
/// Recovered at the boundary: the caller presents an empty/error state and
/// never starts navigation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LoadError {
    /// The provider has no quiz with this name.
    #[error("quiz not found: {0}")]
    QuizNotFound(String),

    /// The provider could not supply data (I/O, network, remote API).
    #[error("quiz '{quiz}' is unavailable: {message}")]
    Unavailable { quiz: String, message: String },

    /// The data does not decode into the question shape.
    #[error("quiz '{quiz}' is malformed: {message}")]
    Malformed { quiz: String, message: String },

    /// A question decoded but violates the data model invariants.
    #[error("quiz '{quiz}', question {number}: {reason}")]
    InvalidQuestion {
        quiz: String,
        /// 1-based question number in file order.
        number: usize,
        reason: String,
    },
}

/// A navigation or submission request the session refused.
///
/// These are programming-error class failures: they are logged and the
/// request is ignored, the session is never left half-updated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SessionError {
    /// A question index outside `[0, len)` was requested for display.
    #[error("question index {index} out of range (quiz has {len} questions)")]
    QuestionOutOfRange { index: usize, len: usize },

    /// A captured selection names an option the question does not have.
    #[error("option index {index} out of range (question has {len} options)")]
    OptionOutOfRange { index: usize, len: usize },

    /// Navigation was attempted with no questions loaded.
    #[error("no active quiz")]
    NoActiveQuiz,

    /// The session already reached its end state.
    #[error("quiz has already ended")]
    QuizEnded,
}

impl SessionError {
    /// Returns `true` for the index-error class (out-of-bounds requests).
    pub fn is_index_error(&self) -> bool {
        matches!(
            self,
            SessionError::QuestionOutOfRange { .. } | SessionError::OptionOutOfRange { .. }
        )
    }
}

/// Any failure surfaced by the quiz controller.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QuizError {
    #[error(transparent)]
    Load(#[from] LoadError),

    #[error(transparent)]
    Session(#[from] SessionError),
}

/// Errors raised by content providers.
#[derive(Debug, Error)]
pub enum ProviderError {
    /// No quiz with this name exists.
    #[error("quiz not found: {0}")]
    QuizNotFound(String),

    /// Reading or writing local quiz files failed.
    #[error("I/O error: {0}")]
    Io(String),

    /// A network error occurred.
    #[error("network error: {0}")]
    Network(String),

    /// The remote API returned an error response.
    #[error("API error (HTTP {status}): {message}")]
    Api { status: u16, message: String },

    /// The quiz file is not valid quiz JSON.
    #[error("malformed quiz data: {0}")]
    Malformed(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn index_error_classification() {
        assert!(SessionError::QuestionOutOfRange { index: 3, len: 3 }.is_index_error());
        assert!(SessionError::OptionOutOfRange { index: 5, len: 4 }.is_index_error());
        assert!(!SessionError::NoActiveQuiz.is_index_error());
        assert!(!SessionError::QuizEnded.is_index_error());
    }

    #[test]
    fn load_error_messages() {
        let err = LoadError::InvalidQuestion {
            quiz: "rust".into(),
            number: 2,
            reason: "no answers".into(),
        };
        assert_eq!(err.to_string(), "quiz 'rust', question 2: no answers");
        assert_eq!(
            LoadError::QuizNotFound("geo".into()).to_string(),
            "quiz not found: geo"
        );
    }
}
