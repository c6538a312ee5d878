//! Question store: loads and decodes one quiz from a content provider.

use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, info};

use crate::error::{LoadError, ProviderError};
use crate::model::Question;
use crate::traits::ContentProvider;

/// Raw question record as found in quiz files.
///
/// Any user state in the file (`userAnswers`, `isCorrect`) is ignored.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawQuestion {
    question_text: String,
    answers: Vec<String>,
    correct_answer_index: Vec<usize>,
    #[serde(default)]
    is_multiple_choice: bool,
}

/// The ordered questions of one quiz, as loaded from a provider.
#[derive(Debug, Clone, Default)]
pub struct QuestionStore {
    quiz_name: String,
    questions: Vec<Question>,
}

impl QuestionStore {
    /// The "no quiz loaded" state.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Load a quiz from `provider`.
    ///
    /// Nothing partially decoded escapes on failure.
    pub async fn load(
        provider: &dyn ContentProvider,
        quiz_name: &str,
    ) -> Result<Self, LoadError> {
        debug!(provider = provider.name(), quiz = quiz_name, "loading quiz");
        let records = provider
            .load_quiz_data(quiz_name)
            .await
            .map_err(|e| classify_provider_error(quiz_name, &e))?;
        let store = Self::from_records(quiz_name, records)?;
        info!(quiz = quiz_name, questions = store.len(), "quiz loaded");
        Ok(store)
    }

    /// Decode raw records into a store, checking every invariant.
    pub fn from_records(quiz_name: &str, records: Vec<Value>) -> Result<Self, LoadError> {
        let questions = records
            .into_iter()
            .enumerate()
            .map(|(i, record)| decode_question(quiz_name, i + 1, record))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            quiz_name: quiz_name.to_string(),
            questions,
        })
    }

    pub fn quiz_name(&self) -> &str {
        &self.quiz_name
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    /// Give up the store, yielding the quiz name and its questions.
    pub fn into_parts(self) -> (String, Vec<Question>) {
        (self.quiz_name, self.questions)
    }
}

fn decode_question(quiz: &str, number: usize, record: Value) -> Result<Question, LoadError> {
    let raw: RawQuestion = serde_json::from_value(record).map_err(|e| LoadError::Malformed {
        quiz: quiz.to_string(),
        message: format!("question {number}: {e}"),
    })?;

    let question = Question::new(raw.question_text, raw.answers, raw.correct_answer_index)
        .with_multiple_choice(raw.is_multiple_choice);

    question
        .check_invariants()
        .map_err(|reason| LoadError::InvalidQuestion {
            quiz: quiz.to_string(),
            number,
            reason,
        })?;

    Ok(question)
}

/// Map a provider failure onto the load error taxonomy.
pub fn classify_provider_error(quiz: &str, err: &anyhow::Error) -> LoadError {
    let provider_error = err
        .chain()
        .find_map(|cause| cause.downcast_ref::<ProviderError>());

    match provider_error {
        Some(ProviderError::QuizNotFound(name)) => LoadError::QuizNotFound(name.clone()),
        Some(ProviderError::Malformed(message)) => LoadError::Malformed {
            quiz: quiz.to_string(),
            message: message.clone(),
        },
        _ => LoadError::Unavailable {
            quiz: quiz.to_string(),
            message: format!("{err:#}"),
        },
    }
}
