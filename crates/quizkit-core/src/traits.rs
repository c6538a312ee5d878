//! Trait seams between the quiz core and its collaborators.
//!
//! `ContentProvider` is implemented by the `quizkit-providers` crate,
//! `Presenter` and `SelectionSource` by whatever renders the quiz.

use async_trait::async_trait;
use serde_json::Value;

use crate::model::QuestionView;
use crate::report::ScoreReport;

// ---------------------------------------------------------------------------
// Content provider
// ---------------------------------------------------------------------------

/// External source of quiz catalogs and question data.
///
/// Errors should carry a [`crate::error::ProviderError`] so the question
/// store can classify them.
#[async_trait]
pub trait ContentProvider: Send + Sync {
    /// Human-readable provider name (e.g. "local").
    fn name(&self) -> &str;

    /// Make sure quiz content is present, fetching it on first use.
    ///
    /// Idempotent. Returns the names of quizzes fetched by this call.
    async fn ensure_quizzes_available(&self) -> anyhow::Result<Vec<String>>;

    /// List available quiz identifiers.
    async fn list_quizzes(&self) -> anyhow::Result<Vec<String>>;

    /// Number of questions in a quiz.
    async fn question_count(&self, quiz_name: &str) -> anyhow::Result<usize>;

    /// Raw question records for a quiz, decoded by the question store.
    async fn load_quiz_data(&self, quiz_name: &str) -> anyhow::Result<Vec<Value>>;
}

// ---------------------------------------------------------------------------
// Presentation
// ---------------------------------------------------------------------------

/// Receives display requests from the quiz controller.
pub trait Presenter {
    /// Show the question at `view.index`.
    fn show_question(&mut self, view: &QuestionView);

    /// Show the final report once the quiz has ended.
    fn show_report(&mut self, report: &ScoreReport);

    /// Show an error state (e.g. the quiz failed to load).
    fn show_error(&mut self, message: &str);
}

/// Presenter that discards everything.
pub struct NoopPresenter;

impl Presenter for NoopPresenter {
    fn show_question(&mut self, _: &QuestionView) {}
    fn show_report(&mut self, _: &ScoreReport) {}
    fn show_error(&mut self, _: &str) {}
}

// ---------------------------------------------------------------------------
// Selection capture
// ---------------------------------------------------------------------------

/// Reads the option indices currently checked in the presentation layer.
pub trait SelectionSource {
    fn capture_selections(&self) -> Vec<usize>;
}

impl<F> SelectionSource for F
where
    F: Fn() -> Vec<usize>,
{
    fn capture_selections(&self) -> Vec<usize> {
        self()
    }
}
