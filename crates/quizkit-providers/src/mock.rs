//! Mock provider for testing.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use serde_json::Value;

use quizkit_core::error::ProviderError;
use quizkit_core::model::Question;
use quizkit_core::traits::ContentProvider;

/// An in-memory content provider for driving the quiz core without files
/// or network access.
#[derive(Default)]
pub struct MockProvider {
    /// Quiz name → raw question records.
    quizzes: BTreeMap<String, Vec<Value>>,
    /// When set, every load fails with this network error.
    load_failure: Option<String>,
    ensure_calls: AtomicU32,
    load_calls: AtomicU32,
    last_loaded: Mutex<Option<String>>,
}

impl MockProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a quiz from raw records.
    pub fn with_records(mut self, name: &str, records: Vec<Value>) -> Self {
        self.quizzes.insert(name.to_string(), records);
        self
    }

    /// Add a quiz from typed questions.
    pub fn with_questions(self, name: &str, questions: &[Question]) -> Self {
        let records = questions
            .iter()
            .map(|q| serde_json::to_value(q).unwrap_or(Value::Null))
            .collect();
        self.with_records(name, records)
    }

    /// Make every load fail as if the network were down.
    pub fn with_load_failure(mut self, message: &str) -> Self {
        self.load_failure = Some(message.to_string());
        self
    }

    pub fn ensure_calls(&self) -> u32 {
        self.ensure_calls.load(Ordering::Relaxed)
    }

    pub fn load_calls(&self) -> u32 {
        self.load_calls.load(Ordering::Relaxed)
    }

    /// Name of the quiz most recently loaded.
    pub fn last_loaded(&self) -> Option<String> {
        self.last_loaded
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    fn records(&self, name: &str) -> Result<&Vec<Value>, ProviderError> {
        self.quizzes
            .get(name)
            .ok_or_else(|| ProviderError::QuizNotFound(name.to_string()))
    }
}

#[async_trait]
impl ContentProvider for MockProvider {
    fn name(&self) -> &str {
        "mock"
    }

    async fn ensure_quizzes_available(&self) -> anyhow::Result<Vec<String>> {
        self.ensure_calls.fetch_add(1, Ordering::Relaxed);
        Ok(vec![])
    }

    async fn list_quizzes(&self) -> anyhow::Result<Vec<String>> {
        Ok(self.quizzes.keys().cloned().collect())
    }

    async fn question_count(&self, quiz_name: &str) -> anyhow::Result<usize> {
        Ok(self.records(quiz_name)?.len())
    }

    async fn load_quiz_data(&self, quiz_name: &str) -> anyhow::Result<Vec<Value>> {
        self.load_calls.fetch_add(1, Ordering::Relaxed);
        *self
            .last_loaded
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner()) = Some(quiz_name.to_string());

        if let Some(message) = &self.load_failure {
            return Err(ProviderError::Network(message.clone()).into());
        }
        Ok(self.records(quiz_name)?.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn serves_registered_quizzes() {
        let provider = MockProvider::new()
            .with_records("b", vec![json!({"questionText": "Q"})])
            .with_questions(
                "a",
                &[Question::new("Q", vec!["yes".into(), "no".into()], vec![0])],
            );

        assert_eq!(provider.list_quizzes().await.unwrap(), vec!["a", "b"]);
        assert_eq!(provider.question_count("a").await.unwrap(), 1);

        let records = provider.load_quiz_data("a").await.unwrap();
        assert_eq!(records[0]["questionText"], "Q");
        assert_eq!(provider.load_calls(), 1);
        assert_eq!(provider.last_loaded().as_deref(), Some("a"));
    }

    #[tokio::test]
    async fn unknown_quiz_is_not_found() {
        let provider = MockProvider::new();
        let err = provider.question_count("nope").await.unwrap_err();
        assert!(matches!(
            err.downcast_ref::<ProviderError>(),
            Some(ProviderError::QuizNotFound(_))
        ));
    }

    #[tokio::test]
    async fn configured_failure() {
        let provider = MockProvider::new()
            .with_records("a", vec![])
            .with_load_failure("connection reset");
        let err = provider.load_quiz_data("a").await.unwrap_err();
        assert!(err.to_string().contains("connection reset"));
    }
}
