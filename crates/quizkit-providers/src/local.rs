//! Local quiz directory provider.
//!
//! Each quiz is a `<name>.json` file holding either a JSON array of
//! question records or an object with a `questions` array.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use rand::seq::SliceRandom;
use serde_json::Value;
use tracing::{debug, instrument};

use quizkit_core::error::ProviderError;
use quizkit_core::traits::ContentProvider;

use crate::github::GitHubSource;

const QUIZ_EXTENSION: &str = "json";

/// Serves quizzes from a directory, optionally seeding it from GitHub.
pub struct LocalQuizProvider {
    dir: PathBuf,
    remote: Option<GitHubSource>,
    shuffle: bool,
}

impl LocalQuizProvider {
    /// Provider over `dir`. Loaded questions are shuffled by default.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            remote: None,
            shuffle: true,
        }
    }

    /// Seed an empty directory from this remote on `ensure_quizzes_available`.
    pub fn with_remote(mut self, remote: GitHubSource) -> Self {
        self.remote = Some(remote);
        self
    }

    pub fn with_shuffle(mut self, shuffle: bool) -> Self {
        self.shuffle = shuffle;
        self
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn quiz_path(&self, quiz_name: &str) -> Result<PathBuf, ProviderError> {
        let valid = !quiz_name.is_empty()
            && !quiz_name.contains(|c: char| c == '/' || c == '\\')
            && quiz_name != "."
            && quiz_name != "..";
        if !valid {
            return Err(ProviderError::QuizNotFound(quiz_name.to_string()));
        }
        Ok(self.dir.join(format!("{quiz_name}.{QUIZ_EXTENSION}")))
    }

    async fn read_records(&self, quiz_name: &str) -> Result<Vec<Value>, ProviderError> {
        let path = self.quiz_path(quiz_name)?;
        debug!(path = %path.display(), "reading quiz file");

        let content = match tokio::fs::read_to_string(&path).await {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(ProviderError::QuizNotFound(quiz_name.to_string()));
            }
            Err(e) => {
                return Err(ProviderError::Io(format!(
                    "failed to read {}: {e}",
                    path.display()
                )));
            }
        };

        parse_records(&content)
    }
}

/// Split quiz file content into raw question records.
pub fn parse_records(content: &str) -> Result<Vec<Value>, ProviderError> {
    let value: Value = serde_json::from_str(content)
        .map_err(|e| ProviderError::Malformed(format!("invalid JSON: {e}")))?;

    match value {
        Value::Array(records) => Ok(records),
        Value::Object(mut map) => match map.remove("questions") {
            Some(Value::Array(records)) => Ok(records),
            _ => Err(ProviderError::Malformed(
                "expected an array of questions or an object with a `questions` array".into(),
            )),
        },
        _ => Err(ProviderError::Malformed(
            "expected an array of questions".into(),
        )),
    }
}

#[async_trait]
impl ContentProvider for LocalQuizProvider {
    fn name(&self) -> &str {
        "local"
    }

    #[instrument(skip(self), fields(dir = %self.dir.display()))]
    async fn ensure_quizzes_available(&self) -> anyhow::Result<Vec<String>> {
        match &self.remote {
            Some(remote) => remote.sync_into(&self.dir).await,
            None => {
                tokio::fs::create_dir_all(&self.dir).await.map_err(|e| {
                    ProviderError::Io(format!("failed to create {}: {e}", self.dir.display()))
                })?;
                Ok(vec![])
            }
        }
    }

    async fn list_quizzes(&self) -> anyhow::Result<Vec<String>> {
        let mut entries = match tokio::fs::read_dir(&self.dir).await {
            Ok(entries) => entries,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(vec![]),
            Err(e) => {
                return Err(ProviderError::Io(format!(
                    "failed to list {}: {e}",
                    self.dir.display()
                ))
                .into())
            }
        };

        let mut names = Vec::new();
        while let Some(entry) = entries
            .next_entry()
            .await
            .map_err(|e| ProviderError::Io(e.to_string()))?
        {
            let path = entry.path();
            let is_file = entry
                .file_type()
                .await
                .map(|t| t.is_file())
                .unwrap_or(false);
            if !is_file || path.extension().and_then(|e| e.to_str()) != Some(QUIZ_EXTENSION) {
                continue;
            }
            if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                names.push(stem.to_string());
            }
        }

        names.sort();
        Ok(names)
    }

    async fn question_count(&self, quiz_name: &str) -> anyhow::Result<usize> {
        Ok(self.read_records(quiz_name).await?.len())
    }

    #[instrument(skip(self))]
    async fn load_quiz_data(&self, quiz_name: &str) -> anyhow::Result<Vec<Value>> {
        let mut records = self.read_records(quiz_name).await?;
        if self.shuffle {
            records.shuffle(&mut rand::thread_rng());
        }
        Ok(records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quizkit_core::error::LoadError;
    use quizkit_core::store::QuestionStore;

    const SAMPLE: &str = r#"[
        {"questionText": "Q1", "answers": ["A", "B"], "correctAnswerIndex": [0]},
        {"questionText": "Q2", "answers": ["A", "B"], "correctAnswerIndex": [1]},
        {"questionText": "Q3", "answers": ["A", "B"], "correctAnswerIndex": [1]}
    ]"#;

    fn provider_with(files: &[(&str, &str)]) -> (tempfile::TempDir, LocalQuizProvider) {
        let dir = tempfile::tempdir().unwrap();
        for (name, content) in files {
            std::fs::write(dir.path().join(name), content).unwrap();
        }
        let provider = LocalQuizProvider::new(dir.path()).with_shuffle(false);
        (dir, provider)
    }

    #[tokio::test]
    async fn lists_json_files_only() {
        let (dir, provider) = provider_with(&[
            ("rust.json", SAMPLE),
            ("geography.json", "[]"),
            ("notes.txt", "ignore me"),
        ]);
        std::fs::create_dir(dir.path().join("nested.json")).unwrap();

        let names = provider.list_quizzes().await.unwrap();
        assert_eq!(names, vec!["geography", "rust"]);
    }

    #[tokio::test]
    async fn missing_directory_lists_nothing() {
        let provider = LocalQuizProvider::new("/definitely/not/a/quiz/dir");
        assert!(provider.list_quizzes().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn counts_and_loads_in_file_order() {
        let (_dir, provider) = provider_with(&[("rust.json", SAMPLE)]);
        assert_eq!(provider.question_count("rust").await.unwrap(), 3);

        let records = provider.load_quiz_data("rust").await.unwrap();
        let texts: Vec<&str> = records
            .iter()
            .map(|r| r["questionText"].as_str().unwrap())
            .collect();
        assert_eq!(texts, ["Q1", "Q2", "Q3"]);
    }

    #[tokio::test]
    async fn shuffle_keeps_every_question() {
        let (dir, _) = provider_with(&[("rust.json", SAMPLE)]);
        let provider = LocalQuizProvider::new(dir.path());
        let mut texts: Vec<String> = provider
            .load_quiz_data("rust")
            .await
            .unwrap()
            .iter()
            .map(|r| r["questionText"].as_str().unwrap().to_string())
            .collect();
        texts.sort();
        assert_eq!(texts, ["Q1", "Q2", "Q3"]);
    }

    #[tokio::test]
    async fn accepts_wrapped_question_list() {
        let wrapped = format!(r#"{{"questions": {SAMPLE}}}"#);
        let (_dir, provider) = provider_with(&[("wrapped.json", &wrapped)]);
        assert_eq!(provider.question_count("wrapped").await.unwrap(), 3);
    }

    #[tokio::test]
    async fn missing_quiz_maps_to_not_found() {
        let (_dir, provider) = provider_with(&[]);
        let err = QuestionStore::load(&provider, "ghost").await.unwrap_err();
        assert_eq!(err, LoadError::QuizNotFound("ghost".into()));

        let err = QuestionStore::load(&provider, "../etc/passwd").await.unwrap_err();
        assert!(matches!(err, LoadError::QuizNotFound(_)));
    }

    #[tokio::test]
    async fn malformed_file_maps_to_malformed() {
        let (_dir, provider) = provider_with(&[("bad.json", "{not json")]);
        let err = QuestionStore::load(&provider, "bad").await.unwrap_err();
        assert!(matches!(err, LoadError::Malformed { .. }));

        let (_dir, provider) = provider_with(&[("scalar.json", "42")]);
        let err = QuestionStore::load(&provider, "scalar").await.unwrap_err();
        assert!(matches!(err, LoadError::Malformed { .. }));
    }

    #[tokio::test]
    async fn ensure_without_remote_creates_directory() {
        let dir = tempfile::tempdir().unwrap();
        let quiz_dir = dir.path().join("Quiz").join("Quizzes");
        let provider = LocalQuizProvider::new(&quiz_dir);

        assert!(provider.ensure_quizzes_available().await.unwrap().is_empty());
        assert!(quiz_dir.is_dir());
        // idempotent
        assert!(provider.ensure_quizzes_available().await.unwrap().is_empty());
    }
}
