//! Handoff between the quiz flow and the results view.
//!
//! Carries the selected quiz, the requested question count and the final
//! report across views (or across process runs, via JSON).

use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::report::ScoreReport;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SessionHandoff {
    /// Quiz most recently selected.
    #[serde(default)]
    pub quiz_name: Option<String>,
    /// Question count entered by the user, shown in the text results view.
    /// It does not truncate the loaded quiz.
    #[serde(default)]
    pub requested_count: Option<usize>,
    /// Report of the last finished quiz.
    #[serde(default)]
    pub report: Option<ScoreReport>,
}

impl SessionHandoff {
    /// Record a quiz selection, dropping any report from a previous quiz.
    pub fn select_quiz(&mut self, quiz_name: &str, requested_count: Option<usize>) {
        if self.quiz_name.as_deref() != Some(quiz_name) {
            self.requested_count = None;
        }
        self.quiz_name = Some(quiz_name.to_string());
        if requested_count.is_some() {
            self.requested_count = requested_count;
        }
        self.report = None;
    }

    /// Hand the report over to the results view.
    pub fn take_report(&mut self) -> Option<ScoreReport> {
        self.report.take()
    }

    pub fn save_json(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self).context("failed to serialize handoff")?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, json)
            .with_context(|| format!("failed to write handoff to {}", path.display()))?;
        Ok(())
    }

    pub fn load_json(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read handoff from {}", path.display()))?;
        serde_json::from_str(&content).context("failed to parse handoff JSON")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::build_report;

    #[test]
    fn selecting_a_new_quiz_discards_old_state() {
        let mut handoff = SessionHandoff::default();
        handoff.select_quiz("rust", Some(10));
        handoff.report = Some(build_report("rust", &[]));

        handoff.select_quiz("geography", None);
        assert_eq!(handoff.quiz_name.as_deref(), Some("geography"));
        assert_eq!(handoff.requested_count, None);
        assert!(handoff.report.is_none());
    }

    #[test]
    fn reselecting_keeps_requested_count() {
        let mut handoff = SessionHandoff::default();
        handoff.select_quiz("rust", Some(5));
        handoff.select_quiz("rust", None);
        assert_eq!(handoff.requested_count, Some(5));
    }

    #[test]
    fn take_report_hands_off_once() {
        let mut handoff = SessionHandoff {
            report: Some(build_report("q", &[])),
            ..Default::default()
        };
        assert!(handoff.take_report().is_some());
        assert!(handoff.take_report().is_none());
    }

    #[test]
    fn json_roundtrip() {
        let mut handoff = SessionHandoff::default();
        handoff.select_quiz("rust", Some(3));
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("handoff.json");

        handoff.save_json(&path).unwrap();
        let loaded = SessionHandoff::load_json(&path).unwrap();
        assert_eq!(loaded.quiz_name.as_deref(), Some("rust"));
        assert_eq!(loaded.requested_count, Some(3));
        assert!(loaded.report.is_none());
    }
}
