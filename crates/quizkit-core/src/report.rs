//! Score report construction with JSON persistence.

use std::path::Path;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::model::Question;

/// Final summary and per-question breakdown of one quiz attempt.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreReport {
    /// Unique report identifier.
    pub id: Uuid,
    /// Quiz the report belongs to.
    pub quiz_name: String,
    /// When the quiz ended.
    pub created_at: DateTime<Utc>,
    pub total_questions: usize,
    pub correct_answers: usize,
    pub incorrect_answers: usize,
    /// Per-question outcomes in original question order.
    pub details: Vec<QuestionOutcome>,
}

/// Outcome of a single question, reduced to what the results view shows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionOutcome {
    /// 1-based position in the quiz.
    pub number: usize,
    pub question_text: String,
    /// Option texts, so indices can be labelled.
    pub answers: Vec<String>,
    pub is_correct: bool,
    /// False when the question was never submitted.
    pub answered: bool,
    pub user_answers: Vec<usize>,
    pub correct_answer_indices: Vec<usize>,
}

/// Aggregate the final question states into a report.
///
/// Only `is_correct == Some(true)` counts as correct; never-evaluated
/// questions count as incorrect.
pub fn build_report(quiz_name: &str, questions: &[Question]) -> ScoreReport {
    let details: Vec<QuestionOutcome> = questions
        .iter()
        .enumerate()
        .map(|(i, q)| QuestionOutcome {
            number: i + 1,
            question_text: q.question_text.clone(),
            answers: q.answers.clone(),
            is_correct: q.is_correct == Some(true),
            answered: q.is_evaluated(),
            user_answers: q.user_answers.clone(),
            correct_answer_indices: q.correct_answer_index.clone(),
        })
        .collect();

    let correct_answers = details.iter().filter(|d| d.is_correct).count();

    ScoreReport {
        id: Uuid::new_v4(),
        quiz_name: quiz_name.to_string(),
        created_at: Utc::now(),
        total_questions: details.len(),
        correct_answers,
        incorrect_answers: details.len() - correct_answers,
        details,
    }
}

impl QuestionOutcome {
    /// Label the selected options as "Answer N: text", or `None` if the
    /// question was left without a selection.
    pub fn user_answer_labels(&self) -> Option<Vec<String>> {
        if self.user_answers.is_empty() {
            None
        } else {
            Some(self.labels(&self.user_answers))
        }
    }

    /// Label the correct options as "Answer N: text".
    pub fn correct_answer_labels(&self) -> Vec<String> {
        self.labels(&self.correct_answer_indices)
    }

    fn labels(&self, indices: &[usize]) -> Vec<String> {
        indices
            .iter()
            .map(|&i| match self.answers.get(i) {
                Some(text) => format!("Answer {}: {}", i + 1, text),
                None => format!("Answer {}", i + 1),
            })
            .collect()
    }
}

impl ScoreReport {
    /// Outcomes of the questions that were not answered correctly.
    pub fn incorrect(&self) -> impl Iterator<Item = &QuestionOutcome> {
        self.details.iter().filter(|d| !d.is_correct)
    }

    /// Share of correct answers in percent (0.0 for an empty report).
    pub fn score_percent(&self) -> f64 {
        if self.total_questions == 0 {
            0.0
        } else {
            self.correct_answers as f64 / self.total_questions as f64 * 100.0
        }
    }

    /// Save the report as JSON to a file.
    pub fn save_json(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self).context("failed to serialize report")?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, json)
            .with_context(|| format!("failed to write report to {}", path.display()))?;
        Ok(())
    }

    /// Load a report from a JSON file.
    pub fn load_json(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read report from {}", path.display()))?;
        let report: ScoreReport =
            serde_json::from_str(&content).context("failed to parse report JSON")?;
        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::evaluator::evaluate;

    fn question(text: &str, correct: Vec<usize>) -> Question {
        Question::new(text, vec!["A".into(), "B".into(), "C".into()], correct)
    }

    fn answered(text: &str, correct: Vec<usize>, selection: Vec<usize>) -> Question {
        let mut q = question(text, correct);
        q.user_answers = selection;
        evaluate(&mut q);
        q
    }

    #[test]
    fn counts_and_order() {
        let questions = vec![
            answered("Q1", vec![1], vec![1]),
            question("Q2", vec![0]),
            answered("Q3", vec![2], vec![0]),
        ];
        let report = build_report("sample", &questions);

        assert_eq!(report.quiz_name, "sample");
        assert_eq!(report.total_questions, 3);
        assert_eq!(report.correct_answers, 1);
        assert_eq!(report.incorrect_answers, 2);
        assert_eq!(
            report.correct_answers + report.incorrect_answers,
            report.total_questions
        );

        let texts: Vec<&str> = report
            .details
            .iter()
            .map(|d| d.question_text.as_str())
            .collect();
        assert_eq!(texts, ["Q1", "Q2", "Q3"]);
        assert_eq!(report.details[1].number, 2);
    }

    #[test]
    fn unevaluated_question_counts_as_incorrect_and_unanswered() {
        let report = build_report("q", &[question("never seen", vec![0])]);
        let outcome = &report.details[0];
        assert!(!outcome.is_correct);
        assert!(!outcome.answered);
        assert_eq!(outcome.user_answer_labels(), None);
        assert_eq!(report.incorrect().count(), 1);
    }

    #[test]
    fn empty_report() {
        let report = build_report("empty", &[]);
        assert_eq!(report.total_questions, 0);
        assert_eq!(report.correct_answers + report.incorrect_answers, 0);
        assert_eq!(report.score_percent(), 0.0);
    }

    #[test]
    fn answer_labels() {
        let report = build_report("q", &[answered("Q", vec![1], vec![2])]);
        let outcome = &report.details[0];
        assert_eq!(
            outcome.user_answer_labels(),
            Some(vec!["Answer 3: C".to_string()])
        );
        assert_eq!(outcome.correct_answer_labels(), vec!["Answer 2: B"]);
    }

    #[test]
    fn score_percent() {
        let report = build_report(
            "q",
            &[
                answered("Q1", vec![0], vec![0]),
                answered("Q2", vec![0], vec![1]),
            ],
        );
        assert!((report.score_percent() - 50.0).abs() < f64::EPSILON);
    }

    #[test]
    fn json_roundtrip() {
        let report = build_report("persisted", &[answered("Q1", vec![1], vec![1])]);
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("report.json");

        report.save_json(&path).unwrap();
        let loaded = ScoreReport::load_json(&path).unwrap();

        assert_eq!(loaded.id, report.id);
        assert_eq!(loaded.quiz_name, "persisted");
        assert_eq!(loaded.details, report.details);
        assert_eq!(loaded.correct_answers, 1);
    }
}
