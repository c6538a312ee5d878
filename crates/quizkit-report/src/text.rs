//! Plain-text results for terminals.

use std::fmt::Write;

use quizkit_core::report::ScoreReport;

/// Render the results view: the summary block, then every incorrectly
/// answered question with the user's and the correct answers.
pub fn render_text(report: &ScoreReport) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "Results for {}", report.quiz_name);
    let _ = writeln!(out, "Total Questions: {}", report.total_questions);
    let _ = writeln!(out, "Correct Answers: {}", report.correct_answers);
    let _ = writeln!(out, "Incorrect Answers: {}", report.incorrect_answers);
    let _ = writeln!(out, "Score: {:.1}%", report.score_percent());

    for outcome in report.incorrect() {
        out.push('\n');
        let _ = writeln!(
            out,
            "Question {}: {}",
            outcome.number, outcome.question_text
        );
        let yours = outcome
            .user_answer_labels()
            .map(|labels| labels.join(", "))
            .unwrap_or_else(|| "No Answer".to_string());
        let _ = writeln!(out, "  Your Answer: {yours}");
        let _ = writeln!(
            out,
            "  Correct Answer: {}",
            outcome.correct_answer_labels().join(", ")
        );
    }

    out
}
