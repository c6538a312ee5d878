//! HTML report generator.
//!
//! Produces a self-contained HTML file with all CSS/JS inlined.

use anyhow::Result;
use std::path::Path;

use quizkit_core::report::{QuestionOutcome, ScoreReport};

/// Escape a string for safe HTML insertion.
pub(crate) fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#x27;")
}

/// Generate an HTML results page from a score report.
pub fn generate_html(report: &ScoreReport) -> String {
    let mut html = String::new();

    html.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n");
    html.push_str("<meta charset=\"utf-8\">\n");
    html.push_str("<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n");
    html.push_str(&format!(
        "<title>Quiz results: {}</title>\n",
        html_escape(&report.quiz_name)
    ));
    html.push_str("<style>\n");
    html.push_str(CSS);
    html.push_str("</style>\n");
    html.push_str("</head>\n<body>\n");

    // Header
    html.push_str("<header>\n");
    html.push_str("<h1>Quiz Results</h1>\n");
    html.push_str(&format!(
        "<p class=\"meta\">Quiz: <strong>{}</strong> | {} questions | {}</p>\n",
        html_escape(&report.quiz_name),
        report.total_questions,
        report.created_at.format("%Y-%m-%d %H:%M:%S UTC")
    ));
    html.push_str("</header>\n");

    // Summary
    html.push_str("<section class=\"dashboard\">\n");
    html.push_str("<h2>Summary</h2>\n");
    html.push_str("<table class=\"summary\">\n");
    html.push_str("<thead><tr><th>Total Questions</th><th>Correct Answers</th><th>Incorrect Answers</th><th>Score</th></tr></thead>\n");
    html.push_str(&format!(
        "<tbody><tr><td>{}</td><td class=\"pass\">{}</td><td class=\"fail\">{}</td><td>{:.1}%</td></tr></tbody>\n",
        report.total_questions,
        report.correct_answers,
        report.incorrect_answers,
        report.score_percent(),
    ));
    html.push_str("</table>\n");
    html.push_str(&generate_score_bar(report));
    html.push_str("</section>\n");

    // Incorrect questions
    html.push_str("<section class=\"review\">\n");
    html.push_str("<h2>Incorrect Answers</h2>\n");
    let mut any_incorrect = false;
    for outcome in report.incorrect() {
        any_incorrect = true;
        html.push_str(&render_outcome(outcome));
    }
    if !any_incorrect {
        html.push_str("<p class=\"perfect\">Every question was answered correctly.</p>\n");
    }
    html.push_str("</section>\n");

    // All questions
    html.push_str("<section class=\"results\">\n");
    html.push_str("<h2>All Questions</h2>\n");
    html.push_str("<table class=\"results-table\" id=\"results\">\n");
    html.push_str("<thead><tr><th onclick=\"sortTable(0)\">#</th><th onclick=\"sortTable(1)\">Question</th><th onclick=\"sortTable(2)\">Result</th></tr></thead>\n");
    html.push_str("<tbody>\n");
    for d in &report.details {
        let (class, text) = match (d.is_correct, d.answered) {
            (true, _) => ("pass", "Correct"),
            (false, true) => ("fail", "Incorrect"),
            (false, false) => ("fail", "Not answered"),
        };
        html.push_str(&format!(
            "<tr class=\"{}\"><td>{}</td><td>{}</td><td>{}</td></tr>\n",
            class,
            d.number,
            html_escape(&d.question_text),
            text
        ));
    }
    html.push_str("</tbody></table>\n");
    html.push_str("</section>\n");

    // Raw JSON
    html.push_str("<section class=\"raw-data\">\n");
    html.push_str("<details>\n<summary>Raw JSON Data</summary>\n");
    html.push_str("<pre><code>");
    html.push_str(&html_escape(
        &serde_json::to_string_pretty(report).unwrap_or_default(),
    ));
    html.push_str("</code></pre>\n");
    html.push_str("</details>\n</section>\n");

    html.push_str("<script>\n");
    html.push_str(JS);
    html.push_str("</script>\n");

    html.push_str("</body>\n</html>");
    html
}

/// Write an HTML results page to a file.
pub fn write_html_report(report: &ScoreReport, path: &Path) -> Result<()> {
    let html = generate_html(report);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, html)?;
    Ok(())
}

fn render_outcome(outcome: &QuestionOutcome) -> String {
    let mut out = String::new();
    out.push_str("<div class=\"question fail\">\n");
    out.push_str(&format!(
        "<h3>Question {}: {}</h3>\n",
        outcome.number,
        html_escape(&outcome.question_text)
    ));

    out.push_str("<p><strong>Your Answer:</strong> ");
    match outcome.user_answer_labels() {
        Some(labels) => out.push_str(&html_escape(&labels.join(", "))),
        None => out.push_str("<em>No Answer</em>"),
    }
    out.push_str("</p>\n");

    out.push_str(&format!(
        "<p><strong>Correct Answer:</strong> {}</p>\n",
        html_escape(&outcome.correct_answer_labels().join(", "))
    ));
    out.push_str("</div>\n");
    out
}

fn generate_score_bar(report: &ScoreReport) -> String {
    let max_width = 400;
    let bar_height = 30;
    let score = report.score_percent() / 100.0;
    let width = (score * max_width as f64) as usize;

    let color = if score >= 0.8 {
        "#22c55e"
    } else if score >= 0.5 {
        "#eab308"
    } else {
        "#ef4444"
    };

    let mut svg = format!(
        "<svg width=\"{}\" height=\"{}\" xmlns=\"http://www.w3.org/2000/svg\">\n",
        max_width + 60,
        bar_height + 20
    );
    svg.push_str(&format!(
        "  <rect x=\"0\" y=\"10\" width=\"{max_width}\" height=\"{bar_height}\" fill=\"none\" stroke=\"currentColor\" rx=\"4\"/>\n"
    ));
    svg.push_str(&format!(
        "  <rect x=\"0\" y=\"10\" width=\"{width}\" height=\"{bar_height}\" fill=\"{color}\" rx=\"4\"/>\n"
    ));
    svg.push_str(&format!(
        "  <text x=\"{}\" y=\"{}\" font-size=\"12\" fill=\"currentColor\" dominant-baseline=\"middle\">{:.1}%</text>\n",
        max_width + 8,
        10 + bar_height / 2,
        report.score_percent()
    ));
    svg.push_str("</svg>\n");
    svg
}

const CSS: &str = r#"
:root { --bg: #fff; --fg: #1a1a1a; --border: #e5e7eb; --pass: #dcfce7; --fail: #fde2e2; }
@media (prefers-color-scheme: dark) {
  :root { --bg: #111827; --fg: #f9fafb; --border: #374151; --pass: #064e3b; --fail: #7f1d1d; }
}
body { font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', sans-serif; margin: 0; padding: 2rem; background: var(--bg); color: var(--fg); }
h1, h2 { margin-top: 2rem; }
.meta { color: #6b7280; }
table { border-collapse: collapse; width: 100%; margin: 1rem 0; }
th, td { border: 1px solid var(--border); padding: 0.5rem 1rem; text-align: left; }
th { background: var(--border); cursor: pointer; }
.pass { background: var(--pass); }
.fail { background: var(--fail); }
.question { border-radius: 8px; padding: 0.5rem 1rem; margin: 1rem 0; }
.question h3 { margin: 0.5rem 0; }
pre { overflow-x: auto; padding: 1rem; background: var(--border); border-radius: 8px; }
code { font-family: 'JetBrains Mono', 'Fira Code', monospace; font-size: 0.85rem; }
details { margin: 1rem 0; }
summary { cursor: pointer; font-weight: bold; }
svg { margin: 1rem 0; }
"#;

const JS: &str = r#"
function sortTable(col) {
  const table = document.getElementById('results');
  const tbody = table.querySelector('tbody');
  const rows = Array.from(tbody.querySelectorAll('tr'));
  const asc = table.dataset.sortCol == col && table.dataset.sortDir == 'asc' ? false : true;
  rows.sort((a, b) => {
    const va = a.cells[col].textContent;
    const vb = b.cells[col].textContent;
    const na = Number(va), nb = Number(vb);
    const cmp = isNaN(na) || isNaN(nb) ? va.localeCompare(vb) : na - nb;
    return asc ? cmp : -cmp;
  });
  table.dataset.sortCol = col;
  table.dataset.sortDir = asc ? 'asc' : 'desc';
  rows.forEach(r => tbody.appendChild(r));
}
"#;

#[cfg(test)]
mod tests {
    use super::*;
    use quizkit_core::model::Question;
    use quizkit_core::report::build_report;

    fn make_test_report() -> ScoreReport {
        let answers = vec!["4".to_string(), "5".to_string(), "<none>".to_string()];
        let mut right = Question::new("2 + 2?", answers.clone(), vec![0]);
        right.user_answers = vec![0];
        right.is_correct = Some(true);

        let mut wrong = Question::new("2 + 3 < 6?", answers.clone(), vec![1]);
        wrong.user_answers = vec![0];
        wrong.is_correct = Some(false);

        let skipped = Question::new("Trick question", answers, vec![2]);

        build_report("Arithmetic & Logic", &[right, wrong, skipped])
    }

    #[test]
    fn html_report_contains_required_elements() {
        let report = make_test_report();
        let html = generate_html(&report);

        assert!(html.contains("<html"));
        assert!(html.contains("</html>"));
        assert!(html.contains("Arithmetic &amp; Logic"));
        assert!(html.contains("<td>3</td><td class=\"pass\">1</td><td class=\"fail\">2</td>"));
    }

    #[test]
    fn html_report_lists_only_incorrect_questions_for_review() {
        let html = generate_html(&make_test_report());
        let review = html
            .split("<section class=\"review\">")
            .nth(1)
            .and_then(|s| s.split("</section>").next())
            .unwrap();

        assert!(!review.contains("2 + 2?"));
        assert!(review.contains("Question 2: 2 + 3 &lt; 6?"));
        assert!(review.contains("Your Answer:</strong> Answer 1: 4"));
        assert!(review.contains("Correct Answer:</strong> Answer 2: 5"));
        assert!(review.contains("Question 3: Trick question"));
        assert!(review.contains("<em>No Answer</em>"));
        assert!(review.contains("Answer 3: &lt;none&gt;"));
    }

    #[test]
    fn perfect_score_has_nothing_to_review() {
        let mut q = Question::new("Q", vec!["a".into()], vec![0]);
        q.user_answers = vec![0];
        q.is_correct = Some(true);
        let html = generate_html(&build_report("easy", &[q]));

        assert!(html.contains("Every question was answered correctly."));
        assert!(html.contains("100.0%"));
    }

    #[test]
    fn html_report_write_to_file() {
        let report = make_test_report();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out").join("results.html");

        write_html_report(&report, &path).unwrap();
        assert!(path.exists());

        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.contains("<html"));
    }
}
