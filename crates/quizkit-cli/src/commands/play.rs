//! The `quizkit play` command.

use std::path::PathBuf;

use anyhow::Result;
use tokio::io::{AsyncBufReadExt, BufReader};

use quizkit_core::model::QuestionView;
use quizkit_core::report::ScoreReport;
use quizkit_core::traits::Presenter;
use quizkit_core::QuizController;
use quizkit_providers::create_provider;
use quizkit_report::render_text;

use super::SourceArgs;

const HELP: &str = "Commands: option numbers to toggle (e.g. `1 3`), n = next, p = previous, q = quit";

/// Prints questions and results to stdout.
struct TerminalPresenter;

impl Presenter for TerminalPresenter {
    fn show_question(&mut self, view: &QuestionView) {
        println!(
            "\nQuestion {}/{}: {}",
            view.index + 1,
            view.total,
            view.question_text
        );
        if view.is_multiple_choice {
            println!("(select all that apply)");
        }
        for (i, answer) in view.answers.iter().enumerate() {
            let checked = view.selected.contains(&i);
            let mark = match (view.is_multiple_choice, checked) {
                (true, true) => "[x]",
                (true, false) => "[ ]",
                (false, true) => "(*)",
                (false, false) => "( )",
            };
            println!("  {mark} {}. {answer}", i + 1);
        }
    }

    fn show_report(&mut self, report: &ScoreReport) {
        println!("\n{}", render_text(report));
    }

    fn show_error(&mut self, message: &str) {
        eprintln!("Error: {message}");
    }
}

/// One line of user input.
#[derive(Debug, PartialEq, Eq)]
enum Input {
    /// 0-based options to toggle, in order.
    Toggle(Vec<usize>),
    Next,
    Previous,
    Quit,
    Help,
}

fn parse_input(line: &str) -> Result<Input, String> {
    let line = line.trim();
    match line.to_ascii_lowercase().as_str() {
        "n" | "next" => return Ok(Input::Next),
        "p" | "prev" | "previous" => return Ok(Input::Previous),
        "q" | "quit" => return Ok(Input::Quit),
        "" | "?" | "h" | "help" => return Ok(Input::Help),
        _ => {}
    }

    line.split(|c: char| c.is_whitespace() || c == ',')
        .filter(|token| !token.is_empty())
        .map(|token| match token.parse::<usize>() {
            Ok(n) if n >= 1 => Ok(n - 1),
            _ => Err(format!("not an option number: {token}")),
        })
        .collect::<Result<Vec<_>, _>>()
        .map(Input::Toggle)
}

pub async fn execute(
    quiz: String,
    count: Option<usize>,
    no_shuffle: bool,
    handoff_path: Option<PathBuf>,
    source: SourceArgs,
) -> Result<()> {
    let mut config = source.load()?;
    if no_shuffle {
        config.shuffle = false;
    }
    let handoff_path = handoff_path.unwrap_or_else(|| config.handoff_path.clone());

    let provider = create_provider(&config)?;
    let mut controller = QuizController::new(provider, TerminalPresenter);

    controller.startup().await?;
    let available = controller.on_quiz_selected(&quiz).await?;
    if let Some(requested) = count {
        if requested != available {
            tracing::info!(requested, available, "playing every question of the quiz");
        }
    }

    println!("{HELP}");
    controller.on_start_quiz(&quiz, count).await?;

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while controller.is_active() {
        let Some(line) = lines.next_line().await? else {
            break;
        };

        let outcome = match parse_input(&line) {
            Ok(Input::Toggle(options)) => controller.on_options_toggled(&options),
            Ok(Input::Next) => controller.on_next(),
            Ok(Input::Previous) => controller.on_previous(),
            Ok(Input::Quit) => break,
            Ok(Input::Help) => {
                println!("{HELP}");
                Ok(())
            }
            Err(message) => {
                eprintln!("{message}");
                Ok(())
            }
        };
        if let Err(e) = outcome {
            eprintln!("{e}");
        }
    }

    if controller.handoff().report.is_none() {
        println!("Quiz not finished, no results saved.");
        return Ok(());
    }

    controller.handoff().save_json(&handoff_path)?;
    println!("Results saved to {}", handoff_path.display());
    Ok(())
}
