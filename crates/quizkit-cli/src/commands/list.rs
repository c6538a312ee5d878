//! The `quizkit list` command.

use anyhow::Result;
use comfy_table::{Cell, Table};

use quizkit_core::traits::NoopPresenter;
use quizkit_core::QuizController;
use quizkit_providers::create_provider;

use super::SourceArgs;

pub async fn execute(source: SourceArgs) -> Result<()> {
    let config = source.load()?;
    let provider = create_provider(&config)?;
    let mut controller = QuizController::new(provider, NoopPresenter);

    let quizzes = controller.startup().await?;
    if quizzes.is_empty() {
        println!(
            "No quizzes found in {}. Run `quizkit init` or `quizkit sync`.",
            config.quizzes_dir.display()
        );
        return Ok(());
    }

    let mut table = Table::new();
    table.set_header(vec!["Quiz", "Questions"]);

    for name in &quizzes {
        let count = match controller.on_quiz_selected(name).await {
            Ok(count) => count.to_string(),
            Err(e) => format!("error: {e}"),
        };
        table.add_row(vec![Cell::new(name), Cell::new(count)]);
    }

    println!("{table}");
    Ok(())
}
