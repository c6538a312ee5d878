//! The `quizkit validate` command.

use anyhow::Result;

use quizkit_core::store::QuestionStore;
use quizkit_providers::create_provider;

use super::SourceArgs;

pub async fn execute(quiz: Option<String>, source: SourceArgs) -> Result<()> {
    let mut config = source.load()?;
    config.shuffle = false;
    let provider = create_provider(&config)?;

    let quizzes = match quiz {
        Some(name) => vec![name],
        None => provider.list_quizzes().await?,
    };
    anyhow::ensure!(
        !quizzes.is_empty(),
        "no quizzes found in {}",
        config.quizzes_dir.display()
    );

    let mut failures = 0;
    for name in &quizzes {
        match QuestionStore::load(provider.as_ref(), name).await {
            Ok(store) if store.is_empty() => {
                println!("{name}: WARNING: quiz has no questions");
            }
            Ok(store) => println!("{name}: {} questions", store.len()),
            Err(e) => {
                println!("{name}: ERROR: {e}");
                failures += 1;
            }
        }
    }

    if failures == 0 {
        println!("All quizzes valid.");
        Ok(())
    } else {
        anyhow::bail!("{failures} quiz(zes) failed validation")
    }
}
