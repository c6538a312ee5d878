//! The `quizkit sync` command.

use anyhow::Result;

use quizkit_providers::create_provider;

use super::SourceArgs;

pub async fn execute(source: SourceArgs) -> Result<()> {
    let config = source.load()?;
    if config.remote.is_none() {
        println!("No remote configured. Add a [remote] section to quizkit.toml to enable sync.");
        return Ok(());
    }

    let provider = create_provider(&config)?;
    let fetched = provider.ensure_quizzes_available().await?;

    if fetched.is_empty() {
        println!(
            "{} already has quizzes, nothing downloaded.",
            config.quizzes_dir.display()
        );
    } else {
        println!(
            "Downloaded {} quiz(zes) into {}:",
            fetched.len(),
            config.quizzes_dir.display()
        );
        for name in &fetched {
            println!("  {name}");
        }
    }

    Ok(())
}
