//! The `quizkit results` command.

use std::path::PathBuf;

use anyhow::{Context, Result};

use quizkit_core::handoff::SessionHandoff;
use quizkit_report::{render_text, write_html_report};

use super::SourceArgs;

pub fn execute(
    handoff_path: Option<PathBuf>,
    format: String,
    output: Option<PathBuf>,
    source: SourceArgs,
) -> Result<()> {
    let handoff_path = match handoff_path {
        Some(path) => path,
        None => source.load()?.handoff_path,
    };

    let mut handoff = SessionHandoff::load_json(&handoff_path)
        .context("no saved results; finish a quiz with `quizkit play` first")?;
    let report = handoff
        .take_report()
        .context("the last quiz has no results; finish it with `quizkit play` first")?;

    match format.as_str() {
        "text" => {
            let mut content = render_text(&report);
            if let Some(requested) = handoff.requested_count {
                content.push_str(&format!("Questions requested: {requested}\n"));
            }
            write_or_print(content, output.as_ref())?
        }
        "json" => write_or_print(serde_json::to_string_pretty(&report)?, output.as_ref())?,
        "html" => {
            let path = output.unwrap_or_else(|| PathBuf::from("quizkit-results.html"));
            write_html_report(&report, &path)?;
            println!("HTML report written to {}", path.display());
        }
        other => anyhow::bail!("unknown format: {other} (expected text, html or json)"),
    }

    Ok(())
}

fn write_or_print(content: String, output: Option<&PathBuf>) -> Result<()> {
    match output {
        Some(path) => {
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            std::fs::write(path, content)
                .with_context(|| format!("failed to write {}", path.display()))?;
            println!("Results written to {}", path.display());
        }
        None => print!("{content}"),
    }
    Ok(())
}
