//! quizkit CLI: take quizzes in the terminal.

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

mod commands;

use commands::SourceArgs;

#[derive(Parser)]
#[command(name = "quizkit", version, about = "Multiple-choice quizzes in the terminal")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a starter config and a sample quiz
    Init,

    /// Download quizzes into an empty quiz directory
    Sync {
        #[command(flatten)]
        source: SourceArgs,
    },

    /// List available quizzes with their question counts
    List {
        #[command(flatten)]
        source: SourceArgs,
    },

    /// Check quiz files for malformed or invalid questions
    Validate {
        /// Only validate this quiz
        #[arg(long)]
        quiz: Option<String>,

        #[command(flatten)]
        source: SourceArgs,
    },

    /// Take a quiz
    Play {
        /// Quiz to play
        #[arg(long)]
        quiz: String,

        /// Number of questions requested (recorded with the results)
        #[arg(long)]
        count: Option<usize>,

        /// Keep questions in file order
        #[arg(long)]
        no_shuffle: bool,

        /// Where to save the results (defaults to the configured handoff path)
        #[arg(long)]
        handoff: Option<PathBuf>,

        #[command(flatten)]
        source: SourceArgs,
    },

    /// Show the results of the last quiz
    Results {
        /// Handoff file written by `play`
        #[arg(long)]
        handoff: Option<PathBuf>,

        /// Output format: text, html, json
        #[arg(long, default_value = "text")]
        format: String,

        /// Write to this file instead of stdout
        #[arg(long)]
        output: Option<PathBuf>,

        #[command(flatten)]
        source: SourceArgs,
    },
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn,quizkit=info")),
        )
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Init => commands::init::execute(),
        Commands::Sync { source } => commands::sync::execute(source).await,
        Commands::List { source } => commands::list::execute(source).await,
        Commands::Validate { quiz, source } => commands::validate::execute(quiz, source).await,
        Commands::Play {
            quiz,
            count,
            no_shuffle,
            handoff,
            source,
        } => commands::play::execute(quiz, count, no_shuffle, handoff, source).await,
        Commands::Results {
            handoff,
            format,
            output,
            source,
        } => commands::results::execute(handoff, format, output, source),
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}
