pub mod init;
pub mod list;
pub mod play;
pub mod results;
pub mod sync;
pub mod validate;

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;

use quizkit_providers::config::{load_config_from, QuizkitConfig};

/// Where quizzes come from, shared by every command that reads them.
#[derive(Args, Debug, Clone)]
pub struct SourceArgs {
    /// Config file path
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Quiz directory (overrides the config file)
    #[arg(long)]
    pub quizzes_dir: Option<PathBuf>,
}

impl SourceArgs {
    pub fn load(&self) -> Result<QuizkitConfig> {
        let mut config = load_config_from(self.config.as_deref())?;
        if let Some(dir) = &self.quizzes_dir {
            config.quizzes_dir = dir.clone();
        }
        Ok(config)
    }
}
