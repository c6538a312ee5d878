//! GitHub quiz source: seeds an empty quiz directory from a repository.

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::Context;
use futures::stream::{self, StreamExt, TryStreamExt};
use serde::Deserialize;
use tracing::{debug, info, instrument};

use quizkit_core::error::ProviderError;

pub const DEFAULT_CONTENTS_URL: &str =
    "https://api.github.com/repos/RPDevJesco/Modular_Quiz_App/contents/Quiz/Quizzes";
pub const DEFAULT_RAW_BASE_URL: &str =
    "https://raw.githubusercontent.com/RPDevJesco/Modular_Quiz_App/main/Quiz/Quizzes";
const DEFAULT_TIMEOUT_SECS: u64 = 30;
const DEFAULT_CONCURRENCY: usize = 4;
const USER_AGENT: &str = concat!("quizkit/", env!("CARGO_PKG_VERSION"));

/// Entry of the GitHub contents API listing.
#[derive(Debug, Deserialize)]
struct RepoItem {
    name: String,
    #[serde(rename = "type")]
    item_type: String,
}

pub struct GitHubSource {
    contents_url: String,
    raw_base_url: String,
    concurrency: usize,
    client: reqwest::Client,
}

impl GitHubSource {
    /// `contents_url` lists the quiz directory (GitHub contents API);
    /// files are downloaded from `raw_base_url/<file name>`.
    pub fn new(contents_url: &str, raw_base_url: &str) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(DEFAULT_TIMEOUT_SECS))
            .user_agent(USER_AGENT)
            .build()
            .context("failed to build HTTP client")?;

        Ok(Self {
            contents_url: contents_url.trim_end_matches('/').to_string(),
            raw_base_url: raw_base_url.trim_end_matches('/').to_string(),
            concurrency: DEFAULT_CONCURRENCY,
            client,
        })
    }

    /// Source for the upstream quiz repository.
    pub fn upstream() -> anyhow::Result<Self> {
        Self::new(DEFAULT_CONTENTS_URL, DEFAULT_RAW_BASE_URL)
    }

    /// Maximum number of simultaneous downloads.
    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency.max(1);
        self
    }

    /// Download every quiz into `dir` unless it already holds something.
    ///
    /// Files land in a staging directory next to `dir`, which replaces it
    /// only once every download succeeded. A failed sync leaves `dir` as it
    /// was, so the next call retries.
    ///
    /// Returns the names of the quizzes downloaded.
    #[instrument(skip_all, fields(dir = %dir.display()))]
    pub async fn sync_into(&self, dir: &Path) -> anyhow::Result<Vec<String>> {
        if dir_has_entries(dir).await? {
            debug!("quiz directory not empty, skipping download");
            return Ok(vec![]);
        }

        let files: Vec<String> = self
            .list_remote()
            .await?
            .into_iter()
            .filter(|item| item.item_type == "file" && item.name.ends_with(".json"))
            .map(|item| item.name)
            .collect();
        info!(count = files.len(), "downloading quizzes");

        let staging = staging_dir(dir);
        remove_dir_if_exists(&staging).await?;
        tokio::fs::create_dir_all(&staging).await.map_err(|e| {
            ProviderError::Io(format!("failed to create {}: {e}", staging.display()))
        })?;

        let downloaded: anyhow::Result<Vec<String>> = stream::iter(files)
            .map(|file| self.download(file, &staging))
            .buffer_unordered(self.concurrency)
            .try_collect()
            .await;

        let mut names = match downloaded {
            Ok(names) => names,
            Err(e) => {
                remove_dir_if_exists(&staging).await?;
                return Err(e);
            }
        };

        // `dir` is missing or empty here; `remove_dir` refuses anything else.
        match tokio::fs::remove_dir(dir).await {
            Err(e) if e.kind() != std::io::ErrorKind::NotFound => {
                remove_dir_if_exists(&staging).await?;
                return Err(ProviderError::Io(format!(
                    "failed to replace {}: {e}",
                    dir.display()
                ))
                .into());
            }
            _ => {}
        }
        tokio::fs::rename(&staging, dir).await.map_err(|e| {
            ProviderError::Io(format!(
                "failed to move {} to {}: {e}",
                staging.display(),
                dir.display()
            ))
        })?;

        names.sort();
        Ok(names)
    }

    async fn list_remote(&self) -> anyhow::Result<Vec<RepoItem>> {
        let response = self
            .client
            .get(&self.contents_url)
            .header("Accept", "application/vnd.github.v3+json")
            .send()
            .await
            .map_err(|e| ProviderError::Network(e.to_string()))?;

        let status = response.status().as_u16();
        if status >= 400 {
            let body = response.text().await.unwrap_or_default();
            return Err(ProviderError::Api {
                status,
                message: body,
            }
            .into());
        }

        let items: Vec<RepoItem> = response.json().await.map_err(|e| ProviderError::Api {
            status: 0,
            message: format!("failed to parse contents listing: {e}"),
        })?;
        Ok(items)
    }

    async fn download(&self, file_name: String, dir: &Path) -> anyhow::Result<String> {
        let url = format!("{}/{}", self.raw_base_url, file_name);
        debug!(%url, "downloading quiz");

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| ProviderError::Network(e.to_string()))?;

        let status = response.status().as_u16();
        if status >= 400 {
            let body = response.text().await.unwrap_or_default();
            return Err(ProviderError::Api {
                status,
                message: format!("{file_name}: {body}"),
            }
            .into());
        }

        let content = response
            .text()
            .await
            .map_err(|e| ProviderError::Network(e.to_string()))?;
        serde_json::from_str::<serde_json::Value>(&content)
            .map_err(|e| ProviderError::Malformed(format!("{file_name}: {e}")))?;

        let path = dir.join(&file_name);
        tokio::fs::write(&path, content)
            .await
            .map_err(|e| ProviderError::Io(format!("failed to write {}: {e}", path.display())))?;

        Ok(file_name
            .strip_suffix(".json")
            .unwrap_or(&file_name)
            .to_string())
    }
}

/// Sibling of `dir` that downloads are written to first.
fn staging_dir(dir: &Path) -> PathBuf {
    let name = dir
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "quizzes".to_string());
    dir.with_file_name(format!(".{name}.download"))
}

async fn remove_dir_if_exists(dir: &Path) -> anyhow::Result<()> {
    match tokio::fs::remove_dir_all(dir).await {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(ProviderError::Io(format!("failed to remove {}: {e}", dir.display())).into()),
    }
}

async fn dir_has_entries(dir: &Path) -> anyhow::Result<bool> {
    match tokio::fs::read_dir(dir).await {
        Ok(mut entries) => Ok(entries
            .next_entry()
            .await
            .map_err(|e| ProviderError::Io(e.to_string()))?
            .is_some()),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(false),
        Err(e) => Err(ProviderError::Io(format!("failed to read {}: {e}", dir.display())).into()),
    }
}
