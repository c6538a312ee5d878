//! Configuration and provider factory.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use quizkit_core::traits::ContentProvider;

use crate::github::{GitHubSource, DEFAULT_CONTENTS_URL, DEFAULT_RAW_BASE_URL};
use crate::local::LocalQuizProvider;

/// Where to seed an empty quiz directory from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoteConfig {
    /// GitHub contents API URL listing the quiz files.
    #[serde(default = "default_contents_url")]
    pub contents_url: String,
    /// Base URL raw quiz files are downloaded from.
    #[serde(default = "default_raw_base_url")]
    pub raw_base_url: String,
    /// Max simultaneous downloads.
    #[serde(default = "default_concurrency")]
    pub concurrency: usize,
}

impl Default for RemoteConfig {
    fn default() -> Self {
        Self {
            contents_url: default_contents_url(),
            raw_base_url: default_raw_base_url(),
            concurrency: default_concurrency(),
        }
    }
}

fn default_contents_url() -> String {
    DEFAULT_CONTENTS_URL.to_string()
}
fn default_raw_base_url() -> String {
    DEFAULT_RAW_BASE_URL.to_string()
}
fn default_concurrency() -> usize {
    4
}

/// Top-level quizkit configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuizkitConfig {
    /// Directory holding `<quiz>.json` files.
    #[serde(default = "default_quizzes_dir")]
    pub quizzes_dir: PathBuf,
    /// Shuffle question order on load.
    #[serde(default = "default_true")]
    pub shuffle: bool,
    /// Where the last quiz's handoff (selection and report) is kept.
    #[serde(default = "default_handoff_path")]
    pub handoff_path: PathBuf,
    /// Remote to seed an empty quiz directory from; none disables sync.
    #[serde(default)]
    pub remote: Option<RemoteConfig>,
}

fn default_true() -> bool {
    true
}
fn default_quizzes_dir() -> PathBuf {
    data_dir().join("Quiz").join("Quizzes")
}
fn default_handoff_path() -> PathBuf {
    data_dir().join("handoff.json")
}

impl Default for QuizkitConfig {
    fn default() -> Self {
        Self {
            quizzes_dir: default_quizzes_dir(),
            shuffle: true,
            handoff_path: default_handoff_path(),
            remote: None,
        }
    }
}

/// Resolve environment variable references like `${VAR_NAME}` in a string.
///
/// Substituted values are not expanded again.
fn resolve_env_vars(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    let mut rest = s;
    while let Some(start) = rest.find("${") {
        let Some(end) = rest[start..].find('}') else {
            break;
        };
        let var_name = &rest[start + 2..start + end];
        result.push_str(&rest[..start]);
        result.push_str(&std::env::var(var_name).unwrap_or_default());
        rest = &rest[start + end + 1..];
    }
    result.push_str(rest);
    result
}

fn resolve_path(path: &Path) -> PathBuf {
    PathBuf::from(resolve_env_vars(&path.to_string_lossy()))
}

/// Load configuration from well-known paths.
///
/// Search order:
/// 1. `quizkit.toml` in the current directory
/// 2. `~/.config/quizkit/config.toml`
///
/// Environment variable overrides: `QUIZKIT_QUIZZES_DIR`, `QUIZKIT_NO_SHUFFLE`.
pub fn load_config() -> Result<QuizkitConfig> {
    load_config_from(None)
}

/// Load config from an explicit path, or search the default locations.
pub fn load_config_from(path: Option<&Path>) -> Result<QuizkitConfig> {
    let config_path = if let Some(p) = path {
        if p.exists() {
            Some(p.to_path_buf())
        } else {
            anyhow::bail!("config file not found: {}", p.display());
        }
    } else {
        let local = PathBuf::from("quizkit.toml");
        if local.exists() {
            Some(local)
        } else {
            config_dir()
                .map(|dir| dir.join("config.toml"))
                .filter(|global| global.exists())
        }
    };

    let mut config = match config_path {
        Some(path) => {
            let content = std::fs::read_to_string(&path)
                .with_context(|| format!("failed to read config: {}", path.display()))?;
            parse_config(&content)
                .with_context(|| format!("failed to parse config: {}", path.display()))?
        }
        None => QuizkitConfig::default(),
    };

    // Apply env var overrides
    if let Ok(dir) = std::env::var("QUIZKIT_QUIZZES_DIR") {
        if !dir.is_empty() {
            config.quizzes_dir = PathBuf::from(dir);
        }
    }
    if std::env::var("QUIZKIT_NO_SHUFFLE").is_ok_and(|v| !v.is_empty() && v != "0") {
        config.shuffle = false;
    }

    Ok(config)
}

/// Parse a TOML config string and resolve `${VAR}` references.
pub fn parse_config(content: &str) -> Result<QuizkitConfig> {
    let mut config: QuizkitConfig = toml::from_str(content)?;
    config.quizzes_dir = resolve_path(&config.quizzes_dir);
    config.handoff_path = resolve_path(&config.handoff_path);
    if let Some(remote) = config.remote.as_mut() {
        remote.contents_url = resolve_env_vars(&remote.contents_url);
        remote.raw_base_url = resolve_env_vars(&remote.raw_base_url);
    }
    Ok(config)
}

fn home_dir() -> Option<PathBuf> {
    std::env::var("HOME").ok().map(PathBuf::from)
}

fn config_dir() -> Option<PathBuf> {
    home_dir().map(|h| h.join(".config").join("quizkit"))
}

fn data_dir() -> PathBuf {
    home_dir()
        .map(|h| h.join(".local").join("share").join("quizkit"))
        .unwrap_or_else(|| PathBuf::from(".quizkit"))
}

/// Create the content provider described by `config`.
pub fn create_provider(config: &QuizkitConfig) -> Result<Arc<dyn ContentProvider>> {
    let mut provider =
        LocalQuizProvider::new(config.quizzes_dir.clone()).with_shuffle(config.shuffle);

    if let Some(remote) = &config.remote {
        let source = GitHubSource::new(&remote.contents_url, &remote.raw_base_url)?
            .with_concurrency(remote.concurrency);
        provider = provider.with_remote(source);
    }

    Ok(Arc::new(provider))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolve_env_vars_basic() {
        std::env::set_var("_QUIZKIT_TEST_VAR", "hello");
        assert_eq!(resolve_env_vars("${_QUIZKIT_TEST_VAR}"), "hello");
        assert_eq!(
            resolve_env_vars("prefix_${_QUIZKIT_TEST_VAR}_suffix"),
            "prefix_hello_suffix"
        );
        assert_eq!(resolve_env_vars("no vars"), "no vars");
        assert_eq!(resolve_env_vars("${unterminated"), "${unterminated");
        std::env::remove_var("_QUIZKIT_TEST_VAR");
    }

    #[test]
    fn resolve_env_vars_does_not_expand_substituted_values() {
        std::env::set_var("_QUIZKIT_SELF_REF", "${_QUIZKIT_SELF_REF}");
        std::env::set_var("_QUIZKIT_OTHER", "/srv");
        assert_eq!(
            resolve_env_vars("${_QUIZKIT_SELF_REF}/${_QUIZKIT_OTHER}/quizzes"),
            "${_QUIZKIT_SELF_REF}//srv/quizzes"
        );
        assert_eq!(resolve_env_vars("${_QUIZKIT_UNSET_VAR}x"), "x");
        std::env::remove_var("_QUIZKIT_SELF_REF");
        std::env::remove_var("_QUIZKIT_OTHER");
    }

    #[test]
    fn default_config() {
        let config = QuizkitConfig::default();
        assert!(config.shuffle);
        assert!(config.remote.is_none());
        assert!(config.quizzes_dir.ends_with("Quiz/Quizzes"));
    }

    #[test]
    fn parse_full_config() {
        let toml_str = r#"
quizzes_dir = "/srv/quizzes"
shuffle = false
handoff_path = "/tmp/quizkit-handoff.json"

[remote]
contents_url = "http://localhost:9999/contents"
"#;
        let config = parse_config(toml_str).unwrap();
        assert_eq!(config.quizzes_dir, PathBuf::from("/srv/quizzes"));
        assert!(!config.shuffle);
        let remote = config.remote.unwrap();
        assert_eq!(remote.contents_url, "http://localhost:9999/contents");
        assert_eq!(remote.raw_base_url, DEFAULT_RAW_BASE_URL);
        assert_eq!(remote.concurrency, 4);
    }

    #[test]
    fn empty_config_uses_defaults() {
        let config = parse_config("").unwrap();
        assert!(config.shuffle);
        assert!(config.remote.is_none());
    }

    #[test]
    fn missing_explicit_config_is_an_error() {
        let err = load_config_from(Some(Path::new("/no/such/quizkit.toml"))).unwrap_err();
        assert!(err.to_string().contains("config file not found"));
    }

    #[test]
    fn explicit_config_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("quizkit.toml");
        std::fs::write(&path, "quizzes_dir = \"/data/quizzes\"\n").unwrap();

        let config = load_config_from(Some(&path)).unwrap();
        assert_eq!(config.quizzes_dir, PathBuf::from("/data/quizzes"));
    }

    #[tokio::test]
    async fn factory_builds_local_provider() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("one.json"), "[]").unwrap();
        let config = QuizkitConfig {
            quizzes_dir: dir.path().to_path_buf(),
            ..Default::default()
        };

        let provider = create_provider(&config).unwrap();
        assert_eq!(provider.name(), "local");
        assert_eq!(provider.list_quizzes().await.unwrap(), vec!["one"]);
    }
}
