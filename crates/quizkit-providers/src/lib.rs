//! quizkit-providers: where quiz content comes from.
//!
//! Implements the `ContentProvider` trait over a local quiz directory,
//! optionally seeded from a GitHub repository, plus an in-memory mock for
//! tests.

pub mod config;
pub mod github;
pub mod local;
pub mod mock;

pub use config::{create_provider, load_config, load_config_from, QuizkitConfig, RemoteConfig};
pub use github::GitHubSource;
pub use local::LocalQuizProvider;
pub use mock::MockProvider;
pub use quizkit_core::error::ProviderError;
