use std::path::PathBuf;

use anyhow::{Context, Result};

use crate::retrieval::ranker::DEFAULT_TOP_K;

const DEFAULT_CORPUS_FILE: &str = "config/reference_examples.json";
const DEFAULT_VOCABULARY_FILE: &str = "config/retrieval_vocabulary.json";

/// Application configuration loaded from environment variables.
/// Fails at startup if required variables are missing.
#[derive(Debug, Clone)]
pub struct Config {
    pub anthropic_api_key: String,
    pub port: u16,
    pub rust_log: String,
    /// Reference example corpus. Missing or malformed files degrade to an empty corpus.
    pub corpus_path: PathBuf,
    /// Vocabulary override. Missing or malformed files degrade to the built-in table.
    pub vocabulary_path: PathBuf,
    /// Named in the closing instructions of augmented prompts.
    pub organization_name: String,
    pub retrieval_top_k: usize,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            anthropic_api_key: require_env("ANTHROPIC_API_KEY")?,
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            corpus_path: path_env("CORPUS_PATH", DEFAULT_CORPUS_FILE),
            vocabulary_path: path_env("VOCABULARY_PATH", DEFAULT_VOCABULARY_FILE),
            organization_name: std::env::var("ORGANIZATION_NAME")
                .unwrap_or_else(|_| "the organization".to_string()),
            retrieval_top_k: match std::env::var("RETRIEVAL_TOP_K") {
                Ok(v) => v
                    .parse::<usize>()
                    .context("RETRIEVAL_TOP_K must be a non-negative integer")?,
                Err(_) => DEFAULT_TOP_K,
            },
        })
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}

/// Path from `key`, or `default_file` resolved against this crate's directory.
fn path_env(key: &str, default_file: &str) -> PathBuf {
    std::env::var(key)
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from(env!("CARGO_MANIFEST_DIR")).join(default_file))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_paths_point_at_bundled_config() {
        let corpus = path_env("STORY_API_TEST_UNSET_CORPUS", DEFAULT_CORPUS_FILE);
        let vocabulary = path_env("STORY_API_TEST_UNSET_VOCABULARY", DEFAULT_VOCABULARY_FILE);
        assert!(corpus.starts_with(env!("CARGO_MANIFEST_DIR")));
        assert!(corpus.ends_with("config/reference_examples.json"));
        assert!(corpus.exists());
        assert!(vocabulary.exists());
    }

    #[test]
    fn test_require_env_reports_missing_key() {
        let err = require_env("STORY_API_TEST_UNSET_REQUIRED").unwrap_err();
        assert!(err.to_string().contains("STORY_API_TEST_UNSET_REQUIRED"));
    }
}
