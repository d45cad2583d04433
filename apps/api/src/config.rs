use std::path::PathBuf;
use std::time::Duration;

use anyhow::{ensure, Context, Result};

const DEFAULT_PORT: u16 = 8080;
const DEFAULT_LLM_MODEL: &str = "phi:latest";
const DEFAULT_LLM_TIMEOUT_SECS: u64 = 120;
const DEFAULT_QUIZ_BANK_DIR: &str = "data/quiz";

/// Application configuration loaded from environment variables.
/// Nothing is required: without `DATABASE_URL` answers are not persisted and without
/// `LLM_BASE_URL` roadmaps and advice come from the static catalog.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub rust_log: String,
    pub database_url: Option<String>,
    pub llm_base_url: Option<String>,
    pub llm_model: String,
    pub llm_timeout: Duration,
    pub quiz_bank_dir: PathBuf,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from any key lookup. Blank values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let llm_timeout_secs = match get("LLM_TIMEOUT_SECS") {
            Some(v) => v
                .trim()
                .parse::<u64>()
                .context("LLM_TIMEOUT_SECS must be a whole number of seconds")?,
            None => DEFAULT_LLM_TIMEOUT_SECS,
        };
        ensure!(llm_timeout_secs > 0, "LLM_TIMEOUT_SECS must be greater than zero");

        Ok(Config {
            port: match get("PORT") {
                Some(v) => v
                    .trim()
                    .parse::<u16>()
                    .context("PORT must be a valid port number")?,
                None => DEFAULT_PORT,
            },
            rust_log: get("RUST_LOG").unwrap_or_else(|| "info".to_string()),
            database_url: get("DATABASE_URL"),
            llm_base_url: get("LLM_BASE_URL"),
            llm_model: get("LLM_MODEL").unwrap_or_else(|| DEFAULT_LLM_MODEL.to_string()),
            llm_timeout: Duration::from_secs(llm_timeout_secs),
            quiz_bank_dir: PathBuf::from(
                get("QUIZ_BANK_DIR").unwrap_or_else(|| DEFAULT_QUIZ_BANK_DIR.to_string()),
            ),
        })
    }
}
