use std::ops::RangeInclusive;
use std::path::PathBuf;
use std::str::FromStr;

use anyhow::{bail, Context, Result};

use crate::recommendation::recommender::DEFAULT_MAX_BACKFILL_ROUNDS;

/// Application configuration loaded from environment variables.
/// Every variable has a default; malformed values fail startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub catalog_path: PathBuf,
    pub port: u16,
    pub rust_log: String,
    pub question_count_min: usize,
    pub question_count_max: usize,
    pub max_upload_bytes: usize,
    /// Upper bound on random backfill rounds before the catalog sweep kicks in.
    pub max_backfill_rounds: usize,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let config = Config {
            catalog_path: std::env::var("CATALOG_PATH")
                .unwrap_or_else(|_| "data/software_questions.csv".to_string())
                .into(),
            port: parse_env("PORT", 8080)?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            question_count_min: parse_env("QUESTION_COUNT_MIN", 20)?,
            question_count_max: parse_env("QUESTION_COUNT_MAX", 30)?,
            max_upload_bytes: parse_env("MAX_UPLOAD_BYTES", 10 * 1024 * 1024)?,
            max_backfill_rounds: parse_env("MAX_BACKFILL_ROUNDS", DEFAULT_MAX_BACKFILL_ROUNDS)?,
        };
        config.validate()?;
        Ok(config)
    }

    /// Inclusive range the per-request question count is drawn from.
    pub fn question_count_range(&self) -> RangeInclusive<usize> {
        self.question_count_min..=self.question_count_max
    }

    fn validate(&self) -> Result<()> {
        if self.question_count_min == 0 {
            bail!("QUESTION_COUNT_MIN must be at least 1");
        }
        if self.question_count_min > self.question_count_max {
            bail!(
                "QUESTION_COUNT_MIN ({}) must not exceed QUESTION_COUNT_MAX ({})",
                self.question_count_min,
                self.question_count_max
            );
        }
        if self.max_upload_bytes == 0 {
            bail!("MAX_UPLOAD_BYTES must be positive");
        }
        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            catalog_path: PathBuf::from("data/software_questions.csv"),
            port: 8080,
            rust_log: "info".to_string(),
            question_count_min: 20,
            question_count_max: 30,
            max_upload_bytes: 10 * 1024 * 1024,
            max_backfill_rounds: DEFAULT_MAX_BACKFILL_ROUNDS,
        }
    }
}

fn parse_env<T>(key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match std::env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse::<T>()
            .with_context(|| format!("Environment variable '{key}' has invalid value '{raw}'")),
        Err(_) => Ok(default),
    }
}
