use std::path::PathBuf;
use std::time::Duration;

use anyhow::{anyhow, bail, Context, Result};

use crate::analysis::difficulty::{Difficulty, FALLBACK_DIFFICULTY, FALLBACK_MONTHS};

pub const DEFAULT_API_URL: &str = "http://localhost:8000";
pub const DEFAULT_DATA_DIR: &str = ".wevolve";
pub const STORE_FILE_NAME: &str = "store.json";

/// Client configuration loaded from environment variables (and `.env`).
/// Everything has a default; only malformed values are errors.
#[derive(Debug, Clone)]
pub struct Config {
    pub api_url: String,
    pub data_dir: PathBuf,
    pub timeout_secs: u64,
    /// Shown for jobs the remote matcher has not scored.
    pub default_match_score: f64,
    /// Estimate used for skills with no difficulty entry.
    pub fallback_difficulty: Difficulty,
    pub fallback_months: u32,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(get: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let default_match_score = get("WEVOLVE_DEFAULT_MATCH_SCORE")
            .unwrap_or_else(|| "70".to_string())
            .parse::<f64>()
            .context("WEVOLVE_DEFAULT_MATCH_SCORE must be a number")?;
        if !(0.0..=100.0).contains(&default_match_score) {
            bail!("WEVOLVE_DEFAULT_MATCH_SCORE must be between 0 and 100, got {default_match_score}");
        }

        let fallback_difficulty = match get("WEVOLVE_FALLBACK_DIFFICULTY") {
            Some(raw) => raw
                .parse::<Difficulty>()
                .map_err(|e| anyhow!("WEVOLVE_FALLBACK_DIFFICULTY: {e}"))?,
            None => FALLBACK_DIFFICULTY,
        };
        let fallback_months = match get("WEVOLVE_FALLBACK_MONTHS") {
            Some(raw) => raw
                .parse::<u32>()
                .context("WEVOLVE_FALLBACK_MONTHS must be a whole number of months")?,
            None => FALLBACK_MONTHS,
        };
        if fallback_months == 0 {
            bail!("WEVOLVE_FALLBACK_MONTHS must be at least 1");
        }

        Ok(Config {
            api_url: get("WEVOLVE_API_URL").unwrap_or_else(|| DEFAULT_API_URL.to_string()),
            data_dir: PathBuf::from(
                get("WEVOLVE_DATA_DIR").unwrap_or_else(|| DEFAULT_DATA_DIR.to_string()),
            ),
            timeout_secs: get("WEVOLVE_TIMEOUT_SECS")
                .unwrap_or_else(|| "30".to_string())
                .parse::<u64>()
                .context("WEVOLVE_TIMEOUT_SECS must be a whole number of seconds")?,
            default_match_score,
            fallback_difficulty,
            fallback_months,
            rust_log: get("RUST_LOG").unwrap_or_else(|| "warn".to_string()),
        })
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn store_path(&self) -> PathBuf {
        self.data_dir.join(STORE_FILE_NAME)
    }
}

#[cfg(test)]
pub(crate) fn test_config(api_url: &str) -> Config {
    Config {
        api_url: api_url.to_string(),
        data_dir: PathBuf::from(DEFAULT_DATA_DIR),
        timeout_secs: 5,
        default_match_score: 70.0,
        fallback_difficulty: FALLBACK_DIFFICULTY,
        fallback_months: FALLBACK_MONTHS,
        rust_log: "warn".to_string(),
    }
}
