use std::str::FromStr;
use std::time::Duration;

use anyhow::{anyhow, Context, Result};

use crate::triage::keywords::ScoreMode;

const DEFAULT_PORT: u16 = 8080;
const DEFAULT_TRIAGE_TIMEOUT_SECS: u64 = 8;

/// Application configuration loaded from environment variables.
/// Every variable is optional; malformed values fail startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// Presence enables the LLM classifier. Absent means keyword triage only.
    pub anthropic_api_key: Option<String>,
    pub port: u16,
    pub rust_log: String,
    pub triage_timeout: Duration,
    pub score_mode: ScoreMode,
    pub score_seed: Option<u64>,
    pub seed_on_startup: bool,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds a config from any key lookup. `from_env` passes the process environment.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let triage_timeout_secs: u64 =
            parse_or(get("TRIAGE_TIMEOUT_SECS"), "TRIAGE_TIMEOUT_SECS", DEFAULT_TRIAGE_TIMEOUT_SECS)?;
        if triage_timeout_secs == 0 {
            return Err(anyhow!("TRIAGE_TIMEOUT_SECS must be at least 1"));
        }

        Ok(Config {
            anthropic_api_key: get("ANTHROPIC_API_KEY"),
            port: parse_or(get("PORT"), "PORT", DEFAULT_PORT)?,
            rust_log: get("RUST_LOG").unwrap_or_else(|| "info".to_string()),
            triage_timeout: Duration::from_secs(triage_timeout_secs),
            score_mode: get("TRIAGE_SCORE_MODE")
                .map(|v| v.parse::<ScoreMode>().map_err(|e| anyhow!("TRIAGE_SCORE_MODE: {e}")))
                .transpose()?
                .unwrap_or_default(),
            score_seed: get("TRIAGE_SEED")
                .map(|v| v.trim().parse::<u64>().context("TRIAGE_SEED must be an unsigned integer"))
                .transpose()?,
            seed_on_startup: parse_or(get("SEED_ON_STARTUP"), "SEED_ON_STARTUP", true)?,
        })
    }
}

fn parse_or<T>(value: Option<String>, key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match value {
        Some(v) => v
            .trim()
            .parse::<T>()
            .with_context(|| format!("Environment variable '{key}' has an invalid value '{v}'")),
        None => Ok(default),
    }
}
