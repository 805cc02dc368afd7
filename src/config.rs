use std::path::PathBuf;
use std::time::Duration;

use chrono::TimeDelta;

use crate::cache::DEFAULT_TTL_HOURS;

pub const OVERRIDE_PATH_VAR: &str = "FIXTURE_OVERRIDE_PATH";
pub const API_URL_VAR: &str = "SQUIGGLE_API_URL";
pub const USER_AGENT_VAR: &str = "SQUIGGLE_USER_AGENT";
pub const TIMEOUT_VAR: &str = "SQUIGGLE_TIMEOUT_SECS";
pub const CACHE_TTL_VAR: &str = "FIXTURE_CACHE_TTL_HOURS";

const DEFAULT_OVERRIDE_PATH: &str = "fixtures/overrides.json";
const DEFAULT_API_URL: &str = "https://api.squiggle.com.au/";
const DEFAULT_USER_AGENT: &str = "AFL-Tipping-App/1.0 (Contact: admin@example.com)";
const DEFAULT_TIMEOUT_SECS: u64 = 5;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("{var} must be a positive integer, got '{value}'")]
    InvalidNumber { var: &'static str, value: String },

    #[error("{var} must not be empty")]
    Empty { var: &'static str },
}

/// Settings for the fixture engine, normally taken from the Lambda environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineConfig {
    pub override_path: PathBuf,
    pub api_url: String,
    pub user_agent: String,
    pub api_timeout: Duration,
    pub cache_ttl: TimeDelta,
}

impl Default for EngineConfig {
    fn default() -> Self {
        EngineConfig {
            override_path: PathBuf::from(DEFAULT_OVERRIDE_PATH),
            api_url: DEFAULT_API_URL.to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            api_timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            cache_ttl: TimeDelta::hours(DEFAULT_TTL_HOURS),
        }
    }
}

impl EngineConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Build from any variable lookup; unset variables fall back to defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = EngineConfig::default();

        if let Some(path) = lookup(OVERRIDE_PATH_VAR) {
            config.override_path = PathBuf::from(non_empty(OVERRIDE_PATH_VAR, path)?);
        }
        if let Some(url) = lookup(API_URL_VAR) {
            config.api_url = non_empty(API_URL_VAR, url)?;
        }
        if let Some(agent) = lookup(USER_AGENT_VAR) {
            config.user_agent = non_empty(USER_AGENT_VAR, agent)?;
        }
        if let Some(secs) = lookup(TIMEOUT_VAR) {
            config.api_timeout = Duration::from_secs(positive(TIMEOUT_VAR, &secs)?);
        }
        if let Some(hours) = lookup(CACHE_TTL_VAR) {
            config.cache_ttl = TimeDelta::hours(positive(CACHE_TTL_VAR, &hours)? as i64);
        }

        Ok(config)
    }
}

fn non_empty(var: &'static str, value: String) -> Result<String, ConfigError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ConfigError::Empty { var });
    }
    Ok(trimmed.to_string())
}

fn positive(var: &'static str, value: &str) -> Result<u64, ConfigError> {
    match value.trim().parse::<u64>() {
        Ok(n) if n > 0 && n <= i32::MAX as u64 => Ok(n),
        _ => Err(ConfigError::InvalidNumber { var, value: value.to_string() }),
    }
}
