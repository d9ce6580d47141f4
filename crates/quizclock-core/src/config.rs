//! Quiz configuration.

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Environment variable overriding the session time budget, in seconds.
pub const TIME_LIMIT_ENV: &str = "QUIZCLOCK_TIME_LIMIT";

/// Largest accepted session budget: one year.
pub const MAX_TIME_LIMIT_SECS: u64 = 365 * 24 * 60 * 60;

/// Top-level quizclock configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizConfig {
    /// CSV file holding the questions.
    #[serde(default = "default_problems")]
    pub problems: PathBuf,
    /// Budget for the whole session in seconds.
    #[serde(default = "default_time_limit")]
    pub time_limit_secs: u64,
}

fn default_problems() -> PathBuf {
    PathBuf::from("problems.csv")
}
fn default_time_limit() -> u64 {
    30
}

impl Default for QuizConfig {
    fn default() -> Self {
        Self {
            problems: default_problems(),
            time_limit_secs: default_time_limit(),
        }
    }
}

impl QuizConfig {
    pub fn time_limit(&self) -> Duration {
        Duration::from_secs(self.time_limit_secs)
    }
}

/// Load config from an explicit path, or search the default locations.
///
/// Search order without `path`:
/// 1. `quizclock.toml` in the current directory
/// 2. `~/.config/quizclock/config.toml`
///
/// `QUIZCLOCK_TIME_LIMIT` overrides the time budget.
pub fn load_config_from(path: Option<&Path>) -> Result<QuizConfig> {
    let config_path = if let Some(p) = path {
        if p.exists() {
            Some(p.to_path_buf())
        } else {
            anyhow::bail!("config file not found: {}", p.display());
        }
    } else {
        let local = PathBuf::from("quizclock.toml");
        if local.exists() {
            Some(local)
        } else {
            dirs_path()
                .map(|home| home.join("config.toml"))
                .filter(|global| global.exists())
        }
    };

    let mut config = match config_path {
        Some(path) => {
            let content = std::fs::read_to_string(&path)
                .with_context(|| format!("failed to read config: {}", path.display()))?;
            let config = toml::from_str::<QuizConfig>(&content)
                .with_context(|| format!("failed to parse config: {}", path.display()))?;
            anyhow::ensure!(
                config.time_limit_secs <= MAX_TIME_LIMIT_SECS,
                "time_limit_secs = {} in {} exceeds the maximum of {MAX_TIME_LIMIT_SECS}",
                config.time_limit_secs,
                path.display()
            );
            tracing::debug!("loaded config from {}", path.display());
            config
        }
        None => QuizConfig::default(),
    };

    if let Ok(value) = std::env::var(TIME_LIMIT_ENV) {
        match value.trim().parse::<u64>() {
            Ok(secs) if secs <= MAX_TIME_LIMIT_SECS => config.time_limit_secs = secs,
            Ok(secs) => tracing::warn!(
                "ignoring {TIME_LIMIT_ENV}={secs}: exceeds the maximum of {MAX_TIME_LIMIT_SECS}"
            ),
            Err(_) => tracing::warn!("ignoring {TIME_LIMIT_ENV}={value:?}: not a number of seconds"),
        }
    }

    Ok(config)
}

fn dirs_path() -> Option<PathBuf> {
    std::env::var("HOME")
        .ok()
        .map(|h| PathBuf::from(h).join(".config").join("quizclock"))
}
