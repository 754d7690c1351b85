use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::info;

use crate::knowledge::ProjectKnowledge;

#[derive(Debug, Deserialize, Clone, Default)]
#[serde(default)]
pub struct SeqthinkConfig {
    pub server: ServerConfig,
    pub handoff: HandoffConfig,
    pub knowledge: ProjectKnowledge,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct ServerConfig {
    pub log_level: String,
    /// Suppress the boxed rendering of each thought on stderr.
    pub disable_thought_logging: bool,
    /// Column at which rendered thoughts wrap.
    pub wrap_width: usize,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct HandoffConfig {
    /// Directory handoff documents are written to and resumed from.
    pub dir: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            log_level: "info".into(),
            disable_thought_logging: false,
            wrap_width: 80,
        }
    }
}

impl Default for HandoffConfig {
    fn default() -> Self {
        let dir = default_seqthink_dir()
            .join("handoffs")
            .to_string_lossy()
            .into_owned();
        Self { dir }
    }
}

/// Returns `~/.seqthink/`, or `./.seqthink/` when no home directory is known.
pub fn default_seqthink_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".seqthink")
}

/// Returns the default config file path: `~/.seqthink/config.toml`
pub fn default_config_path() -> PathBuf {
    default_seqthink_dir().join("config.toml")
}

impl SeqthinkConfig {
    /// Load config from the default TOML file (if it exists) then apply env var overrides.
    pub fn load() -> Result<Self> {
        Self::load_from(default_config_path())
    }

    /// Load from a specific path, then apply env var overrides.
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let mut config = if path.exists() {
            let contents = std::fs::read_to_string(path)
                .with_context(|| format!("failed to read config file {}", path.display()))?;
            Self::parse(&contents)?
        } else {
            info!("no config file at {}, using defaults", path.display());
            SeqthinkConfig::default()
        };

        config.apply_env_overrides();
        Ok(config)
    }

    /// Parse TOML config text without touching the environment.
    pub fn parse(contents: &str) -> Result<Self> {
        toml::from_str(contents).context("failed to parse config TOML")
    }

    /// Apply environment variable overrides
    /// (SEQTHINK_LOG_LEVEL, SEQTHINK_HANDOFF_DIR, DISABLE_THOUGHT_LOGGING).
    fn apply_env_overrides(&mut self) {
        if let Ok(val) = std::env::var("SEQTHINK_LOG_LEVEL") {
            self.server.log_level = val;
        }
        if let Ok(val) = std::env::var("SEQTHINK_HANDOFF_DIR") {
            self.handoff.dir = val;
        }
        if let Ok(val) = std::env::var("DISABLE_THOUGHT_LOGGING") {
            self.server.disable_thought_logging = val.eq_ignore_ascii_case("true");
        }
    }

    /// Resolve the handoff directory, expanding `~` if needed.
    pub fn resolved_handoff_dir(&self) -> PathBuf {
        expand_tilde(&self.handoff.dir)
    }
}

pub fn expand_tilde(path: &str) -> PathBuf {
    match (path.strip_prefix("~/"), dirs::home_dir()) {
        (Some(rest), Some(home)) => home.join(rest),
        _ => PathBuf::from(path),
    }
}
