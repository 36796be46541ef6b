use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

use crate::streak::calendar::DayBoundary;

#[derive(Debug, Deserialize, Clone, Default)]
#[serde(default)]
pub struct StrideConfig {
    pub server: ServerConfig,
    pub storage: StorageConfig,
    pub streak: StreakConfig,
    pub auth: AuthConfig,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub log_level: String,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct StorageConfig {
    pub db_path: String,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct StreakConfig {
    /// Key of the singleton streak row.
    pub record_key: String,
    /// Offset from UTC, in minutes, at which calendar days roll over.
    pub utc_offset_minutes: i32,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct AuthConfig {
    pub session_cookie: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".into(),
            port: 3210,
            log_level: "info".into(),
        }
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        let db_path = default_stride_dir()
            .join("stride.db")
            .to_string_lossy()
            .into_owned();
        Self { db_path }
    }
}

impl Default for StreakConfig {
    fn default() -> Self {
        Self {
            record_key: crate::streak::DEFAULT_RECORD_KEY.into(),
            utc_offset_minutes: 0,
        }
    }
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            session_cookie: "stride_session".into(),
        }
    }
}

/// Returns `~/.stride/`
pub fn default_stride_dir() -> PathBuf {
    home_dir().join(".stride")
}

/// Returns the default config file path: `~/.stride/config.toml`
pub fn default_config_path() -> PathBuf {
    default_stride_dir().join("config.toml")
}

impl StrideConfig {
    /// Load config from TOML file (if it exists) then apply env var overrides.
    pub fn load() -> Result<Self> {
        Self::load_from(default_config_path())
    }

    /// Load from a specific path, then apply env var overrides.
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let mut config = if path.exists() {
            let contents =
                std::fs::read_to_string(path).context("failed to read config file")?;
            toml::from_str(&contents).context("failed to parse config TOML")?
        } else {
            info!("no config file at {}, using defaults", path.display());
            StrideConfig::default()
        };

        config.apply_env_overrides();
        Ok(config)
    }

    /// Apply environment variable overrides (STRIDE_HOST, STRIDE_PORT, STRIDE_DB,
    /// STRIDE_LOG_LEVEL, STRIDE_UTC_OFFSET_MINUTES).
    fn apply_env_overrides(&mut self) {
        if let Ok(val) = std::env::var("STRIDE_HOST") {
            self.server.host = val;
        }
        if let Ok(val) = std::env::var("STRIDE_PORT") {
            match val.parse() {
                Ok(port) => self.server.port = port,
                Err(_) => warn!(value = %val, "ignoring invalid STRIDE_PORT"),
            }
        }
        if let Ok(val) = std::env::var("STRIDE_DB") {
            self.storage.db_path = val;
        }
        if let Ok(val) = std::env::var("STRIDE_LOG_LEVEL") {
            self.server.log_level = val;
        }
        if let Ok(val) = std::env::var("STRIDE_UTC_OFFSET_MINUTES") {
            match val.parse() {
                Ok(minutes) => self.streak.utc_offset_minutes = minutes,
                Err(_) => warn!(value = %val, "ignoring invalid STRIDE_UTC_OFFSET_MINUTES"),
            }
        }
    }

    /// Resolve the database path, expanding `~` if needed.
    pub fn resolved_db_path(&self) -> PathBuf {
        expand_tilde(&self.storage.db_path)
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }

    /// Day-boundary policy for streak bookkeeping.
    ///
    /// Offsets outside ±24h are rejected by chrono; those fall back to UTC.
    pub fn day_boundary(&self) -> DayBoundary {
        DayBoundary::from_offset_minutes(self.streak.utc_offset_minutes).unwrap_or_else(|| {
            warn!(
                minutes = self.streak.utc_offset_minutes,
                "utc_offset_minutes out of range, using UTC"
            );
            DayBoundary::utc()
        })
    }
}

pub fn expand_tilde(path: &str) -> PathBuf {
    if let Some(rest) = path.strip_prefix("~/") {
        home_dir().join(rest)
    } else {
        PathBuf::from(path)
    }
}

fn home_dir() -> PathBuf {
    dirs::home_dir().unwrap_or_else(|| PathBuf::from("."))
}
