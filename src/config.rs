//! Configuration module
//!
//! Loads the application configuration from a TOML file
//! (default `~/.config/atrium-booking/config.toml`); every section falls
//! back to sensible defaults when absent.

use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

use crate::domain::BusinessHours;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    #[error("failed to parse {path}: {source}")]
    Parse {
        path: String,
        source: toml::de::Error,
    },
}

/// Top-level application configuration
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub database: DatabaseSection,
    pub booking: BookingConfig,
    pub logging: LoggingConfig,
}

/// HTTP server settings
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Seconds allowed for graceful shutdown
    pub shutdown_timeout_secs: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8090,
            shutdown_timeout_secs: 30,
        }
    }
}

impl ServerConfig {
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Database settings
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DatabaseSection {
    /// SQLite file path; ignored when `url` is set
    pub path: String,
    /// Full connection URL override (e.g. PostgreSQL)
    pub url: Option<String>,
}

impl Default for DatabaseSection {
    fn default() -> Self {
        Self {
            path: "./rooms.db".to_string(),
            url: None,
        }
    }
}

impl DatabaseSection {
    pub fn connection_url(&self) -> String {
        match &self.url {
            Some(url) => url.clone(),
            None => format!("sqlite://{}?mode=rwc", self.path),
        }
    }
}

/// Booking engine settings
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct BookingConfig {
    /// First bookable hour of the day
    pub open_hour: u32,
    /// Closing hour; bookings must end by this hour sharp
    pub close_hour: u32,
    /// How often the stale-pending sweeper runs
    pub sweep_interval_secs: u64,
}

impl Default for BookingConfig {
    fn default() -> Self {
        Self {
            open_hour: 8,
            close_hour: 16,
            sweep_interval_secs: 300,
        }
    }
}

impl BookingConfig {
    pub fn business_hours(&self) -> BusinessHours {
        BusinessHours::new(self.open_hour, self.close_hour)
    }
}

/// Logging settings
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Default tracing filter (overridden by RUST_LOG)
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

impl AppConfig {
    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        toml::from_str(&raw).map_err(|source| ConfigError::Parse {
            path: path.display().to_string(),
            source,
        })
    }
}

/// Default configuration file location.
pub fn default_config_path() -> PathBuf {
    dirs_next::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("atrium-booking")
        .join("config.toml")
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_applied() {
        let cfg = AppConfig::default();
        assert_eq!(cfg.booking.open_hour, 8);
        assert_eq!(cfg.booking.close_hour, 16);
        assert_eq!(cfg.server.port, 8090);
        assert_eq!(cfg.logging.level, "info");
    }

    #[test]
    fn partial_toml_fills_in_defaults() {
        let cfg: AppConfig = toml::from_str(
            r#"
            [booking]
            open_hour = 9
            "#,
        )
        .unwrap();
        assert_eq!(cfg.booking.open_hour, 9);
        assert_eq!(cfg.booking.close_hour, 16);
        assert_eq!(cfg.server.host, "0.0.0.0");
    }

    #[test]
    fn sqlite_url_from_path() {
        let db = DatabaseSection::default();
        assert_eq!(db.connection_url(), "sqlite://./rooms.db?mode=rwc");
    }

    #[test]
    fn explicit_url_wins() {
        let db = DatabaseSection {
            path: "./ignored.db".to_string(),
            url: Some("postgres://localhost/rooms".to_string()),
        };
        assert_eq!(db.connection_url(), "postgres://localhost/rooms");
    }

    #[test]
    fn business_hours_from_config() {
        let booking = BookingConfig::default();
        let hours = booking.business_hours();
        assert_eq!(hours, BusinessHours::default());
    }
}
