//! Configuration management for the Compliance Tracker service
//!
//! Supports hierarchical configuration loading:
//! 1. Default values in code
//! 2. Configuration files (development.toml, production.toml)
//! 3. Environment variable overrides: `CT__` prefix with `__` between
//!    section and key, e.g. `CT__SERVER__PORT=8080` or
//!    `CT__CLOCK__UTC_OFFSET_MINUTES=-240`
//!
//! `CT_ENVIRONMENT` (single underscore) picks the configuration file and is
//! read before the layers are built.

use chrono::{FixedOffset, NaiveDate, Utc};
use config::{ConfigError, Environment, File};
use serde::Deserialize;

/// Main application configuration
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Current environment (development, production)
    pub environment: String,

    /// Server configuration
    pub server: ServerConfig,

    /// Local calendar used to decide what "today" is
    pub clock: ClockConfig,

    /// Log output configuration
    pub logging: LoggingConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    /// Server port
    pub port: u16,

    /// Server host
    pub host: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ClockConfig {
    /// Offset from UTC, in minutes, of the panel's local calendar
    pub utc_offset_minutes: i32,
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct LoggingConfig {
    /// Emit JSON lines instead of human-readable output
    pub json: bool,
}

impl Config {
    /// Load configuration from files and environment variables
    pub fn load() -> Result<Self, ConfigError> {
        let environment = std::env::var("CT_ENVIRONMENT").unwrap_or_else(|_| "development".into());

        let config = config::Config::builder()
            // Start with default values
            .set_default("environment", environment.clone())?
            .set_default("server.port", 3000)?
            .set_default("server.host", "0.0.0.0")?
            .set_default("clock.utc_offset_minutes", -180)?
            .set_default("logging.json", false)?
            // Load environment-specific config file
            .add_source(File::with_name(&format!("config/{}", environment)).required(false))
            // Override with environment variables (CT__SECTION__KEY)
            .add_source(
                Environment::with_prefix("CT")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        let config: Config = config.try_deserialize()?;
        config.clock.offset()?;
        Ok(config)
    }
}

impl ClockConfig {
    pub fn offset(&self) -> Result<FixedOffset, ConfigError> {
        self.utc_offset_minutes
            .checked_mul(60)
            .and_then(FixedOffset::east_opt)
            .ok_or_else(|| {
                ConfigError::Message(format!(
                    "clock.utc_offset_minutes out of range: {}",
                    self.utc_offset_minutes
                ))
            })
    }

    /// Current calendar date in the configured offset
    pub fn today(&self) -> Result<NaiveDate, ConfigError> {
        let offset = self.offset()?;
        Ok(shared::today_from(Utc::now().with_timezone(&offset).naive_local()))
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            environment: "development".to_string(),
            server: ServerConfig::default(),
            clock: ClockConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: 3000,
            host: "0.0.0.0".to_string(),
        }
    }
}

impl Default for ClockConfig {
    fn default() -> Self {
        Self {
            utc_offset_minutes: -180,
        }
    }
}
