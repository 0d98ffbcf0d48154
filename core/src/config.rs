//! Configuration management for the Fazenda engine
//!
//! Supports hierarchical configuration loading:
//! 1. Default values in code
//! 2. Configuration files (development.toml, production.toml)
//! 3. Environment variable overrides with FAZENDA_ prefix

use config::{ConfigError, Environment, File};
use serde::Deserialize;

/// Main application configuration
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Current environment (development, production)
    pub environment: String,

    /// Persistence configuration
    pub storage: StorageConfig,

    /// License lifecycle defaults
    pub licensing: LicensingConfig,

    /// Field worker tracking configuration
    pub tracking: TrackingConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct StorageConfig {
    /// Data directory for the file-backed store; in-memory when unset
    #[serde(default)]
    pub data_dir: Option<String>,

    /// Prefix applied to every persisted key
    pub key_prefix: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct LicensingConfig {
    /// Trial window granted to self-registered users, in days
    pub trial_days: u32,

    /// Term granted when an admin reactivates an account, in months
    pub reactivation_months: u32,
}

#[derive(Debug, Deserialize, Clone)]
pub struct TrackingConfig {
    /// Position deltas below this are discarded as GPS noise, in meters
    pub noise_floor_meters: f64,
}

impl Config {
    /// Load configuration from files and environment variables
    pub fn load() -> Result<Self, ConfigError> {
        let environment =
            std::env::var("FAZENDA_ENVIRONMENT").unwrap_or_else(|_| "development".into());

        let config = config::Config::builder()
            // Start with default values
            .set_default("environment", environment.clone())?
            .set_default("storage.key_prefix", "fazenda")?
            .set_default("licensing.trial_days", 15)?
            .set_default("licensing.reactivation_months", 3)?
            .set_default("tracking.noise_floor_meters", 5.0)?
            // Load environment-specific config file
            .add_source(File::with_name(&format!("config/{}", environment)).required(false))
            // Override with environment variables (FAZENDA_ prefix)
            .add_source(
                Environment::with_prefix("FAZENDA")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            environment: "development".to_string(),
            storage: StorageConfig {
                data_dir: None,
                key_prefix: "fazenda".to_string(),
            },
            licensing: LicensingConfig {
                trial_days: 15,
                reactivation_months: 3,
            },
            tracking: TrackingConfig {
                noise_floor_meters: 5.0,
            },
        }
    }
}
