//! Configuration management for Strata
//!
//! This module provides a centralized configuration system that supports:
//! - YAML/TOML/JSON configuration files
//! - Environment variable overrides
//! - Reasonable defaults
//! - Configuration validation

use config::{Config, ConfigError, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

use crate::tier::Tier;

/// Root configuration structure for Strata
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct StrataConfig {
    #[serde(default)]
    pub classifier: ClassifierConfig,

    #[serde(default)]
    pub migration: MigrationConfig,

    #[serde(default)]
    pub driver: DriverConfig,
}

impl StrataConfig {
    /// Load configuration from multiple sources with precedence:
    /// 1. Environment variables (highest priority)
    /// 2. Config file specified by STRATA_CONFIG env var
    /// 3. ./config/strata.{yaml,toml,json}
    /// 4. /etc/strata/strata.{yaml,toml,json}
    /// 5. Hardcoded defaults (lowest priority)
    pub fn load() -> Result<Self, ConfigError> {
        let mut builder = Config::builder();

        builder = Self::set_defaults(builder)?;

        if let Ok(config_path) = std::env::var("STRATA_CONFIG") {
            builder = builder.add_source(File::with_name(&config_path).required(false));
        }

        builder = builder
            .add_source(File::with_name("./config/strata").required(false))
            .add_source(File::with_name("/etc/strata/strata").required(false));

        // Example: STRATA__MIGRATION__MAX_CONCURRENCY=8
        builder = builder.add_source(
            Environment::with_prefix("STRATA")
                .separator("__")
                .try_parsing(true),
        );

        let config: StrataConfig = builder.build()?.try_deserialize()?;
        config.validate()?;

        Ok(config)
    }

    fn set_defaults(
        builder: config::ConfigBuilder<config::builder::DefaultState>,
    ) -> Result<config::ConfigBuilder<config::builder::DefaultState>, ConfigError> {
        builder
            // Classifier
            .set_default("classifier.frequent_threshold", 10)?
            .set_default("classifier.warm_after_days", 30)?
            .set_default("classifier.cold_after_days", 90)?
            .set_default("classifier.archive_after_days", 180)?
            // Migration
            .set_default("migration.max_concurrency", 4)?
            .set_default("migration.step_timeout_ms", 30_000)?
            // Driver
            .set_default("driver.archive_threshold", "cold")?
            .set_default("driver.savings_per_demotion", 15.0)
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.classifier.validate().map_err(ConfigError::Message)?;
        self.migration.validate().map_err(ConfigError::Message)?;
        self.driver.validate().map_err(ConfigError::Message)?;
        Ok(())
    }

    /// Load configuration from a specific file path
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let builder = Self::set_defaults(Config::builder())?;
        let config: StrataConfig = builder
            .add_source(File::from(path.as_ref()))
            .build()?
            .try_deserialize()?;
        config.validate()?;

        Ok(config)
    }
}

/// Thresholds for the tier classifier
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ClassifierConfig {
    /// Access count at which an object is pinned to the hot tier
    pub frequent_threshold: u64,

    /// Days without access before demoting to warm
    pub warm_after_days: i64,

    /// Days without access before demoting to cold
    pub cold_after_days: i64,

    /// Days without access before demoting to archive
    pub archive_after_days: i64,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            frequent_threshold: 10,
            warm_after_days: 30,
            cold_after_days: 90,
            archive_after_days: 180,
        }
    }
}

impl ClassifierConfig {
    /// Validate thresholds
    ///
    /// # Errors
    ///
    /// Returns error if the age breakpoints are not strictly increasing
    pub fn validate(&self) -> Result<(), String> {
        if self.frequent_threshold < 1 {
            return Err("classifier.frequent_threshold must be >= 1".into());
        }
        if self.warm_after_days < 1 {
            return Err("classifier.warm_after_days must be >= 1".into());
        }
        if self.cold_after_days <= self.warm_after_days {
            return Err("classifier.cold_after_days must be > warm_after_days".into());
        }
        if self.archive_after_days <= self.cold_after_days {
            return Err("classifier.archive_after_days must be > cold_after_days".into());
        }
        Ok(())
    }
}

/// Migration coordinator settings
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct MigrationConfig {
    /// Maximum in-flight transfers (default: 4)
    pub max_concurrency: usize,

    /// Upper bound for each fetch/upload/verify/delete call in milliseconds
    pub step_timeout_ms: u64,
}

impl Default for MigrationConfig {
    fn default() -> Self {
        Self {
            max_concurrency: 4,
            step_timeout_ms: 30_000,
        }
    }
}

impl MigrationConfig {
    /// Validate configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.max_concurrency == 0 {
            return Err("migration.max_concurrency must be > 0".into());
        }
        if self.max_concurrency > 64 {
            return Err("migration.max_concurrency too high (max: 64, risk of backend throttling)".into());
        }
        if self.step_timeout_ms == 0 {
            return Err("migration.step_timeout_ms must be > 0".into());
        }
        Ok(())
    }

    /// Step timeout as Duration
    pub fn step_timeout(&self) -> Duration {
        Duration::from_millis(self.step_timeout_ms)
    }
}

/// Tiering driver settings
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DriverConfig {
    /// Provider that receives cold data on the cross-provider path (disabled when unset)
    #[serde(default)]
    pub archive_provider: Option<String>,

    /// Lowest tier that qualifies for the cross-provider path
    pub archive_threshold: Tier,

    /// Advisory dollar amount saved per demotion into a cost-optimized tier
    pub savings_per_demotion: f64,
}

impl Default for DriverConfig {
    fn default() -> Self {
        Self {
            archive_provider: None,
            archive_threshold: Tier::Cold,
            savings_per_demotion: 15.0,
        }
    }
}

impl DriverConfig {
    /// Validate configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.savings_per_demotion < 0.0 || !self.savings_per_demotion.is_finite() {
            return Err("driver.savings_per_demotion must be a non-negative number".into());
        }
        if matches!(self.archive_provider.as_deref(), Some("")) {
            return Err("driver.archive_provider must not be empty".into());
        }
        Ok(())
    }
}
