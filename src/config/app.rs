//! Main application configuration
//!
//! This module defines the top-level configuration for the matchmaker host,
//! including environment variable loading, TOML file loading and validation.

use crate::config::scoring::{ScoringConfig, SynergyConfig};
use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use std::env;
use std::path::Path;
use std::time::Duration;

/// Main application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub service: ServiceSettings,
    pub matchmaking: ScoringConfig,
    pub synergy: SynergyConfig,
    pub recommender: RecommenderSettings,
}

/// Service-level settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceSettings {
    /// Service name for logging and metrics
    pub name: String,
    /// Log level (trace, debug, info, warn, error)
    pub log_level: String,
}

/// External recommendation service settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RecommenderSettings {
    /// Consult the external service before the local selector
    pub enabled: bool,
    /// Give up on the external service after this many milliseconds
    pub timeout_ms: u64,
    /// Base URL of the matchmaking web service
    pub url: String,
    /// Sport reported to the service
    pub sport: String,
}

impl Default for ServiceSettings {
    fn default() -> Self {
        Self {
            name: "turf-matchmaker".to_string(),
            log_level: "info".to_string(),
        }
    }
}

impl Default for RecommenderSettings {
    fn default() -> Self {
        Self {
            enabled: false,
            timeout_ms: 8000,
            url: "http://localhost:8000".to_string(),
            sport: "Football".to_string(),
        }
    }
}

fn parse_var<T: std::str::FromStr>(name: &str, value: &str) -> Result<T> {
    value
        .parse()
        .map_err(|_| anyhow!("Invalid {} value: {}", name, value))
}

impl AppConfig {
    /// Load configuration from environment variables with fallback to defaults
    pub fn from_env() -> Result<Self> {
        let mut config = Self::default();
        config.apply_env()?;
        validate_config(&config)?;
        Ok(config)
    }

    /// Load configuration from a TOML file, then apply environment overrides
    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let mut config: AppConfig = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file {}", path.display()))?;
        config.apply_env()?;
        validate_config(&config)?;
        Ok(config)
    }

    fn apply_env(&mut self) -> Result<()> {
        // Service settings
        if let Ok(name) = env::var("SERVICE_NAME") {
            self.service.name = name;
        }
        if let Ok(log_level) = env::var("LOG_LEVEL") {
            self.service.log_level = log_level;
        }

        // Matchmaking settings
        if let Ok(size) = env::var("TEAM_SIZE") {
            self.matchmaking.team_size = parse_var("TEAM_SIZE", &size)?;
        }
        if let Ok(window) = env::var("TARGET_AVAILABILITY") {
            self.matchmaking.target_availability = parse_var("TARGET_AVAILABILITY", &window)?;
        }
        if let Ok(location) = env::var("TARGET_LOCATION") {
            self.matchmaking.target_location = location;
        }
        if let Ok(min) = env::var("SKILL_MIN") {
            self.matchmaking.skill_scale.min = parse_var("SKILL_MIN", &min)?;
        }
        if let Ok(max) = env::var("SKILL_MAX") {
            self.matchmaking.skill_scale.max = parse_var("SKILL_MAX", &max)?;
        }
        if let Ok(positions) = env::var("MODEL_POSITIONS") {
            self.matchmaking.model_positions = parse_var("MODEL_POSITIONS", &positions)?;
        }

        // Synergy settings
        if let Ok(delta) = env::var("SYNERGY_WIN_DELTA") {
            self.synergy.win_delta = parse_var("SYNERGY_WIN_DELTA", &delta)?;
        }
        if let Ok(delta) = env::var("SYNERGY_LOSS_DELTA") {
            self.synergy.loss_delta = parse_var("SYNERGY_LOSS_DELTA", &delta)?;
        }

        // Recommender settings
        if let Ok(enabled) = env::var("RECOMMENDER_ENABLED") {
            self.recommender.enabled = parse_var("RECOMMENDER_ENABLED", &enabled)?;
        }
        if let Ok(timeout) = env::var("RECOMMENDER_TIMEOUT_MS") {
            self.recommender.timeout_ms = parse_var("RECOMMENDER_TIMEOUT_MS", &timeout)?;
        }
        if let Ok(url) = env::var("RECOMMENDER_URL") {
            self.recommender.url = url;
        }
        if let Ok(sport) = env::var("RECOMMENDER_SPORT") {
            self.recommender.sport = sport;
        }

        Ok(())
    }

    /// Get external recommender timeout as Duration
    pub fn recommender_timeout(&self) -> Duration {
        Duration::from_millis(self.recommender.timeout_ms)
    }
}

/// Validate configuration values
pub fn validate_config(config: &AppConfig) -> Result<()> {
    // Validate log level
    match config.service.log_level.to_lowercase().as_str() {
        "trace" | "debug" | "info" | "warn" | "error" => {}
        _ => return Err(anyhow!("Invalid log level: {}", config.service.log_level)),
    }

    if config.service.name.is_empty() {
        return Err(anyhow!("Service name cannot be empty"));
    }

    config.matchmaking.validate()?;
    config.synergy.validate()?;

    if config.recommender.timeout_ms == 0 {
        return Err(anyhow!("Recommender timeout must be greater than 0"));
    }

    if config.recommender.enabled {
        let url = config.recommender.url.trim();
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            return Err(anyhow!(
                "Recommender URL must start with http:// or https://, got '{}'",
                config.recommender.url
            ));
        }
        if config.recommender.sport.trim().is_empty() {
            return Err(anyhow!("Recommender sport cannot be empty"));
        }
    }

    Ok(())
}
