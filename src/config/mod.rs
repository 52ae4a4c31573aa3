//! Configuration management for the matchmaker
//!
//! This module handles configuration loading from environment variables and
//! TOML files, validation, and default values for scoring and synergy.

pub mod app;
pub mod scoring;

// Re-export commonly used types
pub use app::{validate_config, AppConfig, RecommenderSettings, ServiceSettings};
pub use scoring::{ScoreWeights, ScoringConfig, SkillScale, SynergyConfig};
