//! Turf Matchmaker - balanced team selection for pickup turf games
//!
//! This crate splits a roster of amateur players into two equal teams,
//! scores candidate splits on skill, synergy, availability, location and
//! positions, and learns pairwise synergy from played matches.

pub mod config;
pub mod error;
pub mod matching;
pub mod metrics;
pub mod recommend;
pub mod roster;
pub mod synergy;
pub mod types;
pub mod utils;

// Re-export commonly used types and traits
pub use error::{MatchmakingError, Result};
pub use types::*;

// Re-export key components
pub use matching::{MatchScorer, Matchmaker, QualityScorer, Selection, TeamPartitioner};
pub use recommend::{FallbackRecommender, Recommendation, RecommendationSource};
pub use roster::{RosterProvider, StaticRosterProvider};
pub use synergy::{SynergyMap, SynergyTracker};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
