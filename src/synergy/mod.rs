//! Pairwise synergy between players
//!
//! This module holds the caller-owned synergy relation and the updater that
//! adjusts it once a real match has been played.

pub mod map;
pub mod updater;

// Re-export commonly used types
pub use map::{SynergyMap, NEUTRAL_SYNERGY};
pub use updater::{apply_result, AppliedMatch, SynergyTracker, SynergyUpdateSummary, SynergyUpdater};
