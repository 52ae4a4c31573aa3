//! Team partitioning, scoring and selection
//!
//! This module turns a roster into candidate splits, scores each one and
//! picks the best.

pub mod matchmaker;
pub mod partition;
pub mod scorer;
pub mod selector;

// Re-export commonly used types
pub use matchmaker::Matchmaker;
pub use partition::{PartitionStrategy, TeamPartitioner, TeamSplit};
pub use scorer::{
    availability_fraction, location_fraction, position_coverage, team_synergy, MatchScorer,
    QualityScorer,
};
pub use selector::{select_best, CandidateScore, Selection};
