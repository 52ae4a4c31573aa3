//! Player rosters for matchmaking sessions
//!
//! This module handles where rosters come from and how they are checked
//! before the partitioner sees them.

pub mod demo;
pub mod provider;
pub mod validation;

// Re-export commonly used types
pub use demo::demo_roster;
pub use provider::{parse_json_roster, FileRosterProvider, RosterProvider, StaticRosterProvider};
pub use validation::{validate_player, validate_roster};
