//! Roster provider traits and implementations
//!
//! The matchmaker never owns a player pool. Whatever storage the host uses
//! sits behind `RosterProvider`; a static provider and a file provider are
//! shipped for tests and the CLI.

use crate::error::{MatchmakingError, Result};
use crate::roster::demo::demo_roster;
use crate::types::Player;
use anyhow::Context;
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Trait for supplying the candidate pool of a matchmaking session
pub trait RosterProvider: Send + Sync {
    /// Load the current roster
    fn load_roster(&self) -> Result<Vec<Player>>;

    /// Human-readable description of where the roster comes from
    fn describe(&self) -> String;
}

/// Roster held in memory
#[derive(Debug, Clone, Default)]
pub struct StaticRosterProvider {
    players: Vec<Player>,
}

impl StaticRosterProvider {
    pub fn new(players: Vec<Player>) -> Self {
        Self { players }
    }

    /// The 15 synthetic players of the TurfX football demo
    pub fn demo() -> Self {
        Self::new(demo_roster())
    }
}

impl RosterProvider for StaticRosterProvider {
    fn load_roster(&self) -> Result<Vec<Player>> {
        Ok(self.players.clone())
    }

    fn describe(&self) -> String {
        format!("static roster ({} players)", self.players.len())
    }
}

/// Roster file layout shared by the JSON and TOML formats
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RosterDocument {
    Wrapped { players: Vec<Player> },
    Bare(Vec<Player>),
}

impl RosterDocument {
    fn into_players(self) -> Vec<Player> {
        match self {
            RosterDocument::Wrapped { players } | RosterDocument::Bare(players) => players,
        }
    }
}

/// Roster read from a JSON or TOML file on every load
#[derive(Debug, Clone)]
pub struct FileRosterProvider {
    path: PathBuf,
}

impl FileRosterProvider {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl RosterProvider for FileRosterProvider {
    fn load_roster(&self) -> Result<Vec<Player>> {
        let contents = std::fs::read_to_string(&self.path)
            .with_context(|| format!("Failed to read roster file {}", self.path.display()))?;

        let is_toml = self
            .path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.eq_ignore_ascii_case("toml"))
            .unwrap_or(false);

        if is_toml {
            let document: RosterDocument = toml::from_str(&contents).map_err(|e| {
                MatchmakingError::invalid_roster(format!("{}: {}", self.path.display(), e))
            })?;
            Ok(document.into_players())
        } else {
            parse_json_roster(&contents).with_context(|| {
                format!("Failed to parse roster file {}", self.path.display())
            })
        }
    }

    fn describe(&self) -> String {
        format!("roster file {}", self.path.display())
    }
}

/// Parse a roster from JSON, either a bare array or `{ "players": [...] }`
pub fn parse_json_roster(json: &str) -> Result<Vec<Player>> {
    let document: RosterDocument = serde_json::from_str(json)
        .map_err(|e| MatchmakingError::invalid_roster(e.to_string()))?;
    Ok(document.into_players())
}
