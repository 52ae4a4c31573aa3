//! Pairwise synergy relation
//!
//! Entries are directed so that rosters recording synergy on only one side
//! can be loaded as-is. Lookups check `a -> b` first and fall back to
//! `b -> a`. The updater writes both directions, each from its own lookup.

use crate::error::{MatchmakingError, Result};
use crate::types::{Player, PlayerId};
use crate::utils::clamp_unit;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Synergy score assumed for a pair that has never been recorded
pub const NEUTRAL_SYNERGY: f64 = 0.5;

/// Caller-owned synergy relation between players
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SynergyMap {
    entries: BTreeMap<PlayerId, BTreeMap<PlayerId, f64>>,
}

impl SynergyMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a map from the synergy fields of roster records
    pub fn from_roster(players: &[Player]) -> Result<Self> {
        let mut map = Self::new();
        for player in players {
            for (other, value) in &player.synergy {
                if other == &player.id {
                    return Err(MatchmakingError::invalid_roster(format!(
                        "player '{}' records synergy with itself",
                        player.id
                    ))
                    .into());
                }
                if !value.is_finite() {
                    return Err(MatchmakingError::invalid_roster(format!(
                        "player '{}' has non-numeric synergy towards '{}'",
                        player.id, other
                    ))
                    .into());
                }
                map.set_directed(&player.id, other, *value);
            }
        }
        Ok(map)
    }

    /// Recorded synergy for a pair, checking both directions
    pub fn get(&self, a: &str, b: &str) -> Option<f64> {
        self.directed(a, b).or_else(|| self.directed(b, a))
    }

    /// Synergy for a pair, `NEUTRAL_SYNERGY` when unrecorded
    pub fn score(&self, a: &str, b: &str) -> f64 {
        self.get(a, b).unwrap_or(NEUTRAL_SYNERGY)
    }

    /// Record a single direction, clamped to [0, 1]
    pub fn set_directed(&mut self, from: &str, to: &str, value: f64) {
        self.entries
            .entry(from.to_string())
            .or_default()
            .insert(to.to_string(), clamp_unit(value));
    }

    /// Record both directions of a pair, clamped to [0, 1]
    pub fn set(&mut self, a: &str, b: &str, value: f64) {
        self.set_directed(a, b, value);
        self.set_directed(b, a, value);
    }

    /// Number of directed entries
    pub fn len(&self) -> usize {
        self.entries.values().map(BTreeMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Iterate over all directed entries in deterministic order
    pub fn iter(&self) -> impl Iterator<Item = (&PlayerId, &PlayerId, f64)> + '_ {
        self.entries
            .iter()
            .flat_map(|(from, row)| row.iter().map(move |(to, value)| (from, to, *value)))
    }

    fn directed(&self, from: &str, to: &str) -> Option<f64> {
        self.entries.get(from).and_then(|row| row.get(to)).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Availability;

    fn player(id: &str) -> Player {
        Player::new(id, id, 3, None, "Mumbai", Availability::Flexible)
    }

    #[test]
    fn test_unrecorded_pair_is_neutral() {
        let map = SynergyMap::new();
        assert_eq!(map.get("p1", "p2"), None);
        assert_eq!(map.score("p1", "p2"), 0.5);
    }

    #[test]
    fn test_lookup_checks_both_directions() {
        let mut map = SynergyMap::new();
        map.set_directed("p1", "p2", 0.9);
        assert_eq!(map.get("p1", "p2"), Some(0.9));
        assert_eq!(map.get("p2", "p1"), Some(0.9));

        // The queried direction wins when both are present
        map.set_directed("p2", "p1", 0.4);
        assert_eq!(map.get("p1", "p2"), Some(0.9));
        assert_eq!(map.get("p2", "p1"), Some(0.4));
    }

    #[test]
    fn test_values_are_clamped() {
        let mut map = SynergyMap::new();
        map.set("p1", "p2", 1.7);
        map.set("p3", "p4", -0.2);
        assert_eq!(map.score("p1", "p2"), 1.0);
        assert_eq!(map.score("p4", "p3"), 0.0);
        assert_eq!(map.len(), 4);
    }

    #[test]
    fn test_from_roster() {
        let players = vec![
            player("p1").with_synergy("p3", 0.9),
            player("p2"),
            player("p3").with_synergy("p1", 0.8),
        ];
        let map = SynergyMap::from_roster(&players).unwrap();
        assert_eq!(map.get("p1", "p3"), Some(0.9));
        assert_eq!(map.get("p3", "p1"), Some(0.8));
        assert_eq!(map.get("p1", "p2"), None);
        assert_eq!(map.iter().count(), 2);
    }

    #[test]
    fn test_from_roster_rejects_self_synergy() {
        let players = vec![player("p1").with_synergy("p1", 0.9)];
        assert!(SynergyMap::from_roster(&players).is_err());

        let players = vec![player("p1").with_synergy("p2", f64::NAN)];
        assert!(SynergyMap::from_roster(&players).is_err());
    }
}
