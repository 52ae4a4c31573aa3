//! Roster validation
//!
//! Malformed records are rejected before any partitioning happens; the
//! matchmaker never tries to repair a roster.

use crate::config::SkillScale;
use crate::error::{MatchmakingError, Result};
use crate::types::Player;
use std::collections::HashSet;

/// Check every record against the configured skill scale
pub fn validate_roster(players: &[Player], scale: &SkillScale) -> Result<()> {
    let mut seen = HashSet::with_capacity(players.len());

    for player in players {
        validate_player(player, scale)?;
        if !seen.insert(player.id.as_str()) {
            return Err(
                MatchmakingError::invalid_roster(format!("duplicate player id '{}'", player.id))
                    .into(),
            );
        }
    }

    Ok(())
}

/// Check a single record
pub fn validate_player(player: &Player, scale: &SkillScale) -> Result<()> {
    if player.id.trim().is_empty() {
        return Err(MatchmakingError::invalid_roster("player id cannot be empty").into());
    }
    if player.name.trim().is_empty() {
        return Err(MatchmakingError::invalid_roster(format!(
            "player '{}' has no name",
            player.id
        ))
        .into());
    }
    if !scale.contains(player.skill_level) {
        return Err(MatchmakingError::invalid_roster(format!(
            "player '{}' has skill {} outside {}..={}",
            player.id, player.skill_level, scale.min, scale.max
        ))
        .into());
    }
    if let Some(win_rate) = player.win_rate {
        if !(0.0..=1.0).contains(&win_rate) {
            return Err(MatchmakingError::invalid_roster(format!(
                "player '{}' has win rate {} outside [0, 1]",
                player.id, win_rate
            ))
            .into());
        }
    }
    Ok(())
}
