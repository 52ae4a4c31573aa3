//! Post-match synergy updates
//!
//! Winning teammates grow closer, losing teammates drift apart. Only the
//! synergy relation changes; player records are never touched.

use crate::config::SynergyConfig;
use crate::error::{MatchmakingError, Result};
use crate::synergy::map::SynergyMap;
use crate::types::{MatchId, MatchOutcome, Team};
use crate::utils::current_timestamp;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::{debug, info, warn};

/// Counts of pairs touched by one update
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SynergyUpdateSummary {
    pub pairs_strengthened: usize,
    pub pairs_weakened: usize,
}

/// Applies fixed win/loss deltas to pairwise synergy
#[derive(Debug, Clone, Default)]
pub struct SynergyUpdater {
    config: SynergyConfig,
}

impl SynergyUpdater {
    pub fn new(config: SynergyConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &SynergyConfig {
        &self.config
    }

    /// Adjust every intra-team pair according to the outcome
    pub fn apply_result(
        &self,
        synergy: &mut SynergyMap,
        team_a: &Team,
        team_b: &Team,
        outcome: MatchOutcome,
    ) -> SynergyUpdateSummary {
        let (winners, losers) = match outcome {
            MatchOutcome::TeamAWon => (team_a, team_b),
            MatchOutcome::TeamBWon => (team_b, team_a),
            MatchOutcome::Draw => {
                debug!("Draw recorded, synergy left unchanged");
                return SynergyUpdateSummary::default();
            }
        };

        SynergyUpdateSummary {
            pairs_strengthened: self.shift_team(synergy, winners, self.config.win_delta),
            pairs_weakened: self.shift_team(synergy, losers, self.config.loss_delta),
        }
    }

    /// Each direction moves from its own looked-up value, so asymmetric
    /// entries stay asymmetric
    fn shift_team(&self, synergy: &mut SynergyMap, team: &Team, delta: f64) -> usize {
        let mut touched = 0;
        for (first, second) in team.pairs() {
            let forward = synergy.score(&first.id, &second.id);
            let backward = synergy.score(&second.id, &first.id);
            synergy.set_directed(&first.id, &second.id, forward + delta);
            synergy.set_directed(&second.id, &first.id, backward + delta);
            touched += 1;
        }
        touched
    }
}

/// Apply a result with the default deltas (+0.05 win, -0.03 loss)
pub fn apply_result(synergy: &mut SynergyMap, team_a: &Team, team_b: &Team, team_a_won: bool) {
    SynergyUpdater::default().apply_result(
        synergy,
        team_a,
        team_b,
        MatchOutcome::from_team_a_won(team_a_won),
    );
}

/// Ledger entry for a match whose result has been applied
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppliedMatch {
    pub match_id: MatchId,
    pub outcome: MatchOutcome,
    pub summary: SynergyUpdateSummary,
    pub applied_at: DateTime<Utc>,
}

/// Owns a synergy map and refuses to apply the same match twice
#[derive(Debug, Clone, Default)]
pub struct SynergyTracker {
    synergy: SynergyMap,
    updater: SynergyUpdater,
    applied: BTreeMap<MatchId, AppliedMatch>,
}

impl SynergyTracker {
    pub fn new(synergy: SynergyMap, updater: SynergyUpdater) -> Self {
        Self {
            synergy,
            updater,
            applied: BTreeMap::new(),
        }
    }

    pub fn synergy(&self) -> &SynergyMap {
        &self.synergy
    }

    pub fn into_synergy(self) -> SynergyMap {
        self.synergy
    }

    pub fn is_applied(&self, match_id: &MatchId) -> bool {
        self.applied.contains_key(match_id)
    }

    pub fn applied_matches(&self) -> impl Iterator<Item = &AppliedMatch> {
        self.applied.values()
    }

    /// Apply a completed match exactly once
    pub fn record_match(
        &mut self,
        match_id: MatchId,
        team_a: &Team,
        team_b: &Team,
        outcome: MatchOutcome,
    ) -> Result<SynergyUpdateSummary> {
        if self.applied.contains_key(&match_id) {
            warn!("Ignoring repeated result for match {}", match_id);
            return Err(MatchmakingError::DuplicateMatchResult {
                match_id: match_id.to_string(),
            }
            .into());
        }

        let summary = self
            .updater
            .apply_result(&mut self.synergy, team_a, team_b, outcome);

        info!(
            "Applied result for match {} ({}) - {} pairs strengthened, {} weakened",
            match_id, outcome, summary.pairs_strengthened, summary.pairs_weakened
        );

        self.applied.insert(
            match_id,
            AppliedMatch {
                match_id,
                outcome,
                summary,
                applied_at: current_timestamp(),
            },
        );

        Ok(summary)
    }
}
