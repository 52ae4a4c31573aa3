//! Match-quality scoring
//!
//! This module computes the five sub-scores of a proposed split and blends
//! them into the overall score used to rank candidates.

use crate::config::ScoringConfig;
use crate::error::{MatchmakingError, Result};
use crate::synergy::{SynergyMap, NEUTRAL_SYNERGY};
use crate::types::{Availability, MatchQualityReport, Position, Team};
use crate::utils::{clamp_unit, mean_or, same_location};
use std::collections::HashSet;

/// Trait for scoring a two-team split
pub trait MatchScorer: Send + Sync {
    /// Score a split; fails if the teams are empty, unequal or overlap
    fn score(
        &self,
        team_a: &Team,
        team_b: &Team,
        synergy: &SynergyMap,
    ) -> Result<MatchQualityReport>;
}

/// Weighted scorer over skill, synergy, availability, location and positions
///
/// Availability, location and position balance are computed per team and
/// the two team values averaged.
#[derive(Debug, Clone, Default)]
pub struct QualityScorer {
    config: ScoringConfig,
}

impl QualityScorer {
    pub fn new(config: ScoringConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ScoringConfig {
        &self.config
    }

    /// `1 - |avg(A) - avg(B)| / range`, clamped to [0, 1]
    pub fn skill_balance(&self, team_a: &Team, team_b: &Team) -> f64 {
        let gap = (team_a.average_skill() - team_b.average_skill()).abs();
        clamp_unit(1.0 - gap / self.config.skill_scale.range())
    }

    /// Mean of both teams' pair synergy
    pub fn synergy(&self, team_a: &Team, team_b: &Team, synergy: &SynergyMap) -> f64 {
        (team_synergy(team_a, synergy) + team_synergy(team_b, synergy)) / 2.0
    }

    pub fn availability(&self, team_a: &Team, team_b: &Team) -> f64 {
        let target = self.config.target_availability;
        (availability_fraction(team_a, target) + availability_fraction(team_b, target)) / 2.0
    }

    pub fn location(&self, team_a: &Team, team_b: &Team) -> f64 {
        let target = &self.config.target_location;
        (location_fraction(team_a, target) + location_fraction(team_b, target)) / 2.0
    }

    /// Always 1.0 when positions are not modelled
    pub fn position_balance(&self, team_a: &Team, team_b: &Team) -> f64 {
        if !self.config.model_positions {
            return 1.0;
        }
        (position_coverage(team_a) + position_coverage(team_b)) / 2.0
    }

    fn check_split(team_a: &Team, team_b: &Team) -> Result<()> {
        if team_a.is_empty() || team_b.is_empty() {
            return Err(MatchmakingError::precondition("both teams must have players").into());
        }
        if team_a.len() != team_b.len() {
            return Err(MatchmakingError::precondition(format!(
                "teams differ in size ({} vs {})",
                team_a.len(),
                team_b.len()
            ))
            .into());
        }
        let ids_a: HashSet<&str> = team_a.players.iter().map(|p| p.id.as_str()).collect();
        if let Some(shared) = team_b.players.iter().find(|p| ids_a.contains(p.id.as_str())) {
            return Err(MatchmakingError::precondition(format!(
                "player '{}' is on both teams",
                shared.id
            ))
            .into());
        }
        Ok(())
    }
}

impl MatchScorer for QualityScorer {
    fn score(
        &self,
        team_a: &Team,
        team_b: &Team,
        synergy: &SynergyMap,
    ) -> Result<MatchQualityReport> {
        Self::check_split(team_a, team_b)?;

        let skill_balance = self.skill_balance(team_a, team_b);
        let synergy = self.synergy(team_a, team_b, synergy);
        let availability = self.availability(team_a, team_b);
        let location = self.location(team_a, team_b);
        let position_balance = self.position_balance(team_a, team_b);

        let weights = self.config.effective_weights();
        let overall = weights.skill_balance * skill_balance
            + weights.synergy * synergy
            + weights.availability * availability
            + weights.location * location
            + weights.position_balance * position_balance;

        Ok(MatchQualityReport {
            skill_balance,
            synergy,
            availability,
            location,
            position_balance,
            overall: clamp_unit(overall),
        })
    }
}

/// Mean synergy over all pairs of a team; 0.5 for a team without pairs
pub fn team_synergy(team: &Team, synergy: &SynergyMap) -> f64 {
    mean_or(
        team.pairs().map(|(a, b)| synergy.score(&a.id, &b.id)),
        NEUTRAL_SYNERGY,
    )
}

/// Fraction of the team free in the target window or flexible
pub fn availability_fraction(team: &Team, target: Availability) -> f64 {
    mean_or(
        team.players
            .iter()
            .map(|p| if p.availability.matches(target) { 1.0 } else { 0.0 }),
        0.0,
    )
}

/// Fraction of the team based in the target location
pub fn location_fraction(team: &Team, target: &str) -> f64 {
    mean_or(
        team.players
            .iter()
            .map(|p| if same_location(&p.location, target) { 1.0 } else { 0.0 }),
        0.0,
    )
}

/// 0.25 for each of the four position categories present in the team
pub fn position_coverage(team: &Team) -> f64 {
    let present = Position::ALL
        .iter()
        .filter(|position| team.players.iter().any(|p| p.position == Some(**position)))
        .count();
    0.25 * present as f64
}
