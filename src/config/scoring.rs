//! Scoring and synergy configuration
//!
//! One parameterised scorer covers every sport variant: the skill scale,
//! whether positions are modelled and the weight vector are all configured
//! here rather than baked into separate scorers.

use crate::error::{MatchmakingError, Result};
use crate::types::{Availability, SkillLevel};
use serde::{Deserialize, Serialize};

/// Tolerance used when checking that weights sum to one
const WEIGHT_SUM_TOLERANCE: f64 = 1e-6;

/// Ordinal skill scale shared by every player in a session
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SkillScale {
    pub min: SkillLevel,
    pub max: SkillLevel,
}

impl SkillScale {
    /// Maximum possible spread between two team averages
    pub fn range(&self) -> f64 {
        f64::from(self.max) - f64::from(self.min)
    }

    pub fn contains(&self, level: SkillLevel) -> bool {
        (self.min..=self.max).contains(&level)
    }
}

impl Default for SkillScale {
    fn default() -> Self {
        Self { min: 1, max: 5 }
    }
}

/// Weights of the five sub-scores in the overall score
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoreWeights {
    pub skill_balance: f64,
    pub synergy: f64,
    pub availability: f64,
    pub location: f64,
    pub position_balance: f64,
}

impl Default for ScoreWeights {
    fn default() -> Self {
        Self {
            skill_balance: 0.30,
            synergy: 0.25,
            availability: 0.15,
            location: 0.10,
            position_balance: 0.20,
        }
    }
}

impl ScoreWeights {
    pub fn sum(&self) -> f64 {
        self.skill_balance
            + self.synergy
            + self.availability
            + self.location
            + self.position_balance
    }

    /// Same weights with position balance dropped and the rest rescaled to sum to one
    pub fn without_positions(&self) -> Self {
        let remaining = self.sum() - self.position_balance;
        if remaining <= 0.0 {
            // Only position balance carried weight; spread it evenly.
            return Self {
                skill_balance: 0.25,
                synergy: 0.25,
                availability: 0.25,
                location: 0.25,
                position_balance: 0.0,
            };
        }
        Self {
            skill_balance: self.skill_balance / remaining,
            synergy: self.synergy / remaining,
            availability: self.availability / remaining,
            location: self.location / remaining,
            position_balance: 0.0,
        }
    }

    pub fn validate(&self) -> Result<()> {
        let all = [
            self.skill_balance,
            self.synergy,
            self.availability,
            self.location,
            self.position_balance,
        ];
        if all.iter().any(|w| !w.is_finite() || *w < 0.0) {
            return Err(MatchmakingError::ConfigurationError {
                message: "Score weights must be finite and non-negative".to_string(),
            }
            .into());
        }
        if (self.sum() - 1.0).abs() > WEIGHT_SUM_TOLERANCE {
            return Err(MatchmakingError::ConfigurationError {
                message: format!("Score weights must sum to 1.0, got {:.4}", self.sum()),
            }
            .into());
        }
        Ok(())
    }
}

/// Everything the partitioner, scorer and selector need for one session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringConfig {
    /// Players per team
    pub team_size: usize,
    /// Window the match is scheduled in
    pub target_availability: Availability,
    /// Locality the match is played in
    pub target_location: String,
    pub skill_scale: SkillScale,
    /// Sports without positions drop position balance from the overall score
    pub model_positions: bool,
    pub weights: ScoreWeights,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            team_size: 5,
            target_availability: Availability::WeekendEvenings,
            target_location: "Mumbai".to_string(),
            skill_scale: SkillScale::default(),
            model_positions: true,
            weights: ScoreWeights::default(),
        }
    }
}

impl ScoringConfig {
    /// Players needed for a full two-team split
    pub fn required_players(&self) -> usize {
        self.team_size * 2
    }

    /// Weights actually applied to the overall score
    pub fn effective_weights(&self) -> ScoreWeights {
        if self.model_positions {
            self.weights
        } else {
            self.weights.without_positions()
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.team_size == 0 {
            return Err(MatchmakingError::ConfigurationError {
                message: "Team size must be greater than 0".to_string(),
            }
            .into());
        }
        if self.skill_scale.max <= self.skill_scale.min {
            return Err(MatchmakingError::ConfigurationError {
                message: format!(
                    "Skill scale must span at least one level, got {}..={}",
                    self.skill_scale.min, self.skill_scale.max
                ),
            }
            .into());
        }
        self.weights.validate()
    }
}

/// Deltas applied to pairwise synergy after a match
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SynergyConfig {
    /// Added to every pair on the winning team
    pub win_delta: f64,
    /// Added to every pair on the losing team
    pub loss_delta: f64,
}

impl Default for SynergyConfig {
    fn default() -> Self {
        Self {
            win_delta: 0.05,
            loss_delta: -0.03,
        }
    }
}

impl SynergyConfig {
    pub fn validate(&self) -> Result<()> {
        if !(self.win_delta > 0.0 && self.win_delta <= 1.0) {
            return Err(MatchmakingError::ConfigurationError {
                message: format!("Synergy win delta must be in (0, 1], got {}", self.win_delta),
            }
            .into());
        }
        if !(self.loss_delta <= 0.0 && self.loss_delta >= -1.0) {
            return Err(MatchmakingError::ConfigurationError {
                message: format!(
                    "Synergy loss delta must be in [-1, 0], got {}",
                    self.loss_delta
                ),
            }
            .into());
        }
        Ok(())
    }
}
