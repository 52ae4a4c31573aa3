//! One-call matchmaking over a roster
//!
//! The matchmaker validates the roster, generates the heuristic splits and
//! keeps the best-scoring one.

use crate::config::ScoringConfig;
use crate::error::Result;
use crate::matching::partition::TeamPartitioner;
use crate::matching::scorer::{MatchScorer, QualityScorer};
use crate::matching::selector::{select_best, Selection};
use crate::roster::validate_roster;
use crate::synergy::SynergyMap;
use crate::types::Player;
use std::sync::Arc;
use tracing::{debug, info};

/// Roster in, best split out
#[derive(Clone)]
pub struct Matchmaker {
    config: ScoringConfig,
    partitioner: TeamPartitioner,
    scorer: Arc<dyn MatchScorer>,
}

impl Matchmaker {
    /// Create a matchmaker using the weighted quality scorer
    pub fn new(config: ScoringConfig) -> Self {
        let scorer = Arc::new(QualityScorer::new(config.clone()));
        Self::with_scorer(config, scorer)
    }

    /// Create a matchmaker with a custom scorer
    pub fn with_scorer(config: ScoringConfig, scorer: Arc<dyn MatchScorer>) -> Self {
        Self {
            partitioner: TeamPartitioner::new(config.clone()),
            config,
            scorer,
        }
    }

    pub fn config(&self) -> &ScoringConfig {
        &self.config
    }

    pub fn scorer(&self) -> Arc<dyn MatchScorer> {
        self.scorer.clone()
    }

    /// Pick the best balanced split of the roster
    pub fn recommend(&self, roster: &[Player], synergy: &SynergyMap) -> Result<Selection> {
        validate_roster(roster, &self.config.skill_scale)?;
        debug!(
            "Matching {} players for {}-a-side on {}",
            roster.len(),
            self.config.team_size,
            self.config.target_availability
        );

        let candidates = self.partitioner.partition(roster)?;
        let selection = select_best(candidates, self.scorer.as_ref(), synergy)?;

        info!(
            "Selected {} split with overall score {:.3}",
            selection.strategy, selection.report.overall
        );
        Ok(selection)
    }
}

impl Default for Matchmaker {
    fn default() -> Self {
        Self::new(ScoringConfig::default())
    }
}

impl std::fmt::Debug for Matchmaker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Matchmaker")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}
