//! Recommendation with a local fallback
//!
//! The recommender asks an optional external service first. A timeout, an
//! error or a split that does not fit the roster falls back to the local
//! matchmaker.

use crate::error::{MatchmakingError, Result};
use crate::matching::{Matchmaker, PartitionStrategy, Selection};
use crate::metrics::MetricsCollector;
use crate::recommend::source::{
    player_rewards, ExternalRecommendation, RecommendationRequest, RecommendationSource,
};
use crate::roster::validate_roster;
use crate::synergy::SynergyMap;
use crate::types::{
    Availability, MatchId, MatchOutcome, MatchQualityReport, Player, PlayerId, Team,
};
use crate::utils::generate_match_id;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use std::time::Duration;
use tokio::time::timeout;
use tracing::{debug, info, warn};

/// Where a recommendation came from
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RecommendationOrigin {
    External { confidence: Option<f64> },
    Local { strategy: PartitionStrategy },
}

/// A proposed match ready to be shown to players
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    pub match_id: MatchId,
    pub origin: RecommendationOrigin,
    pub team_a: Team,
    pub team_b: Team,
    pub report: MatchQualityReport,
}

impl Recommendation {
    fn local(selection: Selection) -> Self {
        Self {
            match_id: generate_match_id(),
            origin: RecommendationOrigin::Local {
                strategy: selection.strategy,
            },
            team_a: selection.team_a,
            team_b: selection.team_b,
            report: selection.report,
        }
    }

    pub fn is_external(&self) -> bool {
        matches!(self.origin, RecommendationOrigin::External { .. })
    }
}

/// External-first recommender backed by the local matchmaker
#[derive(Clone)]
pub struct FallbackRecommender {
    matchmaker: Matchmaker,
    source: Option<Arc<dyn RecommendationSource>>,
    timeout: Duration,
    metrics: Option<Arc<MetricsCollector>>,
}

impl FallbackRecommender {
    /// Local-only recommender
    pub fn new(matchmaker: Matchmaker, timeout: Duration) -> Self {
        Self {
            matchmaker,
            source: None,
            timeout,
            metrics: None,
        }
    }

    pub fn with_source(mut self, source: Arc<dyn RecommendationSource>) -> Self {
        self.source = Some(source);
        self
    }

    pub fn with_metrics(mut self, metrics: Arc<MetricsCollector>) -> Self {
        self.metrics = Some(metrics);
        self
    }

    pub fn matchmaker(&self) -> &Matchmaker {
        &self.matchmaker
    }

    /// Recommend a match for the roster
    ///
    /// An invalid roster is rejected before the external service is asked.
    pub async fn recommend(
        &self,
        roster: &[Player],
        synergy: &SynergyMap,
    ) -> Result<Recommendation> {
        validate_roster(roster, &self.matchmaker.config().skill_scale)?;

        if let Some(source) = &self.source {
            match self.try_external(source.as_ref(), roster, synergy).await {
                Ok(recommendation) => {
                    self.record_recommendation("external");
                    return Ok(recommendation);
                }
                Err((reason, err)) => {
                    warn!("External recommendation unusable ({}): {}", reason, err);
                    if let Some(metrics) = &self.metrics {
                        metrics.record_fallback(reason);
                    }
                }
            }
        }

        let recommendation = self.recommend_locally(roster, synergy)?;
        self.record_recommendation("local");
        Ok(recommendation)
    }

    /// Send per-player rewards for a finished match
    pub async fn submit_result(
        &self,
        match_id: MatchId,
        team_a: &Team,
        team_b: &Team,
        outcome: MatchOutcome,
    ) -> Result<()> {
        let Some(source) = &self.source else {
            debug!("No recommendation service configured, skipping rewards");
            return Ok(());
        };

        let rewards = player_rewards(match_id, team_a, team_b, outcome);
        let count = rewards.len();
        let result = match timeout(self.timeout, source.submit_rewards(rewards)).await {
            Ok(Ok(())) => Ok(()),
            Ok(Err(e)) => Err(MatchmakingError::RecommendationFailed {
                reason: format!("reward submission failed: {}", e),
            }),
            Err(_) => Err(MatchmakingError::RecommendationFailed {
                reason: format!("reward submission timed out after {:?}", self.timeout),
            }),
        };

        if let Some(metrics) = &self.metrics {
            metrics.record_reward_submission(result.is_ok());
        }
        match result {
            Ok(()) => {
                info!("Submitted {} rewards for match {}", count, match_id);
                Ok(())
            }
            Err(e) => Err(e.into()),
        }
    }

    fn recommend_locally(&self, roster: &[Player], synergy: &SynergyMap) -> Result<Recommendation> {
        let timer = self.metrics.as_ref().map(|m| m.start_timer());
        let selection = match self.matchmaker.recommend(roster, synergy) {
            Ok(selection) => selection,
            Err(e) => {
                if let (Some(metrics), Some(MatchmakingError::InsufficientPlayers { .. })) =
                    (&self.metrics, e.downcast_ref::<MatchmakingError>())
                {
                    metrics.record_insufficient_players();
                }
                return Err(e);
            }
        };

        if let (Some(metrics), Some(timer)) = (&self.metrics, timer) {
            metrics.record_selection(selection.strategy, selection.report.overall, timer.stop());
        }
        Ok(Recommendation::local(selection))
    }

    async fn try_external(
        &self,
        source: &dyn RecommendationSource,
        roster: &[Player],
        synergy: &SynergyMap,
    ) -> std::result::Result<Recommendation, (&'static str, anyhow::Error)> {
        let config = self.matchmaker.config();
        let request = RecommendationRequest {
            players: roster.to_vec(),
            team_size: config.team_size,
            target_availability: config.target_availability,
            target_location: config.target_location.clone(),
        };

        let proposal = match timeout(self.timeout, source.recommend(request)).await {
            Ok(Ok(proposal)) => proposal,
            Ok(Err(e)) => return Err(("error", e)),
            Err(_) => {
                return Err((
                    "timeout",
                    MatchmakingError::RecommendationFailed {
                        reason: format!("no response within {:?}", self.timeout),
                    }
                    .into(),
                ))
            }
        };

        let (team_a, team_b) =
            resolve_split(&proposal, roster, config.team_size, config.target_availability)
                .map_err(|e| ("malformed", e))?;
        let report = self
            .matchmaker
            .scorer()
            .score(&team_a, &team_b, synergy)
            .map_err(|e| ("malformed", e))?;

        info!(
            "Using external recommendation with overall score {:.3}",
            report.overall
        );
        Ok(Recommendation {
            match_id: generate_match_id(),
            origin: RecommendationOrigin::External {
                confidence: proposal.confidence,
            },
            team_a,
            team_b,
            report,
        })
    }

    fn record_recommendation(&self, source: &str) {
        if let Some(metrics) = &self.metrics {
            metrics.record_recommendation(source);
        }
    }
}

impl std::fmt::Debug for FallbackRecommender {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FallbackRecommender")
            .field("matchmaker", &self.matchmaker)
            .field("has_source", &self.source.is_some())
            .field("timeout", &self.timeout)
            .finish()
    }
}

/// Map a proposed split onto roster players
///
/// Both teams must have exactly `team_size` known, distinct players who are
/// free in the target window.
pub fn resolve_split(
    proposal: &ExternalRecommendation,
    roster: &[Player],
    team_size: usize,
    target: Availability,
) -> Result<(Team, Team)> {
    let by_id: HashMap<&str, &Player> = roster.iter().map(|p| (p.id.as_str(), p)).collect();
    let mut used: HashSet<&str> = HashSet::new();

    let mut resolve = |ids: &[PlayerId], label: &str| -> Result<Team> {
        if ids.len() != team_size {
            return Err(malformed(format!(
                "team {} has {} players, expected {}",
                label,
                ids.len(),
                team_size
            )));
        }
        let mut players = Vec::with_capacity(ids.len());
        for id in ids {
            let player: &Player = by_id
                .get(id.as_str())
                .copied()
                .ok_or_else(|| malformed(format!("unknown player '{}'", id)))?;
            if !used.insert(player.id.as_str()) {
                return Err(malformed(format!("player '{}' picked twice", id)));
            }
            if !player.availability.matches(target) {
                return Err(malformed(format!(
                    "player '{}' is not free for {}",
                    id, target
                )));
            }
            players.push(player.clone());
        }
        Ok(Team::new(players))
    };

    let team_a = resolve(&proposal.team_a, "A")?;
    let team_b = resolve(&proposal.team_b, "B")?;
    Ok((team_a, team_b))
}

fn malformed(reason: String) -> anyhow::Error {
    MatchmakingError::RecommendationFailed { reason }.into()
}
