//! Selection of the best candidate split

use crate::error::{MatchmakingError, Result};
use crate::matching::partition::{PartitionStrategy, TeamSplit};
use crate::matching::scorer::MatchScorer;
use crate::synergy::SynergyMap;
use crate::types::{MatchQualityReport, Team};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Overall score of one evaluated candidate
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CandidateScore {
    pub strategy: PartitionStrategy,
    pub overall: f64,
}

/// The winning split together with its quality report
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Selection {
    pub strategy: PartitionStrategy,
    pub team_a: Team,
    pub team_b: Team,
    pub report: MatchQualityReport,
    /// Every candidate in generation order
    pub candidates: Vec<CandidateScore>,
}

/// Score every candidate and keep the strictly best one
///
/// Ties go to the earliest candidate. An empty candidate list is a caller
/// error; the partitioner reports short rosters itself.
pub fn select_best(
    candidates: Vec<TeamSplit>,
    scorer: &dyn MatchScorer,
    synergy: &SynergyMap,
) -> Result<Selection> {
    let mut scores = Vec::with_capacity(candidates.len());
    let mut best: Option<(TeamSplit, MatchQualityReport)> = None;

    for candidate in candidates {
        let report = scorer.score(&candidate.team_a, &candidate.team_b, synergy)?;
        debug!(
            "Candidate {} scored {:.4}",
            candidate.strategy, report.overall
        );
        scores.push(CandidateScore {
            strategy: candidate.strategy,
            overall: report.overall,
        });

        let improves = match &best {
            Some((_, best_report)) => report.overall > best_report.overall,
            None => true,
        };
        if improves {
            best = Some((candidate, report));
        }
    }

    match best {
        Some((split, report)) => Ok(Selection {
            strategy: split.strategy,
            team_a: split.team_a,
            team_b: split.team_b,
            report,
            candidates: scores,
        }),
        None => Err(MatchmakingError::precondition("no candidate splits to choose from").into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Availability, Player};
    use std::collections::HashMap;

    /// Scorer returning a fixed overall score per team A captain
    struct FixedScorer {
        by_captain: HashMap<String, f64>,
    }

    impl MatchScorer for FixedScorer {
        fn score(
            &self,
            team_a: &Team,
            _team_b: &Team,
            _synergy: &SynergyMap,
        ) -> Result<MatchQualityReport> {
            let overall = self.by_captain[&team_a.players[0].id];
            Ok(MatchQualityReport {
                skill_balance: overall,
                synergy: overall,
                availability: overall,
                location: overall,
                position_balance: overall,
                overall,
            })
        }
    }

    fn split(strategy: PartitionStrategy, captain: &str) -> TeamSplit {
        let player = |id: &str| Player::new(id, id, 3, None, "Mumbai", Availability::Flexible);
        TeamSplit {
            strategy,
            team_a: Team::new(vec![player(captain)]),
            team_b: Team::new(vec![player(&format!("{}-rival", captain))]),
        }
    }

    fn scorer(scores: &[(&str, f64)]) -> FixedScorer {
        FixedScorer {
            by_captain: scores.iter().map(|(k, v)| (k.to_string(), *v)).collect(),
        }
    }

    #[test]
    fn test_highest_overall_wins() {
        let candidates = vec![
            split(PartitionStrategy::Alternating, "a"),
            split(PartitionStrategy::FixedInterleave, "b"),
            split(PartitionStrategy::PositionBalanced, "c"),
        ];
        let scorer = scorer(&[("a", 0.82), ("b", 0.77), ("c", 0.90)]);

        let selection = select_best(candidates, &scorer, &SynergyMap::new()).unwrap();
        assert_eq!(selection.strategy, PartitionStrategy::PositionBalanced);
        assert_eq!(selection.report.overall, 0.90);
        assert_eq!(selection.team_a.players[0].id, "c");
        assert_eq!(selection.candidates.len(), 3);
        assert_eq!(selection.candidates[1].overall, 0.77);
    }

    #[test]
    fn test_ties_go_to_first_generated() {
        let candidates = vec![
            split(PartitionStrategy::Alternating, "a"),
            split(PartitionStrategy::FixedInterleave, "b"),
            split(PartitionStrategy::PositionBalanced, "c"),
        ];
        let scorer = scorer(&[("a", 0.70), ("b", 0.85), ("c", 0.85)]);

        let selection = select_best(candidates, &scorer, &SynergyMap::new()).unwrap();
        assert_eq!(selection.strategy, PartitionStrategy::FixedInterleave);
    }

    #[test]
    fn test_no_candidates_is_a_precondition_violation() {
        let err = select_best(Vec::new(), &scorer(&[]), &SynergyMap::new()).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<MatchmakingError>(),
            Some(MatchmakingError::PreconditionViolation { .. })
        ));
    }
}
