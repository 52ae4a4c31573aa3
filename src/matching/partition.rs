//! Team partitioning heuristics
//!
//! Candidate splits are produced by a fixed set of deterministic heuristics
//! over the eligible pool: players free in the target window (or flexible),
//! sorted by descending skill and truncated to two full teams.

use crate::config::ScoringConfig;
use crate::error::{MatchmakingError, Result};
use crate::types::{Player, Position, Team};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use tracing::debug;

/// Heuristic used to build a candidate split
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PartitionStrategy {
    /// Playground pick: even sorted indices to A, odd to B
    Alternating,
    /// ABBA snake over blocks of four; a trailing lone pair is reversed
    FixedInterleave,
    /// Goalkeepers, defenders, midfielders, forwards, then leftovers, each to
    /// the team with fewer members
    PositionBalanced,
}

impl PartitionStrategy {
    /// All heuristics in generation order
    pub const ALL: [PartitionStrategy; 3] = [
        PartitionStrategy::Alternating,
        PartitionStrategy::FixedInterleave,
        PartitionStrategy::PositionBalanced,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            PartitionStrategy::Alternating => "alternating",
            PartitionStrategy::FixedInterleave => "fixed_interleave",
            PartitionStrategy::PositionBalanced => "position_balanced",
        }
    }

    /// Split a sorted pool of exactly `2 * team_size` players
    fn split(&self, pool: &[Player], team_size: usize) -> (Vec<Player>, Vec<Player>) {
        let to_team_a: Vec<bool> = match self {
            PartitionStrategy::Alternating => (0..pool.len()).map(|i| i % 2 == 0).collect(),
            PartitionStrategy::FixedInterleave => interleave_pattern(pool.len()),
            PartitionStrategy::PositionBalanced => position_balanced_pattern(pool, team_size),
        };

        let mut team_a = Vec::with_capacity(team_size);
        let mut team_b = Vec::with_capacity(team_size);
        for (player, in_a) in pool.iter().zip(to_team_a) {
            if in_a {
                team_a.push(player.clone());
            } else {
                team_b.push(player.clone());
            }
        }
        (team_a, team_b)
    }
}

impl fmt::Display for PartitionStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A candidate two-team split
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeamSplit {
    pub strategy: PartitionStrategy,
    pub team_a: Team,
    pub team_b: Team,
}

/// ABBA snake; for 10 players team A takes sorted indices [0, 3, 4, 7, 9]
fn interleave_pattern(len: usize) -> Vec<bool> {
    let trailing_pair = len % 4 == 2;
    (0..len)
        .map(|i| {
            if trailing_pair && i + 2 >= len {
                i == len - 1
            } else {
                matches!(i % 4, 0 | 3)
            }
        })
        .collect()
}

/// Fewer-members-first assignment with a hard cap at `team_size`
struct GreedyFill {
    team_size: usize,
    assigned: Vec<Option<bool>>,
    size_a: usize,
    size_b: usize,
}

impl GreedyFill {
    fn new(len: usize, team_size: usize) -> Self {
        Self {
            team_size,
            assigned: vec![None; len],
            size_a: 0,
            size_b: 0,
        }
    }

    fn offer(&mut self, idx: usize) {
        if self.assigned[idx].is_some() {
            return;
        }
        if self.size_a <= self.size_b && self.size_a < self.team_size {
            self.assigned[idx] = Some(true);
            self.size_a += 1;
        } else if self.size_b < self.team_size {
            self.assigned[idx] = Some(false);
            self.size_b += 1;
        }
    }

    fn into_pattern(self) -> Vec<bool> {
        self.assigned
            .into_iter()
            .map(|slot| slot.unwrap_or(false))
            .collect()
    }
}

fn indices_at(pool: &[Player], position: Position) -> impl Iterator<Item = usize> + '_ {
    pool.iter()
        .enumerate()
        .filter(move |(_, p)| p.position == Some(position))
        .map(|(i, _)| i)
}

fn position_balanced_pattern(pool: &[Player], team_size: usize) -> Vec<bool> {
    let mut fill = GreedyFill::new(pool.len(), team_size);

    // One goalkeeper per team; any others wait for the leftover pass
    for idx in indices_at(pool, Position::Goalkeeper).take(2) {
        fill.offer(idx);
    }
    for position in [Position::Defender, Position::Midfielder, Position::Forward] {
        for idx in indices_at(pool, position) {
            fill.offer(idx);
        }
    }
    for idx in 0..pool.len() {
        fill.offer(idx);
    }

    fill.into_pattern()
}

/// A heuristic handing back anything but two disjoint full teams is a bug
fn assert_full_split(
    strategy: PartitionStrategy,
    team_a: &[Player],
    team_b: &[Player],
    team_size: usize,
) {
    assert_eq!(
        (team_a.len(), team_b.len()),
        (team_size, team_size),
        "{} heuristic produced teams of {} and {} players, expected {}",
        strategy,
        team_a.len(),
        team_b.len(),
        team_size
    );
    let ids_a: HashSet<&str> = team_a.iter().map(|p| p.id.as_str()).collect();
    assert!(
        team_b.iter().all(|p| !ids_a.contains(p.id.as_str())),
        "{} heuristic placed a player on both teams",
        strategy
    );
}

/// Builds candidate splits from a roster
#[derive(Debug, Clone, Default)]
pub struct TeamPartitioner {
    config: ScoringConfig,
}

impl TeamPartitioner {
    pub fn new(config: ScoringConfig) -> Self {
        Self { config }
    }

    /// Eligible players, strongest first, cut to two full teams
    pub fn eligible_pool(&self, roster: &[Player]) -> Result<Vec<Player>> {
        let required = self.config.required_players();
        let target = self.config.target_availability;

        let mut pool: Vec<Player> = roster
            .iter()
            .filter(|p| p.availability.matches(target))
            .cloned()
            .collect();

        if pool.len() < required {
            return Err(MatchmakingError::InsufficientPlayers {
                required,
                available: pool.len(),
            }
            .into());
        }

        let mut seen = HashSet::with_capacity(pool.len());
        if let Some(duplicate) = pool.iter().find(|p| !seen.insert(p.id.as_str())) {
            return Err(MatchmakingError::invalid_roster(format!(
                "duplicate player id '{}'",
                duplicate.id
            ))
            .into());
        }

        // Stable sort keeps roster order among equal skills
        pool.sort_by(|a, b| b.skill_level.cmp(&a.skill_level));
        pool.truncate(required);
        Ok(pool)
    }

    /// One candidate per heuristic, in generation order
    pub fn partition(&self, roster: &[Player]) -> Result<Vec<TeamSplit>> {
        let pool = self.eligible_pool(roster)?;
        let team_size = self.config.team_size;

        let splits = PartitionStrategy::ALL
            .iter()
            .map(|strategy| {
                let (team_a, team_b) = strategy.split(&pool, team_size);
                assert_full_split(*strategy, &team_a, &team_b, team_size);
                debug!(
                    "{} split: A={:?} B={:?}",
                    strategy,
                    team_a.iter().map(|p| p.id.as_str()).collect::<Vec<_>>(),
                    team_b.iter().map(|p| p.id.as_str()).collect::<Vec<_>>()
                );
                TeamSplit {
                    strategy: *strategy,
                    team_a: Team::new(team_a),
                    team_b: Team::new(team_b),
                }
            })
            .collect();

        Ok(splits)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Availability;

    fn player(id: &str, skill: u8, position: Option<Position>) -> Player {
        Player::new(id, id, skill, position, "Mumbai", Availability::WeekendEvenings)
    }

    fn skills_roster(skills: &[u8]) -> Vec<Player> {
        skills
            .iter()
            .enumerate()
            .map(|(i, s)| player(&format!("p{}", i), *s, None))
            .collect()
    }

    fn skills(team: &Team) -> Vec<u8> {
        team.players.iter().map(|p| p.skill_level).collect()
    }

    fn split_for(splits: &[TeamSplit], strategy: PartitionStrategy) -> &TeamSplit {
        splits.iter().find(|s| s.strategy == strategy).unwrap()
    }

    #[test]
    fn test_interleave_pattern_for_five_a_side() {
        let pattern = interleave_pattern(10);
        let team_a: Vec<usize> = pattern
            .iter()
            .enumerate()
            .filter(|(_, in_a)| **in_a)
            .map(|(i, _)| i)
            .collect();
        assert_eq!(team_a, vec![0, 3, 4, 7, 9]);
    }

    #[test]
    fn test_interleave_pattern_is_balanced_for_other_sizes() {
        for team_size in 1..=8 {
            let pattern = interleave_pattern(team_size * 2);
            assert_eq!(pattern.iter().filter(|a| **a).count(), team_size);
        }
    }

    #[test]
    fn test_alternating_split_pairs_skills() {
        let roster = skills_roster(&[5, 5, 4, 4, 3, 3, 2, 2, 1, 1]);
        let splits = TeamPartitioner::default().partition(&roster).unwrap();
        assert_eq!(splits.len(), 3);

        let alternating = split_for(&splits, PartitionStrategy::Alternating);
        assert_eq!(skills(&alternating.team_a), vec![5, 4, 3, 2, 1]);
        assert_eq!(skills(&alternating.team_b), vec![5, 4, 3, 2, 1]);
    }

    #[test]
    fn test_pool_is_filtered_sorted_and_truncated() {
        let mut roster = skills_roster(&[1, 2, 3, 4, 5, 1, 2, 3, 4, 5, 3, 3]);
        roster[4].availability = Availability::WeekdayMornings;
        roster[9].availability = Availability::Flexible;

        let pool = TeamPartitioner::default().eligible_pool(&roster).unwrap();
        assert_eq!(pool.len(), 10);
        assert!(!pool.iter().any(|p| p.id == "p4"));
        assert_eq!(pool[0].id, "p9");
        assert!(pool.windows(2).all(|w| w[0].skill_level >= w[1].skill_level));
        // Ties keep roster order
        let threes: Vec<&str> = pool
            .iter()
            .filter(|p| p.skill_level == 3)
            .map(|p| p.id.as_str())
            .collect();
        assert_eq!(threes, vec!["p2", "p7", "p10", "p11"]);
    }

    #[test]
    fn test_insufficient_players() {
        let mut roster = skills_roster(&[3; 10]);
        roster[0].availability = Availability::WeekdayEvenings;

        let err = TeamPartitioner::default().partition(&roster).unwrap_err();
        assert_eq!(
            err.downcast_ref::<MatchmakingError>(),
            Some(&MatchmakingError::InsufficientPlayers {
                required: 10,
                available: 9
            })
        );
    }

    #[test]
    fn test_position_balanced_spreads_keepers() {
        let roster = vec![
            player("gk1", 5, Some(Position::Goalkeeper)),
            player("gk2", 4, Some(Position::Goalkeeper)),
            player("gk3", 4, Some(Position::Goalkeeper)),
            player("d1", 3, Some(Position::Defender)),
            player("d2", 3, Some(Position::Defender)),
            player("m1", 3, Some(Position::Midfielder)),
            player("m2", 2, Some(Position::Midfielder)),
            player("f1", 2, Some(Position::Forward)),
            player("f2", 1, Some(Position::Forward)),
            player("x1", 1, None),
        ];
        let splits = TeamPartitioner::default().partition(&roster).unwrap();
        let split = split_for(&splits, PartitionStrategy::PositionBalanced);

        // Members keep sorted-pool order within each team
        assert_eq!(
            split.team_a.player_ids(),
            vec!["gk1", "gk3", "d1", "m1", "f1"]
        );
        assert_eq!(
            split.team_b.player_ids(),
            vec!["gk2", "d2", "m2", "f2", "x1"]
        );
    }

    #[test]
    fn test_position_balanced_fills_from_leftovers() {
        // No positions at all: everything comes from the leftover pass
        let roster = skills_roster(&[5, 4, 3, 2, 1, 5, 4, 3, 2, 1]);
        let splits = TeamPartitioner::default().partition(&roster).unwrap();
        let split = split_for(&splits, PartitionStrategy::PositionBalanced);
        assert_eq!(split.team_a.len(), 5);
        assert_eq!(split.team_b.len(), 5);
        assert_eq!(skills(&split.team_a), vec![5, 4, 3, 2, 1]);
    }

    #[test]
    fn test_every_split_is_full_and_disjoint() {
        let roster = skills_roster(&[5, 1, 4, 2, 3, 3, 2, 4, 1, 5, 3, 3, 2]);
        for team_size in 1..=6 {
            let partitioner = TeamPartitioner::new(ScoringConfig {
                team_size,
                ..ScoringConfig::default()
            });
            for split in partitioner.partition(&roster).unwrap() {
                assert_eq!(split.team_a.len(), team_size);
                assert_eq!(split.team_b.len(), team_size);
                assert!(split
                    .team_a
                    .players
                    .iter()
                    .all(|p| !split.team_b.contains(&p.id)));
            }
        }
    }
}
