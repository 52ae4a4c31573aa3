//! External recommendation service interface
//!
//! An optional remote service can propose splits and learn from per-player
//! rewards once a match has been played.

use crate::error::Result;
use crate::types::{Availability, MatchId, MatchOutcome, Player, PlayerId, Team};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Reward for each player on the winning side
pub const WIN_REWARD: f64 = 1.0;
/// Reward for each player on the losing side
pub const LOSS_REWARD: f64 = -0.5;
/// Reward for everyone after a draw
pub const DRAW_REWARD: f64 = 0.0;

/// Request sent to the recommendation service
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecommendationRequest {
    pub players: Vec<Player>,
    pub team_size: usize,
    pub target_availability: Availability,
    pub target_location: String,
}

/// Split proposed by the recommendation service, by player id
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExternalRecommendation {
    pub team_a: Vec<PlayerId>,
    pub team_b: Vec<PlayerId>,
    /// Service confidence in [0, 1], if reported
    #[serde(default)]
    pub confidence: Option<f64>,
}

/// Per-player learning signal for a completed match
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerReward {
    pub match_id: MatchId,
    pub player_id: PlayerId,
    pub reward: f64,
    pub teammates: Vec<PlayerId>,
    pub opponents: Vec<PlayerId>,
}

/// Trait for external recommendation services
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RecommendationSource: Send + Sync {
    /// Propose a split for the request's players
    async fn recommend(&self, request: RecommendationRequest) -> Result<ExternalRecommendation>;

    /// Report the outcome of a played match
    async fn submit_rewards(&self, rewards: Vec<PlayerReward>) -> Result<()>;
}

/// Rewards for both teams of a finished match
pub fn player_rewards(
    match_id: MatchId,
    team_a: &Team,
    team_b: &Team,
    outcome: MatchOutcome,
) -> Vec<PlayerReward> {
    let (reward_a, reward_b) = match outcome {
        MatchOutcome::TeamAWon => (WIN_REWARD, LOSS_REWARD),
        MatchOutcome::TeamBWon => (LOSS_REWARD, WIN_REWARD),
        MatchOutcome::Draw => (DRAW_REWARD, DRAW_REWARD),
    };

    let mut rewards = team_rewards(match_id, team_a, team_b, reward_a);
    rewards.extend(team_rewards(match_id, team_b, team_a, reward_b));
    rewards
}

fn team_rewards(
    match_id: MatchId,
    team: &Team,
    opponents: &Team,
    reward: f64,
) -> Vec<PlayerReward> {
    team.players
        .iter()
        .map(|player| PlayerReward {
            match_id,
            player_id: player.id.clone(),
            reward,
            teammates: team
                .players
                .iter()
                .filter(|other| other.id != player.id)
                .map(|other| other.id.clone())
                .collect(),
            opponents: opponents.player_ids(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::generate_match_id;

    fn team(ids: &[&str]) -> Team {
        Team::new(
            ids.iter()
                .map(|id| Player::new(*id, *id, 3, None, "Mumbai", Availability::Flexible))
                .collect(),
        )
    }

    #[test]
    fn test_rewards_follow_outcome() {
        let match_id = generate_match_id();
        let a = team(&["a1", "a2"]);
        let b = team(&["b1", "b2"]);

        let rewards = player_rewards(match_id, &a, &b, MatchOutcome::TeamBWon);
        assert_eq!(rewards.len(), 4);
        assert_eq!(rewards[0].reward, -0.5);
        assert_eq!(rewards[2].reward, 1.0);
        assert_eq!(rewards[0].teammates, vec!["a2".to_string()]);
        assert_eq!(rewards[0].opponents, vec!["b1".to_string(), "b2".to_string()]);
        assert_eq!(rewards[3].opponents, vec!["a1".to_string(), "a2".to_string()]);
        assert!(rewards.iter().all(|r| r.match_id == match_id));
    }

    #[test]
    fn test_draw_rewards_are_zero() {
        let rewards = player_rewards(
            generate_match_id(),
            &team(&["a1"]),
            &team(&["b1"]),
            MatchOutcome::Draw,
        );
        assert!(rewards.iter().all(|r| r.reward == 0.0));
        assert!(rewards.iter().all(|r| r.teammates.is_empty()));
    }

    #[test]
    fn test_external_recommendation_json() {
        let json = r#"{"team_a": ["p1", "p2"], "team_b": ["p3", "p4"]}"#;
        let parsed: ExternalRecommendation = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.team_a, vec!["p1", "p2"]);
        assert_eq!(parsed.confidence, None);
    }
}
