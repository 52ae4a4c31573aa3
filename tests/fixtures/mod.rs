//! Test fixtures and stub implementations for integration testing

#![allow(dead_code)]

use async_trait::async_trait;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use turf_matchmaker::error::Result;
use turf_matchmaker::recommend::{
    ExternalRecommendation, PlayerReward, RecommendationRequest, RecommendationSource,
};
use turf_matchmaker::types::{Availability, Player, Position};

/// Player free on weekend evenings in Mumbai
pub fn player(id: &str, skill: u8, position: Option<Position>) -> Player {
    Player::new(id, id, skill, position, "Mumbai", Availability::WeekendEvenings)
}

/// Positionless roster `p0..pn` with the given skills
pub fn ranked_roster(skills: &[u8]) -> Vec<Player> {
    skills
        .iter()
        .enumerate()
        .map(|(i, skill)| player(&format!("p{}", i), *skill, None))
        .collect()
}

/// Ten football players with two of every position plus two spare forwards
pub fn football_roster() -> Vec<Player> {
    vec![
        player("gk1", 4, Some(Position::Goalkeeper)),
        player("gk2", 2, Some(Position::Goalkeeper)),
        player("d1", 3, Some(Position::Defender)),
        player("d2", 3, Some(Position::Defender)),
        player("m1", 5, Some(Position::Midfielder)),
        player("m2", 2, Some(Position::Midfielder)),
        player("f1", 4, Some(Position::Forward)),
        player("f2", 3, Some(Position::Forward)),
        player("f3", 1, Some(Position::Forward)),
        player("f4", 3, Some(Position::Forward)),
    ]
}

/// How the scripted source answers `recommend`
#[derive(Debug, Clone)]
pub enum ScriptedReply {
    Split(ExternalRecommendation),
    Fail(String),
    Hang(Duration),
}

/// Recommendation source with a canned reply that records submitted rewards
#[derive(Debug)]
pub struct ScriptedRecommendationSource {
    reply: ScriptedReply,
    requests: Arc<Mutex<Vec<RecommendationRequest>>>,
    rewards: Arc<Mutex<Vec<PlayerReward>>>,
}

impl ScriptedRecommendationSource {
    pub fn new(reply: ScriptedReply) -> Self {
        Self {
            reply,
            requests: Arc::new(Mutex::new(Vec::new())),
            rewards: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn split(team_a: &[&str], team_b: &[&str], confidence: Option<f64>) -> Self {
        Self::new(ScriptedReply::Split(ExternalRecommendation {
            team_a: team_a.iter().map(|id| id.to_string()).collect(),
            team_b: team_b.iter().map(|id| id.to_string()).collect(),
            confidence,
        }))
    }

    /// Number of recommend calls seen
    pub fn request_count(&self) -> usize {
        self.requests.lock().map(|r| r.len()).unwrap_or_default()
    }

    /// Rewards submitted so far
    pub fn submitted_rewards(&self) -> Vec<PlayerReward> {
        self.rewards
            .lock()
            .map(|rewards| rewards.clone())
            .unwrap_or_default()
    }
}

#[async_trait]
impl RecommendationSource for ScriptedRecommendationSource {
    async fn recommend(&self, request: RecommendationRequest) -> Result<ExternalRecommendation> {
        if let Ok(mut requests) = self.requests.lock() {
            requests.push(request);
        }

        match &self.reply {
            ScriptedReply::Split(split) => Ok(split.clone()),
            ScriptedReply::Fail(reason) => Err(anyhow::anyhow!(reason.clone())),
            ScriptedReply::Hang(delay) => {
                tokio::time::sleep(*delay).await;
                Err(anyhow::anyhow!("service woke up too late"))
            }
        }
    }

    async fn submit_rewards(&self, rewards: Vec<PlayerReward>) -> Result<()> {
        if let Ok(mut submitted) = self.rewards.lock() {
            submitted.extend(rewards);
        }
        Ok(())
    }
}
