//! Recommendation service reached over HTTP
//!
//! The service learns per player. `POST /matchmake` returns the teammates it
//! rates highest for one anchor player, and `POST /update` takes one reward
//! per player once a match has been played.

use crate::error::Result;
use crate::recommend::source::{
    ExternalRecommendation, PlayerReward, RecommendationRequest, RecommendationSource,
};
use crate::types::{Player, PlayerId, SkillLevel};
use crate::utils::clamp_unit;
use anyhow::{anyhow, Context};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

/// Sport reported to the service when none is configured
pub const DEFAULT_SPORT: &str = "Football";

/// Body of `POST /matchmake`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchmakeRequest {
    pub player_id: PlayerId,
    pub skill_level: SkillLevel,
    pub sport: String,
    pub location: String,
    pub availability: String,
}

/// One teammate suggestion from the service
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TeammateMatch {
    pub player_id: PlayerId,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub skill_level: SkillLevel,
    #[serde(default)]
    pub compatibility: f64,
}

/// Reply to `POST /matchmake`; confidence is a percentage
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchmakeResponse {
    pub teammates: Vec<TeammateMatch>,
    pub confidence: f64,
}

/// Body of `POST /update`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateRequest {
    pub player_id: PlayerId,
    pub match_id: String,
    pub reward: f64,
    pub sport: String,
    pub teammates: Vec<PlayerId>,
    pub opponents: Vec<PlayerId>,
}

/// Recommendation source backed by the matchmaking web service
#[derive(Debug, Clone)]
pub struct HttpRecommendationSource {
    client: Client,
    base_url: String,
    sport: String,
}

impl HttpRecommendationSource {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .user_agent(concat!("turf-matchmaker/", env!("CARGO_PKG_VERSION")))
            .timeout(timeout)
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            sport: DEFAULT_SPORT.to_string(),
        })
    }

    pub fn with_sport(mut self, sport: impl Into<String>) -> Self {
        self.sport = sport.into();
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn post<T: Serialize>(&self, path: &str, body: &T) -> Result<reqwest::Response> {
        let url = format!("{}/{}", self.base_url, path);
        let response = self
            .client
            .post(&url)
            .json(body)
            .send()
            .await
            .with_context(|| format!("Failed to reach {}", url))?;

        let status = response.status();
        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            return Err(anyhow!("{} returned {}: {}", url, status, detail.trim()));
        }
        Ok(response)
    }
}

#[async_trait]
impl RecommendationSource for HttpRecommendationSource {
    async fn recommend(&self, request: RecommendationRequest) -> Result<ExternalRecommendation> {
        let pool: Vec<&Player> = request
            .players
            .iter()
            .filter(|p| p.availability.matches(request.target_availability))
            .collect();
        let anchor = pool
            .first()
            .ok_or_else(|| anyhow!("No player is free for {}", request.target_availability))?;

        let body = MatchmakeRequest {
            player_id: anchor.id.clone(),
            skill_level: anchor.skill_level,
            sport: self.sport.clone(),
            location: anchor.location.clone(),
            availability: anchor.availability.to_string(),
        };
        let reply: MatchmakeResponse = self
            .post("matchmake", &body)
            .await?
            .json()
            .await
            .context("Failed to decode matchmake response")?;

        debug!(
            "Service suggested {} teammates for {} ({:.0}% confidence)",
            reply.teammates.len(),
            anchor.id,
            reply.confidence
        );
        Ok(split_around_anchor(&pool, request.team_size, &reply))
    }

    async fn submit_rewards(&self, rewards: Vec<PlayerReward>) -> Result<()> {
        for reward in rewards {
            let body = UpdateRequest {
                player_id: reward.player_id,
                match_id: reward.match_id.to_string(),
                reward: reward.reward,
                sport: self.sport.clone(),
                teammates: reward.teammates,
                opponents: reward.opponents,
            };
            self.post("update", &body).await?;
        }
        Ok(())
    }
}

/// Build a split from the anchor's suggestions
///
/// Team A is the anchor (first in `pool`) plus the suggested teammates that are
/// in the pool, topped up in pool order. Team B takes the next players.
pub fn split_around_anchor(
    pool: &[&Player],
    team_size: usize,
    reply: &MatchmakeResponse,
) -> ExternalRecommendation {
    let mut team_a: Vec<PlayerId> = Vec::with_capacity(team_size);
    if let Some(anchor) = pool.first() {
        team_a.push(anchor.id.clone());
    }

    let suggested = reply.teammates.iter().map(|t| &t.player_id);
    let in_order = pool.iter().map(|p| &p.id);
    for id in suggested.filter(|id| pool.iter().any(|p| &p.id == *id)).chain(in_order) {
        if team_a.len() >= team_size {
            break;
        }
        if !team_a.contains(id) {
            team_a.push(id.clone());
        }
    }

    let team_b = pool
        .iter()
        .filter(|p| !team_a.contains(&p.id))
        .take(team_size)
        .map(|p| p.id.clone())
        .collect();

    ExternalRecommendation {
        team_a,
        team_b,
        confidence: Some(clamp_unit(reply.confidence / 100.0)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Availability;
    use crate::utils::generate_match_id;
    use axum::{extract::State, http::StatusCode, routing::post, Json, Router};
    use std::sync::{Arc, Mutex};
    use tokio::net::TcpListener;

    #[derive(Default)]
    struct ServiceLog {
        matchmake: Vec<MatchmakeRequest>,
        updates: Vec<UpdateRequest>,
    }

    type SharedLog = Arc<Mutex<ServiceLog>>;

    async fn matchmake_handler(
        State(log): State<SharedLog>,
        Json(body): Json<MatchmakeRequest>,
    ) -> Json<MatchmakeResponse> {
        log.lock().unwrap().matchmake.push(body);
        Json(MatchmakeResponse {
            teammates: ["p3", "ghost", "p5"]
                .iter()
                .map(|id| TeammateMatch {
                    player_id: id.to_string(),
                    name: id.to_string(),
                    skill_level: 3,
                    compatibility: 0.8,
                })
                .collect(),
            confidence: 72.0,
        })
    }

    async fn update_handler(
        State(log): State<SharedLog>,
        Json(body): Json<UpdateRequest>,
    ) -> StatusCode {
        log.lock().unwrap().updates.push(body);
        StatusCode::OK
    }

    async fn failing_handler() -> (StatusCode, &'static str) {
        (StatusCode::INTERNAL_SERVER_ERROR, "model not loaded")
    }

    async fn spawn_service(router: Router) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        format!("http://{}/", addr)
    }

    async fn mock_service() -> (String, SharedLog) {
        let log = SharedLog::default();
        let router = Router::new()
            .route("/matchmake", post(matchmake_handler))
            .route("/update", post(update_handler))
            .with_state(log.clone());
        (spawn_service(router).await, log)
    }

    fn player(id: &str, availability: Availability) -> Player {
        Player::new(id, id, 3, None, "Mumbai", availability)
    }

    fn request(team_size: usize) -> RecommendationRequest {
        let mut players: Vec<Player> = (1..=6)
            .map(|i| player(&format!("p{}", i), Availability::WeekendEvenings))
            .collect();
        players.insert(0, player("early", Availability::WeekdayMornings));
        RecommendationRequest {
            players,
            team_size,
            target_availability: Availability::WeekendEvenings,
            target_location: "Mumbai".to_string(),
        }
    }

    #[test]
    fn test_split_prefers_suggested_teammates() {
        let request = request(3);
        let pool: Vec<&Player> = request.players[1..].iter().collect();
        let reply = MatchmakeResponse {
            teammates: vec![TeammateMatch {
                player_id: "p4".to_string(),
                name: "p4".to_string(),
                skill_level: 3,
                compatibility: 0.9,
            }],
            confidence: 150.0,
        };

        let split = split_around_anchor(&pool, 3, &reply);
        assert_eq!(split.team_a, vec!["p1", "p4", "p2"]);
        assert_eq!(split.team_b, vec!["p3", "p5", "p6"]);
        assert_eq!(split.confidence, Some(1.0));
    }

    #[test]
    fn test_matchmake_request_is_camel_case() {
        let body = MatchmakeRequest {
            player_id: "p1".to_string(),
            skill_level: 4,
            sport: DEFAULT_SPORT.to_string(),
            location: "Mumbai".to_string(),
            availability: Availability::WeekendEvenings.to_string(),
        };
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["playerId"], "p1");
        assert_eq!(json["skillLevel"], 4);
        assert_eq!(json["availability"], "Weekend Evenings");
    }

    #[tokio::test]
    async fn test_recommend_against_service() {
        let (url, log) = mock_service().await;
        let source = HttpRecommendationSource::new(url, Duration::from_secs(2)).unwrap();

        let split = source.recommend(request(3)).await.unwrap();
        assert_eq!(split.team_a, vec!["p1", "p3", "p5"]);
        assert_eq!(split.team_b, vec!["p2", "p4", "p6"]);
        assert_eq!(split.confidence, Some(0.72));

        let log = log.lock().unwrap();
        assert_eq!(log.matchmake.len(), 1);
        // The anchor is the first player free in the target window
        assert_eq!(log.matchmake[0].player_id, "p1");
        assert_eq!(log.matchmake[0].sport, "Football");
    }

    #[tokio::test]
    async fn test_rewards_posted_per_player() {
        let (url, log) = mock_service().await;
        let source = HttpRecommendationSource::new(url, Duration::from_secs(2))
            .unwrap()
            .with_sport("Futsal");
        let match_id = generate_match_id();
        let rewards = vec![
            PlayerReward {
                match_id,
                player_id: "p1".to_string(),
                reward: 1.0,
                teammates: vec!["p2".to_string()],
                opponents: vec!["p3".to_string(), "p4".to_string()],
            },
            PlayerReward {
                match_id,
                player_id: "p3".to_string(),
                reward: -0.5,
                teammates: vec!["p4".to_string()],
                opponents: vec!["p1".to_string(), "p2".to_string()],
            },
        ];

        source.submit_rewards(rewards).await.unwrap();

        let log = log.lock().unwrap();
        assert_eq!(log.updates.len(), 2);
        assert_eq!(log.updates[0].match_id, match_id.to_string());
        assert_eq!(log.updates[0].opponents, vec!["p3", "p4"]);
        assert_eq!(log.updates[1].reward, -0.5);
        assert_eq!(log.updates[1].sport, "Futsal");
    }

    #[tokio::test]
    async fn test_server_error_is_reported() {
        let router = Router::new().route("/matchmake", post(failing_handler));
        let url = spawn_service(router).await;
        let source = HttpRecommendationSource::new(url, Duration::from_secs(2)).unwrap();

        let err = source.recommend(request(3)).await.unwrap_err();
        assert!(err.to_string().contains("model not loaded"));
    }

    #[tokio::test]
    async fn test_no_free_player_is_an_error() {
        let source =
            HttpRecommendationSource::new("http://127.0.0.1:9", Duration::from_millis(200))
                .unwrap();
        let mut request = request(3);
        request.target_availability = Availability::WeekendMornings;

        assert!(source.recommend(request).await.is_err());
    }
}
