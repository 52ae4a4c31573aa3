//! Host-side recommendation
//!
//! This module wraps the local matchmaker with an optional external
//! recommendation service and renders the result for people.

pub mod fallback;
pub mod format;
pub mod http;
pub mod source;

// Re-export commonly used types
pub use fallback::{resolve_split, FallbackRecommender, Recommendation, RecommendationOrigin};
pub use format::{format_quality, format_recommendation};
pub use http::HttpRecommendationSource;
pub use source::{
    player_rewards, ExternalRecommendation, PlayerReward, RecommendationRequest,
    RecommendationSource,
};
