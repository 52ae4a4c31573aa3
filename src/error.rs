//! Error types for the matchmaker
//!
//! Typed failures are defined with thiserror and carried through the crate
//! inside anyhow results. Callers that need to branch on a specific failure
//! recover it with `downcast_ref::<MatchmakingError>()`.

/// Result type alias for convenience
pub type Result<T> = anyhow::Result<T>;

/// Custom error types for specific matchmaking scenarios
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum MatchmakingError {
    #[error("Insufficient players: need {required}, only {available} eligible")]
    InsufficientPlayers { required: usize, available: usize },

    #[error("Invalid roster: {reason}")]
    InvalidRoster { reason: String },

    #[error("Precondition violated: {reason}")]
    PreconditionViolation { reason: String },

    #[error("Match result already applied: {match_id}")]
    DuplicateMatchResult { match_id: String },

    #[error("Recommendation failed: {reason}")]
    RecommendationFailed { reason: String },

    #[error("Configuration error: {message}")]
    ConfigurationError { message: String },
}

impl MatchmakingError {
    /// Shorthand for roster validation failures
    pub fn invalid_roster(reason: impl Into<String>) -> Self {
        Self::InvalidRoster {
            reason: reason.into(),
        }
    }

    /// Shorthand for scorer precondition failures
    pub fn precondition(reason: impl Into<String>) -> Self {
        Self::PreconditionViolation {
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = MatchmakingError::InsufficientPlayers {
            required: 10,
            available: 9,
        };
        assert_eq!(
            err.to_string(),
            "Insufficient players: need 10, only 9 eligible"
        );

        let err = MatchmakingError::invalid_roster("duplicate player id 'p1'");
        assert_eq!(err.to_string(), "Invalid roster: duplicate player id 'p1'");
    }

    #[test]
    fn test_downcast_through_anyhow() {
        let result: Result<()> = Err(MatchmakingError::precondition("teams differ in size").into());
        let err = result.unwrap_err();
        assert!(matches!(
            err.downcast_ref::<MatchmakingError>(),
            Some(MatchmakingError::PreconditionViolation { .. })
        ));
    }
}
