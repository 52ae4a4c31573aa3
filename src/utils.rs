//! Utility functions for the matchmaker

use chrono::{DateTime, Utc};
use uuid::Uuid;

/// Generate a new unique match ID
pub fn generate_match_id() -> Uuid {
    Uuid::new_v4()
}

/// Get the current UTC timestamp
pub fn current_timestamp() -> DateTime<Utc> {
    Utc::now()
}

/// Clamp a score into the unit interval
pub fn clamp_unit(value: f64) -> f64 {
    value.clamp(0.0, 1.0)
}

/// Arithmetic mean, or `fallback` when there is nothing to average
pub fn mean_or(values: impl IntoIterator<Item = f64>, fallback: f64) -> f64 {
    let (sum, count) = values
        .into_iter()
        .fold((0.0, 0usize), |(sum, count), v| (sum + v, count + 1));
    if count == 0 {
        fallback
    } else {
        sum / count as f64
    }
}

/// Check that two locality strings name the same place
pub fn same_location(a: &str, b: &str) -> bool {
    a.trim().eq_ignore_ascii_case(b.trim())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_unique_ids() {
        let id1 = generate_match_id();
        let id2 = generate_match_id();
        assert_ne!(id1, id2);
    }

    #[test]
    fn test_clamp_unit() {
        assert_eq!(clamp_unit(1.2), 1.0);
        assert_eq!(clamp_unit(-0.1), 0.0);
        assert_eq!(clamp_unit(0.4), 0.4);
    }

    #[test]
    fn test_mean_or() {
        assert_eq!(mean_or(vec![0.25, 0.75, 0.5], 0.0), 0.5);
        assert_eq!(mean_or(Vec::new(), 0.5), 0.5);
    }

    #[test]
    fn test_same_location() {
        assert!(same_location("Mumbai", " mumbai "));
        assert!(!same_location("Mumbai", "Delhi"));
    }
}
