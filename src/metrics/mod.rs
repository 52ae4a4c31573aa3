//! Metrics for the turf matchmaker
//!
//! Prometheus counters and histograms recorded by the recommender and the
//! CLI host.

pub mod collector;

pub use collector::{
    MetricsCollector, MetricsTimer, RecommenderMetrics, SelectionMetrics, SynergyMetrics,
};
