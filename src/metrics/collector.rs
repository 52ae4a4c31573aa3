//! Metrics collection using Prometheus
//!
//! This module provides the counters and histograms recorded around
//! matchmaking, synergy updates and the external recommender.

use crate::matching::PartitionStrategy;
use crate::synergy::SynergyUpdateSummary;
use crate::types::MatchOutcome;
use anyhow::Result;
use prometheus::{
    Encoder, Histogram, HistogramOpts, IntCounter, IntCounterVec, Opts, Registry, TextEncoder,
};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Main metrics collector for the matchmaker
#[derive(Clone)]
pub struct MetricsCollector {
    /// Prometheus registry
    registry: Arc<Registry>,

    /// Selection metrics
    selection_metrics: SelectionMetrics,

    /// External recommender metrics
    recommender_metrics: RecommenderMetrics,

    /// Synergy update metrics
    synergy_metrics: SynergyMetrics,
}

/// Metrics about split selection
#[derive(Clone)]
pub struct SelectionMetrics {
    /// Selections by winning strategy
    pub selections_total: IntCounterVec,

    /// Rosters rejected for too few eligible players
    pub insufficient_players_total: IntCounter,

    /// Time spent partitioning and scoring
    pub selection_duration: Histogram,

    /// Overall score of selected splits
    pub overall_score: Histogram,
}

/// Metrics about the external recommendation service
#[derive(Clone)]
pub struct RecommenderMetrics {
    /// Recommendations served, by source
    pub recommendations_total: IntCounterVec,

    /// Local fallbacks, by reason
    pub fallbacks_total: IntCounterVec,

    /// Reward submissions, by status
    pub reward_submissions_total: IntCounterVec,
}

/// Metrics about synergy learning
#[derive(Clone)]
pub struct SynergyMetrics {
    /// Applied match results, by outcome
    pub match_results_total: IntCounterVec,

    /// Pair updates, by direction
    pub pair_updates_total: IntCounterVec,
}

impl MetricsCollector {
    /// Create a new metrics collector with default registry
    pub fn new() -> Result<Self> {
        let registry = Arc::new(Registry::new());
        Self::with_registry(registry)
    }

    /// Create a new metrics collector with custom registry
    pub fn with_registry(registry: Arc<Registry>) -> Result<Self> {
        let selection_metrics = SelectionMetrics::new(&registry)?;
        let recommender_metrics = RecommenderMetrics::new(&registry)?;
        let synergy_metrics = SynergyMetrics::new(&registry)?;

        Ok(Self {
            registry,
            selection_metrics,
            recommender_metrics,
            synergy_metrics,
        })
    }

    /// Get the Prometheus registry
    pub fn registry(&self) -> Arc<Registry> {
        self.registry.clone()
    }

    pub fn selection(&self) -> &SelectionMetrics {
        &self.selection_metrics
    }

    pub fn recommender(&self) -> &RecommenderMetrics {
        &self.recommender_metrics
    }

    pub fn synergy(&self) -> &SynergyMetrics {
        &self.synergy_metrics
    }

    /// Record a completed selection
    pub fn record_selection(&self, strategy: PartitionStrategy, overall: f64, duration: Duration) {
        self.selection_metrics
            .selections_total
            .with_label_values(&[strategy.as_str()])
            .inc();
        self.selection_metrics.overall_score.observe(overall);
        self.selection_metrics
            .selection_duration
            .observe(duration.as_secs_f64());
    }

    pub fn record_insufficient_players(&self) {
        self.selection_metrics.insufficient_players_total.inc();
    }

    /// Record where a served recommendation came from
    pub fn record_recommendation(&self, source: &str) {
        self.recommender_metrics
            .recommendations_total
            .with_label_values(&[source])
            .inc();
    }

    /// Record a fallback to local matchmaking
    pub fn record_fallback(&self, reason: &str) {
        self.recommender_metrics
            .fallbacks_total
            .with_label_values(&[reason])
            .inc();
    }

    pub fn record_reward_submission(&self, success: bool) {
        let status = if success { "success" } else { "error" };
        self.recommender_metrics
            .reward_submissions_total
            .with_label_values(&[status])
            .inc();
    }

    /// Record an applied match result
    pub fn record_synergy_update(&self, outcome: MatchOutcome, summary: &SynergyUpdateSummary) {
        self.synergy_metrics
            .match_results_total
            .with_label_values(&[outcome.as_str()])
            .inc();
        self.synergy_metrics
            .pair_updates_total
            .with_label_values(&["strengthened"])
            .inc_by(summary.pairs_strengthened as u64);
        self.synergy_metrics
            .pair_updates_total
            .with_label_values(&["weakened"])
            .inc_by(summary.pairs_weakened as u64);
    }

    /// Render every registered metric in the Prometheus text format
    pub fn export(&self) -> Result<String> {
        let encoder = TextEncoder::new();
        Ok(encoder.encode_to_string(&self.registry.gather())?)
    }

    /// Create a timer for measuring operation duration
    pub fn start_timer(&self) -> MetricsTimer {
        MetricsTimer::new()
    }
}

/// Timer for measuring operation durations
pub struct MetricsTimer {
    start: Instant,
}

impl MetricsTimer {
    fn new() -> Self {
        Self {
            start: Instant::now(),
        }
    }

    /// Get the elapsed duration
    pub fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }

    /// Stop the timer and return the duration
    pub fn stop(self) -> Duration {
        self.elapsed()
    }
}

impl SelectionMetrics {
    fn new(registry: &Registry) -> Result<Self> {
        let selections_total = IntCounterVec::new(
            Opts::new(
                "turf_matchmaker_selections_total",
                "Selected splits by strategy",
            ),
            &["strategy"],
        )?;
        registry.register(Box::new(selections_total.clone()))?;

        let insufficient_players_total = IntCounter::new(
            "turf_matchmaker_insufficient_players_total",
            "Rosters without enough eligible players",
        )?;
        registry.register(Box::new(insufficient_players_total.clone()))?;

        let selection_duration = Histogram::with_opts(
            HistogramOpts::new(
                "turf_matchmaker_selection_duration_seconds",
                "Partition and scoring time",
            )
            .buckets(vec![0.00001, 0.0001, 0.001, 0.005, 0.01, 0.05, 0.1]),
        )?;
        registry.register(Box::new(selection_duration.clone()))?;

        let overall_score = Histogram::with_opts(
            HistogramOpts::new(
                "turf_matchmaker_overall_score",
                "Overall score of selected splits",
            )
            .buckets(vec![0.1, 0.2, 0.3, 0.4, 0.5, 0.6, 0.7, 0.8, 0.9, 1.0]),
        )?;
        registry.register(Box::new(overall_score.clone()))?;

        Ok(Self {
            selections_total,
            insufficient_players_total,
            selection_duration,
            overall_score,
        })
    }
}

impl RecommenderMetrics {
    fn new(registry: &Registry) -> Result<Self> {
        let recommendations_total = IntCounterVec::new(
            Opts::new(
                "turf_matchmaker_recommendations_total",
                "Recommendations served by source",
            ),
            &["source"],
        )?;
        registry.register(Box::new(recommendations_total.clone()))?;

        let fallbacks_total = IntCounterVec::new(
            Opts::new(
                "turf_matchmaker_fallbacks_total",
                "Local fallbacks by reason",
            ),
            &["reason"],
        )?;
        registry.register(Box::new(fallbacks_total.clone()))?;

        let reward_submissions_total = IntCounterVec::new(
            Opts::new(
                "turf_matchmaker_reward_submissions_total",
                "Reward submissions to the recommendation service",
            ),
            &["status"],
        )?;
        registry.register(Box::new(reward_submissions_total.clone()))?;

        Ok(Self {
            recommendations_total,
            fallbacks_total,
            reward_submissions_total,
        })
    }
}

impl SynergyMetrics {
    fn new(registry: &Registry) -> Result<Self> {
        let match_results_total = IntCounterVec::new(
            Opts::new(
                "turf_matchmaker_match_results_total",
                "Applied match results by outcome",
            ),
            &["outcome"],
        )?;
        registry.register(Box::new(match_results_total.clone()))?;

        let pair_updates_total = IntCounterVec::new(
            Opts::new(
                "turf_matchmaker_synergy_pair_updates_total",
                "Synergy pair updates by direction",
            ),
            &["direction"],
        )?;
        registry.register(Box::new(pair_updates_total.clone()))?;

        Ok(Self {
            match_results_total,
            pair_updates_total,
        })
    }
}
