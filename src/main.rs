//! Main entry point for the turf matchmaker CLI
//!
//! Loads configuration and a roster, prints the recommended split and can
//! simulate a match result to show how learned synergy changes the pick.

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use serde_json::json;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{debug, error, info, warn};
use turf_matchmaker::config::{validate_config, AppConfig};
use turf_matchmaker::matching::Matchmaker;
use turf_matchmaker::metrics::MetricsCollector;
use turf_matchmaker::recommend::{
    format_recommendation, FallbackRecommender, HttpRecommendationSource, Recommendation,
};
use turf_matchmaker::roster::{
    validate_roster, FileRosterProvider, RosterProvider, StaticRosterProvider,
};
use turf_matchmaker::synergy::{SynergyMap, SynergyTracker, SynergyUpdater};
use turf_matchmaker::{Availability, MatchOutcome, MatchmakingError};

/// Outcome used by `--simulate`
#[derive(Debug, Clone, Copy, ValueEnum)]
enum SimulatedOutcome {
    /// Team A wins
    A,
    /// Team B wins
    B,
    Draw,
}

impl From<SimulatedOutcome> for MatchOutcome {
    fn from(outcome: SimulatedOutcome) -> Self {
        match outcome {
            SimulatedOutcome::A => MatchOutcome::TeamAWon,
            SimulatedOutcome::B => MatchOutcome::TeamBWon,
            SimulatedOutcome::Draw => MatchOutcome::Draw,
        }
    }
}

/// Turf Matchmaker - balanced teams for pickup games
#[derive(Parser)]
#[command(
    name = "turf-matchmaker",
    version,
    about = "Split a roster into two balanced teams for a pickup game",
    long_about = "Turf Matchmaker picks the players free in a target window, builds candidate \
                 splits with several heuristics and keeps the one with the best blend of skill \
                 balance, synergy, availability, location and position coverage."
)]
struct Args {
    /// Configuration file path
    #[arg(
        short,
        long,
        value_name = "FILE",
        help = "Path to configuration file (TOML format)"
    )]
    config: Option<PathBuf>,

    /// Roster file
    #[arg(
        short,
        long,
        value_name = "FILE",
        help = "Roster file (JSON or TOML); the demo roster is used when omitted"
    )]
    roster: Option<PathBuf>,

    /// Team size override
    #[arg(long, value_name = "N", help = "Players per team")]
    team_size: Option<usize>,

    /// Target window override
    #[arg(
        long,
        value_name = "WINDOW",
        help = "Availability window, e.g. \"Weekend Evenings\""
    )]
    target_window: Option<Availability>,

    /// Target location override
    #[arg(long, value_name = "CITY", help = "Preferred match location")]
    target_location: Option<String>,

    /// Ignore positions
    #[arg(long, help = "Score without position coverage (non-football sports)")]
    no_positions: bool,

    /// Simulate a result and show the updated recommendation
    #[arg(long, value_enum, value_name = "OUTCOME")]
    simulate: Option<SimulatedOutcome>,

    /// JSON output
    #[arg(long, help = "Print machine-readable JSON instead of text")]
    json: bool,

    /// Log level override
    #[arg(
        short,
        long,
        value_name = "LEVEL",
        help = "Override log level (trace, debug, info, warn, error)"
    )]
    log_level: Option<String>,

    /// Enable debug mode
    #[arg(short, long, help = "Enable debug mode with verbose logging")]
    debug: bool,

    /// Dry run mode (validate config and roster, then exit)
    #[arg(long, help = "Validate configuration and roster and exit")]
    dry_run: bool,
}

/// Initialize structured logging with the configured level
fn init_logging(log_level: &str) -> Result<()> {
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| log_level.into()),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_thread_ids(true)
        .with_line_number(true)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .map_err(|e| anyhow::anyhow!("Failed to initialize logging: {}", e))?;

    Ok(())
}

/// Display startup banner with matchmaking settings
fn display_startup_banner(config: &AppConfig, roster_source: &str) {
    info!("⚽ Turf Matchmaker");
    info!("   Service: {}", config.service.name);
    info!("   Roster: {}", roster_source);
    info!(
        "   Format: {}-a-side, {} in {}",
        config.matchmaking.team_size,
        config.matchmaking.target_availability,
        config.matchmaking.target_location
    );
    info!("   Positions: {}", config.matchmaking.model_positions);
    info!(
        "   Recommender: {}",
        if config.recommender.enabled {
            config.recommender.url.clone()
        } else {
            "local only".to_string()
        }
    );
    info!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
}

/// Load and merge configuration from environment, file and CLI arguments
fn load_config(args: &Args) -> Result<AppConfig> {
    let mut config = if let Some(config_path) = &args.config {
        AppConfig::from_file(config_path)?
    } else {
        AppConfig::from_env()?
    };

    // Apply CLI overrides
    if let Some(log_level) = &args.log_level {
        config.service.log_level = log_level.clone();
    }

    if args.debug {
        config.service.log_level = "debug".to_string();
    }

    if let Some(team_size) = args.team_size {
        config.matchmaking.team_size = team_size;
    }

    if let Some(window) = args.target_window {
        config.matchmaking.target_availability = window;
    }

    if let Some(location) = &args.target_location {
        config.matchmaking.target_location = location.clone();
    }

    if args.no_positions {
        config.matchmaking.model_positions = false;
    }

    validate_config(&config)?;
    Ok(config)
}

fn roster_provider(args: &Args) -> Box<dyn RosterProvider> {
    match &args.roster {
        Some(path) => Box::new(FileRosterProvider::new(path.clone())),
        None => Box::new(StaticRosterProvider::demo()),
    }
}

fn build_recommender(
    config: &AppConfig,
    metrics: Arc<MetricsCollector>,
) -> Result<FallbackRecommender> {
    let matchmaker = Matchmaker::new(config.matchmaking.clone());
    let timeout = config.recommender_timeout();
    let mut recommender = FallbackRecommender::new(matchmaker, timeout).with_metrics(metrics);

    if config.recommender.enabled {
        let source = HttpRecommendationSource::new(config.recommender.url.as_str(), timeout)?
            .with_sport(config.recommender.sport.as_str());
        recommender = recommender.with_source(Arc::new(source));
    }

    Ok(recommender)
}

fn print_recommendation(recommendation: &Recommendation, config: &AppConfig) {
    println!(
        "{}",
        format_recommendation(recommendation, &config.matchmaking.skill_scale)
    );
}

#[tokio::main]
async fn main() -> Result<()> {
    // Parse command line arguments
    let args = Args::parse();

    // Load configuration (CLI args can override environment/config file)
    let config = load_config(&args).unwrap_or_else(|e| {
        eprintln!("Configuration error: {:#}", e);
        std::process::exit(1);
    });

    // Initialize logging early (before any other operations)
    if let Err(e) = init_logging(&config.service.log_level) {
        eprintln!("Failed to initialize logging: {}", e);
        std::process::exit(1);
    }

    let provider = roster_provider(&args);
    display_startup_banner(&config, &provider.describe());

    let roster = provider.load_roster()?;
    validate_roster(&roster, &config.matchmaking.skill_scale)?;
    let synergy = SynergyMap::from_roster(&roster)?;
    info!(
        "Loaded {} players with {} synergy entries",
        roster.len(),
        synergy.len()
    );

    if args.dry_run {
        info!("Configuration and roster validation successful");
        info!("Dry run completed - exiting without matchmaking");
        return Ok(());
    }

    let metrics = Arc::new(MetricsCollector::new()?);
    let recommender = build_recommender(&config, metrics.clone())?;

    let recommendation = match recommender.recommend(&roster, &synergy).await {
        Ok(recommendation) => recommendation,
        Err(e) => {
            match e.downcast_ref::<MatchmakingError>() {
                Some(MatchmakingError::InsufficientPlayers { .. }) => {
                    println!("Not enough players available: {}", e)
                }
                _ => error!("Matchmaking failed: {:#}", e),
            }
            std::process::exit(1);
        }
    };

    let mut output = json!({ "recommendation": &recommendation });
    if !args.json {
        print_recommendation(&recommendation, &config);
    }

    if let Some(simulated) = args.simulate {
        let outcome = MatchOutcome::from(simulated);
        info!("Simulating match {}: {}", recommendation.match_id, outcome);

        let mut tracker =
            SynergyTracker::new(synergy, SynergyUpdater::new(config.synergy.clone()));
        let summary = tracker
            .record_match(
                recommendation.match_id,
                &recommendation.team_a,
                &recommendation.team_b,
                outcome,
            )
            .context("Failed to apply simulated result")?;
        metrics.record_synergy_update(outcome, &summary);

        if let Err(e) = recommender
            .submit_result(
                recommendation.match_id,
                &recommendation.team_a,
                &recommendation.team_b,
                outcome,
            )
            .await
        {
            warn!("Could not report result to recommendation service: {:#}", e);
        }

        let updated = recommender.recommend(&roster, tracker.synergy()).await?;
        if args.json {
            output["simulation"] = json!({
                "outcome": outcome,
                "summary": summary,
                "updated": updated,
            });
        } else {
            println!("=== Simulated Result: {} ===", outcome);
            println!(
                "{} pairs strengthened, {} pairs weakened\n",
                summary.pairs_strengthened, summary.pairs_weakened
            );
            println!("=== Updated Recommendation After Learning ===");
            print_recommendation(&updated, &config);
        }
    }

    if args.json {
        println!("{}", serde_json::to_string_pretty(&output)?);
    }

    debug!("Metrics snapshot:\n{}", metrics.export()?);
    Ok(())
}
