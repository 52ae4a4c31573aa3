//! Plain-text rendering of recommendations

use crate::config::SkillScale;
use crate::recommend::fallback::{Recommendation, RecommendationOrigin};
use crate::types::{MatchQualityReport, Player, Team};
use std::fmt::Write;

fn percent(value: f64) -> String {
    format!("{:.1}%", value * 100.0)
}

fn player_line(player: &Player, scale: &SkillScale) -> String {
    let position = player
        .position
        .map(|p| p.to_string())
        .unwrap_or_else(|| "Any".to_string());
    let mut line = format!(
        "{} ({}, Skill: {}/{}",
        player.name, position, player.skill_level, scale.max
    );
    if let Some(win_rate) = player.win_rate {
        let _ = write!(line, ", Win Rate: {:.0}%", win_rate * 100.0);
    }
    line.push(')');
    line
}

fn team_block(label: &str, team: &Team, scale: &SkillScale) -> String {
    let mut block = format!("{}:\n", label);
    for player in &team.players {
        let _ = writeln!(block, "    {}", player_line(player, scale));
    }
    block
}

/// Sub-score breakdown, one line per factor
pub fn format_quality(report: &MatchQualityReport) -> String {
    format!(
        "- Skill Balance: {}\n- Team Synergy: {}\n- Availability Match: {}\n- Location Compatibility: {}\n- Position Balance: {}",
        percent(report.skill_balance),
        percent(report.synergy),
        percent(report.availability),
        percent(report.location),
        percent(report.position_balance)
    )
}

/// Full recommendation as shown by the CLI
pub fn format_recommendation(recommendation: &Recommendation, scale: &SkillScale) -> String {
    let mut out = String::from("=== TurfX Matchmaking Recommendation ===\n\n");
    out.push_str(&team_block("Team A", &recommendation.team_a, scale));
    out.push('\n');
    out.push_str(&team_block("Team B", &recommendation.team_b, scale));
    out.push('\n');

    let _ = writeln!(
        out,
        "Match Confidence Score: {}",
        percent(recommendation.report.overall)
    );
    match recommendation.origin {
        RecommendationOrigin::External {
            confidence: Some(confidence),
        } => {
            let _ = writeln!(out, "Service Confidence: {}", percent(confidence));
            out.push_str("(Teams proposed by the recommendation service)\n");
        }
        RecommendationOrigin::External { confidence: None } => {
            out.push_str("(Teams proposed by the recommendation service)\n");
        }
        RecommendationOrigin::Local { strategy } => {
            let _ = writeln!(out, "Strategy: {}", strategy);
        }
    }

    out.push_str("\nMatch Quality Explanation:\n");
    out.push_str(&format_quality(&recommendation.report));
    out.push('\n');
    out
}
