//! Common types used throughout the matchmaker

use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Unique identifier for players within a roster
pub type PlayerId = String;

/// Unique identifier for completed matches
pub type MatchId = Uuid;

/// Playing position of a player
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Position {
    Goalkeeper,
    Defender,
    Midfielder,
    Forward,
}

impl Position {
    /// All position categories in distribution order
    pub const ALL: [Position; 4] = [
        Position::Goalkeeper,
        Position::Defender,
        Position::Midfielder,
        Position::Forward,
    ];
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Position::Goalkeeper => write!(f, "Goalkeeper"),
            Position::Defender => write!(f, "Defender"),
            Position::Midfielder => write!(f, "Midfielder"),
            Position::Forward => write!(f, "Forward"),
        }
    }
}

/// Time window a player claims to be free during
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Availability {
    #[serde(rename = "Weekday Mornings")]
    WeekdayMornings,
    #[serde(rename = "Weekday Evenings")]
    WeekdayEvenings,
    #[serde(rename = "Weekend Mornings")]
    WeekendMornings,
    #[serde(rename = "Weekend Evenings")]
    WeekendEvenings,
    Flexible,
}

impl Availability {
    /// Whether this availability covers the target window
    pub fn matches(self, target: Availability) -> bool {
        self == target || self == Availability::Flexible
    }

    fn label(self) -> &'static str {
        match self {
            Availability::WeekdayMornings => "Weekday Mornings",
            Availability::WeekdayEvenings => "Weekday Evenings",
            Availability::WeekendMornings => "Weekend Mornings",
            Availability::WeekendEvenings => "Weekend Evenings",
            Availability::Flexible => "Flexible",
        }
    }
}

impl fmt::Display for Availability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Availability {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .chars()
            .filter(|c| c.is_ascii_alphanumeric())
            .collect::<String>()
            .to_ascii_lowercase();

        match normalized.as_str() {
            "weekdaymornings" => Ok(Availability::WeekdayMornings),
            "weekdayevenings" => Ok(Availability::WeekdayEvenings),
            "weekendmornings" => Ok(Availability::WeekendMornings),
            "weekendevenings" => Ok(Availability::WeekendEvenings),
            "flexible" => Ok(Availability::Flexible),
            _ => Err(anyhow::anyhow!("Unknown availability window: {}", s)),
        }
    }
}

/// Skill level on the 1-5 scale
pub type SkillLevel = u8;

/// Three-tier labels accepted on input, mapped onto the 1-5 scale
fn skill_from_label(label: &str) -> Option<SkillLevel> {
    match label.trim().to_ascii_lowercase().as_str() {
        "beginner" => Some(1),
        "intermediate" => Some(3),
        "advanced" => Some(5),
        _ => None,
    }
}

fn deserialize_skill<'de, D>(deserializer: D) -> Result<SkillLevel, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawSkill {
        Level(u8),
        Label(String),
    }

    match RawSkill::deserialize(deserializer)? {
        RawSkill::Level(level) => Ok(level),
        RawSkill::Label(label) => skill_from_label(&label)
            .ok_or_else(|| serde::de::Error::custom(format!("unknown skill label: {}", label))),
    }
}

/// Player record supplied by a roster provider
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub id: PlayerId,
    pub name: String,
    #[serde(alias = "skill", alias = "skillLevel", deserialize_with = "deserialize_skill")]
    pub skill_level: SkillLevel,
    #[serde(default)]
    pub position: Option<Position>,
    pub location: String,
    pub availability: Availability,
    /// Seed synergy towards other players, only read when building a synergy map
    #[serde(default)]
    pub synergy: BTreeMap<PlayerId, f64>,
    #[serde(default)]
    pub sport: Option<String>,
    #[serde(default, alias = "pastMatches")]
    pub past_matches: Option<u32>,
    #[serde(default, alias = "winRate")]
    pub win_rate: Option<f64>,
}

impl Player {
    /// Minimal player record; optional fields left empty
    pub fn new(
        id: impl Into<PlayerId>,
        name: impl Into<String>,
        skill_level: SkillLevel,
        position: Option<Position>,
        location: impl Into<String>,
        availability: Availability,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            skill_level,
            position,
            location: location.into(),
            availability,
            synergy: BTreeMap::new(),
            sport: None,
            past_matches: None,
            win_rate: None,
        }
    }

    /// Add a seed synergy entry towards another player
    pub fn with_synergy(mut self, other: impl Into<PlayerId>, value: f64) -> Self {
        self.synergy.insert(other.into(), value);
        self
    }
}

/// One side of a candidate split
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Team {
    pub players: Vec<Player>,
}

impl Team {
    pub fn new(players: Vec<Player>) -> Self {
        Self { players }
    }

    pub fn len(&self) -> usize {
        self.players.len()
    }

    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }

    pub fn contains(&self, player_id: &str) -> bool {
        self.players.iter().any(|p| p.id == player_id)
    }

    pub fn player_ids(&self) -> Vec<PlayerId> {
        self.players.iter().map(|p| p.id.clone()).collect()
    }

    /// Mean skill level, 0.0 for an empty team
    pub fn average_skill(&self) -> f64 {
        if self.players.is_empty() {
            return 0.0;
        }
        let total: f64 = self.players.iter().map(|p| f64::from(p.skill_level)).sum();
        total / self.players.len() as f64
    }

    /// All unordered pairs of team members
    pub fn pairs(&self) -> impl Iterator<Item = (&Player, &Player)> + '_ {
        self.players.iter().enumerate().flat_map(move |(i, first)| {
            self.players[i + 1..].iter().map(move |second| (first, second))
        })
    }
}

impl From<Vec<Player>> for Team {
    fn from(players: Vec<Player>) -> Self {
        Self::new(players)
    }
}

/// Breakdown of how good a proposed match is, every field in [0, 1]
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MatchQualityReport {
    pub skill_balance: f64,
    pub synergy: f64,
    pub availability: f64,
    pub location: f64,
    pub position_balance: f64,
    pub overall: f64,
}

/// Result of a completed real-world match
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MatchOutcome {
    TeamAWon,
    TeamBWon,
    Draw,
}

impl MatchOutcome {
    pub fn from_team_a_won(team_a_won: bool) -> Self {
        if team_a_won {
            MatchOutcome::TeamAWon
        } else {
            MatchOutcome::TeamBWon
        }
    }

    pub fn from_scores(team_a_score: u32, team_b_score: u32) -> Self {
        match team_a_score.cmp(&team_b_score) {
            std::cmp::Ordering::Greater => MatchOutcome::TeamAWon,
            std::cmp::Ordering::Less => MatchOutcome::TeamBWon,
            std::cmp::Ordering::Equal => MatchOutcome::Draw,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            MatchOutcome::TeamAWon => "team_a_won",
            MatchOutcome::TeamBWon => "team_b_won",
            MatchOutcome::Draw => "draw",
        }
    }
}

impl fmt::Display for MatchOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MatchOutcome::TeamAWon => write!(f, "Team A won"),
            MatchOutcome::TeamBWon => write!(f, "Team B won"),
            MatchOutcome::Draw => write!(f, "Draw"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flexible_matches_any_window() {
        assert!(Availability::Flexible.matches(Availability::WeekendEvenings));
        assert!(Availability::WeekendEvenings.matches(Availability::WeekendEvenings));
        assert!(!Availability::WeekdayEvenings.matches(Availability::WeekendEvenings));
    }

    #[test]
    fn test_availability_parsing() {
        assert_eq!(
            "Weekend Evenings".parse::<Availability>().unwrap(),
            Availability::WeekendEvenings
        );
        assert_eq!(
            "weekday-mornings".parse::<Availability>().unwrap(),
            Availability::WeekdayMornings
        );
        assert!("Midnight".parse::<Availability>().is_err());
    }

    #[test]
    fn test_player_deserializes_skill_labels() {
        let json = r#"{
            "id": "p1",
            "name": "Alex",
            "skill": "advanced",
            "location": "Mumbai",
            "availability": "Weekend Evenings"
        }"#;
        let player: Player = serde_json::from_str(json).unwrap();
        assert_eq!(player.skill_level, 5);
        assert_eq!(player.position, None);
        assert!(player.synergy.is_empty());

        let bad = json.replace("advanced", "legendary");
        assert!(serde_json::from_str::<Player>(&bad).is_err());
    }

    #[test]
    fn test_player_accepts_camel_case_records() {
        let json = r#"{
            "id": "p2",
            "name": "Raj",
            "skillLevel": 3,
            "position": "Midfielder",
            "location": "Mumbai",
            "availability": "Weekend Evenings",
            "sport": "Football",
            "pastMatches": 12,
            "winRate": 0.58,
            "synergy": {"p4": 0.8}
        }"#;
        let player: Player = serde_json::from_str(json).unwrap();
        assert_eq!(player.skill_level, 3);
        assert_eq!(player.past_matches, Some(12));
        assert_eq!(player.win_rate, Some(0.58));
        assert_eq!(player.synergy.get("p4"), Some(&0.8));
    }

    #[test]
    fn test_team_pairs_and_average() {
        let team = Team::new(vec![
            Player::new("a", "A", 5, None, "Mumbai", Availability::Flexible),
            Player::new("b", "B", 3, None, "Mumbai", Availability::Flexible),
            Player::new("c", "C", 1, None, "Mumbai", Availability::Flexible),
        ]);
        assert_eq!(team.pairs().count(), 3);
        assert_eq!(team.average_skill(), 3.0);
        assert!(team.contains("b"));
        assert!(!team.contains("z"));
    }

    #[test]
    fn test_outcome_from_scores() {
        assert_eq!(MatchOutcome::from_scores(3, 1), MatchOutcome::TeamAWon);
        assert_eq!(MatchOutcome::from_scores(0, 2), MatchOutcome::TeamBWon);
        assert_eq!(MatchOutcome::from_scores(2, 2), MatchOutcome::Draw);
        assert_eq!(MatchOutcome::from_team_a_won(false), MatchOutcome::TeamBWon);
    }
}
