//! Synthetic football roster used by the CLI demo and benchmarks

use crate::types::{Availability, Player, Position};

struct DemoPlayer {
    id: &'static str,
    name: &'static str,
    skill: u8,
    position: Position,
    location: &'static str,
    availability: Availability,
    past_matches: u32,
    win_rate: f64,
    synergy: &'static [(&'static str, f64)],
}

const WEEKEND_EVENINGS: Availability = Availability::WeekendEvenings;

#[rustfmt::skip]
const DEMO_PLAYERS: [DemoPlayer; 15] = [
    DemoPlayer { id: "p1", name: "Alex", skill: 4, position: Position::Forward, location: "Mumbai", availability: WEEKEND_EVENINGS, past_matches: 15, win_rate: 0.65, synergy: &[("p3", 0.9), ("p5", 0.7), ("p7", 0.8)] },
    DemoPlayer { id: "p2", name: "Raj", skill: 3, position: Position::Midfielder, location: "Mumbai", availability: WEEKEND_EVENINGS, past_matches: 12, win_rate: 0.58, synergy: &[("p4", 0.8), ("p6", 0.7), ("p10", 0.6)] },
    DemoPlayer { id: "p3", name: "Sarah", skill: 5, position: Position::Forward, location: "Mumbai", availability: WEEKEND_EVENINGS, past_matches: 20, win_rate: 0.70, synergy: &[("p1", 0.9), ("p7", 0.8), ("p9", 0.7)] },
    DemoPlayer { id: "p4", name: "John", skill: 2, position: Position::Defender, location: "Mumbai", availability: WEEKEND_EVENINGS, past_matches: 8, win_rate: 0.50, synergy: &[("p2", 0.8), ("p8", 0.6), ("p10", 0.5)] },
    DemoPlayer { id: "p5", name: "Priya", skill: 3, position: Position::Midfielder, location: "Mumbai", availability: WEEKEND_EVENINGS, past_matches: 10, win_rate: 0.60, synergy: &[("p1", 0.7), ("p7", 0.6), ("p9", 0.8)] },
    DemoPlayer { id: "p6", name: "Michael", skill: 4, position: Position::Goalkeeper, location: "Mumbai", availability: WEEKEND_EVENINGS, past_matches: 18, win_rate: 0.67, synergy: &[("p2", 0.7), ("p8", 0.8), ("p10", 0.7)] },
    DemoPlayer { id: "p7", name: "Ananya", skill: 3, position: Position::Midfielder, location: "Mumbai", availability: WEEKEND_EVENINGS, past_matches: 14, win_rate: 0.64, synergy: &[("p1", 0.8), ("p3", 0.8), ("p5", 0.6)] },
    DemoPlayer { id: "p8", name: "David", skill: 2, position: Position::Defender, location: "Mumbai", availability: WEEKEND_EVENINGS, past_matches: 9, win_rate: 0.44, synergy: &[("p4", 0.6), ("p6", 0.8), ("p10", 0.7)] },
    DemoPlayer { id: "p9", name: "Neha", skill: 3, position: Position::Defender, location: "Mumbai", availability: WEEKEND_EVENINGS, past_matches: 11, win_rate: 0.55, synergy: &[("p3", 0.7), ("p5", 0.8), ("p7", 0.6)] },
    DemoPlayer { id: "p10", name: "James", skill: 5, position: Position::Forward, location: "Mumbai", availability: WEEKEND_EVENINGS, past_matches: 22, win_rate: 0.73, synergy: &[("p2", 0.6), ("p4", 0.5), ("p6", 0.7)] },
    DemoPlayer { id: "p11", name: "Vikram", skill: 3, position: Position::Midfielder, location: "Mumbai", availability: Availability::WeekdayEvenings, past_matches: 13, win_rate: 0.62, synergy: &[] },
    DemoPlayer { id: "p12", name: "Emma", skill: 2, position: Position::Defender, location: "Delhi", availability: Availability::WeekendMornings, past_matches: 7, win_rate: 0.43, synergy: &[] },
    DemoPlayer { id: "p13", name: "Arjun", skill: 4, position: Position::Forward, location: "Bangalore", availability: Availability::Flexible, past_matches: 16, win_rate: 0.69, synergy: &[] },
    DemoPlayer { id: "p14", name: "Sophia", skill: 3, position: Position::Midfielder, location: "Chennai", availability: WEEKEND_EVENINGS, past_matches: 10, win_rate: 0.60, synergy: &[] },
    DemoPlayer { id: "p15", name: "Rahul", skill: 1, position: Position::Goalkeeper, location: "Hyderabad", availability: Availability::WeekdayEvenings, past_matches: 5, win_rate: 0.40, synergy: &[] },
];

/// Fifteen football players, twelve of them free on weekend evenings
pub fn demo_roster() -> Vec<Player> {
    DEMO_PLAYERS
        .iter()
        .map(|demo| {
            let mut player = Player::new(
                demo.id,
                demo.name,
                demo.skill,
                Some(demo.position),
                demo.location,
                demo.availability,
            );
            player.sport = Some("Football".to_string());
            player.past_matches = Some(demo.past_matches);
            player.win_rate = Some(demo.win_rate);
            for (other, value) in demo.synergy {
                player.synergy.insert((*other).to_string(), *value);
            }
            player
        })
        .collect()
}
