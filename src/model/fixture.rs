use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One scheduled match, fully normalized.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Fixture {
    pub id: i64,
    pub round_number: u32,
    pub round_name: String,
    pub home_team: String,
    pub away_team: String,
    pub venue: String,
    pub scheduled_at: DateTime<Utc>,
}

/// Fixtures of one season sharing a round number, ordered by kickoff then id.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Round {
    pub season: i32,
    pub number: u32,
    pub name: String,
    pub fixtures: Vec<Fixture>,
}

impl Round {
    /// Build a round, restoring kickoff order (ties broken by id).
    pub fn new(season: i32, number: u32, name: String, mut fixtures: Vec<Fixture>) -> Self {
        fixtures.sort_by_key(|f| (f.scheduled_at, f.id));
        Round { season, number, name, fixtures }
    }

    pub fn is_empty(&self) -> bool {
        self.fixtures.is_empty()
    }
}

/// A season's rounds, kept in ascending round order.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Season {
    pub year: i32,
    pub rounds: Vec<Round>,
}

impl Season {
    pub fn new(year: i32) -> Self {
        Season { year, rounds: Vec::new() }
    }

    /// Insert a round, replacing any existing round with the same number.
    pub fn insert(&mut self, round: Round) {
        match self.rounds.binary_search_by_key(&round.number, |r| r.number) {
            Ok(idx) => self.rounds[idx] = round,
            Err(idx) => self.rounds.insert(idx, round),
        }
    }

    pub fn round(&self, number: u32) -> Option<&Round> {
        self.rounds
            .binary_search_by_key(&number, |r| r.number)
            .ok()
            .map(|idx| &self.rounds[idx])
    }
}

/// Which source ultimately produced a returned round.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceTag {
    Manual,
    Live,
    Generated,
    Stale,
}

impl SourceTag {
    pub fn as_str(&self) -> &'static str {
        match self {
            SourceTag::Manual => "manual",
            SourceTag::Live => "live",
            SourceTag::Generated => "generated",
            SourceTag::Stale => "stale",
        }
    }

    /// Real data came from a curated or live schedule, not a synthesized one.
    pub fn is_real(&self) -> bool {
        matches!(self, SourceTag::Manual | SourceTag::Live)
    }
}

impl fmt::Display for SourceTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Display name for a round number. Numbers past the home-and-away season are finals.
pub fn round_name(number: u32) -> String {
    match number {
        0..=23 => format!("Round {}", number),
        24 => "Elimination Finals".to_string(),
        25 => "Qualifying Finals".to_string(),
        26 => "Semi Finals".to_string(),
        27 => "Preliminary Finals".to_string(),
        28 => "Grand Final".to_string(),
        n => format!("Finals Week {}", n - 23),
    }
}
