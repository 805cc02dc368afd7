use serde::{Deserialize, Serialize};

/// Override file contents: one season document or a list of them.
#[derive(Debug, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OverrideFile {
    Many(Vec<OverrideSeason>),
    One(OverrideSeason),
}

impl OverrideFile {
    pub fn season(&self, year: i32) -> Option<&OverrideSeason> {
        match self {
            OverrideFile::One(s) => (s.season == year).then_some(s),
            OverrideFile::Many(all) => all.iter().find(|s| s.season == year),
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct OverrideSeason {
    pub season: i32,
    #[serde(default)]
    pub rounds: Vec<OverrideRound>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct OverrideRound {
    pub number: u32,
    pub name: String,
    pub fixtures: Vec<OverrideFixture>,
}

/// Date is `YYYY-MM-DD`, time is local 24h `HH:MM` at the venue.
#[derive(Debug, Serialize, Deserialize)]
pub struct OverrideFixture {
    pub id: i64,
    pub home_team: String,
    pub away_team: String,
    pub venue: String,
    pub date: String,
    pub time: String,
}
