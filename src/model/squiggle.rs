use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize)]
pub struct GamesDocument {
    #[serde(default)]
    pub games: Vec<Game>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct Game {
    pub id: Option<i64>,
    pub year: Option<i32>,
    pub round: Option<u32>,
    pub roundname: Option<String>,
    pub hteam: Option<String>,
    pub ateam: Option<String>,
    pub venue: Option<String>,
    // Local kickoff, e.g. "2025-03-13 19:30:00"
    pub date: Option<String>,
    // Offset of `date` from UTC, e.g. "+11:00"
    pub tz: Option<String>,
}
