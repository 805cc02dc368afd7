/// Round as produced by a source, before names and kickoff text are normalized.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RawRound {
    pub number: u32,
    pub name: Option<String>,
    pub fixtures: Vec<RawFixture>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RawFixture {
    pub id: i64,
    pub home_team: String,
    pub away_team: String,
    pub venue: String,
    // Either a full date-time string or just the date when `time` is set
    pub date: String,
    pub time: Option<String>,
    // Explicit offset such as "+11:00"; otherwise the venue's zone applies
    pub utc_offset: Option<String>,
}
