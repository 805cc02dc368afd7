use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tracing::{debug, error, instrument};

use crate::model::fixture::SourceTag;
use crate::model::overrides::OverrideFile;
use crate::model::raw::{RawFixture, RawRound};
use crate::sources::{FixtureSource, SourceFailure};

/// Hand-curated fixtures read from a JSON file. The file is re-read on every fetch
/// so edits take effect on the next cache miss.
#[derive(Debug, Clone)]
pub struct ManualSource {
    path: PathBuf,
}

impl ManualSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Look a round up in override JSON that is already in memory.
    pub fn from_json(body: &str, season: i32, round: u32) -> Result<RawRound, SourceFailure> {
        let doc = serde_json::from_str::<OverrideFile>(body)
            .map_err(|e| SourceFailure::malformed(format!("override file does not parse: {}", e)))?;

        let entry = doc
            .season(season)
            .and_then(|s| s.rounds.iter().find(|r| r.number == round))
            .ok_or(SourceFailure::Absent)?;

        let fixtures = entry
            .fixtures
            .iter()
            .map(|f| RawFixture {
                id: f.id,
                home_team: f.home_team.clone(),
                away_team: f.away_team.clone(),
                venue: f.venue.clone(),
                date: f.date.clone(),
                time: Some(f.time.clone()),
                utc_offset: None,
            })
            .collect();

        Ok(RawRound { number: entry.number, name: Some(entry.name.clone()), fixtures })
    }
}

impl FixtureSource for ManualSource {
    fn tag(&self) -> SourceTag {
        SourceTag::Manual
    }

    #[instrument(level = "info", skip(self), fields(path = %self.path.display()))]
    fn fetch(&self, season: i32, round: u32) -> Result<RawRound, SourceFailure> {
        let body = match std::fs::read_to_string(&self.path) {
            Ok(body) => body,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!("No override file present");
                return Err(SourceFailure::Absent);
            }
            Err(e) => {
                error!(error = %e, "Failed to read override file");
                return Err(SourceFailure::unavailable(format!("cannot read {}: {}", self.path.display(), e)));
            }
        };
        Self::from_json(&body, season, round)
    }
}
