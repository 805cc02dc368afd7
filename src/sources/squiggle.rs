use std::time::Duration;

use tracing::{error, info, info_span, instrument};

use crate::model::fixture::SourceTag;
use crate::model::raw::{RawFixture, RawRound};
use crate::model::squiggle::{Game, GamesDocument};
use crate::sources::{FixtureSource, SourceFailure};

/// Client for the Squiggle public games API.
pub struct SquiggleSource {
    base_url: String,
    // Squiggle rejects requests without a descriptive User-Agent
    user_agent: String,
    agent: ureq::Agent,
}

impl SquiggleSource {
    pub fn new(base_url: impl Into<String>, user_agent: impl Into<String>, timeout: Duration) -> Self {
        let config = ureq::Agent::config_builder()
            .timeout_global(Some(timeout))
            // Status codes are checked by hand so the body can be logged
            .http_status_as_error(false)
            .build();
        Self { base_url: base_url.into(), user_agent: user_agent.into(), agent: config.into() }
    }

    pub fn games_url(&self, season: i32, round: u32) -> String {
        format!("{}?q=games&year={}&round={}", self.base_url, season, round)
    }

    /// Map a raw games response body onto the requested round (no network).
    pub fn map_games(body: &str, season: i32, round: u32) -> Result<RawRound, SourceFailure> {
        let doc = Self::deserialize_games(body)
            .map_err(|e| SourceFailure::malformed(format!("Failed to deserialize games document: {}", e)))?;

        let games: Vec<&Game> = doc
            .games
            .iter()
            .filter(|g| g.round == Some(round) && g.year.is_none_or(|y| y == season))
            .collect();
        if games.is_empty() {
            return Err(SourceFailure::unavailable(format!(
                "response holds {} games but none for {} round {}",
                doc.games.len(),
                season,
                round
            )));
        }

        let name = games.iter().find_map(|g| g.roundname.clone());
        let fixtures = games
            .iter()
            .enumerate()
            .map(|(idx, g)| RawFixture {
                // Feed omitted the id: number by round and position so ids stay unique per season
                id: g.id.unwrap_or(round as i64 * 100 + idx as i64 + 1),
                home_team: g.hteam.clone().unwrap_or_default(),
                away_team: g.ateam.clone().unwrap_or_default(),
                venue: g.venue.clone().unwrap_or_else(|| "TBA".to_string()),
                date: g.date.clone().unwrap_or_default(),
                time: None,
                utc_offset: g.tz.clone(),
            })
            .collect();

        Ok(RawRound { number: round, name, fixtures })
    }

    #[instrument(level = "info", skip(body), fields(bytes = body.len()))]
    fn deserialize_games(body: &str) -> Result<GamesDocument, serde_json::Error> {
        serde_json::from_str::<GamesDocument>(body)
    }
}

impl FixtureSource for SquiggleSource {
    fn tag(&self) -> SourceTag {
        SourceTag::Live
    }

    #[instrument(level = "info", skip(self))]
    fn fetch(&self, season: i32, round: u32) -> Result<RawRound, SourceFailure> {
        let url = self.games_url(season, round);
        let response_result = {
            let _span = info_span!("squiggle_fetch", url = %url).entered();
            self.agent.get(&url).header("User-Agent", self.user_agent.as_str()).call()
        };
        match response_result {
            Ok(response) => {
                let code = response.status().as_u16();
                let mut body_reader = response.into_body();
                match body_reader.read_to_string() {
                    Ok(body) => {
                        if !(200..300).contains(&code) {
                            error!(status = code, body = %body, "Squiggle returned non-success status");
                            return Err(SourceFailure::unavailable(format!("HTTP status {}", code)));
                        }
                        let round_data = Self::map_games(&body, season, round)?;
                        info!(fixtures = round_data.fixtures.len(), "Fetched round from Squiggle");
                        Ok(round_data)
                    }
                    Err(e) => {
                        error!(error = %e, "Failed to read Squiggle response body");
                        Err(SourceFailure::unavailable(format!("Failed to read response body: {}", e)))
                    }
                }
            }
            Err(ureq::Error::Timeout(which)) => {
                error!(timeout = ?which, url = %url, "Squiggle request timed out");
                Err(SourceFailure::unavailable(format!("request timed out ({:?})", which)))
            }
            Err(e) => {
                error!(error = %e, url = %url, "Squiggle request failed");
                Err(SourceFailure::unavailable(format!("Request failed: {}", e)))
            }
        }
    }
}
