use std::sync::Arc;

use lambda_runtime::{Error, LambdaEvent};
use serde::{Deserialize, Serialize};
use tracing::{error, info, instrument};

use crate::calendar::season_calendar;
use crate::model::fixture::Season;
use crate::resolver::{FixtureResolver, Resolution};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Format {
    #[default]
    Json,
    Ical,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Request {
    pub year: i32,
    #[serde(default)]
    pub rounds: Vec<u32>,
    #[serde(default)]
    pub format: Format,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Response {
    pub rounds: Vec<Resolution>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub calendar: Option<String>,
}

#[instrument(skip(resolver, event))]
pub async fn handler(resolver: Arc<FixtureResolver>, event: LambdaEvent<Request>) -> Result<Response, Error> {
    respond(resolver, event.payload).await
}

/// Resolve every requested round, one blocking task per round.
pub async fn respond(resolver: Arc<FixtureResolver>, request: Request) -> Result<Response, Error> {
    // Default to the opening round when no rounds are named
    let mut rounds = if request.rounds.is_empty() { vec![1] } else { request.rounds.clone() };
    rounds.sort_unstable();
    rounds.dedup();

    let mut handles = Vec::with_capacity(rounds.len());
    for round in rounds {
        // Each blocking task must own its handle on the resolver
        let resolver = Arc::clone(&resolver);
        let year = request.year;
        handles.push(tokio::task::spawn_blocking(move || resolver.resolve(year, round)));
    }

    let mut resolutions: Vec<Resolution> = Vec::with_capacity(handles.len());
    for h in handles {
        match h.await {
            Ok(Ok(resolution)) => resolutions.push(resolution),
            Ok(Err(e)) => {
                error!(error = %e, "Round resolution failed");
                return Err(e.into());
            }
            Err(e) => {
                error!(error = %e, "Resolution task join error");
                return Err(e.into());
            }
        }
    }

    for r in &resolutions {
        info!(year = request.year, round = r.round.number, source = %r.source, fixtures = r.round.fixtures.len(), "Prepared round");
    }

    let calendar = match request.format {
        Format::Json => None,
        Format::Ical => {
            let mut season = Season::new(request.year);
            for r in &resolutions {
                season.insert(r.round.clone());
            }
            Some(season_calendar(&season))
        }
    };

    Ok(Response { rounds: resolutions, calendar })
}
