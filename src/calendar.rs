use chrono::Duration;
use icalendar::{Calendar, Component, Event, EventLike};

use crate::model::fixture::{Fixture, Round, Season};

/// Length of the calendar slot booked for each match.
pub const MATCH_LENGTH_MINUTES: i64 = 180;

/// Stable event UID: fixture ids are unique within a season.
pub fn fixture_uid(season: i32, fixture: &Fixture) -> String {
    format!("{}-{}@afl-tipping", season, fixture.id)
}

fn fixture_event(season: i32, fixture: &Fixture) -> Event {
    Event::new()
        .uid(&fixture_uid(season, fixture))
        .summary(&format!("{} vs {}", fixture.home_team, fixture.away_team))
        .location(&fixture.venue)
        .description(&format!("AFL {} {}", season, fixture.round_name))
        .starts(fixture.scheduled_at)
        .ends(fixture.scheduled_at + Duration::minutes(MATCH_LENGTH_MINUTES))
        .done()
}

/// Render one round as an iCalendar document.
pub fn round_calendar(round: &Round) -> String {
    let mut calendar = Calendar::new();
    calendar.name(&format!("AFL {} {}", round.season, round.name));
    for fixture in &round.fixtures {
        calendar.push(fixture_event(round.season, fixture));
    }
    calendar.done().to_string()
}

/// Render every round of a season, in round order, as one iCalendar document.
pub fn season_calendar(season: &Season) -> String {
    let mut calendar = Calendar::new();
    calendar.name(&format!("AFL {} fixtures", season.year));
    for round in &season.rounds {
        for fixture in &round.fixtures {
            calendar.push(fixture_event(season.year, fixture));
        }
    }
    calendar.done().to_string()
}
