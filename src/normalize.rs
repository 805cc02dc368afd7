//! Canonical team/venue vocabulary and kickoff parsing shared by every fixture source.
//!
//! Sources spell clubs and grounds however they like ("GWS", "Greater Western Sydney",
//! "M.C.G.", "Docklands"). Everything is folded onto one vocabulary here, and all
//! kickoff text is turned into a UTC instant using the venue's local zone.

use std::collections::{HashMap, HashSet};

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Utc};
use chrono_tz::Australia;
use chrono_tz::Tz;
use tracing::warn;

use crate::model::fixture::{round_name, Fixture, Round};
use crate::model::raw::RawRound;

/// Canonical club names and the spellings seen for them.
const TEAMS: &[(&str, &[&str])] = &[
    ("Adelaide", &["adelaide crows", "crows", "adel", "ade"]),
    ("Brisbane", &["brisbane lions", "lions", "bris", "bri", "brisbane bears"]),
    ("Carlton", &["carlton blues", "blues", "carl", "car"]),
    ("Collingwood", &["collingwood magpies", "magpies", "pies", "coll", "col"]),
    ("Essendon", &["essendon bombers", "bombers", "ess"]),
    ("Fremantle", &["fremantle dockers", "dockers", "freo", "fre"]),
    ("Geelong", &["geelong cats", "cats", "geel", "gee"]),
    ("Gold Coast", &["gold coast suns", "suns", "gcfc", "gcs", "gc"]),
    ("GWS Giants", &["gws", "greater western sydney", "greater western sydney giants", "giants"]),
    ("Hawthorn", &["hawthorn hawks", "hawks", "haw"]),
    ("Melbourne", &["melbourne demons", "demons", "melb", "mel"]),
    ("North Melbourne", &["north melbourne kangaroos", "kangaroos", "north", "nmfc", "nm"]),
    ("Port Adelaide", &["port adelaide power", "power", "port", "pa"]),
    ("Richmond", &["richmond tigers", "tigers", "rich", "ric"]),
    ("St Kilda", &["st kilda saints", "saint kilda", "saints", "stk"]),
    ("Sydney", &["sydney swans", "swans", "syd"]),
    ("West Coast", &["west coast eagles", "eagles", "wce", "wc"]),
    ("Western Bulldogs", &["bulldogs", "footscray", "dogs", "wbd", "wb"]),
];

/// Canonical grounds, their local zone, and the spellings seen for them.
const VENUES: &[(&str, Tz, &[&str])] = &[
    ("MCG", Australia::Melbourne, &["m c g", "melbourne cricket ground"]),
    ("Marvel Stadium", Australia::Melbourne, &["docklands", "etihad stadium", "telstra dome"]),
    ("GMHBA Stadium", Australia::Melbourne, &["kardinia park", "simonds stadium"]),
    ("Mars Stadium", Australia::Melbourne, &["eureka stadium"]),
    ("Adelaide Oval", Australia::Adelaide, &[]),
    ("Norwood Oval", Australia::Adelaide, &[]),
    ("Barossa Park", Australia::Adelaide, &["barossa oval"]),
    ("Gabba", Australia::Brisbane, &["the gabba", "brisbane cricket ground"]),
    ("People First Stadium", Australia::Brisbane, &["carrara", "heritage bank stadium", "metricon stadium"]),
    ("SCG", Australia::Sydney, &["s c g", "sydney cricket ground"]),
    ("ENGIE Stadium", Australia::Sydney, &["sydney showground", "giants stadium", "gws giants stadium"]),
    ("Accor Stadium", Australia::Sydney, &["stadium australia"]),
    ("Manuka Oval", Australia::Sydney, &["manuka", "corroboree group oval manuka"]),
    ("Optus Stadium", Australia::Perth, &["perth stadium"]),
    ("UTAS Stadium", Australia::Hobart, &["york park", "university of tasmania stadium"]),
    ("Ninja Stadium", Australia::Hobart, &["bellerive oval", "blundstone arena"]),
    ("TIO Stadium", Australia::Darwin, &["marrara oval"]),
    ("TIO Traeger Park", Australia::Darwin, &["traeger park"]),
];

/// Zone used for kickoffs at grounds outside the vocabulary.
pub const DEFAULT_TZ: Tz = Australia::Melbourne;

const DATE_TIME_FORMATS: &[&str] = &["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M", "%Y-%m-%dT%H:%M"];
const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%d %b %Y", "%d %B %Y", "%d/%m/%Y"];
const TIME_FORMATS: &[&str] = &["%H:%M", "%H:%M:%S", "%I:%M %p", "%I:%M%p", "%I:%M:%S %p"];

/// Result of a vocabulary lookup.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Canonical {
    Known(&'static str),
    /// Not in the vocabulary; the trimmed input is kept as-is.
    Unrecognized(String),
}

impl Canonical {
    pub fn as_str(&self) -> &str {
        match self {
            Canonical::Known(name) => name,
            Canonical::Unrecognized(raw) => raw.as_str(),
        }
    }

    pub fn is_known(&self) -> bool {
        matches!(self, Canonical::Known(_))
    }

    pub fn into_string(self) -> String {
        match self {
            Canonical::Known(name) => name.to_string(),
            Canonical::Unrecognized(raw) => raw,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NameKind {
    Team,
    Venue,
}

/// A name that passed through without a canonical match.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NameWarning {
    pub kind: NameKind,
    pub raw: String,
}

/// A fixture left out of its round, and why.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DroppedFixture {
    pub id: i64,
    pub reason: String,
}

#[derive(Clone, Debug)]
pub struct NormalizedRound {
    pub round: Round,
    pub warnings: Vec<NameWarning>,
    pub dropped: Vec<DroppedFixture>,
}

#[derive(Debug)]
pub struct Normalizer {
    teams: HashMap<String, &'static str>,
    venues: HashMap<String, (&'static str, Tz)>,
}

impl Default for Normalizer {
    fn default() -> Self {
        Self::new()
    }
}

impl Normalizer {
    pub fn new() -> Self {
        let mut teams = HashMap::new();
        for (canonical, aliases) in TEAMS {
            teams.insert(lookup_key(canonical), *canonical);
            for alias in aliases.iter() {
                teams.insert(lookup_key(alias), *canonical);
            }
        }

        let mut venues = HashMap::new();
        for (canonical, tz, aliases) in VENUES {
            venues.insert(lookup_key(canonical), (*canonical, *tz));
            for alias in aliases.iter() {
                venues.insert(lookup_key(alias), (*canonical, *tz));
            }
        }

        Normalizer { teams, venues }
    }

    pub fn team(&self, raw: &str) -> Canonical {
        match self.teams.get(&lookup_key(raw)) {
            Some(name) => Canonical::Known(*name),
            None => Canonical::Unrecognized(raw.trim().to_string()),
        }
    }

    /// Canonical venue plus the zone its local kickoff times are expressed in.
    pub fn venue(&self, raw: &str) -> (Canonical, Tz) {
        match self.venues.get(&lookup_key(raw)) {
            Some((name, tz)) => (Canonical::Known(*name), *tz),
            None => (Canonical::Unrecognized(raw.trim().to_string()), DEFAULT_TZ),
        }
    }

    /// Canonicalize every fixture of a source round.
    ///
    /// Fixtures that cannot be placed (unparseable kickoff, missing or identical teams,
    /// duplicate id) are dropped and reported; the rest of the round survives.
    pub fn normalize_round(&self, season: i32, raw: RawRound) -> NormalizedRound {
        let name = raw
            .name
            .filter(|n| !n.trim().is_empty())
            .unwrap_or_else(|| round_name(raw.number));

        let mut warnings: Vec<NameWarning> = Vec::new();
        let mut dropped: Vec<DroppedFixture> = Vec::new();
        let mut seen_ids: HashSet<i64> = HashSet::new();
        let mut fixtures: Vec<Fixture> = Vec::with_capacity(raw.fixtures.len());

        for rf in raw.fixtures {
            let unplaceable = |reason: String| {
                warn!(season, round = raw.number, fixture_id = rf.id, reason = %reason, "Dropping fixture");
                DroppedFixture { id: rf.id, reason }
            };

            if rf.home_team.trim().is_empty() || rf.away_team.trim().is_empty() {
                dropped.push(unplaceable("missing team name".to_string()));
                continue;
            }
            if seen_ids.contains(&rf.id) {
                dropped.push(unplaceable(format!("duplicate fixture id {}", rf.id)));
                continue;
            }

            let home = self.team(&rf.home_team);
            let away = self.team(&rf.away_team);
            if home.as_str() == away.as_str() {
                dropped.push(unplaceable(format!("{} cannot play itself", home.as_str())));
                continue;
            }
            let (venue, tz) = self.venue(&rf.venue);

            let scheduled_at = match parse_kickoff(&rf.date, rf.time.as_deref(), rf.utc_offset.as_deref(), tz) {
                Ok(dt) => dt,
                Err(reason) => {
                    dropped.push(unplaceable(reason));
                    continue;
                }
            };

            for (kind, canonical) in [(NameKind::Team, &home), (NameKind::Team, &away), (NameKind::Venue, &venue)] {
                if !canonical.is_known() && !warnings.iter().any(|w| w.kind == kind && w.raw == canonical.as_str()) {
                    warn!(season, round = raw.number, kind = ?kind, raw = %canonical.as_str(), "Unrecognized name passed through");
                    warnings.push(NameWarning { kind, raw: canonical.as_str().to_string() });
                }
            }

            seen_ids.insert(rf.id);
            fixtures.push(Fixture {
                id: rf.id,
                round_number: raw.number,
                round_name: name.clone(),
                home_team: home.into_string(),
                away_team: away.into_string(),
                venue: venue.into_string(),
                scheduled_at,
            });
        }

        NormalizedRound { round: Round::new(season, raw.number, name, fixtures), warnings, dropped }
    }
}

/// Lowercase, punctuation to spaces, whitespace collapsed.
pub fn lookup_key(raw: &str) -> String {
    let spaced: String = raw
        .chars()
        .map(|c| if c.is_alphanumeric() { c.to_ascii_lowercase() } else { ' ' })
        .collect();
    spaced.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Parse kickoff text into UTC.
///
/// With `time` absent, `date` must carry both parts (RFC 3339 or ISO date-time).
/// Naive times are read in `utc_offset` when given, otherwise in `tz`.
pub fn parse_kickoff(
    date: &str,
    time: Option<&str>,
    utc_offset: Option<&str>,
    tz: Tz,
) -> Result<DateTime<Utc>, String> {
    let date = date.trim();
    let naive = match time.map(str::trim).filter(|t| !t.is_empty()) {
        Some(time) => {
            let d = parse_date(date).ok_or_else(|| format!("unrecognized date '{}'", date))?;
            let t = parse_time(time).ok_or_else(|| format!("unrecognized time '{}'", time))?;
            d.and_time(t)
        }
        None => {
            if let Ok(dt) = DateTime::parse_from_rfc3339(date) {
                return Ok(dt.with_timezone(&Utc));
            }
            DATE_TIME_FORMATS
                .iter()
                .find_map(|fmt| NaiveDateTime::parse_from_str(date, fmt).ok())
                .ok_or_else(|| format!("unrecognized date-time '{}'", date))?
        }
    };

    if let Some(raw) = utc_offset.map(str::trim).filter(|s| !s.is_empty()) {
        let offset = parse_offset(raw).ok_or_else(|| format!("unrecognized UTC offset '{}'", raw))?;
        return offset
            .from_local_datetime(&naive)
            .single()
            .map(|dt| dt.with_timezone(&Utc))
            .ok_or_else(|| format!("{} is not representable at {}", naive, raw));
    }

    tz.from_local_datetime(&naive)
        .earliest()
        .map(|dt| dt.with_timezone(&Utc))
        .ok_or_else(|| format!("{} does not exist in {}", naive, tz))
}

fn parse_date(s: &str) -> Option<NaiveDate> {
    DATE_FORMATS.iter().find_map(|fmt| NaiveDate::parse_from_str(s, fmt).ok())
}

fn parse_time(s: &str) -> Option<NaiveTime> {
    TIME_FORMATS.iter().find_map(|fmt| NaiveTime::parse_from_str(s, fmt).ok())
}

/// Accepts "+11:00", "+1100" and "+11". Anything else is `None`.
fn parse_offset(raw: &str) -> Option<FixedOffset> {
    let (sign, rest) = match raw.as_bytes().first()? {
        b'+' => (1, raw.get(1..)?),
        b'-' => (-1, raw.get(1..)?),
        _ => return None,
    };
    let (hours, minutes) = match rest.split_once(':') {
        Some((h, m)) => (h, m),
        None if rest.len() == 4 => (rest.get(..2)?, rest.get(2..)?),
        None => (rest, "00"),
    };
    let hours = offset_field(hours, 23)?;
    let minutes = offset_field(minutes, 59)?;
    FixedOffset::east_opt(sign * (hours * 3600 + minutes * 60))
}

/// One or two ASCII digits no greater than `max`.
fn offset_field(s: &str, max: i32) -> Option<i32> {
    if s.is_empty() || s.len() > 2 || !s.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    s.parse::<i32>().ok().filter(|n| *n <= max)
}
