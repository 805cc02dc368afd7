use std::collections::HashSet;

use chrono::{NaiveDate, TimeZone, Utc};

use afl_tipping_fixtures::model::fixture::SourceTag;
use afl_tipping_fixtures::normalize::Normalizer;
use afl_tipping_fixtures::sources::{FixtureSource, GeneratedSource};

#[test]
fn same_inputs_give_same_schedule() {
    let source = GeneratedSource::new();
    assert_eq!(source.tag(), SourceTag::Generated);
    for round in [1, 7, 23, 26] {
        assert_eq!(source.fetch(2025, round), source.fetch(2025, round));
    }
}

#[test]
fn season_opens_on_a_thursday_in_mid_march() {
    assert_eq!(GeneratedSource::season_start(2025), NaiveDate::from_ymd_opt(2025, 3, 20).unwrap());
    assert_eq!(GeneratedSource::season_start(2024), NaiveDate::from_ymd_opt(2024, 3, 14).unwrap());
}

#[test]
fn every_club_plays_once_per_home_and_away_round() {
    for round in 1..=23 {
        let raw = GeneratedSource::build(2025, round);
        assert_eq!(raw.fixtures.len(), 9, "round {}", round);

        let mut clubs = HashSet::new();
        for f in &raw.fixtures {
            assert_ne!(f.home_team, f.away_team);
            assert!(clubs.insert(f.home_team.clone()), "{} twice in round {}", f.home_team, round);
            assert!(clubs.insert(f.away_team.clone()), "{} twice in round {}", f.away_team, round);
        }
        assert_eq!(clubs.len(), 18);
    }
}

#[test]
fn pairings_rotate_between_rounds() {
    let pairs = |round| -> HashSet<(String, String)> {
        GeneratedSource::build(2025, round)
            .fixtures
            .into_iter()
            .map(|f| {
                let mut pair = [f.home_team, f.away_team];
                pair.sort();
                let [a, b] = pair;
                (a, b)
            })
            .collect()
    };
    assert!(pairs(1).is_disjoint(&pairs(2)));
}

#[test]
fn finals_rounds_shrink() {
    assert_eq!(GeneratedSource::build(2025, 24).fixtures.len(), 2);
    assert_eq!(GeneratedSource::build(2025, 27).fixtures.len(), 2);
    assert_eq!(GeneratedSource::build(2025, 28).fixtures.len(), 1);
    assert_eq!(GeneratedSource::build(2025, 28).name.as_deref(), Some("Grand Final"));
}

#[test]
fn ids_are_unique_across_the_season() {
    let mut ids = HashSet::new();
    for round in 1..=28 {
        for f in GeneratedSource::build(2025, round).fixtures {
            assert!(ids.insert(f.id), "duplicate id {}", f.id);
        }
    }
}

#[test]
fn generated_round_normalizes_without_losses() {
    let normalizer = Normalizer::new();
    let normalized = normalizer.normalize_round(2025, GeneratedSource::build(2025, 1));

    assert!(normalized.dropped.is_empty());
    assert!(normalized.warnings.is_empty(), "warnings: {:?}", normalized.warnings);
    assert_eq!(normalized.round.fixtures.len(), 9);

    // Opening game: Thursday 20 March 2025, 19:30 in Melbourne (AEDT)
    let first = &normalized.round.fixtures[0];
    assert_eq!(first.id, 101);
    assert_eq!(first.scheduled_at, Utc.with_ymd_and_hms(2025, 3, 20, 8, 30, 0).unwrap());
}
