use chrono::{Duration, TimeDelta, TimeZone, Utc};

use afl_tipping_fixtures::cache::{CacheKey, FixtureCache};
use afl_tipping_fixtures::model::fixture::{Round, SourceTag};

fn round(season: i32, number: u32, name: &str) -> Round {
    Round::new(season, number, name.to_string(), Vec::new())
}

#[test]
fn entry_is_fresh_until_ttl_elapses() {
    let cache = FixtureCache::default();
    assert_eq!(cache.ttl(), TimeDelta::hours(12));

    let key = CacheKey::new(2025, 1);
    let t0 = Utc.with_ymd_and_hms(2025, 3, 1, 0, 0, 0).unwrap();
    assert!(cache.get(key, t0).is_none());
    assert!(cache.put(key, round(2025, 1, "Round 1"), SourceTag::Live, t0));

    let hit = cache.get(key, t0 + Duration::hours(11) + Duration::minutes(59)).expect("hit");
    assert!(hit.fresh);
    assert_eq!(hit.entry.source, SourceTag::Live);

    // Exactly 12 hours old is no longer fresh, but still returned
    let hit = cache.get(key, t0 + Duration::hours(12)).expect("stale hit");
    assert!(!hit.fresh);
    assert_eq!(hit.entry.fetched_at, t0);
}

#[test]
fn older_write_never_clobbers_newer_entry() {
    let cache = FixtureCache::new(TimeDelta::hours(12));
    let key = CacheKey::new(2025, 4);
    let newer = Utc.with_ymd_and_hms(2025, 4, 1, 12, 0, 0).unwrap();
    let older = newer - Duration::minutes(5);

    assert!(cache.put(key, round(2025, 4, "newer"), SourceTag::Live, newer));
    assert!(!cache.put(key, round(2025, 4, "older"), SourceTag::Generated, older));

    let hit = cache.get(key, newer).expect("hit");
    assert_eq!(hit.entry.round.name, "newer");
    assert_eq!(hit.entry.source, SourceTag::Live);
}

#[test]
fn newer_write_overwrites_even_from_lower_priority_source() {
    let cache = FixtureCache::default();
    let key = CacheKey::new(2025, 4);
    let t0 = Utc.with_ymd_and_hms(2025, 4, 1, 0, 0, 0).unwrap();

    cache.put(key, round(2025, 4, "manual"), SourceTag::Manual, t0);
    assert!(cache.put(key, round(2025, 4, "generated"), SourceTag::Generated, t0 + Duration::hours(13)));

    let hit = cache.get(key, t0 + Duration::hours(13)).expect("hit");
    assert_eq!(hit.entry.source, SourceTag::Generated);
    assert_eq!(hit.entry.round.name, "generated");
    assert_eq!(cache.len(), 1);
}

#[test]
fn keys_are_independent() {
    let cache = FixtureCache::default();
    let t0 = Utc.with_ymd_and_hms(2025, 4, 1, 0, 0, 0).unwrap();
    cache.put(CacheKey::new(2025, 1), round(2025, 1, "Round 1"), SourceTag::Manual, t0);
    cache.put(CacheKey::new(2024, 1), round(2024, 1, "Round 1"), SourceTag::Live, t0);

    assert_eq!(cache.len(), 2);
    assert_eq!(cache.get(CacheKey::new(2024, 1), t0).expect("hit").entry.source, SourceTag::Live);
    assert!(cache.get(CacheKey::new(2025, 2), t0).is_none());
}
