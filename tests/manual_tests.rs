use std::io::Write;

use afl_tipping_fixtures::model::fixture::SourceTag;
use afl_tipping_fixtures::sources::{FixtureSource, ManualSource, SourceFailure};

const SEASON_2025: &str = r#"{
  "season": 2025,
  "rounds": [
    {
      "number": 1,
      "name": "Round 1",
      "fixtures": [
        {"id": 1, "home_team": "Richmond", "away_team": "Carlton", "venue": "MCG", "date": "2025-03-13", "time": "19:30"}
      ]
    }
  ]
}"#;

fn write_override(contents: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().expect("temp file");
    file.write_all(contents.as_bytes()).expect("write override");
    file
}

#[test]
fn returns_round_present_in_file() {
    let file = write_override(SEASON_2025);
    let source = ManualSource::new(file.path());
    assert_eq!(source.tag(), SourceTag::Manual);

    let raw = source.fetch(2025, 1).expect("round present");
    assert_eq!(raw.number, 1);
    assert_eq!(raw.name.as_deref(), Some("Round 1"));
    assert_eq!(raw.fixtures.len(), 1);

    let f = &raw.fixtures[0];
    assert_eq!((f.id, f.home_team.as_str(), f.away_team.as_str()), (1, "Richmond", "Carlton"));
    assert_eq!(f.date, "2025-03-13");
    assert_eq!(f.time.as_deref(), Some("19:30"));
}

#[test]
fn absent_season_or_round_is_absent_not_error() {
    let file = write_override(SEASON_2025);
    let source = ManualSource::new(file.path());
    assert_eq!(source.fetch(2025, 2), Err(SourceFailure::Absent));
    assert_eq!(source.fetch(2024, 1), Err(SourceFailure::Absent));
}

#[test]
fn missing_file_is_absent() {
    let dir = tempfile::tempdir().expect("temp dir");
    let source = ManualSource::new(dir.path().join("overrides.json"));
    assert_eq!(source.fetch(2025, 1), Err(SourceFailure::Absent));
}

#[test]
fn structurally_invalid_file_is_malformed() {
    // Fixture without a venue
    let file = write_override(
        r#"{"season": 2025, "rounds": [{"number": 1, "name": "Round 1", "fixtures": [
            {"id": 1, "home_team": "Richmond", "away_team": "Carlton", "date": "2025-03-13", "time": "19:30"}
        ]}]}"#,
    );
    let err = ManualSource::new(file.path()).fetch(2025, 1).unwrap_err();
    assert!(matches!(err, SourceFailure::Malformed { .. }), "got {:?}", err);

    let file = write_override("season: 2025");
    let err = ManualSource::new(file.path()).fetch(2025, 1).unwrap_err();
    assert!(matches!(err, SourceFailure::Malformed { .. }), "got {:?}", err);
}

#[test]
fn file_may_hold_several_seasons() {
    let body = format!(
        r#"[{}, {{"season": 2024, "rounds": [{{"number": 3, "name": "Round 3", "fixtures": [
            {{"id": 30, "home_team": "Sydney", "away_team": "GWS", "venue": "SCG", "date": "2024-03-30", "time": "16:35"}}
        ]}}]}}]"#,
        SEASON_2025
    );
    let raw = ManualSource::from_json(&body, 2024, 3).expect("2024 round 3 present");
    assert_eq!(raw.fixtures[0].away_team, "GWS");

    let raw = ManualSource::from_json(&body, 2025, 1).expect("2025 round 1 present");
    assert_eq!(raw.fixtures[0].id, 1);
}
