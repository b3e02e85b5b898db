//! Integration tests for the ingestion pipeline
//!
//! These tests exercise the complete payload-to-parquet workflow with
//! realistic match feeds: normalization into the four tables, accumulation
//! across matches, and replacement on re-ingestion, all against a store on
//! disk.

use opta_processor::pipeline::ingest_match;
use opta_processor::{AccumulationStore, FeedError, MatchFeed, Result, TableKind};
use polars::prelude::{AnyValue, DataType, TimeUnit};
use serde_json::{Value, json};
use std::path::Path;
use tempfile::TempDir;

/// Build a realistic full-time payload for a Premier League opening-day
/// match: four events carrying five qualifiers, and three lineup players.
fn arsenal_wolves_payload(match_id: &str) -> Value {
    json!({
        "matchInfo": {
            "id": match_id,
            "localDate": "2024-08-17",
            "localTime": "15:00:00",
            "week": "1",
            "competition": {
                "id": "2kwbbcootiqqgmrzs6o5inle5",
                "name": "Premier League",
                "competitionCode": "EPL"
            },
            "tournamentCalendar": {"name": "2024/2025"},
            "contestant": [
                {"id": "t-ars", "name": "Arsenal", "position": "home"},
                {"id": "t-wol", "name": "Wolves", "position": "away"}
            ],
            "venue": {"shortName": "Emirates Stadium"}
        },
        "liveData": {
            "matchDetails": {
                "winner": "home",
                "matchStatus": "Played",
                "scores": {"total": {"home": 2, "away": 0}}
            },
            "event": [
                {
                    "id": 2659990771u64, "typeId": 1, "periodId": 1,
                    "timeMin": 0, "timeSec": 1,
                    "contestantId": "t-ars", "playerId": "p-rice",
                    "playerName": "D. Rice", "outcome": 1,
                    "x": 50.1, "y": 48.7,
                    "timeStamp": "2024-08-17T14:00:01.776Z",
                    "qualifier": [
                        {"qualifierId": 140, "value": "65.2"},
                        {"qualifierId": 141, "value": "44.1"}
                    ]
                },
                {
                    "id": 2659990773u64, "typeId": 1, "periodId": 1,
                    "timeMin": 3, "timeSec": 42,
                    "contestantId": "t-wol", "playerId": "p-cunha",
                    "playerName": "M. Cunha", "outcome": 0,
                    "x": 38.4, "y": 21.0,
                    "timeStamp": "2024-08-17T14:03:42.021Z",
                    "qualifier": [
                        {"qualifierId": 1},
                        {"qualifierId": 140, "value": "30.0"}
                    ]
                },
                {
                    "id": 2659990800u64, "typeId": 16, "periodId": 1,
                    "timeMin": 25, "timeSec": 14,
                    "contestantId": "t-ars", "playerId": "p-havertz",
                    "playerName": "K. Havertz", "outcome": 1,
                    "x": 94.3, "y": 52.8,
                    "timeStamp": "2024-08-17T14:25:14.554Z"
                },
                {
                    "id": 2659990950u64, "typeId": 1, "periodId": 2,
                    "timeMin": 61, "timeSec": 5,
                    "contestantId": "t-ars", "playerId": "p-saka",
                    "playerName": "B. Saka", "outcome": 1,
                    "x": 71.9, "y": 88.2,
                    "timeStamp": "2024-08-17T15:16:05.102Z",
                    "qualifier": [{"qualifierId": 1, "value": "1"}]
                }
            ],
            "lineUp": [
                {
                    "contestantId": "t-ars",
                    "player": [
                        {
                            "playerId": "p-rice", "matchName": "D. Rice",
                            "shirtNumber": 41, "position": "Midfielder",
                            "stat": [
                                {"type": "minsPlayed", "value": "90"},
                                {"type": "goals", "value": "0"},
                                {"type": "touches", "value": "84"}
                            ]
                        },
                        {
                            "playerId": "p-havertz", "matchName": "K. Havertz",
                            "shirtNumber": 29, "position": "Striker",
                            "stat": [
                                {"type": "minsPlayed", "value": "90"},
                                {"type": "goals", "value": "1"},
                                {"type": "touches", "value": "41"}
                            ]
                        }
                    ]
                },
                {
                    "contestantId": "t-wol",
                    "player": [
                        {
                            "playerId": "p-cunha", "matchName": "M. Cunha",
                            "shirtNumber": 10, "position": "Striker",
                            "stat": [
                                {"type": "minsPlayed", "value": "88"},
                                {"type": "goals", "value": "0"},
                                {"type": "touches", "value": "37"}
                            ]
                        }
                    ]
                }
            ]
        }
    })
}

/// A second match whose keeper stats introduce a column the first match
/// never produced.
fn everton_brighton_payload() -> Value {
    json!({
        "matchInfo": {
            "id": "match-eve-bha",
            "localDate": "2024-08-24",
            "localTime": "15:00:00",
            "week": "2",
            "competition": {
                "id": "2kwbbcootiqqgmrzs6o5inle5",
                "name": "Premier League",
                "competitionCode": "EPL"
            },
            "tournamentCalendar": {"name": "2024/2025"},
            "contestant": [
                {"id": "t-eve", "name": "Everton", "position": "home"},
                {"id": "t-bha", "name": "Brighton", "position": "away"}
            ],
            "venue": {"shortName": "Goodison Park"}
        },
        "liveData": {
            "matchDetails": {
                "winner": "away",
                "matchStatus": "Played",
                "scores": {"total": {"home": 0, "away": 3}}
            },
            "event": [
                {
                    "id": 2660101200u64, "typeId": 1, "periodId": 1,
                    "timeMin": 0, "timeSec": 2,
                    "contestantId": "t-eve", "playerId": "p-pickford",
                    "playerName": "J. Pickford", "outcome": 1,
                    "timeStamp": "2024-08-24T15:00:02.118"
                },
                {
                    "id": 2660101344u64, "typeId": 16, "periodId": 1,
                    "timeMin": 18, "timeSec": 40,
                    "contestantId": "t-bha", "playerId": "p-mitoma",
                    "playerName": "K. Mitoma", "outcome": 1,
                    "timeStamp": "2024-08-24T15:18:40.330"
                }
            ],
            "lineUp": [
                {
                    "contestantId": "t-eve",
                    "player": [
                        {
                            "playerId": "p-pickford", "matchName": "J. Pickford",
                            "shirtNumber": 1, "position": "Goalkeeper",
                            "stat": [
                                {"type": "minsPlayed", "value": "90"},
                                {"type": "saves", "value": "3"}
                            ]
                        }
                    ]
                }
            ]
        }
    })
}

fn write_payload(dir: &Path, name: &str, payload: &Value) -> std::path::PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, payload.to_string()).unwrap();
    path
}

#[test]
fn test_ingest_creates_all_four_tables() -> Result<()> {
    let temp_dir = TempDir::new().unwrap();
    let payload_path = write_payload(
        temp_dir.path(),
        "arsenal_wolves.json",
        &arsenal_wolves_payload("match-ars-wol"),
    );

    let store = AccumulationStore::new(temp_dir.path().join("store"));
    let feed = MatchFeed::from_path(&payload_path)?;
    let report = ingest_match(&feed, &store)?;

    assert_eq!(report.match_id, "match-ars-wol");
    assert_eq!(report.team_ids, vec!["t-ars", "t-wol"]);
    assert_eq!(report.event_rows, 4);
    assert_eq!(report.qualifier_rows, 5);
    assert_eq!(report.player_rows, 3);
    assert_eq!(report.total_matches, 1);

    for kind in TableKind::ALL {
        assert!(store.table_path(kind).exists());
    }

    // A fresh store handle sees the same data: nothing lives in memory.
    let reopened = AccumulationStore::new(temp_dir.path().join("store"));

    let metadata = reopened.load(TableKind::Metadata)?;
    assert_eq!(metadata.height(), 1);
    assert_eq!(metadata.width(), 17);
    assert_eq!(
        metadata.column("home_team_name")?.get(0)?,
        AnyValue::String("Arsenal")
    );
    assert_eq!(metadata.column("goals_home")?.get(0)?, AnyValue::Int32(2));

    let events = reopened.load(TableKind::Events)?;
    assert_eq!(events.height(), 4);
    assert_eq!(events.width(), 14);
    assert_eq!(events.column("type_name")?.get(2)?, AnyValue::String("Goal"));
    assert_eq!(
        events.column("timestamp")?.dtype(),
        &DataType::Datetime(TimeUnit::Milliseconds, None)
    );

    let qualifiers = reopened.load(TableKind::Qualifiers)?;
    assert_eq!(qualifiers.height(), 5);
    assert_eq!(qualifiers.width(), 6);
    assert_eq!(
        qualifiers.column("qualifier_name")?.get(0)?,
        AnyValue::String("Pass End X")
    );

    let stats = reopened.load(TableKind::Stats)?;
    assert_eq!(stats.height(), 3);
    assert_eq!(
        stats.get_column_names_str(),
        vec![
            "matchId",
            "team_id",
            "playerId",
            "matchName",
            "shirtNumber",
            "position",
            "goals",
            "minsPlayed",
            "touches"
        ]
    );

    Ok(())
}

#[test]
fn test_reingest_replaces_rather_than_duplicates() -> Result<()> {
    let temp_dir = TempDir::new().unwrap();
    let store = AccumulationStore::new(temp_dir.path().join("store"));

    // First capture: taken during play, two events and no final score.
    let mut half_time = arsenal_wolves_payload("match-ars-wol");
    let events = half_time["liveData"]["event"].as_array().unwrap()[..2].to_vec();
    half_time["liveData"]["event"] = Value::Array(events);
    half_time["liveData"]["matchDetails"] = json!({
        "matchStatus": "Playing",
        "scores": {"total": {"home": 1, "away": 0}}
    });

    let report = ingest_match(&MatchFeed::from_value(half_time)?, &store)?;
    assert_eq!(report.event_rows, 2);

    // Second capture of the same match at full time replaces everything.
    let full_time = arsenal_wolves_payload("match-ars-wol");
    let report = ingest_match(&MatchFeed::from_value(full_time)?, &store)?;
    assert_eq!(report.total_matches, 1);

    let metadata = store.load(TableKind::Metadata)?;
    assert_eq!(metadata.height(), 1);
    assert_eq!(
        metadata.column("match_status")?.get(0)?,
        AnyValue::String("Played")
    );
    assert_eq!(metadata.column("goals_home")?.get(0)?, AnyValue::Int32(2));

    let events = store.load(TableKind::Events)?;
    assert_eq!(events.height(), 4);

    Ok(())
}

#[test]
fn test_accumulates_matches_with_different_stat_columns() -> Result<()> {
    let temp_dir = TempDir::new().unwrap();
    let store = AccumulationStore::new(temp_dir.path().join("store"));

    let first = arsenal_wolves_payload("match-ars-wol");
    ingest_match(&MatchFeed::from_value(first)?, &store)?;

    let second = everton_brighton_payload();
    let report = ingest_match(&MatchFeed::from_value(second)?, &store)?;
    assert_eq!(report.total_matches, 2);

    let metadata = store.load(TableKind::Metadata)?;
    assert_eq!(metadata.height(), 2);

    let events = store.load(TableKind::Events)?;
    assert_eq!(events.height(), 6);

    // The keeper's "saves" column joins the union; earlier rows hold null.
    let stats = store.load(TableKind::Stats)?;
    assert_eq!(stats.height(), 4);
    assert_eq!(
        stats.get_column_names_str(),
        vec![
            "matchId",
            "team_id",
            "playerId",
            "matchName",
            "shirtNumber",
            "position",
            "goals",
            "minsPlayed",
            "saves",
            "touches"
        ]
    );
    assert_eq!(stats.column("saves")?.get(0)?, AnyValue::Null);
    assert_eq!(stats.column("saves")?.get(3)?, AnyValue::Float64(3.0));
    assert_eq!(stats.column("touches")?.get(3)?, AnyValue::Null);

    Ok(())
}

#[test]
fn test_jsonp_envelope_ingests_like_plain_json() -> Result<()> {
    let temp_dir = TempDir::new().unwrap();
    let wrapped = format!(
        "window.feedCallback({});",
        arsenal_wolves_payload("match-ars-wol")
    );
    let payload_path = temp_dir.path().join("capture.json");
    std::fs::write(&payload_path, wrapped).unwrap();

    let store = AccumulationStore::new(temp_dir.path().join("store"));
    let report = ingest_match(&MatchFeed::from_path(&payload_path)?, &store)?;
    assert_eq!(report.match_id, "match-ars-wol");
    assert_eq!(report.event_rows, 4);

    Ok(())
}

#[test]
fn test_failed_reingest_leaves_accumulated_match_intact() -> Result<()> {
    let temp_dir = TempDir::new().unwrap();
    let store = AccumulationStore::new(temp_dir.path().join("store"));

    ingest_match(
        &MatchFeed::from_value(arsenal_wolves_payload("match-ars-wol"))?,
        &store,
    )?;

    // A later capture of the same match with a corrupt event timestamp
    // must fail before any table is touched.
    let mut corrupt = arsenal_wolves_payload("match-ars-wol");
    corrupt["liveData"]["event"][1]["timeStamp"] = json!("25:99:00 yesterday");

    let err = ingest_match(&MatchFeed::from_value(corrupt)?, &store).unwrap_err();
    assert!(matches!(
        err,
        FeedError::MalformedTimestamp { event_id: 2659990773, .. }
    ));

    let events = store.load(TableKind::Events)?;
    assert_eq!(events.height(), 4);
    let metadata = store.load(TableKind::Metadata)?;
    assert_eq!(
        metadata.column("match_status")?.get(0)?,
        AnyValue::String("Played")
    );

    Ok(())
}
