//! Event and qualifier normalization.
//!
//! Flattens one match's raw event list into two related tables in a single
//! pass over the feed. Feed order is preserved and is the canonical
//! tie-break for events sharing the same minute and second. Type and
//! qualifier codes are resolved through the reference catalog; timestamps
//! are parsed strictly, because downstream ordering and aggregation need a
//! fully comparable timeline.

use chrono::{DateTime, NaiveDateTime, Utc};
use polars::prelude::*;
use tracing::debug;

use crate::catalog;
use crate::error::{FeedError, Result};
use crate::feed::{MatchFeed, scalar_to_string};
use crate::metadata::MatchMetadata;

/// The two tables produced from one match's event list.
#[derive(Debug)]
pub struct NormalizedEvents {
    pub events: DataFrame,
    pub qualifiers: DataFrame,
}

/// Flatten the raw event list into the events and qualifiers tables.
///
/// One event row per raw event, zero or more qualifier rows per event,
/// each tagged with the owning event id (and the match id, so the store
/// can replace at match granularity). A missing event list is fatal; a
/// present-but-malformed timestamp on any row rejects the whole match.
pub fn normalize_events(feed: &MatchFeed, metadata: &MatchMetadata) -> Result<NormalizedEvents> {
    let raw_events = feed
        .live_data
        .as_ref()
        .and_then(|live| live.event.as_ref())
        .ok_or(FeedError::MissingSection {
            section: "liveData.event",
        })?;

    let mut ids: Vec<u64> = Vec::with_capacity(raw_events.len());
    let mut match_ids: Vec<String> = Vec::with_capacity(raw_events.len());
    let mut type_ids: Vec<i32> = Vec::with_capacity(raw_events.len());
    let mut type_names: Vec<String> = Vec::with_capacity(raw_events.len());
    let mut period_ids: Vec<Option<i32>> = Vec::with_capacity(raw_events.len());
    let mut minutes: Vec<Option<i32>> = Vec::with_capacity(raw_events.len());
    let mut seconds: Vec<Option<i32>> = Vec::with_capacity(raw_events.len());
    let mut team_ids: Vec<Option<String>> = Vec::with_capacity(raw_events.len());
    let mut player_ids: Vec<Option<String>> = Vec::with_capacity(raw_events.len());
    let mut player_names: Vec<Option<String>> = Vec::with_capacity(raw_events.len());
    let mut outcomes: Vec<Option<i32>> = Vec::with_capacity(raw_events.len());
    let mut xs: Vec<Option<f64>> = Vec::with_capacity(raw_events.len());
    let mut ys: Vec<Option<f64>> = Vec::with_capacity(raw_events.len());
    let mut timestamps: Vec<Option<i64>> = Vec::with_capacity(raw_events.len());

    let mut qual_event_ids: Vec<u64> = Vec::new();
    let mut qual_match_ids: Vec<String> = Vec::new();
    let mut qual_ids: Vec<i32> = Vec::new();
    let mut qual_names: Vec<String> = Vec::new();
    let mut qual_descs: Vec<String> = Vec::new();
    let mut qual_values: Vec<Option<String>> = Vec::new();

    for raw in raw_events {
        let timestamp = match raw.time_stamp.as_deref() {
            Some(value) => Some(parse_feed_timestamp(value).map_err(|source| {
                FeedError::MalformedTimestamp {
                    event_id: raw.id,
                    value: value.to_string(),
                    source,
                }
            })?),
            None => None,
        };

        ids.push(raw.id);
        match_ids.push(metadata.match_id.clone());
        type_ids.push(raw.type_id);
        type_names.push(catalog::event_type_name(raw.type_id));
        period_ids.push(raw.period_id);
        minutes.push(raw.time_min);
        seconds.push(raw.time_sec);
        team_ids.push(raw.contestant_id.clone());
        player_ids.push(raw.player_id.clone());
        player_names.push(raw.player_name.clone());
        outcomes.push(raw.outcome);
        xs.push(raw.x);
        ys.push(raw.y);
        timestamps.push(timestamp.map(|dt| dt.timestamp_millis()));

        for qualifier in &raw.qualifier {
            qual_event_ids.push(raw.id);
            qual_match_ids.push(metadata.match_id.clone());
            qual_ids.push(qualifier.qualifier_id);
            qual_names.push(catalog::qualifier_name(qualifier.qualifier_id));
            qual_descs.push(catalog::qualifier_description(qualifier.qualifier_id));
            qual_values.push(qualifier.value.as_ref().and_then(scalar_to_string));
        }
    }

    let timestamp_column = Column::new("timestamp".into(), timestamps)
        .cast(&DataType::Datetime(TimeUnit::Milliseconds, None))?;

    let events = DataFrame::new(vec![
        Column::new("id".into(), ids),
        Column::new("match_id".into(), match_ids),
        Column::new("type_id".into(), type_ids),
        Column::new("type_name".into(), type_names),
        Column::new("period_id".into(), period_ids),
        Column::new("minute".into(), minutes),
        Column::new("second".into(), seconds),
        Column::new("team_id".into(), team_ids),
        Column::new("player_id".into(), player_ids),
        Column::new("player_name".into(), player_names),
        Column::new("outcome".into(), outcomes),
        Column::new("x".into(), xs),
        Column::new("y".into(), ys),
        timestamp_column,
    ])?;

    let qualifiers = DataFrame::new(vec![
        Column::new("event_id".into(), qual_event_ids),
        Column::new("match_id".into(), qual_match_ids),
        Column::new("qualifier_id".into(), qual_ids),
        Column::new("qualifier_name".into(), qual_names),
        Column::new("qualifier_desc".into(), qual_descs),
        Column::new("value".into(), qual_values),
    ])?;

    debug!(
        "Normalized {} events and {} qualifiers for match {}",
        events.height(),
        qualifiers.height(),
        metadata.match_id
    );

    Ok(NormalizedEvents { events, qualifiers })
}

/// Parse the provider's ISO-8601 event timestamp into UTC.
///
/// Payloads normally carry a trailing `Z`; a zone-less timestamp is read
/// as UTC.
fn parse_feed_timestamp(value: &str) -> std::result::Result<DateTime<Utc>, chrono::ParseError> {
    DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.with_timezone(&Utc))
        .or_else(|_| {
            NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S%.f")
                .map(|naive| naive.and_utc())
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metadata::extract_match_metadata;
    use serde_json::json;

    fn payload_with_events(events: serde_json::Value) -> MatchFeed {
        MatchFeed::from_value(json!({
            "matchInfo": {
                "id": "match-1",
                "contestant": [
                    {"id": "home-1", "name": "Arsenal", "position": "home"},
                    {"id": "away-1", "name": "Wolves", "position": "away"}
                ]
            },
            "liveData": {
                "matchDetails": {"matchStatus": "Played"},
                "event": events
            }
        }))
        .unwrap()
    }

    fn normalize(feed: &MatchFeed) -> Result<NormalizedEvents> {
        let metadata = extract_match_metadata(feed).unwrap();
        normalize_events(feed, &metadata)
    }

    #[test]
    fn test_pass_and_goal_scenario() {
        let feed = payload_with_events(json!([
            {
                "id": 1001, "typeId": 1, "periodId": 1,
                "timeMin": 12, "timeSec": 3, "contestantId": "home-1",
                "playerId": "p1", "playerName": "Player One",
                "outcome": 1, "x": 50.1, "y": 48.7,
                "timeStamp": "2024-08-17T11:30:52.776Z",
                "qualifier": [{"qualifierId": 1, "value": "1"}]
            },
            {
                "id": 1002, "typeId": 16, "periodId": 1,
                "timeMin": 15, "timeSec": 40, "contestantId": "away-1",
                "outcome": 1, "x": 94.0, "y": 51.0,
                "timeStamp": "2024-08-17T11:34:29.102Z"
            }
        ]));

        let normalized = normalize(&feed).unwrap();
        assert_eq!(normalized.events.height(), 2);
        assert_eq!(normalized.qualifiers.height(), 1);

        let type_names = normalized.events.column("type_name").unwrap();
        assert_eq!(type_names.get(0).unwrap(), AnyValue::String("Pass"));
        assert_eq!(type_names.get(1).unwrap(), AnyValue::String("Goal"));

        let qualifiers = &normalized.qualifiers;
        assert_eq!(
            qualifiers.column("event_id").unwrap().get(0).unwrap(),
            AnyValue::UInt64(1001)
        );
        assert_eq!(
            qualifiers.column("qualifier_name").unwrap().get(0).unwrap(),
            AnyValue::String("Long ball")
        );
        assert_eq!(
            qualifiers.column("value").unwrap().get(0).unwrap(),
            AnyValue::String("1")
        );
        assert_eq!(
            qualifiers.column("match_id").unwrap().get(0).unwrap(),
            AnyValue::String("match-1")
        );
    }

    #[test]
    fn test_qualifier_count_and_order() {
        // Repeated codes within one event are all retained, in feed order.
        let feed = payload_with_events(json!([
            {
                "id": 1, "typeId": 1,
                "qualifier": [
                    {"qualifierId": 140, "value": "31.5"},
                    {"qualifierId": 141, "value": "12.2"},
                    {"qualifierId": 140, "value": "32.0"}
                ]
            },
            {"id": 2, "typeId": 5},
            {"id": 3, "typeId": 4, "qualifier": [{"qualifierId": 9}]}
        ]));

        let normalized = normalize(&feed).unwrap();
        assert_eq!(normalized.qualifiers.height(), 4);

        let event_ids = normalized.qualifiers.column("event_id").unwrap();
        let owners: Vec<u64> = (0..4)
            .map(|i| event_ids.get(i).unwrap().try_extract::<u64>().unwrap())
            .collect();
        assert_eq!(owners, vec![1, 1, 1, 3]);

        let codes = normalized.qualifiers.column("qualifier_id").unwrap();
        let order: Vec<i32> = (0..4)
            .map(|i| codes.get(i).unwrap().try_extract::<i32>().unwrap())
            .collect();
        assert_eq!(order, vec![140, 141, 140, 9]);

        // Boolean qualifiers carry no value.
        assert_eq!(
            normalized.qualifiers.column("value").unwrap().get(3).unwrap(),
            AnyValue::Null
        );
    }

    #[test]
    fn test_unknown_codes_resolve_to_placeholder() {
        let feed = payload_with_events(json!([
            {"id": 1, "typeId": 999, "qualifier": [{"qualifierId": 9999, "value": "x"}]}
        ]));
        let normalized = normalize(&feed).unwrap();
        assert_eq!(
            normalized.events.column("type_name").unwrap().get(0).unwrap(),
            AnyValue::String("Unknown (ID: 999)")
        );
        assert_eq!(
            normalized
                .qualifiers
                .column("qualifier_name")
                .unwrap()
                .get(0)
                .unwrap(),
            AnyValue::String("Unknown (ID: 9999)")
        );
        assert_eq!(
            normalized
                .qualifiers
                .column("qualifier_desc")
                .unwrap()
                .get(0)
                .unwrap(),
            AnyValue::String("No description")
        );
    }

    #[test]
    fn test_malformed_timestamp_rejects_match() {
        let feed = payload_with_events(json!([
            {"id": 1, "typeId": 1, "timeStamp": "2024-08-17T11:30:52.776Z"},
            {"id": 2, "typeId": 1, "timeStamp": "yesterday at noon"}
        ]));
        let err = normalize(&feed).unwrap_err();
        match err {
            FeedError::MalformedTimestamp { event_id, value, .. } => {
                assert_eq!(event_id, 2);
                assert_eq!(value, "yesterday at noon");
            }
            other => panic!("expected MalformedTimestamp, got {other:?}"),
        }
    }

    #[test]
    fn test_missing_timestamp_is_null() {
        let feed = payload_with_events(json!([
            {"id": 1, "typeId": 32},
            {"id": 2, "typeId": 1, "timeStamp": "2024-08-17T11:30:52.776Z"},
            {"id": 3, "typeId": 1, "timeStamp": "2024-08-17T11:30:53"}
        ]));
        let normalized = normalize(&feed).unwrap();
        let timestamps = normalized.events.column("timestamp").unwrap();
        assert_eq!(
            timestamps.dtype(),
            &DataType::Datetime(TimeUnit::Milliseconds, None)
        );
        assert_eq!(timestamps.get(0).unwrap(), AnyValue::Null);
        assert!(!matches!(timestamps.get(1).unwrap(), AnyValue::Null));
        assert!(!matches!(timestamps.get(2).unwrap(), AnyValue::Null));
    }

    #[test]
    fn test_missing_event_list_is_fatal() {
        let feed = MatchFeed::from_value(json!({
            "matchInfo": {"id": "match-1"},
            "liveData": {"matchDetails": {"matchStatus": "Played"}}
        }))
        .unwrap();
        let metadata = extract_match_metadata(&feed).unwrap();
        let err = normalize_events(&feed, &metadata).unwrap_err();
        assert!(matches!(
            err,
            FeedError::MissingSection {
                section: "liveData.event"
            }
        ));
    }

    #[test]
    fn test_feed_order_preserved() {
        let feed = payload_with_events(json!([
            {"id": 30, "typeId": 1, "timeMin": 5, "timeSec": 10},
            {"id": 10, "typeId": 1, "timeMin": 5, "timeSec": 10},
            {"id": 20, "typeId": 1, "timeMin": 5, "timeSec": 10}
        ]));
        let normalized = normalize(&feed).unwrap();
        let ids = normalized.events.column("id").unwrap();
        let order: Vec<u64> = (0..3)
            .map(|i| ids.get(i).unwrap().try_extract::<u64>().unwrap())
            .collect();
        assert_eq!(order, vec![30, 10, 20]);
    }

    #[test]
    fn test_empty_event_list_yields_empty_tables() {
        let feed = payload_with_events(json!([]));
        let normalized = normalize(&feed).unwrap();
        assert_eq!(normalized.events.height(), 0);
        assert_eq!(normalized.events.width(), 14);
        assert_eq!(normalized.qualifiers.height(), 0);
        assert_eq!(normalized.qualifiers.width(), 6);
    }
}
