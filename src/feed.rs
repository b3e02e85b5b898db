//! Data model of the provider's nested match payload.
//!
//! One `MatchFeed` is the raw structure captured from provider network
//! traffic for a single match. Payloads arrive either as plain JSON
//! documents or wrapped in a JSONP envelope (`callback({...});`); both
//! forms are accepted. Everything the provider can omit is optional here;
//! required-section checks live in the extractors, not in the model.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Deserialize;
use serde_json::Value;
use std::fs;
use std::path::Path;
use tracing::debug;

use crate::error::{FeedError, Result};

static JSONP_ENVELOPE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?s)\((.*)\);?$").unwrap());

/// Raw nested payload for one match.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchFeed {
    pub match_info: Option<MatchInfo>,
    pub live_data: Option<LiveData>,
}

/// Identifying and contextual fields for the match.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchInfo {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub local_date: String,
    #[serde(default)]
    pub local_time: String,
    #[serde(default)]
    pub week: String,
    pub competition: Option<Competition>,
    pub tournament_calendar: Option<TournamentCalendar>,
    #[serde(default)]
    pub contestant: Vec<Contestant>,
    pub venue: Option<Venue>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Competition {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub competition_code: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TournamentCalendar {
    pub name: Option<String>,
}

/// One participating side. `position` is "home" or "away" for the playing
/// sides; the provider occasionally includes other entries.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Contestant {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub name: String,
    pub position: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Venue {
    #[serde(default)]
    pub short_name: String,
}

/// In-play data: result details, the event list, and team lineups.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LiveData {
    pub match_details: Option<MatchDetails>,
    pub event: Option<Vec<RawEvent>>,
    pub line_up: Option<Vec<TeamLineup>>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchDetails {
    #[serde(default)]
    pub winner: String,
    #[serde(default)]
    pub match_status: String,
    pub scores: Option<Scores>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Scores {
    pub total: Option<ScoreTotal>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreTotal {
    pub home: Option<i32>,
    pub away: Option<i32>,
}

/// One raw event. `id` and `typeId` are present in every provider payload;
/// the remaining fields vary by event type.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawEvent {
    pub id: u64,
    pub type_id: i32,
    pub period_id: Option<i32>,
    pub time_min: Option<i32>,
    pub time_sec: Option<i32>,
    pub contestant_id: Option<String>,
    pub player_id: Option<String>,
    pub player_name: Option<String>,
    pub outcome: Option<i32>,
    pub x: Option<f64>,
    pub y: Option<f64>,
    pub time_stamp: Option<String>,
    #[serde(default)]
    pub qualifier: Vec<RawQualifier>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawQualifier {
    pub qualifier_id: i32,
    pub value: Option<Value>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamLineup {
    pub contestant_id: Option<String>,
    #[serde(default)]
    pub player: Vec<LineupPlayer>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineupPlayer {
    pub player_id: Option<String>,
    pub match_name: Option<String>,
    pub shirt_number: Option<i32>,
    pub position: Option<String>,
    #[serde(default)]
    pub stat: Vec<StatEntry>,
}

/// One recorded statistic: name and untyped value.
#[derive(Debug, Clone, Deserialize)]
pub struct StatEntry {
    #[serde(rename = "type")]
    pub stat_type: Option<String>,
    pub value: Option<Value>,
}

impl MatchFeed {
    /// Load a captured payload file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        debug!("Loading feed payload from {}", path.display());
        let raw = fs::read_to_string(path)?;
        Self::from_payload(&raw)
    }

    /// Decode a payload string, accepting plain JSON or a JSONP envelope.
    pub fn from_payload(raw: &str) -> Result<Self> {
        let trimmed = raw.trim();
        if trimmed.starts_with('{') || trimmed.starts_with('[') {
            return Ok(serde_json::from_str(trimmed)?);
        }

        match JSONP_ENVELOPE.captures(trimmed) {
            Some(captures) => {
                debug!("Stripping JSONP envelope from payload");
                Ok(serde_json::from_str(&captures[1])?)
            }
            None => Err(FeedError::InvalidPayload {
                reason: "expected a JSON document or callback(...) wrapper".to_string(),
            }),
        }
    }

    /// Decode an already-parsed JSON value.
    pub fn from_value(value: Value) -> Result<Self> {
        Ok(serde_json::from_value(value)?)
    }
}

/// Render a JSON scalar the way the provider's string-typed exports do.
pub(crate) fn scalar_to_string(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        other => Some(other.to_string()),
    }
}
