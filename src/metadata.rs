//! Match metadata extraction.
//!
//! Pulls per-match identifying and contextual fields out of the raw feed
//! into one flat record. The match-info and match-details blocks are
//! structurally required; everything else degrades to empty values.

use polars::prelude::*;
use serde::Serialize;
use tracing::info;

use crate::error::{FeedError, Result};
use crate::feed::MatchFeed;

/// Flat identifying record for one match. Replaced wholesale when the
/// match is re-ingested, never updated in place.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct MatchMetadata {
    pub match_id: String,
    pub local_date: String,
    pub local_time: String,
    pub match_week: String,
    pub competition_id: String,
    pub competition_name: String,
    pub competition_code: String,
    pub season: String,
    pub home_team_id: String,
    pub home_team_name: String,
    pub away_team_id: String,
    pub away_team_name: String,
    pub venue: String,
    pub winner: String,
    pub match_status: String,
    pub goals_home: Option<i32>,
    pub goals_away: Option<i32>,
}

/// Extract the flat metadata record from one match's raw structure.
///
/// Fails with `MissingSection` when the match-info block or the live-data
/// match-details block is absent; no meaningful downstream table exists
/// without them. Contestants are matched on the "home"/"away" position
/// discriminator; other entries are logged and skipped.
pub fn extract_match_metadata(feed: &MatchFeed) -> Result<MatchMetadata> {
    let match_info = feed.match_info.as_ref().ok_or(FeedError::MissingSection {
        section: "matchInfo",
    })?;

    let mut metadata = MatchMetadata {
        match_id: match_info.id.clone(),
        local_date: match_info.local_date.clone(),
        local_time: match_info.local_time.clone(),
        match_week: match_info.week.clone(),
        ..MatchMetadata::default()
    };

    if let Some(competition) = &match_info.competition {
        metadata.competition_id = competition.id.clone();
        metadata.competition_name = competition.name.clone();
        metadata.competition_code = competition.competition_code.clone();
    }

    if let Some(name) = match_info
        .tournament_calendar
        .as_ref()
        .and_then(|calendar| calendar.name.as_ref())
    {
        metadata.season = name.clone();
    }

    for contestant in &match_info.contestant {
        match contestant.position.as_deref() {
            Some("home") => {
                metadata.home_team_id = contestant.id.clone();
                metadata.home_team_name = contestant.name.clone();
            }
            Some("away") => {
                metadata.away_team_id = contestant.id.clone();
                metadata.away_team_name = contestant.name.clone();
            }
            _ => {
                info!(
                    "Contestant {} has no home/away position, skipping",
                    contestant.id
                );
            }
        }
    }

    if let Some(venue) = &match_info.venue {
        metadata.venue = venue.short_name.clone();
    }

    let details = feed
        .live_data
        .as_ref()
        .and_then(|live| live.match_details.as_ref())
        .ok_or(FeedError::MissingSection {
            section: "liveData.matchDetails",
        })?;

    metadata.winner = details.winner.clone();
    metadata.match_status = details.match_status.clone();

    if let Some(total) = details.scores.as_ref().and_then(|scores| scores.total.as_ref()) {
        metadata.goals_home = total.home;
        metadata.goals_away = total.away;
    }

    Ok(metadata)
}

impl MatchMetadata {
    /// One-row frame in the accumulated metadata schema.
    pub fn to_dataframe(&self) -> Result<DataFrame> {
        let df = DataFrame::new(vec![
            Column::new("match_id".into(), vec![self.match_id.clone()]),
            Column::new("local_date".into(), vec![self.local_date.clone()]),
            Column::new("local_time".into(), vec![self.local_time.clone()]),
            Column::new("match_week".into(), vec![self.match_week.clone()]),
            Column::new("competition_id".into(), vec![self.competition_id.clone()]),
            Column::new(
                "competition_name".into(),
                vec![self.competition_name.clone()],
            ),
            Column::new(
                "competition_code".into(),
                vec![self.competition_code.clone()],
            ),
            Column::new("season".into(), vec![self.season.clone()]),
            Column::new("home_team_id".into(), vec![self.home_team_id.clone()]),
            Column::new("home_team_name".into(), vec![self.home_team_name.clone()]),
            Column::new("away_team_id".into(), vec![self.away_team_id.clone()]),
            Column::new("away_team_name".into(), vec![self.away_team_name.clone()]),
            Column::new("venue".into(), vec![self.venue.clone()]),
            Column::new("winner".into(), vec![self.winner.clone()]),
            Column::new("match_status".into(), vec![self.match_status.clone()]),
            Column::new("goals_home".into(), vec![self.goals_home]),
            Column::new("goals_away".into(), vec![self.goals_away]),
        ])?;
        Ok(df)
    }
}
