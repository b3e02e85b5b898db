//! Player statistic extraction from lineup blocks.
//!
//! Each lineup player carries a variable list of named stats; the set of
//! names differs between matches and even between players in one match.
//! Rows are collected as sparse name→value maps and reconciled against the
//! union of names discovered in the match, so every row of the resulting
//! frame shares one column set with explicit nulls for stats a player did
//! not record. Stat columns are Float64; values the provider sends as
//! unparseable text coerce to null rather than failing the row.

use std::collections::{BTreeSet, HashMap};

use polars::prelude::*;
use serde_json::Value;
use tracing::{debug, warn};

use crate::error::{FeedError, Result};
use crate::feed::MatchFeed;

/// Identity columns preceding the stat columns, in output order. Names keep
/// the provider's mixed casing, which downstream consumers of the exported
/// tables rely on.
pub const IDENTITY_COLUMNS: [&str; 6] = [
    "matchId",
    "team_id",
    "playerId",
    "matchName",
    "shirtNumber",
    "position",
];

/// One match's player statistics table plus the team ids seen in the lineup.
#[derive(Debug)]
pub struct PlayerStats {
    pub match_id: String,
    pub team_ids: Vec<String>,
    pub table: DataFrame,
}

struct PlayerRow {
    team_id: Option<String>,
    player_id: Option<String>,
    match_name: Option<String>,
    shirt_number: Option<i32>,
    position: Option<String>,
    stats: HashMap<String, Option<f64>>,
}

/// Build the wide per-player stats table for one match.
///
/// The match identifier is structurally required. A missing lineup block is
/// recoverable: the match simply has no player stats, and the returned table
/// is empty.
pub fn extract_player_stats(feed: &MatchFeed) -> Result<PlayerStats> {
    let info = feed.match_info.as_ref().ok_or(FeedError::MissingSection {
        section: "matchInfo",
    })?;
    let match_id = info.id.clone();

    let Some(lineup) = feed.live_data.as_ref().and_then(|live| live.line_up.as_ref()) else {
        warn!("Match {match_id} has no lineup block, player stats unavailable");
        return Ok(PlayerStats {
            match_id,
            team_ids: Vec::new(),
            table: DataFrame::empty(),
        });
    };

    let mut team_ids: Vec<String> = Vec::new();
    let mut rows: Vec<PlayerRow> = Vec::new();
    let mut stat_names: BTreeSet<String> = BTreeSet::new();

    for team in lineup {
        if let Some(team_id) = &team.contestant_id {
            team_ids.push(team_id.clone());
        }
        for player in &team.player {
            let mut stats: HashMap<String, Option<f64>> = HashMap::new();
            for entry in &player.stat {
                let Some(name) = &entry.stat_type else {
                    continue;
                };
                stat_names.insert(name.clone());
                // Repeated names within one player keep the last value.
                stats.insert(
                    name.clone(),
                    entry.value.as_ref().and_then(coerce_stat_value),
                );
            }
            rows.push(PlayerRow {
                team_id: team.contestant_id.clone(),
                player_id: player.player_id.clone(),
                match_name: player.match_name.clone(),
                shirt_number: player.shirt_number,
                position: player.position.clone(),
                stats,
            });
        }
    }

    let mut columns = vec![
        Column::new("matchId".into(), vec![match_id.clone(); rows.len()]),
        Column::new(
            "team_id".into(),
            rows.iter().map(|r| r.team_id.clone()).collect::<Vec<_>>(),
        ),
        Column::new(
            "playerId".into(),
            rows.iter().map(|r| r.player_id.clone()).collect::<Vec<_>>(),
        ),
        Column::new(
            "matchName".into(),
            rows.iter().map(|r| r.match_name.clone()).collect::<Vec<_>>(),
        ),
        Column::new(
            "shirtNumber".into(),
            rows.iter().map(|r| r.shirt_number).collect::<Vec<_>>(),
        ),
        Column::new(
            "position".into(),
            rows.iter().map(|r| r.position.clone()).collect::<Vec<_>>(),
        ),
    ];
    for name in &stat_names {
        let values: Vec<Option<f64>> = rows
            .iter()
            .map(|row| row.stats.get(name).copied().flatten())
            .collect();
        columns.push(Column::new(name.as_str().into(), values));
    }

    let table = DataFrame::new(columns)?;
    debug!(
        "Extracted stats for {} players across {} stat columns in match {match_id}",
        table.height(),
        stat_names.len()
    );

    Ok(PlayerStats {
        match_id,
        team_ids,
        table,
    })
}

/// Numeric coercion for a raw stat value. The provider sends numbers as
/// strings; anything that does not parse becomes null.
fn coerce_stat_value(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        Value::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
        _ => None,
    }
}

/// Rows of one position (e.g. "Midfielder").
pub fn filter_by_position(table: &DataFrame, position: &str) -> Result<DataFrame> {
    Ok(table
        .clone()
        .lazy()
        .filter(col("position").eq(lit(position)))
        .collect()?)
}

/// Rows of one team id.
pub fn filter_by_team(table: &DataFrame, team_id: &str) -> Result<DataFrame> {
    Ok(table
        .clone()
        .lazy()
        .filter(col("team_id").eq(lit(team_id)))
        .collect()?)
}

/// Per-stat-column descriptive summary: non-null count, mean, min, max.
pub fn summarize_stats(table: &DataFrame) -> Result<DataFrame> {
    let stat_columns: Vec<String> = table
        .get_column_names_str()
        .into_iter()
        .filter(|name| !IDENTITY_COLUMNS.contains(name))
        .map(|name| name.to_string())
        .collect();

    let mut names: Vec<String> = Vec::with_capacity(stat_columns.len());
    let mut counts: Vec<u32> = Vec::with_capacity(stat_columns.len());
    let mut means: Vec<Option<f64>> = Vec::with_capacity(stat_columns.len());
    let mut mins: Vec<Option<f64>> = Vec::with_capacity(stat_columns.len());
    let mut maxs: Vec<Option<f64>> = Vec::with_capacity(stat_columns.len());

    for name in &stat_columns {
        let column = table.column(name)?;
        let mut values: Vec<f64> = Vec::new();
        for i in 0..column.len() {
            if let Ok(v) = column.get(i)?.try_extract::<f64>() {
                values.push(v);
            }
        }
        names.push(name.clone());
        counts.push(values.len() as u32);
        means.push((!values.is_empty()).then(|| values.iter().sum::<f64>() / values.len() as f64));
        mins.push(values.iter().copied().reduce(f64::min));
        maxs.push(values.iter().copied().reduce(f64::max));
    }

    Ok(DataFrame::new(vec![
        Column::new("stat".into(), names),
        Column::new("count".into(), counts),
        Column::new("mean".into(), means),
        Column::new("min".into(), mins),
        Column::new("max".into(), maxs),
    ])?)
}
