//! One match's journey from raw feed to accumulated tables.
//!
//! All four tables are built fully in memory before the first store merge,
//! so a structural failure anywhere in the feed leaves the durable tables
//! exactly as they were. The merges themselves are independent per table.

use polars::prelude::DataFrame;
use tracing::{info, warn};

use crate::error::Result;
use crate::events::{NormalizedEvents, normalize_events};
use crate::feed::MatchFeed;
use crate::metadata::extract_match_metadata;
use crate::stats::extract_player_stats;
use crate::store::{AccumulationStore, TableKind};

/// The four in-memory tables for one match, pre-merge.
#[derive(Debug)]
pub struct MatchTables {
    pub match_id: String,
    pub team_ids: Vec<String>,
    pub metadata: DataFrame,
    pub events: DataFrame,
    pub qualifiers: DataFrame,
    pub stats: DataFrame,
}

/// Outcome of one successful ingestion.
#[derive(Debug)]
pub struct IngestReport {
    pub match_id: String,
    pub team_ids: Vec<String>,
    pub event_rows: usize,
    pub qualifier_rows: usize,
    pub player_rows: usize,
    /// Matches accumulated in the store after this one, counted from the
    /// metadata table (one row per match).
    pub total_matches: usize,
}

/// Build all four tables for one match without touching the store.
pub fn build_match_tables(feed: &MatchFeed) -> Result<MatchTables> {
    let metadata = extract_match_metadata(feed)?;
    let NormalizedEvents { events, qualifiers } = normalize_events(feed, &metadata)?;
    let stats = extract_player_stats(feed)?;

    Ok(MatchTables {
        match_id: metadata.match_id.clone(),
        team_ids: stats.team_ids,
        metadata: metadata.to_dataframe()?,
        events,
        qualifiers,
        stats: stats.table,
    })
}

/// Ingest one match: build everything, then merge table by table.
///
/// An empty stats table (missing lineup) is skipped rather than merged,
/// leaving any previously stored stats for the match in place.
pub fn ingest_match(feed: &MatchFeed, store: &AccumulationStore) -> Result<IngestReport> {
    let tables = build_match_tables(feed)?;

    let accumulated = store.merge(TableKind::Metadata, &tables.match_id, &tables.metadata)?;
    store.merge(TableKind::Events, &tables.match_id, &tables.events)?;
    store.merge(TableKind::Qualifiers, &tables.match_id, &tables.qualifiers)?;
    if tables.stats.height() > 0 {
        store.merge(TableKind::Stats, &tables.match_id, &tables.stats)?;
    } else {
        warn!(
            "Match {} produced no player stats, stats table left untouched",
            tables.match_id
        );
    }

    let report = IngestReport {
        match_id: tables.match_id,
        team_ids: tables.team_ids,
        event_rows: tables.events.height(),
        qualifier_rows: tables.qualifiers.height(),
        player_rows: tables.stats.height(),
        total_matches: accumulated.height(),
    };
    info!(
        "Ingested match {} ({} events, {} qualifiers, {} players), {} matches accumulated",
        report.match_id,
        report.event_rows,
        report.qualifier_rows,
        report.player_rows,
        report.total_matches
    );
    Ok(report)
}
