//! # Opta Feed Processor
//!
//! A library for converting nested Opta (Stats Perform) soccer match feeds
//! into flat, analysis-ready Parquet tables.
//!
//! Each match payload is normalized into four tables: match metadata,
//! events, event qualifiers, and per-player stats. Tables accumulate across
//! matches in a durable store where re-ingesting a match replaces its
//! earlier rows.
//!
//! ## Example
//!
//! ```rust,no_run
//! use opta_processor::{AccumulationStore, MatchFeed, pipeline};
//!
//! # fn main() -> opta_processor::Result<()> {
//! let feed = MatchFeed::from_path("payloads/match.json")?;
//! let store = AccumulationStore::new("data/match-events");
//! let report = pipeline::ingest_match(&feed, &store)?;
//! println!("{} now holds {} matches", report.match_id, report.total_matches);
//! # Ok(())
//! # }
//! ```

pub mod catalog;
pub mod config;
pub mod error;
pub mod events;
pub mod feed;
pub mod metadata;
pub mod pipeline;
pub mod stats;
pub mod store;

pub mod cli {
    pub mod args;
    pub mod commands;
}

pub use config::{CompressionAlgorithm, StoreConfig};
pub use error::{FeedError, Result};
pub use events::{NormalizedEvents, normalize_events};
pub use feed::MatchFeed;
pub use metadata::{MatchMetadata, extract_match_metadata};
pub use pipeline::{IngestReport, MatchTables, build_match_tables, ingest_match};
pub use stats::{PlayerStats, extract_player_stats};
pub use store::{AccumulationStore, TableKind};
