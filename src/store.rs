//! Durable accumulation store for the four match tables.
//!
//! Each table lives in one Parquet file under the store directory and grows
//! as matches are ingested. Merging is last-write-wins at match granularity:
//! rows carrying the incoming match id are dropped from the accumulated
//! table before the new rows are appended, so re-ingesting a match can never
//! duplicate it. Tables whose column sets differ across matches (player
//! stats) are combined by diagonal concatenation, filling the gaps with
//! nulls.
//!
//! Persistence is all-or-nothing per table: the combined frame is written to
//! a temp file in the store directory and atomically renamed over the old
//! file. A failed merge leaves the durable table untouched.

use std::path::{Path, PathBuf};

use polars::prelude::*;
use tempfile::NamedTempFile;
use tracing::{debug, info};

use crate::config::StoreConfig;
use crate::error::{FeedError, Result};

/// The four accumulated tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableKind {
    Metadata,
    Events,
    Qualifiers,
    Stats,
}

impl TableKind {
    pub const ALL: [TableKind; 4] = [
        TableKind::Metadata,
        TableKind::Events,
        TableKind::Qualifiers,
        TableKind::Stats,
    ];

    /// File name of this table under the store directory.
    pub fn file_name(&self) -> &'static str {
        match self {
            TableKind::Metadata => "metadata.parquet",
            TableKind::Events => "events.parquet",
            TableKind::Qualifiers => "qualifiers.parquet",
            TableKind::Stats => "stats.parquet",
        }
    }

    /// Column holding the match identifier. The stats table keeps the
    /// provider's camelCase name.
    pub fn match_key(&self) -> &'static str {
        match self {
            TableKind::Stats => "matchId",
            _ => "match_id",
        }
    }
}

impl std::fmt::Display for TableKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            TableKind::Metadata => "metadata",
            TableKind::Events => "events",
            TableKind::Qualifiers => "qualifiers",
            TableKind::Stats => "stats",
        };
        write!(f, "{name}")
    }
}

/// Store owning the four Parquet files under one output directory.
#[derive(Debug, Clone)]
pub struct AccumulationStore {
    config: StoreConfig,
}

impl AccumulationStore {
    /// Store under `output_dir` with default writer settings.
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            config: StoreConfig::new(output_dir),
        }
    }

    /// Store with explicit writer settings.
    pub fn with_config(config: StoreConfig) -> Self {
        Self { config }
    }

    pub fn output_dir(&self) -> &Path {
        &self.config.output_dir
    }

    /// Path of one table's Parquet file.
    pub fn table_path(&self, kind: TableKind) -> PathBuf {
        self.config.output_dir.join(kind.file_name())
    }

    /// Load one accumulated table. A table that has never been written is
    /// `TableNotFound`, so callers can tell "no data yet" from a read
    /// failure.
    pub fn load(&self, kind: TableKind) -> Result<DataFrame> {
        let path = self.table_path(kind);
        if !path.exists() {
            return Err(FeedError::TableNotFound { path });
        }
        LazyFrame::scan_parquet(&path, Default::default())
            .and_then(|frame| frame.collect())
            .map_err(|e| FeedError::Storage {
                path,
                reason: format!("Failed to read accumulated table: {e}"),
            })
    }

    /// Load one table, creating it with the template's schema (zero rows) on
    /// first use.
    pub fn load_or_init(&self, kind: TableKind, template: &DataFrame) -> Result<DataFrame> {
        match self.load(kind) {
            Ok(table) => Ok(table),
            Err(FeedError::TableNotFound { .. }) => {
                let empty = template.clear();
                self.persist(kind, empty.clone())?;
                info!("Initialized empty {kind} table at {:?}", self.table_path(kind));
                Ok(empty)
            }
            Err(e) => Err(e),
        }
    }

    /// Fold one match's table into the accumulated table and persist the
    /// result. Existing rows for the match id are replaced; column sets are
    /// unioned so later matches can introduce new stat columns. Returns the
    /// combined table as written.
    pub fn merge(&self, kind: TableKind, match_id: &str, table: &DataFrame) -> Result<DataFrame> {
        let path = self.table_path(kind);
        let key = kind.match_key();

        let combined = if path.exists() {
            let existing = self.load(kind)?;
            if !existing.get_column_names_str().contains(&key) {
                return Err(FeedError::Storage {
                    path,
                    reason: format!("accumulated table is missing its '{key}' column"),
                });
            }
            let before = existing.height();
            let retained = existing.lazy().filter(col(key).neq(lit(match_id)));
            let combined = concat_lf_diagonal(
                [retained, table.clone().lazy()],
                UnionArgs::default(),
            )
            .and_then(|frame| frame.collect())
            .map_err(|e| FeedError::Storage {
                path: path.clone(),
                reason: format!("Failed to combine tables: {e}"),
            })?;
            let replaced = before + table.height() - combined.height();
            if replaced > 0 {
                debug!("Replaced {replaced} existing {kind} rows for match {match_id}");
            }
            combined
        } else {
            table.clone()
        };

        self.persist(kind, combined.clone())?;
        debug!(
            "Merged {} rows into {kind} table, {} rows accumulated",
            table.height(),
            combined.height()
        );
        Ok(combined)
    }

    /// Atomic write: temp file in the store directory, then rename over the
    /// durable file.
    fn persist(&self, kind: TableKind, mut table: DataFrame) -> Result<()> {
        let path = self.table_path(kind);
        let storage = |reason: String| FeedError::Storage {
            path: path.clone(),
            reason,
        };

        std::fs::create_dir_all(&self.config.output_dir)
            .map_err(|e| storage(format!("Failed to create store directory: {e}")))?;

        let mut tmp = NamedTempFile::new_in(&self.config.output_dir)
            .map_err(|e| storage(format!("Failed to create temp file: {e}")))?;

        let statistics = if self.config.enable_statistics {
            StatisticsOptions::full()
        } else {
            StatisticsOptions::empty()
        };

        ParquetWriter::new(tmp.as_file_mut())
            .with_compression(self.config.compression.to_polars_compression())
            .with_statistics(statistics)
            .finish(&mut table)
            .map_err(|e| storage(format!("Failed to write parquet: {e}")))?;

        tmp.persist(&path)
            .map_err(|e| storage(format!("Failed to replace table file: {e}")))?;

        Ok(())
    }
}
