//! Error handling for match-feed processing operations.
//!
//! Distinguishes structural feed failures (missing sections, unparseable
//! timestamps), which abort one match, from storage failures, which abort
//! the run. Optional feed content is never an error; extractors substitute
//! defaults and log instead.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum FeedError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Polars error: {0}")]
    Polars(#[from] polars::error::PolarsError),

    #[error("JSON decode error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Payload is neither a JSON document nor a JSONP envelope: {reason}")]
    InvalidPayload { reason: String },

    #[error("Required feed section missing: {section}")]
    MissingSection { section: &'static str },

    #[error("Malformed timestamp {value:?} on event {event_id}")]
    MalformedTimestamp {
        event_id: u64,
        value: String,
        #[source]
        source: chrono::ParseError,
    },

    #[error("Accumulated table not found at path: {path}")]
    TableNotFound { path: PathBuf },

    #[error("Storage access failed for {path}: {reason}")]
    Storage { path: PathBuf, reason: String },

    #[error("Configuration error: {message}")]
    Configuration { message: String },
}

impl FeedError {
    /// Storage failures invalidate the whole run; everything else is
    /// confined to the match being ingested.
    pub fn is_storage(&self) -> bool {
        matches!(
            self,
            FeedError::TableNotFound { .. } | FeedError::Storage { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, FeedError>;
