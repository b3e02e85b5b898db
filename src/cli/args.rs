//! Command-line argument definitions for the feed processor.

use std::path::PathBuf;
use std::str::FromStr;

use clap::{Parser, Subcommand};

use crate::config::{CompressionAlgorithm, DEFAULT_OUTPUT_DIR};
use crate::error::{FeedError, Result};

/// CLI arguments for the Opta match-feed processor
///
/// Converts nested match-event feeds captured from the provider into flat
/// Parquet tables that accumulate safely across runs.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "opta-processor",
    version,
    about = "Convert nested Opta match feeds into accumulated Parquet tables",
    long_about = "Processes match-event feeds captured from the Stats Perform MA endpoints into four \
                  flat Parquet tables: match metadata, events, qualifiers, and player statistics. \
                  Tables accumulate across runs; re-ingesting a match replaces its rows instead of \
                  duplicating them."
)]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands for the feed processor
#[derive(Debug, Clone, Subcommand)]
pub enum Commands {
    /// Ingest captured feed payloads into the accumulated tables
    Ingest(IngestArgs),
    /// Report the accumulated tables' contents
    Status(StatusArgs),
}

/// Arguments for the ingest command (main processing)
#[derive(Debug, Clone, Parser)]
pub struct IngestArgs {
    /// Feed payload files or directories to ingest
    ///
    /// Directories are scanned for *.json payload files. Payloads may be
    /// plain JSON documents or JSONP envelopes as captured from provider
    /// network traffic.
    #[arg(
        value_name = "PATHS",
        required = true,
        help = "Feed payload files or directories"
    )]
    pub paths: Vec<PathBuf>,

    /// Output directory for the accumulated Parquet tables
    ///
    /// Will be created if it doesn't exist. Holds metadata.parquet,
    /// events.parquet, qualifiers.parquet and stats.parquet.
    #[arg(
        short = 'o',
        long = "output",
        value_name = "DIR",
        default_value = DEFAULT_OUTPUT_DIR,
        help = "Output directory for the accumulated tables"
    )]
    pub output: PathBuf,

    /// Parquet compression algorithm (snappy, zstd, lz4, none)
    #[arg(
        long = "compression",
        value_name = "ALGO",
        default_value = "snappy",
        help = "Parquet compression algorithm"
    )]
    pub compression: String,

    /// Logging verbosity level
    #[arg(
        short = 'v',
        long = "verbose",
        action = clap::ArgAction::Count,
        help = "Increase logging verbosity (-v: info, -vv: debug, -vvv: trace)"
    )]
    pub verbose: u8,

    /// Suppress output (quiet mode)
    ///
    /// Only show errors and critical messages. Overrides verbose settings.
    #[arg(
        short = 'q',
        long = "quiet",
        help = "Suppress output except errors",
        conflicts_with = "verbose"
    )]
    pub quiet: bool,
}

/// Arguments for the status command (store inspection)
#[derive(Debug, Clone, Parser)]
pub struct StatusArgs {
    /// Directory holding the accumulated Parquet tables
    #[arg(
        short = 'o',
        long = "output",
        value_name = "DIR",
        default_value = DEFAULT_OUTPUT_DIR,
        help = "Directory holding the accumulated tables"
    )]
    pub output: PathBuf,

    /// Include the per-match listing and stat summary
    ///
    /// By default, shows per-table counts. This flag adds one line per
    /// accumulated match and a descriptive summary of the stat columns.
    #[arg(long = "detailed", help = "Include per-match listing and stat summary")]
    pub detailed: bool,

    /// Logging verbosity level
    #[arg(
        short = 'v',
        long = "verbose",
        action = clap::ArgAction::Count,
        help = "Increase logging verbosity (-v: info, -vv: debug, -vvv: trace)"
    )]
    pub verbose: u8,

    /// Suppress output except errors
    #[arg(
        short = 'q',
        long = "quiet",
        help = "Suppress output except errors",
        conflicts_with = "verbose"
    )]
    pub quiet: bool,
}

impl IngestArgs {
    /// Validate the ingest command arguments for consistency
    pub fn validate(&self) -> Result<()> {
        for path in &self.paths {
            if !path.exists() {
                return Err(FeedError::Configuration {
                    message: format!("Payload path does not exist: {}", path.display()),
                });
            }
        }

        self.parse_compression()?;

        Ok(())
    }

    /// Parse the compression flag into the store's algorithm type
    pub fn parse_compression(&self) -> Result<CompressionAlgorithm> {
        CompressionAlgorithm::from_str(&self.compression)
            .map_err(|message| FeedError::Configuration { message })
    }

    /// Determine the appropriate log level based on verbosity flags
    pub fn get_log_level(&self) -> &'static str {
        if self.quiet {
            "error"
        } else {
            match self.verbose {
                0 => "warn",
                1 => "info",
                2 => "debug",
                _ => "trace",
            }
        }
    }

    /// Check if we should show progress bars (not in quiet mode)
    pub fn show_progress(&self) -> bool {
        !self.quiet
    }
}

impl StatusArgs {
    /// Determine the appropriate log level based on verbosity flags
    pub fn get_log_level(&self) -> &'static str {
        if self.quiet {
            "error"
        } else {
            match self.verbose {
                0 => "warn",
                1 => "info",
                2 => "debug",
                _ => "trace",
            }
        }
    }
}

impl Default for IngestArgs {
    fn default() -> Self {
        Self {
            paths: Vec::new(),
            output: PathBuf::from(DEFAULT_OUTPUT_DIR),
            compression: "snappy".to_string(),
            verbose: 0,
            quiet: false,
        }
    }
}
