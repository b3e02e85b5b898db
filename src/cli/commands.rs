//! Command implementations for the feed processor CLI.
//!
//! This module contains the command execution logic, progress reporting,
//! and error handling for the CLI interface. A match that fails ingestion
//! is logged and counted while the batch continues; storage failures abort
//! the batch, since every later merge would hit the same store.

use std::path::{Path, PathBuf};
use std::time::Instant;

use colored::Colorize;
use indicatif::{HumanDuration, ProgressBar, ProgressStyle};
use polars::prelude::{AnyValue, Column, DataFrame};
use tracing::{debug, error, info, warn};

use crate::cli::args::{Args, Commands, IngestArgs, StatusArgs};
use crate::config::StoreConfig;
use crate::error::{FeedError, Result};
use crate::feed::MatchFeed;
use crate::pipeline::{IngestReport, ingest_match};
use crate::stats::summarize_stats;
use crate::store::{AccumulationStore, TableKind};

/// Batch statistics for reporting
#[derive(Debug, Clone, Default)]
pub struct BatchStats {
    /// Number of payload files found
    pub files_seen: usize,
    /// Number of matches successfully ingested
    pub matches_ingested: usize,
    /// Number of payloads that failed ingestion
    pub failures: usize,
    /// Event rows written across the batch
    pub event_rows: usize,
    /// Qualifier rows written across the batch
    pub qualifier_rows: usize,
    /// Player rows written across the batch
    pub player_rows: usize,
    /// Matches accumulated in the store after the batch
    pub total_matches: usize,
    /// Total batch time
    pub elapsed: std::time::Duration,
}

/// Main command dispatcher. The binary prints its own help when no
/// subcommand is given, so `None` is a no-op here.
pub fn run(args: Args) -> Result<()> {
    match args.command {
        Some(Commands::Ingest(ingest)) => {
            setup_logging(ingest.get_log_level(), ingest.quiet)?;
            ingest.validate()?;
            run_ingest(&ingest)?;
            Ok(())
        }
        Some(Commands::Status(status)) => {
            setup_logging(status.get_log_level(), status.quiet)?;
            run_status(&status)
        }
        None => Ok(()),
    }
}

/// Set up structured logging based on CLI arguments
fn setup_logging(log_level: &str, quiet: bool) -> Result<()> {
    use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("opta_processor={}", log_level)));

    if quiet {
        // Minimal logging for quiet mode
        tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_level(true)
                    .with_writer(std::io::stderr)
                    .compact(),
            )
            .init();
    } else {
        // Standard logging with timestamps
        tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_level(true)
                    .with_timer(fmt::time::uptime())
                    .with_writer(std::io::stderr),
            )
            .init();
    }

    debug!("Logging initialized at level: {}", log_level);
    Ok(())
}

/// Run the ingest command over every payload found in the given paths.
pub fn run_ingest(args: &IngestArgs) -> Result<BatchStats> {
    let start = Instant::now();

    info!("Starting feed ingestion");
    debug!("Command line arguments: {:?}", args);

    let payloads = collect_payload_files(&args.paths)?;
    if payloads.is_empty() {
        return Err(FeedError::Configuration {
            message: "No payload files found in the given paths".to_string(),
        });
    }
    info!("Ingesting {} payload files", payloads.len());

    let config = StoreConfig::new(&args.output).with_compression(args.parse_compression()?);
    let store = AccumulationStore::with_config(config);

    let progress_bar = if args.show_progress() {
        let pb = ProgressBar::new(payloads.len() as u64);
        pb.set_style(
            ProgressStyle::default_bar()
                .template(
                    "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}",
                )
                .unwrap()
                .progress_chars("#>-"),
        );
        pb.set_message("Ingesting...");
        Some(pb)
    } else {
        None
    };

    let mut stats = BatchStats {
        files_seen: payloads.len(),
        ..Default::default()
    };

    for (i, path) in payloads.iter().enumerate() {
        if let Some(pb) = &progress_bar {
            pb.set_position(i as u64);
            pb.set_message(path.file_name().map_or_else(
                || path.display().to_string(),
                |name| name.to_string_lossy().to_string(),
            ));
        }

        match ingest_file(path, &store) {
            Ok(report) => {
                stats.matches_ingested += 1;
                stats.event_rows += report.event_rows;
                stats.qualifier_rows += report.qualifier_rows;
                stats.player_rows += report.player_rows;
                stats.total_matches = report.total_matches;

                info!(
                    "Ingested match {} from {}",
                    report.match_id,
                    path.display()
                );
            }
            Err(e) if e.is_storage() => {
                if let Some(pb) = &progress_bar {
                    pb.abandon_with_message("Storage failure");
                }
                error!("Storage failure, aborting batch: {}", e);
                return Err(e);
            }
            Err(e) => {
                error!("Failed to ingest {}: {}", path.display(), e);
                stats.failures += 1;
            }
        }
    }

    if let Some(pb) = &progress_bar {
        pb.finish_with_message("Ingestion complete");
    }

    stats.elapsed = start.elapsed();

    if !args.quiet {
        print_batch_summary(&stats);
    }

    Ok(stats)
}

/// Load one payload file and ingest it.
fn ingest_file(path: &Path, store: &AccumulationStore) -> Result<IngestReport> {
    let feed = MatchFeed::from_path(path)?;
    ingest_match(&feed, store)
}

/// Expand the given paths into a sorted list of payload files. Directories
/// are scanned for `*.json` files; explicit file paths are taken as-is.
fn collect_payload_files(paths: &[PathBuf]) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();

    for path in paths {
        if path.is_dir() {
            let pattern = path.join("*.json").to_string_lossy().to_string();
            let entries = glob::glob(&pattern).map_err(|e| FeedError::Configuration {
                message: format!("Invalid payload pattern '{}': {}", pattern, e),
            })?;
            for entry in entries {
                match entry {
                    Ok(file) => files.push(file),
                    Err(e) => warn!("Skipping unreadable payload: {}", e),
                }
            }
        } else {
            files.push(path.clone());
        }
    }

    files.sort();
    Ok(files)
}

/// Print the colored end-of-run summary.
fn print_batch_summary(stats: &BatchStats) {
    println!();
    println!("{}", "Ingestion complete".bright_green().bold());
    println!("  Files seen:        {}", stats.files_seen);
    println!(
        "  Matches ingested:  {}",
        stats.matches_ingested.to_string().bright_cyan()
    );
    println!("  Event rows:        {}", stats.event_rows);
    println!("  Qualifier rows:    {}", stats.qualifier_rows);
    println!("  Player rows:       {}", stats.player_rows);
    println!(
        "  Matches in store:  {}",
        stats.total_matches.to_string().bright_cyan()
    );
    if stats.failures > 0 {
        println!(
            "  Failed payloads:   {}",
            stats.failures.to_string().bright_red().bold()
        );
    }
    println!("  Elapsed:           {}", HumanDuration(stats.elapsed));
    println!();
}

/// Run the status command: per-table counts, plus the per-match listing and
/// stat summary when `--detailed` is set.
pub fn run_status(args: &StatusArgs) -> Result<()> {
    let store = AccumulationStore::new(&args.output);

    println!(
        "{} {}",
        "Store:".bright_white().bold(),
        args.output.display()
    );
    println!();

    for kind in TableKind::ALL {
        match store.load(kind) {
            Ok(table) => println!(
                "  {}: {} rows, {} columns",
                kind.to_string().bright_cyan(),
                table.height(),
                table.width()
            ),
            Err(FeedError::TableNotFound { .. }) => println!(
                "  {}: {}",
                kind.to_string().bright_cyan(),
                "not created yet".bright_black()
            ),
            Err(e) => return Err(e),
        }
    }

    let metadata = match store.load(TableKind::Metadata) {
        Ok(metadata) => metadata,
        Err(FeedError::TableNotFound { .. }) => {
            println!();
            println!("No matches ingested yet");
            return Ok(());
        }
        Err(e) => return Err(e),
    };

    println!();
    println!(
        "{} {}",
        "Accumulated matches:".bright_white().bold(),
        metadata.height()
    );

    if args.detailed {
        print_match_listing(&metadata)?;

        if let Ok(stats_table) = store.load(TableKind::Stats) {
            if stats_table.height() > 0 {
                let summary = summarize_stats(&stats_table)?;
                println!();
                println!("{}", "Stat summary:".bright_white().bold());
                println!("{summary}");
            }
        }
    }

    Ok(())
}

/// One line per accumulated match: id, date, teams and score.
fn print_match_listing(metadata: &DataFrame) -> Result<()> {
    let match_ids = metadata.column("match_id")?;
    let dates = metadata.column("local_date")?;
    let home = metadata.column("home_team_name")?;
    let away = metadata.column("away_team_name")?;
    let goals_home = metadata.column("goals_home")?;
    let goals_away = metadata.column("goals_away")?;

    println!();
    println!("{}", "Matches:".bright_white().bold());
    for i in 0..metadata.height() {
        println!(
            "  {}  {}  {} {} - {} {}",
            cell_text(match_ids, i).bright_yellow(),
            cell_text(dates, i),
            cell_text(home, i).bright_cyan(),
            cell_text(goals_home, i),
            cell_text(goals_away, i),
            cell_text(away, i).bright_cyan(),
        );
    }

    Ok(())
}

/// Cell rendered for terminal output. Nulls come out empty rather than as
/// the literal "null".
fn cell_text(column: &Column, row: usize) -> String {
    match column.get(row) {
        Ok(AnyValue::String(s)) => s.to_string(),
        Ok(AnyValue::Null) | Err(_) => String::new(),
        Ok(other) => other.to_string(),
    }
}
