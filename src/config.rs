//! Configuration for the accumulation store.
//!
//! Controls where the accumulated Parquet tables live and how they are
//! written (compression algorithm, column statistics).

use polars::prelude::ParquetCompression;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Default directory the four accumulated tables are written to.
pub const DEFAULT_OUTPUT_DIR: &str = "data/match-events";

/// Supported compression algorithms for parquet files
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CompressionAlgorithm {
    /// Snappy compression - good balance of speed and compression
    Snappy,
    /// ZSTD compression - better compression ratio, slower
    Zstd,
    /// LZ4 compression - fastest, lower compression ratio
    Lz4,
    /// No compression
    Uncompressed,
}

impl CompressionAlgorithm {
    /// Convert to polars ParquetCompression type
    pub fn to_polars_compression(&self) -> ParquetCompression {
        match self {
            CompressionAlgorithm::Snappy => ParquetCompression::Snappy,
            CompressionAlgorithm::Zstd => ParquetCompression::Zstd(None),
            CompressionAlgorithm::Lz4 => ParquetCompression::Lz4Raw,
            CompressionAlgorithm::Uncompressed => ParquetCompression::Uncompressed,
        }
    }
}

impl std::str::FromStr for CompressionAlgorithm {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "snappy" => Ok(CompressionAlgorithm::Snappy),
            "zstd" => Ok(CompressionAlgorithm::Zstd),
            "lz4" => Ok(CompressionAlgorithm::Lz4),
            "none" | "uncompressed" => Ok(CompressionAlgorithm::Uncompressed),
            _ => Err(format!(
                "Unknown compression algorithm: {s}. Valid options: snappy, zstd, lz4, none"
            )),
        }
    }
}

/// Configuration for the accumulation store
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Directory holding the accumulated tables
    pub output_dir: PathBuf,

    /// Compression algorithm for written tables
    pub compression: CompressionAlgorithm,

    /// Write column statistics for query pruning
    pub enable_statistics: bool,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            compression: CompressionAlgorithm::Snappy,
            enable_statistics: true,
        }
    }
}

impl StoreConfig {
    /// Create configuration rooted at a specific output directory
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
            ..Self::default()
        }
    }

    /// Set the compression algorithm
    pub fn with_compression(mut self, compression: CompressionAlgorithm) -> Self {
        self.compression = compression;
        self
    }

    /// Disable column statistics
    pub fn without_statistics(mut self) -> Self {
        self.enable_statistics = false;
        self
    }
}
