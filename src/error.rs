//! Error types
//!
//! Only persistence and level lookup can fail. Clicks on empty space, empty
//! sample sets and similar cases have defined results and are not errors.

use std::path::PathBuf;

use thiserror::Error;

/// Reading or writing the record store failed
#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed records in {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("failed to encode records for {path}: {source}")]
    Serialize {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// The requested level has no configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("no configuration for level {level}")]
pub struct InvalidLevelError {
    pub level: u32,
}

/// A level table violates its invariants
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("level {level}: {reason}")]
    InvalidLevel { level: u32, reason: &'static str },
    #[error("level {level} is defined more than once")]
    DuplicateLevel { level: u32 },
    #[error("level table is empty")]
    Empty,
}
