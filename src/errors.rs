//! Unified application error type.
//! Core format failures are Option-shaped sentinels, never errors; AppError
//! covers the crate's fallible edges (I/O, config, dataset, CLI resolution).

use std::io;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    // ---------------------------
    // IO
    // ---------------------------
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    // ---------------------------
    // Parsing errors
    // ---------------------------
    #[error("Invalid date format: {0}")]
    InvalidDate(String),

    #[error("Invalid time format: {0}")]
    InvalidTime(String),

    #[error("Unresolvable timezone identifier: {0}")]
    UnknownZone(String),

    // ---------------------------
    // Lookup errors
    // ---------------------------
    #[error("No location matches: {0}")]
    UnknownLocation(String),

    #[error("Invalid slot: {0} (expected 1 or 2)")]
    InvalidSlot(u8),

    // ---------------------------
    // Dataset errors
    // ---------------------------
    #[error("Dataset error: {0}")]
    Dataset(#[from] serde_json::Error),

    // ---------------------------
    // Config errors
    // ---------------------------
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Failed to parse configuration: {0}")]
    ConfigParse(#[from] serde_yaml::Error),
}

pub type AppResult<T> = Result<T, AppError>;
