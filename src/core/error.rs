//! Error types for placement and persistence.
//!
//! Neither is fatal to a run: placement failures skip a spawn, store failures
//! fall back to defaults.

use std::io;
use thiserror::Error;

/// Random placement gave up before finding a free cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PlacementError {
    #[error("no free cell found after {attempts} attempts")]
    Exhausted { attempts: u32 },
}

/// Settings or leaderboard storage could not be read or written.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("could not determine a data directory")]
    NoDataDir,
    #[error("storage I/O failed: {0}")]
    Io(#[from] io::Error),
    #[error("stored record is malformed: {0}")]
    Json(#[from] serde_json::Error),
}
