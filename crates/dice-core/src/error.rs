//! Error types shared by every crate in the workspace.

use std::path::PathBuf;

use thiserror::Error;

/// Everything that can go wrong while building dice vocabulary or loading
/// configuration. Rolling itself never fails.
#[derive(Debug, Error)]
pub enum DiceError {
    #[error("die face {0} is outside 1..=6")]
    InvalidFace(u8),

    #[error("dice count {0} is not supported (expected 1 or 2)")]
    InvalidDiceCount(usize),

    #[error("tick interval {0}s is outside the accepted range")]
    InvalidTickInterval(f64),

    #[error("total ticks {0} is outside 1..={max}", max = crate::constants::MAX_TOTAL_TICKS)]
    InvalidTotalTicks(u32),

    #[error("failed to read config {path}: {source}")]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config: {0}")]
    ConfigParse(#[from] serde_json::Error),
}
