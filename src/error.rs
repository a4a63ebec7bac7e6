//! Error types for exclusion sets

use std::path::PathBuf;
use thiserror::Error;

use crate::core::matcher::MatchError;

#[derive(Error, Debug)]
pub enum ExclusionError {
    #[error("Malformed exclusion config: {0}")]
    MalformedConfig(#[from] serde_json::Error),

    #[error("Invalid pattern: pattern={pattern} err={source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: globset::Error,
    },

    #[error("Unable to resolve absolute pattern: {0}")]
    PathResolution(#[source] std::io::Error),

    #[error("IO error reading {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Match evaluation failed: {0}")]
    MatchEvaluation(#[from] MatchError),
}

pub type Result<T> = std::result::Result<T, ExclusionError>;
