//! Error taxonomy for the visualization pipelines.
//!
//! Every error is a permanent abort of the current run: there is no retry and
//! no partial-output recovery.

use std::path::PathBuf;

use thiserror::Error;

/// Result type alias used throughout the crate.
pub type Result<T> = std::result::Result<T, VisError>;

#[derive(Debug, Error)]
pub enum VisError {
    /// File could not be read or written.
    #[error("i/o error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The document is not valid JSON.
    #[error("failed to parse node-link document: {0}")]
    Parse(#[from] serde_json::Error),

    /// The document is valid JSON but violates the node-link schema,
    /// e.g. an edge references a node id that does not exist.
    #[error("node-link schema violation: {0}")]
    Schema(String),

    /// An unknown layout algorithm name was configured.
    #[error("layout algorithm `{0}` is not implemented")]
    UnsupportedLayout(String),

    /// More distinct type groups than palette colors.
    #[error("palette exhausted: {needed} type groups but only {available} colors")]
    PaletteExhausted { needed: usize, available: usize },
}

impl VisError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        VisError::Io {
            path: path.into(),
            source,
        }
    }

    pub fn schema(msg: impl Into<String>) -> Self {
        VisError::Schema(msg.into())
    }
}
