//! Error types for the extraction pipeline.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Fatal pipeline failures. Everything else degrades into emptier output.
#[derive(Error, Debug)]
pub enum Error {
    #[error("cannot read {}: {source}", path.display())]
    NotFound {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("syntax error in {} at line {line}, column {column}: {message}", path.display())]
    Syntax {
        path: PathBuf,
        line: usize,
        column: usize,
        message: String,
    },

    #[error("python parser unavailable: {0}")]
    Parser(String),

    #[error("unsupported documentation style: {0} (expected google, numpy or sphinx)")]
    UnsupportedStyle(String),

    #[error("unknown format: {0} (expected markdown or json)")]
    UnknownFormat(String),

    #[error("failed to serialize documentation: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Attach a path to a syntax error raised on in-memory source.
    pub(crate) fn with_path(self, new_path: impl Into<PathBuf>) -> Self {
        match self {
            Error::Syntax {
                line,
                column,
                message,
                ..
            } => Error::Syntax {
                path: new_path.into(),
                line,
                column,
                message,
            },
            other => other,
        }
    }
}
