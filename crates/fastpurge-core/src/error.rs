use std::io;

use thiserror::Error;

/// Validation failures for a raw [`Config`](crate::Config), one variant
/// per rule, reported in the order the rules are checked.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("edgerc does not have \"host\" parameter")]
    MissingHost,

    #[error("edgerc does not have \"client_token\" parameter")]
    MissingClientToken,

    #[error("edgerc does not have \"client_secret\" parameter")]
    MissingClientSecret,

    #[error("edgerc does not have \"access_token\" parameter")]
    MissingAccessToken,

    #[error("invalidation method must be \"invalidate\" or \"delete\", got {0:?}")]
    InvalidMethod(String),

    #[error("invalidation network must be \"production\" or \"staging\", got {0:?}")]
    InvalidNetwork(String),

    #[error("invalidation list type must be \"json\" or \"text\", got {0:?}")]
    InvalidFileType(String),
}

/// Structural failures while producing chunks. All of them are fatal to
/// the run: chunk production stops, though chunks already handed off
/// keep delivering.
#[derive(Debug, Error)]
pub enum ChunkError {
    #[error("line {line} is not a valid URL or cache key: {source}")]
    MalformedUrl {
        line: u64,
        #[source]
        source: url::ParseError,
    },

    #[error("malformed JSON document in request stream: {0}")]
    Json(#[from] serde_json::Error),

    #[error("failed to read input: {0}")]
    Io(#[from] io::Error),
}
