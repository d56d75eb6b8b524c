use std::io;
use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum EdgercError {
    #[error("failed to read edgerc file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("edgerc file {path} has no [{section}] section")]
    MissingSection { path: PathBuf, section: String },
}

#[derive(Debug, Error)]
pub enum SignError {
    #[error("cannot sign request for invalid URL {url}: {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },

    #[error("cannot sign request for URL without a host: {0}")]
    MissingHost(String),

    #[error("client secret is not a usable HMAC key")]
    InvalidKey,
}
