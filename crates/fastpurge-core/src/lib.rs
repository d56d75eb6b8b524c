//! Configuration model and size-bounded request chunking.
//!
//! The pure layer of the purge pipeline: no network, no clocks, no I/O
//! beyond the `Read` sources handed to the chunkers. The effects layer
//! (`fastpurge-dispatch`) consumes the chunk sequences produced here.

mod body;
mod chunk;
mod config;
mod error;

pub use body::{JSON_OVERHEAD, LINE_OVERHEAD, MAX_BODY_SIZE, RequestBody};
pub use chunk::{JsonChunker, TextChunker};
pub use config::{Config, Credentials, FileType, Network, PurgeConfig, PurgeMethod};
pub use error::{ChunkError, ConfigError};
