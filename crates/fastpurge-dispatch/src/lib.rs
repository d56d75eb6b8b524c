//! Concurrent delivery of purge request chunks with bounded retry.
//!
//! The effects layer of the purge pipeline. One delivery task is
//! spawned per chunk, each governed by its own retry loop with
//! exponential backoff and jitter; the dispatcher blocks until every
//! task, including all retries, has finished. Per-chunk outcomes are
//! reported through `tracing` only; the caller sees a structured error
//! solely for failures that occur before a chunk is handed off.
//!
//! Network and signing sit behind the [`PurgeClient`] and [`Signer`]
//! traits, so the retry machine is exercised against scripted clients
//! in tests and against `reqwest` in production.

mod dispatch;
mod http;
mod retry;
mod sign;

pub use dispatch::{DeliveryOutcome, Dispatcher};
pub use http::{PurgeClient, PurgeResponse, ReqwestClient};
pub use retry::{BACKOFF_BASE, Disposition, RETRY_THRESHOLD, RetryPolicy, backoff_delay, classify};
pub use sign::Signer;
