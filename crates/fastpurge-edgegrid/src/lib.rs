//! EdgeGrid credential loading and request signing.
//!
//! Loads a [`Credentials`](fastpurge_core::Credentials) bundle from an
//! `.edgerc` INI section and computes EG1-HMAC-SHA256 `Authorization`
//! headers for outbound requests. Malformed credential files surface as
//! errors, never panics; validation of the loaded values happens in
//! `fastpurge-core` before any request is signed.

mod edgerc;
mod error;
mod sign;

pub use edgerc::{DEFAULT_MAX_BODY, load_edgerc};
pub use error::{EdgercError, SignError};
pub use sign::EdgeGridSigner;
