use std::future::Future;

use bytes::Bytes;

/// Response to a single purge POST: the status code plus the full
/// response text, kept for the diagnostic log lines.
#[derive(Debug, Clone)]
pub struct PurgeResponse {
    pub status: u16,
    pub body: String,
}

/// Asynchronous HTTP client abstraction.
///
/// The minimal surface the retry loop needs. Implementations handle
/// their own connection pooling and TLS configuration; the pooled
/// client is assumed safe for concurrent use by every delivery task.
///
/// # Implementations
///
/// - [`ReqwestClient`]: production implementation using `reqwest`
/// - Scripted clients in tests
pub trait PurgeClient: Send + Sync {
    /// Error type for transport-level failures.
    type Error: std::error::Error + Send + 'static;

    /// POST the body with the given authorization header.
    ///
    /// An `Ok` carries whatever status the service returned; an `Err`
    /// means no response was received at all.
    fn post(
        &self,
        url: &str,
        authorization: &str,
        body: Bytes,
    ) -> impl Future<Output = Result<PurgeResponse, Self::Error>> + Send;
}

/// Production client backed by `reqwest`'s pooled async client.
#[derive(Debug, Clone, Default)]
pub struct ReqwestClient {
    client: reqwest::Client,
}

impl ReqwestClient {
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::new(),
        }
    }
}

impl PurgeClient for ReqwestClient {
    type Error = reqwest::Error;

    async fn post(
        &self,
        url: &str,
        authorization: &str,
        body: Bytes,
    ) -> Result<PurgeResponse, Self::Error> {
        let response = self
            .client
            .post(url)
            .header(reqwest::header::AUTHORIZATION, authorization)
            .header(reqwest::header::CONTENT_TYPE, "application/json")
            .body(body)
            .send()
            .await?;

        let status = response.status().as_u16();
        let body = response.text().await?;
        Ok(PurgeResponse { status, body })
    }
}
