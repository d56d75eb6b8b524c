use std::sync::Arc;

use bytes::Bytes;
use tokio::task::JoinHandle;
use tracing::{error, info, warn};
use uuid::Uuid;

use fastpurge_core::ChunkError;

use crate::http::{PurgeClient, PurgeResponse};
use crate::retry::{Disposition, RetryPolicy, backoff_delay, classify};
use crate::sign::Signer;

/// Terminal outcome of one chunk's delivery loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeliveryOutcome {
    /// A 201 arrived on the recorded attempt (0-indexed).
    Succeeded { attempts: u32 },
    /// A non-retryable status ended the loop.
    FailedTerminal { status: u16 },
    /// The signer refused the request; not retried.
    SigningFailed,
    /// The retry budget ran out without a 201.
    ExhaustedRetries,
}

/// One chunk's delivery state: the immutable body bytes plus the retry
/// counter, owned exclusively by the task that runs the loop.
struct DeliveryAttempt {
    request_id: Uuid,
    body: Bytes,
    attempt: u32,
    last_status: Option<u16>,
}

impl DeliveryAttempt {
    fn new(body: Bytes) -> Self {
        Self {
            request_id: Uuid::new_v4(),
            body,
            attempt: 0,
            last_status: None,
        }
    }
}

/// Fans out one delivery task per chunk and joins them all.
///
/// There is no concurrency cap: fan-out matches the chunk count, and
/// each task suspends independently during its own backoff without
/// affecting its siblings.
pub struct Dispatcher<C, S> {
    client: Arc<C>,
    signer: Arc<S>,
    endpoint: String,
    policy: RetryPolicy,
}

impl<C, S> Clone for Dispatcher<C, S> {
    fn clone(&self) -> Self {
        Self {
            client: Arc::clone(&self.client),
            signer: Arc::clone(&self.signer),
            endpoint: self.endpoint.clone(),
            policy: self.policy,
        }
    }
}

impl<C, S> Dispatcher<C, S>
where
    C: PurgeClient + 'static,
    S: Signer + 'static,
{
    pub fn new(client: C, signer: S, endpoint: impl Into<String>) -> Self {
        Self {
            client: Arc::new(client),
            signer: Arc::new(signer),
            endpoint: endpoint.into(),
            policy: RetryPolicy::default(),
        }
    }

    /// Override the retry budget and backoff base.
    #[must_use]
    pub fn with_policy(mut self, policy: RetryPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Start one delivery task per produced chunk and wait until every
    /// started task, including all the retries it schedules, finishes.
    ///
    /// A chunk-production error stops further fan-out and is returned
    /// once the already-started tasks have completed; those tasks are
    /// not cancelled. Per-chunk delivery outcomes are observable only
    /// through the emitted log lines.
    pub async fn dispatch_all<I>(&self, chunks: I) -> Result<(), ChunkError>
    where
        I: IntoIterator<Item = Result<Vec<u8>, ChunkError>>,
    {
        let mut handles: Vec<JoinHandle<DeliveryOutcome>> = Vec::new();
        let mut production_error = None;

        for chunk in chunks {
            match chunk {
                Ok(body) => {
                    let task = self.clone();
                    let body = Bytes::from(body);
                    handles.push(tokio::spawn(async move { task.deliver(body).await }));
                }
                Err(err) => {
                    error!(error = %err, "chunk production failed; no further requests will be dispatched");
                    production_error = Some(err);
                    break;
                }
            }
        }

        let total = handles.len();
        let mut delivered = 0usize;
        for handle in handles {
            match handle.await {
                Ok(DeliveryOutcome::Succeeded { .. }) => delivered += 1,
                Ok(_) => {}
                Err(err) => error!(error = %err, "delivery task panicked"),
            }
        }
        info!(total, delivered, "dispatch complete");

        match production_error {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    /// Run a single chunk's bounded retry loop to its terminal outcome.
    ///
    /// The body bytes are resent verbatim on every attempt; only the
    /// attempt counter and last-seen status mutate, and both are local
    /// to this call.
    pub async fn deliver(&self, body: Bytes) -> DeliveryOutcome {
        let mut attempt = DeliveryAttempt::new(body);
        let request_id = attempt.request_id;

        while attempt.attempt < self.policy.max_attempts {
            let authorization = match self.signer.sign("POST", &self.endpoint, &attempt.body) {
                Ok(header) => header,
                Err(err) => {
                    error!(%request_id, error = %err, "request signing failed; abandoning chunk");
                    return DeliveryOutcome::SigningFailed;
                }
            };

            match self
                .client
                .post(&self.endpoint, &authorization, attempt.body.clone())
                .await
            {
                Ok(PurgeResponse { status, body }) => {
                    attempt.last_status = Some(status);
                    info!(%request_id, status, attempt = attempt.attempt, response = %body, "purge response");

                    match classify(status) {
                        Disposition::Success => {
                            return DeliveryOutcome::Succeeded {
                                attempts: attempt.attempt,
                            };
                        }
                        Disposition::Retry => {}
                        Disposition::Terminal => {
                            error!(
                                %request_id,
                                status,
                                content_length = attempt.body.len(),
                                response = %body,
                                authorization = %authorization,
                                request = %String::from_utf8_lossy(&attempt.body),
                                "purge rejected with non-retryable status"
                            );
                            return DeliveryOutcome::FailedTerminal { status };
                        }
                    }
                }
                Err(err) => {
                    warn!(%request_id, attempt = attempt.attempt, error = %err, "request failed without a response");
                }
            }

            // Transport errors and retryable statuses share this path;
            // no delay after the final permitted attempt.
            if attempt.attempt + 1 < self.policy.max_attempts {
                tokio::time::sleep(backoff_delay(attempt.attempt, self.policy.base)).await;
            }
            attempt.attempt += 1;
        }

        warn!(
            %request_id,
            attempts = self.policy.max_attempts,
            last_status = ?attempt.last_status,
            "retry budget exhausted"
        );
        DeliveryOutcome::ExhaustedRetries
    }
}
