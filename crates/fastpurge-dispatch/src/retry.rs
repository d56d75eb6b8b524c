use std::time::Duration;

/// Total attempts permitted per chunk, the initial attempt included.
pub const RETRY_THRESHOLD: u32 = 10;

/// Backoff base; attempt *i* sleeps somewhere in `[base·2^i / 2, base·2^i]`.
pub const BACKOFF_BASE: Duration = Duration::from_secs(5);

/// Retry budget and backoff base governing one chunk's delivery loop.
///
/// The defaults match the upstream service guidance; tests shrink the
/// base so no scenario sleeps for real.
#[derive(Debug, Clone, Copy)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub base: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: RETRY_THRESHOLD,
            base: BACKOFF_BASE,
        }
    }
}

impl RetryPolicy {
    #[must_use]
    pub fn max_attempts(mut self, max_attempts: u32) -> Self {
        self.max_attempts = max_attempts;
        self
    }

    #[must_use]
    pub fn base(mut self, base: Duration) -> Self {
        self.base = base;
        self
    }
}

/// Delay before the retry that follows attempt `attempt` (0-indexed).
///
/// Samples uniformly from the half-to-full range of the exponential
/// value: `[base·2^attempt / 2, base·2^attempt]`. Unlike textbook full
/// jitter, which samples `[0, exp]`, this variant keeps a floor under
/// the delay while still spreading concurrent retries apart.
pub fn backoff_delay(attempt: u32, base: Duration) -> Duration {
    let full = base.saturating_mul(2_u32.saturating_pow(attempt));
    let half = full / 2;
    let span = full.as_millis().saturating_sub(half.as_millis()) as u64;
    half + Duration::from_millis(fastrand::u64(0..=span))
}

/// Disposition of one HTTP response within the retry loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Disposition {
    /// 201 Created: the purge request was accepted.
    Success,
    /// Worth another attempt after the backoff delay.
    Retry,
    /// Anything else ends the loop immediately.
    Terminal,
}

/// Classify a response status for the retry loop.
///
/// 201 succeeds; 429 and every 5xx (which covers the service's 507
/// over-rate signal) are retried; all other statuses are terminal,
/// including ordinary 4xx client errors.
pub fn classify(status: u16) -> Disposition {
    match status {
        201 => Disposition::Success,
        429 => Disposition::Retry,
        s if (500..600).contains(&s) => Disposition::Retry,
        _ => Disposition::Terminal,
    }
}
