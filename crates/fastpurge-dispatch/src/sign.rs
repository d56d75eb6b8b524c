/// Request signing seam.
///
/// Called exactly once per outbound attempt to produce the
/// `Authorization` header value. A failure here is fatal for the chunk
/// and is never retried; malformed credentials are expected to be
/// caught earlier, at load and validation time.
pub trait Signer: Send + Sync {
    type Error: std::error::Error + Send + 'static;

    fn sign(&self, method: &str, url: &str, body: &[u8]) -> Result<String, Self::Error>;
}
