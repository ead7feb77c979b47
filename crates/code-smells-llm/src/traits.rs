use async_trait::async_trait;
use thiserror::Error;

/// Errors that can occur while talking to the model API
#[derive(Error, Debug)]
pub enum ClientError {
    #[error("Request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    #[error("Response contained no text content")]
    EmptyResponse,
}

/// The core abstraction for model backends.
///
/// One prompt in, the response's primary text payload out. Nothing else
/// about the transport or response envelope leaks past this seam, which is
/// also what lets tests substitute a canned backend.
#[async_trait]
pub trait ModelClient: Send + Sync {
    /// Human-readable name of the backend (e.g. "Anthropic")
    fn name(&self) -> &str;

    /// Send a single completion request and return its text payload.
    async fn complete(&self, prompt: &str) -> Result<String, ClientError>;
}
