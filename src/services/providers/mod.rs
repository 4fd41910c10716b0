/// Generative model abstraction
///
/// A provider only moves text to and from the upstream model. Retry, parsing and
/// fallback live above it, so every implementation reports one attempt's outcome.
use crate::error::UpstreamError;

pub mod openai;

pub use openai::OpenAiClient;

/// Trait for generative text providers
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait ModelClient: Send + Sync {
    /// Sends `prompt` as the user message and returns the model's raw text.
    ///
    /// An answer without content is an `UpstreamError::EmptyContent`, never `Ok("")`.
    async fn invoke(&self, prompt: &str) -> Result<String, UpstreamError>;

    /// Provider name for logging and debugging
    fn name(&self) -> &'static str;

    /// Whether credentials are present, for the health check
    fn is_configured(&self) -> bool {
        true
    }
}
