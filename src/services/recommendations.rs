use crate::{
    config::Config,
    error::RecommendationUnavailableError,
    models::{PreferenceSpec, RecommendationResult},
    services::{
        parser,
        prompt::build_prompt,
        providers::{ModelClient, OpenAiClient},
        retry::{RetryPolicy, RetryingInvoker},
    },
};
use chrono::Utc;
use std::sync::Arc;

const PREVIEW_CHARS: usize = 50;

/// Generates fragrance recommendations for a preference spec
///
/// Runs prompt → model call (with retry) → parse → timestamp, strictly in that
/// order. Unusable model text is absorbed into the fallback catalog and still
/// succeeds; an unreachable model after all retries surfaces as
/// `RecommendationUnavailableError`.
#[derive(Clone)]
pub struct RecommendationService {
    invoker: RetryingInvoker,
}

impl RecommendationService {
    pub fn new(invoker: RetryingInvoker) -> Self {
        Self { invoker }
    }

    /// Wires the OpenAI provider and retry policy from configuration
    pub fn from_config(config: &Config) -> anyhow::Result<Self> {
        let client: Arc<dyn ModelClient> = Arc::new(OpenAiClient::from_config(config)?);
        let policy = RetryPolicy::from_config(config);

        tracing::info!(
            model = %config.openai_model,
            max_attempts = policy.max_attempts,
            base_delay_ms = config.retry_base_delay_ms,
            "Recommendation service configured"
        );

        Ok(Self::new(RetryingInvoker::new(client, policy)))
    }

    /// Whether the upstream provider has credentials
    pub fn is_model_configured(&self) -> bool {
        self.invoker.client().is_configured()
    }

    pub async fn get_recommendations(
        &self,
        spec: &PreferenceSpec,
    ) -> Result<RecommendationResult, RecommendationUnavailableError> {
        tracing::info!(
            preferences = %spec.preview(PREVIEW_CHARS),
            notes = spec.preferred_notes.len(),
            "Processing fragrance request"
        );

        let prompt = build_prompt(spec);

        let raw = self.invoker.call(&prompt).await.map_err(|e| {
            tracing::error!(error = %e, "Failed to generate fragrance recommendations");
            RecommendationUnavailableError::from(e)
        })?;

        let recommendations = parser::parse_response(&raw);

        tracing::info!(
            count = recommendations.recommendations.len(),
            "Generated fragrance recommendations"
        );

        Ok(recommendations.stamped(Utc::now()))
    }
}
