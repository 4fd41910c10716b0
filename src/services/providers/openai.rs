/// OpenAI chat completion provider
///
/// Talks to any OpenAI-compatible `/chat/completions` endpoint. Model, temperature
/// and token cap are fixed at construction from configuration.
use crate::{
    config::Config,
    error::UpstreamError,
    models::{ChatCompletionRequest, ChatCompletionResponse, ChatMessage},
    services::{prompt::SYSTEM_INSTRUCTION, providers::ModelClient},
};
use reqwest::Client as HttpClient;
use std::time::Duration;

#[derive(Clone)]
pub struct OpenAiClient {
    http_client: HttpClient,
    api_key: String,
    api_url: String,
    model: String,
    temperature: f32,
    max_tokens: u32,
}

impl OpenAiClient {
    pub fn new(
        api_key: String,
        api_url: String,
        model: String,
        temperature: f32,
        max_tokens: u32,
        timeout: Duration,
    ) -> anyhow::Result<Self> {
        let http_client = HttpClient::builder().timeout(timeout).build()?;

        Ok(Self {
            http_client,
            api_key,
            api_url: api_url.trim_end_matches('/').to_string(),
            model,
            temperature,
            max_tokens,
        })
    }

    pub fn from_config(config: &Config) -> anyhow::Result<Self> {
        Self::new(
            config.openai_api_key.clone(),
            config.openai_api_url.clone(),
            config.openai_model.clone(),
            config.openai_temperature,
            config.openai_max_tokens,
            config.upstream_timeout(),
        )
    }

    fn completions_url(&self) -> String {
        format!("{}/chat/completions", self.api_url)
    }

    fn build_request(&self, prompt: &str) -> ChatCompletionRequest {
        ChatCompletionRequest {
            model: self.model.clone(),
            messages: vec![ChatMessage::system(SYSTEM_INSTRUCTION), ChatMessage::user(prompt)],
            max_tokens: self.max_tokens,
            temperature: self.temperature,
        }
    }
}

#[async_trait::async_trait]
impl ModelClient for OpenAiClient {
    async fn invoke(&self, prompt: &str) -> Result<String, UpstreamError> {
        let response = self
            .http_client
            .post(self.completions_url())
            .bearer_auth(&self.api_key)
            .json(&self.build_request(prompt))
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(UpstreamError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let response_text = response.text().await?;
        tracing::debug!(
            bytes = response_text.len(),
            provider = self.name(),
            "Raw completion response received"
        );

        let completion: ChatCompletionResponse = serde_json::from_str(&response_text)
            .map_err(|e| UpstreamError::Decode(e.to_string()))?;

        completion.first_content().ok_or(UpstreamError::EmptyContent)
    }

    fn name(&self) -> &'static str {
        "openai"
    }

    fn is_configured(&self) -> bool {
        !self.api_key.trim().is_empty()
    }
}
