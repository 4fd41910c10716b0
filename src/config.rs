use serde::Deserialize;
use std::time::Duration;

use crate::services::retry::RetryPolicy;

/// Application configuration loaded from environment variables
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// OpenAI API key
    pub openai_api_key: String,

    /// OpenAI-compatible API base URL
    #[serde(default = "default_openai_api_url")]
    pub openai_api_url: String,

    /// Chat completion model identifier
    #[serde(default = "default_openai_model")]
    pub openai_model: String,

    /// Sampling temperature sent with every completion
    #[serde(default = "default_openai_temperature")]
    pub openai_temperature: f32,

    /// Completion token cap
    #[serde(default = "default_openai_max_tokens")]
    pub openai_max_tokens: u32,

    /// Maximum upstream attempts per recommendation request
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,

    /// Base delay for exponential backoff, in milliseconds
    #[serde(default = "default_retry_base_delay_ms")]
    pub retry_base_delay_ms: u64,

    /// Timeout for a single upstream call, in seconds
    #[serde(default = "default_upstream_timeout_secs")]
    pub upstream_timeout_secs: u64,

    /// Timeout for a whole inbound HTTP request, in seconds
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,

    /// Browser origins allowed by CORS (comma separated in the environment)
    #[serde(default = "default_cors_origins")]
    pub cors_origins: Vec<String>,

    /// Server host address
    #[serde(default = "default_host")]
    pub host: String,

    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_openai_api_url() -> String {
    "https://api.openai.com/v1".to_string()
}

fn default_openai_model() -> String {
    "gpt-3.5-turbo".to_string()
}

fn default_openai_temperature() -> f32 {
    0.7
}

fn default_openai_max_tokens() -> u32 {
    2000
}

fn default_max_retries() -> u32 {
    3
}

fn default_retry_base_delay_ms() -> u64 {
    1000
}

fn default_upstream_timeout_secs() -> u64 {
    30
}

fn default_request_timeout_secs() -> u64 {
    120
}

fn default_cors_origins() -> Vec<String> {
    vec![
        "http://localhost:3000".to_string(),
        "http://frontend:3000".to_string(),
    ]
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    3001
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        let config = envy::from_env::<Config>()
            .map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> anyhow::Result<()> {
        if self.openai_api_key.trim().is_empty() {
            anyhow::bail!("OPENAI_API_KEY is not configured");
        }
        if self.max_retries == 0 {
            anyhow::bail!("MAX_RETRIES must be at least 1");
        }
        let worst_case = self.worst_case_upstream_time();
        if self.request_timeout() < worst_case {
            anyhow::bail!(
                "REQUEST_TIMEOUT_SECS ({}s) must cover every upstream attempt and backoff ({}s)",
                self.request_timeout_secs,
                worst_case.as_secs_f64().ceil()
            );
        }
        Ok(())
    }

    /// Longest a recommendation can spend upstream: every attempt timing out,
    /// plus the backoff between attempts
    pub fn worst_case_upstream_time(&self) -> Duration {
        let policy = RetryPolicy::from_config(self);
        self.upstream_timeout()
            .saturating_mul(policy.max_attempts)
            .saturating_add(policy.total_backoff())
    }

    pub fn retry_base_delay(&self) -> Duration {
        Duration::from_millis(self.retry_base_delay_ms)
    }

    pub fn upstream_timeout(&self) -> Duration {
        Duration::from_secs(self.upstream_timeout_secs)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
