use serde::{Deserialize, Serialize};
use std::fmt;

/// Upstream LLM provider configuration
#[derive(Clone, Serialize, Deserialize)]
pub struct UpstreamConfig {
    /// When disabled the proxy answers with canned demo responses
    #[serde(default = "UpstreamConfig::default_enabled")]
    pub enabled: bool,
    /// Provider API base URL (e.g., https://api.anthropic.com)
    #[serde(default = "UpstreamConfig::default_base_url")]
    pub base_url: String,
    /// Model identifier sent with every completion request
    #[serde(default = "UpstreamConfig::default_model")]
    pub model: String,
    #[serde(default = "UpstreamConfig::default_max_tokens")]
    pub max_tokens: u32,
    /// Value of the `anthropic-version` header
    #[serde(default = "UpstreamConfig::default_api_version")]
    pub api_version: String,
    /// HTTP request timeout in seconds, 0 for none
    #[serde(default = "UpstreamConfig::default_timeout_secs")]
    pub timeout_secs: u64,
    /// Overrides the locale's built-in persona instruction
    #[serde(default)]
    pub system_prompt: Option<String>,
    /// Artificial latency of the demo connector
    #[serde(default = "UpstreamConfig::default_demo_delay_ms")]
    pub demo_delay_ms: u64,
    /// API credential (from env: ANTHROPIC_API_KEY)
    #[serde(skip)]
    pub api_key: Option<String>,
}

impl UpstreamConfig {
    const fn default_enabled() -> bool {
        true
    }

    fn default_base_url() -> String {
        "https://api.anthropic.com".to_string()
    }

    fn default_model() -> String {
        "claude-sonnet-4-20250514".to_string()
    }

    const fn default_max_tokens() -> u32 {
        4096
    }

    fn default_api_version() -> String {
        "2023-06-01".to_string()
    }

    const fn default_timeout_secs() -> u64 {
        0
    }

    const fn default_demo_delay_ms() -> u64 {
        1500
    }
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            enabled: Self::default_enabled(),
            base_url: Self::default_base_url(),
            model: Self::default_model(),
            max_tokens: Self::default_max_tokens(),
            api_version: Self::default_api_version(),
            timeout_secs: Self::default_timeout_secs(),
            system_prompt: None,
            demo_delay_ms: Self::default_demo_delay_ms(),
            api_key: None,
        }
    }
}

// Keeps the credential out of logs.
impl fmt::Debug for UpstreamConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UpstreamConfig")
            .field("enabled", &self.enabled)
            .field("base_url", &self.base_url)
            .field("model", &self.model)
            .field("max_tokens", &self.max_tokens)
            .field("api_version", &self.api_version)
            .field("timeout_secs", &self.timeout_secs)
            .field("system_prompt", &self.system_prompt.as_ref().map(|_| "<custom>"))
            .field("demo_delay_ms", &self.demo_delay_ms)
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}
