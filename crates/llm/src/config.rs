//! Backend configuration

use serde::{Deserialize, Serialize};

/// Chat completions endpoint URLs.
pub mod endpoint {
    /// OpenAI chat completions.
    pub const OPENAI: &str = "https://api.openai.com/v1/chat/completions";
    /// DeepSeek chat completions.
    pub const DEEPSEEK: &str = "https://api.deepseek.com/chat/completions";
    /// Ollama local chat completions.
    pub const OLLAMA: &str = "http://localhost:11434/v1/chat/completions";
}

/// Which OpenAI-compatible service to talk to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderKind {
    /// OpenAI, or any bearer-authenticated compatible API via `base_url`.
    #[default]
    OpenAI,
    /// DeepSeek.
    DeepSeek,
    /// A local Ollama instance, no API key.
    Ollama,
}

impl ProviderKind {
    /// Default endpoint for this provider.
    pub fn endpoint(self) -> &'static str {
        match self {
            Self::OpenAI => endpoint::OPENAI,
            Self::DeepSeek => endpoint::DEEPSEEK,
            Self::Ollama => endpoint::OLLAMA,
        }
    }

    /// Environment variable holding this provider's API key.
    pub fn key_env(self) -> Option<&'static str> {
        match self {
            Self::OpenAI => Some("OPENAI_API_KEY"),
            Self::DeepSeek => Some("DEEPSEEK_API_KEY"),
            Self::Ollama => None,
        }
    }

    /// Whether requests carry a bearer token.
    pub fn requires_key(self) -> bool {
        !matches!(self, Self::Ollama)
    }
}

/// The `[llm]` section of the configuration.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct LlmConfig {
    /// Provider preset.
    pub provider: ProviderKind,
    /// Model name sent with every request.
    pub model: String,
    /// API key. Empty for providers without authentication.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub api_key: String,
    /// Overrides the provider's default endpoint.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
    /// Sampling temperature, provider default when unset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,
    /// Retries after the first failed attempt.
    pub max_retries: u32,
    /// Per-request timeout in seconds.
    pub timeout_secs: u64,
}

impl LlmConfig {
    /// The endpoint requests go to.
    pub fn endpoint(&self) -> &str {
        self.base_url
            .as_deref()
            .unwrap_or_else(|| self.provider.endpoint())
    }
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            provider: ProviderKind::OpenAI,
            model: "gpt-4o-mini".into(),
            api_key: String::new(),
            base_url: None,
            temperature: None,
            max_retries: 2,
            timeout_secs: 300,
        }
    }
}
