//! [`Backend`] implementation over [`HttpProvider`].

use crate::{HttpError, HttpProvider, LlmConfig, Message, Request, RetryConfig, with_retry};
use anyhow::Context;
use dcore::{Backend, Persona};
use reqwest::Client;
use std::time::Duration;

/// Completes tasks with one chat completion request each.
#[derive(Clone, Debug)]
pub struct LlmBackend {
    provider: HttpProvider,
    model: String,
    temperature: Option<f32>,
    retry: RetryConfig,
}

impl LlmBackend {
    /// Create a backend sending `model` requests through `provider`.
    pub fn new(provider: HttpProvider, model: impl Into<String>) -> Self {
        Self {
            provider,
            model: model.into(),
            temperature: None,
            retry: RetryConfig::default(),
        }
    }

    /// Build a backend from the `[llm]` configuration section.
    pub fn from_config(config: &LlmConfig) -> anyhow::Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .context("failed to build HTTP client")?;

        let endpoint = config.endpoint();
        let provider = if config.provider.requires_key() {
            if config.api_key.is_empty() {
                anyhow::bail!("no API key configured for provider {:?}", config.provider);
            }
            HttpProvider::bearer(client, &config.api_key, endpoint)?
        } else {
            HttpProvider::no_auth(client, endpoint)
        };

        tracing::debug!("using model {} at {endpoint}", config.model);
        let backend =
            Self::new(provider, &config.model).with_retry(RetryConfig::new(config.max_retries));
        Ok(match config.temperature {
            Some(t) => backend.with_temperature(t),
            None => backend,
        })
    }

    /// Set the retry policy.
    pub fn with_retry(mut self, retry: RetryConfig) -> Self {
        self.retry = retry;
        self
    }

    /// Set the sampling temperature.
    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }

    /// The underlying transport.
    pub fn provider(&self) -> &HttpProvider {
        &self.provider
    }

    /// The request body for one task.
    pub fn request(&self, persona: &Persona, description: &str, expected_output: &str) -> Request {
        let request = Request::new(&self.model).messages(vec![
            Message::system(system_prompt(persona)),
            Message::user(user_prompt(description, expected_output)),
        ]);
        match self.temperature {
            Some(t) => request.temperature(t),
            None => request,
        }
    }
}

impl Backend for LlmBackend {
    async fn complete(
        &self,
        persona: &Persona,
        description: &str,
        expected_output: &str,
    ) -> anyhow::Result<String> {
        let request = self.request(persona, description, expected_output);
        let operation = format!("completion for {}", persona.role);
        let response = with_retry(&self.retry, &operation, || self.provider.send(&request)).await?;

        if let Some(usage) = response.usage {
            tracing::debug!(
                "{} used {} prompt + {} completion tokens",
                persona.role,
                usage.prompt_tokens,
                usage.completion_tokens
            );
        }

        response
            .content()
            .map(str::to_owned)
            .ok_or_else(|| HttpError::Empty.into())
    }
}

/// System message describing who the agent is.
pub fn system_prompt(persona: &Persona) -> String {
    let mut prompt = format!("You are {}.", persona.role);
    if !persona.backstory.is_empty() {
        prompt.push(' ');
        prompt.push_str(&persona.backstory);
    }
    if !persona.goal.is_empty() {
        prompt.push_str("\nYour personal goal is: ");
        prompt.push_str(&persona.goal);
    }
    prompt
}

/// User message carrying the task and its acceptance criteria.
pub fn user_prompt(description: &str, expected_output: &str) -> String {
    if expected_output.is_empty() {
        return description.to_owned();
    }
    format!(
        "{description}\n\nThis is the expected criteria for your final answer: {expected_output}\n\
         You MUST return the actual complete content as the final answer, not a summary."
    )
}
