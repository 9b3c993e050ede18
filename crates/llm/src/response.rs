//! Chat completion response body

use crate::Message;
use compact_str::CompactString;
use serde::Deserialize;

/// A chat completion response.
#[derive(Debug, Clone, Deserialize)]
pub struct Response {
    /// Response id
    #[serde(default)]
    pub id: CompactString,

    /// The model that answered
    #[serde(default)]
    pub model: CompactString,

    /// Completion choices
    #[serde(default)]
    pub choices: Vec<Choice>,

    /// Token accounting, when the provider reports it
    #[serde(default)]
    pub usage: Option<Usage>,
}

impl Response {
    /// Content of the first choice, if any.
    pub fn content(&self) -> Option<&str> {
        self.choices
            .first()
            .map(|choice| choice.message.content.as_str())
            .filter(|content| !content.is_empty())
    }
}

/// One completion choice.
#[derive(Debug, Clone, Deserialize)]
pub struct Choice {
    /// Choice index
    #[serde(default)]
    pub index: u32,

    /// The generated message
    pub message: Message,

    /// Why generation stopped
    #[serde(default)]
    pub finish_reason: Option<CompactString>,
}

/// Token usage of one completion.
#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct Usage {
    /// Prompt tokens
    #[serde(default)]
    pub prompt_tokens: u32,
    /// Completion tokens
    #[serde(default)]
    pub completion_tokens: u32,
    /// Total tokens
    #[serde(default)]
    pub total_tokens: u32,
}
