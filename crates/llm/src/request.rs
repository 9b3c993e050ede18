//! Chat completion request body

use crate::Message;
use serde::Serialize;

/// A non-streaming chat completion request.
#[derive(Debug, Clone, Serialize)]
pub struct Request {
    /// The model to use
    pub model: String,

    /// The conversation
    pub messages: Vec<Message>,

    /// Sampling temperature
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,

    /// Always false, the backend waits for the whole answer
    pub stream: bool,
}

impl Request {
    /// Create a request for `model`
    pub fn new(model: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            messages: Vec::new(),
            temperature: None,
            stream: false,
        }
    }

    /// Set the messages
    pub fn messages(mut self, messages: Vec<Message>) -> Self {
        self.messages = messages;
        self
    }

    /// Set the temperature
    pub fn temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }
}
