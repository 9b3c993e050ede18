//! Chat messages

use serde::{Deserialize, Deserializer, Serialize};

/// A message in the chat
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, Default)]
pub struct Message {
    /// The role of the message
    pub role: Role,

    /// The content of the message, empty when the provider sends `null`
    #[serde(default, deserialize_with = "null_as_empty")]
    pub content: String,
}

impl Message {
    /// Create a new system message
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: Role::System,
            content: content.into(),
        }
    }

    /// Create a new user message
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }
}

fn null_as_empty<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

/// The role of a message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// The system role
    System,
    /// The user role
    #[default]
    User,
    /// The assistant role
    Assistant,
}
