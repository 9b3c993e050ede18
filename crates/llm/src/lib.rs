//! OpenAI-compatible completion backend.
//!
//! This crate turns a rendered [`Persona`](dcore::Persona) plus a task
//! description into one chat completion request: the persona becomes the
//! system message, the description and expected output become the user
//! message. [`HttpProvider`] owns the transport, [`LlmBackend`] implements
//! [`dcore::Backend`] on top of it with adapter-level retries.

pub use backend::{LlmBackend, system_prompt, user_prompt};
pub use config::{LlmConfig, ProviderKind, endpoint};
pub use message::{Message, Role};
pub use provider::{HttpError, HttpProvider};
pub use request::Request;
pub use response::{Choice, Response, Usage};
pub use reqwest::{self, Client};
pub use retry::{RetryConfig, with_retry};

mod backend;
mod config;
mod message;
mod provider;
mod request;
mod response;
mod retry;
