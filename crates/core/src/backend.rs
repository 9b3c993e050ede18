//! Completion backend abstraction.

use crate::Persona;
use anyhow::Result;
use std::sync::Arc;

/// A text-generation capability invoked once per task.
///
/// Implementations may retry, call tools, or reason over several turns;
/// the orchestrator treats each call as one opaque step. Implementations
/// must be reentrant for a crew to be kicked off concurrently.
pub trait Backend: Send + Sync {
    /// Generate the answer for a rendered task.
    fn complete(
        &self,
        persona: &Persona,
        description: &str,
        expected_output: &str,
    ) -> impl Future<Output = Result<String>> + Send;
}

impl<B: Backend> Backend for Arc<B> {
    fn complete(
        &self,
        persona: &Persona,
        description: &str,
        expected_output: &str,
    ) -> impl Future<Output = Result<String>> + Send {
        (**self).complete(persona, description, expected_output)
    }
}
