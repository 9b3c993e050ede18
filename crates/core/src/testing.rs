//! In-memory backend and sink for tests.

use crate::{Backend, Persona, Sink};
use anyhow::Result;
use compact_str::CompactString;
use parking_lot::Mutex;
use std::{collections::BTreeMap, sync::Arc};

type Script = dyn Fn(&Persona, &str, &str) -> Result<String> + Send + Sync;

/// A recorded backend invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Call {
    pub persona: Persona,
    pub description: String,
    pub expected_output: String,
}

/// A backend driven by a closure that records every call.
#[derive(Clone)]
pub struct ScriptedBackend {
    script: Arc<Script>,
    calls: Arc<Mutex<Vec<Call>>>,
}

impl ScriptedBackend {
    /// Answer every call with `script`.
    pub fn new<F>(script: F) -> Self
    where
        F: Fn(&Persona, &str, &str) -> Result<String> + Send + Sync + 'static,
    {
        Self {
            script: Arc::new(script),
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Answer with a fixed reply per agent role; unknown roles fail.
    pub fn by_role<'a>(replies: impl IntoIterator<Item = (&'a str, &'a str)>) -> Self {
        let replies: BTreeMap<CompactString, String> = replies
            .into_iter()
            .map(|(role, reply)| (CompactString::from(role), reply.to_owned()))
            .collect();
        Self::new(move |persona, _, _| {
            replies
                .get(&persona.role)
                .cloned()
                .ok_or_else(|| anyhow::anyhow!("no reply scripted for '{}'", persona.role))
        })
    }

    /// All calls received so far, in order.
    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().clone()
    }

    /// Roles of the agents invoked so far, in order.
    pub fn roles(&self) -> Vec<CompactString> {
        self.calls
            .lock()
            .iter()
            .map(|call| call.persona.role.clone())
            .collect()
    }
}

impl Backend for ScriptedBackend {
    async fn complete(
        &self,
        persona: &Persona,
        description: &str,
        expected_output: &str,
    ) -> Result<String> {
        self.calls.lock().push(Call {
            persona: persona.clone(),
            description: description.to_owned(),
            expected_output: expected_output.to_owned(),
        });
        (self.script)(persona, description, expected_output)
    }
}

/// A sink that keeps written artifacts in memory.
#[derive(Clone, Default)]
pub struct MemorySink {
    files: Arc<Mutex<BTreeMap<String, String>>>,
    fail: bool,
}

impl MemorySink {
    /// Create an empty sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a sink whose writes always fail.
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    /// Content written to `path`, if any.
    pub fn get(&self, path: &str) -> Option<String> {
        self.files.lock().get(path).cloned()
    }
}

impl Sink for MemorySink {
    async fn write(&self, path: &str, content: &str) -> std::io::Result<()> {
        if self.fail {
            return Err(std::io::Error::other(format!("refusing to write {path}")));
        }
        self.files.lock().insert(path.to_owned(), content.to_owned());
        Ok(())
    }
}
