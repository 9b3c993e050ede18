//! Task definitions.

use compact_str::CompactString;
use serde::{Deserialize, Serialize};
use std::{borrow::Borrow, fmt};

/// Opaque task handle, unique within a crew.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskId(CompactString);

impl TaskId {
    /// The id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Borrow<str> for TaskId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl From<&str> for TaskId {
    fn from(id: &str) -> Self {
        Self(CompactString::from(id))
    }
}

impl From<String> for TaskId {
    fn from(id: String) -> Self {
        Self(CompactString::from(id))
    }
}

impl From<CompactString> for TaskId {
    fn from(id: CompactString) -> Self {
        Self(id)
    }
}

/// A unit of work bound to one agent.
///
/// Templates are rendered per run. Tasks listed in `depends_on` must be
/// declared earlier in the crew; their outputs are joined into the
/// `{context}` variable, which templates reference explicitly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Task {
    /// Task identifier.
    pub id: TaskId,
    /// Role of the agent that performs this task.
    pub agent: CompactString,
    /// Description template.
    pub description: String,
    /// Expected-output template.
    pub expected_output: String,
    /// Upstream tasks, in context order.
    pub depends_on: Vec<TaskId>,
}

impl Task {
    /// Create a task bound to the agent with the given role.
    pub fn new(id: impl Into<TaskId>, agent: impl Into<CompactString>) -> Self {
        Self {
            id: id.into(),
            agent: agent.into(),
            description: String::new(),
            expected_output: String::new(),
            depends_on: Vec::new(),
        }
    }

    /// Set the description template.
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Set the expected-output template.
    pub fn expected_output(mut self, expected: impl Into<String>) -> Self {
        self.expected_output = expected.into();
        self
    }

    /// Append an upstream dependency.
    pub fn depends_on(mut self, id: impl Into<TaskId>) -> Self {
        self.depends_on.push(id.into());
        self
    }
}
