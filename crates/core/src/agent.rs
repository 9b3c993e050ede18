//! Agent configuration.
//!
//! An [`Agent`] is pure config: a role plus goal and backstory templates.
//! It has no behavior; the runtime renders it into a [`Persona`] per task.

use crate::{Result, Variables, render};
use compact_str::CompactString;

/// An agent persona descriptor.
///
/// Agents are identified by `role`, which tasks use to bind to them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Agent {
    /// Role name, unique within a crew.
    pub role: CompactString,
    /// Goal template.
    pub goal: String,
    /// Backstory template.
    pub backstory: String,
    /// Whether the backend may delegate work to other agents.
    pub allow_delegation: bool,
    /// Log this agent's outputs at `info` instead of `debug`.
    pub verbose: bool,
}

impl Agent {
    /// Create a new agent with the given role.
    pub fn new(role: impl Into<CompactString>) -> Self {
        Self {
            role: role.into(),
            ..Default::default()
        }
    }

    /// Set the goal template.
    pub fn goal(mut self, goal: impl Into<String>) -> Self {
        self.goal = goal.into();
        self
    }

    /// Set the backstory template.
    pub fn backstory(mut self, backstory: impl Into<String>) -> Self {
        self.backstory = backstory.into();
        self
    }

    /// Set the delegation policy.
    pub fn allow_delegation(mut self, allow: bool) -> Self {
        self.allow_delegation = allow;
        self
    }

    /// Set the verbose flag.
    pub fn verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    /// Render the goal and backstory templates into a persona.
    pub fn persona(&self, vars: &Variables) -> Result<Persona> {
        Ok(Persona {
            role: self.role.clone(),
            goal: render(&self.goal, vars)?,
            backstory: render(&self.backstory, vars)?,
            allow_delegation: self.allow_delegation,
            verbose: self.verbose,
        })
    }
}

/// A rendered agent persona, handed to the completion backend.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Persona {
    pub role: CompactString,
    pub goal: String,
    pub backstory: String,
    pub allow_delegation: bool,
    pub verbose: bool,
}
