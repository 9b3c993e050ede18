//! Per-run state: variable bindings, task states, and produced outputs.

use crate::TaskOutput;
use compact_str::CompactString;
use dcore::{Error, Result, Task, TaskId, Variables, template::CONTEXT};
use std::{borrow::Cow, collections::BTreeMap};

/// Lifecycle of a task within one run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskState {
    /// At least one dependency is not done yet.
    Pending,
    /// All dependencies are done.
    Ready,
    /// The backend has been invoked and has not answered yet.
    Running,
    /// The output is stored in the run context.
    Done,
    /// The backend failed. Terminal.
    Failed,
}

/// Transient state owned by a single kickoff.
///
/// Created fresh for every run and dropped when the run ends, so nothing
/// leaks from one run into the next.
#[derive(Debug)]
pub struct RunContext {
    vars: Variables,
    states: BTreeMap<TaskId, TaskState>,
    outputs: Vec<TaskOutput>,
}

impl RunContext {
    /// Create a context for `tasks`, all pending.
    pub fn new(vars: Variables, tasks: &[Task]) -> Self {
        Self {
            vars,
            states: tasks
                .iter()
                .map(|task| (task.id.clone(), TaskState::Pending))
                .collect(),
            outputs: Vec::with_capacity(tasks.len()),
        }
    }

    /// Run-scoped variables.
    pub fn variables(&self) -> &Variables {
        &self.vars
    }

    /// Current state of a task.
    pub fn state(&self, id: &str) -> Option<TaskState> {
        self.states.get(id).copied()
    }

    /// Output of a finished task.
    pub fn output(&self, id: &str) -> Option<&str> {
        self.outputs
            .iter()
            .find(|out| out.id.as_str() == id)
            .map(|out| out.output.as_str())
    }

    /// Mark `task` ready, returning the newline-joined outputs of its
    /// dependencies in declaration order, or `None` when it has none.
    pub(crate) fn ready(&mut self, task: &Task) -> Result<Option<String>> {
        let mut upstream = Vec::with_capacity(task.depends_on.len());
        for dep in &task.depends_on {
            match (self.state(dep.as_str()), self.output(dep.as_str())) {
                (Some(TaskState::Done), Some(output)) => upstream.push(output),
                _ => {
                    return Err(Error::DependencyOrderViolation {
                        task: task.id.clone(),
                        dependency: dep.clone(),
                    });
                }
            }
        }

        let context = (!upstream.is_empty()).then(|| upstream.join("\n"));
        self.transition(&task.id, TaskState::Ready);
        Ok(context)
    }

    /// Variables for a task's own templates: the run variables, plus
    /// `context` when the task has dependencies.
    pub(crate) fn task_variables(&self, context: Option<String>) -> Cow<'_, Variables> {
        match context {
            None => Cow::Borrowed(&self.vars),
            Some(context) => {
                let mut vars = self.vars.clone();
                vars.insert(CompactString::const_new(CONTEXT), context);
                Cow::Owned(vars)
            }
        }
    }

    pub(crate) fn running(&mut self, id: &TaskId) {
        self.transition(id, TaskState::Running);
    }

    pub(crate) fn failed(&mut self, id: &TaskId) {
        self.transition(id, TaskState::Failed);
    }

    pub(crate) fn done(&mut self, output: TaskOutput) {
        self.transition(&output.id, TaskState::Done);
        self.outputs.push(output);
    }

    /// Consume the context, yielding outputs in execution order.
    pub(crate) fn into_outputs(self) -> Vec<TaskOutput> {
        self.outputs
    }

    fn transition(&mut self, id: &TaskId, to: TaskState) {
        if let Some(state) = self.states.get_mut(id) {
            tracing::debug!("task '{id}': {state:?} -> {to:?}");
            *state = to;
        }
    }
}
