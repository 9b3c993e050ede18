//! Orchestration errors.

use crate::TaskId;
use compact_str::CompactString;

/// Result alias for orchestration operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Every way a crew definition or a run can fail.
///
/// Definition errors are detected before any backend call. A run never
/// produces a partial result: any error aborts it.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A task depends on a task that is not declared before it.
    #[error("task '{task}' depends on '{dependency}', which is not declared before it")]
    DependencyOrderViolation {
        /// The dependent task.
        task: TaskId,
        /// The offending dependency.
        dependency: TaskId,
    },

    /// A task is bound to a role that no agent in the crew carries.
    #[error("task '{task}' is bound to unknown agent '{agent}'")]
    UnknownAgent {
        /// The task.
        task: TaskId,
        /// The missing agent role.
        agent: CompactString,
    },

    /// Two tasks share an id.
    #[error("duplicate task id '{0}'")]
    DuplicateTask(TaskId),

    /// Two agents share a role.
    #[error("duplicate agent role '{0}'")]
    DuplicateAgent(CompactString),

    /// The crew declares no tasks, so there is no deliverable.
    #[error("crew declares no tasks")]
    EmptyCrew,

    /// A template references a variable with no binding.
    #[error("template references missing variable '{name}'")]
    MissingVariable {
        /// The placeholder name.
        name: CompactString,
    },

    /// The completion backend failed while running a task.
    #[error("backend failed on task '{task}'")]
    Backend {
        /// The task that was running.
        task: TaskId,
        /// The backend's error.
        #[source]
        source: anyhow::Error,
    },

    /// The artifact sink failed.
    #[error("sink write failed")]
    Io(#[from] std::io::Error),

    /// The run was cancelled between tasks.
    #[error("run cancelled")]
    Cancelled,
}
