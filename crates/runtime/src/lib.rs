//! Deckcrew runtime: the crew execution engine.
//!
//! A [`Crew`] owns an ordered list of agents and tasks and drives each task
//! through the prompt renderer and the completion [`Backend`], passing
//! upstream outputs to dependents through the `{context}` variable.
//!
//! # Example
//!
//! ```rust,ignore
//! use deckcrew_runtime::{Agent, Crew, Task, Variables};
//!
//! let crew = Crew::builder()
//!     .agent(Agent::new("Planner").goal("Plan a talk on {topic}"))
//!     .agent(Agent::new("Writer").goal("Write a talk on {topic}"))
//!     .task(Task::new("plan", "Planner").description("Outline {topic}."))
//!     .task(
//!         Task::new("write", "Writer")
//!             .description("Write slides from this outline:\n{context}")
//!             .depends_on("plan"),
//!     )
//!     .build(backend)?;
//!
//! let mut vars = Variables::new();
//! vars.insert("topic".into(), "Quantum Computing".into());
//! let deck = crew.kickoff(&vars).await?;
//! ```

pub use context::{RunContext, TaskState};
pub use crew::{Crew, CrewBuilder, CrewOutput, Process, TaskOutput};
pub use dcore::{
    Agent, Backend, Error, Persona, Result, Sink, Task, TaskId, Variables, placeholders, render,
};
pub use loader::{
    AGENTS_DIR, TASKS_DIR, load_agents_dir, load_pipeline, load_tasks_dir, parse_agent_md,
    parse_task_md,
};
pub use sink::FileSink;
pub use tokio_util::sync::CancellationToken;

mod context;
mod crew;
pub mod loader;
mod sink;
