//! The bundled slide-deck pipeline and pipeline selection.

use anyhow::{Context, Result};
use runtime::{CrewBuilder, parse_agent_md, parse_task_md};
use std::path::Path;

const AGENTS: &[(&str, &str)] = &[
    ("planner.md", include_str!("../pipeline/agents/planner.md")),
    ("writer.md", include_str!("../pipeline/agents/writer.md")),
    ("editor.md", include_str!("../pipeline/agents/editor.md")),
];

const TASKS: &[(&str, &str)] = &[
    ("01-plan.md", include_str!("../pipeline/tasks/01-plan.md")),
    ("02-write.md", include_str!("../pipeline/tasks/02-write.md")),
    ("03-edit.md", include_str!("../pipeline/tasks/03-edit.md")),
];

/// The planner → writer → editor pipeline compiled into the binary.
pub fn bundled() -> Result<CrewBuilder> {
    let agents = AGENTS
        .iter()
        .map(|(name, md)| parse_agent_md(md).with_context(|| format!("bundled agent {name}")))
        .collect::<Result<Vec<_>>>()?;
    let tasks = TASKS
        .iter()
        .map(|(name, md)| parse_task_md(md).with_context(|| format!("bundled task {name}")))
        .collect::<Result<Vec<_>>>()?;
    Ok(CrewBuilder::default().agents(agents).tasks(tasks))
}

/// Load the pipeline at `dir`, or the bundled one when `None`.
pub fn load(dir: Option<&Path>) -> Result<CrewBuilder> {
    let Some(dir) = dir else {
        return bundled();
    };
    if !dir.is_dir() {
        anyhow::bail!("pipeline directory {} does not exist", dir.display());
    }
    runtime::load_pipeline(dir)
        .with_context(|| format!("failed to load pipeline from {}", dir.display()))
}
