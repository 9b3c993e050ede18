//! `deckcrew pipeline`: validate and describe the pipeline.

use crate::{config::DeckConfig, pipeline};
use anyhow::{Context, Result};
use runtime::CrewBuilder;
use std::fmt::Write;

/// Validate the configured pipeline and print its description.
pub fn run(config: &DeckConfig) -> Result<()> {
    let builder = pipeline::load(config.pipeline.as_deref())?;
    builder.validate().context("invalid pipeline")?;
    print!("{}", describe(&builder));
    Ok(())
}

/// Human-readable listing of agents, tasks, and required variables.
pub fn describe(builder: &CrewBuilder) -> String {
    let mut out = String::from("agents:\n");
    for agent in builder.defined_agents() {
        let _ = write!(out, "  {}", agent.role);
        if agent.verbose {
            out.push_str(" (verbose)");
        }
        out.push('\n');
    }

    out.push_str("tasks:\n");
    for task in builder.defined_tasks() {
        let _ = write!(out, "  {} -> {}", task.id, task.agent);
        if !task.depends_on.is_empty() {
            let deps: Vec<_> = task.depends_on.iter().map(|d| d.as_str()).collect();
            let _ = write!(out, " (after {})", deps.join(", "));
        }
        out.push('\n');
    }

    let vars: Vec<_> = builder.required_variables().into_iter().collect();
    let _ = writeln!(out, "variables: {}", vars.join(", "));
    out
}
