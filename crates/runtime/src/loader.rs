//! Markdown-based pipeline definitions.
//!
//! Agents and tasks are markdown files with YAML frontmatter. For agents the
//! frontmatter holds the role, goal, and flags, and the body becomes the
//! backstory template. For tasks it holds the id, agent, expected output,
//! and dependencies, and the body becomes the description template.
//!
//! A pipeline directory contains `agents/*.md` and `tasks/*.md`; files load
//! in filename order, so task filenames fix the declaration order.

use crate::CrewBuilder;
use anyhow::Context;
use dcore::{Agent, Task};
use serde::Deserialize;
use std::path::Path;

/// Agents subdirectory of a pipeline.
pub const AGENTS_DIR: &str = "agents";
/// Tasks subdirectory of a pipeline.
pub const TASKS_DIR: &str = "tasks";

/// YAML frontmatter for agent markdown files.
#[derive(Deserialize)]
struct AgentFrontmatter {
    role: String,
    #[serde(default)]
    goal: String,
    #[serde(default)]
    allow_delegation: bool,
    #[serde(default)]
    verbose: bool,
}

/// YAML frontmatter for task markdown files.
#[derive(Deserialize)]
struct TaskFrontmatter {
    id: String,
    agent: String,
    #[serde(default)]
    expected_output: String,
    #[serde(default)]
    depends_on: Vec<String>,
}

/// Parse an agent markdown file into an [`Agent`].
pub fn parse_agent_md(content: &str) -> anyhow::Result<Agent> {
    let (frontmatter, body) = split_yaml_frontmatter(content)?;
    let fm: AgentFrontmatter = serde_yml::from_str(frontmatter)?;

    Ok(Agent::new(fm.role)
        .goal(fm.goal.trim())
        .backstory(body.trim())
        .allow_delegation(fm.allow_delegation)
        .verbose(fm.verbose))
}

/// Parse a task markdown file into a [`Task`].
pub fn parse_task_md(content: &str) -> anyhow::Result<Task> {
    let (frontmatter, body) = split_yaml_frontmatter(content)?;
    let fm: TaskFrontmatter = serde_yml::from_str(frontmatter)?;

    let mut task = Task::new(fm.id, fm.agent)
        .description(body.trim())
        .expected_output(fm.expected_output.trim());
    for dep in fm.depends_on {
        task = task.depends_on(dep);
    }

    Ok(task)
}

/// Load all agent markdown files from a directory.
///
/// Returns an empty vec if the directory does not exist.
pub fn load_agents_dir(path: &Path) -> anyhow::Result<Vec<Agent>> {
    load_md_dir(path, parse_agent_md)
}

/// Load all task markdown files from a directory, in filename order.
///
/// Returns an empty vec if the directory does not exist.
pub fn load_tasks_dir(path: &Path) -> anyhow::Result<Vec<Task>> {
    load_md_dir(path, parse_task_md)
}

/// Load a pipeline directory into an unvalidated [`CrewBuilder`].
pub fn load_pipeline(dir: &Path) -> anyhow::Result<CrewBuilder> {
    let agents = load_agents_dir(&dir.join(AGENTS_DIR))?;
    let tasks = load_tasks_dir(&dir.join(TASKS_DIR))?;
    tracing::debug!(
        "loaded {} agents and {} tasks from {}",
        agents.len(),
        tasks.len(),
        dir.display()
    );
    Ok(CrewBuilder::default().agents(agents).tasks(tasks))
}

fn load_md_dir<T>(path: &Path, parse: fn(&str) -> anyhow::Result<T>) -> anyhow::Result<Vec<T>> {
    if !path.exists() {
        tracing::warn!("pipeline directory does not exist: {}", path.display());
        return Ok(Vec::new());
    }

    let mut entries: Vec<_> = std::fs::read_dir(path)?
        .filter_map(|e| e.ok())
        .filter(|e| e.path().extension().is_some_and(|ext| ext == "md"))
        .collect();
    entries.sort_by_key(|e| e.file_name());

    let mut items = Vec::with_capacity(entries.len());
    for entry in entries {
        let path = entry.path();
        let content = std::fs::read_to_string(&path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        items.push(parse(&content).with_context(|| format!("invalid {}", path.display()))?);
    }

    Ok(items)
}

/// Split `---` delimited YAML frontmatter from the markdown body.
fn split_yaml_frontmatter(content: &str) -> anyhow::Result<(&str, &str)> {
    let content = content.trim_start();
    if !content.starts_with("---") {
        anyhow::bail!("missing YAML frontmatter delimiter (---)");
    }

    let after_first = content[3..].trim_start_matches(['\n', '\r']);

    let mut pos = 0;
    for line in after_first.split_inclusive('\n') {
        if line.trim() == "---" {
            let frontmatter = after_first[..pos].trim_end();
            let body = &after_first[pos + line.len()..];
            return Ok((frontmatter, body));
        }
        pos += line.len();
    }

    anyhow::bail!("missing closing YAML frontmatter delimiter (---)")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn split_frontmatter_and_body() {
        let (fm, body) = split_yaml_frontmatter("---\nrole: Editor\n---\nBody text\n").unwrap();
        assert_eq!(fm, "role: Editor");
        assert_eq!(body, "Body text\n");
    }

    #[test]
    fn split_handles_crlf() {
        let (fm, body) = split_yaml_frontmatter("---\r\nrole: Editor\r\n---\r\nBody").unwrap();
        assert_eq!(fm, "role: Editor");
        assert_eq!(body, "Body");
    }

    #[test]
    fn split_requires_delimiters() {
        assert!(split_yaml_frontmatter("role: Editor").is_err());
        assert!(split_yaml_frontmatter("---\nrole: Editor\n").is_err());
    }
}
