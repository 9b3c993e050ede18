//! Crew definition and the sequential execution engine.

use crate::RunContext;
use compact_str::CompactString;
use dcore::{
    Agent, Backend, Error, Result, Sink, Task, TaskId, Variables, placeholders, render,
    template::CONTEXT,
};
use serde::Serialize;
use std::collections::BTreeSet;
use tokio_util::sync::CancellationToken;

/// How a crew schedules its tasks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[non_exhaustive]
pub enum Process {
    /// One task at a time, strictly in declared order.
    #[default]
    Sequential,
}

/// The output of one finished task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TaskOutput {
    /// The task that produced this output.
    pub id: TaskId,
    /// Role of the agent that performed it.
    pub agent: CompactString,
    /// The backend's answer, unmodified.
    pub output: String,
}

/// The result of a complete run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CrewOutput {
    /// Output of the last declared task: the deliverable.
    pub raw: String,
    /// Every task's output, in execution order.
    pub tasks: Vec<TaskOutput>,
}

impl CrewOutput {
    /// Write the deliverable through `sink`.
    ///
    /// A failed write surfaces as [`Error::Io`]; the output is untouched
    /// and can be written again.
    pub async fn save(&self, sink: &impl Sink, path: &str) -> Result<()> {
        sink.write(path, &self.raw).await?;
        Ok(())
    }
}

/// Collects agents and tasks, then validates them into a [`Crew`].
#[derive(Debug, Default)]
pub struct CrewBuilder {
    agents: Vec<Agent>,
    tasks: Vec<Task>,
    process: Process,
}

impl CrewBuilder {
    /// Add an agent.
    pub fn agent(mut self, agent: Agent) -> Self {
        self.agents.push(agent);
        self
    }

    /// Add several agents.
    pub fn agents(mut self, agents: impl IntoIterator<Item = Agent>) -> Self {
        self.agents.extend(agents);
        self
    }

    /// Append a task. Declaration order is execution order.
    pub fn task(mut self, task: Task) -> Self {
        self.tasks.push(task);
        self
    }

    /// Append several tasks.
    pub fn tasks(mut self, tasks: impl IntoIterator<Item = Task>) -> Self {
        self.tasks.extend(tasks);
        self
    }

    /// Set the process.
    pub fn process(mut self, process: Process) -> Self {
        self.process = process;
        self
    }

    /// Agents added so far, in declaration order.
    pub fn defined_agents(&self) -> &[Agent] {
        &self.agents
    }

    /// Tasks added so far, in declaration order.
    pub fn defined_tasks(&self) -> &[Task] {
        &self.tasks
    }

    /// Names of the run variables the templates reference.
    ///
    /// `context` is left out for tasks with dependencies, since the engine
    /// supplies it there.
    pub fn required_variables(&self) -> BTreeSet<&str> {
        let agents = self
            .agents
            .iter()
            .flat_map(|agent| [agent.goal.as_str(), agent.backstory.as_str()])
            .flat_map(placeholders);
        let tasks = self.tasks.iter().flat_map(|task| {
            let synthesized = !task.depends_on.is_empty();
            [task.description.as_str(), task.expected_output.as_str()]
                .into_iter()
                .flat_map(placeholders)
                .filter(move |name| !(synthesized && *name == CONTEXT))
        });
        agents.chain(tasks).collect()
    }

    /// Validate the definition without binding a backend.
    pub fn validate(&self) -> Result<()> {
        preflight(&self.agents, &self.tasks)
    }

    /// Validate the definition and bind it to a backend.
    ///
    /// All definition errors surface here, before any task can run.
    pub fn build<B: Backend>(self, backend: B) -> Result<Crew<B>> {
        self.validate()?;
        Ok(Crew {
            backend,
            agents: self.agents,
            tasks: self.tasks,
            process: self.process,
        })
    }
}

/// An ordered collection of agents and tasks bound to a completion backend.
///
/// The crew is read-only while running: every kickoff owns a fresh
/// [`RunContext`], so concurrent kickoffs never share results.
pub struct Crew<B> {
    backend: B,
    agents: Vec<Agent>,
    tasks: Vec<Task>,
    process: Process,
}

impl Crew<()> {
    /// Start defining a crew.
    pub fn builder() -> CrewBuilder {
        CrewBuilder::default()
    }
}

impl<B: Backend> Crew<B> {
    /// Agents, in declaration order.
    pub fn agents(&self) -> &[Agent] {
        &self.agents
    }

    /// Tasks, in declaration order.
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    /// The scheduling process.
    pub fn process(&self) -> Process {
        self.process
    }

    /// The bound backend.
    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Look up an agent by role.
    pub fn agent(&self, role: &str) -> Option<&Agent> {
        self.agents.iter().find(|agent| agent.role == role)
    }

    /// Run every task and return the last declared task's output.
    ///
    /// The deliverable is always the last task in declaration order, not
    /// necessarily a task without dependents.
    pub async fn kickoff(&self, vars: &Variables) -> Result<String> {
        let output = self.run(vars, &CancellationToken::new()).await?;
        Ok(output.raw)
    }

    /// Run every task, returning the deliverable and all task outputs.
    ///
    /// `cancel` is checked between tasks only; an in-flight backend call is
    /// never interrupted. There is no engine-level deadline.
    pub async fn run(&self, vars: &Variables, cancel: &CancellationToken) -> Result<CrewOutput> {
        preflight(&self.agents, &self.tasks)?;
        let mut ctx = RunContext::new(vars.clone(), &self.tasks);
        match self.process {
            Process::Sequential => {
                for task in &self.tasks {
                    if cancel.is_cancelled() {
                        tracing::warn!("run cancelled before task '{}'", task.id);
                        return Err(Error::Cancelled);
                    }
                    self.execute(task, &mut ctx).await?;
                }
            }
        }

        let tasks = ctx.into_outputs();
        let raw = tasks
            .last()
            .map(|out| out.output.clone())
            .ok_or(Error::EmptyCrew)?;
        Ok(CrewOutput { raw, tasks })
    }

    /// Drive one task from ready to done.
    async fn execute(&self, task: &Task, ctx: &mut RunContext) -> Result<()> {
        let context = ctx.ready(task)?;
        let agent = self.agent(&task.agent).ok_or_else(|| Error::UnknownAgent {
            task: task.id.clone(),
            agent: task.agent.clone(),
        })?;

        let persona = agent.persona(ctx.variables())?;
        let (description, expected_output) = {
            let vars = ctx.task_variables(context);
            (
                render(&task.description, &vars)?,
                render(&task.expected_output, &vars)?,
            )
        };

        tracing::info!("{} started task '{}'", agent.role, task.id);
        ctx.running(&task.id);
        let output = match self
            .backend
            .complete(&persona, &description, &expected_output)
            .await
        {
            Ok(output) => output,
            Err(source) => {
                ctx.failed(&task.id);
                tracing::error!("task '{}' failed: {source:#}", task.id);
                return Err(Error::Backend {
                    task: task.id.clone(),
                    source,
                });
            }
        };

        if agent.verbose {
            tracing::info!("{} finished task '{}':\n{output}", agent.role, task.id);
        } else {
            tracing::debug!("{} finished task '{}':\n{output}", agent.role, task.id);
        }

        ctx.done(TaskOutput {
            id: task.id.clone(),
            agent: agent.role.clone(),
            output,
        });
        Ok(())
    }
}

/// Static checks over a whole definition.
fn preflight(agents: &[Agent], tasks: &[Task]) -> Result<()> {
    if tasks.is_empty() {
        return Err(Error::EmptyCrew);
    }

    let mut roles = BTreeSet::new();
    for agent in agents {
        if !roles.insert(agent.role.as_str()) {
            return Err(Error::DuplicateAgent(agent.role.clone()));
        }
    }

    let mut declared = BTreeSet::new();
    for task in tasks {
        if !roles.contains(task.agent.as_str()) {
            return Err(Error::UnknownAgent {
                task: task.id.clone(),
                agent: task.agent.clone(),
            });
        }
        if let Some(dep) = task
            .depends_on
            .iter()
            .find(|dep| !declared.contains(dep.as_str()))
        {
            return Err(Error::DependencyOrderViolation {
                task: task.id.clone(),
                dependency: dep.clone(),
            });
        }
        if !declared.insert(task.id.as_str()) {
            return Err(Error::DuplicateTask(task.id.clone()));
        }
    }

    Ok(())
}
