//! CLI argument parsing and subcommand dispatch.

use crate::config::{self, DeckConfig};
use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use compact_str::CompactString;
use std::path::PathBuf;

pub mod config_cmd;
pub mod pipeline;
pub mod run;

/// Turn a topic into a slide deck with a crew of LLM agents.
#[derive(Parser, Debug)]
#[command(name = "deckcrew", about = "Turn a topic into a slide deck with a crew of LLM agents")]
pub struct Cli {
    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Command,

    /// Config file path.
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Model name override.
    #[arg(long, global = true)]
    pub model: Option<CompactString>,

    /// Pipeline directory override.
    #[arg(long, global = true)]
    pub pipeline: Option<PathBuf>,
}

/// Top-level subcommands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run the crew and save the deck.
    Run(RunArgs),
    /// Validate and describe the pipeline without calling the model.
    Pipeline,
    /// Manage configuration.
    Config {
        /// Config subcommand.
        #[command(subcommand)]
        action: ConfigCommand,
    },
}

/// Overrides for a single run.
#[derive(Args, Debug, Default)]
pub struct RunArgs {
    /// Presentation topic.
    #[arg(long)]
    pub topic: Option<String>,

    /// Output language.
    #[arg(long)]
    pub language: Option<String>,

    /// Output directory.
    #[arg(long)]
    pub output_dir: Option<PathBuf>,

    /// Output file name.
    #[arg(long)]
    pub output_file: Option<String>,

    /// Extra run variable, repeatable. `topic` and `language` set the run
    /// fields, below `--topic` and `--language`.
    #[arg(long = "var", value_name = "KEY=VALUE", value_parser = crate::utils::parse_key_val)]
    pub vars: Vec<(String, String)>,
}

/// Config management subcommands.
#[derive(Subcommand, Debug)]
pub enum ConfigCommand {
    /// Show the resolved configuration, API key redacted.
    Show,
    /// Print the path of the resolved config file.
    Path,
}

impl Cli {
    /// Execute the parsed command.
    pub async fn run(self) -> Result<()> {
        match self.command {
            Command::Config { ref action } => config_cmd::run(action, self.config.as_deref()),
            Command::Pipeline => {
                let config = self.resolve(None)?;
                pipeline::run(&config)
            }
            Command::Run(ref args) => {
                let config = self.resolve(Some(args))?;
                run::run(&config).await
            }
        }
    }

    /// Load the config and apply command line overrides.
    pub fn resolve(&self, args: Option<&RunArgs>) -> Result<DeckConfig> {
        let mut config = config::resolve_config(self.config.as_deref())?;
        self.apply(&mut config, args);
        Ok(config)
    }

    /// Apply command line overrides to a loaded config.
    pub fn apply(&self, config: &mut DeckConfig, args: Option<&RunArgs>) {
        if let Some(model) = &self.model {
            config.llm.model = model.to_string();
        }
        if let Some(pipeline) = &self.pipeline {
            config.pipeline = Some(pipeline.clone());
        }

        let Some(args) = args else { return };
        for (key, value) in &args.vars {
            match key.as_str() {
                "topic" => config.run.topic = value.clone(),
                "language" => config.run.language = value.clone(),
                _ => {
                    config.run.vars.insert(key.clone(), value.clone());
                }
            }
        }
        if let Some(topic) = &args.topic {
            config.run.topic = topic.clone();
        }
        if let Some(language) = &args.language {
            config.run.language = language.clone();
        }
        if let Some(dir) = &args.output_dir {
            config.output.dir = dir.clone();
        }
        if let Some(file) = &args.output_file {
            config.output.file = file.clone();
        }
    }
}
