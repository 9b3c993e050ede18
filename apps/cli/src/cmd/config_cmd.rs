//! Config management commands: show, path.

use crate::{
    cmd::ConfigCommand,
    config::{DeckConfig, resolve_config_path},
};
use anyhow::{Context, Result};
use std::path::Path;

/// Dispatch config management subcommands.
pub fn run(action: &ConfigCommand, config_flag: Option<&Path>) -> Result<()> {
    let path = resolve_config_path(config_flag)?;
    match action {
        ConfigCommand::Path => println!("{}", path.display()),
        ConfigCommand::Show => {
            let config = DeckConfig::load(&path)
                .with_context(|| format!("failed to load config from {}", path.display()))?
                .with_env_key(|name| std::env::var(name).ok());
            println!("# {}", path.display());
            print!("{}", toml::to_string_pretty(&config.redacted())?);
        }
    }
    Ok(())
}
