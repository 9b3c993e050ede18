//! Deckcrew CLI: configuration, the bundled slide-deck pipeline, and the
//! commands that run it.

pub use cmd::{Cli, Command, ConfigCommand};
pub use config::DeckConfig;

pub mod cmd;
pub mod config;
pub mod pipeline;
pub mod utils;
