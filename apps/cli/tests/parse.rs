//! Tests for CLI argument parsing.

use clap::Parser;
use deckcrew_cli::{Cli, Command, ConfigCommand, DeckConfig};
use std::path::Path;

#[test]
fn cli_parse_run_defaults() {
    let cli = Cli::parse_from(["deckcrew", "run"]);
    match cli.command {
        Command::Run(args) => {
            assert!(args.topic.is_none());
            assert!(args.vars.is_empty());
        }
        _ => panic!("expected Run command"),
    }
}

#[test]
fn cli_parse_run_overrides() {
    let cli = Cli::parse_from([
        "deckcrew",
        "run",
        "--topic",
        "Rust",
        "--language",
        "German",
        "--output-dir",
        "decks",
        "--output-file",
        "rust.md",
        "--var",
        "audience=engineers",
    ]);
    match cli.command {
        Command::Run(args) => {
            assert_eq!(args.topic.as_deref(), Some("Rust"));
            assert_eq!(args.language.as_deref(), Some("German"));
            assert_eq!(args.output_dir.as_deref(), Some(Path::new("decks")));
            assert_eq!(args.output_file.as_deref(), Some("rust.md"));
            assert_eq!(
                args.vars,
                vec![("audience".to_owned(), "engineers".to_owned())]
            );
        }
        _ => panic!("expected Run command"),
    }
}

#[test]
fn cli_parse_global_flags() {
    let cli = Cli::parse_from([
        "deckcrew",
        "pipeline",
        "--model",
        "gpt-4o",
        "--config",
        "custom.toml",
        "--pipeline",
        "my-pipeline",
    ]);
    assert!(matches!(cli.command, Command::Pipeline));
    assert_eq!(cli.model.as_deref(), Some("gpt-4o"));
    assert_eq!(cli.config.as_deref(), Some(Path::new("custom.toml")));
    assert_eq!(cli.pipeline.as_deref(), Some(Path::new("my-pipeline")));
}

#[test]
fn cli_parse_config_show() {
    let cli = Cli::parse_from(["deckcrew", "config", "show"]);
    assert!(matches!(
        cli.command,
        Command::Config {
            action: ConfigCommand::Show
        }
    ));
}

#[test]
fn cli_rejects_malformed_var() {
    assert!(Cli::try_parse_from(["deckcrew", "run", "--var", "novalue"]).is_err());
}

#[test]
fn flags_override_config() {
    let cli = Cli::parse_from([
        "deckcrew",
        "--model",
        "deepseek-chat",
        "run",
        "--topic",
        "Rust",
        "--output-file",
        "rust.md",
        "--var",
        "audience=engineers",
    ]);
    let Command::Run(args) = &cli.command else {
        panic!("expected Run command");
    };

    let mut config = DeckConfig::default();
    cli.apply(&mut config, Some(args));

    assert_eq!(config.llm.model, "deepseek-chat");
    assert_eq!(config.run.topic, "Rust");
    assert_eq!(config.run.language, "English");
    assert_eq!(config.output.path(), Path::new("output").join("rust.md"));
    assert_eq!(config.variables()["audience"], "engineers");
}

#[test]
fn var_flags_override_config_topic_and_language() {
    let cli = Cli::parse_from(["deckcrew", "run", "--var", "language=French"]);
    let Command::Run(args) = &cli.command else {
        panic!("expected Run command");
    };

    let mut config = DeckConfig::from_toml("[run]\ntopic = \"Rust\"\nlanguage = \"English\"\n")
        .unwrap();
    cli.apply(&mut config, Some(args));

    let vars = config.variables();
    assert_eq!(vars["language"], "French");
    assert_eq!(vars["topic"], "Rust");
}

#[test]
fn dedicated_flags_win_over_var_flags() {
    let cli = Cli::parse_from([
        "deckcrew", "run", "--var", "topic=Go", "--topic", "Rust",
    ]);
    let Command::Run(args) = &cli.command else {
        panic!("expected Run command");
    };

    let mut config = DeckConfig::default();
    cli.apply(&mut config, Some(args));
    assert_eq!(config.variables()["topic"], "Rust");
}
