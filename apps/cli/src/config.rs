//! Configuration for the CLI.
//!
//! Resolves deckcrew.toml in priority order:
//! 1. `--config <path>` flag (explicit override)
//! 2. `{cwd}/deckcrew.toml` (project config)
//! 3. `~/.config/deckcrew/deckcrew.toml` (global default)
//!
//! If the global default doesn't exist, it is generated automatically.

use anyhow::{Context, Result};
use llm::LlmConfig;
use runtime::Variables;
use serde::{Deserialize, Serialize};
use std::{
    collections::BTreeMap,
    path::{Path, PathBuf},
};

/// Config file name.
pub const CONFIG_FILE: &str = "deckcrew.toml";

/// Default config template generated when no config exists.
pub const DEFAULT_CONFIG: &str = r#"# Directory with agents/*.md and tasks/*.md replacing the bundled
# slide-deck pipeline.
# pipeline = "pipeline"

[llm]
provider = "openai"
model = "gpt-4o-mini"
api_key = "${OPENAI_API_KEY}"
max_retries = 2
timeout_secs = 300

[run]
topic = "Quantum Computing"
language = "English"

[output]
dir = "output"
file = "presentation.md"
"#;

/// Placeholder shown instead of a configured API key.
const REDACTED: &str = "<redacted>";

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct DeckConfig {
    /// Pipeline directory overriding the bundled one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pipeline: Option<PathBuf>,
    /// Completion backend.
    pub llm: LlmConfig,
    /// Run variables.
    pub run: RunConfig,
    /// Where the deliverable goes.
    pub output: OutputConfig,
}

/// The `[run]` section.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct RunConfig {
    /// Presentation topic, `{topic}` in the templates.
    pub topic: String,
    /// Output language, `{language}` in the templates.
    pub language: String,
    /// Extra run variables.
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub vars: BTreeMap<String, String>,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            topic: "Quantum Computing".into(),
            language: "English".into(),
            vars: BTreeMap::new(),
        }
    }
}

/// The `[output]` section.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Output directory, created when missing.
    pub dir: PathBuf,
    /// Output file name inside `dir`.
    pub file: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("output"),
            file: "presentation.md".into(),
        }
    }
}

impl OutputConfig {
    /// Full path of the deliverable.
    pub fn path(&self) -> PathBuf {
        self.dir.join(&self.file)
    }
}

impl DeckConfig {
    /// Parse a TOML string into a `DeckConfig`, expanding environment
    /// variables in `${VAR}` format before parsing.
    pub fn from_toml(toml_str: &str) -> Result<Self> {
        let expanded = crate::utils::expand_env_vars(toml_str);
        let config: Self = toml::from_str(&expanded)?;
        Ok(config)
    }

    /// Load configuration from a file path.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    /// Run variables: `[run.vars]`, then `topic` and `language`.
    pub fn variables(&self) -> Variables {
        let mut vars: Variables = self
            .run
            .vars
            .iter()
            .map(|(k, v)| (k.as_str().into(), v.clone()))
            .collect();
        vars.insert("topic".into(), self.run.topic.clone());
        vars.insert("language".into(), self.run.language.clone());
        vars
    }

    /// Let the provider's key variable, when set, win over the file.
    pub fn with_env_key(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        let key = self
            .llm
            .provider
            .key_env()
            .and_then(lookup)
            .filter(|key| !key.is_empty());
        if let Some(key) = key {
            self.llm.api_key = key;
        }
        self
    }

    /// A copy safe to print.
    pub fn redacted(&self) -> Self {
        let mut config = self.clone();
        if !config.llm.api_key.is_empty() {
            config.llm.api_key = REDACTED.to_owned();
        }
        config
    }
}

/// Resolve the config path following the priority chain, generating the
/// global default when nothing exists.
pub fn resolve_config_path(config_flag: Option<&Path>) -> Result<PathBuf> {
    if let Some(path) = config_flag {
        return Ok(path.to_path_buf());
    }

    let project_path = PathBuf::from(CONFIG_FILE);
    if project_path.exists() {
        return Ok(project_path);
    }

    let global_path = global_config_path();
    if !global_path.exists() {
        generate_default_config(&global_path)?;
        tracing::info!("generated default config at {}", global_path.display());
    }
    Ok(global_path)
}

/// Resolve and load the config.
pub fn resolve_config(config_flag: Option<&Path>) -> Result<DeckConfig> {
    let path = resolve_config_path(config_flag)?;
    let config = DeckConfig::load(&path)
        .with_context(|| format!("failed to load config from {}", path.display()))?;
    Ok(config.with_env_key(|name| std::env::var(name).ok()))
}

/// Path to the global default config.
pub fn global_config_path() -> PathBuf {
    dirs::config_dir()
        .or_else(|| dirs::home_dir().map(|h| h.join(".config")))
        .unwrap_or_else(|| PathBuf::from(".config"))
        .join("deckcrew")
        .join(CONFIG_FILE)
}

/// Generate a default deckcrew.toml at the given path.
pub fn generate_default_config(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create config directory {}", parent.display()))?;
    }
    std::fs::write(path, DEFAULT_CONFIG)
        .with_context(|| format!("failed to write default config to {}", path.display()))?;
    Ok(())
}
