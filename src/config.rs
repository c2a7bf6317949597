//! Configuration file support for spm-depgraph.
//!
//! Provides YAML-based configuration through `spm-depgraph.config.yml` files,
//! including data structures, file loading, and validation. Tokens are never
//! stored here; the file only names the environment variables holding them.

use anyhow::{bail, Context};
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;

use crate::application::dto::OutputFormat;
use crate::shared::Result;

pub const CONFIG_FILENAME: &str = "spm-depgraph.config.yml";

/// Archive directory used when neither the CLI nor the config names one
pub const DEFAULT_OUTPUT_DIR: &str = "all_dependencies_tree";

/// Environment variable read for a token when `token_env` is not configured
pub const DEFAULT_TOKEN_ENV: &str = "GITHUB_TOKEN";

/// Top-level configuration file schema.
#[derive(Debug, Deserialize, Default)]
pub struct ConfigFile {
    pub format: Option<String>,
    pub output_dir: Option<String>,
    /// Names of environment variables holding GitHub tokens, used round-robin
    pub token_env: Option<Vec<String>>,
    pub api_base_url: Option<String>,
    pub fetch_delay_ms: Option<u64>,
    pub seed_delay_ms: Option<u64>,
    /// Branches tried after the repository's default branch
    pub branches: Option<Vec<String>>,
    /// Captures unknown fields for warnings.
    #[serde(flatten)]
    pub unknown_fields: HashMap<String, serde_yaml_ng::Value>,
}

impl ConfigFile {
    /// The configured format, parsed
    pub fn output_format(&self) -> Result<Option<OutputFormat>> {
        self.format
            .as_deref()
            .map(|f| f.parse::<OutputFormat>().map_err(anyhow::Error::msg))
            .transpose()
    }

    pub fn token_variables(&self) -> Vec<String> {
        self.token_env
            .clone()
            .unwrap_or_else(|| vec![DEFAULT_TOKEN_ENV.to_string()])
    }
}

/// Load config from an explicit path. Returns an error if the file is not found.
pub fn load_config_from_path(path: &Path) -> Result<ConfigFile> {
    let content = std::fs::read_to_string(path).with_context(|| {
        format!(
            "Failed to read config file: {}\n\n💡 Hint: Check that the file exists and is readable.",
            path.display()
        )
    })?;

    let config: ConfigFile = serde_yaml_ng::from_str(&content).with_context(|| {
        format!(
            "Failed to parse config file: {}\n\n💡 Hint: Ensure the file contains valid YAML syntax.",
            path.display()
        )
    })?;

    validate_config(&config)?;
    warn_unknown_fields(&config);

    Ok(config)
}

/// Auto-discover config in a directory. Returns `None` silently if not found.
pub fn discover_config(dir: &Path) -> Result<Option<ConfigFile>> {
    let config_path = dir.join(CONFIG_FILENAME);

    if !config_path.exists() {
        return Ok(None);
    }

    tracing::debug!(path = %config_path.display(), "using discovered config file");
    let config = load_config_from_path(&config_path)?;
    Ok(Some(config))
}

fn validate_config(config: &ConfigFile) -> Result<()> {
    if let Some(ref variables) = config.token_env {
        for (i, name) in variables.iter().enumerate() {
            if name.trim().is_empty() {
                bail!(
                    "Invalid config: token_env[{}] must not be empty.\n\n\
                     💡 Hint: Each token_env entry names an environment variable (e.g., \"GITHUB_TOKEN\").",
                    i
                );
            }
        }
    }

    if let Some(ref branches) = config.branches {
        if branches.iter().any(|b| b.trim().is_empty()) {
            bail!(
                "Invalid config: branches must not contain empty names.\n\n\
                 💡 Hint: List branch names such as \"main\" or \"master\"."
            );
        }
    }

    if let Err(e) = config.output_format() {
        bail!("Invalid config: {}", e);
    }

    Ok(())
}

fn warn_unknown_fields(config: &ConfigFile) {
    for key in config.unknown_fields.keys() {
        eprintln!(
            "⚠️  Warning: Unknown config field '{}' will be ignored.",
            key
        );
    }
}
