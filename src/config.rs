use std::{
    collections::BTreeMap,
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use clap::ValueEnum;
use glob::Pattern;
use serde::{Deserialize, Serialize};

/// Config file names, in lookup order.
pub const CONFIG_FILE_NAMES: &[&str] = &[
    ".terraform-docs-extended.yml",
    ".terraform-docs-extended.yaml",
    "terraform-docs-extended.yml",
    "terraform-docs-extended.yaml",
];

/// Name used when `init` writes a fresh config file.
pub const CONFIG_FILE_NAME: &str = ".terraform-docs-extended.yml";

/// Program invoked to produce the metadata table.
pub const DEFAULT_BACKEND_COMMAND: &str = "terraform-docs";

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub type_formatting: TypeFormatting,
    #[serde(default)]
    pub backend: BackendConfig,
    /// Glob patterns (relative to the scan root) of directories skipped in
    /// recursive mode.
    #[serde(default)]
    pub ignores: Vec<String>,
}

/// How much of a type signature survives into the usage block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum DetailLevel {
    /// Long compound types collapse to their bare wrapper.
    Minimal,
    /// Long compound types are truncated, keeping leading field names.
    Moderate,
    /// Types are only canonicalized, never truncated.
    Detailed,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct TypeFormatting {
    #[serde(default = "default_detail_level")]
    pub detail_level: DetailLevel,
    #[serde(default = "default_show_field_names")]
    pub show_field_names: bool,
    #[serde(default = "default_max_fields_to_show")]
    pub max_fields_to_show: usize,
    /// Canonical types longer than this are truncated.
    #[serde(default = "default_max_type_length")]
    pub max_type_length: usize,
    /// Exact-match replacements applied to displayed types.
    #[serde(default)]
    pub custom_formats: BTreeMap<String, String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct BackendConfig {
    #[serde(default = "default_backend_enabled")]
    pub enabled: bool,
    #[serde(default = "default_backend_command")]
    pub command: String,
}

fn default_detail_level() -> DetailLevel {
    DetailLevel::Moderate
}

fn default_show_field_names() -> bool {
    true
}

fn default_max_fields_to_show() -> usize {
    3
}

fn default_max_type_length() -> usize {
    50
}

fn default_backend_enabled() -> bool {
    true
}

fn default_backend_command() -> String {
    DEFAULT_BACKEND_COMMAND.to_string()
}

impl Default for TypeFormatting {
    fn default() -> Self {
        Self {
            detail_level: default_detail_level(),
            show_field_names: default_show_field_names(),
            max_fields_to_show: default_max_fields_to_show(),
            max_type_length: default_max_type_length(),
            custom_formats: BTreeMap::new(),
        }
    }
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            enabled: default_backend_enabled(),
            command: default_backend_command(),
        }
    }
}

impl Config {
    /// Validate configuration values.
    pub fn validate(&self) -> Result<()> {
        let formatting = &self.type_formatting;
        if formatting.max_type_length == 0 {
            anyhow::bail!("'max_type_length' must be greater than zero");
        }

        if formatting.custom_formats.keys().any(|k| k.trim().is_empty()) {
            anyhow::bail!("'custom_formats' contains an empty type key");
        }

        if self.backend.enabled && self.backend.command.trim().is_empty() {
            anyhow::bail!("'backend.command' must not be empty when the backend is enabled");
        }

        for pattern in &self.ignores {
            Pattern::new(pattern)
                .with_context(|| format!("Invalid glob pattern in 'ignores': \"{}\"", pattern))?;
        }

        Ok(())
    }

    /// Compiled `ignores` patterns. Call after [`Config::validate`].
    pub fn ignore_patterns(&self) -> Vec<Pattern> {
        self.ignores
            .iter()
            .filter_map(|p| Pattern::new(p).ok())
            .collect()
    }
}

pub fn default_config_yaml() -> Result<String> {
    let config = Config::default();
    serde_yaml::to_string(&config).context("Failed to generate default config.")
}

/// Look for a config file in `start_dir` and its ancestors, stopping at the
/// repository root.
pub fn find_config_file(start_dir: &Path) -> Option<PathBuf> {
    let mut current = start_dir
        .canonicalize()
        .unwrap_or_else(|_| start_dir.to_path_buf());

    loop {
        if let Some(found) = CONFIG_FILE_NAMES
            .iter()
            .map(|name| current.join(name))
            .find(|path| path.is_file())
        {
            return Some(found);
        }
        if current.join(".git").exists() {
            return None;
        }
        if !current.pop() {
            return None;
        }
    }
}

/// Result of loading configuration.
pub struct ConfigLoadResult {
    pub config: Config,
    /// The file the config came from, `None` when using defaults.
    pub path: Option<PathBuf>,
}

pub fn load_config(start_dir: &Path) -> Result<ConfigLoadResult> {
    match find_config_file(start_dir) {
        Some(path) => {
            let content = fs::read_to_string(&path)
                .with_context(|| format!("Failed to read config file: {}", path.display()))?;
            let config: Config = serde_yaml::from_str(&content)
                .with_context(|| format!("Failed to parse config file: {}", path.display()))?;
            config.validate()?;
            Ok(ConfigLoadResult {
                config,
                path: Some(path),
            })
        }
        None => Ok(ConfigLoadResult {
            config: Config::default(),
            path: None,
        }),
    }
}
