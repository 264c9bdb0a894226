//! terraform-docs as a source of variable metadata.
//!
//! The process call sits behind [`CommandRunner`] so the JSON handling can be
//! exercised with canned output.

use std::{io, path::Path, process::Command, sync::LazyLock};

use regex::Regex;
use serde::{Deserialize, Deserializer};
use serde_json::Value;
use thiserror::Error;
use tracing::debug;

use super::{
    normalize::canonicalize,
    types::{ANY_TYPE, DefaultValue, Variable, VariableTable},
};

static VERSION_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"v\d+\.\d+\.\d+[0-9A-Za-z.+-]*").unwrap());

/// Captured result of one external command.
#[derive(Debug, Clone, Default)]
pub struct CommandOutput {
    pub success: bool,
    pub stdout: String,
    pub stderr: String,
}

/// Runs external programs.
pub trait CommandRunner: Send + Sync {
    fn run(&self, program: &str, args: &[&str]) -> io::Result<CommandOutput>;
}

/// Runs programs as child processes.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemRunner;

impl CommandRunner for SystemRunner {
    fn run(&self, program: &str, args: &[&str]) -> io::Result<CommandOutput> {
        let output = Command::new(program).args(args).output()?;
        Ok(CommandOutput {
            success: output.status.success(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        })
    }
}

#[derive(Debug, Error)]
pub enum BackendError {
    #[error("failed to run `{command}`: {source}")]
    Spawn {
        command: String,
        #[source]
        source: io::Error,
    },

    #[error("`{command}` failed: {stderr}")]
    Failed { command: String, stderr: String },

    #[error("failed to parse terraform-docs output: {0}")]
    InvalidOutput(#[from] serde_json::Error),
}

pub struct MetadataBackend {
    command: String,
    runner: Box<dyn CommandRunner>,
}

impl MetadataBackend {
    pub fn new(command: impl Into<String>) -> Self {
        Self::with_runner(command, SystemRunner)
    }

    pub fn with_runner(command: impl Into<String>, runner: impl CommandRunner + 'static) -> Self {
        Self {
            command: command.into(),
            runner: Box::new(runner),
        }
    }

    pub fn command(&self) -> &str {
        &self.command
    }

    /// Whether the backend program can be started at all.
    pub fn is_available(&self) -> bool {
        self.runner
            .run(&self.command, &["--version"])
            .is_ok_and(|out| out.success)
    }

    /// Version tag (`v0.16.0`) reported by `--version`.
    pub fn version(&self) -> Option<String> {
        let output = self.runner.run(&self.command, &["--version"]).ok()?;
        if !output.success {
            return None;
        }
        parse_version(&output.stdout)
    }

    /// Variables that the backend reports for the module at `path`.
    pub fn inputs(&self, path: &Path) -> Result<VariableTable, BackendError> {
        let path = path.to_string_lossy().into_owned();
        debug!(command = %self.command, module = %path, "querying metadata backend");

        let output = self
            .runner
            .run(&self.command, &["json", path.as_str()])
            .map_err(|source| BackendError::Spawn {
                command: self.command.clone(),
                source,
            })?;

        if !output.success {
            return Err(BackendError::Failed {
                command: self.command.clone(),
                stderr: output.stderr.trim().to_string(),
            });
        }

        parse_inputs(&output.stdout)
    }
}

pub fn parse_version(text: &str) -> Option<String> {
    VERSION_REGEX.find(text).map(|m| m.as_str().to_string())
}

#[derive(Debug, Deserialize)]
struct DocsOutput {
    #[serde(default)]
    inputs: Vec<DocsInput>,
}

#[derive(Debug, Deserialize)]
struct DocsInput {
    #[serde(default)]
    name: Option<String>,
    #[serde(default, rename = "type")]
    ty: Option<String>,
    #[serde(default)]
    description: Option<String>,
    #[serde(default, deserialize_with = "present_value")]
    default: Option<Value>,
    #[serde(default)]
    required: Option<bool>,
}

/// Keeps an explicit `null` distinguishable from a missing key.
fn present_value<'de, D>(deserializer: D) -> Result<Option<Value>, D::Error>
where
    D: Deserializer<'de>,
{
    Value::deserialize(deserializer).map(Some)
}

impl DocsInput {
    /// `None` for an entry without a name.
    fn into_variable(self) -> Option<Variable> {
        let name = self.name.filter(|n| !n.is_empty())?;
        let ty = self
            .ty
            .map(|t| canonicalize(&t))
            .filter(|t| !t.is_empty())
            .unwrap_or_else(|| ANY_TYPE.to_string());

        // terraform-docs writes `"default": null` for inputs without a default
        let default = match self.default {
            Some(Value::Null) if self.required == Some(true) => None,
            other => other.map(DefaultValue::Value),
        };

        Some(Variable {
            name,
            ty,
            description: self.description.unwrap_or_default(),
            default,
        })
    }
}

/// Parse the `inputs` section of `terraform-docs json` output. Entries
/// without a name are skipped.
pub fn parse_inputs(json: &str) -> Result<VariableTable, BackendError> {
    let docs: DocsOutput = serde_json::from_str(json)?;
    Ok(docs
        .inputs
        .into_iter()
        .filter_map(|input| {
            let variable = input.into_variable()?;
            Some((variable.name.clone(), variable))
        })
        .collect())
}
