use std::{
    fs,
    path::{Path, PathBuf},
    process::Command,
};

use anyhow::{Context, Result};
use insta_cmd::get_cargo_bin;
use tempfile::TempDir;

mod generate;

const BIN_NAME: &str = "tfdocs-ext";

/// Matches the version line printed by `--version` and `version`.
const VERSION_PATTERN: &str = r"tfdocs-ext \d+\.\d+\.\d+\S*";

pub struct CliTest {
    _temp_dir: TempDir,
    project_dir: PathBuf,
    project_pattern: String,
}

impl CliTest {
    pub fn new() -> Result<Self> {
        let temp_dir = TempDir::new()?;
        let project_dir = temp_dir.path().canonicalize()?;
        // Keeps config lookup from walking above the fixture.
        fs::create_dir(project_dir.join(".git"))?;
        Ok(Self {
            _temp_dir: temp_dir,
            project_pattern: regex::escape(&project_dir.to_string_lossy()),
            project_dir,
        })
    }

    pub fn with_file(path: &str, content: &str) -> Result<Self> {
        let test = Self::new()?;
        test.write_file(path, content)?;
        Ok(test)
    }

    pub fn write_file(&self, path: &str, content: &str) -> Result<()> {
        let file_path = self.project_dir.join(path);

        if let Some(parent) = file_path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }

        fs::write(&file_path, content)
            .with_context(|| format!("Failed to write file: {}", file_path.display()))?;

        Ok(())
    }

    pub fn read_file(&self, path: &str) -> Result<String> {
        let file_path = self.project_dir.join(path);
        fs::read_to_string(&file_path)
            .with_context(|| format!("Failed to read file: {}", file_path.display()))
    }

    pub fn root(&self) -> &Path {
        &self.project_dir
    }

    pub fn command(&self) -> Command {
        let mut cmd = Command::new(get_cargo_bin(BIN_NAME));
        cmd.current_dir(&self.project_dir);
        cmd.env_clear();
        cmd.env("NO_COLOR", "1"); // Disable colors for consistent test output
        cmd
    }

    /// Snapshot filters for the temp project path and the tool version.
    pub fn filters(&self) -> Vec<(&str, &str)> {
        vec![
            (self.project_pattern.as_str(), "[PROJECT]"),
            (VERSION_PATTERN, "tfdocs-ext [VERSION]"),
        ]
    }

    /// Generate command that never consults terraform-docs.
    pub fn generate_command(&self) -> Command {
        let mut cmd = self.command();
        cmd.arg("--no-backend");
        cmd
    }
}
