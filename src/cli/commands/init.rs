use std::{fs, path::Path};

use anyhow::{Context, Result};
use colored::Colorize;

use crate::{
    cli::{exit_status::ExitStatus, report::FAILURE_MARK, report::SUCCESS_MARK},
    config::{CONFIG_FILE_NAME, default_config_yaml},
};

/// Write the default config into `dir`, refusing to overwrite an existing one.
pub fn init(dir: &Path) -> Result<ExitStatus> {
    let config_path = dir.join(CONFIG_FILE_NAME);
    if config_path.exists() {
        eprintln!(
            "{} {}",
            FAILURE_MARK.red(),
            format!("{CONFIG_FILE_NAME} already exists").red()
        );
        return Ok(ExitStatus::Failure);
    }

    fs::write(&config_path, default_config_yaml()?)
        .with_context(|| format!("Failed to write {}", config_path.display()))?;
    println!(
        "{} {}",
        SUCCESS_MARK.green(),
        format!("Created {CONFIG_FILE_NAME}").green()
    );

    Ok(ExitStatus::Success)
}
