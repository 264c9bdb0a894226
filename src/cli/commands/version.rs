use std::path::Path;

use anyhow::Result;
use colored::Colorize;

use crate::{
    cli::exit_status::ExitStatus,
    config::{DEFAULT_BACKEND_COMMAND, load_config},
    core::backend::MetadataBackend,
};

pub fn version(dir: &Path) -> Result<ExitStatus> {
    // An unreadable config should not stop a version query.
    let command = load_config(dir)
        .map(|loaded| loaded.config.backend.command)
        .unwrap_or_else(|_| DEFAULT_BACKEND_COMMAND.to_string());
    let backend = MetadataBackend::new(command);

    println!(
        "{} {}",
        env!("CARGO_PKG_NAME").bold().blue(),
        env!("CARGO_PKG_VERSION")
    );
    match backend.version() {
        Some(version) => println!("{} {}", backend.command(), version),
        None => println!("{} {}", backend.command(), "not found".yellow()),
    }

    Ok(ExitStatus::Success)
}
