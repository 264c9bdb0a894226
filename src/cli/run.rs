use std::path::Path;

use anyhow::Result;

use super::{
    args::{Arguments, Command},
    commands::{generate::generate, init::init, version::version},
    exit_status::ExitStatus,
};

/// Dispatch parsed arguments to the matching command.
///
/// # Returns
/// - `Ok(ExitStatus)` once the command has finished, successfully or not
/// - `Err` when the command could not run (bad path, invalid config, I/O)
pub fn run(Arguments { command, generate: args }: Arguments) -> Result<ExitStatus> {
    match command {
        Some(Command::Version) => version(Path::new(".")),
        Some(Command::Init) => init(Path::new(".")),
        None => generate(&args),
    }
}
