use std::process::ExitCode;

use clap::Parser;
use tfdocs_ext::cli::{Arguments, ExitStatus};

fn main() -> ExitCode {
    let args = Arguments::parse();
    tfdocs_ext::logging::init(args.quiet(), args.verbose());

    match tfdocs_ext::cli::run(args) {
        Ok(status) => status.into(),
        Err(err) => {
            eprintln!("Error: {err:#}");
            ExitStatus::Error.into()
        }
    }
}
