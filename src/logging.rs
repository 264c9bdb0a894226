use tracing_subscriber::filter::{EnvFilter, LevelFilter};
use tracing_subscriber::fmt;
use tracing_subscriber::prelude::*;

/// Install the stderr subscriber. `RUST_LOG` takes precedence over the flags.
pub fn init(quiet: bool, verbose: bool) {
    let filter = EnvFilter::builder()
        .with_default_directive(level(quiet, verbose).into())
        .from_env_lossy();

    let layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_ansi(colored::control::SHOULD_COLORIZE.should_colorize())
        .with_target(false)
        .without_time()
        .with_filter(filter);

    // A subscriber may already be installed when embedded.
    let _ = tracing_subscriber::registry().with(layer).try_init();
}

fn level(quiet: bool, verbose: bool) -> LevelFilter {
    if verbose {
        LevelFilter::DEBUG
    } else if quiet {
        LevelFilter::ERROR
    } else {
        LevelFilter::WARN
    }
}
