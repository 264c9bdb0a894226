//! Progress and result lines printed to stderr.
//!
//! stdout is reserved for generated usage blocks, so everything meant for the
//! person at the terminal goes through here instead.

use std::{
    error::Error,
    io::{self, Write},
    path::Path,
};

use colored::Colorize;

use crate::core::pipeline::ModuleError;

/// Success mark for consistent output formatting.
pub const SUCCESS_MARK: &str = "\u{2713}"; // ✓

/// Failure mark for consistent output formatting.
pub const FAILURE_MARK: &str = "\u{2718}"; // ✘

/// Prints progress lines unless quiet. Failures and warnings are always shown.
#[derive(Debug, Clone, Copy)]
pub struct Reporter {
    quiet: bool,
}

impl Reporter {
    pub fn new(quiet: bool) -> Self {
        Self { quiet }
    }

    pub fn written(&self, module: &Path, target: &Path) {
        if !self.quiet {
            print_written_to(module, target, &mut io::stderr().lock());
        }
    }

    pub fn failed(&self, err: &ModuleError) {
        print_failure_to(err, &mut io::stderr().lock());
    }

    pub fn warning(&self, message: &str) {
        print_warning_to(message, &mut io::stderr().lock());
    }

    pub fn summary(&self, total: usize, failed: usize) {
        if !self.quiet || failed > 0 {
            print_summary_to(total, failed, &mut io::stderr().lock());
        }
    }
}

pub fn print_written_to<W: Write>(module: &Path, target: &Path, writer: &mut W) {
    let _ = writeln!(
        writer,
        "{} {} {} {}",
        SUCCESS_MARK.green(),
        module.display(),
        "->".dimmed(),
        target.display()
    );
}

pub fn print_failure_to<W: Write>(err: &ModuleError, writer: &mut W) {
    let _ = writeln!(writer, "{} {}", FAILURE_MARK.red(), error_chain(err).red());
}

/// `err` followed by each of its causes, separated by `: `.
fn error_chain(err: &dyn Error) -> String {
    let mut text = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        text.push_str(": ");
        text.push_str(&cause.to_string());
        source = cause.source();
    }
    text
}

pub fn print_warning_to<W: Write>(message: &str, writer: &mut W) {
    let _ = writeln!(writer, "{} {}", "warning:".bold().yellow(), message);
}

pub fn print_summary_to<W: Write>(total: usize, failed: usize, writer: &mut W) {
    let noun = if total == 1 { "module" } else { "modules" };
    if failed == 0 {
        let _ = writeln!(
            writer,
            "{} {}",
            SUCCESS_MARK.green(),
            format!("Generated usage for {total} {noun}").green()
        );
    } else {
        let _ = writeln!(
            writer,
            "{} {}",
            FAILURE_MARK.red(),
            format!(
                "Generated usage for {} of {total} {noun}, {failed} failed",
                total - failed
            )
            .red()
        );
    }
}
