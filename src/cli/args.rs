//! CLI argument definitions using clap.
//!
//! Without a subcommand the tool generates usage blocks.
//!
//! ## Commands
//!
//! - `version`: Print the tool and terraform-docs versions
//! - `init`: Write a default configuration file

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::{config::DetailLevel, usage::OutputFormat};

#[derive(Debug, Parser)]
#[command(
    name = "tfdocs-ext",
    author,
    version,
    about = "Generate usage examples for Terraform modules",
    long_about = None,
    args_conflicts_with_subcommands = true
)]
pub struct Arguments {
    #[command(subcommand)]
    pub command: Option<Command>,

    #[command(flatten)]
    pub generate: GenerateArgs,
}

impl Arguments {
    pub fn quiet(&self) -> bool {
        self.command.is_none() && self.generate.quiet
    }

    pub fn verbose(&self) -> bool {
        self.command.is_none() && self.generate.verbose
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Subcommand)]
pub enum Command {
    /// Print version information
    Version,
    /// Create a default configuration file in the current directory
    Init,
}

#[derive(Debug, Clone, Args)]
pub struct GenerateArgs {
    /// Path to the Terraform module
    #[arg(short, long, default_value = ".")]
    pub path: PathBuf,

    /// Output file (file name inside each module when recursive)
    #[arg(short, long)]
    pub out: Option<PathBuf>,

    /// Process every module below the path
    #[arg(short, long)]
    pub recursive: bool,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Markdown)]
    pub format: OutputFormat,

    /// Module name used in the usage block
    #[arg(short, long, default_value = "example")]
    pub name: String,

    /// Module source used in the usage block
    #[arg(short, long, default_value = "path/to/module")]
    pub source: String,

    /// Only print errors and generated output
    #[arg(short, long)]
    pub quiet: bool,

    /// Enable debug logging
    #[arg(short, long, conflicts_with = "quiet")]
    pub verbose: bool,

    /// Continue with the remaining modules when one fails
    #[arg(long)]
    pub keep_going: bool,

    /// Do not query terraform-docs
    #[arg(long)]
    pub no_backend: bool,

    /// Type detail level (overrides config file)
    #[arg(long, value_enum)]
    pub detail_level: Option<DetailLevel>,

    /// Object fields shown before truncation (overrides config file)
    #[arg(long)]
    pub max_fields: Option<usize>,

    /// Hide object field names in truncated types
    #[arg(long)]
    pub no_field_names: bool,
}
