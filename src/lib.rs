//! tfdocs-ext - usage examples for Terraform modules
//!
//! tfdocs-ext combines the variable metadata reported by terraform-docs with the
//! declarations found in a module's `.tf` files, and renders a "Usage" block
//! that lists required inputs as placeholders and optional inputs commented out,
//! with long type signatures shortened for reading.
//!
//! ## Module Structure
//!
//! - `cli`: Command-line interface layer (arguments, commands, reporting)
//! - `config`: Configuration file loading and parsing
//! - `core`: Variable collection engine (scan, normalize, extract, merge)
//! - `logging`: tracing subscriber setup
//! - `usage`: Usage block rendering (Markdown and JSON)

pub mod cli;
pub mod config;
pub mod core;
pub mod logging;
pub mod usage;
