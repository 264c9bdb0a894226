//! Variable collection engine.
//!
//! ## Module Structure
//!
//! - `types`: Shared data model (`Variable`, `VariableTable`, `Module`)
//! - `scanner`: Depth-aware scanning of HCL source text
//! - `normalize`: Canonical and truncated forms of type signatures
//! - `extract`: Variable declarations read from one source file
//! - `backend`: Variable metadata reported by terraform-docs
//! - `merge`: Reconciliation of backend and source tables
//! - `pipeline`: Per-module collection (files, backend, merge)
//! - `discover`: Module directories for recursive runs
//!
//! ## Collecting a Module
//!
//! 1. **Backend** (`backend::MetadataBackend`)
//!    - Runs `terraform-docs json <dir>` and reads its `inputs`
//!    - Any failure contributes an empty table
//!
//! 2. **Source** (`pipeline::extract_files`)
//!    - Reads the module's `.tf` files in name order
//!    - Later files override earlier ones for the same name
//!
//! 3. **Merge** (`merge::merge`)
//!    - Backend supplies descriptions and defaults, source supplies types

pub mod backend;
pub mod discover;
pub mod extract;
pub mod merge;
pub mod normalize;
pub mod pipeline;
pub mod scanner;
pub mod types;

pub use types::{ANY_TYPE, DefaultValue, Module, Variable, VariableTable};
