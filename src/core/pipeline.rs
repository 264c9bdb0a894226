//! Builds one [`Module`] from a directory.

use std::{
    fs, io,
    path::{Path, PathBuf},
};

use thiserror::Error;
use tracing::{debug, warn};

use super::{
    backend::MetadataBackend,
    extract::extract,
    merge::merge,
    scanner::ScanError,
    types::{Module, VariableTable},
};

/// Extension of module declaration files.
pub const SOURCE_EXTENSION: &str = "tf";

/// A failure that aborts the processing of one module.
#[derive(Debug, Error)]
pub enum ModuleError {
    #[error("failed to read {}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to scan {}", path.display())]
    Scan {
        path: PathBuf,
        #[source]
        source: ScanError,
    },

    #[error("failed to render usage for {}", path.display())]
    Render {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to write {}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl ModuleError {
    /// File or directory the failure is about.
    pub fn path(&self) -> &Path {
        match self {
            ModuleError::Read { path, .. }
            | ModuleError::Scan { path, .. }
            | ModuleError::Render { path, .. }
            | ModuleError::Write { path, .. } => path,
        }
    }
}

/// `.tf` files directly inside `dir`, sorted by file name.
pub fn module_files(dir: &Path) -> Result<Vec<PathBuf>, ModuleError> {
    let read_err = |source| ModuleError::Read {
        path: dir.to_path_buf(),
        source,
    };

    let mut files = Vec::new();
    for entry in fs::read_dir(dir).map_err(read_err)? {
        let path = entry.map_err(read_err)?.path();
        if path.is_file() && path.extension().is_some_and(|e| e == SOURCE_EXTENSION) {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

/// Extract and union the declarations of `files`, in order. A name declared in
/// several files keeps the declaration from the last one.
pub fn extract_files(files: &[PathBuf]) -> Result<VariableTable, ModuleError> {
    let mut variables = VariableTable::new();

    for file in files {
        let content = fs::read_to_string(file).map_err(|source| ModuleError::Read {
            path: file.clone(),
            source,
        })?;
        let declared = extract(&content).map_err(|source| ModuleError::Scan {
            path: file.clone(),
            source,
        })?;
        debug!(file = %file.display(), count = declared.len(), "extracted declarations");
        variables.extend(declared);
    }

    Ok(variables)
}

/// Declarations of every `.tf` file directly inside `dir`.
pub fn extract_module_files(dir: &Path) -> Result<VariableTable, ModuleError> {
    let files = module_files(dir)?;
    extract_files(&files)
}

/// Collects modules, combining source declarations with backend metadata.
#[derive(Default)]
pub struct ModuleCollector<'a> {
    backend: Option<&'a MetadataBackend>,
}

impl<'a> ModuleCollector<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_backend(mut self, backend: &'a MetadataBackend) -> Self {
        self.backend = Some(backend);
        self
    }

    pub fn collect(&self, path: &Path, name: &str) -> Result<Module, ModuleError> {
        let external = self.external_variables(path);
        let local = extract_module_files(path)?;

        Ok(Module {
            path: path.to_path_buf(),
            name: name.to_string(),
            variables: merge(external, local),
        })
    }

    /// Backend table for `path`; any backend failure contributes nothing.
    fn external_variables(&self, path: &Path) -> VariableTable {
        let Some(backend) = self.backend else {
            return VariableTable::new();
        };
        match backend.inputs(path) {
            Ok(variables) => variables,
            Err(err) => {
                warn!(module = %path.display(), "{err}; using declarations from source only");
                VariableTable::new()
            }
        }
    }
}
