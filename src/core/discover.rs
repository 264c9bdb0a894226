//! Finds module directories below a root for recursive generation.

use std::path::{Path, PathBuf};

use glob::Pattern;
use tracing::{debug, warn};
use walkdir::{DirEntry, WalkDir};

use super::pipeline::SOURCE_EXTENSION;

/// Directories never descended into.
pub const SKIPPED_DIRS: &[&str] = &[".git", ".terraform"];

/// A directory holding at least one `.tf` file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModuleDir {
    pub path: PathBuf,
    pub name: String,
}

/// Result of walking a tree.
#[derive(Debug, Default)]
pub struct DiscoveryResult {
    pub modules: Vec<ModuleDir>,
    pub skipped_count: usize,
}

/// Walk `root` depth-first in file-name order and report every module
/// directory. The root keeps `root_name`; every other module is named after
/// its directory.
pub fn discover_modules(root: &Path, root_name: &str, ignores: &[Pattern]) -> DiscoveryResult {
    let mut result = DiscoveryResult::default();

    let walker = WalkDir::new(root)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|entry| !is_skipped(entry, root, ignores));

    for entry in walker {
        let entry = match entry {
            Ok(e) => e,
            Err(e) => {
                result.skipped_count += 1;
                warn!("cannot access path: {e}");
                continue;
            }
        };
        if !entry.file_type().is_dir() || !has_module_files(entry.path()) {
            continue;
        }

        let name = if entry.depth() == 0 {
            root_name.to_string()
        } else {
            entry.file_name().to_string_lossy().into_owned()
        };
        debug!(path = %entry.path().display(), %name, "found module");
        result.modules.push(ModuleDir {
            path: entry.into_path(),
            name,
        });
    }

    result
}

fn is_skipped(entry: &DirEntry, root: &Path, ignores: &[Pattern]) -> bool {
    if entry.depth() == 0 || !entry.file_type().is_dir() {
        return false;
    }
    if entry
        .file_name()
        .to_str()
        .is_some_and(|name| SKIPPED_DIRS.contains(&name))
    {
        return true;
    }

    let Ok(relative) = entry.path().strip_prefix(root) else {
        return false;
    };
    ignores.iter().any(|p| p.matches_path(relative))
}

fn has_module_files(dir: &Path) -> bool {
    let Ok(entries) = std::fs::read_dir(dir) else {
        return false;
    };
    entries.flatten().any(|entry| {
        let path = entry.path();
        path.is_file() && path.extension().is_some_and(|e| e == SOURCE_EXTENSION)
    })
}
