pub(crate) mod paths;
pub(crate) mod retry;
pub(crate) mod runner;

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use which::which;

/// File extension of a single-database dump produced by the smuggler.
pub const DUMP_EXTENSION: &str = ".ravendump";

/// Resolves the smuggler executable: an explicit path from config wins,
/// otherwise the PATH is searched.
pub fn resolve_smuggler_path(configured: Option<&Path>) -> Result<PathBuf> {
    match configured {
        Some(path) => Ok(path.to_path_buf()),
        None => which("Raven.Smuggler").context(
            "Raven.Smuggler executable not found in PATH. Set smuggler_path in config.json or add the RavenDB client tools to your PATH.",
        ),
    }
}
