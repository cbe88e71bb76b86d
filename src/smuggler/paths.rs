// raventool/src/smuggler/paths.rs
use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

use super::DUMP_EXTENSION;

/// Maps a database name to its dump file under the backup directory.
/// The extension is appended unless the name already carries it.
pub fn dump_file_path(backup_dir: &Path, database_name: &str) -> PathBuf {
    let file_name = if database_name.ends_with(DUMP_EXTENSION) {
        database_name.to_string()
    } else {
        format!("{database_name}{DUMP_EXTENSION}")
    };

    backup_dir.join(file_name)
}

/// Inverse of `dump_file_path`: the file name minus the extension is the
/// authoritative database name on import.
pub fn database_name_from_dump(path: &Path) -> Option<String> {
    let file_name = path.file_name()?.to_str()?;
    let name = file_name.strip_suffix(DUMP_EXTENSION)?;

    if name.is_empty() {
        return None;
    }

    Some(name.to_string())
}

pub fn ensure_backup_dir(backup_dir: &Path) -> Result<()> {
    fs::create_dir_all(backup_dir).with_context(|| {
        format!(
            "Failed to create backup directory: {}",
            backup_dir.display()
        )
    })?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dump_file_path_appends_extension() {
        let path = dump_file_path(Path::new("/b"), "Sales");
        assert_eq!(path, PathBuf::from("/b/Sales.ravendump"));
    }

    #[test]
    fn test_dump_file_path_is_idempotent() {
        let dir = Path::new("/b");
        assert_eq!(
            dump_file_path(dir, "Sales"),
            dump_file_path(dir, "Sales.ravendump")
        );
    }

    #[test]
    fn test_database_name_from_dump() {
        let name = database_name_from_dump(Path::new("/b/Sales.ravendump"));
        assert_eq!(name, Some("Sales".to_string()));
    }

    #[test]
    fn test_database_name_from_dump_rejects_other_files() {
        assert_eq!(database_name_from_dump(Path::new("/b/notes.txt")), None);
        assert_eq!(database_name_from_dump(Path::new("/b/.ravendump")), None);
    }
}
