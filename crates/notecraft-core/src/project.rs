//! Project root discovery utilities.
//!
//! Locates the notecraft project root by walking up the directory tree
//! looking for `.notecraft/` or `.git/` markers.

use std::path::{Path, PathBuf};

use crate::CoreError;
use crate::config::CONFIG_DIR;

/// Walks up from `start` to the first directory containing `.notecraft/`
/// or `.git/`.
pub fn find_project_root_from(start: &Path) -> Option<PathBuf> {
    start
        .ancestors()
        .find(|dir| dir.join(CONFIG_DIR).exists() || dir.join(".git").exists())
        .map(Path::to_path_buf)
}

/// Finds the project root by walking up from the current directory.
///
/// # Errors
///
/// Returns `CoreError::IoError` if the current directory cannot be
/// determined, or `CoreError::ConfigError` if no marker is found up to the
/// filesystem root.
pub fn find_project_root() -> Result<PathBuf, CoreError> {
    let cwd = std::env::current_dir()?;
    find_project_root_from(&cwd).ok_or_else(|| {
        CoreError::ConfigError("Not in a git repository or notecraft project".into())
    })
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::*;

    #[test]
    fn test_should_find_marker_in_ancestor() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir_all(dir.path().join(CONFIG_DIR)).unwrap();
        let nested = dir.path().join("notes").join("2024");
        fs::create_dir_all(&nested).unwrap();

        assert_eq!(find_project_root_from(&nested), Some(dir.path().to_path_buf()));
    }

    #[test]
    fn test_should_prefer_nearest_marker() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir_all(dir.path().join(".git")).unwrap();
        let inner = dir.path().join("ward");
        fs::create_dir_all(inner.join(CONFIG_DIR)).unwrap();

        assert_eq!(find_project_root_from(&inner), Some(inner.clone()));
    }
}
