use crate::core::Storage;
use crate::utils::error::{DesignError, Result};
use std::fs;
use std::path::PathBuf;

/// Filesystem storage rooted at a working directory.
#[derive(Debug, Clone)]
pub struct LocalStorage {
    base_path: PathBuf,
}

impl LocalStorage {
    pub fn new(base_path: impl Into<PathBuf>) -> Self {
        Self {
            base_path: base_path.into(),
        }
    }
}

impl Storage for LocalStorage {
    fn resolve_path(&self, path: &str) -> String {
        self.base_path.join(path).display().to_string()
    }

    fn read_file(&self, path: &str) -> Result<Vec<u8>> {
        let full_path = self.base_path.join(path);
        fs::read(&full_path).map_err(|source| DesignError::ReadError {
            path: full_path.display().to_string(),
            source,
        })
    }

    fn write_file(&self, path: &str, data: &[u8]) -> Result<()> {
        let full_path = self.base_path.join(path);

        if let Some(parent) = full_path.parent() {
            fs::create_dir_all(parent).map_err(|source| DesignError::WriteError {
                path: parent.display().to_string(),
                source,
            })?;
        }

        fs::write(&full_path, data).map_err(|source| DesignError::WriteError {
            path: full_path.display().to_string(),
            source,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_write_then_read_relative_to_base() {
        let temp_dir = TempDir::new().unwrap();
        let storage = LocalStorage::new(temp_dir.path());

        storage.write_file("nested/LLSS.mat", b"/NumWaves 2\n").unwrap();
        assert!(temp_dir.path().join("nested/LLSS.mat").exists());
        assert_eq!(storage.read_file("nested/LLSS.mat").unwrap(), b"/NumWaves 2\n");
    }

    #[test]
    fn test_missing_file_reports_full_path() {
        let temp_dir = TempDir::new().unwrap();
        let storage = LocalStorage::new(temp_dir.path());

        match storage.read_file("subs_excl325") {
            Err(DesignError::ReadError { path, .. }) => assert!(path.ends_with("subs_excl325")),
            other => panic!("expected ReadError, got {:?}", other),
        }
    }
}
