//! Local-Disk Object Store Implementation
//!
//! Stores blobs under a root directory (the equivalent of a public disk).
//! Paths are always relative and are sanity-checked so a crafted path
//! cannot escape the root.

use std::path::{Component, Path, PathBuf};

use crate::domain::object_store::ObjectStore;
use crate::error::{AccountError, AccountResult};

/// Filesystem-backed object store
#[derive(Clone)]
pub struct LocalDiskStore {
    root: PathBuf,
}

impl LocalDiskStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn resolve(&self, path: &str) -> AccountResult<PathBuf> {
        let relative = Path::new(path);

        let safe = relative
            .components()
            .all(|c| matches!(c, Component::Normal(_)));
        if !safe || relative.as_os_str().is_empty() {
            return Err(AccountError::Storage(format!(
                "Refusing unsafe object path: {path}"
            )));
        }

        Ok(self.root.join(relative))
    }
}

impl ObjectStore for LocalDiskStore {
    async fn put(&self, path: &str, bytes: Vec<u8>) -> AccountResult<()> {
        let full = self.resolve(path)?;

        if let Some(parent) = full.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| AccountError::Storage(e.to_string()))?;
        }

        tokio::fs::write(&full, bytes)
            .await
            .map_err(|e| AccountError::Storage(e.to_string()))?;

        Ok(())
    }

    async fn delete(&self, path: &str) -> AccountResult<()> {
        let full = self.resolve(path)?;

        match tokio::fs::remove_file(&full).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(AccountError::Storage(e.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_rejects_traversal() {
        let store = LocalDiskStore::new("/tmp/store");
        assert!(store.resolve("../etc/passwd").is_err());
        assert!(store.resolve("/etc/passwd").is_err());
        assert!(store.resolve("").is_err());
        assert!(store.resolve("profile-images/a.jpg").is_ok());
    }
}
