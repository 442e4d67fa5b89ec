use crate::core::Storage;
use crate::utils::error::Result;
use std::path::{Path, PathBuf};

/// Writes snapshots under a base directory, creating it on first write.
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
    async fn read_file(&self, path: &str) -> Result<Vec<u8>> {
        let full_path = self.base_path.join(path);
        Ok(tokio::fs::read(full_path).await?)
    }

    async fn write_file(&self, path: &str, data: &[u8]) -> Result<()> {
        let full_path = self.base_path.join(path);

        if let Some(parent) = full_path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }

        // Readers see either the previous file or the complete new one.
        let staging = staging_path(&full_path);
        tokio::fs::write(&staging, data).await?;
        tokio::fs::rename(&staging, &full_path).await?;
        Ok(())
    }
}

fn staging_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().map(|n| n.to_os_string()).unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_write_then_read_nested_path() {
        let dir = TempDir::new().unwrap();
        let storage = LocalStorage::new(dir.path());

        storage.write_file("data/cars.json", b"{\"cars\":[]}").await.unwrap();

        let data = storage.read_file("data/cars.json").await.unwrap();
        assert_eq!(data, b"{\"cars\":[]}");
        assert!(!dir.path().join("data/cars.json.tmp").exists());
    }

    #[tokio::test]
    async fn test_overwrites_previous_snapshot() {
        let dir = TempDir::new().unwrap();
        let storage = LocalStorage::new(dir.path());

        storage.write_file("cars.json", b"old").await.unwrap();
        storage.write_file("cars.json", b"new").await.unwrap();

        assert_eq!(storage.read_file("cars.json").await.unwrap(), b"new");
    }
}
