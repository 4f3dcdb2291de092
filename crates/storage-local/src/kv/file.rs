use async_trait::async_trait;
use coinfolio_core::Result;
use log::debug;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use uuid::Uuid;

use super::kv_traits::KeyValueStore;
use crate::errors::LocalStorageError;

/// Key-value store keeping one `<key>.json` file per key under a directory.
///
/// Writes go to a temporary file that is then renamed over the target, so a
/// reader never observes a half-written value. Writes by other processes are
/// only visible through polling.
pub struct FileKeyValueStore {
    root: PathBuf,
}

impl FileKeyValueStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn path_for(&self, key: &str) -> std::result::Result<PathBuf, LocalStorageError> {
        let valid = !key.is_empty()
            && !key.starts_with('.')
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'));
        if !valid {
            return Err(LocalStorageError::InvalidKey(key.to_string()));
        }
        Ok(self.root.join(format!("{}.json", key)))
    }
}

#[async_trait]
impl KeyValueStore for FileKeyValueStore {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        let path = self.path_for(key)?;
        match tokio::fs::read_to_string(&path).await {
            Ok(value) => Ok(Some(value)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(source) => Err(LocalStorageError::ReadFailed {
                key: key.to_string(),
                source,
            }
            .into()),
        }
    }

    async fn set(&self, key: &str, value: &str) -> Result<()> {
        let path = self.path_for(key)?;
        // Unique per write so concurrent writers never share a temp file.
        let tmp_path = self
            .root
            .join(format!(".{}.{}.tmp", key, Uuid::new_v4().simple()));
        let write_failed = |source: std::io::Error| LocalStorageError::WriteFailed {
            key: key.to_string(),
            source,
        };

        tokio::fs::create_dir_all(&self.root)
            .await
            .map_err(write_failed)?;
        tokio::fs::write(&tmp_path, value)
            .await
            .map_err(write_failed)?;
        if let Err(source) = tokio::fs::rename(&tmp_path, &path).await {
            let _ = tokio::fs::remove_file(&tmp_path).await;
            return Err(write_failed(source).into());
        }

        debug!("Wrote {} bytes to {}", value.len(), path.display());
        Ok(())
    }
}
