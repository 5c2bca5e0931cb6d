use std::path::{Path, PathBuf};

use tokio::sync::Mutex;

use portage_core::models::Child;
use portage_core::wire;

use crate::error::StorageError;
use crate::store::{BoxFuture, CollectionStore};

/// The collection as one JSON array in a file on local disk.
///
/// Writes go to a sibling temp file that is renamed over the target, so a
/// reader never observes a half-written collection. Writes are serialized.
pub struct FileStore {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl FileStore {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            write_lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Create the file holding an empty collection if it does not exist yet.
    pub async fn ensure_initialized(&self) -> Result<(), StorageError> {
        let _guard = self.write_lock.lock().await;
        if tokio::fs::try_exists(&self.path).await? {
            return Ok(());
        }
        self.write_atomic(b"[]").await?;
        tracing::info!(path = %self.path.display(), "initialized empty collection file");
        Ok(())
    }

    async fn write_atomic(&self, bytes: &[u8]) -> Result<(), StorageError> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            tokio::fs::create_dir_all(parent).await?;
        }
        let tmp_path = self.path.with_extension("json.tmp");
        tokio::fs::write(&tmp_path, bytes).await?;
        tokio::fs::rename(&tmp_path, &self.path).await?;
        Ok(())
    }

    async fn read(&self) -> Result<Vec<Child>, StorageError> {
        self.ensure_initialized().await?;
        let bytes = tokio::fs::read(&self.path).await?;
        let children = wire::decode_collection(&bytes)?;
        tracing::debug!(
            path = %self.path.display(),
            children = children.len(),
            "collection loaded from disk"
        );
        Ok(children)
    }

    async fn write(&self, children: &[Child]) -> Result<(), StorageError> {
        let bytes = wire::encode_collection(children)?;
        let _guard = self.write_lock.lock().await;
        self.write_atomic(&bytes).await?;
        tracing::debug!(
            path = %self.path.display(),
            children = children.len(),
            "collection written to disk"
        );
        Ok(())
    }
}

impl CollectionStore for FileStore {
    fn load(&self) -> BoxFuture<'_, Result<Vec<Child>, StorageError>> {
        Box::pin(self.read())
    }

    fn save<'a>(&'a self, children: &'a [Child]) -> BoxFuture<'a, Result<(), StorageError>> {
        Box::pin(self.write(children))
    }
}
