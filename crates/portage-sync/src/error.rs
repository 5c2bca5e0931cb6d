use thiserror::Error;

use portage_storage::error::StorageError;

#[derive(Debug, Error)]
pub enum SyncError {
    #[error("collection has not been loaded; refusing to save")]
    NotLoaded,

    #[error("failed to load collection: {0}")]
    LoadFailed(#[source] StorageError),

    #[error("failed to save collection, local changes were rolled back: {0}")]
    SaveFailed(String),

    #[error("collection is being loaded; try again once it completes")]
    LoadInProgress,

    #[error("unsynced local changes would be discarded by a reload")]
    UnsyncedChanges,

    #[error(transparent)]
    Core(#[from] portage_core::error::CoreError),
}
