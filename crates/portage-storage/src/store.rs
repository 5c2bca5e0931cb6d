use std::future::Future;
use std::pin::Pin;

use portage_core::models::Child;

use crate::error::StorageError;

pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// A remote or local copy of the patient collection. Both calls act on the
/// whole collection; there are no partial-document updates.
pub trait CollectionStore: Send + Sync {
    /// Fetch the full collection.
    fn load(&self) -> BoxFuture<'_, Result<Vec<Child>, StorageError>>;

    /// Replace the stored collection with `children`.
    fn save<'a>(&'a self, children: &'a [Child]) -> BoxFuture<'a, Result<(), StorageError>>;
}
