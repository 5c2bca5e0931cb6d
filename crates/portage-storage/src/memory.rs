use std::sync::{Mutex, MutexGuard};

use portage_core::models::Child;

use crate::error::StorageError;
use crate::store::{BoxFuture, CollectionStore};

/// In-process store. Holds the collection exactly as last saved.
#[derive(Default)]
pub struct MemoryStore {
    children: Mutex<Vec<Child>>,
}

impl MemoryStore {
    pub fn new(children: Vec<Child>) -> Self {
        Self {
            children: Mutex::new(children),
        }
    }

    pub fn snapshot(&self) -> Vec<Child> {
        self.lock().clone()
    }

    fn lock(&self) -> MutexGuard<'_, Vec<Child>> {
        self.children
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl CollectionStore for MemoryStore {
    fn load(&self) -> BoxFuture<'_, Result<Vec<Child>, StorageError>> {
        Box::pin(async move { Ok(self.snapshot()) })
    }

    fn save<'a>(&'a self, children: &'a [Child]) -> BoxFuture<'a, Result<(), StorageError>> {
        Box::pin(async move {
            *self.lock() = children.to_vec();
            Ok(())
        })
    }
}
