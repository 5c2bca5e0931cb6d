//! portage-storage
//!
//! Whole-collection persistence for patient records. Every backend offers the
//! same two atomic calls: fetch the full `Vec<Child>` or replace it.

pub mod error;
pub mod file;
pub mod http;
pub mod memory;
pub mod store;

pub use file::FileStore;
pub use http::HttpStore;
pub use memory::MemoryStore;
pub use store::{BoxFuture, CollectionStore};
