//! portage-sync
//!
//! Keeps the in-memory patient collection and the persisted copy in step:
//! saves apply locally at once, reach the store in one debounced write per
//! quiet period, and are rolled back if that write fails.

pub mod controller;
pub mod error;
pub mod status;

pub use controller::{SyncConfig, SyncController};
pub use error::SyncError;
pub use status::{SyncStatus, WritePhase};
