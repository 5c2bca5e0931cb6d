//! portage-session
//!
//! Assessment lifecycle: starting and resuming evaluations, attributing every
//! scoring action to a respondent, and the one-way draft to completed gate.
//! Storage is never touched here; each mutation hands back the updated
//! `Child` snapshot for the sync layer to persist.

pub mod context;
pub mod error;
pub mod identity;
pub mod lifecycle;
pub mod preferences;

pub use context::SessionContext;
pub use identity::{Identity, IdentityProvider};
pub use lifecycle::AssessmentSession;
pub use preferences::{FilePreferences, MemoryPreferences, PreferenceStore};
