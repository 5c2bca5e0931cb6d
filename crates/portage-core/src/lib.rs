//! portage-core
//!
//! Pure domain types for the Portage developmental inventory: children,
//! assessments, scored responses, and the JSON wire contract they share with
//! the persistence backend. No I/O lives here.

pub mod collection;
pub mod error;
pub mod models;
pub mod wire;
