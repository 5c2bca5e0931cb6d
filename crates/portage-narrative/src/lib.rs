//! portage-narrative
//!
//! Narrative report support: the prompt handed to a text generator, the
//! markdown results table, and the per-report generation state.

pub mod error;
pub mod generator;
pub mod prompt;
mod render;
pub mod report;
pub mod tabulation;

pub use generator::{FAILURE_SENTINEL, NarrativeGenerator};
pub use prompt::build_prompt;
pub use report::{ReportState, ReportView};
pub use tabulation::results_table;
