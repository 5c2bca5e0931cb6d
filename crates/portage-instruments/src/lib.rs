//! portage-instruments
//!
//! The Portage question bank and the aggregation engine that turns sparse,
//! attributed item responses into area scores, completion percentages and
//! contributor statistics. Pure data and pure functions, no I/O.

pub mod catalog;
mod data;
pub mod error;
pub mod scoring;

pub use catalog::{Catalog, Question};
pub use scoring::AreaScore;
