//! Report definitions and the per-report pipeline.
//!
//! Flow per report: group rows → flow layout → render markup in memory → write `.tex` →
//! hand the file to the typesetter.

pub mod catalog;
pub mod pipeline;

pub use catalog::ReportCatalog;
pub use pipeline::ReportRunner;
