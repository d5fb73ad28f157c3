//! Serializes recommendation and analysis results to files.

pub mod analysis;
pub mod error;
pub mod export;
pub mod extracts;
pub mod table;

pub use analysis::{price_distribution, write_analysis, AnalysisOptions, AnalysisReport};
pub use error::ExportError;
pub use export::{export, export_json};
pub use extracts::write_extracts;
pub use table::{Table, RECOMMENDATION_HEADERS};
