pub mod csv;
pub mod json;
pub mod model;
pub mod reporter;
pub mod text;

use clap::ValueEnum;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ReportFormat {
    /// One row per target, written as the batch progresses
    Csv,
    /// Single document with summary counts, written at the end
    Json,
}
