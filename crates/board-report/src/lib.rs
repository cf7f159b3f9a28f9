pub mod config;
pub mod error;
pub mod reporting;
pub mod telemetry;

pub use reporting::{
    validate, Board, BoardError, BoardReport, ClassificationRules, CollaboratorReport, DateRange,
    RangeError, ReportInsights, ReportSummary, StatusLabel, TaskFilter, TaskReport,
};
