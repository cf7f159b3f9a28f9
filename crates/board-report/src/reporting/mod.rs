pub mod aggregate;
mod board;
mod classifier;
pub mod domain;
pub mod export;
mod filter;
mod generator;
mod lateness;
mod normalizer;
mod parser;
mod report;
pub mod rules;

pub use aggregate::views::{
    CollaboratorReport, CompletionTrendPoint, ReportInsights, ReportSummary, StatusShare,
    TopPerformer,
};
pub use aggregate::{generate_insights, rollup_by_collaborator, summarize};
pub use board::{validate, Board, BoardError, Card, List, Member};
pub use classifier::classify_status;
pub use domain::{DateRange, RangeError, StatusLabel, TaskReport, UnknownStatus};
pub use filter::{unique_collaborators, TaskFilter};
pub use generator::TaskReportGenerator;
pub use lateness::days_late;
pub use parser::parse_timestamp;
pub use report::BoardReport;
pub use rules::{ClassificationRules, StatusRule};
