use super::aggregate::views::{CollaboratorReport, ReportInsights, ReportSummary};
use super::domain::{DateRange, TaskReport};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::io::Write;
use thiserror::Error;

pub const TASK_CSV_HEADER: [&str; 6] = [
    "Collaborator",
    "Task",
    "Due Date",
    "Status",
    "Days Late",
    "Observations",
];

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("failed to write CSV export: {0}")]
    Csv(#[from] csv::Error),
    #[error("failed to encode JSON export: {0}")]
    Json(#[from] serde_json::Error),
    #[error("failed to write export: {0}")]
    Io(#[from] std::io::Error),
}

/// Full report as handed to file exporters.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportBundle<'a> {
    pub board_name: &'a str,
    pub date_range: DateRange,
    pub generated_at: DateTime<Utc>,
    pub summary: &'a ReportSummary,
    pub task_reports: &'a [TaskReport],
    pub collaborator_reports: &'a [CollaboratorReport],
    pub insights: &'a ReportInsights,
}

impl ReportBundle<'_> {
    pub fn to_json_pretty(&self) -> Result<String, ExportError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// One CSV line per task row; zero lateness is written as `-`.
pub fn write_tasks_csv<W: Write>(writer: W, tasks: &[TaskReport]) -> Result<(), ExportError> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    csv_writer.write_record(TASK_CSV_HEADER)?;

    for task in tasks {
        let days_late = if task.days_late > 0 {
            task.days_late.to_string()
        } else {
            "-".to_string()
        };
        csv_writer.write_record([
            task.collaborator_name.as_str(),
            task.task_name.as_str(),
            task.due_date_display.as_str(),
            task.status.label(),
            days_late.as_str(),
            task.observations.as_str(),
        ])?;
    }

    csv_writer.flush()?;
    Ok(())
}
