use super::aggregate::views::{CollaboratorReport, ReportInsights, ReportSummary};
use super::aggregate::{generate_insights, rollup_by_collaborator, summarize};
use super::board::Board;
use super::domain::{DateRange, TaskReport};
use super::generator::TaskReportGenerator;
use super::rules::ClassificationRules;
use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::info;

/// Everything one report run produces. Immutable once built.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BoardReport {
    pub tasks: Vec<TaskReport>,
    pub summary: ReportSummary,
    pub collaborators: Vec<CollaboratorReport>,
    pub insights: ReportInsights,
}

impl BoardReport {
    pub fn generate(
        board: &Board,
        range: &DateRange,
        now: DateTime<Utc>,
        rules: &ClassificationRules,
    ) -> Self {
        let tasks = TaskReportGenerator::new(rules, now).generate(board, range);
        let summary = summarize(&tasks);
        let collaborators = rollup_by_collaborator(&tasks);
        let insights = generate_insights(&summary, &tasks, &collaborators);

        info!(
            board = board.name(),
            start = %range.start(),
            end = %range.end(),
            %now,
            cards = summary.distinct_tasks,
            rows = summary.total_tasks,
            collaborators = collaborators.len(),
            "board report generated"
        );

        Self {
            tasks,
            summary,
            collaborators,
            insights,
        }
    }
}
