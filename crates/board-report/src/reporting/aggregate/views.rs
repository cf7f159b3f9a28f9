use super::super::domain::{StatusLabel, TaskReport};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Board-wide counts over the fanned-out rows. A card with several
/// collaborators counts once per collaborator; `distinct_tasks` is the
/// per-card figure.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportSummary {
    pub total_tasks: usize,
    pub completed_tasks: usize,
    pub in_progress_tasks: usize,
    pub late_tasks: usize,
    pub blocked_tasks: usize,
    pub planning_tasks: usize,
    pub recurring_tasks: usize,
    pub distinct_tasks: usize,
}

impl ReportSummary {
    pub fn count(&self, status: StatusLabel) -> usize {
        match status {
            StatusLabel::Completed => self.completed_tasks,
            StatusLabel::InProgress => self.in_progress_tasks,
            StatusLabel::Late => self.late_tasks,
            StatusLabel::Blocked => self.blocked_tasks,
            StatusLabel::Planning => self.planning_tasks,
            StatusLabel::Recurring => self.recurring_tasks,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CollaboratorReport {
    pub collaborator_name: String,
    pub total_tasks: usize,
    pub completed_tasks: usize,
    pub in_progress_tasks: usize,
    pub late_tasks: usize,
    pub blocked_tasks: usize,
    pub planning_tasks: usize,
    pub recurring_tasks: usize,
    /// 0 to 100.
    pub completion_rate: u8,
    pub average_days_late: u32,
    pub tasks: Vec<TaskReport>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompletionTrendPoint {
    pub date: NaiveDate,
    pub completed: usize,
    pub total: usize,
    pub completion_rate: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusShare {
    pub status: StatusLabel,
    pub status_label: String,
    pub count: usize,
    pub percentage: f32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TopPerformer {
    pub collaborator_name: String,
    pub completion_rate: u8,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportInsights {
    pub productivity_score: u8,
    pub average_tasks_per_collaborator: usize,
    pub on_time_delivery_rate: u8,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub top_performer: Option<TopPerformer>,
    pub status_breakdown: Vec<StatusShare>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub completion_trend: Vec<CompletionTrendPoint>,
}
