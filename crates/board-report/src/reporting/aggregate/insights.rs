use super::super::domain::{StatusLabel, TaskReport};
use super::summary::percentage;
use super::views::{
    CollaboratorReport, CompletionTrendPoint, ReportInsights, ReportSummary, StatusShare,
    TopPerformer,
};
use chrono::NaiveDate;
use std::collections::BTreeMap;

pub fn generate_insights(
    summary: &ReportSummary,
    tasks: &[TaskReport],
    collaborators: &[CollaboratorReport],
) -> ReportInsights {
    let productivity_score = percentage(summary.completed_tasks, summary.total_tasks);

    let average_tasks_per_collaborator = if collaborators.is_empty() {
        0
    } else {
        (summary.total_tasks as f64 / collaborators.len() as f64).round() as usize
    };

    let on_time = tasks
        .iter()
        .filter(|task| task.is_completed() && task.days_late == 0)
        .count();
    let on_time_delivery_rate = percentage(on_time, tasks.len());

    // First collaborator wins a tie.
    let top_performer = collaborators
        .iter()
        .fold(None::<&CollaboratorReport>, |best, current| match best {
            Some(top) if current.completion_rate <= top.completion_rate => Some(top),
            _ => Some(current),
        })
        .map(|top| TopPerformer {
            collaborator_name: top.collaborator_name.clone(),
            completion_rate: top.completion_rate,
        });

    let status_breakdown = StatusLabel::ordered()
        .into_iter()
        .map(|status| {
            let count = summary.count(status);
            let share = if summary.total_tasks == 0 {
                0.0
            } else {
                count as f32 / summary.total_tasks as f32 * 100.0
            };
            StatusShare {
                status,
                status_label: status.label().to_string(),
                count,
                percentage: share,
            }
        })
        .collect();

    ReportInsights {
        productivity_score,
        average_tasks_per_collaborator,
        on_time_delivery_rate,
        top_performer,
        status_breakdown,
        completion_trend: completion_trend(tasks),
    }
}

/// Completion per due day; rows without a due date are left out.
fn completion_trend(tasks: &[TaskReport]) -> Vec<CompletionTrendPoint> {
    let mut by_day: BTreeMap<NaiveDate, (usize, usize)> = BTreeMap::new();
    for task in tasks {
        let Some(due) = task.due_date else {
            continue;
        };
        let entry = by_day.entry(due.date_naive()).or_default();
        entry.1 += 1;
        if task.is_completed() {
            entry.0 += 1;
        }
    }

    by_day
        .into_iter()
        .map(|(date, (completed, total))| CompletionTrendPoint {
            date,
            completed,
            total,
            completion_rate: completed as f32 / total as f32 * 100.0,
        })
        .collect()
}
