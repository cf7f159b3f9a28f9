use super::super::domain::{StatusLabel, TaskReport};
use super::views::{CollaboratorReport, ReportSummary};
use std::collections::HashSet;

#[derive(Debug, Default, Clone)]
pub(crate) struct StatusTally {
    pub total: usize,
    pub completed: usize,
    pub in_progress: usize,
    pub late: usize,
    pub blocked: usize,
    pub planning: usize,
    pub recurring: usize,
}

impl StatusTally {
    pub(crate) fn from_reports<'a>(reports: impl IntoIterator<Item = &'a TaskReport>) -> Self {
        let mut tally = Self::default();
        for report in reports {
            tally.record(report.status);
        }
        tally
    }

    pub(crate) fn record(&mut self, status: StatusLabel) {
        self.total += 1;
        let slot = match status {
            StatusLabel::Completed => &mut self.completed,
            StatusLabel::InProgress => &mut self.in_progress,
            StatusLabel::Late => &mut self.late,
            StatusLabel::Blocked => &mut self.blocked,
            StatusLabel::Planning => &mut self.planning,
            StatusLabel::Recurring => &mut self.recurring,
        };
        *slot += 1;
    }

    /// `completed / total` as a whole percentage, 0 when empty.
    pub(crate) fn completion_rate(&self) -> u8 {
        percentage(self.completed, self.total)
    }

    pub(crate) fn into_summary(self, distinct_tasks: usize) -> ReportSummary {
        ReportSummary {
            total_tasks: self.total,
            completed_tasks: self.completed,
            in_progress_tasks: self.in_progress,
            late_tasks: self.late,
            blocked_tasks: self.blocked,
            planning_tasks: self.planning,
            recurring_tasks: self.recurring,
            distinct_tasks,
        }
    }

    pub(crate) fn into_collaborator(
        self,
        collaborator_name: String,
        average_days_late: u32,
        tasks: Vec<TaskReport>,
    ) -> CollaboratorReport {
        let completion_rate = self.completion_rate();
        CollaboratorReport {
            collaborator_name,
            total_tasks: self.total,
            completed_tasks: self.completed,
            in_progress_tasks: self.in_progress,
            late_tasks: self.late,
            blocked_tasks: self.blocked,
            planning_tasks: self.planning,
            recurring_tasks: self.recurring,
            completion_rate,
            average_days_late,
            tasks,
        }
    }
}

pub(crate) fn percentage(part: usize, whole: usize) -> u8 {
    if whole == 0 {
        return 0;
    }
    ((part as f64 / whole as f64) * 100.0).round().clamp(0.0, 100.0) as u8
}

/// Straight status counts over every row, so multi-collaborator cards
/// count once per collaborator.
pub fn summarize(reports: &[TaskReport]) -> ReportSummary {
    let distinct_tasks = reports
        .iter()
        .map(|report| report.card_id.as_str())
        .collect::<HashSet<_>>()
        .len();

    StatusTally::from_reports(reports).into_summary(distinct_tasks)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(card_id: &str, collaborator: &str, status: StatusLabel) -> TaskReport {
        TaskReport {
            card_id: card_id.to_string(),
            collaborator_name: collaborator.to_string(),
            task_name: format!("Task {card_id}"),
            due_date: None,
            due_date_display: "Not set".to_string(),
            status,
            days_late: 0,
            observations: String::new(),
        }
    }

    #[test]
    fn empty_rows_give_zero_summary() {
        assert_eq!(summarize(&[]), ReportSummary::default());
    }

    #[test]
    fn counts_fanned_out_rows_and_distinct_cards() {
        let rows = vec![
            row("c1", "Ana", StatusLabel::Completed),
            row("c1", "Bruno", StatusLabel::Completed),
            row("c2", "Ana", StatusLabel::Late),
            row("c3", "Unassigned", StatusLabel::Blocked),
            row("c4", "Bruno", StatusLabel::Planning),
            row("c5", "Bruno", StatusLabel::Recurring),
            row("c6", "Ana", StatusLabel::InProgress),
        ];

        let summary = summarize(&rows);
        assert_eq!(summary.total_tasks, 7);
        assert_eq!(summary.completed_tasks, 2);
        assert_eq!(summary.late_tasks, 1);
        assert_eq!(summary.blocked_tasks, 1);
        assert_eq!(summary.in_progress_tasks, 1);
        assert_eq!(summary.distinct_tasks, 6);

        let by_status: usize = StatusLabel::ordered()
            .into_iter()
            .map(|status| summary.count(status))
            .sum();
        assert_eq!(by_status, rows.len());
    }

    #[test]
    fn percentage_rounds_half_up() {
        assert_eq!(percentage(1, 8), 13);
        assert_eq!(percentage(2, 3), 67);
        assert_eq!(percentage(0, 0), 0);
        assert_eq!(percentage(5, 5), 100);
    }
}
