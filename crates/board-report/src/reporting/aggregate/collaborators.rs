use super::super::domain::TaskReport;
use super::super::normalizer::collation_key;
use super::summary::StatusTally;
use super::views::CollaboratorReport;
use std::cmp::Ordering;
use std::collections::HashMap;

/// Groups rows by collaborator and rolls each group up.
///
/// Tasks within a group are ordered completed-first, then by task name
/// ignoring case and accents.
/// Collaborators are ordered by completion rate, highest first; ties keep
/// the order in which collaborators first appear in `reports`.
pub fn rollup_by_collaborator(reports: &[TaskReport]) -> Vec<CollaboratorReport> {
    let mut groups: Vec<(&str, Vec<TaskReport>)> = Vec::new();
    let mut positions: HashMap<&str, usize> = HashMap::new();

    for report in reports {
        let name = report.collaborator_name.as_str();
        let position = *positions.entry(name).or_insert_with(|| {
            groups.push((name, Vec::new()));
            groups.len() - 1
        });
        groups[position].1.push(report.clone());
    }

    let mut rollups: Vec<CollaboratorReport> = groups
        .into_iter()
        .map(|(name, tasks)| rollup_group(name.to_string(), tasks))
        .collect();

    rollups.sort_by(|a, b| b.completion_rate.cmp(&a.completion_rate));
    rollups
}

fn rollup_group(collaborator_name: String, mut tasks: Vec<TaskReport>) -> CollaboratorReport {
    let tally = StatusTally::from_reports(&tasks);
    let average_days_late = average_days_late(&tasks);

    tasks.sort_by(completed_first_then_name);

    tally.into_collaborator(collaborator_name, average_days_late, tasks)
}

/// Mean over late rows only, rounded to the nearest day.
fn average_days_late(tasks: &[TaskReport]) -> u32 {
    let late: Vec<u64> = tasks
        .iter()
        .filter(|task| task.days_late > 0)
        .map(|task| u64::from(task.days_late))
        .collect();

    if late.is_empty() {
        return 0;
    }

    let mean = late.iter().sum::<u64>() as f64 / late.len() as f64;
    mean.round().min(f64::from(u32::MAX)) as u32
}

fn completed_first_then_name(a: &TaskReport, b: &TaskReport) -> Ordering {
    b.is_completed()
        .cmp(&a.is_completed())
        .then_with(|| collation_key(&a.task_name).cmp(&collation_key(&b.task_name)))
        .then_with(|| a.task_name.cmp(&b.task_name))
}
