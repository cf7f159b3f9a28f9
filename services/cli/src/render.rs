use board_report::reporting::domain::DUE_DATE_FORMAT;
use board_report::{Board, BoardReport, CollaboratorReport, DateRange, TaskFilter, TaskReport};
use chrono::{DateTime, Utc};
use std::io::{self, Write};

pub(crate) struct ReportView<'a> {
    pub(crate) board: &'a Board,
    pub(crate) range: &'a DateRange,
    pub(crate) now: DateTime<Utc>,
    pub(crate) report: &'a BoardReport,
    pub(crate) tasks: &'a [TaskReport],
    pub(crate) collaborators: &'a [CollaboratorReport],
    pub(crate) filter: &'a TaskFilter,
    pub(crate) list_tasks: bool,
}

pub(crate) fn render_text(out: &mut dyn Write, view: &ReportView<'_>) -> io::Result<()> {
    writeln!(out, "Board report: {}", view.board.name())?;
    writeln!(
        out,
        "Window: {} -> {} (evaluated {})",
        view.range.start().date_naive(),
        view.range.end().date_naive(),
        view.now.to_rfc3339()
    )?;
    if view.board.skipped_elements() > 0 {
        writeln!(
            out,
            "Skipped {} malformed export elements",
            view.board.skipped_elements()
        )?;
    }

    render_summary(out, view.report)?;
    render_insights(out, view.report)?;

    if !view.filter.is_empty() {
        writeln!(out, "\nFilters: {}", describe_filter(view.filter))?;
    }

    if view.collaborators.is_empty() {
        writeln!(out, "\nCollaborators: none")?;
    } else {
        writeln!(out, "\nCollaborators")?;
        for collaborator in view.collaborators {
            writeln!(
                out,
                "- {}: {} tasks, {} completed, {} late, {} blocked | {}% completion | avg {} days late",
                collaborator.collaborator_name,
                collaborator.total_tasks,
                collaborator.completed_tasks,
                collaborator.late_tasks,
                collaborator.blocked_tasks,
                collaborator.completion_rate,
                collaborator.average_days_late
            )?;
        }
    }

    if view.list_tasks {
        render_tasks(out, view.tasks)?;
    }

    Ok(())
}

fn render_summary(out: &mut dyn Write, report: &BoardReport) -> io::Result<()> {
    let summary = &report.summary;
    writeln!(out, "\nSummary")?;
    writeln!(
        out,
        "- {} task rows across {} cards",
        summary.total_tasks, summary.distinct_tasks
    )?;
    writeln!(
        out,
        "- Completed {} | In Progress {} | Late {} | Blocked {} | Planning {} | Recurring {}",
        summary.completed_tasks,
        summary.in_progress_tasks,
        summary.late_tasks,
        summary.blocked_tasks,
        summary.planning_tasks,
        summary.recurring_tasks
    )
}

fn render_insights(out: &mut dyn Write, report: &BoardReport) -> io::Result<()> {
    let insights = &report.insights;
    writeln!(out, "\nInsights")?;
    writeln!(out, "- Productivity score: {}%", insights.productivity_score)?;
    writeln!(out, "- On-time delivery: {}%", insights.on_time_delivery_rate)?;
    writeln!(
        out,
        "- Average tasks per collaborator: {}",
        insights.average_tasks_per_collaborator
    )?;
    match &insights.top_performer {
        Some(top) => writeln!(
            out,
            "- Top performer: {} ({}%)",
            top.collaborator_name, top.completion_rate
        )?,
        None => writeln!(out, "- Top performer: none")?,
    }

    writeln!(out, "Status breakdown:")?;
    for share in &insights.status_breakdown {
        writeln!(
            out,
            "  - {}: {} ({:.1}%)",
            share.status_label, share.count, share.percentage
        )?;
    }

    if !insights.completion_trend.is_empty() {
        writeln!(out, "Completion by due date:")?;
        for point in &insights.completion_trend {
            writeln!(
                out,
                "  - {}: {}/{} completed ({:.0}%)",
                point.date.format(DUE_DATE_FORMAT),
                point.completed,
                point.total,
                point.completion_rate
            )?;
        }
    }

    Ok(())
}

fn render_tasks(out: &mut dyn Write, tasks: &[TaskReport]) -> io::Result<()> {
    if tasks.is_empty() {
        return writeln!(out, "\nTasks: none");
    }

    writeln!(out, "\nTasks")?;
    for task in tasks {
        let lateness = if task.days_late > 0 {
            format!(", {} days late", task.days_late)
        } else {
            String::new()
        };
        writeln!(
            out,
            "- [{}] {} ({}), due {}{} | {}",
            task.status,
            task.task_name,
            task.collaborator_name,
            task.due_date_display,
            lateness,
            task.observations
        )?;
    }

    Ok(())
}

fn describe_filter(filter: &TaskFilter) -> String {
    let mut parts = Vec::new();
    if let Some(status) = filter.status {
        parts.push(format!("status {status}"));
    }
    if let Some(collaborator) = &filter.collaborator {
        parts.push(format!("collaborator '{collaborator}'"));
    }
    if let Some(search) = filter.search.as_deref().map(str::trim) {
        if !search.is_empty() {
            parts.push(format!("search '{search}'"));
        }
    }
    parts.join(", ")
}
