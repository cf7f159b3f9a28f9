use super::aggregate::views::CollaboratorReport;
use super::domain::{StatusLabel, TaskReport};
use std::collections::BTreeSet;

/// Narrows report rows for display. Unset criteria match everything.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskFilter {
    /// Case-insensitive substring of the task or collaborator name.
    pub search: Option<String>,
    pub status: Option<StatusLabel>,
    /// Exact collaborator name.
    pub collaborator: Option<String>,
}

impl TaskFilter {
    pub fn is_empty(&self) -> bool {
        self.search_term().is_none() && self.status.is_none() && self.collaborator.is_none()
    }

    pub fn matches(&self, task: &TaskReport) -> bool {
        let matches_search = self.search_term().map_or(true, |term| {
            contains_ignore_case(&task.task_name, &term)
                || contains_ignore_case(&task.collaborator_name, &term)
        });
        let matches_status = self.status.map_or(true, |status| task.status == status);
        let matches_collaborator = self
            .collaborator
            .as_deref()
            .map_or(true, |name| task.collaborator_name == name);

        matches_search && matches_status && matches_collaborator
    }

    pub fn apply(&self, tasks: &[TaskReport]) -> Vec<TaskReport> {
        tasks
            .iter()
            .filter(|task| self.matches(task))
            .cloned()
            .collect()
    }

    /// Collaborator rollups are narrowed by the search term only.
    pub fn apply_collaborators(&self, collaborators: &[CollaboratorReport]) -> Vec<CollaboratorReport> {
        match self.search_term() {
            Some(term) => collaborators
                .iter()
                .filter(|collaborator| contains_ignore_case(&collaborator.collaborator_name, &term))
                .cloned()
                .collect(),
            None => collaborators.to_vec(),
        }
    }

    fn search_term(&self) -> Option<String> {
        self.search
            .as_deref()
            .map(str::trim)
            .filter(|term| !term.is_empty())
            .map(str::to_lowercase)
    }
}

/// Sorted, deduplicated collaborator names across `tasks`.
pub fn unique_collaborators(tasks: &[TaskReport]) -> Vec<String> {
    tasks
        .iter()
        .map(|task| task.collaborator_name.clone())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

fn contains_ignore_case(haystack: &str, lowered_needle: &str) -> bool {
    haystack.to_lowercase().contains(lowered_needle)
}
