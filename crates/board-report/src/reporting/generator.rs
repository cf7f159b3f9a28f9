use super::board::{Board, Card};
use super::classifier::classify_status;
use super::domain::{
    DateRange, TaskReport, DUE_DATE_FORMAT, DUE_DATE_NOT_SET, LIST_NOT_FOUND, UNASSIGNED,
};
use super::lateness::days_late;
use super::rules::ClassificationRules;
use chrono::{DateTime, Utc};

/// Turns board cards into report rows, one per assigned collaborator.
///
/// `now` is fixed at construction so every card in a run is classified
/// against the same instant.
pub struct TaskReportGenerator<'a> {
    rules: &'a ClassificationRules,
    now: DateTime<Utc>,
}

impl<'a> TaskReportGenerator<'a> {
    pub fn new(rules: &'a ClassificationRules, now: DateTime<Utc>) -> Self {
        Self { rules, now }
    }

    pub fn generate(&self, board: &Board, range: &DateRange) -> Vec<TaskReport> {
        board
            .cards()
            .iter()
            .filter(|card| in_window(card, range))
            .flat_map(|card| self.fan_out(board, card))
            .collect()
    }

    fn fan_out(&self, board: &Board, card: &Card) -> Vec<TaskReport> {
        let list = board.list(&card.list_id);
        let status = classify_status(card, list, self.now, self.rules);

        let observations = if card.description.is_empty() {
            list.map(|list| list.name.clone())
                .unwrap_or_else(|| LIST_NOT_FOUND.to_string())
        } else {
            card.description.clone()
        };

        let row = TaskReport {
            card_id: card.id.clone(),
            collaborator_name: UNASSIGNED.to_string(),
            task_name: card.name.clone(),
            due_date: card.due_date,
            due_date_display: card
                .due_date
                .map(|due| due.format(DUE_DATE_FORMAT).to_string())
                .unwrap_or_else(|| DUE_DATE_NOT_SET.to_string()),
            status,
            days_late: days_late(card, status, self.now),
            observations,
        };

        if card.member_ids.is_empty() {
            return vec![row];
        }

        card.member_ids
            .iter()
            .map(|member_id| TaskReport {
                collaborator_name: board
                    .member(member_id)
                    .map(|member| member.full_name.clone())
                    .unwrap_or_else(|| UNASSIGNED.to_string()),
                ..row.clone()
            })
            .collect()
    }
}

// Closed cards are kept; only last activity decides.
fn in_window(card: &Card, range: &DateRange) -> bool {
    card.last_activity
        .is_some_and(|last_activity| range.contains(last_activity))
}
