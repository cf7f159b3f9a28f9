use super::board::Card;
use super::domain::StatusLabel;
use chrono::{DateTime, Duration, Utc};

/// Whole days past due, rounded up. Zero for completed cards, cards without
/// a due date, and cards not yet due.
pub fn days_late(card: &Card, status: StatusLabel, now: DateTime<Utc>) -> u32 {
    let Some(due) = card.due_date else {
        return 0;
    };
    if status == StatusLabel::Completed || due >= now {
        return 0;
    }

    let elapsed = now - due;
    let whole_days = elapsed.num_days();
    let days = if elapsed > Duration::days(whole_days) {
        whole_days + 1
    } else {
        whole_days
    };

    u32::try_from(days).unwrap_or(u32::MAX)
}
