use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Collaborator name used for cards without a resolvable assignee.
pub const UNASSIGNED: &str = "Unassigned";
/// Shown in place of a due date when the card has none.
pub const DUE_DATE_NOT_SET: &str = "Not set";
/// Observation text for cards whose list id doesn't resolve.
pub const LIST_NOT_FOUND: &str = "List not found";
pub const DUE_DATE_FORMAT: &str = "%d/%m/%Y";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatusLabel {
    Completed,
    InProgress,
    Late,
    Blocked,
    Planning,
    Recurring,
}

impl StatusLabel {
    pub const fn ordered() -> [Self; 6] {
        [
            Self::Completed,
            Self::InProgress,
            Self::Late,
            Self::Blocked,
            Self::Planning,
            Self::Recurring,
        ]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Completed => "Completed",
            Self::InProgress => "In Progress",
            Self::Late => "Late",
            Self::Blocked => "Blocked",
            Self::Planning => "Planning",
            Self::Recurring => "Recurring",
        }
    }

    const fn key(self) -> &'static str {
        match self {
            Self::Completed => "completed",
            Self::InProgress => "in_progress",
            Self::Late => "late",
            Self::Blocked => "blocked",
            Self::Planning => "planning",
            Self::Recurring => "recurring",
        }
    }
}

impl fmt::Display for StatusLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown status '{0}'")]
pub struct UnknownStatus(pub String);

impl FromStr for StatusLabel {
    type Err = UnknownStatus;

    /// Accepts either the snake_case key (`in_progress`) or the display label
    /// (`In Progress`), ignoring case.
    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let wanted = value.trim();
        Self::ordered()
            .into_iter()
            .find(|status| {
                status.key().eq_ignore_ascii_case(wanted)
                    || status.label().eq_ignore_ascii_case(wanted)
            })
            .ok_or_else(|| UnknownStatus(value.to_string()))
    }
}

/// One report row: a card seen through one of its assigned collaborators.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskReport {
    pub card_id: String,
    pub collaborator_name: String,
    pub task_name: String,
    pub due_date: Option<DateTime<Utc>>,
    pub due_date_display: String,
    pub status: StatusLabel,
    pub days_late: u32,
    pub observations: String,
}

impl TaskReport {
    pub fn is_completed(&self) -> bool {
        self.status == StatusLabel::Completed
    }
}

/// Inclusive window applied to a card's last activity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DateRange {
    start: DateTime<Utc>,
    end: DateTime<Utc>,
}

impl DateRange {
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Result<Self, RangeError> {
        if start > end {
            return Err(RangeError::Inverted { start, end });
        }

        Ok(Self { start, end })
    }

    /// Whole calendar days in UTC, from the first instant of `start` to the
    /// last instant of `end`.
    pub fn from_dates(start: NaiveDate, end: NaiveDate) -> Result<Self, RangeError> {
        let start_of_day = start
            .and_hms_opt(0, 0, 0)
            .ok_or(RangeError::InvalidDate(start))?;
        let end_of_day = end
            .and_hms_nano_opt(23, 59, 59, 999_999_999)
            .ok_or(RangeError::InvalidDate(end))?;

        Self::new(
            Utc.from_utc_datetime(&start_of_day),
            Utc.from_utc_datetime(&end_of_day),
        )
    }

    pub fn start(&self) -> DateTime<Utc> {
        self.start
    }

    pub fn end(&self) -> DateTime<Utc> {
        self.end
    }

    pub fn contains(&self, instant: DateTime<Utc>) -> bool {
        instant >= self.start && instant <= self.end
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RangeError {
    #[error("date range start {start} is after its end {end}")]
    Inverted {
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    },
    #[error("{0} cannot be expanded to a full day")]
    InvalidDate(NaiveDate),
}
