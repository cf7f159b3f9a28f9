use super::board::{Card, List};
use super::domain::StatusLabel;
use super::rules::ClassificationRules;
use chrono::{DateTime, Utc};

/// Status of `card` as of `now`. An unresolved list reads as in progress;
/// a past-due card that isn't completed always reads as late.
pub fn classify_status(
    card: &Card,
    list: Option<&List>,
    now: DateTime<Utc>,
    rules: &ClassificationRules,
) -> StatusLabel {
    let resolved = match list {
        Some(list) => rules.resolve(&list.name),
        None => StatusLabel::InProgress,
    };

    if resolved != StatusLabel::Completed && card.is_past_due(now) {
        return StatusLabel::Late;
    }

    resolved
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap()
    }

    fn card(due_date: Option<DateTime<Utc>>) -> Card {
        Card {
            id: "c1".to_string(),
            name: "Campaign copy".to_string(),
            description: String::new(),
            due_date,
            last_activity: Some(now()),
            list_id: "l1".to_string(),
            member_ids: Vec::new(),
            closed: false,
        }
    }

    fn list(name: &str) -> List {
        List {
            id: "l1".to_string(),
            name: name.to_string(),
            closed: false,
        }
    }

    #[test]
    fn completed_list_ignores_past_due_date() {
        let rules = ClassificationRules::standard();
        let overdue = card(Some(now() - Duration::days(30)));
        assert_eq!(
            classify_status(&overdue, Some(&list("FEITO")), now(), &rules),
            StatusLabel::Completed
        );
    }

    #[test]
    fn past_due_overrides_table_status() {
        let rules = ClassificationRules::standard();
        let overdue = card(Some(now() - Duration::days(1)));
        for name in [
            "EM PROCESSO DE REVISÃO",
            "AGUARDANDO RETORNO DE CORREÇÕES",
            "PLANEJANDO ESTRATÉGIAS",
            "Backlog",
        ] {
            assert_eq!(
                classify_status(&overdue, Some(&list(name)), now(), &rules),
                StatusLabel::Late,
                "{name} should be overridden"
            );
        }
    }

    #[test]
    fn due_exactly_now_is_not_late() {
        let rules = ClassificationRules::standard();
        let due_now = card(Some(now()));
        assert_eq!(
            classify_status(&due_now, Some(&list("Em processo de envio")), now(), &rules),
            StatusLabel::InProgress
        );
    }

    #[test]
    fn missing_list_defaults_to_in_progress() {
        let rules = ClassificationRules::standard();
        assert_eq!(
            classify_status(&card(None), None, now(), &rules),
            StatusLabel::InProgress
        );
        assert_eq!(
            classify_status(&card(Some(now() - Duration::hours(2))), None, now(), &rules),
            StatusLabel::Late
        );
    }
}
