use board_report::reporting::export::{write_tasks_csv, ReportBundle};
use board_report::reporting::{unique_collaborators, TaskReportGenerator};
use board_report::{
    validate, Board, BoardReport, ClassificationRules, DateRange, ReportSummary, StatusLabel,
    TaskFilter, TaskReport,
};
use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use serde_json::json;

const SAMPLE_BOARD: &str = include_str!("../sample_board.json");

fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap()
}

fn may_2024() -> DateRange {
    DateRange::from_dates(
        NaiveDate::from_ymd_opt(2024, 5, 1).expect("valid start"),
        NaiveDate::from_ymd_opt(2024, 5, 31).expect("valid end"),
    )
    .expect("ordered range")
}

fn sample_board() -> Board {
    Board::from_json_str(SAMPLE_BOARD).expect("sample export loads")
}

fn sample_report() -> BoardReport {
    BoardReport::generate(
        &sample_board(),
        &may_2024(),
        now(),
        &ClassificationRules::standard(),
    )
}

fn rows_for<'a>(report: &'a BoardReport, card_id: &str) -> Vec<&'a TaskReport> {
    report
        .tasks
        .iter()
        .filter(|task| task.card_id == card_id)
        .collect()
}

#[test]
fn sample_export_is_structurally_valid() {
    let raw: serde_json::Value = serde_json::from_str(SAMPLE_BOARD).expect("fixture is JSON");
    assert!(validate(&raw));

    let board = sample_board();
    assert_eq!(board.name(), "Marketing Conteúdo");
    assert_eq!(board.cards().len(), 8);
    assert_eq!(board.skipped_elements(), 1, "the bare number card is skipped");
}

#[test]
fn validate_rejects_missing_or_mistyped_keys() {
    assert!(!validate(&json!({ "name": "x", "cards": [], "lists": [] })));
    assert!(!validate(&json!({ "name": "x", "cards": {}, "lists": [], "members": [] })));
    assert!(!validate(&json!({ "name": 7, "cards": [], "lists": [], "members": [] })));
    assert!(!validate(&json!([])));
    assert!(validate(&json!({ "name": "x", "cards": [], "lists": [], "members": [] })));

    let error = Board::from_json_str(r#"{"cards": []}"#).expect_err("invalid structure");
    assert!(error.to_string().contains("board export must be an object"));
}

#[test]
fn cards_outside_the_window_are_excluded() {
    let report = sample_report();
    assert!(rows_for(&report, "c-old").is_empty());
    assert_eq!(report.summary.distinct_tasks, 7);
    assert_eq!(report.summary.total_tasks, 8);
}

#[test]
fn done_list_wins_over_past_due_date() {
    let report = sample_report();
    let press = rows_for(&report, "c-press");
    assert_eq!(press.len(), 1);
    assert_eq!(press[0].status, StatusLabel::Completed);
    assert_eq!(press[0].days_late, 0);
    assert_eq!(press[0].observations, "FEITO");
    assert_eq!(press[0].collaborator_name, "Ana Souza");
}

#[test]
fn overdue_card_fans_out_as_late_rows() {
    let report = sample_report();
    let video = rows_for(&report, "c-video");
    assert_eq!(video.len(), 2);

    let names: Vec<_> = video
        .iter()
        .map(|row| row.collaborator_name.as_str())
        .collect();
    assert_eq!(names, vec!["Ana Souza", "Bruno Lima"]);

    for row in video {
        assert_eq!(row.status, StatusLabel::Late);
        assert_eq!(row.days_late, 152);
        assert_eq!(row.due_date_display, "01/01/2024");
        assert_eq!(row.observations, "Final cut pending client approval");
    }
}

#[test]
fn unassigned_and_unresolved_cards_use_fallbacks() {
    let report = sample_report();

    let post = rows_for(&report, "c-post");
    assert_eq!(post.len(), 1);
    assert_eq!(post[0].collaborator_name, "Unassigned");
    assert_eq!(post[0].status, StatusLabel::Planning);
    assert_eq!(post[0].due_date_display, "Not set");
    assert_eq!(post[0].observations, "Planejando estratégias");

    let orphan = rows_for(&report, "c-orphan");
    assert_eq!(orphan.len(), 1);
    assert_eq!(orphan[0].collaborator_name, "Unassigned");
    assert_eq!(orphan[0].status, StatusLabel::InProgress);
    assert_eq!(orphan[0].observations, "List not found");
}

#[test]
fn awaiting_third_party_counts_as_completed() {
    let report = sample_report();
    let partner = rows_for(&report, "c-partner");
    assert_eq!(partner.len(), 1);
    assert_eq!(partner[0].status, StatusLabel::Completed);
    assert_eq!(partner[0].days_late, 0);

    let ads = rows_for(&report, "c-ads");
    assert_eq!(ads[0].status, StatusLabel::Blocked);
}

#[test]
fn summary_counters_sum_to_row_count() {
    let summary = sample_report().summary;
    assert_eq!(
        summary,
        ReportSummary {
            total_tasks: 8,
            completed_tasks: 2,
            in_progress_tasks: 1,
            late_tasks: 2,
            blocked_tasks: 1,
            planning_tasks: 1,
            recurring_tasks: 1,
            distinct_tasks: 7,
        }
    );

    let by_status: usize = StatusLabel::ordered()
        .into_iter()
        .map(|status| summary.count(status))
        .sum();
    assert_eq!(by_status, summary.total_tasks);
}

#[test]
fn collaborators_ordered_by_rate_with_stable_ties() {
    let report = sample_report();
    let order: Vec<_> = report
        .collaborators
        .iter()
        .map(|collaborator| (collaborator.collaborator_name.as_str(), collaborator.completion_rate))
        .collect();
    assert_eq!(
        order,
        vec![
            ("Ana Souza", 50),
            ("Carla Dias", 50),
            ("Bruno Lima", 0),
            ("Unassigned", 0),
        ]
    );

    let ana = &report.collaborators[0];
    assert_eq!(ana.average_days_late, 152);
    assert_eq!(ana.tasks[0].task_name, "Press kit", "completed tasks lead");
    assert_eq!(ana.tasks[1].task_name, "Launch video");

    let carla = &report.collaborators[1];
    assert_eq!(carla.average_days_late, 0);
}

#[test]
fn insights_reflect_the_rollup() {
    let insights = sample_report().insights;
    assert_eq!(insights.productivity_score, 25);
    assert_eq!(insights.on_time_delivery_rate, 25);
    assert_eq!(insights.average_tasks_per_collaborator, 2);

    let top = insights.top_performer.expect("collaborators present");
    assert_eq!(top.collaborator_name, "Ana Souza");
    assert_eq!(top.completion_rate, 50);

    let days: Vec<_> = insights
        .completion_trend
        .iter()
        .map(|point| (point.date.to_string(), point.completed, point.total))
        .collect();
    assert_eq!(
        days,
        vec![
            ("2024-01-01".to_string(), 1, 3),
            ("2024-05-01".to_string(), 1, 1),
            ("2024-06-10".to_string(), 0, 1),
            ("2024-06-15".to_string(), 0, 1),
        ]
    );

    assert_eq!(insights.status_breakdown.len(), 6);
    assert_eq!(insights.status_breakdown[0].status, StatusLabel::Completed);
    assert_eq!(insights.status_breakdown[0].count, 2);
}

#[test]
fn same_inputs_produce_identical_reports() {
    let first = serde_json::to_value(sample_report()).expect("serialize");
    let second = serde_json::to_value(sample_report()).expect("serialize");
    assert_eq!(first, second);
}

#[test]
fn report_rows_round_trip_through_json() {
    let report = sample_report();

    let summary_json = serde_json::to_string(&report.summary).expect("serialize summary");
    assert!(summary_json.contains("\"totalTasks\":8"));
    let summary: ReportSummary = serde_json::from_str(&summary_json).expect("deserialize summary");
    assert_eq!(summary, report.summary);

    let tasks_json = serde_json::to_string(&report.tasks).expect("serialize tasks");
    assert!(tasks_json.contains("\"collaboratorName\""));
    let tasks: Vec<TaskReport> = serde_json::from_str(&tasks_json).expect("deserialize tasks");
    assert_eq!(tasks, report.tasks);
}

#[test]
fn empty_board_yields_empty_report() {
    let board = Board::from_value(json!({
        "name": "Empty",
        "cards": [],
        "lists": [],
        "members": []
    }))
    .expect("empty board loads");

    let report = BoardReport::generate(&board, &may_2024(), now(), &ClassificationRules::standard());
    assert!(report.tasks.is_empty());
    assert!(report.collaborators.is_empty());
    assert_eq!(report.summary, ReportSummary::default());
    assert_eq!(report.insights.productivity_score, 0);
    assert!(report.insights.top_performer.is_none());
}

#[test]
fn generator_honours_the_captured_instant() {
    let rules = ClassificationRules::standard();
    let board = sample_board();

    // Before the video's due date nothing on the board is late.
    let early = Utc.with_ymd_and_hms(2023, 12, 31, 0, 0, 0).unwrap();
    let rows = TaskReportGenerator::new(&rules, early).generate(&board, &may_2024());
    assert!(rows.iter().all(|row| row.status != StatusLabel::Late));
    assert!(rows.iter().all(|row| row.days_late == 0));
}

#[test]
fn filters_narrow_rows_and_rollups() {
    let report = sample_report();

    let late_only = TaskFilter {
        status: Some(StatusLabel::Late),
        ..TaskFilter::default()
    };
    assert_eq!(late_only.apply(&report.tasks).len(), 2);

    let carla = TaskFilter {
        search: Some("carla".to_string()),
        ..TaskFilter::default()
    };
    let collaborators = carla.apply_collaborators(&report.collaborators);
    assert_eq!(collaborators.len(), 1);
    assert_eq!(collaborators[0].collaborator_name, "Carla Dias");

    assert_eq!(
        unique_collaborators(&report.tasks),
        vec!["Ana Souza", "Bruno Lima", "Carla Dias", "Unassigned"]
    );
}

#[test]
fn exports_cover_every_row() {
    let board = sample_board();
    let range = may_2024();
    let report = sample_report();

    let mut buffer = Vec::new();
    write_tasks_csv(&mut buffer, &report.tasks).expect("csv export");
    let csv = String::from_utf8(buffer).expect("utf8 csv");
    assert_eq!(csv.lines().count(), report.tasks.len() + 1);
    assert!(csv.contains("Bruno Lima,Launch video,01/01/2024,Late,152,"));

    let bundle = ReportBundle {
        board_name: board.name(),
        date_range: range,
        generated_at: now(),
        summary: &report.summary,
        task_reports: &report.tasks,
        collaborator_reports: &report.collaborators,
        insights: &report.insights,
    };
    let json: serde_json::Value =
        serde_json::from_str(&bundle.to_json_pretty().expect("json export")).expect("parse");
    assert_eq!(json["boardName"], "Marketing Conteúdo");
    assert_eq!(json["taskReports"].as_array().map(Vec::len), Some(8));
    assert_eq!(json["insights"]["topPerformer"]["collaboratorName"], "Ana Souza");
}
