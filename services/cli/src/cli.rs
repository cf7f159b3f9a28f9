use crate::render::{render_text, ReportView};
use board_report::config::AppConfig;
use board_report::error::AppError;
use board_report::reporting::export::{write_tasks_csv, ReportBundle};
use board_report::reporting::parse_timestamp;
use board_report::{
    telemetry, validate, Board, BoardReport, ClassificationRules, DateRange, StatusLabel,
    TaskFilter,
};
use chrono::{DateTime, NaiveDate, Utc};
use clap::{Args, Parser, Subcommand, ValueEnum};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tracing::info;

#[derive(Parser, Debug)]
#[command(
    name = "board-report",
    about = "Build productivity reports from exported Kanban boards",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Generate a task, collaborator, and insight report for a date window
    Report(ReportArgs),
    /// Check that a file is a structurally valid board export
    Validate(ValidateArgs),
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub(crate) enum OutputFormat {
    #[default]
    Text,
    Json,
    Csv,
}

#[derive(Args, Debug)]
pub(crate) struct ReportArgs {
    /// Path to the board's JSON export
    #[arg(long)]
    pub(crate) board: PathBuf,
    /// First day of the window, by card last activity (YYYY-MM-DD)
    #[arg(long, value_parser = parse_date)]
    pub(crate) start: NaiveDate,
    /// Last day of the window, inclusive (YYYY-MM-DD)
    #[arg(long, value_parser = parse_date)]
    pub(crate) end: NaiveDate,
    /// Evaluate lateness as of this instant instead of the current time
    #[arg(long, value_parser = parse_now)]
    pub(crate) now: Option<DateTime<Utc>>,
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub(crate) format: OutputFormat,
    /// Only show tasks with this status
    #[arg(long, value_parser = parse_status)]
    pub(crate) status: Option<StatusLabel>,
    /// Only show tasks assigned to this collaborator (exact name)
    #[arg(long)]
    pub(crate) collaborator: Option<String>,
    /// Case-insensitive match on task or collaborator name
    #[arg(long)]
    pub(crate) search: Option<String>,
    /// Include the full task listing in text output
    #[arg(long)]
    pub(crate) list_tasks: bool,
}

impl ReportArgs {
    fn filter(&self) -> TaskFilter {
        TaskFilter {
            search: self.search.clone(),
            status: self.status,
            collaborator: self.collaborator.clone(),
        }
    }
}

#[derive(Args, Debug)]
pub(crate) struct ValidateArgs {
    /// Path to the board's JSON export
    #[arg(long)]
    pub(crate) board: PathBuf,
}

pub(crate) fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let config = AppConfig::load()?;
    telemetry::init(&config.telemetry)?;

    info!(environment = ?config.environment, "configuration loaded");

    let stdout = io::stdout();
    let mut out = stdout.lock();

    match cli.command {
        Command::Report(args) => run_report(&args, &config.classification.rules(), &mut out),
        Command::Validate(args) => run_validate(&args.board, &mut out),
    }
}

fn run_report(
    args: &ReportArgs,
    rules: &ClassificationRules,
    out: &mut dyn Write,
) -> Result<(), AppError> {
    let range = DateRange::from_dates(args.start, args.end)?;
    let board = Board::from_path(&args.board)?;
    let now = args.now.unwrap_or_else(Utc::now);

    write_report(&board, &range, now, args, rules, out)
}

/// Generates once, then narrows the task and collaborator lists. The summary
/// and insights always describe the whole window.
pub(crate) fn write_report(
    board: &Board,
    range: &DateRange,
    now: DateTime<Utc>,
    args: &ReportArgs,
    rules: &ClassificationRules,
    out: &mut dyn Write,
) -> Result<(), AppError> {
    let report = BoardReport::generate(board, range, now, rules);
    let filter = args.filter();
    let tasks = filter.apply(&report.tasks);
    let collaborators = filter.apply_collaborators(&report.collaborators);

    match args.format {
        OutputFormat::Text => render_text(
            out,
            &ReportView {
                board,
                range,
                now,
                report: &report,
                tasks: &tasks,
                collaborators: &collaborators,
                filter: &filter,
                list_tasks: args.list_tasks,
            },
        )?,
        OutputFormat::Json => {
            let bundle = ReportBundle {
                board_name: board.name(),
                date_range: *range,
                generated_at: now,
                summary: &report.summary,
                task_reports: &tasks,
                collaborator_reports: &collaborators,
                insights: &report.insights,
            };
            writeln!(out, "{}", bundle.to_json_pretty()?)?;
        }
        OutputFormat::Csv => write_tasks_csv(&mut *out, &tasks)?,
    }

    Ok(())
}

fn run_validate(path: &Path, out: &mut dyn Write) -> Result<(), AppError> {
    let raw = std::fs::read_to_string(path)?;
    let verdict = if export_is_valid(&raw) {
        "valid board export"
    } else {
        "not a valid board export"
    };
    writeln!(out, "{}: {verdict}", path.display())?;
    Ok(())
}

fn export_is_valid(raw: &str) -> bool {
    serde_json::from_str::<serde_json::Value>(raw).is_ok_and(|value| validate(&value))
}

pub(crate) fn parse_date(raw: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|err| format!("failed to parse '{raw}' as YYYY-MM-DD ({err})"))
}

fn parse_now(raw: &str) -> Result<DateTime<Utc>, String> {
    parse_timestamp(raw)
        .ok_or_else(|| format!("failed to parse '{raw}' as an RFC 3339 timestamp or YYYY-MM-DD"))
}

fn parse_status(raw: &str) -> Result<StatusLabel, String> {
    raw.parse::<StatusLabel>().map_err(|err| err.to_string())
}
