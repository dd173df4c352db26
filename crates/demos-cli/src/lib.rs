//! DEMOS operator CLI
//!
//! Subcommands:
//! - `now`: Eastern day boundaries of an instant
//! - `check`: expected-timestamp check for one date
//! - `set-dates`: run a mutation batch against a JSON-seeded store

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::Context;
use chrono::{DateTime, Utc};
use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};
use serde::Serialize;

use demos_core::{init_tracing, ApplicationDateService, DemosConfig, DemosError, SetApplicationDatesInput};
use demos_dates::{
    check_input_date_expected_timestamp, resolve_date_value, EasternNow, EasternTzDate, InputDate,
};
use demos_model::{DateType, DateValue, ExpectedTimestamp};
use demos_store::{MemoryStore, StoreSnapshot};

/// Command-line definition
#[must_use]
pub fn cli() -> Command {
    Command::new("demos-dates")
        .version(env!("CARGO_PKG_VERSION"))
        .about("DEMOS application date validation and phase start")
        .subcommand_required(true)
        .arg(
            Arg::new("config")
                .long("config")
                .global(true)
                .value_parser(value_parser!(PathBuf))
                .help("TOML configuration file"),
        )
        .arg(
            Arg::new("json-logs")
                .long("json-logs")
                .global(true)
                .action(ArgAction::SetTrue)
                .help("Emit logs as JSON lines"),
        )
        .subcommand(
            Command::new("now")
                .about("Print the Eastern day boundaries of an instant")
                .arg(
                    Arg::new("at")
                        .long("at")
                        .value_parser(value_parser!(DateTime<Utc>))
                        .help("RFC 3339 instant (defaults to the current time)"),
                ),
        )
        .subcommand(
            Command::new("check")
                .about("Check a date against its expected Eastern timestamp")
                .arg(
                    Arg::new("date-type")
                        .long("date-type")
                        .required(true)
                        .value_parser(value_parser!(DateType))
                        .help("Date type, e.g. \"Concept Start Date\""),
                )
                .arg(
                    Arg::new("value")
                        .long("value")
                        .required(true)
                        .help("RFC 3339 instant or YYYY-MM-DD calendar date"),
                ),
        )
        .subcommand(
            Command::new("set-dates")
                .about("Validate and apply a batch of dates to a seeded store")
                .arg(
                    Arg::new("seed")
                        .long("seed")
                        .required(true)
                        .value_parser(value_parser!(PathBuf))
                        .help("JSON store snapshot"),
                )
                .arg(
                    Arg::new("input")
                        .long("input")
                        .required(true)
                        .value_parser(value_parser!(PathBuf))
                        .help("JSON mutation batch"),
                )
                .arg(
                    Arg::new("out")
                        .long("out")
                        .value_parser(value_parser!(PathBuf))
                        .help("Write the committed store snapshot here"),
                ),
        )
}

/// Result of `check`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckReport {
    /// Date type checked
    pub date_type: DateType,
    /// Boundary the date type expects
    pub expected_timestamp: ExpectedTimestamp,
    /// Value as an Eastern instant
    pub value: EasternTzDate,
    /// Whether the check passed
    pub valid: bool,
    /// Failure message
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Failure printed by `set-dates`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorReport {
    /// `validation`, `configuration` or `dependency`
    pub kind: &'static str,
    /// Error message
    pub message: String,
}

impl From<&DemosError> for ErrorReport {
    fn from(err: &DemosError) -> Self {
        let kind = if err.is_validation() {
            "validation"
        } else if err.is_configuration() {
            "configuration"
        } else {
            "dependency"
        };
        Self {
            kind,
            message: err.to_string(),
        }
    }
}

/// Eastern day boundaries of `at`, or of the current time
#[must_use]
pub fn now_report(at: Option<DateTime<Utc>>) -> EasternNow {
    EasternNow::at(at.unwrap_or_else(Utc::now))
}

/// Run the expected-timestamp check on a raw value.
///
/// # Errors
///
/// When `value` is neither an RFC 3339 instant nor a calendar date.
pub fn check_date(date_type: DateType, value: &str) -> anyhow::Result<CheckReport> {
    let parsed: DateValue = serde_json::from_value(serde_json::Value::String(value.to_string()))
        .with_context(|| format!("invalid date value {value:?}"))?;
    let expected = date_type.expected_timestamp();
    let instant = resolve_date_value(parsed, expected);
    let result = check_input_date_expected_timestamp(&InputDate::new(date_type, instant));
    Ok(CheckReport {
        date_type,
        expected_timestamp: expected,
        value: EasternTzDate::from_instant(instant),
        valid: result.is_ok(),
        error: result.err().map(|err| err.to_string()),
    })
}

/// Load a store snapshot from a JSON file.
///
/// # Errors
///
/// Unreadable file or malformed JSON.
pub fn load_snapshot(path: &Path) -> anyhow::Result<StoreSnapshot> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read seed {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("invalid seed {}", path.display()))
}

/// Load a mutation batch from a JSON file.
///
/// # Errors
///
/// Unreadable file or malformed JSON, including unknown date types.
pub fn load_batch(path: &Path) -> anyhow::Result<SetApplicationDatesInput> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read input {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("invalid input {}", path.display()))
}

fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Run the parsed command line.
///
/// # Errors
///
/// Configuration, I/O and parse failures. A rejected batch is reported on
/// stdout and yields a failing exit code instead.
pub async fn run(matches: &ArgMatches) -> anyhow::Result<ExitCode> {
    let config = match matches.get_one::<PathBuf>("config") {
        Some(path) => DemosConfig::load(path)?,
        None => DemosConfig::default(),
    };
    let config = if matches.get_flag("json-logs") {
        config.with_json_logs(true)
    } else {
        config
    };
    init_tracing(&config.logging)?;

    match matches.subcommand() {
        Some(("now", args)) => {
            print_json(&now_report(args.get_one::<DateTime<Utc>>("at").copied()))?;
            Ok(ExitCode::SUCCESS)
        }
        Some(("check", args)) => {
            let date_type = *args
                .get_one::<DateType>("date-type")
                .context("--date-type is required")?;
            let value = args
                .get_one::<String>("value")
                .context("--value is required")?;
            let report = check_date(date_type, value)?;
            print_json(&report)?;
            Ok(if report.valid {
                ExitCode::SUCCESS
            } else {
                ExitCode::FAILURE
            })
        }
        Some(("set-dates", args)) => {
            let seed = args.get_one::<PathBuf>("seed").context("--seed is required")?;
            let input = args.get_one::<PathBuf>("input").context("--input is required")?;
            let store = MemoryStore::from_snapshot(load_snapshot(seed)?);
            let batch = load_batch(input)?;
            tracing::info!(
                "loaded {} dates for application {} from {}",
                batch.application_dates.len(),
                batch.application_id,
                input.display()
            );
            let service = ApplicationDateService::new(store).with_validation(config.validation);

            match service.set_application_dates(&batch).await {
                Ok(outcome) => {
                    if let Some(out) = args.get_one::<PathBuf>("out") {
                        let snapshot = serde_json::to_string_pretty(&service.store().snapshot())?;
                        std::fs::write(out, snapshot)
                            .with_context(|| format!("failed to write {}", out.display()))?;
                        tracing::info!("wrote store snapshot to {}", out.display());
                    }
                    print_json(&outcome)?;
                    Ok(ExitCode::SUCCESS)
                }
                Err(err) => {
                    let report = ErrorReport::from(&err);
                    tracing::warn!("{} rejected ({}): {}", input.display(), report.kind, report.message);
                    print_json(&report)?;
                    Ok(ExitCode::FAILURE)
                }
            }
        }
        _ => Ok(ExitCode::FAILURE),
    }
}
