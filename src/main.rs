use chrono::{Local, NaiveDate};
use clap::{Args, Parser, Subcommand};
use housing_match::config::AppConfig;
use housing_match::error::AppError;
use housing_match::matching::{
    check_supply_type, match_many, match_many_with_statistics, Announcement, ApplicantProfile,
    NationalIncomeTable, SupplyTypeId,
};
use housing_match::reference::load_income_table;
use housing_match::telemetry;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::json;
use std::fs::File;
use std::io::{self, BufReader, Write};
use std::path::{Path, PathBuf};
use tracing::info;

#[derive(Parser, Debug)]
#[command(
    name = "housing-match",
    about = "Check housing subscription eligibility and rank announcements for an applicant",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Rank announcements for one applicant
    Match(MatchArgs),
    /// Evaluate one supply type of one announcement
    Check(CheckArgs),
    /// Print batch statistics alongside the ranked results
    Stats(InputArgs),
}

#[derive(Args, Debug)]
struct InputArgs {
    /// Applicant profile JSON
    #[arg(long)]
    profile: PathBuf,
    /// JSON array of announcements
    #[arg(long)]
    announcements: PathBuf,
    /// National income table CSV (defaults to the built-in 2024 table)
    #[arg(long)]
    income_table: Option<PathBuf>,
    /// Evaluation date (YYYY-MM-DD, defaults to today)
    #[arg(long, value_parser = parse_date)]
    as_of: Option<NaiveDate>,
}

#[derive(Args, Debug)]
struct MatchArgs {
    #[command(flatten)]
    input: InputArgs,
    /// Drop announcements without any eligible supply type
    #[arg(long)]
    only_eligible: bool,
    /// Cap the number of ranked results
    #[arg(long)]
    limit: Option<usize>,
}

#[derive(Args, Debug)]
struct CheckArgs {
    #[command(flatten)]
    input: InputArgs,
    /// Announcement identifier
    #[arg(long)]
    announcement: String,
    /// Supply type identifier within the announcement
    #[arg(long)]
    supply_type: String,
}

struct LoadedInputs {
    profile: ApplicantProfile,
    announcements: Vec<Announcement>,
    income_table: NationalIncomeTable,
    as_of: NaiveDate,
}

fn main() {
    if let Err(err) = run_cli() {
        eprintln!("application error: {err}");
        std::process::exit(1);
    }
}

fn run_cli() -> Result<(), AppError> {
    let cli = Cli::parse();
    let config = AppConfig::load()?;
    telemetry::init(&config.telemetry)?;
    info!(?config.environment, "housing-match starting");

    match cli.command {
        Command::Match(args) => {
            let inputs = load_inputs(&args.input)?;
            let mut matching = config.matching.matching_config(inputs.as_of);
            matching.filters.only_eligible |= args.only_eligible;
            if args.limit.is_some() {
                matching.filters.max_results = args.limit;
            }

            let results = match_many(
                &inputs.profile,
                &inputs.announcements,
                &inputs.income_table,
                &matching,
            );
            write_json(&results)
        }
        Command::Check(args) => {
            let inputs = load_inputs(&args.input)?;
            let matching = config.matching.matching_config(inputs.as_of);
            let announcement = inputs
                .announcements
                .iter()
                .find(|announcement| announcement.id.0 == args.announcement)
                .ok_or_else(|| {
                    io::Error::new(
                        io::ErrorKind::NotFound,
                        format!("announcement '{}' not found", args.announcement),
                    )
                })?;

            let qualification = check_supply_type(
                &inputs.profile,
                announcement,
                &SupplyTypeId(args.supply_type),
                &inputs.income_table,
                &matching,
            )?;
            write_json(&qualification)
        }
        Command::Stats(args) => {
            let inputs = load_inputs(&args)?;
            let matching = config.matching.matching_config(inputs.as_of);
            let (results, statistics) = match_many_with_statistics(
                &inputs.profile,
                &inputs.announcements,
                &inputs.income_table,
                &matching,
            );
            write_json(&json!({ "statistics": statistics, "results": results }))
        }
    }
}

fn load_inputs(args: &InputArgs) -> Result<LoadedInputs, AppError> {
    let profile: ApplicantProfile = read_json(&args.profile)?;
    let announcements: Vec<Announcement> = read_json(&args.announcements)?;
    let income_table = match &args.income_table {
        Some(path) => load_income_table(path)?,
        None => NationalIncomeTable::standard_2024(),
    };
    let as_of = args.as_of.unwrap_or_else(|| Local::now().date_naive());

    info!(
        announcements = announcements.len(),
        income_rows = income_table.len(),
        %as_of,
        "inputs loaded"
    );

    Ok(LoadedInputs {
        profile,
        announcements,
        income_table,
        as_of,
    })
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, AppError> {
    let reader = BufReader::new(File::open(path)?);
    Ok(serde_json::from_reader(reader)?)
}

fn write_json<T: Serialize>(value: &T) -> Result<(), AppError> {
    let stdout = io::stdout();
    let mut handle = stdout.lock();
    serde_json::to_writer_pretty(&mut handle, value)?;
    writeln!(handle)?;
    Ok(())
}

fn parse_date(raw: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|err| format!("failed to parse '{raw}' as YYYY-MM-DD ({err})"))
}
