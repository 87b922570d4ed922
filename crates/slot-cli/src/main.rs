//! `slotfinder` CLI — recommend common free meeting slots from calendar bundles.
//!
//! ## Usage
//!
//! ```sh
//! # Recommend 60-minute slots for the next 7 days (stdin → stdout)
//! cat bundle.json | slotfinder recommend
//!
//! # 30-minute meeting, one week from a given Monday, for group 42
//! slotfinder recommend -i bundle.json --duration 30 --start-date 2025-03-10 --group-id 42
//!
//! # Business hours 08-18 in Seoul, pretty-printed
//! slotfinder recommend -i bundle.json --start-hour 8 --end-hour 18 --timezone Asia/Seoul --pretty
//!
//! # Show the merged busy intervals the recommendation is based on
//! slotfinder busy -i bundle.json --start-date 2025-03-10
//! ```
//!
//! Every search flag can also be set through a `SLOTFINDER_*` environment
//! variable. Logs go to stderr; stdout carries only JSON.

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use slot_engine::{
    busy_set, recommend_meeting_times, EventBundle, MeetingRequest, RecommendationReport,
    SearchConfig,
};
use std::io::{self, Read};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "slotfinder",
    version,
    about = "Recommend meeting times when every participant is free"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Log filter (e.g. "debug", "slot_engine=trace"); defaults to RUST_LOG, then "warn"
    #[arg(long, global = true, env = "SLOTFINDER_LOG")]
    log_level: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Recommend up to nine diversified free slots
    Recommend {
        #[command(flatten)]
        files: FileArgs,
        #[command(flatten)]
        search: SearchArgs,
        /// Group the recommendation is for (echoed in the output)
        #[arg(long, env = "SLOTFINDER_GROUP_ID")]
        group_id: Option<i64>,
    },
    /// Print the merged busy intervals for the bundle
    Busy {
        #[command(flatten)]
        files: FileArgs,
        #[command(flatten)]
        search: SearchArgs,
    },
}

#[derive(Args)]
struct FileArgs {
    /// Input bundle JSON file (reads from stdin if omitted)
    #[arg(short, long)]
    input: Option<String>,
    /// Output file (writes to stdout if omitted)
    #[arg(short, long)]
    output: Option<String>,
    /// Pretty-print the JSON output
    #[arg(long)]
    pretty: bool,
}

#[derive(Args)]
struct SearchArgs {
    /// Meeting length in minutes [default: 60]
    #[arg(short, long, env = "SLOTFINDER_DURATION")]
    duration: Option<u32>,
    /// First day to search, YYYY-MM-DD [default: today]
    #[arg(long, env = "SLOTFINDER_START_DATE")]
    start_date: Option<String>,
    /// Number of days to search [default: 7]
    #[arg(long, env = "SLOTFINDER_DAYS")]
    days: Option<u32>,
    /// Business hours start [default: 9]
    #[arg(long, env = "SLOTFINDER_START_HOUR")]
    start_hour: Option<u32>,
    /// Business hours end, up to 24 [default: 22]
    #[arg(long, env = "SLOTFINDER_END_HOUR")]
    end_hour: Option<u32>,
    /// IANA timezone for business hours and naive timestamps [default: UTC]
    #[arg(long, env = "SLOTFINDER_TIMEZONE")]
    timezone: Option<String>,
}

impl SearchArgs {
    /// Layer the flags over the engine defaults.
    fn to_config(&self) -> SearchConfig {
        let defaults = SearchConfig::default();
        SearchConfig {
            duration_minutes: self.duration.unwrap_or(defaults.duration_minutes),
            search_days: self.days.unwrap_or(defaults.search_days),
            business_start_hour: self.start_hour.unwrap_or(defaults.business_start_hour),
            business_end_hour: self.end_hour.unwrap_or(defaults.business_end_hour),
            timezone: self.timezone.clone().unwrap_or(defaults.timezone),
        }
    }

    /// Validate the flags into a request; the search starts today unless
    /// `--start-date` is given.
    fn to_request(&self) -> Result<MeetingRequest> {
        let config = self.to_config();
        let today = config.today().context("Invalid request parameters")?;
        config
            .into_request(self.start_date.as_deref(), today)
            .context("Invalid request parameters")
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.log_level.as_deref());

    match cli.command {
        Commands::Recommend {
            files,
            search,
            group_id,
        } => {
            let request = search.to_request()?;
            let bundle = read_bundle(files.input.as_deref())?;

            let slots = recommend_meeting_times(&bundle, &request);
            info!(
                events = bundle.len(),
                recommended = slots.len(),
                ?group_id,
                "recommendation complete"
            );

            let report = RecommendationReport::new(slots, group_id);
            let json = if files.pretty {
                report.to_json_pretty()?
            } else {
                report.to_json()?
            };
            write_output(files.output.as_deref(), &json)?;
        }
        Commands::Busy { files, search } => {
            let request = search.to_request()?;
            let bundle = read_bundle(files.input.as_deref())?;

            let busy = busy_set(&bundle, &request);
            let json = if files.pretty {
                serde_json::to_string_pretty(&busy)?
            } else {
                serde_json::to_string(&busy)?
            };
            write_output(files.output.as_deref(), &json)?;
        }
    }

    Ok(())
}

fn init_tracing(level: Option<&str>) {
    let filter = match level {
        Some(level) => EnvFilter::new(level),
        None => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn read_bundle(path: Option<&str>) -> Result<EventBundle> {
    let json = read_input(path)?;
    EventBundle::from_json(&json).context("Could not read calendar bundle")
}

fn read_input(path: Option<&str>) -> Result<String> {
    match path {
        Some(path) => {
            std::fs::read_to_string(path).with_context(|| format!("Failed to read file: {}", path))
        }
        None => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read from stdin")?;
            Ok(buf)
        }
    }
}

fn write_output(path: Option<&str>, content: &str) -> Result<()> {
    match path {
        Some(path) => {
            std::fs::write(path, content)
                .with_context(|| format!("Failed to write file: {}", path))?;
        }
        None => {
            println!("{}", content);
        }
    }
    Ok(())
}
