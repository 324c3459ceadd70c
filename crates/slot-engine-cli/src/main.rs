//! `slots` CLI — compute bookable appointment slots from a JSON data file.
//!
//! ## Usage
//!
//! ```sh
//! # Slot grid for a service on a date
//! slots available --data studio.json --date 2026-03-16 --service consult
//!
//! # Restrict to one staff member, pin "now", and hide taken times
//! slots available --data studio.json --date 2026-03-16 --service consult \
//!   --staff alice --now 2026-03-16T08:00:00Z --only-available
//!
//! # Validate the business schedule
//! SLOTS_DATA=studio.json slots check
//!
//! # Print the default business schedule
//! slots default-schedule
//! ```
//!
//! Logs go to stderr. The filter comes from `--log-level`, then `RUST_LOG`,
//! then defaults to `warn`.

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand};
use std::process;
use tracing_subscriber::EnvFilter;

use slot_engine::{available_slots, BusinessSchedule, InMemorySource, SlotRequest};

#[derive(Parser)]
#[command(
    name = "slots",
    version,
    about = "Bookable appointment slot calculator"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Log filter directive (e.g. "debug", "slot_engine=trace")
    #[arg(long, global = true)]
    log_level: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Compute the slot grid for a service on a date
    Available {
        /// JSON data file with openingTimes, services, teamMembers and appointments
        #[arg(short, long, env = "SLOTS_DATA")]
        data: String,
        /// Civil date in the business timezone (YYYY-MM-DD)
        #[arg(long)]
        date: String,
        /// Service identifier
        #[arg(long)]
        service: String,
        /// Staff member identifier
        #[arg(long)]
        staff: Option<String>,
        /// Evaluate as of this RFC 3339 instant instead of the current time
        #[arg(long)]
        now: Option<String>,
        /// Leave unavailable slots out of the output
        #[arg(long)]
        only_available: bool,
    },
    /// Validate the business schedule in a data file
    Check {
        /// JSON data file
        #[arg(short, long, env = "SLOTS_DATA")]
        data: String,
    },
    /// Print the default business schedule as JSON
    DefaultSchedule,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.log_level.as_deref())?;

    match cli.command {
        Commands::Available {
            data,
            date,
            service,
            staff,
            now,
            only_available,
        } => {
            let source = load_source(&data)?;
            let now = parse_now(now.as_deref())?;
            let mut request = SlotRequest::new(&date, &service);
            if let Some(staff) = staff.as_deref() {
                request = request.with_staff(staff);
            }

            match available_slots(&source, &request, now) {
                Ok(mut response) => {
                    if only_available {
                        response.slots.retain(|s| s.available);
                    }
                    println!("{}", serde_json::to_string_pretty(&response)?);
                }
                Err(e) => {
                    let body = serde_json::json!({
                        "error": e.public_message(),
                        "status": e.status_code(),
                    });
                    println!("{}", serde_json::to_string_pretty(&body)?);
                    process::exit(1);
                }
            }
        }
        Commands::Check { data } => {
            let source = load_source(&data)?;
            source
                .business
                .validate()
                .context("Invalid business schedule")?;
            println!("ok");
        }
        Commands::DefaultSchedule => {
            let schedule = BusinessSchedule::default();
            println!("{}", serde_json::to_string_pretty(&schedule)?);
        }
    }

    Ok(())
}

fn init_logging(level: Option<&str>) -> Result<()> {
    let filter = match level {
        Some(directive) => EnvFilter::try_new(directive)
            .with_context(|| format!("Invalid log level: {}", directive))?,
        None => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
    Ok(())
}

fn load_source(path: &str) -> Result<InMemorySource> {
    let json =
        std::fs::read_to_string(path).with_context(|| format!("Failed to read file: {}", path))?;
    let source = InMemorySource::from_json(&json)
        .with_context(|| format!("Failed to parse data file: {}", path))?;
    tracing::debug!(
        path,
        services = source.services.len(),
        staff = source.staff.len(),
        bookings = source.bookings.len(),
        "loaded data file"
    );
    Ok(source)
}

fn parse_now(now: Option<&str>) -> Result<DateTime<Utc>> {
    match now {
        Some(s) => DateTime::parse_from_rfc3339(s)
            .map(|dt| dt.with_timezone(&Utc))
            .with_context(|| format!("Invalid --now instant: {}", s)),
        None => Ok(Utc::now()),
    }
}
