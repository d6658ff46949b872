//! Command-line interface for evaluating Kerbside vendor snapshots offline.
//!
//! Every command reads a JSON snapshot of vendors (listing fields plus a
//! `schedule` object) and writes JSON to standard output. Options may come
//! from CLI flags, configuration files, or `KERBSIDE_CMDS_<COMMAND>_<FIELD>`
//! environment variables.
#![forbid(unsafe_code)]

use std::io::Write;

use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand};
use geo::Coord;
use kerbside_core::{Clock, SystemClock};
use serde::Serialize;

mod error;
mod listings;
mod ratings;
mod search;
mod snapshot;
mod status;

pub use error::CliError;

use listings::{FavoritesArgs, FeaturedArgs, run_favorites, run_featured};
use ratings::{RatingsArgs, run_ratings};
use search::{SearchArgs, run_search};
use status::{ScheduleArgs, StatusArgs, run_schedule, run_status};

pub(crate) const ARG_SNAPSHOT: &str = "snapshot";
pub(crate) const ARG_AT: &str = "at";
pub(crate) const ARG_SLUG: &str = "slug";
pub(crate) const ARG_LATITUDE: &str = "latitude";
pub(crate) const ARG_LONGITUDE: &str = "longitude";
pub(crate) const ARG_REVIEWS: &str = "reviews";

pub(crate) const ENV_STATUS_SNAPSHOT: &str = "KERBSIDE_CMDS_STATUS_SNAPSHOT";
pub(crate) const ENV_STATUS_SLUG: &str = "KERBSIDE_CMDS_STATUS_SLUG";
pub(crate) const ENV_SCHEDULE_SNAPSHOT: &str = "KERBSIDE_CMDS_SCHEDULE_SNAPSHOT";
pub(crate) const ENV_SCHEDULE_SLUG: &str = "KERBSIDE_CMDS_SCHEDULE_SLUG";
pub(crate) const ENV_SEARCH_SNAPSHOT: &str = "KERBSIDE_CMDS_SEARCH_SNAPSHOT";
pub(crate) const ENV_FEATURED_SNAPSHOT: &str = "KERBSIDE_CMDS_FEATURED_SNAPSHOT";
pub(crate) const ENV_FAVORITES_SNAPSHOT: &str = "KERBSIDE_CMDS_FAVORITES_SNAPSHOT";
pub(crate) const ENV_RATINGS_SNAPSHOT: &str = "KERBSIDE_CMDS_RATINGS_SNAPSHOT";
pub(crate) const ENV_RATINGS_REVIEWS: &str = "KERBSIDE_CMDS_RATINGS_REVIEWS";

/// Run the Kerbside CLI with the current process arguments and environment.
///
/// # Errors
/// Returns [`CliError`] when arguments, configuration, snapshot input or an
/// engine operation fail.
pub fn run() -> Result<(), CliError> {
    let cli = Cli::try_parse().map_err(CliError::ArgumentParsing)?;
    let mut stdout = std::io::stdout().lock();
    dispatch(cli.command, &SystemClock, &mut stdout)
}

#[derive(Debug, Parser)]
#[command(
    name = "kerbside",
    about = "Evaluate vendor availability and search against a JSON snapshot",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Show one vendor's open status and detail view.
    Status(StatusArgs),
    /// Show one vendor's weekly schedule, optionally checking a day and time.
    Schedule(ScheduleArgs),
    /// Filter, rank and page vendors.
    Search(SearchArgs),
    /// List featured vendors.
    Featured(FeaturedArgs),
    /// Summarise vendors in a caller-chosen order.
    Favorites(FavoritesArgs),
    /// Recompute cached ratings from a review snapshot.
    Ratings(RatingsArgs),
}

fn dispatch(command: Command, clock: &dyn Clock, writer: &mut dyn Write) -> Result<(), CliError> {
    match command {
        Command::Status(args) => run_status(args.into_config()?, clock, writer),
        Command::Schedule(args) => run_schedule(args.into_config()?, clock, writer),
        Command::Search(args) => run_search(args.into_config()?, clock, writer),
        Command::Featured(args) => run_featured(args.into_config()?, clock, writer),
        Command::Favorites(args) => run_favorites(args.into_config()?, clock, writer),
        Command::Ratings(args) => run_ratings(&args.into_config()?, writer),
    }
}

/// Parse `--at`, falling back to the clock.
pub(crate) fn resolve_instant(
    at: Option<&str>,
    clock: &dyn Clock,
) -> Result<DateTime<Utc>, CliError> {
    at.map_or_else(
        || Ok(clock.now()),
        |value| {
            DateTime::parse_from_rfc3339(value)
                .map(|instant| instant.with_timezone(&Utc))
                .map_err(|source| CliError::InvalidInstant {
                    value: value.to_owned(),
                    source,
                })
        },
    )
}

/// Pair `--latitude` and `--longitude` into an origin.
pub(crate) const fn resolve_origin(
    latitude: Option<f64>,
    longitude: Option<f64>,
) -> Result<Option<Coord<f64>>, CliError> {
    match (latitude, longitude) {
        (Some(y), Some(x)) => Ok(Some(Coord { x, y })),
        (None, None) => Ok(None),
        _ => Err(CliError::IncompleteOrigin),
    }
}

/// Write `value` as pretty JSON followed by a newline.
pub(crate) fn write_json<T: Serialize + ?Sized>(
    writer: &mut dyn Write,
    value: &T,
) -> Result<(), CliError> {
    let payload = serde_json::to_string_pretty(value).map_err(CliError::SerialiseOutput)?;
    writer
        .write_all(payload.as_bytes())
        .map_err(CliError::WriteOutput)?;
    writer.write_all(b"\n").map_err(CliError::WriteOutput)?;
    Ok(())
}

#[cfg(test)]
mod tests;
