//! `status` and `schedule` commands: per-vendor availability views.

use std::io::Write;

use camino::{Utf8Path, Utf8PathBuf};
use chrono::{Datelike, Weekday};
use clap::Parser;
use geo::Coord;
use kerbside_core::{
    Clock, DayScheduleDisplay, VendorCandidate, WallClock, is_open_on_day_at_time,
    local_datetime, vendor_detail, weekday_from_index, weekday_name, weekly_schedule_display,
};
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use serde::{Deserialize, Serialize};

use crate::snapshot::load_vendors;
use crate::{
    ARG_AT, ARG_LATITUDE, ARG_LONGITUDE, ARG_SLUG, ARG_SNAPSHOT, CliError, ENV_SCHEDULE_SLUG,
    ENV_SCHEDULE_SNAPSHOT, ENV_STATUS_SLUG, ENV_STATUS_SNAPSHOT, resolve_instant,
    resolve_origin, write_json,
};

/// CLI arguments for the `status` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(
    long_about = "Resolve whether a vendor is open at an instant, in the \
                 vendor's own timezone, and print its detail view including \
                 the weekly schedule.",
    about = "Show a vendor's open status"
)]
#[ortho_config(prefix = "KERBSIDE")]
pub(crate) struct StatusArgs {
    /// Slug of the vendor to inspect.
    #[arg(value_name = "slug")]
    #[serde(default)]
    pub(crate) slug: Option<String>,
    /// Path to the JSON vendor snapshot.
    #[arg(long = ARG_SNAPSHOT, value_name = "path")]
    #[serde(default)]
    pub(crate) snapshot: Option<Utf8PathBuf>,
    /// Evaluate at this RFC 3339 instant instead of now.
    #[arg(long = ARG_AT, value_name = "rfc3339")]
    #[serde(default)]
    pub(crate) at: Option<String>,
    /// Latitude used to report the vendor's distance.
    #[arg(long = ARG_LATITUDE, value_name = "degrees", allow_negative_numbers = true)]
    #[serde(default)]
    pub(crate) latitude: Option<f64>,
    /// Longitude used to report the vendor's distance.
    #[arg(long = ARG_LONGITUDE, value_name = "degrees", allow_negative_numbers = true)]
    #[serde(default)]
    pub(crate) longitude: Option<f64>,
}

impl StatusArgs {
    pub(crate) fn into_config(self) -> Result<StatusConfig, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        StatusConfig::try_from(merged)
    }
}

/// Resolved `status` command configuration.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct StatusConfig {
    pub(crate) slug: String,
    pub(crate) snapshot: Utf8PathBuf,
    pub(crate) at: Option<String>,
    pub(crate) origin: Option<Coord<f64>>,
}

impl TryFrom<StatusArgs> for StatusConfig {
    type Error = CliError;

    fn try_from(args: StatusArgs) -> Result<Self, Self::Error> {
        let slug = args.slug.ok_or(CliError::MissingArgument {
            field: ARG_SLUG,
            env: ENV_STATUS_SLUG,
        })?;
        let snapshot = args.snapshot.ok_or(CliError::MissingArgument {
            field: ARG_SNAPSHOT,
            env: ENV_STATUS_SNAPSHOT,
        })?;
        Ok(Self {
            slug,
            snapshot,
            at: args.at,
            origin: resolve_origin(args.latitude, args.longitude)?,
        })
    }
}

pub(crate) fn run_status(
    config: StatusConfig,
    clock: &dyn Clock,
    writer: &mut dyn Write,
) -> Result<(), CliError> {
    let at = resolve_instant(config.at.as_deref(), clock)?;
    let vendor = find_vendor(&config.snapshot, &config.slug)?;
    let detail = vendor_detail(&vendor, config.origin, at)?;
    log::info!("{}: {}", detail.summary.slug, detail.summary.open_status_label);
    write_json(writer, &detail)
}

/// CLI arguments for the `schedule` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(
    long_about = "Print a vendor's Monday-to-Sunday schedule. With --day or \
                 --time, also report whether the vendor is open at that day \
                 and time in its own timezone; a missing half is taken from \
                 the evaluation instant.",
    about = "Show a vendor's weekly schedule"
)]
#[ortho_config(prefix = "KERBSIDE")]
pub(crate) struct ScheduleArgs {
    /// Slug of the vendor to inspect.
    #[arg(value_name = "slug")]
    #[serde(default)]
    pub(crate) slug: Option<String>,
    /// Path to the JSON vendor snapshot.
    #[arg(long = ARG_SNAPSHOT, value_name = "path")]
    #[serde(default)]
    pub(crate) snapshot: Option<Utf8PathBuf>,
    /// Evaluate at this RFC 3339 instant instead of now.
    #[arg(long = ARG_AT, value_name = "rfc3339")]
    #[serde(default)]
    pub(crate) at: Option<String>,
    /// Day to check, `0 = Monday` through `6 = Sunday`.
    #[arg(long, value_name = "index")]
    #[serde(default)]
    pub(crate) day: Option<u8>,
    /// Wall-clock time to check, as `HH:MM`.
    #[arg(long, value_name = "HH:MM")]
    #[serde(default)]
    pub(crate) time: Option<String>,
}

impl ScheduleArgs {
    pub(crate) fn into_config(self) -> Result<ScheduleConfig, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        ScheduleConfig::try_from(merged)
    }
}

/// Resolved `schedule` command configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ScheduleConfig {
    pub(crate) slug: String,
    pub(crate) snapshot: Utf8PathBuf,
    pub(crate) at: Option<String>,
    pub(crate) day: Option<Weekday>,
    pub(crate) time: Option<WallClock>,
}

impl TryFrom<ScheduleArgs> for ScheduleConfig {
    type Error = CliError;

    fn try_from(args: ScheduleArgs) -> Result<Self, Self::Error> {
        let slug = args.slug.ok_or(CliError::MissingArgument {
            field: ARG_SLUG,
            env: ENV_SCHEDULE_SLUG,
        })?;
        let snapshot = args.snapshot.ok_or(CliError::MissingArgument {
            field: ARG_SNAPSHOT,
            env: ENV_SCHEDULE_SNAPSHOT,
        })?;
        let day = args
            .day
            .map(|day| weekday_from_index(day).ok_or(CliError::DayOutOfRange { day }))
            .transpose()?;
        let time = args.time.as_deref().map(WallClock::parse).transpose()?;
        Ok(Self {
            slug,
            snapshot,
            at: args.at,
            day,
            time,
        })
    }
}

#[derive(Debug, Serialize)]
struct ScheduleReport {
    slug: String,
    timezone: String,
    weekly_schedule: Vec<DayScheduleDisplay>,
    #[serde(skip_serializing_if = "Option::is_none")]
    check: Option<OpenCheck>,
}

#[derive(Debug, Serialize)]
struct OpenCheck {
    day: &'static str,
    time: WallClock,
    is_open: bool,
}

pub(crate) fn run_schedule(
    config: ScheduleConfig,
    clock: &dyn Clock,
    writer: &mut dyn Write,
) -> Result<(), CliError> {
    let vendor = find_vendor(&config.snapshot, &config.slug)?;
    let check = if config.day.is_some() || config.time.is_some() {
        let at = resolve_instant(config.at.as_deref(), clock)?;
        let local = local_datetime(&vendor.listing.timezone, at)?;
        let day = config.day.unwrap_or_else(|| local.weekday());
        let time = config
            .time
            .unwrap_or_else(|| WallClock::from_time(local.time()));
        let is_open =
            is_open_on_day_at_time(&vendor.listing.timezone, &vendor.schedule, day, time, at)?;
        Some(OpenCheck {
            day: weekday_name(day),
            time,
            is_open,
        })
    } else {
        None
    };

    let report = ScheduleReport {
        weekly_schedule: weekly_schedule_display(&vendor.schedule)?,
        slug: vendor.listing.slug,
        timezone: vendor.listing.timezone,
        check,
    };
    write_json(writer, &report)
}

fn find_vendor(snapshot: &Utf8Path, slug: &str) -> Result<VendorCandidate, CliError> {
    load_vendors(snapshot, ARG_SNAPSHOT)?
        .into_iter()
        .find(|vendor| vendor.listing.slug == slug)
        .ok_or_else(|| CliError::UnknownVendor {
            slug: slug.to_owned(),
        })
}
