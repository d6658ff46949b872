//! Open/closed resolution in a vendor's own civil time.
//!
//! Every operation converts the evaluation instant into the vendor's timezone
//! once and then works purely with civil dates and wall-clock times. A rule of
//! `11:00-14:00` therefore means 11:00 to 14:00 local on every date, including
//! those either side of a daylight-saving transition.
//!
//! Midnight-crossing intervals belong to the day they start on. When a day is
//! evaluated, the previous day's crossing intervals are consulted for their
//! early-morning tail, and the current day's crossing intervals only count
//! from their start time onwards.
//!
//! # Examples
//! ```
//! use chrono::{TimeZone, Utc};
//! use kerbside_core::{VendorSchedule, WeeklyHourRule, compute_open_status};
//!
//! # fn main() -> Result<(), kerbside_core::AvailabilityError> {
//! let schedule = VendorSchedule::new(vec![WeeklyHourRule::open(0, "11:00", "15:00")], Vec::new());
//! // Monday 2024-01-08 13:00 in Chicago (UTC-6).
//! let at = Utc.with_ymd_and_hms(2024, 1, 8, 19, 0, 0).single().expect("valid instant");
//! let status = compute_open_status("America/Chicago", &schedule, at)?;
//! assert!(status.is_open());
//! assert_eq!(status.label(), "Open · Closes 3:00 PM");
//! # Ok(())
//! # }
//! ```

use chrono::{Datelike, DateTime, Days, NaiveDate, NaiveDateTime, Utc, Weekday};
use chrono_tz::Tz;
use log::debug;

use crate::{DayIntervals, TimeInterval, VendorSchedule, WallClock};

mod display;
mod error;
mod status;

pub use display::{DayScheduleDisplay, IntervalDisplay, weekly_schedule_display};
pub use error::AvailabilityError;
pub use status::{NextOpenDay, OpenStatus};

/// Number of days after today scanned for the next opening.
pub const LOOKAHEAD_DAYS: u64 = 7;

/// Resolve an IANA timezone identifier such as `America/Chicago`.
///
/// # Errors
/// Returns [`AvailabilityError::UnknownTimezone`] when the identifier is not
/// in the timezone database.
pub fn resolve_timezone(name: &str) -> Result<Tz, AvailabilityError> {
    name.parse::<Tz>()
        .map_err(|_| AvailabilityError::UnknownTimezone {
            name: name.to_owned(),
        })
}

/// Civil date and time in `timezone` at the instant `at`.
///
/// # Errors
/// Returns [`AvailabilityError::UnknownTimezone`] for an unknown identifier.
pub fn local_datetime(
    timezone: &str,
    at: DateTime<Utc>,
) -> Result<NaiveDateTime, AvailabilityError> {
    let tz = resolve_timezone(timezone)?;
    Ok(at.with_timezone(&tz).naive_local())
}

/// Resolve whether `date` is closed all day and, if not, its open intervals.
///
/// # Errors
/// Returns [`AvailabilityError::InvalidTimeFormat`] for malformed stored times.
pub fn resolve_day_intervals(
    schedule: &VendorSchedule,
    date: NaiveDate,
) -> Result<DayIntervals, AvailabilityError> {
    Ok(schedule.resolve_day(date)?)
}

/// Compute the vendor's open status at `at`.
///
/// When open, the status reports the end of the matching interval. When
/// closed, it reports the earliest later interval today or else the first
/// interval of the first open day within [`LOOKAHEAD_DAYS`]; beyond that the
/// vendor is reported closed with no next opening.
///
/// # Errors
/// Returns [`AvailabilityError::UnknownTimezone`] or
/// [`AvailabilityError::InvalidTimeFormat`]; no default status is guessed.
pub fn compute_open_status(
    timezone: &str,
    schedule: &VendorSchedule,
    at: DateTime<Utc>,
) -> Result<OpenStatus, AvailabilityError> {
    let local = local_datetime(timezone, at)?;
    let today = local.date();
    let now = WallClock::from_time(local.time());

    let today_intervals = resolve_day_intervals(schedule, today)?;
    if let Some(interval) = covering_interval(schedule, today, &today_intervals, now)? {
        return Ok(OpenStatus::open_until(interval.end));
    }

    if let Some(start) = today_intervals
        .usable()
        .map(|interval| interval.start)
        .filter(|start| *start > now)
        .min()
    {
        return Ok(OpenStatus::opening_at(start, NextOpenDay::Today));
    }

    for offset in 1..=LOOKAHEAD_DAYS {
        let Some(date) = today.checked_add_days(Days::new(offset)) else {
            break;
        };
        let day = resolve_day_intervals(schedule, date)?;
        if let Some(first) = day.usable().next() {
            let label = NextOpenDay::from_offset(offset, date.weekday());
            return Ok(OpenStatus::opening_at(first.start, label));
        }
    }

    debug!("no opening found within {LOOKAHEAD_DAYS} days of {today}");
    Ok(OpenStatus::closed())
}

/// Whether the vendor is open at the instant `at`.
///
/// # Errors
/// See [`compute_open_status`].
pub fn is_open_at(
    timezone: &str,
    schedule: &VendorSchedule,
    at: DateTime<Utc>,
) -> Result<bool, AvailabilityError> {
    compute_open_status(timezone, schedule, at).map(|status| status.is_open())
}

/// Whether the vendor is open on the next `day` (today or later, within a
/// week of `at` in the vendor's timezone) at wall-clock `time`.
///
/// The caller decides whose civil time `time` represents; it is compared
/// directly against the vendor's schedule.
///
/// # Errors
/// See [`compute_open_status`].
pub fn is_open_on_day_at_time(
    timezone: &str,
    schedule: &VendorSchedule,
    day: Weekday,
    time: WallClock,
    at: DateTime<Utc>,
) -> Result<bool, AvailabilityError> {
    let today = local_datetime(timezone, at)?.date();
    let Some(target) = today
        .iter_days()
        .take(7)
        .find(|date| date.weekday() == day)
    else {
        return Ok(false);
    };
    let intervals = resolve_day_intervals(schedule, target)?;
    Ok(covering_interval(schedule, target, &intervals, time)?.is_some())
}

/// Find the interval covering `time` on `date`, including the tail of a
/// midnight-crossing interval that started the previous day.
fn covering_interval(
    schedule: &VendorSchedule,
    date: NaiveDate,
    intervals: &DayIntervals,
    time: WallClock,
) -> Result<Option<TimeInterval>, AvailabilityError> {
    if let Some(interval) = intervals
        .usable()
        .find(|interval| interval.contains_on_start_day(time))
    {
        return Ok(Some(*interval));
    }

    let Some(previous) = date.pred_opt() else {
        return Ok(None);
    };
    let previous_intervals = resolve_day_intervals(schedule, previous)?;
    Ok(previous_intervals
        .usable()
        .find(|interval| interval.contains_carry_over(time))
        .copied())
}

#[cfg(test)]
mod tests;
