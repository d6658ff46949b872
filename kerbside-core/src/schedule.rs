//! Weekly opening rules, date-specific exceptions and per-day resolution.
//!
//! Rules arrive from storage as plain records with `HH:MM` strings. They are
//! parsed lazily when a day is resolved so malformed rows surface as errors at
//! the point of use rather than being coerced to "closed".

use chrono::{Datelike, NaiveDate, Weekday};
use log::warn;
use thiserror::Error;

use crate::{TimeInterval, WallClock, WallClockError};

/// Days of the week in display order, indexed `0 = Monday`.
pub const WEEK: [Weekday; 7] = [
    Weekday::Mon,
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
    Weekday::Fri,
    Weekday::Sat,
    Weekday::Sun,
];

/// Map a `0 = Monday` day index onto a [`Weekday`].
///
/// # Examples
/// ```
/// use chrono::Weekday;
/// use kerbside_core::weekday_from_index;
///
/// assert_eq!(weekday_from_index(4), Some(Weekday::Fri));
/// assert_eq!(weekday_from_index(7), None);
/// ```
#[must_use]
pub fn weekday_from_index(index: u8) -> Option<Weekday> {
    WEEK.get(usize::from(index)).copied()
}

/// Index of a weekday with `0 = Monday`.
#[must_use]
pub const fn weekday_index(day: Weekday) -> u8 {
    match day {
        Weekday::Mon => 0,
        Weekday::Tue => 1,
        Weekday::Wed => 2,
        Weekday::Thu => 3,
        Weekday::Fri => 4,
        Weekday::Sat => 5,
        Weekday::Sun => 6,
    }
}

/// English name of a weekday, e.g. `Friday`.
#[must_use]
pub const fn weekday_name(day: Weekday) -> &'static str {
    match day {
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
        Weekday::Sun => "Sunday",
    }
}

/// One recurring interval (or closure) on a day of the week.
///
/// Several rules may share a day to express split hours; `interval_index`
/// orders them.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WeeklyHourRule {
    /// Day of the week, `0 = Monday` through `6 = Sunday`.
    pub day_of_week: u8,
    /// When set the whole day is closed regardless of sibling rules.
    #[cfg_attr(feature = "serde", serde(default))]
    pub closed: bool,
    /// Opening time as `HH:MM`.
    #[cfg_attr(feature = "serde", serde(default))]
    pub start: Option<String>,
    /// Closing time as `HH:MM`.
    #[cfg_attr(feature = "serde", serde(default))]
    pub end: Option<String>,
    /// Ordering among rules sharing a day.
    #[cfg_attr(feature = "serde", serde(default))]
    pub interval_index: u32,
}

/// Errors raised by [`WeeklyHourRule::validate`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WeeklyHourRuleError {
    /// The day index was outside `0..=6`.
    #[error("day_of_week must be 0 (Mon) through 6 (Sun), got {day}")]
    DayOutOfRange {
        /// Offending day index.
        day: u8,
    },
    /// A start or end time failed to parse.
    #[error(transparent)]
    Time(#[from] WallClockError),
}

impl WeeklyHourRule {
    /// An open interval on `day_of_week`.
    #[must_use]
    pub fn open(day_of_week: u8, start: &str, end: &str) -> Self {
        Self {
            day_of_week,
            closed: false,
            start: Some(start.to_owned()),
            end: Some(end.to_owned()),
            interval_index: 0,
        }
    }

    /// A closure covering the whole of `day_of_week`.
    #[must_use]
    pub fn closed(day_of_week: u8) -> Self {
        Self {
            day_of_week,
            closed: true,
            ..Self::default()
        }
    }

    /// Set the ordering index, returning `self` for chaining.
    #[must_use]
    pub const fn with_index(mut self, interval_index: u32) -> Self {
        self.interval_index = interval_index;
        self
    }

    /// Check the rule before it is persisted.
    ///
    /// # Errors
    /// Returns [`WeeklyHourRuleError::DayOutOfRange`] for a bad day index
    /// and [`WeeklyHourRuleError::Time`] for a malformed time string.
    pub fn validate(&self) -> Result<(), WeeklyHourRuleError> {
        if weekday_from_index(self.day_of_week).is_none() {
            return Err(WeeklyHourRuleError::DayOutOfRange {
                day: self.day_of_week,
            });
        }
        for value in [&self.start, &self.end].into_iter().flatten() {
            WallClock::parse(value)?;
        }
        Ok(())
    }

    fn interval(&self) -> Result<Option<TimeInterval>, WallClockError> {
        match (&self.start, &self.end) {
            (Some(start), Some(end)) => TimeInterval::parse(start, end).map(Some),
            _ => {
                warn!(
                    "dropping weekly rule for day {} (index {}) without both start and end",
                    self.day_of_week, self.interval_index
                );
                Ok(None)
            }
        }
    }
}

/// A date-specific override of the weekly schedule.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ExceptionRule {
    /// Civil date the override applies to, in the vendor's timezone.
    pub date: NaiveDate,
    /// When set the vendor is closed all day.
    #[cfg_attr(feature = "serde", serde(default))]
    pub closed: bool,
    /// Opening time as `HH:MM`.
    #[cfg_attr(feature = "serde", serde(default))]
    pub start: Option<String>,
    /// Closing time as `HH:MM`.
    #[cfg_attr(feature = "serde", serde(default))]
    pub end: Option<String>,
    /// Free-text note such as "Christmas closure".
    #[cfg_attr(feature = "serde", serde(default))]
    pub note: Option<String>,
}

impl ExceptionRule {
    /// Close for the whole of `date`.
    #[must_use]
    pub const fn closed(date: NaiveDate) -> Self {
        Self {
            date,
            closed: true,
            start: None,
            end: None,
            note: None,
        }
    }

    /// Open only between `start` and `end` on `date`.
    #[must_use]
    pub fn open(date: NaiveDate, start: &str, end: &str) -> Self {
        Self {
            date,
            closed: false,
            start: Some(start.to_owned()),
            end: Some(end.to_owned()),
            note: None,
        }
    }

    /// Attach a note, returning `self` for chaining.
    #[must_use]
    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.note = Some(note.into());
        self
    }
}

/// The resolved state of a single civil day.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DayIntervals {
    /// `true` when no part of the day is open.
    pub closed_all_day: bool,
    /// Open intervals in rule order; empty when closed.
    pub intervals: Vec<TimeInterval>,
}

impl DayIntervals {
    /// A day with no opening at all.
    #[must_use]
    pub const fn closed() -> Self {
        Self {
            closed_all_day: true,
            intervals: Vec::new(),
        }
    }

    /// A day open during `intervals`.
    #[must_use]
    pub const fn open(intervals: Vec<TimeInterval>) -> Self {
        Self {
            closed_all_day: false,
            intervals,
        }
    }

    /// Intervals that can be consulted, i.e. none when closed all day.
    pub fn usable(&self) -> impl Iterator<Item = &TimeInterval> {
        self.intervals
            .iter()
            .filter(|_| !self.closed_all_day)
    }
}

/// Weekly rules and exceptions for a single vendor.
///
/// The caller scopes the rows to one vendor, so resolution never filters by
/// vendor identity. Exceptions are unique per date.
///
/// # Examples
/// ```
/// use chrono::NaiveDate;
/// use kerbside_core::{ExceptionRule, VendorSchedule, WeeklyHourRule};
///
/// # fn main() -> Result<(), kerbside_core::WallClockError> {
/// let monday = NaiveDate::from_ymd_opt(2024, 1, 8).expect("valid date");
/// let schedule = VendorSchedule::new(
///     vec![WeeklyHourRule::open(0, "11:00", "15:00")],
///     vec![ExceptionRule::closed(monday)],
/// );
/// assert!(schedule.resolve_day(monday)?.closed_all_day);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(from = "ScheduleRows")
)]
pub struct VendorSchedule {
    weekly: Vec<WeeklyHourRule>,
    exceptions: Vec<ExceptionRule>,
}

/// Stored rows as read from a snapshot, before exceptions are deduplicated.
#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct ScheduleRows {
    #[serde(default)]
    weekly: Vec<WeeklyHourRule>,
    #[serde(default)]
    exceptions: Vec<ExceptionRule>,
}

#[cfg(feature = "serde")]
impl From<ScheduleRows> for VendorSchedule {
    fn from(rows: ScheduleRows) -> Self {
        Self::new(rows.weekly, rows.exceptions)
    }
}

impl VendorSchedule {
    /// Build a schedule; a later exception replaces an earlier one for the
    /// same date.
    #[must_use]
    pub fn new(weekly: Vec<WeeklyHourRule>, exceptions: Vec<ExceptionRule>) -> Self {
        let mut schedule = Self {
            weekly,
            exceptions: Vec::with_capacity(exceptions.len()),
        };
        for exception in exceptions {
            schedule.upsert_exception(exception);
        }
        schedule
    }

    /// Recurring weekly rules.
    #[must_use]
    pub fn weekly(&self) -> &[WeeklyHourRule] {
        &self.weekly
    }

    /// Date-specific exceptions.
    #[must_use]
    pub fn exceptions(&self) -> &[ExceptionRule] {
        &self.exceptions
    }

    /// Replace the weekly rules wholesale.
    pub fn replace_weekly(&mut self, weekly: Vec<WeeklyHourRule>) {
        self.weekly = weekly;
    }

    /// Insert an exception, replacing any existing one for the same date.
    pub fn upsert_exception(&mut self, exception: ExceptionRule) {
        if let Some(existing) = self
            .exceptions
            .iter_mut()
            .find(|candidate| candidate.date == exception.date)
        {
            *existing = exception;
        } else {
            self.exceptions.push(exception);
        }
    }

    /// Remove the exception for `date`, returning it if present.
    pub fn remove_exception(&mut self, date: NaiveDate) -> Option<ExceptionRule> {
        let position = self
            .exceptions
            .iter()
            .position(|exception| exception.date == date)?;
        Some(self.exceptions.remove(position))
    }

    /// The exception registered for `date`, if any.
    #[must_use]
    pub fn exception_for(&self, date: NaiveDate) -> Option<&ExceptionRule> {
        self.exceptions
            .iter()
            .find(|exception| exception.date == date)
    }

    /// Weekly rules for `day` in the order they were supplied.
    pub fn rules_for(&self, day: Weekday) -> impl Iterator<Item = &WeeklyHourRule> {
        let index = weekday_index(day);
        self.weekly
            .iter()
            .filter(move |rule| rule.day_of_week == index)
    }

    /// Resolve the open intervals for a civil date.
    ///
    /// An exception for the date wins outright. Otherwise the weekly rules for
    /// that weekday apply: none means closed, any closed rule closes the whole
    /// day, and the remaining rules are ordered by `interval_index` with
    /// incomplete rules dropped.
    ///
    /// # Errors
    /// Returns [`WallClockError`] when a stored time string is malformed or
    /// an open exception lacks a start or end time.
    pub fn resolve_day(&self, date: NaiveDate) -> Result<DayIntervals, WallClockError> {
        if let Some(exception) = self.exception_for(date) {
            return resolve_exception(exception);
        }

        let mut rules: Vec<&WeeklyHourRule> = self.rules_for(date.weekday()).collect();
        if rules.is_empty() || rules.iter().any(|rule| rule.closed) {
            return Ok(DayIntervals::closed());
        }
        rules.sort_by_key(|rule| rule.interval_index);

        let mut intervals = Vec::with_capacity(rules.len());
        for rule in rules {
            if let Some(interval) = rule.interval()? {
                intervals.push(interval);
            }
        }
        Ok(DayIntervals::open(intervals))
    }
}

fn resolve_exception(exception: &ExceptionRule) -> Result<DayIntervals, WallClockError> {
    if exception.closed {
        return Ok(DayIntervals::closed());
    }
    let start = exception
        .start
        .as_deref()
        .ok_or(WallClockError::MissingBound { bound: "start" })?;
    let end = exception
        .end
        .as_deref()
        .ok_or(WallClockError::MissingBound { bound: "end" })?;
    Ok(DayIntervals::open(vec![TimeInterval::parse(start, end)?]))
}
