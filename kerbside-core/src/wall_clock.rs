//! Wall-clock times and the open intervals built from them.
//!
//! A [`WallClock`] is a minute-precision time of day with no date or timezone
//! attached. It is interpreted against whatever civil day it is evaluated on,
//! which keeps schedules stable across daylight-saving transitions.
//!
//! # Examples
//! ```
//! use kerbside_core::{TimeInterval, WallClock};
//!
//! # fn main() -> Result<(), kerbside_core::WallClockError> {
//! let late_shift = TimeInterval::new(WallClock::parse("22:00")?, WallClock::parse("02:00")?);
//! assert!(late_shift.crosses_midnight());
//! assert!(late_shift.contains(WallClock::parse("01:30")?));
//! assert!(!late_shift.contains(WallClock::parse("12:00")?));
//! # Ok(())
//! # }
//! ```

use std::fmt;
use std::str::FromStr;

use chrono::{NaiveTime, Timelike};
use thiserror::Error;

/// Errors raised while parsing an `HH:MM` wall-clock string.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WallClockError {
    /// The value was not two zero-padded integers separated by a colon.
    #[error("invalid time format '{value}': expected HH:MM")]
    InvalidFormat {
        /// Offending input.
        value: String,
    },
    /// The hour or minute was outside the 24-hour clock.
    #[error("time '{value}' is out of range: hour must be 00-23 and minute 00-59")]
    InvalidRange {
        /// Offending input.
        value: String,
    },
    /// An open interval was stored without its start or end time.
    #[error("open interval is missing its {bound} time")]
    MissingBound {
        /// `"start"` or `"end"`.
        bound: &'static str,
    },
}

/// A time of day with minute precision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "String", into = "String")
)]
pub struct WallClock(NaiveTime);

impl WallClock {
    /// Midnight at the start of a civil day.
    pub const MIDNIGHT: Self = Self(NaiveTime::MIN);

    /// Construct a wall-clock time from an hour and minute.
    ///
    /// # Errors
    /// Returns [`WallClockError::InvalidRange`] when `hour > 23` or
    /// `minute > 59`.
    pub fn new(hour: u32, minute: u32) -> Result<Self, WallClockError> {
        NaiveTime::from_hms_opt(hour, minute, 0)
            .map(Self)
            .ok_or_else(|| WallClockError::InvalidRange {
                value: format!("{hour:02}:{minute:02}"),
            })
    }

    /// Parse a strict, zero-padded `HH:MM` string.
    ///
    /// # Errors
    /// Returns [`WallClockError::InvalidFormat`] when the shape is wrong and
    /// [`WallClockError::InvalidRange`] when either component is out of bounds.
    ///
    /// # Examples
    /// ```
    /// use kerbside_core::{WallClock, WallClockError};
    ///
    /// assert!(WallClock::parse("09:30").is_ok());
    /// assert!(matches!(WallClock::parse("9:30"), Err(WallClockError::InvalidFormat { .. })));
    /// assert!(matches!(WallClock::parse("24:00"), Err(WallClockError::InvalidRange { .. })));
    /// ```
    pub fn parse(value: &str) -> Result<Self, WallClockError> {
        let invalid_format = || WallClockError::InvalidFormat {
            value: value.to_owned(),
        };
        let (hour_text, minute_text) = value.split_once(':').ok_or_else(invalid_format)?;
        if !is_two_digits(hour_text) || !is_two_digits(minute_text) {
            return Err(invalid_format());
        }
        let hour: u32 = hour_text.parse().map_err(|_| invalid_format())?;
        let minute: u32 = minute_text.parse().map_err(|_| invalid_format())?;
        Self::new(hour, minute).map_err(|_| WallClockError::InvalidRange {
            value: value.to_owned(),
        })
    }

    /// Truncate a civil time to minute precision.
    #[must_use]
    pub fn from_time(time: NaiveTime) -> Self {
        Self(NaiveTime::from_hms_opt(time.hour(), time.minute(), 0).unwrap_or(time))
    }

    /// Hour component in `0..=23`.
    #[must_use]
    pub fn hour(self) -> u32 {
        self.0.hour()
    }

    /// Minute component in `0..=59`.
    #[must_use]
    pub fn minute(self) -> u32 {
        self.0.minute()
    }

    /// Whole minutes elapsed since midnight.
    #[must_use]
    pub fn minutes_since_midnight(self) -> u32 {
        self.hour() * 60 + self.minute()
    }

    /// Render as a 12-hour clock string such as `3:00 PM`.
    ///
    /// # Examples
    /// ```
    /// use kerbside_core::WallClock;
    ///
    /// # fn main() -> Result<(), kerbside_core::WallClockError> {
    /// assert_eq!(WallClock::parse("15:00")?.format_12h(), "3:00 PM");
    /// assert_eq!(WallClock::parse("00:05")?.format_12h(), "12:05 AM");
    /// # Ok(())
    /// # }
    /// ```
    #[must_use]
    pub fn format_12h(self) -> String {
        self.0.format("%-I:%M %p").to_string()
    }

    /// The underlying civil time.
    #[must_use]
    pub const fn as_time(self) -> NaiveTime {
        self.0
    }
}

fn is_two_digits(text: &str) -> bool {
    text.len() == 2 && text.bytes().all(|byte| byte.is_ascii_digit())
}

impl fmt::Display for WallClock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour(), self.minute())
    }
}

impl FromStr for WallClock {
    type Err = WallClockError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for WallClock {
    type Error = WallClockError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<WallClock> for String {
    fn from(value: WallClock) -> Self {
        value.to_string()
    }
}

/// Parse an `HH:MM` string into a [`WallClock`].
///
/// # Errors
/// See [`WallClock::parse`].
pub fn parse_wall_clock(value: &str) -> Result<WallClock, WallClockError> {
    WallClock::parse(value)
}

/// Minutes since midnight for an `HH:MM` string.
///
/// # Errors
/// See [`WallClock::parse`].
pub fn minutes_since_midnight(value: &str) -> Result<u32, WallClockError> {
    WallClock::parse(value).map(WallClock::minutes_since_midnight)
}

/// Whether `instant` falls inside the half-open interval `[start, end)`.
///
/// When `start > end` the interval crosses midnight and membership is
/// `instant >= start || instant < end`.
#[must_use]
pub fn contains_instant(start: WallClock, end: WallClock, instant: WallClock) -> bool {
    if start <= end {
        start <= instant && instant < end
    } else {
        instant >= start || instant < end
    }
}

/// A single open interval on a civil day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TimeInterval {
    /// Opening time.
    pub start: WallClock,
    /// Closing time; earlier than `start` when the interval crosses midnight.
    pub end: WallClock,
}

impl TimeInterval {
    /// Construct an interval from its endpoints.
    #[must_use]
    pub const fn new(start: WallClock, end: WallClock) -> Self {
        Self { start, end }
    }

    /// Parse both endpoints from `HH:MM` strings.
    ///
    /// # Errors
    /// Propagates the first [`WallClockError`] encountered.
    pub fn parse(start: &str, end: &str) -> Result<Self, WallClockError> {
        Ok(Self::new(WallClock::parse(start)?, WallClock::parse(end)?))
    }

    /// Whether the interval runs past midnight into the next civil day.
    #[must_use]
    pub fn crosses_midnight(&self) -> bool {
        self.start > self.end
    }

    /// Membership test over both civil days the interval may touch.
    #[must_use]
    pub fn contains(&self, instant: WallClock) -> bool {
        contains_instant(self.start, self.end, instant)
    }

    /// Membership restricted to the civil day the interval starts on.
    ///
    /// For a midnight-crossing interval this is only the evening part.
    #[must_use]
    pub fn contains_on_start_day(&self, instant: WallClock) -> bool {
        if self.crosses_midnight() {
            instant >= self.start
        } else {
            self.contains(instant)
        }
    }

    /// Membership in the early-morning tail that spills into the next day.
    #[must_use]
    pub fn contains_carry_over(&self, instant: WallClock) -> bool {
        self.crosses_midnight() && instant < self.end
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn clock(value: &str) -> WallClock {
        WallClock::parse(value).expect("valid wall clock")
    }

    #[rstest]
    #[case("00:00", 0)]
    #[case("11:30", 690)]
    #[case("23:59", 1439)]
    fn counts_minutes_since_midnight(#[case] value: &str, #[case] expected: u32) {
        assert_eq!(minutes_since_midnight(value), Ok(expected));
    }

    #[rstest]
    #[case("9:00")]
    #[case("09:0")]
    #[case("0900")]
    #[case("09-00")]
    #[case("ab:cd")]
    #[case("09:00:00")]
    #[case("")]
    #[case("+9:00")]
    fn rejects_malformed_strings(#[case] value: &str) {
        assert_eq!(
            parse_wall_clock(value),
            Err(WallClockError::InvalidFormat {
                value: value.to_owned()
            })
        );
    }

    #[rstest]
    #[case("24:00")]
    #[case("12:60")]
    #[case("99:99")]
    fn rejects_out_of_range_components(#[case] value: &str) {
        assert_eq!(
            parse_wall_clock(value),
            Err(WallClockError::InvalidRange {
                value: value.to_owned()
            })
        );
    }

    #[rstest]
    #[case("00:00", "12:00 AM")]
    #[case("09:05", "9:05 AM")]
    #[case("12:00", "12:00 PM")]
    #[case("21:30", "9:30 PM")]
    fn formats_twelve_hour_clock(#[case] value: &str, #[case] expected: &str) {
        assert_eq!(clock(value).format_12h(), expected);
    }

    #[rstest]
    fn display_round_trips_through_parse() {
        assert_eq!(clock("07:45").to_string(), "07:45");
    }

    #[rstest]
    fn truncates_seconds_from_civil_time() {
        let time = NaiveTime::from_hms_opt(13, 14, 59).expect("valid time");
        assert_eq!(WallClock::from_time(time), clock("13:14"));
    }

    #[rstest]
    #[case("11:00", true)]
    #[case("13:59", true)]
    #[case("14:00", false)]
    #[case("10:59", false)]
    fn same_day_interval_is_half_open(#[case] instant: &str, #[case] expected: bool) {
        assert_eq!(
            contains_instant(clock("11:00"), clock("14:00"), clock(instant)),
            expected
        );
    }

    #[rstest]
    #[case("22:00", true)]
    #[case("23:59", true)]
    #[case("00:00", true)]
    #[case("01:59", true)]
    #[case("02:00", false)]
    #[case("12:00", false)]
    fn midnight_crossing_interval_spans_two_days(#[case] instant: &str, #[case] expected: bool) {
        assert_eq!(
            contains_instant(clock("22:00"), clock("02:00"), clock(instant)),
            expected
        );
    }

    #[rstest]
    fn crossing_interval_splits_into_evening_and_carry_over() {
        let interval = TimeInterval::new(clock("22:00"), clock("02:00"));
        assert!(interval.contains_on_start_day(clock("23:00")));
        assert!(!interval.contains_on_start_day(clock("01:00")));
        assert!(interval.contains_carry_over(clock("01:00")));
        assert!(!interval.contains_carry_over(clock("23:00")));
    }

    #[rstest]
    fn same_day_interval_has_no_carry_over() {
        let interval = TimeInterval::new(clock("11:00"), clock("14:00"));
        assert!(!interval.crosses_midnight());
        assert!(!interval.contains_carry_over(clock("01:00")));
        assert!(interval.contains_on_start_day(clock("12:00")));
    }

    #[rstest]
    fn empty_interval_contains_nothing() {
        let interval = TimeInterval::new(clock("10:00"), clock("10:00"));
        assert!(!interval.contains(clock("10:00")));
    }
}
