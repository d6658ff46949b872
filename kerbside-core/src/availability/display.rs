use chrono::Weekday;

use crate::{TimeInterval, VendorSchedule, WEEK, WallClock, weekday_index, weekday_name};

use super::AvailabilityError;

/// An interval rendered for display in 24- and 12-hour form.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct IntervalDisplay {
    /// Opening time, `HH:MM`.
    pub start: WallClock,
    /// Closing time, `HH:MM`.
    pub end: WallClock,
    /// Opening time, e.g. `11:00 AM`.
    pub start_12h: String,
    /// Closing time, e.g. `3:00 PM`.
    pub end_12h: String,
}

impl From<TimeInterval> for IntervalDisplay {
    fn from(interval: TimeInterval) -> Self {
        Self {
            start: interval.start,
            end: interval.end,
            start_12h: interval.start.format_12h(),
            end_12h: interval.end.format_12h(),
        }
    }
}

/// The recurring schedule for one day of the week.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct DayScheduleDisplay {
    /// English day name.
    pub day: &'static str,
    /// Day index, `0 = Monday`.
    pub day_of_week: u8,
    /// `true` when the day has no recurring opening.
    pub closed: bool,
    /// Intervals ordered by `interval_index`.
    pub intervals: Vec<IntervalDisplay>,
}

impl DayScheduleDisplay {
    fn closed(day: Weekday) -> Self {
        Self {
            day: weekday_name(day),
            day_of_week: weekday_index(day),
            closed: true,
            intervals: Vec::new(),
        }
    }
}

/// Render the recurring weekly schedule, Monday through Sunday.
///
/// Exceptions are not applied; this reflects the weekly rules only. A day is
/// shown closed when it has no rule with both times, or when any of its rules
/// is a closure.
///
/// Open rules that share a day with a closure are hidden rather than listed,
/// so the display never shows hours that [`resolve_day_intervals`] would not
/// honour.
///
/// [`resolve_day_intervals`]: crate::resolve_day_intervals
///
/// # Errors
/// Returns [`AvailabilityError::InvalidTimeFormat`] for malformed stored times.
pub fn weekly_schedule_display(
    schedule: &VendorSchedule,
) -> Result<Vec<DayScheduleDisplay>, AvailabilityError> {
    WEEK.iter()
        .map(|&day| display_day(schedule, day))
        .collect()
}

fn display_day(
    schedule: &VendorSchedule,
    day: Weekday,
) -> Result<DayScheduleDisplay, AvailabilityError> {
    let mut rules: Vec<_> = schedule.rules_for(day).collect();
    if rules.iter().any(|rule| rule.closed) {
        return Ok(DayScheduleDisplay::closed(day));
    }
    rules.sort_by_key(|rule| rule.interval_index);

    let mut intervals = Vec::with_capacity(rules.len());
    for rule in rules {
        if let (Some(start), Some(end)) = (&rule.start, &rule.end) {
            intervals.push(IntervalDisplay::from(TimeInterval::parse(start, end)?));
        }
    }
    if intervals.is_empty() {
        return Ok(DayScheduleDisplay::closed(day));
    }
    Ok(DayScheduleDisplay {
        day: weekday_name(day),
        day_of_week: weekday_index(day),
        closed: false,
        intervals,
    })
}
