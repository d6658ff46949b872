//! Unit coverage for the availability resolver.

use chrono::{DateTime, NaiveDate, Utc, Weekday};
use rstest::{fixture, rstest};

use super::*;
use crate::test_support::local_instant;
use crate::{ExceptionRule, WallClockError, WeeklyHourRule};

const CHICAGO: &str = "America/Chicago";

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
}

fn chicago(d: NaiveDate, hour: u32, minute: u32) -> DateTime<Utc> {
    local_instant(CHICAGO, d, hour, minute).expect("representable local time")
}

fn clock(value: &str) -> WallClock {
    WallClock::parse(value).expect("valid wall clock")
}

/// 2024-01-08 is a Monday.
#[fixture]
fn monday() -> NaiveDate {
    date(2024, 1, 8)
}

#[fixture]
fn lunch_weekdays() -> VendorSchedule {
    VendorSchedule::new(
        vec![
            WeeklyHourRule::open(0, "11:00", "15:00"),
            WeeklyHourRule::open(1, "11:00", "15:00"),
        ],
        Vec::new(),
    )
}

#[rstest]
fn open_during_interval(monday: NaiveDate, lunch_weekdays: VendorSchedule) {
    let status =
        compute_open_status(CHICAGO, &lunch_weekdays, chicago(monday, 13, 0)).expect("status");
    assert!(status.is_open());
    assert_eq!(status.closes_at(), Some(clock("15:00")));
    assert_eq!(status.label(), "Open · Closes 3:00 PM");
    assert_eq!(status.opens_at(), None);
    assert_eq!(status.next_open_day(), None);
}

#[rstest]
fn closed_after_hours_reports_tomorrow(monday: NaiveDate, lunch_weekdays: VendorSchedule) {
    let status =
        compute_open_status(CHICAGO, &lunch_weekdays, chicago(monday, 16, 0)).expect("status");
    assert!(!status.is_open());
    assert_eq!(status.closes_at(), None);
    assert_eq!(status.opens_at(), Some(clock("11:00")));
    assert_eq!(status.next_open_day(), Some(NextOpenDay::Tomorrow));
    assert_eq!(status.label(), "Closed · Opens tomorrow 11:00 AM");
}

#[rstest]
fn closed_before_opening_reports_today(monday: NaiveDate, lunch_weekdays: VendorSchedule) {
    let status =
        compute_open_status(CHICAGO, &lunch_weekdays, chicago(monday, 9, 30)).expect("status");
    assert!(!status.is_open());
    assert_eq!(status.next_open_day(), Some(NextOpenDay::Today));
    assert_eq!(status.label(), "Closed · Opens 11:00 AM");
}

#[rstest]
fn split_hours_report_the_earliest_later_interval(monday: NaiveDate) {
    let schedule = VendorSchedule::new(
        vec![
            WeeklyHourRule::open(0, "17:00", "21:00").with_index(1),
            WeeklyHourRule::open(0, "11:00", "14:00").with_index(0),
        ],
        Vec::new(),
    );
    let status = compute_open_status(CHICAGO, &schedule, chicago(monday, 15, 0)).expect("status");
    assert_eq!(status.opens_at(), Some(clock("17:00")));
    assert_eq!(status.label(), "Closed · Opens 5:00 PM");
}

#[rstest]
fn later_in_week_reports_weekday_name(monday: NaiveDate) {
    let schedule = VendorSchedule::new(vec![WeeklyHourRule::open(4, "11:00", "20:00")], Vec::new());
    let status = compute_open_status(CHICAGO, &schedule, chicago(monday, 12, 0)).expect("status");
    assert_eq!(status.next_open_day(), Some(NextOpenDay::Weekday(Weekday::Fri)));
    assert_eq!(status.label(), "Closed · Opens Friday 11:00 AM");
}

#[rstest]
fn lookahead_includes_seventh_day(monday: NaiveDate) {
    let schedule = VendorSchedule::new(vec![WeeklyHourRule::open(0, "11:00", "15:00")], Vec::new());
    let status = compute_open_status(CHICAGO, &schedule, chicago(monday, 16, 0)).expect("status");
    assert_eq!(status.next_open_day(), Some(NextOpenDay::Weekday(Weekday::Mon)));
    assert_eq!(status.opens_at(), Some(clock("11:00")));
}

#[rstest]
fn lookahead_gives_up_beyond_horizon(monday: NaiveDate) {
    let far = monday
        .checked_add_days(Days::new(LOOKAHEAD_DAYS + 1))
        .expect("date in range");
    let schedule = VendorSchedule::new(
        vec![WeeklyHourRule::closed(0)],
        vec![ExceptionRule::open(far, "10:00", "12:00")],
    );
    let status = compute_open_status(CHICAGO, &schedule, chicago(monday, 16, 0)).expect("status");
    assert_eq!(status, OpenStatus::closed());
}

#[rstest]
fn empty_schedule_is_closed_without_next_opening(monday: NaiveDate) {
    let status = compute_open_status(CHICAGO, &VendorSchedule::default(), chicago(monday, 12, 0))
        .expect("status");
    assert!(!status.is_open());
    assert_eq!(status.label(), "Closed");
    assert_eq!(status.opens_at(), None);
    assert_eq!(status.closes_at(), None);
    assert_eq!(status.next_open_day(), None);
}

#[rstest]
fn closing_exception_overrides_open_rule(monday: NaiveDate) {
    let schedule = VendorSchedule::new(
        vec![WeeklyHourRule::open(0, "11:00", "15:00")],
        vec![ExceptionRule::closed(monday).with_note("Staff training")],
    );
    assert_eq!(
        is_open_at(CHICAGO, &schedule, chicago(monday, 13, 0)),
        Ok(false)
    );
}

#[rstest]
fn opening_exception_overrides_closed_day(monday: NaiveDate) {
    let schedule = VendorSchedule::new(
        vec![WeeklyHourRule::closed(0)],
        vec![ExceptionRule::open(monday, "08:00", "10:00")],
    );
    let status = compute_open_status(CHICAGO, &schedule, chicago(monday, 9, 0)).expect("status");
    assert_eq!(status.closes_at(), Some(clock("10:00")));
}

#[rstest]
#[case(date(2024, 1, 12), 23, 0, true)] // Friday evening part
#[case(date(2024, 1, 13), 1, 30, true)] // Saturday carry-over
#[case(date(2024, 1, 13), 2, 0, false)] // end is exclusive
#[case(date(2024, 1, 12), 1, 30, false)] // Thursday has no late shift
#[case(date(2024, 1, 13), 23, 0, false)] // Saturday has no rule of its own
fn midnight_crossing_interval_spans_both_days(
    #[case] day: NaiveDate,
    #[case] hour: u32,
    #[case] minute: u32,
    #[case] expected: bool,
) {
    let schedule = VendorSchedule::new(vec![WeeklyHourRule::open(4, "22:00", "02:00")], Vec::new());
    assert_eq!(
        is_open_at(CHICAGO, &schedule, chicago(day, hour, minute)),
        Ok(expected)
    );
}

#[rstest]
fn carry_over_reports_closing_time() {
    let schedule = VendorSchedule::new(vec![WeeklyHourRule::open(4, "22:00", "02:00")], Vec::new());
    let status =
        compute_open_status(CHICAGO, &schedule, chicago(date(2024, 1, 13), 1, 0)).expect("status");
    assert_eq!(status.label(), "Open · Closes 2:00 AM");
}

#[rstest]
fn closing_exception_on_start_day_cancels_carry_over() {
    let friday = date(2024, 1, 12);
    let schedule = VendorSchedule::new(
        vec![WeeklyHourRule::open(4, "22:00", "02:00")],
        vec![ExceptionRule::closed(friday)],
    );
    assert_eq!(
        is_open_at(CHICAGO, &schedule, chicago(date(2024, 1, 13), 1, 0)),
        Ok(false)
    );
}

#[rstest]
#[case(date(2024, 3, 8))] // Friday before spring-forward
#[case(date(2024, 3, 11))] // Monday after spring-forward
#[case(date(2024, 11, 4))] // Monday after fall-back
fn schedule_is_stable_across_dst(#[case] day: NaiveDate) {
    let rules = (0..7)
        .map(|weekday| WeeklyHourRule::open(weekday, "11:00", "14:00"))
        .collect();
    let schedule = VendorSchedule::new(rules, Vec::new());
    assert_eq!(is_open_at(CHICAGO, &schedule, chicago(day, 11, 0)), Ok(true));
    assert_eq!(is_open_at(CHICAGO, &schedule, chicago(day, 13, 59)), Ok(true));
    assert_eq!(is_open_at(CHICAGO, &schedule, chicago(day, 14, 0)), Ok(false));
    assert_eq!(is_open_at(CHICAGO, &schedule, chicago(day, 10, 59)), Ok(false));
}

#[rstest]
fn vendor_timezone_governs_evaluation(monday: NaiveDate, lunch_weekdays: VendorSchedule) {
    // 13:00 in Chicago is 14:00 in New York; both are inside 11:00-15:00 local,
    // but 13:00 Chicago is 19:00 in London, which is outside.
    let at = chicago(monday, 13, 0);
    assert_eq!(is_open_at("America/New_York", &lunch_weekdays, at), Ok(true));
    assert_eq!(is_open_at("Europe/London", &lunch_weekdays, at), Ok(false));
}

#[rstest]
fn unknown_timezone_is_an_error(monday: NaiveDate, lunch_weekdays: VendorSchedule) {
    let err = compute_open_status("Mars/Olympus_Mons", &lunch_weekdays, chicago(monday, 13, 0))
        .expect_err("unknown zone");
    assert_eq!(
        err,
        AvailabilityError::UnknownTimezone {
            name: "Mars/Olympus_Mons".to_owned()
        }
    );
}

#[rstest]
fn malformed_stored_time_is_an_error(monday: NaiveDate) {
    let schedule = VendorSchedule::new(vec![WeeklyHourRule::open(0, "11:00", "3pm")], Vec::new());
    let err =
        compute_open_status(CHICAGO, &schedule, chicago(monday, 13, 0)).expect_err("bad data");
    assert!(matches!(
        err,
        AvailabilityError::InvalidTimeFormat(WallClockError::InvalidFormat { .. })
    ));
}

#[rstest]
fn open_exception_without_times_is_an_error(monday: NaiveDate) {
    let mut exception = ExceptionRule::open(monday, "10:00", "12:00");
    exception.start = None;
    let schedule = VendorSchedule::new(
        vec![WeeklyHourRule::open(0, "11:00", "15:00")],
        vec![exception],
    );
    let err =
        compute_open_status(CHICAGO, &schedule, chicago(monday, 13, 0)).expect_err("bad data");
    assert_eq!(
        err,
        AvailabilityError::InvalidTimeFormat(WallClockError::MissingBound { bound: "start" })
    );
}

#[rstest]
#[case(Weekday::Fri, "21:00", true)]
#[case(Weekday::Fri, "22:00", false)]
#[case(Weekday::Sat, "12:00", true)]
#[case(Weekday::Sun, "12:00", false)]
fn open_on_day_at_time_uses_next_matching_date(
    monday: NaiveDate,
    #[case] day: Weekday,
    #[case] time: &str,
    #[case] expected: bool,
) {
    let schedule = VendorSchedule::new(
        vec![
            WeeklyHourRule::open(4, "17:00", "22:00"),
            WeeklyHourRule::open(5, "10:00", "16:00"),
        ],
        Vec::new(),
    );
    assert_eq!(
        is_open_on_day_at_time(CHICAGO, &schedule, day, clock(time), chicago(monday, 8, 0)),
        Ok(expected)
    );
}

#[rstest]
fn open_on_day_at_time_honours_exception_on_target_date(monday: NaiveDate) {
    let friday = date(2024, 1, 12);
    let schedule = VendorSchedule::new(
        vec![WeeklyHourRule::open(4, "17:00", "22:00")],
        vec![ExceptionRule::closed(friday)],
    );
    let at = chicago(monday, 8, 0);
    assert_eq!(
        is_open_on_day_at_time(CHICAGO, &schedule, Weekday::Fri, clock("18:00"), at),
        Ok(false)
    );
}

#[rstest]
fn open_on_day_at_time_includes_today(monday: NaiveDate, lunch_weekdays: VendorSchedule) {
    let at = chicago(monday, 20, 0);
    assert_eq!(
        is_open_on_day_at_time(CHICAGO, &lunch_weekdays, Weekday::Mon, clock("12:00"), at),
        Ok(true)
    );
}

#[rstest]
fn open_on_day_at_time_sees_carry_over() {
    let schedule = VendorSchedule::new(vec![WeeklyHourRule::open(4, "22:00", "02:00")], Vec::new());
    let at = chicago(date(2024, 1, 8), 8, 0);
    assert_eq!(
        is_open_on_day_at_time(CHICAGO, &schedule, Weekday::Sat, clock("01:00"), at),
        Ok(true)
    );
}

#[rstest]
fn weekly_display_lists_every_day_in_order() {
    let schedule = VendorSchedule::new(
        vec![
            WeeklyHourRule::open(0, "17:00", "21:00").with_index(1),
            WeeklyHourRule::open(0, "11:00", "14:00").with_index(0),
            WeeklyHourRule::closed(2),
            WeeklyHourRule::open(2, "09:00", "10:00"),
        ],
        vec![ExceptionRule::closed(date(2024, 1, 8))],
    );
    let days = weekly_schedule_display(&schedule).expect("display");
    let names: Vec<_> = days.iter().map(|day| day.day).collect();
    assert_eq!(
        names,
        [
            "Monday",
            "Tuesday",
            "Wednesday",
            "Thursday",
            "Friday",
            "Saturday",
            "Sunday"
        ]
    );

    let monday = days.first().expect("monday");
    assert!(!monday.closed);
    let rendered: Vec<_> = monday
        .intervals
        .iter()
        .map(|interval| (interval.start_12h.as_str(), interval.end_12h.as_str()))
        .collect();
    assert_eq!(rendered, [("11:00 AM", "2:00 PM"), ("5:00 PM", "9:00 PM")]);

    assert!(days.iter().skip(1).all(|day| day.closed));
}

#[rstest]
fn resolve_day_intervals_wraps_parse_errors(monday: NaiveDate) {
    let schedule = VendorSchedule::new(vec![WeeklyHourRule::open(0, "25:00", "26:00")], Vec::new());
    assert!(matches!(
        resolve_day_intervals(&schedule, monday),
        Err(AvailabilityError::InvalidTimeFormat(WallClockError::InvalidRange { .. }))
    ));
}

#[rstest]
fn resolve_timezone_accepts_iana_names() {
    assert!(resolve_timezone("America/Chicago").is_ok());
    assert!(resolve_timezone("Not/AZone").is_err());
}
