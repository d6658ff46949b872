//! Facade crate for the Kerbside vendor discovery engine.
//!
//! This crate re-exports the availability resolver, geo helpers and search
//! pipeline from `kerbside-core`, and the review aggregation from
//! `kerbside-scorer` behind the `scorer` feature.

#![forbid(unsafe_code)]

pub use kerbside_core::{
    AvailabilityError, Clock, DayIntervals, DayScheduleDisplay, ExceptionRule, FixedClock,
    NextOpenDay, OpenStatus, SearchError, SearchQuery, SearchQueryValidationError, SortKey,
    SystemClock, TimeInterval, TrendingWeights, VendorCandidate, VendorCategory, VendorDetail,
    VendorIndex, VendorListing, VendorSchedule, VendorStatus, VendorStore, VendorSummary,
    WallClock, WallClockError, WeeklyHourRule, bbox_contains, bounding_box, build_vendor_index,
    compute_open_status, contains_instant, featured, haversine_miles, is_open_at,
    is_open_on_day_at_time, minutes_since_midnight, parse_wall_clock, search, search_store,
    summarise, vendor_detail, weekly_schedule_display,
};

#[cfg(feature = "scorer")]
pub use kerbside_scorer::{
    RatingSummary, Review, ReviewError, ReviewSet, ReviewUpdate, refresh_vendor_rating,
};

#[cfg(feature = "test-support")]
pub use kerbside_core::test_support;
