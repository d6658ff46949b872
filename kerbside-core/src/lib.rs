//! Core engine for Kerbside vendor discovery.
//!
//! The crate answers two questions about local vendors: whether a vendor is
//! open at an arbitrary instant, evaluated in the vendor's own civil time, and
//! which vendors match a search once text, category, tag, distance and
//! open-status filters are applied and the survivors are ranked.
//!
//! Every operation is a pure function of its inputs. The evaluation instant
//! is always an explicit argument; use a [`Clock`] to obtain "now".

#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]

mod availability;
mod clock;
mod distance;
mod schedule;
mod search;
mod store;
mod trending;
mod vendor;
mod wall_clock;

#[cfg(any(test, feature = "test-support"))]
#[cfg_attr(docsrs, doc(cfg(feature = "test-support")))]
pub mod test_support;

pub use availability::{
    AvailabilityError, DayScheduleDisplay, IntervalDisplay, LOOKAHEAD_DAYS, NextOpenDay,
    OpenStatus, compute_open_status, is_open_at, is_open_on_day_at_time, local_datetime,
    resolve_day_intervals, resolve_timezone, weekly_schedule_display,
};
pub use clock::{Clock, FixedClock, SystemClock};
pub use distance::{
    EARTH_RADIUS_MILES, MILES_PER_DEGREE, bbox_contains, bounding_box, haversine_miles,
    round_distance, wrap_longitudes,
};
pub use schedule::{
    DayIntervals, ExceptionRule, VendorSchedule, WEEK, WeeklyHourRule, WeeklyHourRuleError,
    weekday_from_index, weekday_index, weekday_name,
};
pub use search::{
    DEFAULT_FEATURED_LIMIT, DEFAULT_LIMIT, DEFAULT_RADIUS_MILES, MAX_LIMIT, ParseSortKeyError,
    SearchError, SearchQuery, SearchQueryValidationError, SortKey, featured, search,
    search_store, summarise, vendor_detail,
};
pub use store::{VendorIndex, VendorStore, build_vendor_index};
pub use trending::TrendingWeights;
pub use vendor::{
    DEFAULT_TIMEZONE, ParseVendorCategoryError, ParseVendorStatusError, VendorCandidate,
    VendorCategory, VendorDetail, VendorId, VendorListing, VendorStatus, VendorSummary,
    generate_slug,
};
pub use wall_clock::{
    TimeInterval, WallClock, WallClockError, contains_instant, minutes_since_midnight,
    parse_wall_clock,
};
