//! Test-only builders for vendors, schedules and instants.
//!
//! The helpers in this module are available to unit tests and behavioural
//! tests. They are gated behind the `test-support` feature (and `cfg(test)`).

use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use chrono_tz::Tz;
use geo::Coord;

use crate::{
    EARTH_RADIUS_MILES, ExceptionRule, VendorCandidate, VendorCategory, VendorId, VendorListing,
    VendorSchedule, VendorStatus, WeeklyHourRule,
};

/// Fluent builder for [`VendorCandidate`] values.
///
/// Built vendors default to an active food truck in `America/Chicago` with no
/// coordinates and no opening hours.
///
/// # Examples
/// ```rust
/// use kerbside_core::test_support::VendorBuilder;
///
/// let vendor = VendorBuilder::new(1, "Taco Loco")
///     .located(41.8781, -87.6298)
///     .hours(0, "11:00", "15:00")
///     .build();
/// assert_eq!(vendor.listing.slug, "taco-loco");
/// assert_eq!(vendor.schedule.weekly().len(), 1);
/// ```
#[derive(Debug, Clone)]
pub struct VendorBuilder {
    listing: VendorListing,
    weekly: Vec<WeeklyHourRule>,
    exceptions: Vec<ExceptionRule>,
}

impl VendorBuilder {
    /// Start building an active vendor.
    #[must_use]
    pub fn new(id: VendorId, name: &str) -> Self {
        let mut listing = VendorListing::new(id, name, VendorCategory::FoodTruck);
        listing.status = VendorStatus::Active;
        "America/Chicago".clone_into(&mut listing.timezone);
        Self {
            listing,
            weekly: Vec::new(),
            exceptions: Vec::new(),
        }
    }

    /// Set the category.
    #[must_use]
    pub const fn category(mut self, category: VendorCategory) -> Self {
        self.listing.category = category;
        self
    }

    /// Set the moderation state.
    #[must_use]
    pub const fn status(mut self, status: VendorStatus) -> Self {
        self.listing.status = status;
        self
    }

    /// Place the vendor at `latitude`, `longitude`.
    #[must_use]
    pub const fn located(mut self, latitude: f64, longitude: f64) -> Self {
        self.listing.latitude = Some(latitude);
        self.listing.longitude = Some(longitude);
        self
    }

    /// Place the vendor at a `geo` coordinate.
    #[must_use]
    pub const fn at(self, location: Coord<f64>) -> Self {
        self.located(location.y, location.x)
    }

    /// Set the IANA timezone.
    #[must_use]
    pub fn timezone(mut self, timezone: &str) -> Self {
        timezone.clone_into(&mut self.listing.timezone);
        self
    }

    /// Set the city.
    #[must_use]
    pub fn city(mut self, city: &str) -> Self {
        self.listing.city = Some(city.to_owned());
        self
    }

    /// Set the description.
    #[must_use]
    pub fn description(mut self, description: &str) -> Self {
        self.listing.description = Some(description.to_owned());
        self
    }

    /// Replace the tags.
    #[must_use]
    pub fn tags(mut self, tags: &[&str]) -> Self {
        self.listing.tags = tags.iter().map(|tag| (*tag).to_owned()).collect();
        self
    }

    /// Set the cached average rating and review count.
    #[must_use]
    pub const fn rating(mut self, average_rating: f64, review_count: u32) -> Self {
        self.listing.average_rating = average_rating;
        self.listing.review_count = review_count;
        self
    }

    /// Set the cached trending score.
    #[must_use]
    pub const fn trending(mut self, score: f64) -> Self {
        self.listing.trending_score = score;
        self
    }

    /// Mark the vendor as featured.
    #[must_use]
    pub const fn featured(mut self) -> Self {
        self.listing.is_featured = true;
        self
    }

    /// Add a weekly interval; intervals on the same day keep insertion order.
    #[must_use]
    pub fn hours(mut self, day_of_week: u8, start: &str, end: &str) -> Self {
        let index = self
            .weekly
            .iter()
            .filter(|rule| rule.day_of_week == day_of_week)
            .count();
        let index = u32::try_from(index).unwrap_or(u32::MAX);
        self.weekly
            .push(WeeklyHourRule::open(day_of_week, start, end).with_index(index));
        self
    }

    /// Add a closure for a whole weekday.
    #[must_use]
    pub fn closed_on(mut self, day_of_week: u8) -> Self {
        self.weekly.push(WeeklyHourRule::closed(day_of_week));
        self
    }

    /// Add a date-specific exception.
    #[must_use]
    pub fn exception(mut self, exception: ExceptionRule) -> Self {
        self.exceptions.push(exception);
        self
    }

    /// Finish building.
    #[must_use]
    pub fn build(self) -> VendorCandidate {
        VendorCandidate::new(
            self.listing,
            VendorSchedule::new(self.weekly, self.exceptions),
        )
    }
}

/// An active vendor at `latitude`, `longitude` with no hours.
#[must_use]
pub fn candidate_at(id: VendorId, latitude: f64, longitude: f64) -> VendorCandidate {
    VendorBuilder::new(id, &format!("Vendor {id}"))
        .located(latitude, longitude)
        .build()
}

/// The UTC instant of civil `date` at `hour:minute` in `timezone`.
///
/// Ambiguous times resolve to the earlier instant; nonexistent times (inside
/// a spring-forward gap) yield `None`.
#[must_use]
pub fn local_instant(
    timezone: &str,
    date: NaiveDate,
    hour: u32,
    minute: u32,
) -> Option<DateTime<Utc>> {
    let tz: Tz = timezone.parse().ok()?;
    let civil = date.and_hms_opt(hour, minute, 0)?;
    tz.from_local_datetime(&civil)
        .earliest()
        .map(|local| local.with_timezone(&Utc))
}

/// The point `miles` away from `origin` along the initial `bearing_degrees`
/// (clockwise from north) on a spherical Earth, with longitude wrapped into
/// `-180..=180`.
#[must_use]
#[expect(
    clippy::float_arithmetic,
    reason = "spherical destination formula is defined over floating point"
)]
pub fn destination(origin: Coord<f64>, bearing_degrees: f64, miles: f64) -> Coord<f64> {
    let angular = miles / EARTH_RADIUS_MILES;
    let bearing = bearing_degrees.to_radians();
    let lat1 = origin.y.to_radians();
    let lon1 = origin.x.to_radians();

    let lat2 = (lat1.sin() * angular.cos() + lat1.cos() * angular.sin() * bearing.cos()).asin();
    let lon2 = lon1
        + (bearing.sin() * angular.sin() * lat1.cos())
            .atan2(angular.cos() - lat1.sin() * lat2.sin());
    let raw_lon = lon2.to_degrees();
    let wrapped_lon = if raw_lon > 180.0 {
        raw_lon - 360.0
    } else if raw_lon < -180.0 {
        raw_lon + 360.0
    } else {
        raw_lon
    };
    Coord {
        x: wrapped_lon,
        y: lat2.to_degrees(),
    }
}
