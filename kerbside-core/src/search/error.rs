use thiserror::Error;

use crate::{AvailabilityError, VendorId, WallClockError};

/// Reasons a [`SearchQuery`](crate::SearchQuery) is rejected before any
/// filtering begins.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SearchQueryValidationError {
    /// `open_day` was outside `0..=6`.
    #[error("open_day must be 0 (Mon) through 6 (Sun), got {day}")]
    DayOutOfRange {
        /// Offending day index.
        day: u8,
    },
    /// `open_time` was not a valid `HH:MM` string.
    #[error("open_time is invalid: {0}")]
    InvalidOpenTime(#[source] WallClockError),
    /// The radius was negative.
    #[error("radius must not be negative, got {radius}")]
    NegativeRadius {
        /// Offending radius in miles.
        radius: f64,
    },
    /// The radius was NaN or infinite.
    #[error("radius must be a finite number of miles")]
    NonFiniteRadius,
    /// The origin was not a finite WGS84 coordinate.
    #[error("origin ({latitude}, {longitude}) is not a valid coordinate")]
    InvalidOrigin {
        /// Supplied latitude.
        latitude: f64,
        /// Supplied longitude.
        longitude: f64,
    },
    /// `limit` was zero.
    #[error("limit must be at least 1")]
    ZeroLimit,
    /// `limit` exceeded the page-size cap.
    #[error("limit must be at most {max}, got {limit}")]
    LimitTooLarge {
        /// Requested page size.
        limit: usize,
        /// Largest accepted page size.
        max: usize,
    },
}

/// Errors returned by the search pipeline and its sibling listings.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SearchError {
    /// The query failed validation.
    #[error("invalid query: {0}")]
    InvalidQuery(#[from] SearchQueryValidationError),
    /// A candidate's stored schedule or timezone could not be evaluated.
    #[error("availability for vendor {vendor_id} could not be resolved: {source}")]
    Availability {
        /// Vendor whose data is malformed.
        vendor_id: VendorId,
        /// Underlying resolver failure.
        #[source]
        source: AvailabilityError,
    },
}
