use thiserror::Error;

use crate::WallClockError;

/// Errors from the availability resolver.
///
/// Both variants are data-integrity failures; the resolver never substitutes
/// a default status in their place.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AvailabilityError {
    /// A stored wall-clock string could not be parsed.
    #[error("invalid stored time: {0}")]
    InvalidTimeFormat(#[from] WallClockError),
    /// The vendor's timezone identifier is not a known IANA zone.
    #[error("unknown timezone '{name}'")]
    UnknownTimezone {
        /// Identifier as stored on the vendor.
        name: String,
    },
}
