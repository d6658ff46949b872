//! Sources of the current instant.
//!
//! Resolver and search operations take the evaluation instant as an explicit
//! argument. Callers that want "now" obtain it from a [`Clock`] so tests can
//! pin time with [`FixedClock`].

use chrono::{DateTime, Utc};

/// Supplies the current instant.
pub trait Clock: Send + Sync {
    /// The current instant in UTC.
    fn now(&self) -> DateTime<Utc>;
}

/// Reads the system clock.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Always reports the same instant.
///
/// # Examples
/// ```
/// use chrono::{TimeZone, Utc};
/// use kerbside_core::{Clock, FixedClock};
///
/// let instant = Utc.with_ymd_and_hms(2024, 1, 8, 19, 0, 0).single().expect("valid instant");
/// assert_eq!(FixedClock::new(instant).now(), instant);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock(DateTime<Utc>);

impl FixedClock {
    /// Pin the clock to `instant`.
    #[must_use]
    pub const fn new(instant: DateTime<Utc>) -> Self {
        Self(instant)
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}
