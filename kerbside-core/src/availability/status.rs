use std::fmt;

use chrono::Weekday;

use crate::{WallClock, weekday_name};

/// Day on which a closed vendor next opens, relative to the evaluation day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NextOpenDay {
    /// Later on the current civil day.
    Today,
    /// The following civil day.
    Tomorrow,
    /// Two to seven days ahead.
    Weekday(Weekday),
}

impl NextOpenDay {
    /// Label derived from how many days ahead the opening falls.
    #[must_use]
    pub const fn from_offset(offset: u64, day: Weekday) -> Self {
        match offset {
            0 => Self::Today,
            1 => Self::Tomorrow,
            _ => Self::Weekday(day),
        }
    }

    /// Render as `today`, `tomorrow` or an English weekday name.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Today => "today",
            Self::Tomorrow => "tomorrow",
            Self::Weekday(day) => weekday_name(*day),
        }
    }
}

impl fmt::Display for NextOpenDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for NextOpenDay {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

/// Open or closed state of a vendor at an instant.
///
/// Derived on every query and never cached. The constructors keep the fields
/// consistent: an open status carries only a closing time and a closed status
/// carries only next-opening information.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct OpenStatus {
    is_open: bool,
    label: String,
    closes_at: Option<WallClock>,
    opens_at: Option<WallClock>,
    next_open_day: Option<NextOpenDay>,
}

impl OpenStatus {
    /// Open until `closes_at`.
    #[must_use]
    pub fn open_until(closes_at: WallClock) -> Self {
        Self {
            is_open: true,
            label: format!("Open · Closes {}", closes_at.format_12h()),
            closes_at: Some(closes_at),
            opens_at: None,
            next_open_day: None,
        }
    }

    /// Closed, next opening at `opens_at` on `day`.
    #[must_use]
    pub fn opening_at(opens_at: WallClock, day: NextOpenDay) -> Self {
        let label = match day {
            NextOpenDay::Today => format!("Closed · Opens {}", opens_at.format_12h()),
            NextOpenDay::Tomorrow | NextOpenDay::Weekday(_) => {
                format!("Closed · Opens {day} {}", opens_at.format_12h())
            }
        };
        Self {
            is_open: false,
            label,
            closes_at: None,
            opens_at: Some(opens_at),
            next_open_day: Some(day),
        }
    }

    /// Closed with no opening inside the lookahead horizon.
    #[must_use]
    pub fn closed() -> Self {
        Self {
            is_open: false,
            label: String::from("Closed"),
            closes_at: None,
            opens_at: None,
            next_open_day: None,
        }
    }

    /// Whether the vendor is open.
    #[must_use]
    pub const fn is_open(&self) -> bool {
        self.is_open
    }

    /// Human-readable label, e.g. `Open · Closes 3:00 PM`.
    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Closing time of the current interval when open.
    #[must_use]
    pub const fn closes_at(&self) -> Option<WallClock> {
        self.closes_at
    }

    /// Next opening time when closed.
    #[must_use]
    pub const fn opens_at(&self) -> Option<WallClock> {
        self.opens_at
    }

    /// Day of the next opening when closed.
    #[must_use]
    pub const fn next_open_day(&self) -> Option<NextOpenDay> {
        self.next_open_day
    }
}
