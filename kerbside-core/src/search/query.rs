use std::fmt;
use std::str::FromStr;

use chrono::Weekday;
use geo::Coord;
use thiserror::Error;

use super::SearchQueryValidationError;
use crate::{VendorCategory, WallClock, weekday_from_index};

/// Search radius applied when an origin is given without one.
pub const DEFAULT_RADIUS_MILES: f64 = 25.0;

/// Page size applied when the caller does not choose one.
pub const DEFAULT_LIMIT: usize = 30;

/// Largest page size a query may request.
pub const MAX_LIMIT: usize = 100;

/// Ordering applied to search results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "snake_case")
)]
pub enum SortKey {
    /// Open vendors first, then by the weighted rating/review score.
    #[default]
    Trending,
    /// Highest average rating first.
    Rating,
    /// Nearest first; vendors without a distance last.
    Distance,
    /// Storage order, which is newest first.
    Newest,
}

impl SortKey {
    /// Return the key as a lowercase `&str`.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Trending => "trending",
            Self::Rating => "rating",
            Self::Distance => "distance",
            Self::Newest => "newest",
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown [`SortKey`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown sort key '{value}': expected trending, rating, distance or newest")]
pub struct ParseSortKeyError {
    /// Rejected input.
    pub value: String,
}

impl FromStr for SortKey {
    type Err = ParseSortKeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "trending" => Ok(Self::Trending),
            "rating" => Ok(Self::Rating),
            "distance" => Ok(Self::Distance),
            "newest" => Ok(Self::Newest),
            _ => Err(ParseSortKeyError {
                value: s.to_owned(),
            }),
        }
    }
}

/// Parameters for [`search`](fn@crate::search).
///
/// # Examples
/// ```rust
/// use geo::Coord;
/// use kerbside_core::{SearchQuery, SortKey};
///
/// let query = SearchQuery {
///     text: Some("taco".into()),
///     origin: Some(Coord { x: -87.6298, y: 41.8781 }),
///     sort: SortKey::Distance,
///     ..SearchQuery::default()
/// };
/// assert_eq!(query.limit, 30);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct SearchQuery {
    /// Case-insensitive substring matched against name, description and city.
    pub text: Option<String>,
    /// Exact category match.
    pub category: Option<VendorCategory>,
    /// Keep vendors carrying any of these tags.
    pub tags: Vec<String>,
    /// `Some(true)` keeps open vendors, `Some(false)` keeps closed ones.
    pub open_now: Option<bool>,
    /// Day index (`0 = Monday`) for the open-at filter.
    pub open_day: Option<u8>,
    /// `HH:MM` wall-clock time for the open-at filter.
    pub open_time: Option<String>,
    /// Search centre (`x = longitude`, `y = latitude`).
    pub origin: Option<Coord<f64>>,
    /// Radius in miles; defaults to [`DEFAULT_RADIUS_MILES`] with an origin.
    pub radius_miles: Option<f64>,
    /// Result ordering.
    pub sort: SortKey,
    /// Page size in `1..=MAX_LIMIT`.
    pub limit: usize,
    /// Number of results skipped before the page starts.
    pub offset: usize,
}

impl Default for SearchQuery {
    fn default() -> Self {
        Self {
            text: None,
            category: None,
            tags: Vec::new(),
            open_now: None,
            open_day: None,
            open_time: None,
            origin: None,
            radius_miles: None,
            sort: SortKey::default(),
            limit: DEFAULT_LIMIT,
            offset: 0,
        }
    }
}

/// A query whose inputs have been checked and normalised.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct ValidatedQuery {
    pub(crate) text: Option<String>,
    pub(crate) category: Option<VendorCategory>,
    pub(crate) tags: Vec<String>,
    pub(crate) open_now: Option<bool>,
    pub(crate) open_at: Option<OpenAt>,
    pub(crate) origin: Option<Coord<f64>>,
    pub(crate) radius_miles: Option<f64>,
    pub(crate) sort: SortKey,
    pub(crate) limit: usize,
    pub(crate) offset: usize,
}

/// The open-at filter; a missing half is filled from the evaluation instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct OpenAt {
    pub(crate) day: Option<Weekday>,
    pub(crate) time: Option<WallClock>,
}

impl SearchQuery {
    /// Check the query and normalise its free-text inputs.
    pub(crate) fn validate(&self) -> Result<ValidatedQuery, SearchQueryValidationError> {
        if self.limit == 0 {
            return Err(SearchQueryValidationError::ZeroLimit);
        }
        if self.limit > MAX_LIMIT {
            return Err(SearchQueryValidationError::LimitTooLarge {
                limit: self.limit,
                max: MAX_LIMIT,
            });
        }

        let day = self
            .open_day
            .map(|day| {
                weekday_from_index(day).ok_or(SearchQueryValidationError::DayOutOfRange { day })
            })
            .transpose()?;
        let time = self
            .open_time
            .as_deref()
            .map(WallClock::parse)
            .transpose()
            .map_err(SearchQueryValidationError::InvalidOpenTime)?;
        let open_at = (day.is_some() || time.is_some()).then_some(OpenAt { day, time });

        if let Some(radius) = self.radius_miles {
            validate_radius(radius)?;
        }
        if let Some(origin) = self.origin {
            validate_origin(origin)?;
        }
        let radius_miles = self
            .origin
            .map(|_| self.radius_miles.unwrap_or(DEFAULT_RADIUS_MILES));

        Ok(ValidatedQuery {
            text: self
                .text
                .as_deref()
                .filter(|text| !text.is_empty())
                .map(str::to_lowercase),
            category: self.category,
            tags: self
                .tags
                .iter()
                .map(|tag| tag.trim().to_lowercase())
                .filter(|tag| !tag.is_empty())
                .collect(),
            open_now: self.open_now,
            open_at,
            origin: self.origin,
            radius_miles,
            sort: self.sort,
            limit: self.limit,
            offset: self.offset,
        })
    }
}

fn validate_radius(radius: f64) -> Result<(), SearchQueryValidationError> {
    if !radius.is_finite() {
        return Err(SearchQueryValidationError::NonFiniteRadius);
    }
    if radius < 0.0 {
        return Err(SearchQueryValidationError::NegativeRadius { radius });
    }
    Ok(())
}

pub(crate) fn validate_origin(origin: Coord<f64>) -> Result<(), SearchQueryValidationError> {
    let valid = origin.x.is_finite()
        && origin.y.is_finite()
        && (-90.0..=90.0).contains(&origin.y)
        && (-180.0..=180.0).contains(&origin.x);
    if valid {
        Ok(())
    } else {
        Err(SearchQueryValidationError::InvalidOrigin {
            latitude: origin.y,
            longitude: origin.x,
        })
    }
}
