//! Vendor records supplied by storage and the views derived from them.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use geo::Coord;
use thiserror::Error;

use crate::{
    AvailabilityError, DayScheduleDisplay, NextOpenDay, OpenStatus, VendorSchedule, WallClock,
    compute_open_status,
};

/// Identifier of a vendor row.
pub type VendorId = u64;

/// Timezone assumed for vendors that never set one.
pub const DEFAULT_TIMEZONE: &str = "America/New_York";

/// What kind of business a vendor is.
///
/// # Examples
/// ```
/// use kerbside_core::VendorCategory;
///
/// assert_eq!(VendorCategory::FoodTruck.as_str(), "food_truck");
/// assert_eq!("market_stall".parse(), Ok(VendorCategory::MarketStall));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "snake_case")
)]
pub enum VendorCategory {
    /// Mobile kitchen.
    FoodTruck,
    /// Temporary pop-up.
    Popup,
    /// Bar or taproom.
    Bar,
    /// Stall at a recurring market.
    MarketStall,
    /// Hand cart.
    Cart,
    /// Anything else.
    Other,
}

impl VendorCategory {
    /// Return the category as a `snake_case` `&str`.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::FoodTruck => "food_truck",
            Self::Popup => "popup",
            Self::Bar => "bar",
            Self::MarketStall => "market_stall",
            Self::Cart => "cart",
            Self::Other => "other",
        }
    }
}

impl fmt::Display for VendorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown [`VendorCategory`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown vendor category '{value}'")]
pub struct ParseVendorCategoryError {
    /// Rejected input.
    pub value: String,
}

impl FromStr for VendorCategory {
    type Err = ParseVendorCategoryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "food_truck" => Ok(Self::FoodTruck),
            "popup" => Ok(Self::Popup),
            "bar" => Ok(Self::Bar),
            "market_stall" => Ok(Self::MarketStall),
            "cart" => Ok(Self::Cart),
            "other" => Ok(Self::Other),
            _ => Err(ParseVendorCategoryError {
                value: s.to_owned(),
            }),
        }
    }
}

/// Moderation state of a vendor. Only [`VendorStatus::Active`] vendors are
/// publicly listed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "snake_case")
)]
pub enum VendorStatus {
    /// Awaiting approval.
    #[default]
    Pending,
    /// Publicly listed.
    Active,
    /// Hidden by an administrator.
    Suspended,
    /// Withdrawn by the owner.
    Inactive,
}

impl VendorStatus {
    /// Return the status as a lowercase `&str`.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Active => "active",
            Self::Suspended => "suspended",
            Self::Inactive => "inactive",
        }
    }

    /// Whether vendors in this state appear in public listings.
    #[must_use]
    pub const fn is_listed(self) -> bool {
        matches!(self, Self::Active)
    }
}

impl fmt::Display for VendorStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown [`VendorStatus`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown vendor status '{value}'")]
pub struct ParseVendorStatusError {
    /// Rejected input.
    pub value: String,
}

impl FromStr for VendorStatus {
    type Err = ParseVendorStatusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "pending" => Ok(Self::Pending),
            "active" => Ok(Self::Active),
            "suspended" => Ok(Self::Suspended),
            "inactive" => Ok(Self::Inactive),
            _ => Err(ParseVendorStatusError {
                value: s.to_owned(),
            }),
        }
    }
}

#[cfg(feature = "serde")]
fn default_timezone() -> String {
    DEFAULT_TIMEZONE.to_owned()
}

/// A vendor row as read from storage, including its cached review stats.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct VendorListing {
    /// Row identifier.
    pub id: VendorId,
    /// Display name.
    pub name: String,
    /// URL-safe unique handle.
    pub slug: String,
    /// Free-text description.
    #[cfg_attr(feature = "serde", serde(default))]
    pub description: Option<String>,
    /// Business category.
    pub category: VendorCategory,
    /// Moderation state.
    #[cfg_attr(feature = "serde", serde(default))]
    pub status: VendorStatus,
    /// City name.
    #[cfg_attr(feature = "serde", serde(default))]
    pub city: Option<String>,
    /// State or region.
    #[cfg_attr(feature = "serde", serde(default))]
    pub state: Option<String>,
    /// Latitude in degrees.
    #[cfg_attr(feature = "serde", serde(default))]
    pub latitude: Option<f64>,
    /// Longitude in degrees.
    #[cfg_attr(feature = "serde", serde(default))]
    pub longitude: Option<f64>,
    /// IANA timezone used for every wall-clock interpretation.
    #[cfg_attr(feature = "serde", serde(default = "default_timezone"))]
    pub timezone: String,
    /// Cached mean rating of visible reviews.
    #[cfg_attr(feature = "serde", serde(default))]
    pub average_rating: f64,
    /// Cached count of visible reviews.
    #[cfg_attr(feature = "serde", serde(default))]
    pub review_count: u32,
    /// Number of users who favourited the vendor.
    #[cfg_attr(feature = "serde", serde(default))]
    pub favorite_count: u32,
    /// Cached trending score.
    #[cfg_attr(feature = "serde", serde(default))]
    pub trending_score: f64,
    /// Promoted to the top of featured listings.
    #[cfg_attr(feature = "serde", serde(default))]
    pub is_featured: bool,
    /// Cover photo location.
    #[cfg_attr(feature = "serde", serde(default))]
    pub cover_photo_url: Option<String>,
    /// Lowercase tags.
    #[cfg_attr(feature = "serde", serde(default))]
    pub tags: Vec<String>,
}

impl VendorListing {
    /// A pending vendor with a slug derived from `name` and zeroed stats.
    #[must_use]
    pub fn new(id: VendorId, name: &str, category: VendorCategory) -> Self {
        Self {
            id,
            name: name.to_owned(),
            slug: generate_slug(name),
            description: None,
            category,
            status: VendorStatus::Pending,
            city: None,
            state: None,
            latitude: None,
            longitude: None,
            timezone: DEFAULT_TIMEZONE.to_owned(),
            average_rating: 0.0,
            review_count: 0,
            favorite_count: 0,
            trending_score: 0.0,
            is_featured: false,
            cover_photo_url: None,
            tags: Vec::new(),
        }
    }

    /// Position as a `geo` coordinate when both components are known.
    #[must_use]
    pub fn location(&self) -> Option<Coord<f64>> {
        Some(Coord {
            x: self.longitude?,
            y: self.latitude?,
        })
    }
}

/// Derive a URL slug: lowercase ASCII letters and digits joined by single
/// hyphens.
///
/// # Examples
/// ```
/// use kerbside_core::generate_slug;
///
/// assert_eq!(generate_slug("  Taco  Loco's Truck! "), "taco-locos-truck");
/// ```
#[must_use]
pub fn generate_slug(name: &str) -> String {
    let cleaned: String = name
        .trim()
        .to_lowercase()
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || c.is_whitespace() || *c == '-')
        .collect();
    cleaned
        .split(|c: char| c.is_whitespace() || c == '-')
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join("-")
}

/// A vendor together with its schedule, as handed to the search pipeline.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct VendorCandidate {
    /// The vendor row.
    #[cfg_attr(feature = "serde", serde(flatten))]
    pub listing: VendorListing,
    /// Weekly rules and exceptions scoped to this vendor.
    #[cfg_attr(feature = "serde", serde(default))]
    pub schedule: VendorSchedule,
}

impl VendorCandidate {
    /// Pair a listing with its schedule.
    #[must_use]
    pub const fn new(listing: VendorListing, schedule: VendorSchedule) -> Self {
        Self { listing, schedule }
    }

    /// Open status at `at` in the vendor's own timezone.
    ///
    /// # Errors
    /// See [`compute_open_status`].
    pub fn open_status(&self, at: DateTime<Utc>) -> Result<OpenStatus, AvailabilityError> {
        compute_open_status(&self.listing.timezone, &self.schedule, at)
    }
}

/// Lightweight vendor card for feeds and search results.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct VendorSummary {
    /// Row identifier.
    pub id: VendorId,
    /// Display name.
    pub name: String,
    /// URL-safe handle.
    pub slug: String,
    /// Business category.
    pub category: VendorCategory,
    /// Moderation state.
    pub status: VendorStatus,
    /// City name.
    pub city: Option<String>,
    /// State or region.
    pub state: Option<String>,
    /// Latitude in degrees.
    pub latitude: Option<f64>,
    /// Longitude in degrees.
    pub longitude: Option<f64>,
    /// Cached mean rating.
    pub average_rating: f64,
    /// Cached review count.
    pub review_count: u32,
    /// Favourite count.
    pub favorite_count: u32,
    /// Cover photo location.
    pub cover_photo_url: Option<String>,
    /// Tags.
    pub tags: Vec<String>,
    /// Distance from the query origin in miles, rounded to two decimals.
    pub distance_miles: Option<f64>,
    /// Whether the vendor is open at the evaluation instant.
    pub is_open: bool,
    /// Status label such as `Open · Closes 3:00 PM`.
    pub open_status_label: String,
}

impl VendorSummary {
    /// Build a summary from a listing, its status and an optional distance.
    ///
    /// `distance_miles` is the exact value; the summary stores it rounded.
    #[must_use]
    pub fn new(listing: &VendorListing, status: &OpenStatus, distance_miles: Option<f64>) -> Self {
        Self {
            id: listing.id,
            name: listing.name.clone(),
            slug: listing.slug.clone(),
            category: listing.category,
            status: listing.status,
            city: listing.city.clone(),
            state: listing.state.clone(),
            latitude: listing.latitude,
            longitude: listing.longitude,
            average_rating: listing.average_rating,
            review_count: listing.review_count,
            favorite_count: listing.favorite_count,
            cover_photo_url: listing.cover_photo_url.clone(),
            tags: listing.tags.clone(),
            distance_miles: distance_miles.map(crate::round_distance),
            is_open: status.is_open(),
            open_status_label: status.label().to_owned(),
        }
    }
}

/// Full vendor view: the summary plus schedule and status detail.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct VendorDetail {
    /// Card fields.
    #[cfg_attr(feature = "serde", serde(flatten))]
    pub summary: VendorSummary,
    /// Free-text description.
    pub description: Option<String>,
    /// IANA timezone of the vendor.
    pub timezone: String,
    /// Cached trending score.
    pub trending_score: f64,
    /// Featured flag.
    pub is_featured: bool,
    /// End of the current interval when open.
    pub closes_at: Option<WallClock>,
    /// Next opening time when closed.
    pub opens_at: Option<WallClock>,
    /// Day of the next opening when closed.
    pub next_open_day: Option<NextOpenDay>,
    /// Recurring schedule, Monday through Sunday.
    pub weekly_schedule: Vec<DayScheduleDisplay>,
}
