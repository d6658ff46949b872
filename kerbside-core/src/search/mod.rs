//! Filter, rank and page vendor candidates.
//!
//! The pipeline runs in a fixed order: validate the query, pre-filter on
//! listing fields and the bounding box, apply the exact distance check,
//! resolve open status and apply the open filters, sort, then page. Every
//! stage is an exact reject; nothing is soft-ranked away.

use std::cmp::Ordering;

use chrono::{DateTime, Datelike, Utc};
use geo::{Coord, Rect};
use log::debug;

use crate::{
    AvailabilityError, OpenStatus, TrendingWeights, VendorCandidate, VendorDetail, VendorListing,
    VendorStore, VendorSummary, WallClock, bbox_contains, bounding_box, haversine_miles,
    is_open_on_day_at_time, local_datetime, weekly_schedule_display,
};

mod error;
mod query;

pub use error::{SearchError, SearchQueryValidationError};
pub use query::{
    DEFAULT_LIMIT, DEFAULT_RADIUS_MILES, MAX_LIMIT, ParseSortKeyError, SearchQuery, SortKey,
};

use query::{OpenAt, ValidatedQuery, validate_origin};

/// Page size applied to featured listings when the caller does not choose one.
pub const DEFAULT_FEATURED_LIMIT: usize = 10;

/// A candidate that survived filtering, with the exact values used to sort.
struct Ranked {
    summary: VendorSummary,
    distance_miles: Option<f64>,
    trending: f64,
}

/// Run the search pipeline over `candidates` at the instant `at`.
///
/// Candidates are expected in storage order, newest first; that order is
/// preserved for [`SortKey::Newest`] and for ties under every other key.
///
/// # Errors
/// Returns [`SearchError::InvalidQuery`] before any filtering when the query
/// is malformed, and [`SearchError::Availability`] when a surviving
/// candidate's schedule or timezone cannot be evaluated.
///
/// # Examples
/// ```rust
/// use chrono::{TimeZone, Utc};
/// use kerbside_core::{SearchQuery, search};
///
/// # fn main() -> Result<(), kerbside_core::SearchError> {
/// let at = Utc.with_ymd_and_hms(2024, 1, 8, 19, 0, 0).single().expect("valid instant");
/// let page = search(&[], &SearchQuery::default(), at)?;
/// assert!(page.is_empty());
/// # Ok(())
/// # }
/// ```
pub fn search(
    candidates: &[VendorCandidate],
    query: &SearchQuery,
    at: DateTime<Utc>,
) -> Result<Vec<VendorSummary>, SearchError> {
    let query = query.validate()?;
    let bbox = search_area(&query);

    let listed: Vec<&VendorCandidate> = candidates
        .iter()
        .filter(|candidate| matches_listing(&candidate.listing, &query, bbox.as_ref()))
        .collect();
    debug!(
        "search pre-filter kept {} of {} candidates",
        listed.len(),
        candidates.len()
    );

    let in_range: Vec<(&VendorCandidate, Option<f64>)> = listed
        .into_iter()
        .filter_map(|candidate| within_radius(candidate, &query))
        .collect();
    debug!("search distance check kept {} candidates", in_range.len());

    let mut ranked = Vec::with_capacity(in_range.len());
    for (candidate, distance_miles) in in_range {
        let vendor_id = candidate.listing.id;
        let status = candidate
            .open_status(at)
            .map_err(|source| SearchError::Availability { vendor_id, source })?;
        if !passes_open_filters(candidate, &status, &query, at)
            .map_err(|source| SearchError::Availability { vendor_id, source })?
        {
            continue;
        }
        ranked.push(Ranked {
            summary: VendorSummary::new(&candidate.listing, &status, distance_miles),
            distance_miles,
            trending: TrendingWeights::SEARCH.score(
                candidate.listing.average_rating,
                candidate.listing.review_count,
            ),
        });
    }
    debug!("search open filters kept {} candidates", ranked.len());

    sort_ranked(&mut ranked, query.sort);
    Ok(ranked
        .into_iter()
        .skip(query.offset)
        .take(query.limit)
        .map(|entry| entry.summary)
        .collect())
}

/// Run the search pipeline against a [`VendorStore`].
///
/// With an origin the store is asked only for vendors inside the bounding
/// box; otherwise every vendor is considered.
///
/// # Errors
/// See [`search`].
pub fn search_store(
    store: &dyn VendorStore,
    query: &SearchQuery,
    at: DateTime<Utc>,
) -> Result<Vec<VendorSummary>, SearchError> {
    let validated = query.validate()?;
    let candidates: Vec<VendorCandidate> = match search_area(&validated) {
        Some(bbox) => store.vendors_in_bbox(&bbox).collect(),
        None => store.all_vendors().collect(),
    };
    search(&candidates, query, at)
}

/// Featured listing: publicly listed vendors with featured ones first, then
/// by cached trending score, truncated to `limit`.
///
/// Distance from `origin` is reported but never filtered on.
///
/// # Errors
/// Returns [`SearchError::InvalidQuery`] for an invalid origin and
/// [`SearchError::Availability`] for malformed vendor data.
pub fn featured(
    candidates: &[VendorCandidate],
    origin: Option<Coord<f64>>,
    limit: usize,
    at: DateTime<Utc>,
) -> Result<Vec<VendorSummary>, SearchError> {
    if let Some(point) = origin {
        validate_origin(point)?;
    }
    let mut listed: Vec<&VendorCandidate> = candidates
        .iter()
        .filter(|candidate| candidate.listing.status.is_listed())
        .collect();
    listed.sort_by(|a, b| {
        b.listing
            .is_featured
            .cmp(&a.listing.is_featured)
            .then_with(|| b.listing.trending_score.total_cmp(&a.listing.trending_score))
    });

    listed
        .into_iter()
        .take(limit)
        .map(|candidate| summarise_one(candidate, origin, at))
        .collect()
}

/// Summaries for a caller-ordered list such as a user's favourites.
///
/// No filtering or sorting is applied and no distance is reported.
///
/// # Errors
/// Returns [`SearchError::Availability`] for malformed vendor data.
pub fn summarise(
    candidates: &[VendorCandidate],
    at: DateTime<Utc>,
) -> Result<Vec<VendorSummary>, SearchError> {
    candidates
        .iter()
        .map(|candidate| summarise_one(candidate, None, at))
        .collect()
}

/// Full detail view of one vendor, including its weekly schedule.
///
/// # Errors
/// Returns [`SearchError::InvalidQuery`] for an invalid origin and
/// [`SearchError::Availability`] for malformed vendor data.
pub fn vendor_detail(
    candidate: &VendorCandidate,
    origin: Option<Coord<f64>>,
    at: DateTime<Utc>,
) -> Result<VendorDetail, SearchError> {
    if let Some(point) = origin {
        validate_origin(point)?;
    }
    let listing = &candidate.listing;
    let vendor_id = listing.id;
    let status = candidate
        .open_status(at)
        .map_err(|source| SearchError::Availability { vendor_id, source })?;
    let weekly_schedule = weekly_schedule_display(&candidate.schedule)
        .map_err(|source| SearchError::Availability { vendor_id, source })?;
    let distance = distance_from(origin, listing);

    Ok(VendorDetail {
        summary: VendorSummary::new(listing, &status, distance),
        description: listing.description.clone(),
        timezone: listing.timezone.clone(),
        trending_score: listing.trending_score,
        is_featured: listing.is_featured,
        closes_at: status.closes_at(),
        opens_at: status.opens_at(),
        next_open_day: status.next_open_day(),
        weekly_schedule,
    })
}

fn summarise_one(
    candidate: &VendorCandidate,
    origin: Option<Coord<f64>>,
    at: DateTime<Utc>,
) -> Result<VendorSummary, SearchError> {
    let status = candidate
        .open_status(at)
        .map_err(|source| SearchError::Availability {
            vendor_id: candidate.listing.id,
            source,
        })?;
    let distance = distance_from(origin, &candidate.listing);
    Ok(VendorSummary::new(&candidate.listing, &status, distance))
}

fn distance_from(origin: Option<Coord<f64>>, listing: &VendorListing) -> Option<f64> {
    Some(haversine_miles(origin?, listing.location()?))
}

fn search_area(query: &ValidatedQuery) -> Option<Rect<f64>> {
    Some(bounding_box(query.origin?, query.radius_miles?))
}

fn matches_listing(
    listing: &VendorListing,
    query: &ValidatedQuery,
    bbox: Option<&Rect<f64>>,
) -> bool {
    listing.status.is_listed()
        && query
            .text
            .as_deref()
            .is_none_or(|needle| matches_text(listing, needle))
        && query
            .category
            .is_none_or(|category| listing.category == category)
        && (query.tags.is_empty()
            || listing
                .tags
                .iter()
                .any(|tag| query.tags.contains(&tag.to_lowercase())))
        && bbox.is_none_or(|area| {
            listing
                .location()
                .is_some_and(|location| bbox_contains(area, location))
        })
}

fn matches_text(listing: &VendorListing, needle: &str) -> bool {
    let contains = |field: &str| field.to_lowercase().contains(needle);
    contains(&listing.name)
        || listing.description.as_deref().is_some_and(contains)
        || listing.city.as_deref().is_some_and(contains)
}

/// Exact distance check; the bounding box is only a superset.
fn within_radius<'a>(
    candidate: &'a VendorCandidate,
    query: &ValidatedQuery,
) -> Option<(&'a VendorCandidate, Option<f64>)> {
    let distance = distance_from(query.origin, &candidate.listing);
    match (distance, query.radius_miles) {
        (Some(miles), Some(radius)) if miles > radius => None,
        _ => Some((candidate, distance)),
    }
}

fn passes_open_filters(
    candidate: &VendorCandidate,
    status: &OpenStatus,
    query: &ValidatedQuery,
    at: DateTime<Utc>,
) -> Result<bool, AvailabilityError> {
    if query
        .open_now
        .is_some_and(|wanted| wanted != status.is_open())
    {
        return Ok(false);
    }
    match query.open_at {
        Some(open_at) => open_at_matches(candidate, open_at, at),
        None => Ok(true),
    }
}

fn open_at_matches(
    candidate: &VendorCandidate,
    open_at: OpenAt,
    at: DateTime<Utc>,
) -> Result<bool, AvailabilityError> {
    let timezone = &candidate.listing.timezone;
    let local = local_datetime(timezone, at)?;
    let day = open_at.day.unwrap_or_else(|| local.weekday());
    let time = open_at
        .time
        .unwrap_or_else(|| WallClock::from_time(local.time()));
    is_open_on_day_at_time(timezone, &candidate.schedule, day, time, at)
}

fn sort_ranked(ranked: &mut [Ranked], sort: SortKey) {
    match sort {
        SortKey::Rating => ranked.sort_by(|a, b| {
            b.summary
                .average_rating
                .total_cmp(&a.summary.average_rating)
        }),
        SortKey::Distance => {
            ranked.sort_by(|a, b| compare_distance(a.distance_miles, b.distance_miles));
        }
        SortKey::Newest => {}
        SortKey::Trending => ranked.sort_by(|a, b| {
            b.summary
                .is_open
                .cmp(&a.summary.is_open)
                .then_with(|| b.trending.total_cmp(&a.trending))
        }),
    }
}

fn compare_distance(a: Option<f64>, b: Option<f64>) -> Ordering {
    match (a, b) {
        (Some(x), Some(y)) => x.total_cmp(&y),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}
