//! Great-circle distance and the rectangular pre-filter used before it.
//!
//! Coordinates follow the `geo` convention: `x` is longitude and `y` is
//! latitude, both in degrees.

use geo::{Coord, Intersects, Rect};

/// Mean Earth radius in statute miles.
pub const EARTH_RADIUS_MILES: f64 = 3958.8;

/// Approximate miles spanned by one degree of latitude.
pub const MILES_PER_DEGREE: f64 = 69.0;

/// Great-circle distance in miles between two coordinates.
///
/// # Examples
/// ```
/// use geo::Coord;
/// use kerbside_core::haversine_miles;
///
/// let chicago = Coord { x: -87.6298, y: 41.8781 };
/// assert_eq!(haversine_miles(chicago, chicago), 0.0);
/// let milwaukee = Coord { x: -87.9065, y: 43.0389 };
/// let miles = haversine_miles(chicago, milwaukee);
/// assert!((80.0..82.0).contains(&miles));
/// ```
#[must_use]
#[expect(
    clippy::float_arithmetic,
    reason = "haversine formula is defined over floating point"
)]
pub fn haversine_miles(from: Coord<f64>, to: Coord<f64>) -> f64 {
    let lat1 = from.y.to_radians();
    let lat2 = to.y.to_radians();
    let half_dlat = (to.y - from.y).to_radians() / 2.0;
    let half_dlon = (to.x - from.x).to_radians() / 2.0;

    let a = half_dlat.sin().powi(2) + lat1.cos() * lat2.cos() * half_dlon.sin().powi(2);
    // Rounding can push `a` fractionally above one near antipodes.
    2.0 * EARTH_RADIUS_MILES * a.sqrt().min(1.0).asin()
}

/// Axis-aligned box that contains every point within `radius_miles` of
/// `center`.
///
/// The box deliberately over-approximates the circle so it can prune
/// candidates cheaply; callers must still apply [`haversine_miles`] to accept
/// or reject. Near the poles the longitude span widens to the full globe.
/// Latitude is clamped to `-90..=90`. Longitude is left unwrapped, so near
/// the antimeridian the box runs past ±180; test membership with
/// [`bbox_contains`] or split it with [`wrap_longitudes`].
#[must_use]
#[expect(
    clippy::float_arithmetic,
    reason = "degree deltas are derived from floating point radii"
)]
pub fn bounding_box(center: Coord<f64>, radius_miles: f64) -> Rect<f64> {
    let lat_delta = radius_miles / MILES_PER_DEGREE;
    let cos_lat = center.y.to_radians().cos();
    let lon_delta = if cos_lat <= f64::EPSILON {
        180.0
    } else {
        (radius_miles / (MILES_PER_DEGREE * cos_lat)).min(180.0)
    };

    Rect::new(
        Coord {
            x: center.x - lon_delta,
            y: (center.y - lat_delta).max(-90.0),
        },
        Coord {
            x: center.x + lon_delta,
            y: (center.y + lat_delta).min(90.0),
        },
    )
}

/// Split `bbox` into at most two boxes whose longitudes lie in `-180..=180`.
///
/// A box reaching past the antimeridian wraps around to the other side; one
/// spanning 360 degrees or more covers every longitude.
///
/// # Examples
/// ```
/// use geo::{Coord, Rect};
/// use kerbside_core::wrap_longitudes;
///
/// let across = Rect::new(Coord { x: 179.5, y: -17.5 }, Coord { x: 180.5, y: -16.5 });
/// let parts = wrap_longitudes(across);
/// assert_eq!(parts.len(), 2);
/// assert_eq!(parts.last().map(|part| part.min().x), Some(-180.0));
/// ```
#[must_use]
#[expect(
    clippy::float_arithmetic,
    reason = "longitudes shift by a full turn"
)]
pub fn wrap_longitudes(bbox: Rect<f64>) -> Vec<Rect<f64>> {
    let (min, max) = (bbox.min(), bbox.max());
    let span = |west: f64, east: f64| {
        Rect::new(Coord { x: west, y: min.y }, Coord { x: east, y: max.y })
    };
    if max.x - min.x >= 360.0 {
        vec![span(-180.0, 180.0)]
    } else if min.x < -180.0 {
        vec![span(min.x + 360.0, 180.0), span(-180.0, max.x)]
    } else if max.x > 180.0 {
        vec![span(min.x, 180.0), span(-180.0, max.x - 360.0)]
    } else {
        vec![bbox]
    }
}

/// Whether `point` lies inside `bbox`, wrapping longitudes at ±180.
///
/// Boundary points count as inside.
#[must_use]
pub fn bbox_contains(bbox: &Rect<f64>, point: Coord<f64>) -> bool {
    wrap_longitudes(*bbox)
        .iter()
        .any(|part| part.intersects(&point))
}

/// Round a distance to two decimal places for presentation.
#[must_use]
#[expect(
    clippy::float_arithmetic,
    reason = "presentation rounding scales by a power of ten"
)]
pub fn round_distance(miles: f64) -> f64 {
    (miles * 100.0).round() / 100.0
}
