//! Aggregate rating figures cached on a vendor listing.
#![forbid(unsafe_code)]

use kerbside_core::{TrendingWeights, VendorListing};
use serde::{Deserialize, Serialize};

/// Average rating, review count and trending score for one vendor.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct RatingSummary {
    /// Mean of the visible ratings, rounded to two decimals; `0.0` when none.
    pub average_rating: f64,
    /// Number of visible reviews.
    pub review_count: u32,
    /// [`TrendingWeights::CACHED`] applied to the rounded average and count.
    pub trending_score: f64,
}

impl RatingSummary {
    /// Summarise a sequence of star ratings.
    ///
    /// # Examples
    /// ```
    /// use kerbside_scorer::RatingSummary;
    ///
    /// let summary = RatingSummary::from_ratings([5, 4, 4]);
    /// assert_eq!(summary.review_count, 3);
    /// assert!((summary.average_rating - 4.33).abs() < 1e-9);
    /// ```
    #[must_use]
    #[expect(
        clippy::float_arithmetic,
        reason = "the average is a floating point mean of integer ratings"
    )]
    pub fn from_ratings<I>(ratings: I) -> Self
    where
        I: IntoIterator<Item = u8>,
    {
        let (total, count) = ratings
            .into_iter()
            .fold((0_u32, 0_u32), |(total, count), rating| {
                (
                    total.saturating_add(u32::from(rating)),
                    count.saturating_add(1),
                )
            });
        let average_rating = if count == 0 {
            0.0
        } else {
            round_hundredths(f64::from(total) / f64::from(count))
        };
        Self {
            average_rating,
            review_count: count,
            trending_score: TrendingWeights::CACHED.score(average_rating, count),
        }
    }

    /// Write the cached figures onto `listing`.
    pub const fn apply_to(&self, listing: &mut VendorListing) {
        listing.average_rating = self.average_rating;
        listing.review_count = self.review_count;
        listing.trending_score = self.trending_score;
    }
}

#[expect(
    clippy::float_arithmetic,
    reason = "rounding scales by a power of ten"
)]
fn round_hundredths(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
