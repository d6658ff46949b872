//! Composite popularity score from a vendor's rating and review volume.

/// Multipliers applied to average rating and review count.
///
/// Search ranking and the cached per-vendor score use different weightings;
/// both are exposed as constants so neither is hard-coded at a call site.
///
/// # Examples
/// ```
/// use kerbside_core::TrendingWeights;
///
/// let score = TrendingWeights::CACHED.score(4.0, 10);
/// assert!((score - 3.0).abs() < 1e-9);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrendingWeights {
    /// Multiplier for the average rating.
    pub rating: f64,
    /// Multiplier for each review.
    pub reviews: f64,
}

impl TrendingWeights {
    /// Weights used when ranking search results on the fly.
    pub const SEARCH: Self = Self {
        rating: 0.4,
        reviews: 0.1,
    };

    /// Weights used for the score cached on the vendor record.
    pub const CACHED: Self = Self {
        rating: 0.5,
        reviews: 0.1,
    };

    /// `average_rating * rating + review_count * reviews`.
    #[must_use]
    #[expect(
        clippy::float_arithmetic,
        reason = "the score is a weighted sum of floating point inputs"
    )]
    pub fn score(self, average_rating: f64, review_count: u32) -> f64 {
        average_rating * self.rating + f64::from(review_count) * self.reviews
    }
}
