//! Per-vendor review collection with upsert-by-author semantics.
#![forbid(unsafe_code)]

use std::ops::RangeInclusive;

use kerbside_core::VendorId;
use serde::{Deserialize, Serialize};

use crate::{RatingSummary, ReviewError};

/// Identifier of a review within a [`ReviewSet`].
pub type ReviewId = u64;

/// Identifier of the account that wrote a review.
pub type AuthorId = u64;

/// Star ratings a review may carry.
pub const RATING_RANGE: RangeInclusive<u8> = 1..=5;

/// A single star rating left by one author.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Review {
    /// Identifier assigned by the owning set.
    pub id: ReviewId,
    /// Author of the review.
    pub author_id: AuthorId,
    /// Star rating in `1..=5`.
    pub rating: u8,
    /// Optional free-text body.
    #[serde(default)]
    pub body: Option<String>,
    /// Hidden reviews are kept but excluded from the rating summary.
    #[serde(default)]
    pub is_hidden: bool,
}

/// Partial update applied by [`ReviewSet::edit`].
///
/// Fields left as `None` keep their current value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReviewUpdate {
    /// Replacement rating.
    #[serde(default)]
    pub rating: Option<u8>,
    /// Replacement body.
    #[serde(default)]
    pub body: Option<String>,
}

/// All reviews left for one vendor.
///
/// Each author holds at most one review; submitting again edits the existing
/// review in place.
///
/// # Examples
/// ```
/// use kerbside_scorer::ReviewSet;
///
/// let mut reviews = ReviewSet::new(7);
/// let first = reviews.submit(100, 4, None).expect("valid rating");
/// let again = reviews.submit(100, 2, Some("went downhill".into())).expect("valid rating");
/// assert_eq!(first, again);
/// assert_eq!(reviews.len(), 1);
/// assert!((reviews.summary().average_rating - 2.0).abs() < f64::EPSILON);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReviewSet {
    vendor_id: VendorId,
    reviews: Vec<Review>,
    next_id: ReviewId,
}

impl ReviewSet {
    /// An empty set for `vendor_id`.
    #[must_use]
    pub const fn new(vendor_id: VendorId) -> Self {
        Self {
            vendor_id,
            reviews: Vec::new(),
            next_id: 1,
        }
    }

    /// Vendor the reviews belong to.
    #[must_use]
    pub const fn vendor_id(&self) -> VendorId {
        self.vendor_id
    }

    /// Number of reviews, hidden ones included.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.reviews.len()
    }

    /// Whether the set holds no reviews at all.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.reviews.is_empty()
    }

    /// Reviews in submission order, hidden ones included.
    pub fn iter(&self) -> impl Iterator<Item = &Review> {
        self.reviews.iter()
    }

    /// Reviews that count towards the rating summary.
    pub fn visible(&self) -> impl Iterator<Item = &Review> {
        self.reviews.iter().filter(|review| !review.is_hidden)
    }

    /// Look up a review by identifier.
    #[must_use]
    pub fn get(&self, review_id: ReviewId) -> Option<&Review> {
        self.reviews.iter().find(|review| review.id == review_id)
    }

    /// Record `author_id`'s rating, replacing their earlier review if any.
    ///
    /// Returns the identifier of the created or updated review.
    ///
    /// # Errors
    /// Returns [`ReviewError::RatingOutOfRange`] when `rating` is not in
    /// `1..=5`; the set is left unchanged.
    pub fn submit(
        &mut self,
        author_id: AuthorId,
        rating: u8,
        body: Option<String>,
    ) -> Result<ReviewId, ReviewError> {
        let rating = validate_rating(rating)?;
        if let Some(existing) = self
            .reviews
            .iter_mut()
            .find(|review| review.author_id == author_id)
        {
            existing.rating = rating;
            existing.body = body;
            return Ok(existing.id);
        }

        let id = self.next_id;
        self.next_id = self.next_id.saturating_add(1);
        self.reviews.push(Review {
            id,
            author_id,
            rating,
            body,
            is_hidden: false,
        });
        Ok(id)
    }

    /// Apply a partial update to an existing review.
    ///
    /// # Errors
    /// Returns [`ReviewError::UnknownReview`] for a missing identifier and
    /// [`ReviewError::RatingOutOfRange`] for an invalid replacement rating.
    pub fn edit(&mut self, review_id: ReviewId, update: ReviewUpdate) -> Result<(), ReviewError> {
        let rating = update.rating.map(validate_rating).transpose()?;
        let review = self.get_mut(review_id)?;
        if let Some(value) = rating {
            review.rating = value;
        }
        if let Some(body) = update.body {
            review.body = Some(body);
        }
        Ok(())
    }

    /// Delete a review, returning it.
    ///
    /// # Errors
    /// Returns [`ReviewError::UnknownReview`] for a missing identifier.
    pub fn remove(&mut self, review_id: ReviewId) -> Result<Review, ReviewError> {
        let position = self
            .reviews
            .iter()
            .position(|review| review.id == review_id)
            .ok_or(ReviewError::UnknownReview { review_id })?;
        Ok(self.reviews.remove(position))
    }

    /// Hide or reveal a review for moderation.
    ///
    /// # Errors
    /// Returns [`ReviewError::UnknownReview`] for a missing identifier.
    pub fn set_hidden(&mut self, review_id: ReviewId, hidden: bool) -> Result<(), ReviewError> {
        self.get_mut(review_id)?.is_hidden = hidden;
        Ok(())
    }

    /// Aggregate the visible ratings.
    #[must_use]
    pub fn summary(&self) -> RatingSummary {
        RatingSummary::from_ratings(self.visible().map(|review| review.rating))
    }

    fn get_mut(&mut self, review_id: ReviewId) -> Result<&mut Review, ReviewError> {
        self.reviews
            .iter_mut()
            .find(|review| review.id == review_id)
            .ok_or(ReviewError::UnknownReview { review_id })
    }
}

fn validate_rating(rating: u8) -> Result<u8, ReviewError> {
    if RATING_RANGE.contains(&rating) {
        Ok(rating)
    } else {
        Err(ReviewError::RatingOutOfRange { rating })
    }
}
