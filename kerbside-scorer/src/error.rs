//! Error types raised while maintaining a vendor's review set.
#![forbid(unsafe_code)]

use kerbside_core::VendorId;
use thiserror::Error;

use crate::ReviewId;

/// Errors raised by review mutations and rating refreshes.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReviewError {
    /// A rating fell outside `1..=5`.
    #[error("rating {rating} is outside the allowed range 1..=5")]
    RatingOutOfRange {
        /// Rejected rating.
        rating: u8,
    },
    /// No review with the given identifier exists in the set.
    #[error("review {review_id} not found")]
    UnknownReview {
        /// Requested identifier.
        review_id: ReviewId,
    },
    /// The review set belongs to a different vendor than the listing.
    #[error("reviews for vendor {reviews_vendor} cannot refresh vendor {listing_vendor}")]
    VendorMismatch {
        /// Identifier on the listing being refreshed.
        listing_vendor: VendorId,
        /// Identifier the review set was collected for.
        reviews_vendor: VendorId,
    },
}
