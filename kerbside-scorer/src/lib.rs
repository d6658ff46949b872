//! Review aggregation for Kerbside vendors.
//!
//! Each vendor's reviews live in a [`ReviewSet`]. After every mutation the
//! caller refreshes the figures cached on the vendor listing (average rating,
//! review count and trending score) with [`refresh_vendor_rating`], so the
//! search pipeline can rank vendors without re-reading raw reviews.
//!
//! The refresh borrows the listing mutably, which keeps a single writer per
//! vendor for the duration of the read-modify-write.
//!
//! # Examples
//!
//! ```
//! use kerbside_core::{VendorCategory, VendorListing};
//! use kerbside_scorer::{ReviewSet, refresh_vendor_rating};
//!
//! let mut listing = VendorListing::new(7, "Bao Cart", VendorCategory::Cart);
//! let mut reviews = ReviewSet::new(7);
//! reviews.submit(1, 5, None).expect("valid rating");
//! reviews.submit(2, 4, None).expect("valid rating");
//!
//! let summary = refresh_vendor_rating(&mut listing, &reviews).expect("same vendor");
//! assert_eq!(listing.review_count, 2);
//! assert!((listing.average_rating - 4.5).abs() < f64::EPSILON);
//! assert!((summary.trending_score - 2.45).abs() < 1e-9);
//! ```

#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]

use kerbside_core::VendorListing;
use log::debug;

mod error;
mod review;
mod summary;

pub use error::ReviewError;
pub use review::{AuthorId, RATING_RANGE, Review, ReviewId, ReviewSet, ReviewUpdate};
pub use summary::RatingSummary;

/// Recompute `listing`'s cached rating figures from `reviews`.
///
/// Hidden reviews are ignored. Returns the summary that was written.
///
/// # Errors
/// Returns [`ReviewError::VendorMismatch`] when the review set was collected
/// for a different vendor; the listing is left unchanged.
pub fn refresh_vendor_rating(
    listing: &mut VendorListing,
    reviews: &ReviewSet,
) -> Result<RatingSummary, ReviewError> {
    if listing.id != reviews.vendor_id() {
        return Err(ReviewError::VendorMismatch {
            listing_vendor: listing.id,
            reviews_vendor: reviews.vendor_id(),
        });
    }
    let summary = reviews.summary();
    summary.apply_to(listing);
    debug!(
        "refreshed rating for vendor {}: average {:.2} over {} reviews, trending {:.2}",
        listing.id, summary.average_rating, summary.review_count, summary.trending_score
    );
    Ok(summary)
}

#[cfg(test)]
mod tests;
