//! Unit coverage for review mutations and rating summaries.
#![forbid(unsafe_code)]

use kerbside_core::{VendorCategory, VendorListing};
use rstest::{fixture, rstest};

use crate::{RatingSummary, ReviewError, ReviewSet, ReviewUpdate, refresh_vendor_rating};

const VENDOR: u64 = 42;

#[fixture]
fn reviews() -> ReviewSet {
    let mut set = ReviewSet::new(VENDOR);
    set.submit(1, 5, Some("Best birria in town".into()))
        .expect("valid rating");
    set.submit(2, 3, None).expect("valid rating");
    set.submit(3, 4, None).expect("valid rating");
    set
}

#[fixture]
fn listing() -> VendorListing {
    VendorListing::new(VENDOR, "Birria Brothers", VendorCategory::FoodTruck)
}

fn assert_close(actual: f64, expected: f64) {
    #[expect(
        clippy::float_arithmetic,
        reason = "test uses float maths for assertions"
    )]
    let delta = (actual - expected).abs();
    assert!(delta < 1e-9, "expected {expected}, got {actual}");
}

#[rstest]
fn empty_summary_is_zero() {
    let summary = RatingSummary::from_ratings([]);
    assert_eq!(summary, RatingSummary::default());
}

#[rstest]
#[case(&[5, 4, 4], 4.33, 3)]
#[case(&[1, 2], 1.5, 2)]
#[case(&[5, 5, 4], 4.67, 3)]
fn average_is_rounded_to_two_decimals(
    #[case] ratings: &[u8],
    #[case] average: f64,
    #[case] count: u32,
) {
    let summary = RatingSummary::from_ratings(ratings.iter().copied());
    assert_close(summary.average_rating, average);
    assert_eq!(summary.review_count, count);
}

#[rstest]
fn trending_uses_the_rounded_average() {
    let summary = RatingSummary::from_ratings([5, 4, 4]);
    // 4.33 * 0.5 + 3 * 0.1
    assert_close(summary.trending_score, 2.465);
}

#[rstest]
fn second_submission_from_author_edits_in_place(mut reviews: ReviewSet) {
    let id = reviews.submit(2, 1, Some("Cold food".into())).expect("valid rating");
    assert_eq!(id, 2);
    assert_eq!(reviews.len(), 3);
    let edited = reviews.get(id).expect("review exists");
    assert_eq!(edited.rating, 1);
    assert_eq!(edited.body.as_deref(), Some("Cold food"));
}

#[rstest]
#[case(0)]
#[case(6)]
fn out_of_range_rating_is_rejected(mut reviews: ReviewSet, #[case] rating: u8) {
    let before = reviews.clone();
    let err = reviews.submit(9, rating, None).expect_err("rating rejected");
    assert_eq!(err, ReviewError::RatingOutOfRange { rating });
    assert_eq!(reviews, before);
}

#[rstest]
fn edit_keeps_unset_fields(mut reviews: ReviewSet) {
    reviews
        .edit(
            1,
            ReviewUpdate {
                rating: Some(2),
                body: None,
            },
        )
        .expect("edit succeeds");
    let review = reviews.get(1).expect("review exists");
    assert_eq!(review.rating, 2);
    assert_eq!(review.body.as_deref(), Some("Best birria in town"));
}

#[rstest]
fn edit_rejects_invalid_rating_without_changes(mut reviews: ReviewSet) {
    let err = reviews
        .edit(
            1,
            ReviewUpdate {
                rating: Some(9),
                body: Some("ignored".into()),
            },
        )
        .expect_err("rating rejected");
    assert_eq!(err, ReviewError::RatingOutOfRange { rating: 9 });
    assert_eq!(
        reviews.get(1).and_then(|review| review.body.as_deref()),
        Some("Best birria in town")
    );
}

#[rstest]
fn unknown_review_is_reported(mut reviews: ReviewSet) {
    let unknown = ReviewError::UnknownReview { review_id: 99 };
    assert_eq!(reviews.remove(99).expect_err("missing"), unknown);
    assert_eq!(reviews.set_hidden(99, true).expect_err("missing"), unknown);
    assert_eq!(
        reviews
            .edit(99, ReviewUpdate::default())
            .expect_err("missing"),
        unknown
    );
}

#[rstest]
fn hidden_reviews_are_excluded_from_summary(mut reviews: ReviewSet) {
    reviews.set_hidden(2, true).expect("review exists");
    let summary = reviews.summary();
    assert_eq!(summary.review_count, 2);
    assert_close(summary.average_rating, 4.5);

    reviews.set_hidden(2, false).expect("review exists");
    assert_eq!(reviews.summary().review_count, 3);
}

#[rstest]
fn removing_every_review_resets_the_cache(mut reviews: ReviewSet, mut listing: VendorListing) {
    refresh_vendor_rating(&mut listing, &reviews).expect("same vendor");
    for id in 1..=3 {
        reviews.remove(id).expect("review exists");
    }
    let summary = refresh_vendor_rating(&mut listing, &reviews).expect("same vendor");
    assert_eq!(summary, RatingSummary::default());
    assert_eq!(listing.review_count, 0);
    assert_close(listing.average_rating, 0.0);
    assert_close(listing.trending_score, 0.0);
}

#[rstest]
fn refresh_writes_cached_fields(reviews: ReviewSet, mut listing: VendorListing) {
    let summary = refresh_vendor_rating(&mut listing, &reviews).expect("same vendor");
    assert_close(listing.average_rating, 4.0);
    assert_eq!(listing.review_count, 3);
    assert_close(listing.trending_score, summary.trending_score);
    assert_close(listing.trending_score, 2.3);
}

#[rstest]
fn refresh_rejects_reviews_for_another_vendor(mut listing: VendorListing) {
    let other = ReviewSet::new(VENDOR + 1);
    let before = listing.clone();
    let err = refresh_vendor_rating(&mut listing, &other).expect_err("mismatch");
    assert_eq!(
        err,
        ReviewError::VendorMismatch {
            listing_vendor: VENDOR,
            reviews_vendor: VENDOR + 1,
        }
    );
    assert_eq!(listing, before);
}

#[rstest]
fn review_set_round_trips_through_json(reviews: ReviewSet) {
    let json = serde_json::to_string(&reviews).expect("serialise");
    let back: ReviewSet = serde_json::from_str(&json).expect("deserialise");
    assert_eq!(back, reviews);
}
