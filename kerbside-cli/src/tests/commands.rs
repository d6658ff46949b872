//! End-to-end command tests driving `dispatch` against snapshot files.

use super::helpers::{SnapshotDir, lunchtime_clock, output_json, sample_vendors};
use super::*;
use kerbside_scorer::ReviewSet;
use rstest::{fixture, rstest};

#[fixture]
fn snapshot() -> (SnapshotDir, String) {
    let dir = SnapshotDir::new();
    let path = dir.write_vendors(&sample_vendors());
    (dir, path.into_string())
}

fn run_cli(argv: &[&str]) -> Result<serde_json::Value, CliError> {
    let cli = Cli::try_parse_from(argv)?;
    let mut buffer = Vec::new();
    dispatch(cli.command, &lunchtime_clock(), &mut buffer)?;
    Ok(output_json(&buffer))
}

#[rstest]
fn status_reports_open_vendor(snapshot: (SnapshotDir, String)) {
    let (_dir, path) = snapshot;
    let output = run_cli(&["kerbside", "status", "taco-loco", "--snapshot", &path])
        .expect("status succeeds");
    assert_eq!(output["is_open"], true);
    assert_eq!(output["open_status_label"], "Open · Closes 3:00 PM");
    assert_eq!(output["closes_at"], "15:00");
    assert_eq!(output["weekly_schedule"].as_array().map(Vec::len), Some(7));
}

#[rstest]
fn status_honours_explicit_instant(snapshot: (SnapshotDir, String)) {
    let (_dir, path) = snapshot;
    let output = run_cli(&[
        "kerbside",
        "status",
        "night-owl-noodles",
        "--snapshot",
        &path,
        "--at",
        "2024-01-08T19:00:00-06:00",
    ])
    .expect("status succeeds");
    assert_eq!(output["is_open"], true);
    assert_eq!(output["open_status_label"], "Open · Closes 11:00 PM");
}

#[rstest]
fn status_for_unknown_slug_errors(snapshot: (SnapshotDir, String)) {
    let (_dir, path) = snapshot;
    let err = run_cli(&["kerbside", "status", "ghost-kitchen", "--snapshot", &path])
        .expect_err("unknown slug");
    match err {
        CliError::UnknownVendor { slug } => assert_eq!(slug, "ghost-kitchen"),
        other => panic!("expected UnknownVendor, found {other:?}"),
    }
}

#[rstest]
fn schedule_checks_day_and_time(snapshot: (SnapshotDir, String)) {
    let (_dir, path) = snapshot;
    let output = run_cli(&[
        "kerbside",
        "schedule",
        "taco-loco",
        "--snapshot",
        &path,
        "--day",
        "1",
        "--time",
        "12:30",
    ])
    .expect("schedule succeeds");
    assert_eq!(output["check"]["day"], "Tuesday");
    assert_eq!(output["check"]["is_open"], true);
    assert_eq!(output["weekly_schedule"][2]["closed"], true);
}

#[rstest]
fn schedule_without_check_omits_it(snapshot: (SnapshotDir, String)) {
    let (_dir, path) = snapshot;
    let output = run_cli(&["kerbside", "schedule", "taco-loco", "--snapshot", &path])
        .expect("schedule succeeds");
    assert!(output.get("check").is_none());
    assert_eq!(output["timezone"], "America/Chicago");
}

#[rstest]
fn search_filters_open_vendors(snapshot: (SnapshotDir, String)) {
    let (_dir, path) = snapshot;
    let output = run_cli(&[
        "kerbside",
        "search",
        "--snapshot",
        &path,
        "--open-now",
        "true",
        "--latitude",
        "41.8781",
        "--longitude",
        "-87.6298",
    ])
    .expect("search succeeds");
    let results = output.as_array().expect("array of summaries");
    assert_eq!(results.len(), 1);
    assert_eq!(results[0]["slug"], "taco-loco");
    assert_eq!(results[0]["distance_miles"], 0.0);
}

#[rstest]
fn search_rejects_invalid_query(snapshot: (SnapshotDir, String)) {
    let (_dir, path) = snapshot;
    let err = run_cli(&["kerbside", "search", "--snapshot", &path, "--limit", "0"])
        .expect_err("zero limit");
    assert!(matches!(err, CliError::Search(_)), "unexpected error {err:?}");
}

#[rstest]
fn featured_lists_featured_vendor_first(snapshot: (SnapshotDir, String)) {
    let (_dir, path) = snapshot;
    let output =
        run_cli(&["kerbside", "featured", "--snapshot", &path]).expect("featured succeeds");
    let slugs: Vec<_> = output
        .as_array()
        .expect("array of summaries")
        .iter()
        .map(|summary| summary["slug"].clone())
        .collect();
    assert_eq!(slugs, vec!["night-owl-noodles", "taco-loco"]);
}

#[rstest]
fn favorites_keep_requested_order(snapshot: (SnapshotDir, String)) {
    let (_dir, path) = snapshot;
    let output = run_cli(&[
        "kerbside",
        "favorites",
        "--snapshot",
        &path,
        "--slugs",
        "pending-pierogi,taco-loco",
    ])
    .expect("favorites succeed");
    let results = output.as_array().expect("array of summaries");
    assert_eq!(results.len(), 2);
    assert_eq!(results[0]["slug"], "pending-pierogi");
    assert_eq!(results[0]["is_open"], true);
    assert!(results[0]["distance_miles"].is_null());
    assert_eq!(results[1]["slug"], "taco-loco");
}

#[rstest]
fn ratings_refresh_cached_fields(snapshot: (SnapshotDir, String)) {
    let (dir, path) = snapshot;
    let mut reviews = ReviewSet::new(1);
    reviews.submit(10, 5, None).expect("valid rating");
    reviews.submit(11, 2, None).expect("valid rating");
    let orphan = ReviewSet::new(99);
    let reviews_path = dir.write_reviews(&[reviews, orphan]);

    let output = run_cli(&[
        "kerbside",
        "ratings",
        "--snapshot",
        &path,
        "--reviews",
        reviews_path.as_str(),
    ])
    .expect("ratings succeed");
    let vendors = output.as_array().expect("array of vendors");
    assert_eq!(vendors.len(), 3);
    assert_eq!(vendors[0]["average_rating"], 3.5);
    assert_eq!(vendors[0]["review_count"], 2);
    let trending = vendors[0]["trending_score"].as_f64().expect("numeric score");
    assert!((trending - 1.95).abs() < 1e-9, "unexpected trending score {trending}");
    assert_eq!(vendors[1]["review_count"], 5);
}

#[rstest]
fn missing_snapshot_file_is_reported() {
    let dir = SnapshotDir::new();
    let missing = dir.path("absent.json");
    let err = run_cli(&["kerbside", "featured", "--snapshot", missing.as_str()])
        .expect_err("missing snapshot");
    assert!(matches!(err, CliError::MissingSourceFile { .. }), "unexpected error {err:?}");
}
