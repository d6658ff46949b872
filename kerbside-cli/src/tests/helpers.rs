//! Test helpers for writing vendor and review snapshots to disk.

use camino::{Utf8Path, Utf8PathBuf};
use chrono::{DateTime, TimeZone, Utc};
use kerbside_core::test_support::VendorBuilder;
use kerbside_core::{FixedClock, VendorCandidate};
use kerbside_scorer::ReviewSet;
use tempfile::TempDir;

/// Monday 2024-01-08 13:00 in Chicago.
pub(super) fn monday_lunchtime() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, 8, 19, 0, 0)
        .single()
        .expect("valid instant")
}

pub(super) fn lunchtime_clock() -> FixedClock {
    FixedClock::new(monday_lunchtime())
}

/// Three Chicago vendors: open, closed for the day and unlisted.
pub(super) fn sample_vendors() -> Vec<VendorCandidate> {
    vec![
        VendorBuilder::new(1, "Taco Loco")
            .located(41.8781, -87.6298)
            .city("Chicago")
            .tags(&["tacos", "vegan"])
            .rating(4.5, 20)
            .trending(3.5)
            .hours(0, "11:00", "15:00")
            .hours(1, "11:00", "15:00")
            .build(),
        VendorBuilder::new(2, "Night Owl Noodles")
            .located(41.8827, -87.6233)
            .city("Chicago")
            .tags(&["noodles"])
            .rating(4.8, 5)
            .trending(2.9)
            .featured()
            .hours(0, "18:00", "23:00")
            .build(),
        VendorBuilder::new(3, "Pending Pierogi")
            .status(kerbside_core::VendorStatus::Pending)
            .located(41.8800, -87.6300)
            .hours(0, "09:00", "17:00")
            .build(),
    ]
}

pub(super) struct SnapshotDir {
    _dir: TempDir,
    root: Utf8PathBuf,
}

impl SnapshotDir {
    pub(super) fn new() -> Self {
        let dir = TempDir::new().expect("tempdir");
        let root = Utf8PathBuf::from_path_buf(dir.path().to_path_buf()).expect("utf-8 workspace");
        Self { _dir: dir, root }
    }

    pub(super) fn path(&self, name: &str) -> Utf8PathBuf {
        self.root.join(name)
    }

    pub(super) fn write_vendors(&self, vendors: &[VendorCandidate]) -> Utf8PathBuf {
        let path = self.path("vendors.json");
        let payload = serde_json::to_vec(vendors).expect("serialise vendors");
        write_utf8(&path, &payload);
        path
    }

    pub(super) fn write_reviews(&self, reviews: &[ReviewSet]) -> Utf8PathBuf {
        let path = self.path("reviews.json");
        let payload = serde_json::to_vec(reviews).expect("serialise reviews");
        write_utf8(&path, &payload);
        path
    }
}

pub(super) fn write_utf8(path: &Utf8Path, contents: &[u8]) {
    std::fs::write(path.as_std_path(), contents).expect("write file");
}

pub(super) fn output_json(buffer: &[u8]) -> serde_json::Value {
    serde_json::from_slice(buffer).expect("command output is JSON")
}
