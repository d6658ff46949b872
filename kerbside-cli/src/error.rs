//! Error types emitted by the Kerbside CLI.
//!
//! Keep this error type reasonably small, as many CLI helpers return
//! `Result<_, CliError>` and the workspace enables `clippy::result_large_err`.

use std::sync::Arc;

use camino::Utf8PathBuf;
use kerbside_core::{
    AvailabilityError, ParseSortKeyError, ParseVendorCategoryError, SearchError, WallClockError,
};
use kerbside_scorer::ReviewError;
use thiserror::Error;

/// Errors emitted by the Kerbside CLI.
#[derive(Debug, Error)]
pub enum CliError {
    /// Provided arguments failed Clap validation.
    #[error(transparent)]
    ArgumentParsing(#[from] clap::Error),
    /// Configuration layering failed (files, env, CLI).
    #[error("failed to load configuration: {0}")]
    Configuration(#[from] Arc<ortho_config::OrthoError>),
    /// A required option is missing after configuration merging.
    #[error("missing {field} (set --{field} or {env})")]
    MissingArgument {
        /// Flag name without leading dashes.
        field: &'static str,
        /// Environment variable that can supply the value.
        env: &'static str,
    },
    /// A referenced input path does not exist on disk.
    #[error("{field} path {path:?} does not exist")]
    MissingSourceFile {
        /// Flag naming the input.
        field: &'static str,
        /// Path that was checked.
        path: Utf8PathBuf,
    },
    /// A referenced input path exists but is not a file.
    #[error("{field} path {path:?} exists but is not a file")]
    SourcePathNotFile {
        /// Flag naming the input.
        field: &'static str,
        /// Path that was checked.
        path: Utf8PathBuf,
    },
    /// Opening an input file failed.
    #[error("failed to open {field} at {path:?}: {source}")]
    OpenSource {
        /// Flag naming the input.
        field: &'static str,
        /// Path that could not be opened.
        path: Utf8PathBuf,
        /// Source error from std I/O.
        #[source]
        source: std::io::Error,
    },
    /// An input file held malformed JSON.
    #[error("failed to parse {field} JSON at {path:?}: {source}")]
    ParseSource {
        /// Flag naming the input.
        field: &'static str,
        /// Path of the malformed file.
        path: Utf8PathBuf,
        /// Source error from `serde_json`.
        #[source]
        source: serde_json::Error,
    },
    /// `--at` was not an RFC 3339 instant.
    #[error("invalid --at instant '{value}': {source}")]
    InvalidInstant {
        /// Rejected input.
        value: String,
        /// Source error from `chrono`.
        #[source]
        source: chrono::ParseError,
    },
    /// Only one of latitude and longitude was supplied.
    #[error("--latitude and --longitude must be given together")]
    IncompleteOrigin,
    /// `--day` was outside `0..=6`.
    #[error("day {day} is out of range (expected 0 = Monday through 6 = Sunday)")]
    DayOutOfRange {
        /// Rejected day index.
        day: u8,
    },
    /// A wall-clock option was malformed.
    #[error(transparent)]
    InvalidTime(#[from] WallClockError),
    /// `--category` named no known category.
    #[error(transparent)]
    InvalidCategory(#[from] ParseVendorCategoryError),
    /// `--sort` named no known ordering.
    #[error(transparent)]
    InvalidSort(#[from] ParseSortKeyError),
    /// No vendor in the snapshot carries the requested slug.
    #[error("no vendor with slug '{slug}' in the snapshot")]
    UnknownVendor {
        /// Requested slug.
        slug: String,
    },
    /// Open-status resolution failed.
    #[error(transparent)]
    Availability(#[from] AvailabilityError),
    /// The search pipeline rejected the query or a vendor.
    #[error(transparent)]
    Search(#[from] SearchError),
    /// Refreshing a cached rating failed.
    #[error(transparent)]
    Review(#[from] ReviewError),
    /// Serialising command output failed.
    #[error("failed to serialise output: {0}")]
    SerialiseOutput(#[source] serde_json::Error),
    /// Writing command output failed.
    #[error("failed to write output: {0}")]
    WriteOutput(#[source] std::io::Error),
}
