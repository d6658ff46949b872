//! `ratings` command: refresh cached rating figures from a review snapshot.

use std::io::Write;

use camino::Utf8PathBuf;
use clap::Parser;
use kerbside_scorer::refresh_vendor_rating;
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use serde::{Deserialize, Serialize};

use crate::snapshot::{load_reviews, load_vendors};
use crate::{
    ARG_REVIEWS, ARG_SNAPSHOT, CliError, ENV_RATINGS_REVIEWS, ENV_RATINGS_SNAPSHOT, write_json,
};

/// CLI arguments for the `ratings` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(
    long_about = "Recompute each vendor's cached average rating, review \
                 count and trending score from a JSON review snapshot and \
                 print the updated vendor snapshot. Vendors without a review \
                 set are left untouched.",
    about = "Refresh cached vendor ratings"
)]
#[ortho_config(prefix = "KERBSIDE")]
pub(crate) struct RatingsArgs {
    /// Path to the JSON vendor snapshot.
    #[arg(long = ARG_SNAPSHOT, value_name = "path")]
    #[serde(default)]
    pub(crate) snapshot: Option<Utf8PathBuf>,
    /// Path to the JSON review snapshot.
    #[arg(long = ARG_REVIEWS, value_name = "path")]
    #[serde(default)]
    pub(crate) reviews: Option<Utf8PathBuf>,
}

impl RatingsArgs {
    pub(crate) fn into_config(self) -> Result<RatingsConfig, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        RatingsConfig::try_from(merged)
    }
}

/// Resolved `ratings` command configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct RatingsConfig {
    pub(crate) snapshot: Utf8PathBuf,
    pub(crate) reviews: Utf8PathBuf,
}

impl TryFrom<RatingsArgs> for RatingsConfig {
    type Error = CliError;

    fn try_from(args: RatingsArgs) -> Result<Self, Self::Error> {
        let snapshot = args.snapshot.ok_or(CliError::MissingArgument {
            field: ARG_SNAPSHOT,
            env: ENV_RATINGS_SNAPSHOT,
        })?;
        let reviews = args.reviews.ok_or(CliError::MissingArgument {
            field: ARG_REVIEWS,
            env: ENV_RATINGS_REVIEWS,
        })?;
        Ok(Self { snapshot, reviews })
    }
}

pub(crate) fn run_ratings(config: &RatingsConfig, writer: &mut dyn Write) -> Result<(), CliError> {
    let mut vendors = load_vendors(&config.snapshot, ARG_SNAPSHOT)?;
    let review_sets = load_reviews(&config.reviews, ARG_REVIEWS)?;

    for reviews in &review_sets {
        let Some(vendor) = vendors
            .iter_mut()
            .find(|vendor| vendor.listing.id == reviews.vendor_id())
        else {
            log::warn!(
                "skipping {} reviews for vendor {} missing from the snapshot",
                reviews.len(),
                reviews.vendor_id()
            );
            continue;
        };
        refresh_vendor_rating(&mut vendor.listing, reviews)?;
    }
    write_json(writer, &vendors)
}
