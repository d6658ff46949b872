//! `featured` and `favorites` commands: fixed listings without query filters.

use std::io::Write;

use camino::Utf8PathBuf;
use clap::Parser;
use geo::Coord;
use kerbside_core::{
    Clock, DEFAULT_FEATURED_LIMIT, VendorCandidate, build_vendor_index, featured, summarise,
};
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use serde::{Deserialize, Serialize};

use crate::snapshot::load_vendors;
use crate::{
    ARG_AT, ARG_LATITUDE, ARG_LONGITUDE, ARG_SNAPSHOT, CliError, ENV_FAVORITES_SNAPSHOT,
    ENV_FEATURED_SNAPSHOT, resolve_instant, resolve_origin, write_json,
};

/// CLI arguments for the `featured` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(
    long_about = "List listed vendors with featured vendors first, then by \
                 cached trending score. An origin only adds distances; it \
                 does not filter.",
    about = "List featured vendors"
)]
#[ortho_config(prefix = "KERBSIDE")]
pub(crate) struct FeaturedArgs {
    /// Path to the JSON vendor snapshot.
    #[arg(long = ARG_SNAPSHOT, value_name = "path")]
    #[serde(default)]
    pub(crate) snapshot: Option<Utf8PathBuf>,
    /// Evaluate at this RFC 3339 instant instead of now.
    #[arg(long = ARG_AT, value_name = "rfc3339")]
    #[serde(default)]
    pub(crate) at: Option<String>,
    /// Latitude used to report distances.
    #[arg(long = ARG_LATITUDE, value_name = "degrees", allow_negative_numbers = true)]
    #[serde(default)]
    pub(crate) latitude: Option<f64>,
    /// Longitude used to report distances.
    #[arg(long = ARG_LONGITUDE, value_name = "degrees", allow_negative_numbers = true)]
    #[serde(default)]
    pub(crate) longitude: Option<f64>,
    /// Number of vendors to list.
    #[arg(long, value_name = "count")]
    #[serde(default)]
    pub(crate) limit: Option<usize>,
}

impl FeaturedArgs {
    pub(crate) fn into_config(self) -> Result<FeaturedConfig, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        FeaturedConfig::try_from(merged)
    }
}

/// Resolved `featured` command configuration.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct FeaturedConfig {
    pub(crate) snapshot: Utf8PathBuf,
    pub(crate) at: Option<String>,
    pub(crate) origin: Option<Coord<f64>>,
    pub(crate) limit: usize,
}

impl TryFrom<FeaturedArgs> for FeaturedConfig {
    type Error = CliError;

    fn try_from(args: FeaturedArgs) -> Result<Self, Self::Error> {
        let snapshot = args.snapshot.ok_or(CliError::MissingArgument {
            field: ARG_SNAPSHOT,
            env: ENV_FEATURED_SNAPSHOT,
        })?;
        Ok(Self {
            snapshot,
            at: args.at,
            origin: resolve_origin(args.latitude, args.longitude)?,
            limit: args.limit.unwrap_or(DEFAULT_FEATURED_LIMIT),
        })
    }
}

pub(crate) fn run_featured(
    config: FeaturedConfig,
    clock: &dyn Clock,
    writer: &mut dyn Write,
) -> Result<(), CliError> {
    let at = resolve_instant(config.at.as_deref(), clock)?;
    let vendors = load_vendors(&config.snapshot, ARG_SNAPSHOT)?;
    let listing = featured(&vendors, config.origin, config.limit, at)?;
    write_json(writer, &listing)
}

/// CLI arguments for the `favorites` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(
    long_about = "Summarise the named vendors in the order given, as a \
                 favourites feed would, with their current open status.",
    about = "Summarise vendors by slug"
)]
#[ortho_config(prefix = "KERBSIDE")]
pub(crate) struct FavoritesArgs {
    /// Path to the JSON vendor snapshot.
    #[arg(long = ARG_SNAPSHOT, value_name = "path")]
    #[serde(default)]
    pub(crate) snapshot: Option<Utf8PathBuf>,
    /// Evaluate at this RFC 3339 instant instead of now.
    #[arg(long = ARG_AT, value_name = "rfc3339")]
    #[serde(default)]
    pub(crate) at: Option<String>,
    /// Comma-separated vendor slugs, in display order.
    #[arg(long, value_name = "slug,slug")]
    #[serde(default)]
    pub(crate) slugs: Option<String>,
}

impl FavoritesArgs {
    pub(crate) fn into_config(self) -> Result<FavoritesConfig, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        FavoritesConfig::try_from(merged)
    }
}

/// Resolved `favorites` command configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct FavoritesConfig {
    pub(crate) snapshot: Utf8PathBuf,
    pub(crate) at: Option<String>,
    pub(crate) slugs: Vec<String>,
}

impl TryFrom<FavoritesArgs> for FavoritesConfig {
    type Error = CliError;

    fn try_from(args: FavoritesArgs) -> Result<Self, Self::Error> {
        let snapshot = args.snapshot.ok_or(CliError::MissingArgument {
            field: ARG_SNAPSHOT,
            env: ENV_FAVORITES_SNAPSHOT,
        })?;
        let slugs = args
            .slugs
            .as_deref()
            .map(|slugs| {
                slugs
                    .split(',')
                    .map(str::trim)
                    .filter(|slug| !slug.is_empty())
                    .map(str::to_owned)
                    .collect()
            })
            .unwrap_or_default();
        Ok(Self {
            snapshot,
            at: args.at,
            slugs,
        })
    }
}

pub(crate) fn run_favorites(
    config: FavoritesConfig,
    clock: &dyn Clock,
    writer: &mut dyn Write,
) -> Result<(), CliError> {
    let at = resolve_instant(config.at.as_deref(), clock)?;
    let index = build_vendor_index(load_vendors(&config.snapshot, ARG_SNAPSHOT)?);
    let chosen = config
        .slugs
        .iter()
        .map(|slug| {
            index
                .by_slug(slug)
                .cloned()
                .ok_or_else(|| CliError::UnknownVendor { slug: slug.clone() })
        })
        .collect::<Result<Vec<VendorCandidate>, CliError>>()?;
    let summaries = summarise(&chosen, at)?;
    write_json(writer, &summaries)
}
