//! `search` command: filter, rank and page a vendor snapshot.

use std::io::Write;

use camino::Utf8PathBuf;
use clap::Parser;
use kerbside_core::{
    Clock, DEFAULT_LIMIT, SearchQuery, SortKey, VendorCategory, build_vendor_index, search_store,
};
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use serde::{Deserialize, Serialize};

use crate::snapshot::load_vendors;
use crate::{
    ARG_AT, ARG_LATITUDE, ARG_LONGITUDE, ARG_SNAPSHOT, CliError, ENV_SEARCH_SNAPSHOT,
    resolve_instant, resolve_origin, write_json,
};

/// CLI arguments for the `search` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(
    long_about = "Search a vendor snapshot. Text, category and tag filters \
                 apply first, then the radius around the origin, then the \
                 open-status filters; results are ranked by --sort and paged \
                 with --limit and --offset.",
    about = "Search vendors"
)]
#[ortho_config(prefix = "KERBSIDE")]
pub(crate) struct SearchArgs {
    /// Path to the JSON vendor snapshot.
    #[arg(long = ARG_SNAPSHOT, value_name = "path")]
    #[serde(default)]
    pub(crate) snapshot: Option<Utf8PathBuf>,
    /// Evaluate at this RFC 3339 instant instead of now.
    #[arg(long = ARG_AT, value_name = "rfc3339")]
    #[serde(default)]
    pub(crate) at: Option<String>,
    /// Case-insensitive text matched against name, description and city.
    #[arg(long, value_name = "text")]
    #[serde(default)]
    pub(crate) text: Option<String>,
    /// Category such as `food_truck` or `market_stall`.
    #[arg(long, value_name = "category")]
    #[serde(default)]
    pub(crate) category: Option<String>,
    /// Comma-separated tags; vendors with any of them match.
    #[arg(long, value_name = "tag,tag")]
    #[serde(default)]
    pub(crate) tags: Option<String>,
    /// `true` keeps open vendors, `false` keeps closed ones.
    #[arg(long, value_name = "bool")]
    #[serde(default)]
    pub(crate) open_now: Option<bool>,
    /// Day index for the open-at filter, `0 = Monday`.
    #[arg(long, value_name = "index")]
    #[serde(default)]
    pub(crate) open_day: Option<u8>,
    /// `HH:MM` time for the open-at filter.
    #[arg(long, value_name = "HH:MM")]
    #[serde(default)]
    pub(crate) open_time: Option<String>,
    /// Latitude of the search centre.
    #[arg(long = ARG_LATITUDE, value_name = "degrees", allow_negative_numbers = true)]
    #[serde(default)]
    pub(crate) latitude: Option<f64>,
    /// Longitude of the search centre.
    #[arg(long = ARG_LONGITUDE, value_name = "degrees", allow_negative_numbers = true)]
    #[serde(default)]
    pub(crate) longitude: Option<f64>,
    /// Radius in miles around the centre.
    #[arg(long, value_name = "miles")]
    #[serde(default)]
    pub(crate) radius: Option<f64>,
    /// Ordering: trending, rating, distance or newest.
    #[arg(long, value_name = "key")]
    #[serde(default)]
    pub(crate) sort: Option<String>,
    /// Page size.
    #[arg(long, value_name = "count")]
    #[serde(default)]
    pub(crate) limit: Option<usize>,
    /// Results to skip before the page.
    #[arg(long, value_name = "count")]
    #[serde(default)]
    pub(crate) offset: Option<usize>,
}

impl SearchArgs {
    pub(crate) fn into_config(self) -> Result<SearchConfig, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        SearchConfig::try_from(merged)
    }
}

/// Resolved `search` command configuration.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct SearchConfig {
    pub(crate) snapshot: Utf8PathBuf,
    pub(crate) at: Option<String>,
    pub(crate) query: SearchQuery,
}

impl TryFrom<SearchArgs> for SearchConfig {
    type Error = CliError;

    fn try_from(args: SearchArgs) -> Result<Self, Self::Error> {
        let snapshot = args.snapshot.ok_or(CliError::MissingArgument {
            field: ARG_SNAPSHOT,
            env: ENV_SEARCH_SNAPSHOT,
        })?;
        let category = args
            .category
            .as_deref()
            .map(str::parse::<VendorCategory>)
            .transpose()?;
        let sort = args
            .sort
            .as_deref()
            .map(str::parse::<SortKey>)
            .transpose()?
            .unwrap_or_default();
        let tags = args
            .tags
            .as_deref()
            .map(|tags| tags.split(',').map(str::to_owned).collect())
            .unwrap_or_default();

        let query = SearchQuery {
            text: args.text,
            category,
            tags,
            open_now: args.open_now,
            open_day: args.open_day,
            open_time: args.open_time,
            origin: resolve_origin(args.latitude, args.longitude)?,
            radius_miles: args.radius,
            sort,
            limit: args.limit.unwrap_or(DEFAULT_LIMIT),
            offset: args.offset.unwrap_or(0),
        };
        Ok(Self {
            snapshot,
            at: args.at,
            query,
        })
    }
}

pub(crate) fn run_search(
    config: SearchConfig,
    clock: &dyn Clock,
    writer: &mut dyn Write,
) -> Result<(), CliError> {
    let at = resolve_instant(config.at.as_deref(), clock)?;
    let index = build_vendor_index(load_vendors(&config.snapshot, ARG_SNAPSHOT)?);
    let results = search_store(&index, &config.query, at)?;
    log::info!(
        "{} of {} vendors matched (sort: {})",
        results.len(),
        index.len(),
        config.query.sort
    );
    write_json(writer, &results)
}
