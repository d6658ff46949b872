//! Loading JSON vendor and review snapshots from disk.

use std::io::{self, BufReader};

use camino::Utf8Path;
use cap_std::{ambient_authority, fs_utf8};
use kerbside_core::VendorCandidate;
use kerbside_scorer::ReviewSet;
use serde::de::DeserializeOwned;

use crate::CliError;

/// Check that `path` names an existing regular file.
pub(crate) fn require_existing(path: &Utf8Path, field: &'static str) -> Result<(), CliError> {
    match file_is_file(path) {
        Ok(true) => Ok(()),
        Ok(false) => Err(CliError::SourcePathNotFile {
            field,
            path: path.to_path_buf(),
        }),
        Err(source) if source.kind() == io::ErrorKind::NotFound => {
            Err(CliError::MissingSourceFile {
                field,
                path: path.to_path_buf(),
            })
        }
        Err(source) => Err(CliError::OpenSource {
            field,
            path: path.to_path_buf(),
            source,
        }),
    }
}

/// Read a JSON array of vendors with their schedules.
pub(crate) fn load_vendors(
    path: &Utf8Path,
    field: &'static str,
) -> Result<Vec<VendorCandidate>, CliError> {
    let vendors: Vec<VendorCandidate> = load_json(path, field)?;
    log::debug!("loaded {} vendors from {path}", vendors.len());
    Ok(vendors)
}

/// Read a JSON array of per-vendor review sets.
pub(crate) fn load_reviews(
    path: &Utf8Path,
    field: &'static str,
) -> Result<Vec<ReviewSet>, CliError> {
    let reviews: Vec<ReviewSet> = load_json(path, field)?;
    log::debug!("loaded reviews for {} vendors from {path}", reviews.len());
    Ok(reviews)
}

fn load_json<T: DeserializeOwned>(path: &Utf8Path, field: &'static str) -> Result<T, CliError> {
    require_existing(path, field)?;
    let file = fs_utf8::File::open_ambient(path, ambient_authority()).map_err(|source| {
        CliError::OpenSource {
            field,
            path: path.to_path_buf(),
            source,
        }
    })?;
    serde_json::from_reader(BufReader::new(file)).map_err(|source| CliError::ParseSource {
        field,
        path: path.to_path_buf(),
        source,
    })
}

fn file_is_file(path: &Utf8Path) -> io::Result<bool> {
    let parent = match path.parent() {
        Some(parent) if !parent.as_str().is_empty() => parent,
        _ => Utf8Path::new("."),
    };
    let name = path
        .file_name()
        .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, "path has no file name"))?;
    let dir = fs_utf8::Dir::open_ambient_dir(parent, ambient_authority())?;
    dir.metadata(name).map(|meta| meta.is_file())
}
