//! Newline-delimited hostname lists.

use std::path::{Path, PathBuf};
use thiserror::Error;

/// Default list read by `add-hosts`
pub const DEFAULT_HOSTNAMES_FILE: &str = "hostnames.txt";

/// The item list could not be produced; raised before any request is made.
#[derive(Error, Debug)]
pub enum InputError {
    #[error("Failed to read {path}: {source}")]
    Unreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("No hostnames found in {0}")]
    Empty(PathBuf),
}

/// One hostname per line. Blank lines are skipped; order and duplicates are
/// kept as written.
pub fn parse_hostnames(contents: &str) -> Vec<String> {
    contents
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

pub fn read_hostnames(path: impl AsRef<Path>) -> Result<Vec<String>, InputError> {
    let path = path.as_ref();
    let contents = std::fs::read_to_string(path).map_err(|source| InputError::Unreadable {
        path: path.to_path_buf(),
        source,
    })?;

    let hostnames = parse_hostnames(&contents);
    if hostnames.is_empty() {
        return Err(InputError::Empty(path.to_path_buf()));
    }

    Ok(hostnames)
}
