use std::path::PathBuf;

use chrono::NaiveDateTime;
use thiserror::Error;

use crate::product::Product;

#[derive(Debug, Error)]
pub enum GrabError {
    #[error("no scan start time in file name: {0}")]
    MalformedFilename(String),

    #[error("invalid time window: end {end} is before start {start}")]
    InvalidWindow {
        start: NaiveDateTime,
        end: NaiveDateTime,
    },

    #[error("unrecognized time: {0}")]
    InvalidTime(String),

    #[error("remote archive error: {0}")]
    Remote(String),

    #[error("listing {product} failed: {source}")]
    Listing {
        product: Product,
        #[source]
        source: Box<GrabError>,
    },

    #[error("transfer of {key} failed: {source}")]
    Transfer {
        key: String,
        #[source]
        source: Box<GrabError>,
    },

    #[error("size mismatch for {filename}: expected {expected} bytes, found {actual}")]
    SizeMismatch {
        filename: String,
        expected: u64,
        actual: u64,
    },

    #[error("I/O error on {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("could not start the {name} thread: {source}")]
    Spawn {
        name: &'static str,
        #[source]
        source: std::io::Error,
    },

    #[error("worker thread died before reporting a result")]
    WorkerPanicked,
}

impl GrabError {
    pub(crate) fn io<P: Into<PathBuf>>(path: P, source: std::io::Error) -> Self {
        GrabError::Io {
            path: path.into(),
            source,
        }
    }
}
