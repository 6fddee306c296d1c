use std::io::Write;

use crate::{error::GrabError, keyspace, satellite::Satellite};
use chrono::naive::NaiveDateTime;

/// One key as reported by the remote listing.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ListedObject {
    pub key: String,
    pub size: u64,
}

/// A single page of a listing, with the token for the next page if there is one.
#[derive(Clone, Debug, Default)]
pub struct ListingPage {
    pub objects: Vec<ListedObject>,
    pub continuation: Option<String>,
}

/// The storage service holding the satellite archive.
///
/// Implementations are cloned into every worker thread, so a clone should be cheap and share
/// nothing that needs locking.
pub trait RemoteArchive: Clone + Send + 'static {
    fn list_page(
        &self,
        sat: Satellite,
        prefix: &str,
        continuation: Option<String>,
    ) -> Result<ListingPage, GrabError>;

    fn download<W: Write + Send>(
        &self,
        sat: Satellite,
        key: &str,
        sink: &mut W,
    ) -> Result<(), GrabError>;
}

/// A file found in the archive with its scan start time.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RemoteObject {
    key: String,
    size: u64,
    start_time: NaiveDateTime,
}

impl RemoteObject {
    pub fn from_listing(listed: ListedObject) -> Result<Self, GrabError> {
        let start_time = keyspace::timestamp_of(keyspace::filename_of(&listed.key))?;

        Ok(Self {
            key: listed.key,
            size: listed.size,
            start_time,
        })
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn size(&self) -> u64 {
        self.size
    }

    pub fn start_time(&self) -> NaiveDateTime {
        self.start_time
    }

    pub fn filename(&self) -> &str {
        keyspace::filename_of(&self.key)
    }
}
