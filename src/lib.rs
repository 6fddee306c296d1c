/**************************************************************************************************
 *                                           Public API
 *************************************************************************************************/
pub use crate::{
    config::{parse_time, GrabConfig},
    error::GrabError,
    grabber::{BatchReport, FailedUnit, Failure, Grabber, ListingOutcome, RetrievalOutcome},
    listing::list_objects,
    product::Product,
    progress::{ConsoleProgress, PlainProgress, ProgressEvent, ProgressSink, RenderThread},
    remote::{ListedObject, ListingPage, RemoteArchive, RemoteObject},
    s3_remote::AmazonS3NoaaBigData,
    satellite::Satellite,
    window::TimeWindow,
    worker::{retrieve, DownloadTask},
};

pub mod keyspace;
pub mod report;
/**************************************************************************************************
 *                                      Private Implementation
 *************************************************************************************************/
mod config;
mod error;
mod grabber;
mod listing;
mod product;
mod progress;
mod remote;
mod s3_remote;
mod satellite;
mod window;
mod worker;
