use std::io::Write;

use crate::{
    error::GrabError,
    remote::{ListedObject, ListingPage, RemoteArchive},
    satellite::Satellite,
};
use s3::{bucket::Bucket, creds::Credentials, region::Region};

/// Anonymous, read only access to the NOAA GOES buckets on AWS.
#[derive(Debug, Clone)]
pub struct AmazonS3NoaaBigData {
    bucket_g16: Box<Bucket>,
    bucket_g17: Box<Bucket>,
    bucket_g18: Box<Bucket>,
}

impl AmazonS3NoaaBigData {
    pub fn connect() -> Result<Self, GrabError> {
        let credentials =
            Credentials::anonymous().map_err(|err| GrabError::Remote(err.to_string()))?;

        let open = |sat: Satellite| -> Result<Box<Bucket>, GrabError> {
            let bucket = Bucket::new(sat.bucket_name(), Region::UsEast1, credentials.clone())
                .map_err(|err| GrabError::Remote(err.to_string()))?;
            log::debug!("Opened bucket {}", sat.bucket_name());
            Ok(bucket.into())
        };

        Ok(AmazonS3NoaaBigData {
            bucket_g16: open(Satellite::GOES16)?,
            bucket_g17: open(Satellite::GOES17)?,
            bucket_g18: open(Satellite::GOES18)?,
        })
    }

    fn get_bucket(&self, sat: Satellite) -> &Bucket {
        match sat {
            Satellite::GOES16 => &*self.bucket_g16,
            Satellite::GOES17 => &*self.bucket_g17,
            Satellite::GOES18 => &*self.bucket_g18,
        }
    }
}

impl RemoteArchive for AmazonS3NoaaBigData {
    fn list_page(
        &self,
        sat: Satellite,
        prefix: &str,
        continuation: Option<String>,
    ) -> Result<ListingPage, GrabError> {
        let bucket = self.get_bucket(sat);

        let (page, code) = bucket
            .list_page(prefix.to_owned(), None, continuation, None, None)
            .map_err(|err| GrabError::Remote(err.to_string()))?;

        if code != 200 {
            return Err(GrabError::Remote(format!(
                "listing {} in {} returned status {}",
                prefix,
                sat.bucket_name(),
                code
            )));
        }

        let objects = page
            .contents
            .into_iter()
            .map(|obj| ListedObject {
                key: obj.key,
                size: obj.size,
            })
            .collect();

        let continuation = if page.is_truncated {
            page.next_continuation_token
        } else {
            None
        };

        Ok(ListingPage {
            objects,
            continuation,
        })
    }

    fn download<W: Write + Send>(
        &self,
        sat: Satellite,
        key: &str,
        sink: &mut W,
    ) -> Result<(), GrabError> {
        let bucket = self.get_bucket(sat);

        let code = bucket
            .get_object_to_writer(key, sink)
            .map_err(|err| GrabError::Remote(err.to_string()))?;

        if code != 200 {
            return Err(GrabError::Remote(format!("download returned status {}", code)));
        }

        Ok(())
    }
}
