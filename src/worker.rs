use std::{
    fs::{self, File},
    io::{BufWriter, Write},
    path::{Path, PathBuf},
};

use crate::{
    error::GrabError,
    progress::{ProgressSink, ProgressWriter},
    remote::{RemoteArchive, RemoteObject},
    satellite::Satellite,
};

/// One object on its way to a local file.
pub struct DownloadTask<'a, P> {
    object: &'a RemoteObject,
    destination: PathBuf,
    progress: P,
}

impl<'a, P: ProgressSink> DownloadTask<'a, P> {
    /// The file lands directly in `dest_dir` under its base name.
    pub fn new(object: &'a RemoteObject, dest_dir: &Path, progress: P) -> Self {
        Self {
            object,
            destination: dest_dir.join(object.filename()),
            progress,
        }
    }

    pub fn run<RA: RemoteArchive>(
        self,
        remote: &RA,
        sat: Satellite,
    ) -> Result<PathBuf, GrabError> {
        let fname = self.object.filename();

        self.progress.begin(fname, self.object.size());
        let transferred = self.transfer(remote, sat);
        self.progress.complete(fname);

        let actual = transferred
            .and_then(|()| {
                fs::metadata(&self.destination)
                    .map_err(|err| GrabError::io(&self.destination, err))
            })
            .map_err(|err| GrabError::Transfer {
                key: self.object.key().to_owned(),
                source: Box::new(err),
            })?
            .len();

        if actual != self.object.size() {
            log::error!(
                "Size mismatch for {:?}: expected {} found {}",
                self.destination,
                self.object.size(),
                actual
            );
            return Err(GrabError::SizeMismatch {
                filename: fname.to_owned(),
                expected: self.object.size(),
                actual,
            });
        }

        log::debug!("Saved {:?}", self.destination);
        self.progress.println(fname);

        Ok(self.destination)
    }

    fn transfer<RA: RemoteArchive>(&self, remote: &RA, sat: Satellite) -> Result<(), GrabError> {
        let f = File::create(&self.destination)
            .map_err(|err| GrabError::io(&self.destination, err))?;

        let mut writer = ProgressWriter::new(
            BufWriter::new(f),
            self.object.filename(),
            &self.progress,
        );

        remote.download(sat, self.object.key(), &mut writer)?;

        writer
            .flush()
            .map_err(|err| GrabError::io(&self.destination, err))
    }
}

/// Download `object` into `dest_dir`, checking the local size against the listing.
pub fn retrieve<RA, P>(
    remote: &RA,
    sat: Satellite,
    object: &RemoteObject,
    dest_dir: &Path,
    progress: P,
) -> Result<PathBuf, GrabError>
where
    RA: RemoteArchive,
    P: ProgressSink,
{
    DownloadTask::new(object, dest_dir, progress).run(remote, sat)
}
