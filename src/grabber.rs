use std::{collections::HashSet, fmt::Display, path::PathBuf};

use crate::{
    config::GrabConfig,
    error::GrabError,
    listing,
    product::Product,
    progress::ProgressSink,
    remote::{RemoteArchive, RemoteObject},
    worker,
};
use crossbeam_channel::unbounded;
use threadpool::ThreadPool;

/// The unit of work a failure is charged to.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FailedUnit {
    Product(Product),
    Object(String),
}

impl Display for FailedUnit {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> Result<(), std::fmt::Error> {
        match self {
            FailedUnit::Product(prod) => write!(f, "{}", prod),
            FailedUnit::Object(key) => write!(f, "{}", key),
        }
    }
}

#[derive(Debug)]
pub struct Failure {
    pub unit: FailedUnit,
    pub error: GrabError,
}

#[derive(Debug, Default)]
pub struct ListingOutcome {
    pub objects: Vec<RemoteObject>,
    pub failures: Vec<Failure>,
}

#[derive(Debug, Default)]
pub struct RetrievalOutcome {
    pub retrieved: Vec<PathBuf>,
    pub failures: Vec<Failure>,
}

/// Everything that happened during one [`Grabber::run`].
#[derive(Debug)]
pub struct BatchReport {
    pub config: GrabConfig,
    pub objects: Vec<RemoteObject>,
    pub retrieved: Vec<PathBuf>,
    pub failures: Vec<Failure>,
}

impl BatchReport {
    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }

    pub fn listing_failures(&self) -> impl Iterator<Item = &Failure> {
        self.failures
            .iter()
            .filter(|f| matches!(f.unit, FailedUnit::Product(_)))
    }

    pub fn download_failures(&self) -> impl Iterator<Item = &Failure> {
        self.failures
            .iter()
            .filter(|f| matches!(f.unit, FailedUnit::Object(_)))
    }
}

/// Lists and downloads one satellite's files for a time window.
///
/// Listing fans out one job per product and downloading one job per file, each over a pool of
/// `config.pool_size()` threads. A failed job is recorded and never stops its siblings.
pub struct Grabber<T: RemoteArchive> {
    remote: T,
    config: GrabConfig,
}

impl<RA: 'static> Grabber<RA>
where
    RA: RemoteArchive + Clone + Send,
{
    pub fn connect(remote: RA, config: GrabConfig) -> Self {
        log::info!(
            "Grabbing {} files from {} with {} thread(s)",
            config.satellite,
            config.window,
            config.pool_size()
        );
        Self { remote, config }
    }

    pub fn config(&self) -> &GrabConfig {
        &self.config
    }

    /// List every product, then download everything found unless this is a dry run.
    pub fn run<P: ProgressSink>(&self, progress: P) -> BatchReport {
        let ListingOutcome {
            objects,
            mut failures,
        } = self.list_all();

        let retrieved = if self.config.dry_run {
            log::info!("Dry run, skipping download of {} files", objects.len());
            vec![]
        } else {
            let outcome = self.retrieve_all(&objects, progress);
            failures.extend(outcome.failures);
            outcome.retrieved
        };

        BatchReport {
            config: self.config.clone(),
            objects,
            retrieved,
            failures,
        }
    }

    pub fn list_all(&self) -> ListingOutcome {
        let pool = ThreadPool::with_name("Listing Thread".to_owned(), self.config.pool_size());
        let (to_gatherer, results) = unbounded();

        for &prod in &self.config.products {
            let remote = self.remote.clone();
            let to_gatherer = to_gatherer.clone();
            let sat = self.config.satellite;
            let window = self.config.window;

            pool.execute(move || {
                let res = listing::list_objects(&remote, sat, prod, &window);
                if to_gatherer.send((prod, res)).is_err() {
                    log::error!("Listing results for {} had nowhere to go", prod);
                }
            });
        }
        drop(to_gatherer);

        let mut outcome = ListingOutcome::default();
        let mut pending: HashSet<Product> = self.config.products.iter().copied().collect();

        for (prod, res) in results {
            pending.remove(&prod);
            match res {
                Ok(objs) => outcome.objects.extend(objs),
                Err(err) => {
                    log::error!("{} generated an exception: {}", prod, err);
                    outcome.failures.push(Failure {
                        unit: FailedUnit::Product(prod),
                        error: err,
                    });
                }
            }
        }

        pool.join();
        Self::account_for_panics(&pool, pending, FailedUnit::Product, &mut outcome.failures);

        outcome
    }

    pub fn retrieve_all<P: ProgressSink>(
        &self,
        objects: &[RemoteObject],
        progress: P,
    ) -> RetrievalOutcome {
        let pool = ThreadPool::with_name("Download Thread".to_owned(), self.config.pool_size());
        let (to_gatherer, results) = unbounded();

        for obj in objects {
            let remote = self.remote.clone();
            let to_gatherer = to_gatherer.clone();
            let progress = progress.clone();
            let sat = self.config.satellite;
            let dest_dir = self.config.dest_dir.clone();
            let obj = obj.clone();

            pool.execute(move || {
                log::info!("Downloading {}", obj.key());
                let res = worker::retrieve(&remote, sat, &obj, &dest_dir, progress);
                if to_gatherer.send((obj.key().to_owned(), res)).is_err() {
                    log::error!("Download result for {} had nowhere to go", obj.key());
                }
            });
        }
        drop(to_gatherer);
        drop(progress);

        let mut outcome = RetrievalOutcome::default();
        let mut pending: HashSet<String> = objects.iter().map(|o| o.key().to_owned()).collect();

        for (key, res) in results {
            pending.remove(&key);
            match res {
                Ok(pth) => outcome.retrieved.push(pth),
                Err(err) => {
                    log::error!("{} generated an exception: {}", key, err);
                    outcome.failures.push(Failure {
                        unit: FailedUnit::Object(key),
                        error: err,
                    });
                }
            }
        }

        pool.join();
        Self::account_for_panics(&pool, pending, FailedUnit::Object, &mut outcome.failures);

        outcome
    }
}

// Private methods and associated functions.

impl<RA: 'static> Grabber<RA>
where
    RA: RemoteArchive + Clone + Send,
{
    fn account_for_panics<U, F>(
        pool: &ThreadPool,
        pending: HashSet<U>,
        to_unit: F,
        failures: &mut Vec<Failure>,
    ) where
        F: Fn(U) -> FailedUnit,
    {
        if pending.is_empty() {
            return;
        }

        log::error!(
            "{} job(s) never reported, {} worker panic(s)",
            pending.len(),
            pool.panic_count()
        );

        failures.extend(pending.into_iter().map(|u| Failure {
            unit: to_unit(u),
            error: GrabError::WorkerPanicked,
        }));
    }
}
