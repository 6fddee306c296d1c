#![allow(dead_code)]

use std::{
    collections::HashSet,
    io::Write,
    sync::{
        atomic::{AtomicUsize, Ordering},
        Arc, Mutex,
    },
};

use chrono::{naive::NaiveDateTime, Duration, NaiveDate};
use goes_grab::{
    keyspace, GrabError, ListedObject, ListingPage, ProgressEvent, ProgressSink, RemoteArchive,
    Satellite,
};

pub const CHUNK: usize = 1000;

pub fn at(hour: u32, minute: u32, second: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2022, 8, 1)
        .unwrap()
        .and_hms_opt(hour, minute, second)
        .unwrap()
}

fn stamp(time: NaiveDateTime, tenths: u32) -> String {
    format!("{}{}", &keyspace::timestamp_token(time)[2..], tenths)
}

/// Mesoscale radiances: two sectors, sixteen channels, one scan a minute, M2 thirty seconds
/// behind M1.
pub fn radm_hour(hour: u32) -> Vec<ListedObject> {
    let mut objects = vec![];
    for minute in 0..60 {
        for (sector, second) in [("M1", 25), ("M2", 55)] {
            for channel in 1..=16 {
                let start = at(hour, minute, second);
                let end = start + Duration::seconds(57);
                let key = format!(
                    "ABI-L1b-RadM/2022/213/{:02}/OR_ABI-L1b-Rad{}-M6C{:02}_G16_s{}_e{}_c{}.nc",
                    hour,
                    sector,
                    channel,
                    stamp(start, 0),
                    stamp(end, 7),
                    stamp(end + Duration::seconds(4), 6)
                );
                objects.push(ListedObject {
                    key,
                    size: 100_000 + channel as u64,
                });
            }
        }
    }
    objects
}

/// Lightning files, one every twenty seconds.
pub fn lcfa_hour(hour: u32) -> Vec<ListedObject> {
    (0..180)
        .map(|i| {
            let start = at(hour, 0, 0) + Duration::seconds(20 * i);
            let end = start + Duration::seconds(20);
            ListedObject {
                key: format!(
                    "GLM-L2-LCFA/2022/213/{:02}/OR_GLM-L2-LCFA_G16_s{}_e{}_c{}.nc",
                    hour,
                    stamp(start, 0),
                    stamp(end, 0),
                    stamp(end + Duration::seconds(2), 1)
                ),
                size: 2_500 + i as u64,
            }
        })
        .collect()
}

/// CONUS radiances for channel 13, one every five minutes.
pub fn radc_hour(hour: u32) -> Vec<ListedObject> {
    (0..12)
        .map(|i| {
            let start = at(hour, 1, 17) + Duration::minutes(5 * i);
            let end = start + Duration::seconds(172);
            ListedObject {
                key: format!(
                    "ABI-L1b-RadC/2022/213/{:02}/OR_ABI-L1b-RadC-M6C13_G16_s{}_e{}_c{}.nc",
                    hour,
                    stamp(start, 0),
                    stamp(end, 4),
                    stamp(end + Duration::seconds(25), 2)
                ),
                size: 3_000_000 + i as u64,
            }
        })
        .collect()
}

#[derive(Default)]
pub struct MockData {
    pub satellite: Option<Satellite>,
    pub objects: Vec<ListedObject>,
    pub page_size: usize,
    pub failing_prefixes: Vec<String>,
    pub failing_downloads: HashSet<String>,
    pub short_downloads: HashSet<String>,
}

/// An in memory bucket serving `objects` a page at a time.
#[derive(Clone)]
pub struct MockArchive {
    data: Arc<MockData>,
    pub list_calls: Arc<AtomicUsize>,
    pub download_calls: Arc<AtomicUsize>,
}

impl MockArchive {
    pub fn new(data: MockData) -> Self {
        Self {
            data: Arc::new(data),
            list_calls: Arc::new(AtomicUsize::new(0)),
            download_calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn with_objects(objects: Vec<ListedObject>) -> Self {
        Self::new(MockData {
            satellite: Some(Satellite::GOES16),
            objects,
            page_size: 1000,
            ..MockData::default()
        })
    }

    pub fn list_calls(&self) -> usize {
        self.list_calls.load(Ordering::SeqCst)
    }

    pub fn download_calls(&self) -> usize {
        self.download_calls.load(Ordering::SeqCst)
    }

    fn find(&self, key: &str) -> Option<&ListedObject> {
        self.data.objects.iter().find(|obj| obj.key == key)
    }
}

impl RemoteArchive for MockArchive {
    fn list_page(
        &self,
        sat: Satellite,
        prefix: &str,
        continuation: Option<String>,
    ) -> Result<ListingPage, GrabError> {
        self.list_calls.fetch_add(1, Ordering::SeqCst);

        if self.data.failing_prefixes.iter().any(|p| prefix.starts_with(p)) {
            return Err(GrabError::Remote(format!("503 Slow Down listing {}", prefix)));
        }

        if self.data.satellite != Some(sat) {
            return Ok(ListingPage::default());
        }

        let matching: Vec<_> = self
            .data
            .objects
            .iter()
            .filter(|obj| obj.key.starts_with(prefix))
            .collect();

        let start: usize = continuation.map(|t| t.parse().unwrap()).unwrap_or(0);
        let end = (start + self.data.page_size).min(matching.len());

        Ok(ListingPage {
            objects: matching[start..end].iter().map(|obj| (*obj).clone()).collect(),
            continuation: if end < matching.len() {
                Some(end.to_string())
            } else {
                None
            },
        })
    }

    fn download<W: Write + Send>(
        &self,
        _sat: Satellite,
        key: &str,
        sink: &mut W,
    ) -> Result<(), GrabError> {
        self.download_calls.fetch_add(1, Ordering::SeqCst);

        if self.data.failing_downloads.contains(key) {
            return Err(GrabError::Remote("connection reset by peer".to_owned()));
        }

        let obj = self
            .find(key)
            .ok_or_else(|| GrabError::Remote(format!("404 NoSuchKey {}", key)))?;

        let mut size = obj.size as usize;
        if self.data.short_downloads.contains(key) {
            size /= 2;
        }

        let body = vec![7u8; size];
        for chunk in body.chunks(CHUNK) {
            sink.write_all(chunk).map_err(|err| GrabError::Remote(err.to_string()))?;
        }

        Ok(())
    }
}

/// Keeps every progress call for later inspection.
#[derive(Clone, Default)]
pub struct Recorder(pub Arc<Mutex<Vec<ProgressEvent>>>);

impl Recorder {
    pub fn events(&self) -> Vec<ProgressEvent> {
        self.0.lock().unwrap().clone()
    }

    pub fn advanced(&self, task: &str) -> u64 {
        self.events()
            .iter()
            .map(|ev| match ev {
                ProgressEvent::Advance { task: t, bytes } if t == task => *bytes,
                _ => 0,
            })
            .sum()
    }

    pub fn count(&self, pred: impl Fn(&ProgressEvent) -> bool) -> usize {
        self.events().iter().filter(|ev| pred(ev)).count()
    }
}

impl ProgressSink for Recorder {
    fn begin(&self, task: &str, total: u64) {
        self.0.lock().unwrap().push(ProgressEvent::Begin {
            task: task.to_owned(),
            total,
        });
    }

    fn advance(&self, task: &str, bytes: u64) {
        self.0.lock().unwrap().push(ProgressEvent::Advance {
            task: task.to_owned(),
            bytes,
        });
    }

    fn complete(&self, task: &str) {
        self.0.lock().unwrap().push(ProgressEvent::Complete {
            task: task.to_owned(),
        });
    }

    fn println(&self, line: &str) {
        self.0
            .lock()
            .unwrap()
            .push(ProgressEvent::Println(line.to_owned()));
    }
}
