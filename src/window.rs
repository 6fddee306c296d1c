use std::fmt::{Display, Formatter};

use chrono::naive::NaiveDateTime;

use crate::{error::GrabError, keyspace};

/// A closed range of scan start times, in UTC.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TimeWindow {
    start: NaiveDateTime,
    end: NaiveDateTime,
}

impl TimeWindow {
    pub fn new(start: NaiveDateTime, end: NaiveDateTime) -> Result<Self, GrabError> {
        if end < start {
            log::error!("End before start: start - {} end - {}", start, end);
            return Err(GrabError::InvalidWindow { start, end });
        }

        Ok(Self { start, end })
    }

    pub fn start(&self) -> NaiveDateTime {
        self.start
    }

    pub fn end(&self) -> NaiveDateTime {
        self.end
    }

    /// Both ends are inclusive.
    pub fn contains(&self, time: NaiveDateTime) -> bool {
        self.start <= time && time <= self.end
    }

    /// The top of every hour whose key prefix may hold files in this window.
    pub fn hours(&self) -> impl Iterator<Item = NaiveDateTime> {
        keyspace::enumerate_hours(self.start, self.end)
    }
}

impl Display for TimeWindow {
    fn fmt(&self, f: &mut Formatter) -> Result<(), std::fmt::Error> {
        write!(f, "{} to {}", self.start, self.end)
    }
}
