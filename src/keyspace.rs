//! Translation between query parameters and bucket keys.
//!
//! Keys in the NOAA GOES buckets are laid out as
//! `<product>/<year>/<day of year>/<hour>/<filename>`, and every filename carries the scan start
//! time as `_sYYYYDDDHHMMSSt` (year, day of year, hour, minute, second, tenths of a second).
use chrono::{naive::NaiveDateTime, Datelike, Duration, NaiveDate, Timelike};

use crate::{error::GrabError, product::Product, satellite::Satellite};

const SCAN_START_MARKER: &str = "_s";
const SCAN_START_DIGITS: usize = 13;

pub fn bucket_for(sat: Satellite) -> &'static str {
    sat.bucket_name()
}

/// The key prefix holding every file of `prod` for the hour containing `valid_hour`.
pub fn hour_prefix(prod: Product, valid_hour: NaiveDateTime) -> String {
    let year = valid_hour.year();
    let day = valid_hour.ordinal();
    let hour = valid_hour.hour();

    format!("{}/{:04}/{:03}/{:02}/", prod.as_str(), year, day, hour)
}

pub fn floor_hour(time: NaiveDateTime) -> NaiveDateTime {
    time.date().and_hms_opt(time.hour(), 0, 0).unwrap_or(time)
}

/// Every hour from the one containing `start` through the one containing `end`, inclusive.
pub fn enumerate_hours(
    start: NaiveDateTime,
    end: NaiveDateTime,
) -> impl Iterator<Item = NaiveDateTime> {
    let first = floor_hour(start);
    let last = floor_hour(end);

    (0..)
        .map(move |i| first + Duration::hours(i))
        .take_while(move |time| *time <= last)
}

pub fn filename_of(key: &str) -> &str {
    match key.rfind('/') {
        Some(i) => &key[(i + 1)..],
        None => key,
    }
}

/// Parse the scan start time embedded in a GOES-R file name.
///
/// The first `_s` followed by thirteen digits is taken as the token. The trailing tenths of a
/// second digit found in real file names is not part of the result.
pub fn timestamp_of(fname: &str) -> Result<NaiveDateTime, GrabError> {
    let malformed = || GrabError::MalformedFilename(fname.to_owned());

    let digits = fname
        .match_indices(SCAN_START_MARKER)
        .map(|(i, marker)| &fname[(i + marker.len())..])
        .find_map(|rest| {
            let token = rest.get(..SCAN_START_DIGITS)?;
            if token.bytes().all(|b| b.is_ascii_digit()) {
                Some(token)
            } else {
                None
            }
        })
        .ok_or_else(malformed)?;

    // All ASCII digits by now.
    let field = |range: std::ops::Range<usize>| {
        digits[range].parse::<u32>().map_err(|_| malformed())
    };

    let year = field(0..4)? as i32;
    let day = field(4..7)?;
    let hour = field(7..9)?;
    let minute = field(9..11)?;
    let second = field(11..13)?;

    NaiveDate::from_yo_opt(year, day)
        .and_then(|date| date.and_hms_opt(hour, minute, second))
        .ok_or_else(malformed)
}

/// Encode a time the way it appears in a file name, without the tenths of a second digit.
pub fn timestamp_token(time: NaiveDateTime) -> String {
    format!("{}{}", SCAN_START_MARKER, time.format("%Y%j%H%M%S"))
}
