use std::{collections::HashSet, path::PathBuf};

use chrono::{naive::NaiveDateTime, NaiveDate};

use crate::{error::GrabError, product::Product, satellite::Satellite, window::TimeWindow};

const TIME_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S"];
const DATE_FORMAT: &str = "%Y-%m-%d";

/// Everything a single grab needs to know.
#[derive(Clone, Debug)]
pub struct GrabConfig {
    pub satellite: Satellite,
    pub window: TimeWindow,
    pub products: Vec<Product>,
    pub parallel_downloads: usize,
    pub dry_run: bool,
    pub dest_dir: PathBuf,
    pub progress_bars: bool,
}

impl Default for GrabConfig {
    fn default() -> Self {
        Self {
            satellite: Satellite::default(),
            window: default_window(),
            products: Product::all(),
            parallel_downloads: 1,
            dry_run: true,
            dest_dir: PathBuf::from("."),
            progress_bars: true,
        }
    }
}

impl GrabConfig {
    pub fn new(satellite: Satellite, window: TimeWindow) -> Self {
        Self {
            satellite,
            window,
            ..Self::default()
        }
    }

    /// Repeated products are dropped, keeping the first occurrence.
    pub fn with_products(mut self, products: Vec<Product>) -> Self {
        let mut seen = HashSet::new();
        self.products = products.into_iter().filter(|p| seen.insert(*p)).collect();
        self
    }

    pub fn with_parallel_downloads(mut self, parallel_downloads: usize) -> Self {
        self.parallel_downloads = parallel_downloads;
        self
    }

    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    pub fn with_dest_dir<P: Into<PathBuf>>(mut self, dest_dir: P) -> Self {
        self.dest_dir = dest_dir.into();
        self
    }

    pub fn with_progress_bars(mut self, progress_bars: bool) -> Self {
        self.progress_bars = progress_bars;
        self
    }

    /// Number of worker threads in each fan out, never less than one.
    pub fn pool_size(&self) -> usize {
        self.parallel_downloads.max(1)
    }
}

fn default_window() -> TimeWindow {
    let start = NaiveDate::from_ymd_opt(2022, 8, 1)
        .and_then(|d| d.and_hms_opt(18, 0, 0))
        .expect("constant date is valid");
    let end = start + chrono::Duration::hours(1);

    TimeWindow::new(start, end).expect("one hour window is ordered")
}

/// Parse a time given as `YYYY-MM-DD`, `YYYY-MM-DDTHH:MM:SS` or `YYYY-MM-DD HH:MM:SS`.
pub fn parse_time(s: &str) -> Result<NaiveDateTime, GrabError> {
    let s = s.trim();

    if let Some(time) = TIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
    {
        return Ok(time);
    }

    NaiveDate::parse_from_str(s, DATE_FORMAT)
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .ok_or_else(|| GrabError::InvalidTime(s.to_owned()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = GrabConfig::default();
        assert_eq!(config.satellite, Satellite::GOES16);
        assert_eq!(config.window.start().to_string(), "2022-08-01 18:00:00");
        assert_eq!(config.window.end().to_string(), "2022-08-01 19:00:00");
        assert_eq!(config.products.len(), 17);
        assert_eq!(config.pool_size(), 1);
        assert!(config.dry_run);
        assert_eq!(config.dest_dir, PathBuf::from("."));
    }

    #[test]
    fn pool_is_at_least_one() {
        let config = GrabConfig::default().with_parallel_downloads(0);
        assert_eq!(config.pool_size(), 1);

        let config = config.with_parallel_downloads(8);
        assert_eq!(config.pool_size(), 8);
    }

    #[test]
    fn repeated_products_are_listed_once() {
        let config = GrabConfig::default().with_products(vec![
            Product::LCFA,
            Product::RadC,
            Product::LCFA,
            Product::RadC,
            Product::SFXR,
        ]);
        assert_eq!(
            config.products,
            vec![Product::LCFA, Product::RadC, Product::SFXR]
        );
    }

    #[test]
    fn parses_accepted_formats() {
        let expected = NaiveDate::from_ymd_opt(2022, 8, 1)
            .unwrap()
            .and_hms_opt(18, 15, 0)
            .unwrap();
        assert_eq!(parse_time("2022-08-01T18:15:00").unwrap(), expected);
        assert_eq!(parse_time("2022-08-01 18:15:00").unwrap(), expected);
        assert_eq!(
            parse_time("2022-08-01").unwrap(),
            NaiveDate::from_ymd_opt(2022, 8, 1)
                .unwrap()
                .and_hms_opt(0, 0, 0)
                .unwrap()
        );
    }

    #[test]
    fn rejects_other_formats() {
        for s in ["08/01/2022", "2022-08-01T25:00:00", "yesterday", ""] {
            assert!(matches!(parse_time(s), Err(GrabError::InvalidTime(_))));
        }
    }
}
