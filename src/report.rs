use std::io::{self, Write};

use crate::{config::GrabConfig, grabber::BatchReport, remote::RemoteObject};

/// One file name per line.
pub fn write_listing<W: Write>(objects: &[RemoteObject], out: &mut W) -> io::Result<()> {
    for obj in objects {
        writeln!(out, "{}", obj.filename())?;
    }
    Ok(())
}

pub fn banner(config: &GrabConfig) -> String {
    let verb = if config.dry_run { "Listing" } else { "Downloading" };
    format!("{} {} files from {}", verb, config.satellite, config.window)
}

/// The dry run listing if there is one, every failure, then a final tally.
pub fn write_report<W: Write>(report: &BatchReport, out: &mut W) -> io::Result<()> {
    if report.config.dry_run {
        write_listing(&report.objects, out)?;
    }

    for failure in &report.failures {
        writeln!(out, "'{}' generated an exception: {}", failure.unit, failure.error)?;
    }

    let num_listing_failures = report.listing_failures().count();
    let num_download_failures = report.download_failures().count();

    if report.config.dry_run {
        writeln!(
            out,
            "Listed {} files from {} products, {} product listing(s) failed",
            report.objects.len(),
            report.config.products.len(),
            num_listing_failures
        )?;
    } else {
        writeln!(
            out,
            "Retrieved {} of {} files, {} download(s) failed, {} product listing(s) failed",
            report.retrieved.len(),
            report.objects.len(),
            num_download_failures,
            num_listing_failures
        )?;
    }

    Ok(())
}
