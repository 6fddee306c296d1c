use std::{env, io, path::PathBuf, process};

use chrono::naive::NaiveDateTime;
use clap::Parser;

use goes_grab::{
    parse_time, report, AmazonS3NoaaBigData, BatchReport, ConsoleProgress, GrabConfig, GrabError,
    Grabber, PlainProgress, Product, Satellite, TimeWindow,
};

/// List or download GOES-R files from the NOAA open data buckets on AWS.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    #[arg(short, long, action = clap::ArgAction::Count, help = "Increase debug level (use -d for info, -dd for debug, -ddd for trace)")]
    debug: u8,

    /// goes16, goes17 or goes18
    #[arg(long, default_value = "goes16")]
    satellite: Satellite,

    /// scan start of the first file, YYYY-MM-DD[THH:MM:SS]
    #[arg(long, value_parser = parse_time, default_value = "2022-08-01T18:00:00")]
    start_time: NaiveDateTime,

    /// scan start of the last file, inclusive
    #[arg(long, value_parser = parse_time, default_value = "2022-08-01T19:00:00")]
    end_time: NaiveDateTime,

    /// number of listings and downloads to run at once
    #[arg(long, default_value_t = 1)]
    parallel_downloads: usize,

    /// only list the matching files (the default)
    #[arg(long)]
    dry_run: bool,

    /// download the matching files into --dest-dir
    #[arg(long, conflicts_with = "dry_run")]
    no_dry_run: bool,

    /// print file names instead of drawing progress bars
    #[arg(long)]
    no_progress_bar: bool,

    /// restrict to these products, may be repeated (default: all of them)
    #[arg(long = "product")]
    products: Vec<Product>,

    #[arg(long, default_value = ".")]
    dest_dir: PathBuf,
}

fn main() {
    let args = Args::parse();

    match args.debug {
        0 => {}
        1 => env::set_var("RUST_LOG", "info"),
        2 => env::set_var("RUST_LOG", "debug"),
        _ => env::set_var("RUST_LOG", "trace"),
    }
    env_logger::init();

    let config = match build_config(&args) {
        Ok(config) => config,
        Err(err) => {
            log::error!("error: {}", err);
            eprintln!("{}", err);
            process::exit(1);
        }
    };

    let remote = match AmazonS3NoaaBigData::connect() {
        Ok(remote) => remote,
        Err(err) => {
            log::error!("error: {}", err);
            eprintln!("{}", err);
            process::exit(1);
        }
    };

    println!("{}", report::banner(&config));

    let grabber = Grabber::connect(remote, config);
    let batch = run(&grabber);

    let stdout = io::stdout();
    if let Err(err) = report::write_report(&batch, &mut stdout.lock()) {
        log::error!("Error writing report: {}", err);
    }
}

fn build_config(args: &Args) -> Result<GrabConfig, GrabError> {
    let window = TimeWindow::new(args.start_time, args.end_time)?;

    let mut config = GrabConfig::new(args.satellite, window)
        .with_parallel_downloads(args.parallel_downloads)
        .with_dry_run(args.dry_run || !args.no_dry_run)
        .with_dest_dir(&args.dest_dir)
        .with_progress_bars(!args.no_progress_bar);

    if !args.products.is_empty() {
        config = config.with_products(args.products.clone());
    }

    Ok(config)
}

fn run(grabber: &Grabber<AmazonS3NoaaBigData>) -> BatchReport {
    let config = grabber.config();
    if config.dry_run || !config.progress_bars {
        return grabber.run(PlainProgress);
    }

    match ConsoleProgress::start() {
        Ok((progress, renderer)) => {
            let batch = grabber.run(progress);
            renderer.wait();
            batch
        }
        Err(err) => {
            log::warn!("No progress display: {}", err);
            grabber.run(PlainProgress)
        }
    }
}
