use log::{error, info, LevelFilter};
use serde::Serialize;
use std::env;
use std::error::Error;
use std::fs::File;
use std::path::Path;
use stundenplan_libs::{Config, Report, ScheduleStore, Variant};

fn setup_logger() -> Result<(), fern::InitError> {
    let level = env::var("STUNDENPLAN_LOG")
        .ok()
        .and_then(|level| level.parse().ok())
        .unwrap_or(LevelFilter::Info);

    fern::Dispatch::new()
        .format(|out, message, record| {
            out.finish(format_args!(
                "[{}][{}] {}",
                record.target(),
                record.level(),
                message
            ))
        })
        .level(level)
        .chain(std::io::stderr())
        .apply()?;

    Ok(())
}

fn print_report<B: Serialize>(report: &Report<B>) -> Result<(), serde_json::Error> {
    println!("{}", serde_json::to_string_pretty(report)?);
    Ok(())
}

/// Usage: stundenplan <schedule.csv>...
///
/// Each file is uploaded as one user, named after the file stem. Files that
/// fail to parse are reported and skipped; the rest are still aggregated.
fn main() -> Result<(), Box<dyn Error>> {
    setup_logger()?;

    let config = Config::from_env()?;
    let normalizer = config.normalizer();
    let store = ScheduleStore::new();

    for path in env::args().skip(1) {
        let username = Path::new(&path)
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.clone());

        let uploaded = File::open(&path)
            .map_err(Box::<dyn Error>::from)
            .and_then(|file| Ok(store.upload(file, &username, &normalizer)?));

        match uploaded {
            Ok(user_id) => info!("Uploaded {} as user {}", path, user_id),
            Err(err) => error!("Could not upload {}: {}", path, err),
        }
    }

    match config.variant {
        Variant::Coarse => print_report(&store.report(&config.slice_aggregator()))?,
        Variant::Exact => print_report(&store.report(&config.minute_aggregator()))?,
    }

    Ok(())
}
