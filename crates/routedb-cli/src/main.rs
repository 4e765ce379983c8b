mod logging;
mod report;
mod settings;

use anyhow::Context;
use clap::Parser;
use routedb::RouteDb;
use settings::{Command, Settings};
use std::io::Write;
use std::path::Path;

fn main() {
    logging::setup_logging();

    let settings = Settings::parse();
    if let Err(err) = run(&settings) {
        tracing::error!("{:#}", err);
        std::process::exit(1);
    }
}

fn run(settings: &Settings) -> anyhow::Result<()> {
    let archive = settings
        .archive
        .as_deref()
        .context("No archive given (use --archive or ROUTEDB_ARCHIVE)")?;
    let db = load(archive, settings)?;

    match &settings.command {
        Command::Info => {
            let info = report::DbReport::new(&db);
            if settings.json {
                println!("{}", serde_json::to_string_pretty(&info)?);
            } else {
                print!("{info}");
            }
        }
        Command::Nearest { lat, lon } => {
            let found = db.nearest_match(*lat, *lon)?;
            let report = report::NearestReport::new(&db, found);
            if settings.json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                println!("{report}");
            }
        }
        Command::Route { index, output } => {
            write_record(&db.route(*index)?, output.as_deref())?;
        }
        Command::Points { index, output } => {
            write_record(&db.points(*index)?, output.as_deref())?;
        }
    }

    Ok(())
}

fn load(path: &Path, settings: &Settings) -> anyhow::Result<RouteDb> {
    let bytes =
        std::fs::read(path).with_context(|| format!("Failed to read {}", path.display()))?;
    tracing::debug!("Read {} bytes from {}", bytes.len(), path.display());

    RouteDb::load_with_config(&bytes, &settings.config())
        .with_context(|| format!("Failed to load {}", path.display()))
}

fn write_record(bytes: &[u8], output: Option<&Path>) -> anyhow::Result<()> {
    match output {
        Some(path) => {
            std::fs::write(path, bytes)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            tracing::info!("Wrote {} bytes to {}", bytes.len(), path.display());
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(bytes)?;
            stdout.flush()?;
        }
    }
    Ok(())
}
