use clap::{Parser, Subcommand};
use routedb::Config;
use std::path::PathBuf;

#[derive(Parser, Debug, Clone)]
#[clap(author, version, about, long_about = None)]
/// routedb - Query a zipped GPX route database from the command line
pub struct Settings {
    /// Route archive (zip of GPX files)
    #[clap(short, long, value_name = "FILE", env = "ROUTEDB_ARCHIVE", global = true)]
    pub archive: Option<PathBuf>,

    /// Print results as JSON
    #[clap(long, default_value = "false", global = true)]
    pub json: bool,

    /// Decode GPX entries on a single thread
    #[clap(long, default_value = "false", global = true)]
    pub sequential: bool,

    #[clap(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Command {
    /// Route count, point count, bounds and per-route descriptions
    Info,

    /// Nearest stop to a coordinate
    Nearest {
        /// Latitude in degrees
        #[clap(long, allow_hyphen_values = true)]
        lat: f64,
        /// Longitude in degrees
        #[clap(long, allow_hyphen_values = true)]
        lon: f64,
    },

    /// Structured (FlatBuffers) record of one route
    Route {
        /// Route index
        index: usize,
        /// Write the record here instead of stdout
        #[clap(short, long, value_name = "FILE")]
        output: Option<PathBuf>,
    },

    /// Flat little-endian point records of one route
    Points {
        /// Route index
        index: usize,
        /// Write the records here instead of stdout
        #[clap(short, long, value_name = "FILE")]
        output: Option<PathBuf>,
    },
}

impl Settings {
    /// Loader configuration derived from the flags
    pub fn config(&self) -> Config {
        Config {
            parallel: !self.sequential,
        }
    }
}
