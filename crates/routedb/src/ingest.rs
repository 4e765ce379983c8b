//! RouteDb - Loading a route archive into an immutable database
//!
//! This module reads every entry of a zip archive, decodes it as a GPX document,
//! validates its structure and collects the resulting routes in archive order.

use crate::{Bounds, Result, Route, RouteDbError};

use rayon::prelude::*;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use std::io::{Cursor, Read};

/// Configuration for loading a route database
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Config {
    /// Decode GPX entries on the rayon thread pool.
    /// Routes keep archive order and the first failing entry is still the one reported.
    pub parallel: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self { parallel: true }
    }
}

/// Raw bytes of one archive entry, or the error hit while reading it
type RawEntry = Result<(String, Vec<u8>)>;

/// In-memory copy of the transport database
///
/// Built once by [`RouteDb::load`]; every query afterwards is a read-only `&self` call.
#[derive(Clone, Debug, Default)]
pub struct RouteDb {
    /// All routes, in archive order
    pub(crate) routes: Vec<Route>,
    /// Bounding box of every point, computed once at load time
    pub(crate) bounds: Bounds,
}

#[cfg_attr(feature = "profiling", profiling::all_functions)]
impl RouteDb {
    /// Load a database from the bytes of a zip archive of GPX files
    ///
    /// Loading is all-or-nothing: the first invalid entry (in archive order) aborts it.
    pub fn load(bytes: &[u8]) -> Result<Self> {
        Self::load_with_config(bytes, &Config::default())
    }

    /// Load a database with explicit configuration
    pub fn load_with_config(bytes: &[u8], config: &Config) -> Result<Self> {
        #[cfg(feature = "profiling")]
        profiling::scope!("routedb::load");

        let entries = read_entries(bytes)?;
        let entry_count = entries.len();

        // Decoding is the expensive part; entries were already read sequentially.
        let parsed: Vec<Result<Route>> = if config.parallel {
            entries
                .into_par_iter()
                .map(|entry| entry.and_then(|(file, data)| parse_entry(file, &data)))
                .collect()
        } else {
            entries
                .into_iter()
                .map(|entry| entry.and_then(|(file, data)| parse_entry(file, &data)))
                .collect()
        };

        let routes = parsed.into_iter().collect::<Result<Vec<Route>>>()?;
        let db = Self::from_routes(routes);

        tracing::info!(
            "Loaded {} routes ({} points) from {} archive entries",
            db.route_count(),
            db.total_points(),
            entry_count
        );

        Ok(db)
    }

    /// Build a database from routes that were already parsed
    pub fn from_routes(routes: Vec<Route>) -> Self {
        let bounds = Bounds::from_routes(&routes);
        Self { routes, bounds }
    }

    /// Box bounding all the points in all the routes
    #[inline]
    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    /// Number of routes
    #[inline]
    pub fn route_count(&self) -> usize {
        self.routes.len()
    }

    /// All routes, in archive order
    #[inline]
    pub fn routes(&self) -> &[Route] {
        &self.routes
    }

    /// Get a reference to a specific route by index
    #[inline]
    pub fn get_route(&self, index: usize) -> Option<&Route> {
        self.routes.get(index)
    }

    /// Total number of points across all routes
    pub fn total_points(&self) -> usize {
        self.routes.iter().map(Route::total_points).sum()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    pub(crate) fn checked_route(&self, index: usize) -> Result<&Route> {
        self.routes.get(index).ok_or(RouteDbError::OutOfRange {
            index,
            count: self.routes.len(),
        })
    }
}

/// Read every entry of the archive into memory, in archive order
///
/// A failing entry does not stop the scan, so that errors can later be reported
/// for the earliest bad entry regardless of which stage it failed in.
fn read_entries(bytes: &[u8]) -> Result<Vec<RawEntry>> {
    let mut archive = zip::ZipArchive::new(Cursor::new(bytes))?;
    let mut entries = Vec::with_capacity(archive.len());

    for index in 0..archive.len() {
        let entry = match archive.by_index(index) {
            Ok(mut zip_file) => {
                let file = zip_file.name().to_string();
                // The declared size comes from the archive; an entry never holds more
                // stored bytes than the archive itself.
                let capacity = usize::try_from(zip_file.size())
                    .map_or(bytes.len(), |size| size.min(bytes.len()));
                let mut data = Vec::with_capacity(capacity);
                match zip_file.read_to_end(&mut data) {
                    Ok(_) => Ok((file, data)),
                    Err(source) => Err(RouteDbError::Io { file, source }),
                }
            }
            Err(source) => Err(RouteDbError::Entry {
                file: format!("#{index}"),
                source,
            }),
        };
        entries.push(entry);
    }

    Ok(entries)
}

/// Decode and validate a single archive entry
fn parse_entry(file: String, data: &[u8]) -> Result<Route> {
    let gpx_data = match gpx::read(data) {
        Ok(gpx_data) => gpx_data,
        Err(source) => return Err(RouteDbError::Parse { file, source }),
    };
    let route = Route::from_gpx(file, gpx_data)?;

    tracing::debug!(
        "Ingested {} ({:?}, {} points)",
        route.file(),
        route.metadata_raw(),
        route.total_points()
    );

    Ok(route)
}
