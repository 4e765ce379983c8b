//! RouteDb - In-memory database of transport network routes
//!
//! This library loads a zip archive of GPX tracks (one route per file) into an immutable
//! in-memory database and answers the queries mobile clients need: nearest stop, overall
//! bounds, and compact binary encodings of individual routes.
//!
//! # Architecture
//!
//! - **[`RouteDb`]**: Owns all routes and the cached bounding box, built once by [`RouteDb::load`]
//! - **[`Route`]**: One validated GPX track with its `country-city-name` metadata
//! - **[`Bounds`]**: Smallest lat/lon rectangle containing every point
//! - **[`encode`]**: FlatBuffers and flat little-endian route encodings
//! - **[`mobile`]**: Thin handle with a binding-friendly API shape (UniFFI with `ffi`)
//!
//! # Performance Characteristics
//!
//! - **Load**: O(N) over all points, GPX decoding optionally parallel
//! - **Nearest**: O(N) linear scan per query, no index
//! - **Encode**: O(P) for the P points of the selected route

mod bounds;
pub mod encode;
mod ingest;
pub mod mobile;
mod nearest;
mod route;
pub mod schema;

#[cfg(test)]
pub(crate) mod testutil;

// Public API exports
pub use bounds::Bounds;
pub use ingest::{Config, RouteDb};
pub use nearest::{NearestMatch, Stop};
pub use route::{GeoCoordinate, Route, RouteInfo};

#[cfg(feature = "ffi")]
uniffi::setup_scaffolding!();

/// Which structural count of a track document was wrong
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StructureKind {
    Track,
    Segment,
}

impl std::fmt::Display for StructureKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StructureKind::Track => write!(f, "track"),
            StructureKind::Segment => write!(f, "track segment"),
        }
    }
}

/// Error types for loading and querying a route database
#[derive(Debug, thiserror::Error)]
pub enum RouteDbError {
    #[error("Failed to open archive: {0}")]
    Archive(#[from] zip::result::ZipError),

    #[error("Failed to read file {file}: {source}")]
    Entry {
        file: String,
        #[source]
        source: zip::result::ZipError,
    },

    #[error("Failed to read file {file}: {source}")]
    Io {
        file: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse {file}: {source}")]
    Parse {
        file: String,
        #[source]
        source: gpx::errors::GpxError,
    },

    #[error("In file {file} expected {expected} {kind}, found {found}")]
    Structure {
        file: String,
        kind: StructureKind,
        expected: usize,
        found: usize,
    },

    #[error("No stop found matching criteria")]
    NotFound,

    #[error("Route index {index} out of range (route count {count})")]
    OutOfRange { index: usize, count: usize },

    #[error("Invalid route record: {0}")]
    Decode(#[from] flatbuffers::InvalidFlatbuffer),

    #[error("Point record length {len} is not a multiple of 16")]
    Truncated { len: usize },
}

pub type Result<T> = std::result::Result<T, RouteDbError>;
