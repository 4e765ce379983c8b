//! Binding-friendly handle for mobile platforms (iOS/Android).
//!
//! Mirrors the shape mobile runtimes expect: signed 64-bit indices, byte buffers for
//! records, plain records for stops and boxes, and one flat error type carrying the
//! message. With the `ffi` feature the same items are exported through UniFFI.

use crate::{Bounds, RouteDb, RouteDbError, Stop};
use std::sync::Arc;

/// Error surfaced to Kotlin/Swift
#[derive(Debug, thiserror::Error)]
#[cfg_attr(feature = "ffi", derive(uniffi::Error))]
#[cfg_attr(feature = "ffi", uniffi(flat_error))]
pub enum MobileError {
    #[error("{0}")]
    Load(String),
    #[error("{0}")]
    NotFound(String),
    #[error("out of range")]
    OutOfRange,
}

impl From<RouteDbError> for MobileError {
    fn from(err: RouteDbError) -> Self {
        match err {
            RouteDbError::NotFound => MobileError::NotFound(err.to_string()),
            RouteDbError::OutOfRange { .. } => MobileError::OutOfRange,
            other => MobileError::Load(other.to_string()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "ffi", derive(uniffi::Record))]
pub struct MobileStop {
    pub lat: f64,
    pub lon: f64,
}

impl From<Stop> for MobileStop {
    fn from(stop: Stop) -> Self {
        Self {
            lat: stop.lat,
            lon: stop.lon,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "ffi", derive(uniffi::Record))]
pub struct MobileBox {
    pub n: f64,
    pub e: f64,
    pub s: f64,
    pub w: f64,
}

impl From<Bounds> for MobileBox {
    fn from(bounds: Bounds) -> Self {
        Self {
            n: bounds.north,
            e: bounds.east,
            s: bounds.south,
            w: bounds.west,
        }
    }
}

/// Shared, immutable database handle
#[derive(Debug)]
#[cfg_attr(feature = "ffi", derive(uniffi::Object))]
pub struct MobileRouteDb {
    inner: RouteDb,
}

impl MobileRouteDb {
    /// Borrow the wrapped database
    pub fn inner(&self) -> &RouteDb {
        &self.inner
    }

    fn index(&self, i: i64) -> Result<usize, MobileError> {
        usize::try_from(i)
            .ok()
            .filter(|&index| index < self.inner.route_count())
            .ok_or(MobileError::OutOfRange)
    }
}

#[cfg_attr(feature = "ffi", uniffi::export)]
impl MobileRouteDb {
    /// Load a routedb archive
    #[cfg_attr(feature = "ffi", uniffi::constructor)]
    pub fn load(bytes: Vec<u8>) -> Result<Arc<Self>, MobileError> {
        let inner = RouteDb::load(&bytes)?;
        Ok(Arc::new(Self { inner }))
    }

    pub fn nearest(&self, lat: f64, lon: f64) -> Result<MobileStop, MobileError> {
        Ok(self.inner.nearest(lat, lon)?.into())
    }

    pub fn bounds(&self) -> MobileBox {
        self.inner.bounds().into()
    }

    pub fn routes(&self) -> i64 {
        self.inner.route_count() as i64
    }

    pub fn route(&self, i: i64) -> Result<Vec<u8>, MobileError> {
        Ok(self.inner.route(self.index(i)?)?)
    }

    pub fn points(&self, i: i64) -> Result<Vec<u8>, MobileError> {
        Ok(self.inner.points(self.index(i)?)?)
    }
}
