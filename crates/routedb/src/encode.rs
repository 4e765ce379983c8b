//! Binary route encodings
//!
//! Two independent formats for downstream clients:
//!
//! - **Structured**: a FlatBuffers `Route` table (see `schema/route.fbs`) with the
//!   country, city and name strings plus the path as 32-bit micro-degree pairs.
//! - **Flat**: consecutive `(lat, lon)` pairs of little-endian `i64` micro-degrees,
//!   16 bytes per point with no header. The record count is `len / 16`.
//!
//! The structured path rounds to the nearest micro-degree, the flat stream truncates
//! toward zero.

use crate::route::{MICRO_DEGREES, to_micro_degrees};
use crate::schema::{self, GeoPoint, RouteArgs};
use crate::{Result, Route, RouteDb, RouteDbError, RouteInfo};

/// Size of one record in the flat encoding
pub const POINT_RECORD_SIZE: usize = 16;

#[cfg_attr(feature = "profiling", profiling::all_functions)]
impl RouteDb {
    /// Parsed description of the selected route
    pub fn route_info(&self, index: usize) -> Result<RouteInfo> {
        Ok(self.checked_route(index)?.info().clone())
    }

    /// Structured (FlatBuffers) record of the selected route
    pub fn route(&self, index: usize) -> Result<Vec<u8>> {
        Ok(encode_route(self.checked_route(index)?))
    }

    /// Flat record stream with the path of the selected route
    pub fn points(&self, index: usize) -> Result<Vec<u8>> {
        Ok(encode_points(self.checked_route(index)?))
    }
}

/// Micro-degrees as a 32-bit integer; the float-to-int cast saturates
#[inline]
fn to_micro_degrees_i32(degrees: f64) -> i32 {
    (degrees * MICRO_DEGREES).round() as i32
}

/// Encode a route as a finished FlatBuffers `Route` table
pub fn encode_route(route: &Route) -> Vec<u8> {
    #[cfg(feature = "profiling")]
    profiling::scope!("encode::route");

    let path: Vec<GeoPoint> = route
        .points()
        .iter()
        .map(|point| {
            GeoPoint::new(
                to_micro_degrees_i32(point.lat),
                to_micro_degrees_i32(point.lon),
            )
        })
        .collect();

    // Table header, strings, vector and vtable all land in one buffer.
    let capacity = 64 + route.metadata_raw().len() + path.len() * size_of::<GeoPoint>();
    let mut fbb = flatbuffers::FlatBufferBuilder::with_capacity(capacity);

    let country = fbb.create_string(route.country());
    let city = fbb.create_string(route.city());
    let name = fbb.create_string(route.name());
    let path = fbb.create_vector(&path);

    let root = schema::Route::create(
        &mut fbb,
        &RouteArgs {
            country: Some(country),
            city: Some(city),
            name: Some(name),
            path: Some(path),
        },
    );
    schema::finish_route_buffer(&mut fbb, root);

    fbb.finished_data().to_vec()
}

/// Encode the path of a route as flat little-endian `i64` pairs
pub fn encode_points(route: &Route) -> Vec<u8> {
    #[cfg(feature = "profiling")]
    profiling::scope!("encode::points");

    let mut out = Vec::with_capacity(route.total_points() * POINT_RECORD_SIZE);
    for point in route.points() {
        out.extend_from_slice(&to_micro_degrees(point.lat).to_le_bytes());
        out.extend_from_slice(&to_micro_degrees(point.lon).to_le_bytes());
    }
    out
}

/// Verify a structured record and return a view of its root table
pub fn decode_route(buf: &[u8]) -> Result<schema::Route<'_>> {
    Ok(schema::root_as_route(buf)?)
}

/// Split a flat record stream back into `(lat, lon)` micro-degree pairs
pub fn decode_points(buf: &[u8]) -> Result<Vec<(i64, i64)>> {
    if buf.len() % POINT_RECORD_SIZE != 0 {
        return Err(RouteDbError::Truncated { len: buf.len() });
    }

    Ok(buf
        .chunks_exact(POINT_RECORD_SIZE)
        .map(|record| {
            let mut lat = [0u8; 8];
            let mut lon = [0u8; 8];
            lat.copy_from_slice(&record[..8]);
            lon.copy_from_slice(&record[8..]);
            (i64::from_le_bytes(lat), i64::from_le_bytes(lon))
        })
        .collect())
}
