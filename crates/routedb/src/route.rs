//! Route storage and parsing module
//!
//! This module provides the `Route` struct for storing one validated GPX track,
//! along with the `country-city-name` description parsed from its metadata.

use crate::{Result, RouteDbError, StructureKind};

/// Scale from degrees to micro-degree fixed point
pub const MICRO_DEGREES: f64 = 1e6;

/// A geographic position in degrees, stored exactly as read from the GPX file
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GeoCoordinate {
    pub lat: f64,
    pub lon: f64,
}

impl GeoCoordinate {
    #[inline]
    pub fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }

    /// Convert to a `geo::Point` (x = longitude, y = latitude)
    #[inline]
    pub fn to_point(self) -> geo::Point<f64> {
        geo::Point::new(self.lon, self.lat)
    }
}

impl From<&gpx::Waypoint> for GeoCoordinate {
    fn from(waypoint: &gpx::Waypoint) -> Self {
        let point = waypoint.point();
        Self::new(point.y(), point.x())
    }
}

/// Route description parsed from metadata of the form `kg-osh-101`
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RouteInfo {
    pub country: String,
    pub city: String,
    pub name: String,
}

impl RouteInfo {
    /// Split on the first two `-` only, so the name keeps any further hyphens.
    /// Input with fewer than three parts leaves every field empty.
    pub fn parse(raw: &str) -> Self {
        let mut parts = raw.splitn(3, '-');
        match (parts.next(), parts.next(), parts.next()) {
            (Some(country), Some(city), Some(name)) => Self {
                country: country.to_string(),
                city: city.to_string(),
                name: name.to_string(),
            },
            _ => Self::default(),
        }
    }
}

/// A single ingested GPX track
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Route {
    /// Archive entry this route was read from
    file: String,
    /// Metadata name as found in the GPX document
    metadata_raw: String,
    /// Parsed `country-city-name` description
    info: RouteInfo,
    /// Path points in on-disk order
    points: Vec<GeoCoordinate>,
}

#[cfg_attr(feature = "profiling", profiling::all_functions)]
impl Route {
    /// Create a route from raw parts
    pub fn new(
        file: impl Into<String>,
        metadata_raw: impl Into<String>,
        points: Vec<GeoCoordinate>,
    ) -> Self {
        let metadata_raw = metadata_raw.into();
        let info = RouteInfo::parse(&metadata_raw);
        Self {
            file: file.into(),
            metadata_raw,
            info,
            points,
        }
    }

    /// Build a route from a parsed GPX document
    ///
    /// The document must hold exactly one track with exactly one segment.
    pub fn from_gpx(file: impl Into<String>, gpx_data: gpx::Gpx) -> Result<Self> {
        let file = file.into();

        let track = match gpx_data.tracks.as_slice() {
            [track] => track,
            tracks => {
                return Err(RouteDbError::Structure {
                    file,
                    kind: StructureKind::Track,
                    expected: 1,
                    found: tracks.len(),
                });
            }
        };
        let segment = match track.segments.as_slice() {
            [segment] => segment,
            segments => {
                return Err(RouteDbError::Structure {
                    file,
                    kind: StructureKind::Segment,
                    expected: 1,
                    found: segments.len(),
                });
            }
        };

        let points = segment.points.iter().map(GeoCoordinate::from).collect();
        let metadata_raw = gpx_data
            .metadata
            .and_then(|metadata| metadata.name)
            .unwrap_or_default();

        Ok(Self::new(file, metadata_raw, points))
    }

    /// Archive entry name
    #[inline]
    pub fn file(&self) -> &str {
        &self.file
    }

    /// Metadata name exactly as read
    #[inline]
    pub fn metadata_raw(&self) -> &str {
        &self.metadata_raw
    }

    #[inline]
    pub fn info(&self) -> &RouteInfo {
        &self.info
    }

    #[inline]
    pub fn country(&self) -> &str {
        &self.info.country
    }

    #[inline]
    pub fn city(&self) -> &str {
        &self.info.city
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.info.name
    }

    /// Path points in the direction of travel
    #[inline]
    pub fn points(&self) -> &[GeoCoordinate] {
        &self.points
    }

    #[inline]
    pub fn total_points(&self) -> usize {
        self.points.len()
    }
}

/// Convert degrees to micro-degrees, truncated toward zero
#[inline]
pub(crate) fn to_micro_degrees(degrees: f64) -> i64 {
    (degrees * MICRO_DEGREES) as i64
}
