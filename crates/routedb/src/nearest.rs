//! Nearest stop search by great-circle distance
//!
//! Every query rescans all points of all routes. There is no spatial index.

use crate::{GeoCoordinate, Result, RouteDb, RouteDbError};
use geo::{Distance, Haversine};

/// Starting value for the running minimum, larger than any distance on Earth
const SENTINEL_DISTANCE_M: f64 = 1e10;

/// A place where a bus stops (or could be hailed)
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Stop {
    pub lat: f64,
    pub lon: f64,
}

impl From<GeoCoordinate> for Stop {
    fn from(point: GeoCoordinate) -> Self {
        Self {
            lat: point.lat,
            lon: point.lon,
        }
    }
}

/// The closest stored point and where it was found
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct NearestMatch {
    pub stop: Stop,
    pub route_index: usize,
    pub point_index: usize,
    /// Haversine distance from the query in meters
    pub distance_m: f64,
}

#[cfg_attr(feature = "profiling", profiling::all_functions)]
impl RouteDb {
    /// Find the stored point closest to (lat, lon)
    ///
    /// Returns the point's stored coordinates, not the query's.
    pub fn nearest(&self, lat: f64, lon: f64) -> Result<Stop> {
        self.nearest_match(lat, lon).map(|found| found.stop)
    }

    /// Like [`RouteDb::nearest`], also reporting the route, point and distance
    ///
    /// Routes are scanned in order, then points in order; on equal distance the
    /// earlier point wins.
    pub fn nearest_match(&self, lat: f64, lon: f64) -> Result<NearestMatch> {
        #[cfg(feature = "profiling")]
        profiling::scope!("routedb::nearest");

        let query = GeoCoordinate::new(lat, lon).to_point();
        let mut min_distance = SENTINEL_DISTANCE_M;
        let mut best: Option<NearestMatch> = None;

        for (route_index, route) in self.routes.iter().enumerate() {
            for (point_index, point) in route.points().iter().enumerate() {
                let distance = Haversine.distance(query, point.to_point());
                if distance < min_distance {
                    min_distance = distance;
                    best = Some(NearestMatch {
                        stop: Stop::from(*point),
                        route_index,
                        point_index,
                        distance_m: distance,
                    });
                }
            }
        }

        best.ok_or(RouteDbError::NotFound)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Route;
    use crate::testutil::fixture_archive;

    fn db_from(routes: &[&[(f64, f64)]]) -> RouteDb {
        RouteDb::from_routes(
            routes
                .iter()
                .map(|points| {
                    Route::new(
                        "test.gpx",
                        "kg-osh-1",
                        points
                            .iter()
                            .map(|&(lat, lon)| GeoCoordinate::new(lat, lon))
                            .collect(),
                    )
                })
                .collect(),
        )
    }

    #[test]
    fn test_nearest_known_point() {
        // a known point is: lat 40.50263 lon 72.821976
        let db = RouteDb::load(&fixture_archive()).unwrap();
        let stop = db.nearest(40.50265, 72.821978).unwrap();

        assert_eq!(stop.lat, 40.50263);
        assert_eq!(stop.lon, 72.821976);
    }

    #[test]
    fn test_nearest_is_idempotent() {
        let db = RouteDb::load(&fixture_archive()).unwrap();
        let first = db.nearest(40.52, 72.81).unwrap();
        let second = db.nearest(40.52, 72.81).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_nearest_empty_db() {
        let db = RouteDb::default();
        assert!(matches!(db.nearest(0.0, 0.0), Err(RouteDbError::NotFound)));
    }

    #[test]
    fn test_nearest_routes_without_points() {
        let db = db_from(&[&[], &[]]);
        assert!(matches!(db.nearest(0.0, 0.0), Err(RouteDbError::NotFound)));
    }

    #[test]
    fn test_nearest_across_routes() {
        let db = db_from(&[&[(0.0, 0.0), (1.0, 1.0)], &[(10.0, 10.0), (10.1, 10.1)]]);
        let found = db.nearest_match(10.09, 10.09).unwrap();

        assert_eq!(found.route_index, 1);
        assert_eq!(found.point_index, 1);
        assert_eq!(found.stop, Stop { lat: 10.1, lon: 10.1 });
        assert!(found.distance_m > 0.0 && found.distance_m < 2_000.0);
    }

    #[test]
    fn test_nearest_tie_keeps_first() {
        // Same point stored twice: the first occurrence wins.
        let db = db_from(&[&[(5.0, 5.0)], &[(5.0, 5.0)]]);
        let found = db.nearest_match(5.0, 5.0).unwrap();
        assert_eq!(found.route_index, 0);
        assert_eq!(found.distance_m, 0.0);

        // Equidistant points on either side of the query.
        let db = db_from(&[&[(0.0, 1.0), (0.0, -1.0)]]);
        let found = db.nearest_match(0.0, 0.0).unwrap();
        assert_eq!(found.point_index, 0);
    }

    #[test]
    fn test_nearest_returns_stored_coordinates() {
        let db = db_from(&[&[(91.0, 200.0)]]);
        let stop = db.nearest(0.0, 0.0).unwrap();
        assert_eq!(stop, Stop { lat: 91.0, lon: 200.0 });
    }
}
