//! Bounding box aggregation over every point of every route

use crate::{GeoCoordinate, Route};
use geo::{Coord, Rect};

/// A region defined by two latitudes (north, south) and two longitudes (east, west)
///
/// The zero value is used when the database holds no points.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Bounds {
    pub north: f64,
    pub east: f64,
    pub south: f64,
    pub west: f64,
}

#[cfg_attr(feature = "profiling", profiling::all_functions)]
impl Bounds {
    /// Compute the box around all points of all routes
    ///
    /// The first point of the first route is the anchor; if that route has no points
    /// the result is the zero value even when later routes have some.
    pub fn from_routes(routes: &[Route]) -> Self {
        #[cfg(feature = "profiling")]
        profiling::scope!("bounds::from_routes");

        let Some(anchor) = routes.first().and_then(|route| route.points().first()) else {
            return Self::default();
        };

        let mut bounds = Self {
            north: anchor.lat,
            east: anchor.lon,
            south: anchor.lat,
            west: anchor.lon,
        };
        for point in routes.iter().flat_map(Route::points) {
            bounds.extend(point);
        }
        bounds
    }

    #[inline]
    fn extend(&mut self, point: &GeoCoordinate) {
        if point.lat > self.north {
            self.north = point.lat;
        }
        if point.lon > self.east {
            self.east = point.lon;
        }
        if point.lat < self.south {
            self.south = point.lat;
        }
        if point.lon < self.west {
            self.west = point.lon;
        }
    }

    /// Check whether a coordinate lies inside the box (edges included)
    pub fn contains(&self, point: GeoCoordinate) -> bool {
        point.lat <= self.north
            && point.lat >= self.south
            && point.lon <= self.east
            && point.lon >= self.west
    }

    /// Center of the box as (lat, lon)
    #[inline]
    pub fn center(&self) -> GeoCoordinate {
        GeoCoordinate::new(
            (self.north + self.south) / 2.0,
            (self.east + self.west) / 2.0,
        )
    }

    /// Convert to a `geo::Rect` with x = longitude and y = latitude
    pub fn to_rect(&self) -> Rect<f64> {
        Rect::new(
            Coord {
                x: self.west,
                y: self.south,
            },
            Coord {
                x: self.east,
                y: self.north,
            },
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::RouteDb;
    use crate::testutil::fixture_archive;

    fn route(points: &[(f64, f64)]) -> Route {
        Route::new(
            "test.gpx",
            "kg-osh-1",
            points
                .iter()
                .map(|&(lat, lon)| GeoCoordinate::new(lat, lon))
                .collect(),
        )
    }

    #[test]
    fn test_fixture_bounds() {
        let db = RouteDb::load(&fixture_archive()).unwrap();
        let bounds = db.bounds();

        assert_eq!(bounds.north, 40.5432);
        assert_eq!(bounds.south, 40.501026);
        assert_eq!(bounds.east, 72.822586);
        assert_eq!(bounds.west, 72.796295);
    }

    #[test]
    fn test_bounds_are_ordered() {
        let bounds = Bounds::from_routes(&[
            route(&[(10.0, 20.0), (-5.0, 30.0)]),
            route(&[(3.0, -40.0)]),
        ]);
        assert!(bounds.north >= bounds.south);
        assert!(bounds.east >= bounds.west);
        assert_eq!(bounds.north, 10.0);
        assert_eq!(bounds.south, -5.0);
        assert_eq!(bounds.east, 30.0);
        assert_eq!(bounds.west, -40.0);
    }

    #[test]
    fn test_no_routes_is_zero() {
        assert_eq!(Bounds::from_routes(&[]), Bounds::default());
    }

    #[test]
    fn test_empty_first_route_is_zero() {
        let bounds = Bounds::from_routes(&[route(&[]), route(&[(10.0, 20.0)])]);
        assert_eq!(bounds, Bounds::default());
    }

    #[test]
    fn test_single_point() {
        let bounds = Bounds::from_routes(&[route(&[(40.5, 72.8)])]);
        assert_eq!(bounds.north, 40.5);
        assert_eq!(bounds.south, 40.5);
        assert_eq!(bounds.east, 72.8);
        assert_eq!(bounds.west, 72.8);
    }

    #[test]
    fn test_bounds_idempotent() {
        let db = RouteDb::load(&fixture_archive()).unwrap();
        assert_eq!(db.bounds(), db.bounds());
    }

    #[test]
    fn test_contains_and_center() {
        let bounds = Bounds::from_routes(&[route(&[(0.0, 0.0), (10.0, 20.0)])]);
        assert!(bounds.contains(GeoCoordinate::new(5.0, 5.0)));
        assert!(bounds.contains(GeoCoordinate::new(10.0, 20.0)));
        assert!(!bounds.contains(GeoCoordinate::new(11.0, 5.0)));
        assert_eq!(bounds.center(), GeoCoordinate::new(5.0, 10.0));
    }

    #[test]
    fn test_to_rect() {
        let bounds = Bounds::from_routes(&[route(&[(1.0, 2.0), (3.0, 5.0)])]);
        let rect = bounds.to_rect();
        assert_eq!(rect.min(), Coord { x: 2.0, y: 1.0 });
        assert_eq!(rect.max(), Coord { x: 5.0, y: 3.0 });
    }
}
