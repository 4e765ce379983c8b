//! Printable summaries of a loaded database

use routedb::{Bounds, NearestMatch, RouteDb, Stop};
use serde::Serialize;
use std::fmt;

#[derive(Debug, Serialize)]
pub struct RouteReport {
    pub index: usize,
    pub file: String,
    pub country: String,
    pub city: String,
    pub name: String,
    pub points: usize,
}

#[derive(Debug, Serialize)]
pub struct DbReport {
    pub routes: usize,
    pub total_points: usize,
    pub bounds: Bounds,
    pub route_list: Vec<RouteReport>,
}

impl DbReport {
    pub fn new(db: &RouteDb) -> Self {
        let route_list = db
            .routes()
            .iter()
            .enumerate()
            .map(|(index, route)| RouteReport {
                index,
                file: route.file().to_string(),
                country: route.country().to_string(),
                city: route.city().to_string(),
                name: route.name().to_string(),
                points: route.total_points(),
            })
            .collect();

        Self {
            routes: db.route_count(),
            total_points: db.total_points(),
            bounds: db.bounds(),
            route_list,
        }
    }
}

impl fmt::Display for DbReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "routes: {}", self.routes)?;
        writeln!(f, "points: {}", self.total_points)?;
        writeln!(
            f,
            "bounds: N={} S={} E={} W={}",
            self.bounds.north, self.bounds.south, self.bounds.east, self.bounds.west
        )?;
        for route in &self.route_list {
            writeln!(
                f,
                "{:>4}  {}/{}/{}  {} points  ({})",
                route.index, route.country, route.city, route.name, route.points, route.file
            )?;
        }
        Ok(())
    }
}

#[derive(Debug, Serialize)]
pub struct NearestReport {
    pub stop: Stop,
    pub route_index: usize,
    pub route_name: String,
    pub point_index: usize,
    pub distance_m: f64,
}

impl NearestReport {
    pub fn new(db: &RouteDb, found: NearestMatch) -> Self {
        let route_name = db
            .get_route(found.route_index)
            .map(|route| route.metadata_raw().to_string())
            .unwrap_or_default();
        Self {
            stop: found.stop,
            route_index: found.route_index,
            route_name,
            point_index: found.point_index,
            distance_m: found.distance_m,
        }
    }
}

impl fmt::Display for NearestReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {}  (route {} {:?}, point {}, {:.1} m away)",
            self.stop.lat,
            self.stop.lon,
            self.route_index,
            self.route_name,
            self.point_index,
            self.distance_m
        )
    }
}
