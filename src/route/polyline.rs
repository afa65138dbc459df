use crate::{
    error::{ExposureError, Result},
    units::{Bearing, Unit},
};
use geo::{
    algorithm::{bearing::Bearing as _, haversine_distance::HaversineDistance},
    Point,
};
use itertools::Itertools;
use log::trace;
use serde::{Deserialize, Serialize};

/* # coordinates */

/// WGS84 position in degrees, no altitude
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub lat: f64,
    pub lon: f64,
}

impl Coordinate {
    pub fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }

    /// reject anything outside latitude/longitude bounds
    pub fn validate(self) -> Result<Self> {
        if self.lat.is_finite()
            && self.lon.is_finite()
            && self.lat.abs() <= 90.0
            && self.lon.abs() <= 180.0
        {
            Ok(self)
        } else {
            Err(ExposureError::InvalidCoordinate {
                lat: self.lat,
                lon: self.lon,
            })
        }
    }

    /// great-circle distance in kilometres
    pub fn distance_km(&self, other: &Self) -> f64 {
        Point::from(*self).haversine_distance(&Point::from(*other)) / 1000.0
    }

    /// initial bearing of the great circle towards `other`
    pub fn bearing(&self, other: &Self) -> Bearing {
        Bearing::confine(Point::from(*self).bearing(Point::from(*other)))
    }

    /// linear interpolation, adequate over a single road segment
    pub fn lerp(&self, other: &Self, fraction: f64) -> Self {
        Self {
            lat: self.lat + (other.lat - self.lat) * fraction,
            lon: self.lon + (other.lon - self.lon) * fraction,
        }
    }
}

impl From<Coordinate> for Point<f64> {
    fn from(coordinate: Coordinate) -> Self {
        Point::new(coordinate.lon, coordinate.lat)
    }
}

/* # polylines */

/// ordered road coordinates in travel order
#[derive(Clone, Debug, PartialEq)]
pub struct RoutePolyline {
    points: Vec<Coordinate>,
}

impl RoutePolyline {
    /// validate coordinates and drop consecutive duplicates
    pub fn new(points: Vec<Coordinate>) -> Result<Self> {
        let points = points
            .into_iter()
            .map(Coordinate::validate)
            .collect::<Result<Vec<Coordinate>>>()?
            .into_iter()
            .dedup()
            .collect::<Vec<Coordinate>>();
        trace!("polyline with {} distinct consecutive points", points.len());

        if points.len() < 2 {
            return Err(ExposureError::DegenerateRoute);
        }
        Ok(Self { points })
    }

    /// build from GeoJSON ordered `[lon, lat]` pairs, as routers return them
    pub fn from_lon_lat(pairs: &[[f64; 2]]) -> Result<Self> {
        Self::new(
            pairs
                .iter()
                .map(|[lon, lat]| Coordinate::new(*lat, *lon))
                .collect(),
        )
    }

    pub fn points(&self) -> &[Coordinate] {
        &self.points
    }

    /// total great-circle length in kilometres
    pub fn length_km(&self) -> f64 {
        self.points
            .iter()
            .tuple_windows()
            .map(|(a, b)| a.distance_km(b))
            .sum()
    }
}
