use crate::{
    error::{ExposureError, Result},
    route::polyline::{Coordinate, RoutePolyline},
    units::{Bearing, Minutes, Unit},
    vars::*,
};
use chrono::{DateTime, Duration, FixedOffset, Utc};
use itertools::Itertools;
use log::{debug, trace};
use serde::{Deserialize, Serialize};

/* # speed */

/// how route distance turns into elapsed time
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SpeedModel {
    /// constant average speed over the whole route
    Constant { kmh: f64 },
    /// router-supplied trip duration, spread over segments by distance
    TotalDuration { seconds: f64 },
}

impl Default for SpeedModel {
    fn default() -> Self {
        SpeedModel::Constant {
            kmh: DEFAULT_SPEED_KMH,
        }
    }
}

impl SpeedModel {
    pub fn validate(&self) -> Result<()> {
        match *self {
            SpeedModel::Constant { kmh } if !(kmh.is_finite() && kmh > 0.0) => Err(
                ExposureError::InvalidConfig(format!("speed must be positive, got {} km/h", kmh)),
            ),
            SpeedModel::TotalDuration { seconds } if !(seconds.is_finite() && seconds > 0.0) => {
                Err(ExposureError::InvalidConfig(format!(
                    "trip duration must be positive, got {} s",
                    seconds
                )))
            }
            _ => Ok(()),
        }
    }

    /// seconds needed to cover `distance_km` of a route `total_km` long
    fn seconds(&self, distance_km: f64, total_km: f64) -> f64 {
        match *self {
            SpeedModel::Constant { kmh } => distance_km / kmh * 3600.0,
            SpeedModel::TotalDuration { seconds } => distance_km / total_km * seconds,
        }
    }
}

/* # segments */

/// a timed, headed stretch of road between two consecutive polyline points
#[derive(Clone, Debug, PartialEq)]
pub struct Segment {
    pub start: Coordinate,
    pub end: Coordinate,
    pub heading: Bearing,
    pub start_instant: DateTime<Utc>,
    pub duration_seconds: f64,
    pub distance_km: f64,
    /// cumulative route distance at `start`
    pub offset_km: f64,
}

impl Segment {
    pub fn midpoint(&self) -> Coordinate {
        self.start.lerp(&self.end, 0.5)
    }

    /// instant at which the vehicle has covered `fraction` of the segment
    pub fn instant_at(&self, fraction: f64) -> DateTime<Utc> {
        self.start_instant + nanos(self.duration_seconds * fraction)
    }

    pub fn duration(&self) -> Minutes {
        Minutes::from_seconds(self.duration_seconds)
    }
}

fn nanos(seconds: f64) -> Duration {
    Duration::nanoseconds((seconds * 1e9).round() as i64)
}

/// split a polyline into timed segments, dropping coincident points
pub fn segment(
    polyline: &RoutePolyline,
    start: &DateTime<FixedOffset>,
    speed: &SpeedModel,
) -> Result<Vec<Segment>> {
    speed.validate()?;
    let origin = start.with_timezone(&Utc);

    let legs = polyline
        .points()
        .iter()
        .tuple_windows()
        .map(|(a, b)| (*a, *b, a.distance_km(b)))
        .filter(|(_, _, distance)| *distance >= MIN_SEGMENT_KM)
        .collect::<Vec<(Coordinate, Coordinate, f64)>>();

    if legs.is_empty() {
        return Err(ExposureError::DegenerateRoute);
    }
    let total_km = legs.iter().map(|(_, _, distance)| distance).sum::<f64>();

    let mut elapsed = 0.0;
    let mut offset_km = 0.0;
    let segments = legs
        .into_iter()
        .map(|(a, b, distance_km)| {
            let duration_seconds = speed.seconds(distance_km, total_km);
            let segment = Segment {
                start: a,
                end: b,
                heading: a.bearing(&b),
                start_instant: origin + nanos(elapsed),
                duration_seconds,
                distance_km,
                offset_km,
            };
            trace!(
                "segment at {:.3} km heading {:.1}°, {:.0} s",
                offset_km,
                segment.heading.release(),
                duration_seconds
            );
            elapsed += duration_seconds;
            offset_km += distance_km;
            segment
        })
        .collect::<Vec<Segment>>();

    debug!(
        "segmented {:.2} km into {} segments over {:.1} min",
        total_km,
        segments.len(),
        elapsed / 60.0
    );
    Ok(segments)
}
