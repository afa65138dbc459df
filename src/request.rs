use crate::{
    departure::{local_departure, parse_departure},
    error::{ExposureError, Result},
    route::{Coordinate, RoutePolyline, SpeedModel},
    vars::*,
};
use chrono::{DateTime, FixedOffset};
use serde::Deserialize;

/// an already geocoded and routed journey, as handed over by the transport layer
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct RouteRequest {
    /// RFC 3339 departure with offset
    pub departure: Option<String>,
    /// local departure date, `YYYY-MM-DD`, used when `departure` is absent
    pub date: Option<String>,
    /// local departure time, `HH:MM`
    pub time: Option<String>,
    pub utc_offset_minutes: Option<i32>,
    pub polyline: Vec<Coordinate>,
    /// GeoJSON `[lon, lat]` pairs, used when `polyline` is empty
    pub coordinates: Vec<[f64; 2]>,
    /// router trip duration
    pub duration_seconds: Option<f64>,
}

impl RouteRequest {
    pub fn from_json(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn polyline(&self) -> Result<RoutePolyline> {
        if self.polyline.is_empty() {
            RoutePolyline::from_lon_lat(&self.coordinates)
        } else {
            RoutePolyline::new(self.polyline.clone())
        }
    }

    pub fn departure(&self) -> Result<DateTime<FixedOffset>> {
        match (&self.departure, &self.date, &self.time) {
            (Some(departure), _, _) => parse_departure(departure),
            (None, Some(date), Some(time)) => local_departure(
                date,
                time,
                self.utc_offset_minutes.unwrap_or(DEFAULT_UTC_OFFSET_MINUTES),
            ),
            _ => Err(ExposureError::ClockSkew(
                "request names no departure".to_string(),
            )),
        }
    }

    /// router timing, if the request carries any
    pub fn speed(&self) -> Option<SpeedModel> {
        self.duration_seconds
            .map(|seconds| SpeedModel::TotalDuration { seconds })
    }
}
