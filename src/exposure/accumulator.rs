use crate::{
    config::{ElevationWeighting, EngineConfig, QuadrantSplit},
    route::Segment,
    solar::{position, SolarPosition},
    units::{Minutes, Relative, Unit},
};
use log::{debug, trace};
use num_traits::Zero;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

/* # sides */

#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Left,
    Right,
}

/// side of the vehicle lit by a sun at relative bearing `rel`
///
/// Sun closer than `cutoff` degrees to dead ahead or dead behind lights neither
/// side; a sun exactly at the cutoff still counts. With no cutoff the exact 0/180
/// bearings count for neither.
pub fn classify(rel: Relative, cutoff: f64) -> Option<Side> {
    let angle = rel.release();
    let lit = if cutoff > 0.0 {
        (cutoff..=180.0 - cutoff).contains(&angle.abs())
    } else {
        angle != 0.0 && angle.abs() < 180.0
    };

    if !lit {
        None
    } else if angle > 0.0 {
        Some(Side::Right)
    } else {
        Some(Side::Left)
    }
}

/* # totals */

#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize)]
pub struct SideTotals {
    pub left_minutes: f64,
    pub right_minutes: f64,
}

impl SideTotals {
    pub fn get(&self, side: Side) -> f64 {
        match side {
            Side::Left => self.left_minutes,
            Side::Right => self.right_minutes,
        }
    }
}

/// side minutes for the whole route and for its front and back figures
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize)]
pub struct ExposureTotals {
    pub whole: SideTotals,
    pub front: SideTotals,
    pub back: SideTotals,
    /// sum of all segment durations, lit or not
    pub journey_minutes: f64,
}

/// running sums, kept in minutes until released
#[derive(Clone, Copy)]
struct Tally {
    left: Minutes,
    right: Minutes,
}

impl Tally {
    fn zero() -> Self {
        Self {
            left: Minutes::zero(),
            right: Minutes::zero(),
        }
    }

    fn add(&mut self, side: Side, minutes: Minutes) {
        match side {
            Side::Left => self.left = self.left + minutes,
            Side::Right => self.right = self.right + minutes,
        }
    }

    fn release(self) -> SideTotals {
        SideTotals {
            left_minutes: self.left.release(),
            right_minutes: self.right.release(),
        }
    }
}

/* # sampling */

/// what a single sun sample contributes
#[derive(Clone, Copy, Debug)]
struct Sample {
    side: Option<Side>,
    front: bool,
    minutes: Minutes,
}

fn sample_count(segment: &Segment, interval: Option<f64>) -> usize {
    match interval {
        Some(km) => ((segment.distance_km / km).ceil() as usize).max(1),
        None => 1,
    }
}

fn weight(sun: &SolarPosition, weighting: ElevationWeighting) -> f64 {
    match weighting {
        ElevationWeighting::Gate => 1.0,
        ElevationWeighting::Sine => sun.elevation.to_radians().sin(),
    }
}

fn sample_segment(segment: &Segment, config: &EngineConfig, half_km: f64) -> Vec<Sample> {
    let count = sample_count(segment, config.sample_interval_km);
    let share = segment.duration().scale((count as f64).recip());

    (0..count)
        .map(|k| {
            let fraction = (k as f64 + 0.5) / count as f64;
            let point = segment.start.lerp(&segment.end, fraction);
            let sun = position(point.lat, point.lon, &segment.instant_at(fraction));
            let rel = Relative::between(sun.bearing(), segment.heading);

            let front = match config.quadrant_split {
                QuadrantSplit::JourneyHalf => {
                    segment.offset_km + segment.distance_km * fraction < half_km
                }
                QuadrantSplit::SunBearing => rel.release().abs() <= 90.0,
            };

            if !sun.is_above_horizon() {
                return Sample {
                    side: None,
                    front,
                    minutes: Minutes::zero(),
                };
            }
            trace!(
                "sun at {:.1}°/{:.1}° relative {:.1}°",
                sun.azimuth,
                sun.elevation,
                rel.release()
            );
            Sample {
                side: classify(rel, config.glancing_cutoff_degrees),
                front,
                minutes: share.scale(weight(&sun, config.elevation_weighting)),
            }
        })
        .collect()
}

/// attribute sunlit minutes along the route to the left and right of the vehicle
pub fn accumulate(segments: &[Segment], config: &EngineConfig) -> ExposureTotals {
    let route_km = segments
        .last()
        .map_or(0.0, |last| last.offset_km + last.distance_km);
    let half_km = route_km / 2.0;

    // samples are independent; collected in route order so the sums below are reproducible
    let samples = segments
        .par_iter()
        .map(|segment| sample_segment(segment, config, half_km))
        .collect::<Vec<Vec<Sample>>>();

    let mut whole = Tally::zero();
    let mut front = Tally::zero();
    let mut back = Tally::zero();
    for sample in samples.into_iter().flatten() {
        if let Some(side) = sample.side {
            whole.add(side, sample.minutes);
            if sample.front {
                front.add(side, sample.minutes);
            } else {
                back.add(side, sample.minutes);
            }
        }
    }

    let journey_minutes = segments
        .iter()
        .map(Segment::duration)
        .fold(Minutes::zero(), |acc, minutes| acc + minutes)
        .release();

    let totals = ExposureTotals {
        whole: whole.release(),
        front: front.release(),
        back: back.release(),
        journey_minutes,
    };
    debug!(
        "sun on the left {:.1} min, on the right {:.1} min of {:.1} min",
        totals.whole.left_minutes, totals.whole.right_minutes, totals.journey_minutes
    );
    totals
}
