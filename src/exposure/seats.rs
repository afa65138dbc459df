use crate::{
    config::{Attenuation, SeatWeighting},
    error::{ExposureError, Result},
    exposure::accumulator::{ExposureTotals, Side},
    vars::*,
};
use log::trace;
use ord_subset::OrdSubsetIterExt;
use serde::{Deserialize, Serialize};

/* # layout */

#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SeatPosition {
    Window,
    Middle,
    Aisle,
}

/// a seat of the static vehicle template
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct SeatSpec {
    pub seat_id: String,
    pub row: u32,
    pub side: Side,
    pub position: SeatPosition,
}

/// rows of seats, each side listed from letter A outwards
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SeatLayout {
    pub rows: u32,
    pub left: Vec<SeatPosition>,
    pub right: Vec<SeatPosition>,
}

impl Default for SeatLayout {
    /// twelve rows, window-aisle on the left and aisle-middle-window on the right
    fn default() -> Self {
        Self {
            rows: TOTAL_ROWS,
            left: vec![SeatPosition::Window, SeatPosition::Aisle],
            right: vec![
                SeatPosition::Aisle,
                SeatPosition::Middle,
                SeatPosition::Window,
            ],
        }
    }
}

impl SeatLayout {
    pub fn validate(&self) -> Result<()> {
        if self.rows == 0 || (self.left.is_empty() && self.right.is_empty()) {
            return Err(ExposureError::InvalidConfig(
                "seat layout has no seats".to_string(),
            ));
        }
        if self.left.len() > 26 || self.right.len() > 26 {
            return Err(ExposureError::InvalidConfig(
                "more seats on a side than seat letters".to_string(),
            ));
        }
        Ok(())
    }

    /// enumerate every seat, row by row, left side first
    pub fn template(&self) -> Vec<SeatSpec> {
        (1..=self.rows)
            .flat_map(|row| {
                [(Side::Left, &self.left), (Side::Right, &self.right)]
                    .into_iter()
                    .flat_map(move |(side, positions)| {
                        positions
                            .iter()
                            .enumerate()
                            .map(move |(j, position)| SeatSpec {
                                seat_id: seat_id(side, row, j),
                                row,
                                side,
                                position: *position,
                            })
                    })
            })
            .collect()
    }
}

fn seat_id(side: Side, row: u32, index: usize) -> String {
    let prefix = match side {
        Side::Left => 'L',
        Side::Right => 'R',
    };
    format!("{}{}{}", prefix, row, (b'A' + index as u8) as char)
}

/* # scores */

#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ExposureBand {
    Low,
    Moderate,
    High,
}

impl ExposureBand {
    pub fn from_ratio(ratio: f64) -> Self {
        if ratio >= BAND_HIGH {
            ExposureBand::High
        } else if ratio >= BAND_MODERATE {
            ExposureBand::Moderate
        } else {
            ExposureBand::Low
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct SeatResult {
    pub seat_id: String,
    pub row: u32,
    pub side: Side,
    pub position: SeatPosition,
    pub exposure_minutes: f64,
    pub exposure_ratio: f64,
    pub band: ExposureBand,
}

/// turns side totals into per-seat exposure
#[derive(Clone, Debug)]
pub struct SeatExposureModel {
    pub attenuation: Attenuation,
    pub weighting: SeatWeighting,
    pub rows: u32,
}

impl SeatExposureModel {
    pub fn new(attenuation: Attenuation, weighting: SeatWeighting, layout: &SeatLayout) -> Self {
        Self {
            attenuation,
            weighting,
            rows: layout.rows,
        }
    }

    fn side_minutes(&self, seat: &SeatSpec, totals: &ExposureTotals) -> f64 {
        match self.weighting {
            SeatWeighting::Flat => totals.whole.get(seat.side),
            SeatWeighting::RowWeighted => {
                let rows = f64::from(self.rows);
                let back = f64::from(seat.row) / rows;
                (1.0 - back) * totals.front.get(seat.side) + back * totals.back.get(seat.side)
            }
        }
    }

    /// exposure minutes of a single seat
    pub fn score(&self, seat: &SeatSpec, totals: &ExposureTotals) -> f64 {
        self.side_minutes(seat, totals) * self.attenuation.factor(seat.side, seat.position)
    }

    /// score every seat, normalising against the worst seat of this journey
    pub fn score_all(&self, seats: &[SeatSpec], totals: &ExposureTotals) -> Vec<SeatResult> {
        let minutes = seats
            .iter()
            .map(|seat| self.score(seat, totals))
            .collect::<Vec<f64>>();
        let worst = minutes
            .iter()
            .copied()
            .ord_subset_max()
            .unwrap_or(0.0);
        trace!("worst seat exposed for {:.2} min", worst);

        seats
            .iter()
            .zip(minutes.into_iter())
            .map(|(seat, exposure_minutes)| {
                let exposure_ratio = if worst > 0.0 {
                    exposure_minutes / worst
                } else {
                    0.0
                };
                SeatResult {
                    seat_id: seat.seat_id.clone(),
                    row: seat.row,
                    side: seat.side,
                    position: seat.position,
                    exposure_minutes,
                    exposure_ratio,
                    band: ExposureBand::from_ratio(exposure_ratio),
                }
            })
            .collect()
    }
}
