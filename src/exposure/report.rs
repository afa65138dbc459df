use crate::{
    config::{ElevationWeighting, EngineConfig, QuadrantSplit, SeatWeighting},
    exposure::{
        accumulator::{ExposureTotals, Side},
        seats::SeatResult,
    },
};
use indexmap::IndexMap;
use log::trace;
use serde::Serialize;

/// the model switches a report was computed with
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize)]
pub struct ModelTag {
    pub elevation_weighting: ElevationWeighting,
    pub quadrant_split: QuadrantSplit,
    pub seat_weighting: SeatWeighting,
}

impl From<&EngineConfig> for ModelTag {
    fn from(config: &EngineConfig) -> Self {
        Self {
            elevation_weighting: config.elevation_weighting,
            quadrant_split: config.quadrant_split,
            seat_weighting: config.seat_weighting,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ExposureReport {
    pub front_left_minutes: f64,
    pub back_left_minutes: f64,
    pub front_right_minutes: f64,
    pub back_right_minutes: f64,
    pub left_minutes: f64,
    pub right_minutes: f64,
    pub journey_minutes: f64,
    pub shadier_side: Side,
    /// seat ids from least to most exposed
    pub ranking: Vec<String>,
    pub seats: IndexMap<String, SeatResult>,
    pub model: ModelTag,
}

fn round_to(value: f64, decimals: i32) -> f64 {
    let scale = 10f64.powi(decimals);
    (value * scale).round() / scale
}

/// the left side is shadier unless it gets strictly more sun
pub fn shadier_side(totals: &ExposureTotals) -> Side {
    if totals.whole.left_minutes <= totals.whole.right_minutes {
        Side::Left
    } else {
        Side::Right
    }
}

/// order seats from least to most exposed; ties go left side first, then front rows
pub fn rank(seats: &[SeatResult]) -> Vec<String> {
    let mut order = seats.iter().collect::<Vec<&SeatResult>>();
    order.sort_by(|a, b| {
        a.exposure_minutes
            .total_cmp(&b.exposure_minutes)
            .then(a.side.cmp(&b.side))
            .then(a.row.cmp(&b.row))
            .then(a.seat_id.cmp(&b.seat_id))
    });
    order.into_iter().map(|seat| seat.seat_id.clone()).collect()
}

/// compose seat scores and side totals into the outgoing report
pub fn assemble(
    seats: Vec<SeatResult>,
    totals: &ExposureTotals,
    model: ModelTag,
) -> ExposureReport {
    let ranking = rank(&seats);
    trace!("least exposed seat {:?}", ranking.first());

    ExposureReport {
        front_left_minutes: round_to(totals.front.left_minutes, 2),
        back_left_minutes: round_to(totals.back.left_minutes, 2),
        front_right_minutes: round_to(totals.front.right_minutes, 2),
        back_right_minutes: round_to(totals.back.right_minutes, 2),
        left_minutes: round_to(totals.whole.left_minutes, 2),
        right_minutes: round_to(totals.whole.right_minutes, 2),
        journey_minutes: round_to(totals.journey_minutes, 2),
        shadier_side: shadier_side(totals),
        ranking,
        seats: seats
            .into_iter()
            .map(|seat| {
                (
                    seat.seat_id.clone(),
                    SeatResult {
                        exposure_minutes: round_to(seat.exposure_minutes, 2),
                        exposure_ratio: round_to(seat.exposure_ratio, 3),
                        ..seat
                    },
                )
            })
            .collect(),
        model,
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::{
        config::Attenuation,
        exposure::{
            accumulator::SideTotals,
            seats::{SeatExposureModel, SeatLayout},
        },
    };

    fn totals(left: f64, right: f64) -> ExposureTotals {
        ExposureTotals {
            whole: SideTotals {
                left_minutes: left,
                right_minutes: right,
            },
            front: SideTotals {
                left_minutes: left / 3.0,
                right_minutes: right / 3.0,
            },
            back: SideTotals {
                left_minutes: left * 2.0 / 3.0,
                right_minutes: right * 2.0 / 3.0,
            },
            journey_minutes: 90.0,
        }
    }

    fn report(left: f64, right: f64) -> ExposureReport {
        let layout = SeatLayout::default();
        let config = EngineConfig::default();
        let model = SeatExposureModel::new(Attenuation::default(), config.seat_weighting, &layout);
        let totals = totals(left, right);
        assemble(
            model.score_all(&layout.template(), &totals),
            &totals,
            ModelTag::from(&config),
        )
    }

    #[test]
    fn shadier_side_ties_favour_left() {
        assert_eq!(report(5.0, 5.0).shadier_side, Side::Left);
        assert_eq!(report(4.0, 5.0).shadier_side, Side::Left);
        assert_eq!(report(6.0, 5.0).shadier_side, Side::Right);
    }

    #[test]
    fn quadrants_are_rounded() {
        let report = report(10.0, 20.0);
        assert_eq!(report.front_left_minutes, 3.33);
        assert_eq!(report.back_left_minutes, 6.67);
        assert_eq!(report.front_right_minutes, 6.67);
        assert_eq!(report.back_right_minutes, 13.33);
        assert_eq!(report.journey_minutes, 90.0);
    }

    #[test]
    fn seats_are_indexed_in_template_order() {
        let report = report(10.0, 20.0);
        assert_eq!(report.seats.len(), 60);
        assert_eq!(report.seats.get_index(0).unwrap().0, "L1A");
        assert_eq!(report.seats["R3B"].exposure_ratio, 0.5);
    }

    #[test]
    fn ranking_runs_from_shade_to_sun() {
        let report = report(10.0, 20.0);
        assert_eq!(report.ranking.len(), 60);
        // left aisle gets 1 min, right aisle 2 min
        assert_eq!(report.ranking[0], "L1B");
        assert_eq!(report.ranking[11], "L12B");
        assert_eq!(report.ranking[12], "R1A");
        assert_eq!(report.ranking[59], "R12C");
    }

    #[test]
    fn ranking_ties_put_left_first() {
        let report = report(10.0, 10.0);
        // aisles tie at the bottom and windows at the top
        assert_eq!(report.ranking[0], "L1B");
        assert_eq!(report.ranking[12], "R1A");
        assert_eq!(report.ranking[24], "R1B");
        assert_eq!(report.ranking[36], "L1A");
        assert_eq!(report.ranking[48], "R1C");
        assert_eq!(report.ranking[59], "R12C");
    }

    #[test]
    fn report_serialises_quadrant_fields() {
        let json = serde_json::to_value(report(1.0, 2.0)).unwrap();
        for key in [
            "front_left_minutes",
            "back_left_minutes",
            "front_right_minutes",
            "back_right_minutes",
        ] {
            assert!(json[key].is_number(), "missing {}", key);
        }
        assert_eq!(json["shadier_side"], "left");
        assert_eq!(json["seats"]["R1C"]["position"], "window");
        assert_eq!(json["model"]["elevation_weighting"], "gate");
    }
}
