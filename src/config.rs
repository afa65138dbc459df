use crate::{
    error::{ExposureError, Result},
    exposure::{SeatPosition, Side},
    route::SpeedModel,
    vars::*,
};
use log::debug;
use serde::{Deserialize, Serialize};
use std::{fs, path::Path};

/* # model switches */

/// how sun elevation enters a sample's contribution
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ElevationWeighting {
    /// full duration whenever the sun is above the horizon
    #[default]
    Gate,
    /// duration scaled by sin(elevation); changes the meaning of exposure ratios
    Sine,
}

/// how minutes are split between the front and back figures
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuadrantSplit {
    /// first and second half of the route by cumulative distance
    #[default]
    JourneyHalf,
    /// sun ahead of the vehicle (|relative bearing| <= 90) or behind it
    SunBearing,
}

/// how side minutes are distributed along the rows
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SeatWeighting {
    /// every row of a side gets the whole-journey side total
    #[default]
    Flat,
    /// rows blend front and back minutes by their distance from the front
    RowWeighted,
}

/// share of side exposure reaching each seat position
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PositionFactors {
    pub window: f64,
    pub middle: f64,
    pub aisle: f64,
}

impl Default for PositionFactors {
    fn default() -> Self {
        Self {
            window: ATTENUATION_WINDOW,
            middle: ATTENUATION_MIDDLE,
            aisle: ATTENUATION_AISLE,
        }
    }
}

impl PositionFactors {
    pub fn factor(&self, position: SeatPosition) -> f64 {
        match position {
            SeatPosition::Window => self.window,
            SeatPosition::Middle => self.middle,
            SeatPosition::Aisle => self.aisle,
        }
    }

    fn validate(&self) -> Result<()> {
        let Self {
            window,
            middle,
            aisle,
        } = *self;
        if ![window, middle, aisle]
            .iter()
            .all(|factor| factor.is_finite() && *factor >= 0.0)
            || aisle > middle
            || middle > window
        {
            return Err(ExposureError::InvalidConfig(format!(
                "attenuation must satisfy 0 <= aisle <= middle <= window, got {:?}",
                self
            )));
        }
        Ok(())
    }
}

/// position factors shared by both sides, optionally replaced on one side
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Attenuation {
    #[serde(flatten)]
    pub base: PositionFactors,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub left: Option<PositionFactors>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub right: Option<PositionFactors>,
}

impl Attenuation {
    pub fn side(&self, side: Side) -> &PositionFactors {
        let own = match side {
            Side::Left => &self.left,
            Side::Right => &self.right,
        };
        own.as_ref().unwrap_or(&self.base)
    }

    pub fn factor(&self, side: Side, position: SeatPosition) -> f64 {
        self.side(side).factor(position)
    }

    pub fn validate(&self) -> Result<()> {
        self.base.validate()?;
        self.left
            .iter()
            .chain(self.right.iter())
            .try_for_each(PositionFactors::validate)
    }
}

/* # engine configuration */

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// used when a request carries no router timing
    pub speed: SpeedModel,
    /// split segments longer than this into several sun samples
    pub sample_interval_km: Option<f64>,
    /// sun closer than this to dead ahead or dead behind lights neither side
    pub glancing_cutoff_degrees: f64,
    pub elevation_weighting: ElevationWeighting,
    pub quadrant_split: QuadrantSplit,
    pub seat_weighting: SeatWeighting,
    pub attenuation: Attenuation,
}

impl EngineConfig {
    pub fn validate(&self) -> Result<()> {
        self.speed.validate()?;

        if let Some(interval) = self.sample_interval_km {
            if !(interval.is_finite() && interval >= MIN_SAMPLE_INTERVAL_KM) {
                return Err(ExposureError::InvalidConfig(format!(
                    "sample interval must be at least {} km, got {} km",
                    MIN_SAMPLE_INTERVAL_KM, interval
                )));
            }
        }

        if !(0.0..90.0).contains(&self.glancing_cutoff_degrees) {
            return Err(ExposureError::InvalidConfig(format!(
                "glancing cutoff must lie in [0, 90), got {}",
                self.glancing_cutoff_degrees
            )));
        }

        self.attenuation.validate()?;
        Ok(())
    }

    pub fn from_json(text: &str) -> Result<Self> {
        let config = serde_json::from_str::<Self>(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self> {
        debug!("loading engine configuration from {}", path.display());
        Self::from_json(&fs::read_to_string(path)?)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn default_is_valid() {
        let config = EngineConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.speed, SpeedModel::Constant { kmh: 40.0 });
        assert_eq!(config.elevation_weighting, ElevationWeighting::Gate);
        assert_eq!(config.sample_interval_km, None);
    }

    #[test]
    fn partial_json_keeps_defaults() {
        let config = EngineConfig::from_json(
            r#"{"speed": {"constant": {"kmh": 55.0}}, "attenuation": {"aisle": 0.15}}"#,
        )
        .unwrap();
        assert_eq!(config.speed, SpeedModel::Constant { kmh: 55.0 });
        assert_eq!(config.attenuation.base.aisle, 0.15);
        assert_eq!(config.attenuation.base.middle, ATTENUATION_MIDDLE);
        assert_eq!(config.attenuation.left, None);
        assert_eq!(config.quadrant_split, QuadrantSplit::JourneyHalf);
    }

    #[test]
    fn switches_parse_from_snake_case() {
        let config = EngineConfig::from_json(
            r#"{"quadrant_split": "sun_bearing", "seat_weighting": "row_weighted",
                "elevation_weighting": "sine", "sample_interval_km": 5.0,
                "glancing_cutoff_degrees": 30.0}"#,
        )
        .unwrap();
        assert_eq!(config.quadrant_split, QuadrantSplit::SunBearing);
        assert_eq!(config.seat_weighting, SeatWeighting::RowWeighted);
        assert_eq!(config.elevation_weighting, ElevationWeighting::Sine);
        assert_eq!(config.sample_interval_km, Some(5.0));
    }

    #[test]
    fn bad_values_are_rejected() {
        assert!(matches!(
            EngineConfig::from_json(r#"{"sample_interval_km": 0.0}"#),
            Err(ExposureError::InvalidConfig(_))
        ));
        assert!(matches!(
            EngineConfig::from_json(r#"{"glancing_cutoff_degrees": 90.0}"#),
            Err(ExposureError::InvalidConfig(_))
        ));
        assert!(matches!(
            EngineConfig::from_json(r#"{"attenuation": {"aisle": 0.9}}"#),
            Err(ExposureError::InvalidConfig(_))
        ));
        assert!(matches!(
            EngineConfig::from_json("{"),
            Err(ExposureError::Request(_))
        ));
    }

    #[test]
    fn per_side_factors_override_the_base() {
        let config = EngineConfig::from_json(
            r#"{"attenuation": {"left": {"aisle": 0.25},
                                "right": {"middle": 0.4, "aisle": 0.15}}}"#,
        )
        .unwrap();
        let attenuation = config.attenuation;
        assert_eq!(attenuation.factor(Side::Left, SeatPosition::Aisle), 0.25);
        assert_eq!(attenuation.factor(Side::Left, SeatPosition::Middle), ATTENUATION_MIDDLE);
        assert_eq!(attenuation.factor(Side::Right, SeatPosition::Middle), 0.4);
        assert_eq!(attenuation.factor(Side::Right, SeatPosition::Aisle), 0.15);
        assert_eq!(attenuation.factor(Side::Right, SeatPosition::Window), 1.0);
        assert!(matches!(
            EngineConfig::from_json(r#"{"attenuation": {"right": {"aisle": 0.8}}}"#),
            Err(ExposureError::InvalidConfig(_))
        ));
    }

    #[test]
    fn sample_interval_has_a_floor() {
        for interval in ["1e-12", "0.009", "-1.0"] {
            let json = format!(r#"{{"sample_interval_km": {}}}"#, interval);
            assert!(matches!(
                EngineConfig::from_json(&json),
                Err(ExposureError::InvalidConfig(_))
            ));
        }
        let config = EngineConfig::from_json(r#"{"sample_interval_km": 0.01}"#).unwrap();
        assert_eq!(config.sample_interval_km, Some(MIN_SAMPLE_INTERVAL_KM));
    }
}
