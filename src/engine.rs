use crate::{
    config::EngineConfig,
    error::Result,
    exposure::{
        accumulate, assemble, ExposureReport, ModelTag, SeatExposureModel, SeatLayout, SeatSpec,
    },
    request::RouteRequest,
    route::{segment, RoutePolyline, SpeedModel},
};
use chrono::{DateTime, FixedOffset};
use log::info;

/// the sun exposure pipeline for one vehicle layout
///
/// Immutable once built, so one engine can serve concurrent requests.
#[derive(Clone, Debug)]
pub struct Engine {
    config: EngineConfig,
    layout: SeatLayout,
    seats: Vec<SeatSpec>,
    model: SeatExposureModel,
}

impl Engine {
    pub fn new(config: EngineConfig, layout: SeatLayout) -> Result<Self> {
        config.validate()?;
        layout.validate()?;
        let seats = layout.template();
        let model = SeatExposureModel::new(config.attenuation, config.seat_weighting, &layout);
        Ok(Self {
            config,
            layout,
            seats,
            model,
        })
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn layout(&self) -> &SeatLayout {
        &self.layout
    }

    /// assess a journey at the configured speed
    pub fn assess(
        &self,
        polyline: &RoutePolyline,
        departure: &DateTime<FixedOffset>,
    ) -> Result<ExposureReport> {
        self.assess_with(polyline, departure, &self.config.speed)
    }

    /// assess a journey with explicit timing
    pub fn assess_with(
        &self,
        polyline: &RoutePolyline,
        departure: &DateTime<FixedOffset>,
        speed: &SpeedModel,
    ) -> Result<ExposureReport> {
        info!(
            "assessing {} point route departing {}",
            polyline.points().len(),
            departure.to_rfc3339()
        );
        let segments = segment(polyline, departure, speed)?;
        let totals = accumulate(&segments, &self.config);
        let seats = self.model.score_all(&self.seats, &totals);
        Ok(assemble(seats, &totals, ModelTag::from(&self.config)))
    }

    /// assess a transport-layer request, preferring its router timing
    pub fn handle(&self, request: &RouteRequest) -> Result<ExposureReport> {
        let polyline = request.polyline()?;
        let departure = request.departure()?;
        match request.speed() {
            Some(speed) => self.assess_with(&polyline, &departure, &speed),
            None => self.assess(&polyline, &departure),
        }
    }
}

impl Default for Engine {
    fn default() -> Self {
        let config = EngineConfig::default();
        let layout = SeatLayout::default();
        Self {
            seats: layout.template(),
            model: SeatExposureModel::new(config.attenuation, config.seat_weighting, &layout),
            config,
            layout,
        }
    }
}
