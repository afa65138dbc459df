//! Estimate how much direct sunlight each seat of a road vehicle receives over a
//! scheduled journey, and rank the seats from shadiest to sunniest.

pub mod config;
pub mod departure;
pub mod engine;
pub mod error;
pub mod exposure;
pub mod request;
pub mod route;
pub mod solar;
pub mod units;
pub mod vars;

pub use config::EngineConfig;
pub use engine::Engine;
pub use error::{ExposureError, Result};
pub use exposure::{ExposureReport, SeatLayout};
pub use request::RouteRequest;
pub use route::{Coordinate, RoutePolyline, SpeedModel};
