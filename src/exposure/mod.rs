pub mod accumulator;
pub mod report;
pub mod seats;

pub use accumulator::{accumulate, classify, ExposureTotals, Side, SideTotals};
pub use report::{assemble, ExposureReport, ModelTag};
pub use seats::{ExposureBand, SeatExposureModel, SeatLayout, SeatPosition, SeatResult, SeatSpec};
