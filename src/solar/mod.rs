pub mod position;
pub mod time;

pub use position::{declination, position, SolarPosition};
