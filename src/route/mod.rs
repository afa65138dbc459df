pub mod polyline;
pub mod segment;

pub use polyline::{Coordinate, RoutePolyline};
pub use segment::{segment, Segment, SpeedModel};
