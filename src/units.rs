use num_traits::Zero;
use std::ops::Add;

pub trait Unit<T> {
    fn confine(value: T) -> Self;
    fn release(self) -> T;
}

/// compass bearing, clockwise from true north, confined to [0, 360)
#[derive(Debug, Copy, Clone, PartialEq, PartialOrd)]
pub struct Bearing(f64);

impl Unit<f64> for Bearing {
    fn confine(value: f64) -> Self {
        let angle = value.rem_euclid(360.0);
        // rem_euclid can round up to exactly 360 for tiny negative inputs
        Self(if angle >= 360.0 { 0.0 } else { angle })
    }

    fn release(self) -> f64 {
        self.0
    }
}

/// signed angle between two bearings, confined to (-180, 180]
#[derive(Debug, Copy, Clone, PartialEq, PartialOrd)]
pub struct Relative(f64);

impl Relative {
    /// angle of `target` as seen from a body facing `heading`, positive to the right
    pub fn between(target: Bearing, heading: Bearing) -> Self {
        Self::confine(target.release() - heading.release())
    }
}

impl Unit<f64> for Relative {
    fn confine(value: f64) -> Self {
        let angle = (value + 180.0).rem_euclid(360.0) - 180.0;
        Self(if angle <= -180.0 { 180.0 } else { angle })
    }

    fn release(self) -> f64 {
        self.0
    }
}

/// elapsed time in minutes
#[derive(Debug, Copy, Clone, Default, PartialEq, PartialOrd)]
pub struct Minutes(f64);

impl Minutes {
    pub fn from_seconds(seconds: f64) -> Self {
        Self(seconds / 60.0)
    }

    pub fn scale(self, factor: f64) -> Self {
        Self(self.0 * factor)
    }
}

impl Unit<f64> for Minutes {
    fn confine(value: f64) -> Self {
        Self(value)
    }

    fn release(self) -> f64 {
        self.0
    }
}

impl Add for Minutes {
    type Output = Self;

    fn add(self, other: Self) -> Self::Output {
        Self(self.0 + other.0)
    }
}

impl Zero for Minutes {
    fn zero() -> Self {
        Self(0.0)
    }

    fn is_zero(&self) -> bool {
        self.0 == 0.0
    }
}
