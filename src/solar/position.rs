use crate::{
    solar::time::{centuries_since_j2000, days_since_j2000, julian_day},
    units::{Bearing, Unit},
};
use chrono::{DateTime, Utc};
use serde::Serialize;

/* # solar coordinates */

/// position of the sun in the local horizontal frame of an observer
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SolarPosition {
    /// degrees clockwise from true north, [0, 360)
    pub azimuth: f64,
    /// degrees above the horizon, [-90, 90]
    pub elevation: f64,
}

impl SolarPosition {
    /// true if the sun can shine directly on the observer
    pub fn is_above_horizon(&self) -> bool {
        self.elevation > 0.0
    }

    pub fn bearing(&self) -> Bearing {
        Bearing::confine(self.azimuth)
    }
}

/// equatorial coordinates of the sun, degrees
struct Equatorial {
    declination: f64,
    right_ascension: f64,
}

fn equatorial(t: f64) -> Equatorial {
    let mean_longitude = (280.46646 + t * (36000.76983 + t * 0.0003032)).rem_euclid(360.0);
    let mean_anomaly = (357.52911 + t * (35999.05029 - t * 0.0001537)).to_radians();

    let centre = (1.914602 - t * (0.004817 + t * 0.000014)) * mean_anomaly.sin()
        + (0.019993 - t * 0.000101) * (2.0 * mean_anomaly).sin()
        + 0.000289 * (3.0 * mean_anomaly).sin();

    // nutation and aberration folded into the apparent longitude
    let omega = (125.04 - 1934.136 * t).to_radians();
    let apparent = (mean_longitude + centre - 0.00569 - 0.00478 * omega.sin()).to_radians();

    let mean_obliquity =
        23.0 + (26.0 + (21.448 - t * (46.815 + t * (0.00059 - t * 0.001813))) / 60.0) / 60.0;
    let obliquity = (mean_obliquity + 0.00256 * omega.cos()).to_radians();

    Equatorial {
        declination: (obliquity.sin() * apparent.sin()).asin().to_degrees(),
        right_ascension: (obliquity.cos() * apparent.sin())
            .atan2(apparent.cos())
            .to_degrees()
            .rem_euclid(360.0),
    }
}

/// greenwich mean sidereal time, degrees
fn sidereal_time(jd: f64) -> f64 {
    let d = days_since_j2000(jd);
    let t = centuries_since_j2000(jd);
    (280.46061837 + 360.98564736629 * d + t * t * (0.000387933 - t / 38710000.0)).rem_euclid(360.0)
}

/// apparent solar declination at a given instant, degrees
pub fn declination(instant: &DateTime<Utc>) -> f64 {
    equatorial(centuries_since_j2000(julian_day(instant))).declination
}

/// calculate the azimuth and elevation of the sun seen from (lat, lon) at a UTC instant
pub fn position(latitude: f64, longitude: f64, instant: &DateTime<Utc>) -> SolarPosition {
    let jd = julian_day(instant);
    let sun = equatorial(centuries_since_j2000(jd));

    // local hour angle, negative before the meridian transit
    let hour_angle = (sidereal_time(jd) + longitude - sun.right_ascension + 180.0)
        .rem_euclid(360.0)
        - 180.0;

    let lat = latitude.to_radians();
    let decl = sun.declination.to_radians();
    let ha = hour_angle.to_radians();

    let sin_elevation = lat.sin() * decl.sin() + lat.cos() * decl.cos() * ha.cos();
    let elevation = sin_elevation.clamp(-1.0, 1.0).asin();

    let cos_azimuth = (decl.sin() - elevation.sin() * lat.sin())
        / (elevation.cos() * lat.cos()).max(1e-10);
    let mut azimuth = cos_azimuth.clamp(-1.0, 1.0).acos().to_degrees();
    if hour_angle > 0.0 {
        azimuth = 360.0 - azimuth;
    }

    SolarPosition {
        azimuth: Bearing::confine(azimuth).release(),
        elevation: elevation.to_degrees(),
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use chrono::TimeZone;
    use float_eq::assert_float_eq;

    #[test]
    fn declination_at_solstice() {
        let solstice = Utc.with_ymd_and_hms(2024, 6, 20, 20, 51, 0).unwrap();
        assert_float_eq!(declination(&solstice), 23.44, abs <= 0.05);
    }

    #[test]
    fn declination_at_equinox() {
        let equinox = Utc.with_ymd_and_hms(2024, 3, 20, 3, 6, 0).unwrap();
        assert_float_eq!(declination(&equinox), 0.0, abs <= 0.05);
    }

    #[test]
    fn equator_noon_at_equinox() {
        let noon = Utc.with_ymd_and_hms(2024, 3, 20, 12, 0, 0).unwrap();
        let pos = position(0.0, 0.0, &noon);
        assert!(pos.elevation > 87.5, "sun should be near zenith: {:?}", pos);
        assert!(pos.is_above_horizon());
    }

    #[test]
    fn winter_noon_is_south() {
        // 06:30 UTC is noon in +05:30
        let noon = Utc.with_ymd_and_hms(2024, 12, 21, 6, 30, 0).unwrap();
        let pos = position(12.97, 77.59, &noon);
        assert!(pos.azimuth > 160.0 && pos.azimuth < 180.0, "{:?}", pos);
        assert_float_eq!(pos.elevation, 53.3, abs <= 1.0);
    }

    #[test]
    fn afternoon_is_west() {
        let afternoon = Utc.with_ymd_and_hms(2024, 12, 21, 10, 30, 0).unwrap();
        let pos = position(12.97, 77.59, &afternoon);
        assert!(pos.azimuth > 180.0 && pos.azimuth < 270.0, "{:?}", pos);
        assert!(pos.is_above_horizon());
    }

    #[test]
    fn summer_morning_is_north_of_east() {
        let morning = Utc.with_ymd_and_hms(2024, 6, 21, 1, 30, 0).unwrap();
        let pos = position(12.97, 77.59, &morning);
        assert!(pos.azimuth > 45.0 && pos.azimuth < 90.0, "{:?}", pos);
        assert!(pos.is_above_horizon());
    }

    #[test]
    fn midnight_is_dark() {
        let midnight = Utc.with_ymd_and_hms(2024, 12, 21, 18, 30, 0).unwrap();
        let pos = position(12.97, 77.59, &midnight);
        assert!(!pos.is_above_horizon());
        assert!(pos.elevation < -45.0);
    }

    #[test]
    fn position_is_deterministic() {
        let instant = Utc.with_ymd_and_hms(2023, 9, 1, 4, 12, 33).unwrap();
        assert_eq!(position(28.6, 77.2, &instant), position(28.6, 77.2, &instant));
    }
}
