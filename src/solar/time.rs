use crate::vars::*;
use chrono::{DateTime, Utc};

/// julian day of a UTC instant, leap seconds ignored
pub fn julian_day(instant: &DateTime<Utc>) -> f64 {
    let seconds = instant.timestamp() as f64 + f64::from(instant.timestamp_subsec_nanos()) * 1e-9;
    seconds / SECONDS_PER_DAY + UNIX_EPOCH_JD
}

/// days elapsed since the J2000.0 epoch
pub fn days_since_j2000(jd: f64) -> f64 {
    jd - J2000_JD
}

/// julian centuries elapsed since the J2000.0 epoch
pub fn centuries_since_j2000(jd: f64) -> f64 {
    days_since_j2000(jd) / DAYS_PER_CENTURY
}
