/* # route */

pub const DEFAULT_SPEED_KMH: f64 = 40.0; // average road speed when the router gives no timing
pub const MIN_SEGMENT_KM: f64 = 0.001; // segments shorter than this are coincident points
pub const MIN_SAMPLE_INTERVAL_KM: f64 = 0.01; // finer sun sampling changes nothing measurable

/* # solar */

pub const UNIX_EPOCH_JD: f64 = 2440587.5; // julian day at 1970-01-01T00:00:00Z
pub const J2000_JD: f64 = 2451545.0; // julian day at 2000-01-01T12:00:00Z
pub const SECONDS_PER_DAY: f64 = 86400.0;
pub const DAYS_PER_CENTURY: f64 = 36525.0;

/* # exposure */

pub const ATTENUATION_WINDOW: f64 = 1.0;
pub const ATTENUATION_MIDDLE: f64 = 0.5;
pub const ATTENUATION_AISLE: f64 = 0.1; // shielded by neighbours, not fully dark

pub const BAND_MODERATE: f64 = 0.2; // lower bound of the moderate band
pub const BAND_HIGH: f64 = 0.6; // lower bound of the high band

/* # layout */

pub const TOTAL_ROWS: u32 = 12;

/* # request */

pub const DEFAULT_UTC_OFFSET_MINUTES: i32 = 330; // +05:30, the locale the service was built for
