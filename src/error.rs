use thiserror::Error;

/// everything the engine can refuse to compute
#[derive(Debug, Error)]
pub enum ExposureError {
    #[error("route has no usable path")]
    DegenerateRoute,
    #[error("coordinate out of bounds: lat {lat}, lon {lon}")]
    InvalidCoordinate { lat: f64, lon: f64 },
    #[error("departure has no resolvable UTC offset: {0}")]
    ClockSkew(String),
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("malformed request: {0}")]
    Request(#[from] serde_json::Error),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, ExposureError>;
