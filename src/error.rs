use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid latitude {0}° (must be between -90° and +90°)")]
    InvalidLatitude(f64),
    #[error("invalid longitude {0}° (must be between -180° and +180°)")]
    InvalidLongitude(f64),
    /// Solar azimuth is undefined at the poles.
    #[error("latitude {0}° is polar, solar azimuth is undefined there")]
    PolarLatitude(f64),
    #[error("unknown region id '{0}'")]
    UnknownRegion(String),
    #[error("unknown margin mode '{0}' (expected 'factor' or 'fixed')")]
    UnknownMarginMode(String),
    #[error("invalid time label '{0}' (expected HH:MM)")]
    InvalidTimeLabel(String),
    #[error("no design data for {0} (design hours are 09:00 to 15:00)")]
    TimeNotInGrid(String),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
