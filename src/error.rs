use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid latitude {value}° (must be between -90° and +90°)")]
    InvalidLatitude { value: f64 },

    #[error("invalid longitude {value}° (must be between -180° and +180°)")]
    InvalidLongitude { value: f64 },

    #[error("invalid time {0:?} (expected HH:MM)")]
    InvalidTime(String),

    #[error("malformed settings: {0}")]
    Settings(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
