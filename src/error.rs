use thiserror::Error;

/// Result type used throughout spotloop.
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    /// Rejected weight configuration (negative weight, non-positive event duration).
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// A spot with a non-positive duration reached playlist generation.
    /// Never skipped silently: skipping would understate the required airtime.
    #[error("spot '{name}' (id {id}) has non-positive duration {duration_seconds}s")]
    InvalidSpotDuration {
        id: u32,
        name: String,
        duration_seconds: f64,
    },

    /// I/O error from the storage layer
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Malformed storage file
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Export serialization error
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}
