use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum LuftError {
    #[error("no threshold entry for pollutant '{pollutant}'")]
    UnknownPollutant { pollutant: String },

    #[error("cannot score an empty observation")]
    EmptyObservation,

    #[error("failed to parse dataset: {0}")]
    ParseError(String),

    #[error("failed to load dataset from {path}: {reason}")]
    DatasetLoad { path: PathBuf, reason: String },

    #[error("failed to load threshold table from {path}: {reason}")]
    ThresholdsLoad { path: PathBuf, reason: String },

    #[error("invalid threshold table: {0}")]
    ThresholdsInvalid(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
