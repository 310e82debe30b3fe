use thiserror::Error;

pub type Result<T> = std::result::Result<T, CompactionError>;

#[derive(Error, Debug)]
pub enum CompactionError {
    #[error("File I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CSV write error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Activity {id} ('{name}') matches no known activity type")]
    UnclassifiedActivity { id: u64, name: String },

    #[error("Invalid export format in {path}: {message}")]
    InvalidFormat { path: String, message: String },

    #[error("Missing required data: {0}")]
    MissingData(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Configuration load error: {0}")]
    ConfigLoad(#[from] config::ConfigError),

    #[error("Validation error: {0}")]
    Validation(#[from] validator::ValidationErrors),
}
