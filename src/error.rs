use thiserror::Error;

#[derive(Debug, Error)]
pub enum IntakeError {
    #[error("file not found: {}", .0.display())]
    NotFound(std::path::PathBuf),

    #[error("unsupported intake file format: {0}")]
    UnsupportedFormat(String),

    #[error("column '{0}' not found")]
    MissingColumn(&'static str),

    #[error("invalid entry {row}: {reason}")]
    Invalid { row: usize, reason: String },

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),
}

impl IntakeError {
    pub(crate) fn invalid(row: usize, reason: impl Into<String>) -> Self {
        IntakeError::Invalid {
            row,
            reason: reason.into(),
        }
    }
}
