#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Unknown pose: {0}")]
    UnknownPose(String),

    #[error("Invalid filename: {0}")]
    InvalidFilename(String),

    #[error("Failed to load character config {path}: {reason}")]
    ConfigLoad { path: String, reason: String },
}
