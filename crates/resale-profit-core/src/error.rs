use thiserror::Error;

#[derive(Debug, Error)]
pub enum ProfitError {
    #[error("Invalid input: {field}: {reason}")]
    InvalidInput { field: String, reason: String },

    #[error("Export failed: {0}")]
    Export(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl ProfitError {
    pub fn invalid(field: impl Into<String>, reason: impl Into<String>) -> Self {
        ProfitError::InvalidInput {
            field: field.into(),
            reason: reason.into(),
        }
    }
}

impl From<serde_json::Error> for ProfitError {
    fn from(e: serde_json::Error) -> Self {
        ProfitError::SerializationError(e.to_string())
    }
}
