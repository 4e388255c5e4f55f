use thiserror::Error;

#[derive(Debug, Error)]
pub enum WhatIfError {
    #[error("Invalid input: {field} — {reason}")]
    InvalidInput { field: String, reason: String },

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl From<serde_json::Error> for WhatIfError {
    fn from(e: serde_json::Error) -> Self {
        WhatIfError::SerializationError(e.to_string())
    }
}
