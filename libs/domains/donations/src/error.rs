use axum::response::{IntoResponse, Response};
use axum_helpers::AppError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DonationError {
    #[error("Unknown donation type: {0}")]
    InvalidType(String),

    #[error("Invalid {field}: {reason}")]
    InvalidInput { field: String, reason: String },

    #[error("Donation not found: {0}")]
    NotFound(String),

    #[error("Donation identifier collision: {0}")]
    DuplicateId(String),

    #[error("Database error: {0}")]
    Database(String),
}

impl DonationError {
    /// Shorthand for an invalid-input error naming the offending field.
    pub fn invalid(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidInput {
            field: field.into(),
            reason: reason.into(),
        }
    }
}

pub type DonationResult<T> = Result<T, DonationError>;

/// Convert DonationError to AppError for standardized error responses
impl From<DonationError> for AppError {
    fn from(err: DonationError) -> Self {
        match err {
            DonationError::InvalidType(_) | DonationError::InvalidInput { .. } => {
                AppError::BadRequest(err.to_string())
            }
            DonationError::NotFound(id) => {
                AppError::NotFound(format!("Donation {} not found", id))
            }
            DonationError::DuplicateId(_) => AppError::Conflict(
                "Donation identifier collision persisted after retry; please resubmit".to_string(),
            ),
            DonationError::Database(msg) => AppError::Database(msg),
        }
    }
}

impl IntoResponse for DonationError {
    fn into_response(self) -> Response {
        let app_error: AppError = self.into();
        app_error.into_response()
    }
}
