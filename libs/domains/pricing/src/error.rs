use axum::response::{IntoResponse, Response};
use axum_helpers::AppError;
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum PricingError {
    #[error("Invalid {field}: {reason}")]
    InvalidInput { field: String, reason: String },

    #[error("At least one catalog item with a positive quantity is required")]
    EmptySelection,

    #[error("Catalog item not found: {0}")]
    ItemNotFound(String),

    #[error("Rate table misconfigured: {0}")]
    Configuration(String),

    #[error("Catalog lookup failed: {0}")]
    Catalog(String),
}

impl PricingError {
    /// Shorthand for an invalid-input error naming the offending field.
    pub fn invalid(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidInput {
            field: field.into(),
            reason: reason.into(),
        }
    }
}

pub type PricingResult<T> = Result<T, PricingError>;

/// Convert PricingError to AppError for standardized error responses
impl From<PricingError> for AppError {
    fn from(err: PricingError) -> Self {
        match err {
            PricingError::InvalidInput { .. } | PricingError::EmptySelection => {
                AppError::BadRequest(err.to_string())
            }
            PricingError::ItemNotFound(id) => {
                AppError::NotFound(format!("Catalog item {} not found", id))
            }
            // A rate-table gap is a deployment defect, not a client problem.
            // Log loudly and return an opaque 500.
            PricingError::Configuration(msg) => {
                tracing::error!("Rate table misconfigured: {}", msg);
                AppError::InternalServerError(msg)
            }
            PricingError::Catalog(msg) => AppError::Database(msg),
        }
    }
}

impl IntoResponse for PricingError {
    fn into_response(self) -> Response {
        let app_error: AppError = self.into();
        app_error.into_response()
    }
}
