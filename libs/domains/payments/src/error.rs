use axum::response::{IntoResponse, Response};
use axum_helpers::AppError;
use domain_pricing::PricingError;
use thiserror::Error;

use crate::models::PaymentStatus;

#[derive(Debug, Error)]
pub enum PaymentError {
    #[error(transparent)]
    Pricing(#[from] PricingError),

    #[error("Payment not found: {0}")]
    NotFound(String),

    #[error("Payment identifier collision: {0}")]
    DuplicateId(String),

    #[error("Payment {payment_id} is {from}, only pending payments can transition")]
    InvalidStatusTransition {
        payment_id: String,
        from: PaymentStatus,
    },

    #[error("Invalid input: {0}")]
    Validation(String),

    #[error("Database error: {0}")]
    Database(String),
}

pub type PaymentResult<T> = Result<T, PaymentError>;

/// Convert PaymentError to AppError for standardized error responses
impl From<PaymentError> for AppError {
    fn from(err: PaymentError) -> Self {
        match err {
            PaymentError::Pricing(pricing) => pricing.into(),
            PaymentError::NotFound(id) => AppError::NotFound(format!("Payment {} not found", id)),
            PaymentError::DuplicateId(_) => AppError::Conflict(
                "Payment identifier collision persisted after retry; please resubmit".to_string(),
            ),
            PaymentError::InvalidStatusTransition { .. } => AppError::Conflict(err.to_string()),
            PaymentError::Validation(msg) => AppError::BadRequest(msg),
            PaymentError::Database(msg) => AppError::Database(msg),
        }
    }
}

impl IntoResponse for PaymentError {
    fn into_response(self) -> Response {
        let app_error: AppError = self.into();
        app_error.into_response()
    }
}
