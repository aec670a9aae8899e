//! Success envelope for API responses.

use serde::Serialize;
use utoipa::ToSchema;

/// Standard success envelope wrapping response payloads.
///
/// Every successful endpoint returns `{"success": true, "data": ...}`, the
/// counterpart of [`crate::errors::ErrorResponse`] which always carries
/// `"success": false`. Clients can branch on `success` without inspecting
/// the HTTP status first.
#[derive(Debug, Serialize, ToSchema)]
pub struct ApiResponse<T> {
    /// Always `true` for this envelope
    pub success: bool,
    /// The response payload
    pub data: T,
}

impl<T> ApiResponse<T> {
    /// Wrap a payload in the success envelope.
    pub fn new(data: T) -> Self {
        Self {
            success: true,
            data,
        }
    }
}
