//! API routes module
//!
//! This module defines all HTTP API routes for the MakerLab API.

pub mod catalog;
pub mod donations;
pub mod health;
pub mod payments;

use axum::Router;

use crate::state::AppState;

/// Create all API routes
/// Note: These are nested under /api by axum_helpers::create_router
pub fn routes(state: &AppState) -> Router {
    Router::new()
        .nest("/payments", payments::router(state))
        .nest("/donations", donations::router(state))
        .nest("/catalog", catalog::router(state))
        .merge(health::router(state.clone()))
}
