use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
};
use axum_helpers::{
    ApiResponse,
    errors::responses::{
        BadRequestValidationResponse, ConflictResponse, InternalServerErrorResponse,
        NotFoundResponse,
    },
};
use std::sync::Arc;
use utoipa::OpenApi;

use crate::error::DonationResult;
use crate::models::{CreateDonation, DonationFilter, DonationRecord, DonationStats};
use crate::repository::DonationRepository;
use crate::service::DonationService;

/// OpenAPI documentation for the Donations API
#[derive(OpenApi)]
#[openapi(
    paths(
        list_donations,
        record_donation,
        get_donation,
        count_donations,
        donation_stats,
    ),
    components(
        schemas(DonationRecord, CreateDonation, DonationFilter, DonationStats),
        responses(
            NotFoundResponse,
            BadRequestValidationResponse,
            ConflictResponse,
            InternalServerErrorResponse
        )
    ),
    tags(
        (name = "Donations", description = "Monetary and in-kind donation ledger endpoints")
    )
)]
pub struct ApiDoc;

/// Create the donations router with all HTTP endpoints
pub fn router<R: DonationRepository + 'static>(service: DonationService<R>) -> Router {
    let shared_service = Arc::new(service);

    Router::new()
        .route("/", get(list_donations).post(record_donation))
        .route("/count", get(count_donations))
        .route("/stats", get(donation_stats))
        .route("/{id}", get(get_donation))
        .with_state(shared_service)
}

/// Record a donation
#[utoipa::path(
    post,
    path = "",
    tag = "Donations",
    request_body = CreateDonation,
    responses(
        (status = 201, description = "Donation recorded successfully", body = ApiResponse<DonationRecord>),
        (status = 400, response = BadRequestValidationResponse),
        (status = 409, response = ConflictResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn record_donation<R: DonationRepository>(
    State(service): State<Arc<DonationService<R>>>,
    Json(input): Json<CreateDonation>,
) -> DonationResult<impl IntoResponse> {
    let record = service.record_donation(input).await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::new(record))))
}

/// List donations with optional filters, newest first
#[utoipa::path(
    get,
    path = "",
    tag = "Donations",
    params(DonationFilter),
    responses(
        (status = 200, description = "List of donation records", body = ApiResponse<Vec<DonationRecord>>),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn list_donations<R: DonationRepository>(
    State(service): State<Arc<DonationService<R>>>,
    Query(filter): Query<DonationFilter>,
) -> DonationResult<Json<ApiResponse<Vec<DonationRecord>>>> {
    let records = service.list_donations(filter).await?;
    Ok(Json(ApiResponse::new(records)))
}

/// Get a donation by ID
#[utoipa::path(
    get,
    path = "/{id}",
    tag = "Donations",
    params(
        ("id" = String, Path, description = "Donation ID (e.g. don_V1StGXR8)")
    ),
    responses(
        (status = 200, description = "Donation found", body = ApiResponse<DonationRecord>),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn get_donation<R: DonationRepository>(
    State(service): State<Arc<DonationService<R>>>,
    Path(id): Path<String>,
) -> DonationResult<Json<ApiResponse<DonationRecord>>> {
    let record = service.get_donation(&id).await?;
    Ok(Json(ApiResponse::new(record)))
}

/// Count donations matching a filter
#[utoipa::path(
    get,
    path = "/count",
    tag = "Donations",
    params(DonationFilter),
    responses(
        (status = 200, description = "Donation count", body = ApiResponse<u64>),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn count_donations<R: DonationRepository>(
    State(service): State<Arc<DonationService<R>>>,
    Query(filter): Query<DonationFilter>,
) -> DonationResult<Json<ApiResponse<u64>>> {
    let count = service.count_donations(filter).await?;
    Ok(Json(ApiResponse::new(count)))
}

/// Aggregated donation totals
#[utoipa::path(
    get,
    path = "/stats",
    tag = "Donations",
    responses(
        (status = 200, description = "Aggregated donation totals", body = ApiResponse<DonationStats>),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn donation_stats<R: DonationRepository>(
    State(service): State<Arc<DonationService<R>>>,
) -> DonationResult<Json<ApiResponse<DonationStats>>> {
    let stats = service.stats().await?;
    Ok(Json(ApiResponse::new(stats)))
}
