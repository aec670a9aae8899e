use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};
use axum_helpers::{
    ApiResponse, ValidatedJson,
    errors::responses::{
        BadRequestValidationResponse, ConflictResponse, InternalServerErrorResponse,
        NotFoundResponse,
    },
};
use domain_pricing::{CatalogLookup, CostBreakdown, UsageRequest};
use std::sync::Arc;
use utoipa::OpenApi;

use crate::error::PaymentResult;
use crate::models::{CreatePayment, PaymentFilter, PaymentRecord, PaymentStats};
use crate::repository::PaymentRepository;
use crate::service::PaymentService;

/// OpenAPI documentation for the Payments API
#[derive(OpenApi)]
#[openapi(
    paths(
        quote,
        record_payment,
        list_payments,
        get_payment,
        count_payments,
        payment_stats,
        complete_payment,
        fail_payment,
    ),
    components(
        schemas(
            PaymentRecord,
            CreatePayment,
            PaymentFilter,
            PaymentStats,
            UsageRequest,
            CostBreakdown
        ),
        responses(
            NotFoundResponse,
            BadRequestValidationResponse,
            ConflictResponse,
            InternalServerErrorResponse
        )
    ),
    tags(
        (name = "Payments", description = "Service pricing and payment ledger endpoints")
    )
)]
pub struct ApiDoc;

/// Create the payments router with all HTTP endpoints
pub fn router<R, C>(service: PaymentService<R, C>) -> Router
where
    R: PaymentRepository + 'static,
    C: CatalogLookup + 'static,
{
    let shared_service = Arc::new(service);

    Router::new()
        .route("/", get(list_payments).post(record_payment))
        .route("/quote", post(quote))
        .route("/count", get(count_payments))
        .route("/stats", get(payment_stats))
        .route("/{id}", get(get_payment))
        .route("/{id}/complete", post(complete_payment))
        .route("/{id}/fail", post(fail_payment))
        .with_state(shared_service)
}

/// Price a usage request without recording a payment
#[utoipa::path(
    post,
    path = "/quote",
    tag = "Payments",
    request_body = UsageRequest,
    responses(
        (status = 200, description = "Cost breakdown for the described usage", body = ApiResponse<CostBreakdown>),
        (status = 400, description = "Invalid usage request"),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn quote<R: PaymentRepository, C: CatalogLookup>(
    State(service): State<Arc<PaymentService<R, C>>>,
    Json(usage): Json<UsageRequest>,
) -> PaymentResult<Json<ApiResponse<CostBreakdown>>> {
    let breakdown = service.quote(&usage).await?;
    Ok(Json(ApiResponse::new(breakdown)))
}

/// Record a payment for a priced usage request
#[utoipa::path(
    post,
    path = "",
    tag = "Payments",
    request_body = CreatePayment,
    responses(
        (status = 201, description = "Payment recorded successfully", body = ApiResponse<PaymentRecord>),
        (status = 400, response = BadRequestValidationResponse),
        (status = 404, response = NotFoundResponse),
        (status = 409, response = ConflictResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn record_payment<R: PaymentRepository, C: CatalogLookup>(
    State(service): State<Arc<PaymentService<R, C>>>,
    ValidatedJson(input): ValidatedJson<CreatePayment>,
) -> PaymentResult<impl IntoResponse> {
    let record = service.record_payment(input).await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::new(record))))
}

/// List payments with optional filters, newest first
#[utoipa::path(
    get,
    path = "",
    tag = "Payments",
    params(PaymentFilter),
    responses(
        (status = 200, description = "List of payment records", body = ApiResponse<Vec<PaymentRecord>>),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn list_payments<R: PaymentRepository, C: CatalogLookup>(
    State(service): State<Arc<PaymentService<R, C>>>,
    Query(filter): Query<PaymentFilter>,
) -> PaymentResult<Json<ApiResponse<Vec<PaymentRecord>>>> {
    let records = service.list_payments(filter).await?;
    Ok(Json(ApiResponse::new(records)))
}

/// Get a payment by ID
#[utoipa::path(
    get,
    path = "/{id}",
    tag = "Payments",
    params(
        ("id" = String, Path, description = "Payment ID (e.g. pay_V1StGXR8)")
    ),
    responses(
        (status = 200, description = "Payment found", body = ApiResponse<PaymentRecord>),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn get_payment<R: PaymentRepository, C: CatalogLookup>(
    State(service): State<Arc<PaymentService<R, C>>>,
    Path(id): Path<String>,
) -> PaymentResult<Json<ApiResponse<PaymentRecord>>> {
    let record = service.get_payment(&id).await?;
    Ok(Json(ApiResponse::new(record)))
}

/// Count payments matching a filter
#[utoipa::path(
    get,
    path = "/count",
    tag = "Payments",
    params(PaymentFilter),
    responses(
        (status = 200, description = "Payment count", body = ApiResponse<u64>),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn count_payments<R: PaymentRepository, C: CatalogLookup>(
    State(service): State<Arc<PaymentService<R, C>>>,
    Query(filter): Query<PaymentFilter>,
) -> PaymentResult<Json<ApiResponse<u64>>> {
    let count = service.count_payments(filter).await?;
    Ok(Json(ApiResponse::new(count)))
}

/// Aggregated payment totals per service kind and payment method
#[utoipa::path(
    get,
    path = "/stats",
    tag = "Payments",
    responses(
        (status = 200, description = "Aggregated payment totals", body = ApiResponse<PaymentStats>),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn payment_stats<R: PaymentRepository, C: CatalogLookup>(
    State(service): State<Arc<PaymentService<R, C>>>,
) -> PaymentResult<Json<ApiResponse<PaymentStats>>> {
    let stats = service.stats().await?;
    Ok(Json(ApiResponse::new(stats)))
}

/// Mark a pending payment as completed
#[utoipa::path(
    post,
    path = "/{id}/complete",
    tag = "Payments",
    params(
        ("id" = String, Path, description = "Payment ID")
    ),
    responses(
        (status = 200, description = "Payment completed", body = ApiResponse<PaymentRecord>),
        (status = 404, response = NotFoundResponse),
        (status = 409, response = ConflictResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn complete_payment<R: PaymentRepository, C: CatalogLookup>(
    State(service): State<Arc<PaymentService<R, C>>>,
    Path(id): Path<String>,
) -> PaymentResult<Json<ApiResponse<PaymentRecord>>> {
    let record = service.complete_payment(&id).await?;
    Ok(Json(ApiResponse::new(record)))
}

/// Mark a pending payment as failed
#[utoipa::path(
    post,
    path = "/{id}/fail",
    tag = "Payments",
    params(
        ("id" = String, Path, description = "Payment ID")
    ),
    responses(
        (status = 200, description = "Payment marked as failed", body = ApiResponse<PaymentRecord>),
        (status = 404, response = NotFoundResponse),
        (status = 409, response = ConflictResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn fail_payment<R: PaymentRepository, C: CatalogLookup>(
    State(service): State<Arc<PaymentService<R, C>>>,
    Path(id): Path<String>,
) -> PaymentResult<Json<ApiResponse<PaymentRecord>>> {
    let record = service.fail_payment(&id).await?;
    Ok(Json(ApiResponse::new(record)))
}
