use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
};
use axum_helpers::{
    ApiResponse, ValidatedJson,
    errors::responses::{
        BadRequestValidationResponse, ConflictResponse, InternalServerErrorResponse,
        NotFoundResponse,
    },
};
use std::sync::Arc;
use utoipa::OpenApi;

use crate::error::CatalogResult;
use crate::models::{CatalogFilter, CatalogItem, CreateCatalogItem, UpdateCatalogItem};
use crate::repository::CatalogRepository;
use crate::service::CatalogService;

/// OpenAPI documentation for the Catalog API
#[derive(OpenApi)]
#[openapi(
    paths(list_items, create_item, get_item, update_item, delete_item, count_items),
    components(
        schemas(CatalogItem, CreateCatalogItem, UpdateCatalogItem, CatalogFilter),
        responses(
            NotFoundResponse,
            BadRequestValidationResponse,
            ConflictResponse,
            InternalServerErrorResponse
        )
    ),
    tags(
        (name = "Catalog", description = "Tool and component inventory endpoints")
    )
)]
pub struct ApiDoc;

/// Create the catalog router with all HTTP endpoints
pub fn router<R: CatalogRepository + 'static>(service: CatalogService<R>) -> Router {
    let shared_service = Arc::new(service);

    Router::new()
        .route("/", get(list_items).post(create_item))
        .route("/count", get(count_items))
        .route("/{id}", get(get_item).put(update_item).delete(delete_item))
        .with_state(shared_service)
}

/// List catalog items with optional filters
#[utoipa::path(
    get,
    path = "",
    tag = "Catalog",
    params(CatalogFilter),
    responses(
        (status = 200, description = "List of catalog items", body = ApiResponse<Vec<CatalogItem>>),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn list_items<R: CatalogRepository>(
    State(service): State<Arc<CatalogService<R>>>,
    Query(filter): Query<CatalogFilter>,
) -> CatalogResult<Json<ApiResponse<Vec<CatalogItem>>>> {
    let items = service.list_items(filter).await?;
    Ok(Json(ApiResponse::new(items)))
}

/// Create a new catalog item
#[utoipa::path(
    post,
    path = "",
    tag = "Catalog",
    request_body = CreateCatalogItem,
    responses(
        (status = 201, description = "Catalog item created successfully", body = ApiResponse<CatalogItem>),
        (status = 400, response = BadRequestValidationResponse),
        (status = 409, response = ConflictResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn create_item<R: CatalogRepository>(
    State(service): State<Arc<CatalogService<R>>>,
    ValidatedJson(input): ValidatedJson<CreateCatalogItem>,
) -> CatalogResult<impl IntoResponse> {
    let item = service.create_item(input).await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::new(item))))
}

/// Get a catalog item by ID
#[utoipa::path(
    get,
    path = "/{id}",
    tag = "Catalog",
    params(
        ("id" = String, Path, description = "Catalog item ID (e.g. tool_V1StGXR8)")
    ),
    responses(
        (status = 200, description = "Catalog item found", body = ApiResponse<CatalogItem>),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn get_item<R: CatalogRepository>(
    State(service): State<Arc<CatalogService<R>>>,
    Path(id): Path<String>,
) -> CatalogResult<Json<ApiResponse<CatalogItem>>> {
    let item = service.get_item(&id).await?;
    Ok(Json(ApiResponse::new(item)))
}

/// Update a catalog item
#[utoipa::path(
    put,
    path = "/{id}",
    tag = "Catalog",
    params(
        ("id" = String, Path, description = "Catalog item ID")
    ),
    request_body = UpdateCatalogItem,
    responses(
        (status = 200, description = "Catalog item updated successfully", body = ApiResponse<CatalogItem>),
        (status = 400, response = BadRequestValidationResponse),
        (status = 404, response = NotFoundResponse),
        (status = 409, response = ConflictResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn update_item<R: CatalogRepository>(
    State(service): State<Arc<CatalogService<R>>>,
    Path(id): Path<String>,
    ValidatedJson(input): ValidatedJson<UpdateCatalogItem>,
) -> CatalogResult<Json<ApiResponse<CatalogItem>>> {
    let item = service.update_item(&id, input).await?;
    Ok(Json(ApiResponse::new(item)))
}

/// Delete a catalog item
#[utoipa::path(
    delete,
    path = "/{id}",
    tag = "Catalog",
    params(
        ("id" = String, Path, description = "Catalog item ID")
    ),
    responses(
        (status = 204, description = "Catalog item deleted successfully"),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn delete_item<R: CatalogRepository>(
    State(service): State<Arc<CatalogService<R>>>,
    Path(id): Path<String>,
) -> CatalogResult<impl IntoResponse> {
    service.delete_item(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Count catalog items matching a filter
#[utoipa::path(
    get,
    path = "/count",
    tag = "Catalog",
    params(CatalogFilter),
    responses(
        (status = 200, description = "Catalog item count", body = ApiResponse<u64>),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn count_items<R: CatalogRepository>(
    State(service): State<Arc<CatalogService<R>>>,
    Query(filter): Query<CatalogFilter>,
) -> CatalogResult<Json<ApiResponse<u64>>> {
    let count = service.count_items(filter).await?;
    Ok(Json(ApiResponse::new(count)))
}
