//! OpenAPI documentation configuration

use utoipa::OpenApi;

/// Combined OpenAPI documentation for all APIs
#[derive(OpenApi)]
#[openapi(
    info(
        title = "MakerLab API",
        version = "0.1.0",
        description = "Makerspace pricing, payment, and donation ledger API",
        license(name = "MIT")
    ),
    servers(
        (url = "http://localhost:8080", description = "Local development server")
    ),
    nest(
        (path = "/api/payments", api = domain_payments::ApiDoc),
        (path = "/api/donations", api = domain_donations::ApiDoc),
        (path = "/api/catalog", api = domain_catalog::ApiDoc)
    ),
    tags(
        (name = "Payments", description = "Service pricing and payment ledger"),
        (name = "Donations", description = "Monetary and in-kind donations"),
        (name = "Catalog", description = "Tool and component inventory")
    )
)]
pub struct ApiDoc;
