use utoipa::OpenApi;

/// Merged OpenAPI documentation for the whole API surface
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Storefront API",
        description = "Profiles, products, and product categories behind a uniform response envelope"
    ),
    nest(
        (path = "/api/categories", api = domain_catalog::handlers::categories::ApiDoc),
        (path = "/api/products", api = domain_catalog::handlers::products::ApiDoc),
        (path = "/api/profiles", api = domain_profiles::handlers::ApiDoc)
    )
)]
pub struct ApiDoc;
