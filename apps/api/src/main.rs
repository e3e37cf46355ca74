use axum::Router;
use axum_helpers::{health_router, shutdown_signal};
use core_config::tracing::{init_tracing, install_color_eyre};
use domain_catalog::{CategoryService, PgCategoryRepository, PgProductRepository, ProductService};
use domain_profiles::{PgProfileRepository, ProfileService};
use tower_http::trace::TraceLayer;
use tracing::info;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

mod config;
mod openapi;

use config::Config;

#[tokio::main]
async fn main() -> eyre::Result<()> {
    // color-eyre first, before any fallible operation
    install_color_eyre();

    let config = Config::from_env()?;
    init_tracing(&config.environment);

    let db = database::postgres::connect_with_retry(&config.database, None).await?;
    database::postgres::run_migrations::<migration::Migrator>(&db).await?;

    let category_service = CategoryService::new(
        PgCategoryRepository::new(db.clone()),
        PgProductRepository::new(db.clone()),
    );
    let product_service = ProductService::new(
        PgProductRepository::new(db.clone()),
        PgCategoryRepository::new(db.clone()),
    );
    let profile_service = ProfileService::new(PgProfileRepository::new(db.clone()));

    let app = Router::new()
        .nest(
            "/api/categories",
            domain_catalog::handlers::categories::router(category_service),
        )
        .nest(
            "/api/products",
            domain_catalog::handlers::products::router(product_service),
        )
        .nest(
            "/api/profiles",
            domain_profiles::handlers::router(profile_service),
        )
        .merge(health_router())
        .merge(
            SwaggerUi::new("/docs").url("/api-docs/openapi.json", openapi::ApiDoc::openapi()),
        )
        .layer(TraceLayer::new_for_http());

    let address = config.server.address();
    let listener = tokio::net::TcpListener::bind(&address).await?;
    info!("storefront API listening on {address}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("closing database connection");
    db.close().await?;
    info!("storefront API shutdown complete");

    Ok(())
}
