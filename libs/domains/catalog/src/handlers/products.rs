use axum::{
    extract::State,
    routing::{get, patch},
    Router,
};
use axum_helpers::{
    responses::{
        BadRequestResponse, ConflictResponse, InternalServerErrorResponse, NotFoundResponse,
    },
    Envelope, UuidPath, ValidatedJson, ValidatedQuery,
};
use std::sync::Arc;
use utoipa::OpenApi;

use crate::models::{
    PageParams, ProductRequest, ProductResponse, ProductSearchParams, StockUpdateRequest,
};
use crate::repository::{CategoryRepository, ProductRepository};
use crate::service::ProductService;

/// OpenAPI documentation for the Products API
#[derive(OpenApi)]
#[openapi(
    paths(
        list_products,
        create_product,
        search_products,
        products_by_category,
        get_product,
        update_product,
        update_stock,
        delete_product,
    ),
    components(
        schemas(ProductRequest, ProductResponse, StockUpdateRequest),
        responses(
            BadRequestResponse,
            NotFoundResponse,
            ConflictResponse,
            InternalServerErrorResponse
        )
    ),
    tags(
        (name = "Products", description = "Product management endpoints")
    )
)]
pub struct ApiDoc;

/// Create the products router
pub fn router<P, C>(service: ProductService<P, C>) -> Router
where
    P: ProductRepository + 'static,
    C: CategoryRepository + 'static,
{
    let shared_service = Arc::new(service);

    Router::new()
        .route("/", get(list_products).post(create_product))
        .route("/search", get(search_products))
        .route("/category/{category_id}", get(products_by_category))
        .route(
            "/{id}",
            get(get_product).put(update_product).delete(delete_product),
        )
        .route("/{id}/stock", patch(update_stock))
        .with_state(shared_service)
}

/// List one page of products
#[utoipa::path(
    get,
    path = "",
    tag = "Products",
    params(PageParams),
    responses(
        (status = 200, description = "One page of products", body = Vec<ProductResponse>),
        (status = 400, response = BadRequestResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn list_products<P: ProductRepository, C: CategoryRepository>(
    State(service): State<Arc<ProductService<P, C>>>,
    ValidatedQuery(params): ValidatedQuery<PageParams>,
) -> Envelope<Vec<ProductResponse>> {
    service.get_all_products(params.request()).await
}

/// Create a new product
#[utoipa::path(
    post,
    path = "",
    tag = "Products",
    request_body = ProductRequest,
    responses(
        (status = 201, description = "Product created", body = ProductResponse),
        (status = 400, response = BadRequestResponse),
        (status = 409, response = ConflictResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn create_product<P: ProductRepository, C: CategoryRepository>(
    State(service): State<Arc<ProductService<P, C>>>,
    ValidatedJson(request): ValidatedJson<ProductRequest>,
) -> Envelope<ProductResponse> {
    service.add_product(request).await
}

/// Search products by optional name substring and category
#[utoipa::path(
    get,
    path = "/search",
    tag = "Products",
    params(ProductSearchParams),
    responses(
        (status = 200, description = "Matching products", body = Vec<ProductResponse>),
        (status = 400, response = BadRequestResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn search_products<P: ProductRepository, C: CategoryRepository>(
    State(service): State<Arc<ProductService<P, C>>>,
    ValidatedQuery(params): ValidatedQuery<ProductSearchParams>,
) -> Envelope<Vec<ProductResponse>> {
    let page = params.request();
    service
        .search_products(params.name, params.category_id, page)
        .await
}

/// List one page of a category's products
#[utoipa::path(
    get,
    path = "/category/{category_id}",
    tag = "Products",
    params(
        ("category_id" = Uuid, Path, description = "Category id"),
        PageParams
    ),
    responses(
        (status = 200, description = "Products in the category", body = Vec<ProductResponse>),
        (status = 400, response = BadRequestResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn products_by_category<P: ProductRepository, C: CategoryRepository>(
    State(service): State<Arc<ProductService<P, C>>>,
    UuidPath(category_id): UuidPath,
    ValidatedQuery(params): ValidatedQuery<PageParams>,
) -> Envelope<Vec<ProductResponse>> {
    service
        .get_products_by_category(category_id, params.request())
        .await
}

/// Get a product by id
#[utoipa::path(
    get,
    path = "/{id}",
    tag = "Products",
    params(("id" = Uuid, Path, description = "Product id")),
    responses(
        (status = 200, description = "Product found", body = ProductResponse),
        (status = 400, response = BadRequestResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn get_product<P: ProductRepository, C: CategoryRepository>(
    State(service): State<Arc<ProductService<P, C>>>,
    UuidPath(id): UuidPath,
) -> Envelope<ProductResponse> {
    service.get_product(id).await
}

/// Fully replace a product's mutable fields
#[utoipa::path(
    put,
    path = "/{id}",
    tag = "Products",
    params(("id" = Uuid, Path, description = "Product id")),
    request_body = ProductRequest,
    responses(
        (status = 200, description = "Product updated", body = ProductResponse),
        (status = 400, response = BadRequestResponse),
        (status = 404, response = NotFoundResponse),
        (status = 409, response = ConflictResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn update_product<P: ProductRepository, C: CategoryRepository>(
    State(service): State<Arc<ProductService<P, C>>>,
    UuidPath(id): UuidPath,
    ValidatedJson(request): ValidatedJson<ProductRequest>,
) -> Envelope<ProductResponse> {
    service.update_product(id, request).await
}

/// Set a product's stock (inventory control)
#[utoipa::path(
    patch,
    path = "/{id}/stock",
    tag = "Products",
    params(("id" = Uuid, Path, description = "Product id")),
    request_body = StockUpdateRequest,
    responses(
        (status = 200, description = "Stock updated", body = ProductResponse),
        (status = 400, response = BadRequestResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn update_stock<P: ProductRepository, C: CategoryRepository>(
    State(service): State<Arc<ProductService<P, C>>>,
    UuidPath(id): UuidPath,
    ValidatedJson(request): ValidatedJson<StockUpdateRequest>,
) -> Envelope<ProductResponse> {
    service.update_stock(id, request.stock).await
}

/// Delete a product
#[utoipa::path(
    delete,
    path = "/{id}",
    tag = "Products",
    params(("id" = Uuid, Path, description = "Product id")),
    responses(
        (status = 200, description = "Product deleted"),
        (status = 400, response = BadRequestResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn delete_product<P: ProductRepository, C: CategoryRepository>(
    State(service): State<Arc<ProductService<P, C>>>,
    UuidPath(id): UuidPath,
) -> Envelope<ProductResponse> {
    service.delete_product(id).await
}
