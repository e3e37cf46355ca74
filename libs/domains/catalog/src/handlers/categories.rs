use axum::{
    extract::State,
    routing::get,
    Router,
};
use axum_helpers::{
    responses::{
        BadRequestResponse, ConflictResponse, InternalServerErrorResponse, NotFoundResponse,
    },
    Envelope, UuidPath, ValidatedJson,
};
use std::sync::Arc;
use utoipa::OpenApi;

use crate::models::{CategoryRequest, CategoryResponse};
use crate::repository::{CategoryRepository, ProductRepository};
use crate::service::CategoryService;

/// OpenAPI documentation for the Categories API
#[derive(OpenApi)]
#[openapi(
    paths(
        list_categories,
        create_category,
        get_category,
        update_category,
        delete_category,
    ),
    components(
        schemas(CategoryRequest, CategoryResponse),
        responses(
            BadRequestResponse,
            NotFoundResponse,
            ConflictResponse,
            InternalServerErrorResponse
        )
    ),
    tags(
        (name = "Categories", description = "Product category management endpoints")
    )
)]
pub struct ApiDoc;

/// Create the categories router
pub fn router<C, P>(service: CategoryService<C, P>) -> Router
where
    C: CategoryRepository + 'static,
    P: ProductRepository + 'static,
{
    let shared_service = Arc::new(service);

    Router::new()
        .route("/", get(list_categories).post(create_category))
        .route(
            "/{id}",
            get(get_category)
                .put(update_category)
                .delete(delete_category),
        )
        .with_state(shared_service)
}

/// List all categories
#[utoipa::path(
    get,
    path = "",
    tag = "Categories",
    responses(
        (status = 200, description = "All categories", body = Vec<CategoryResponse>),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn list_categories<C: CategoryRepository, P: ProductRepository>(
    State(service): State<Arc<CategoryService<C, P>>>,
) -> Envelope<Vec<CategoryResponse>> {
    service.get_all_categories().await
}

/// Create a new category
#[utoipa::path(
    post,
    path = "",
    tag = "Categories",
    request_body = CategoryRequest,
    responses(
        (status = 201, description = "Category created", body = CategoryResponse),
        (status = 400, response = BadRequestResponse),
        (status = 409, response = ConflictResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn create_category<C: CategoryRepository, P: ProductRepository>(
    State(service): State<Arc<CategoryService<C, P>>>,
    ValidatedJson(request): ValidatedJson<CategoryRequest>,
) -> Envelope<CategoryResponse> {
    service.add_category(request).await
}

/// Get a category by id
#[utoipa::path(
    get,
    path = "/{id}",
    tag = "Categories",
    params(("id" = Uuid, Path, description = "Category id")),
    responses(
        (status = 200, description = "Category found", body = CategoryResponse),
        (status = 400, response = BadRequestResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn get_category<C: CategoryRepository, P: ProductRepository>(
    State(service): State<Arc<CategoryService<C, P>>>,
    UuidPath(id): UuidPath,
) -> Envelope<CategoryResponse> {
    service.get_category(id).await
}

/// Update a category (overwrites name and description)
#[utoipa::path(
    put,
    path = "/{id}",
    tag = "Categories",
    params(("id" = Uuid, Path, description = "Category id")),
    request_body = CategoryRequest,
    responses(
        (status = 200, description = "Category updated", body = CategoryResponse),
        (status = 400, response = BadRequestResponse),
        (status = 404, response = NotFoundResponse),
        (status = 409, response = ConflictResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn update_category<C: CategoryRepository, P: ProductRepository>(
    State(service): State<Arc<CategoryService<C, P>>>,
    UuidPath(id): UuidPath,
    ValidatedJson(request): ValidatedJson<CategoryRequest>,
) -> Envelope<CategoryResponse> {
    service.update_category(id, request).await
}

/// Delete a category (blocked while products reference it)
#[utoipa::path(
    delete,
    path = "/{id}",
    tag = "Categories",
    params(("id" = Uuid, Path, description = "Category id")),
    responses(
        (status = 200, description = "Category deleted"),
        (status = 400, response = BadRequestResponse),
        (status = 404, response = NotFoundResponse),
        (status = 409, response = ConflictResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn delete_category<C: CategoryRepository, P: ProductRepository>(
    State(service): State<Arc<CategoryService<C, P>>>,
    UuidPath(id): UuidPath,
) -> Envelope<CategoryResponse> {
    service.delete_category(id).await
}
