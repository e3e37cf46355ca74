use axum::{
    extract::{Path, State},
    routing::{get, post},
    Router,
};
use axum_helpers::{
    responses::{
        BadRequestResponse, ConflictResponse, ForbiddenResponse, InternalServerErrorResponse,
        NotFoundResponse,
    },
    Envelope, UserId, UuidPath, ValidatedJson, ValidatedQuery,
};
use std::sync::Arc;
use utoipa::OpenApi;

use crate::models::{
    CreateProfileRequest, ProfileResponse, ProfileSearchParams, ProfileStats,
    PublicProfileResponse, UpdateProfileRequest,
};
use crate::repository::ProfileRepository;
use crate::service::ProfileService;

/// OpenAPI documentation for the Profiles API
#[derive(OpenApi)]
#[openapi(
    paths(
        create_profile,
        update_profile,
        delete_profile,
        get_my_profile,
        get_public_profiles,
        search_profiles,
        profiles_by_location,
        get_profile_stats,
        get_profile,
    ),
    components(
        schemas(
            CreateProfileRequest,
            UpdateProfileRequest,
            ProfileResponse,
            PublicProfileResponse,
            ProfileStats
        ),
        responses(
            BadRequestResponse,
            NotFoundResponse,
            ConflictResponse,
            ForbiddenResponse,
            InternalServerErrorResponse
        )
    ),
    tags(
        (name = "Profiles", description = "User profile endpoints")
    )
)]
pub struct ApiDoc;

/// Create the profiles router.
///
/// The caller's identity arrives in the `X-User-Id` header, set by the
/// gateway after consulting the identity service.
pub fn router<R: ProfileRepository + 'static>(service: ProfileService<R>) -> Router {
    let shared_service = Arc::new(service);

    Router::new()
        .route(
            "/",
            post(create_profile)
                .put(update_profile)
                .delete(delete_profile),
        )
        .route("/me", get(get_my_profile))
        .route("/public", get(get_public_profiles))
        .route("/search", get(search_profiles))
        .route("/location/{location}", get(profiles_by_location))
        .route("/stats", get(get_profile_stats))
        .route("/{profile_id}", get(get_profile))
        .with_state(shared_service)
}

/// Create the caller's profile
#[utoipa::path(
    post,
    path = "",
    tag = "Profiles",
    request_body = CreateProfileRequest,
    responses(
        (status = 201, description = "Profile created", body = ProfileResponse),
        (status = 400, response = BadRequestResponse),
        (status = 409, response = ConflictResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn create_profile<R: ProfileRepository>(
    State(service): State<Arc<ProfileService<R>>>,
    UserId(user_id): UserId,
    ValidatedJson(request): ValidatedJson<CreateProfileRequest>,
) -> Envelope<ProfileResponse> {
    service.create_profile(user_id, request).await
}

/// Patch the caller's profile (only supplied fields change)
#[utoipa::path(
    put,
    path = "",
    tag = "Profiles",
    request_body = UpdateProfileRequest,
    responses(
        (status = 200, description = "Profile updated", body = ProfileResponse),
        (status = 400, response = BadRequestResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn update_profile<R: ProfileRepository>(
    State(service): State<Arc<ProfileService<R>>>,
    UserId(user_id): UserId,
    ValidatedJson(request): ValidatedJson<UpdateProfileRequest>,
) -> Envelope<ProfileResponse> {
    service.update_profile(user_id, request).await
}

/// Soft-delete the caller's profile
#[utoipa::path(
    delete,
    path = "",
    tag = "Profiles",
    responses(
        (status = 200, description = "Profile deactivated"),
        (status = 400, response = BadRequestResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn delete_profile<R: ProfileRepository>(
    State(service): State<Arc<ProfileService<R>>>,
    UserId(user_id): UserId,
) -> Envelope<ProfileResponse> {
    service.delete_profile(user_id).await
}

/// The caller's own profile, private fields included
#[utoipa::path(
    get,
    path = "/me",
    tag = "Profiles",
    responses(
        (status = 200, description = "The caller's profile", body = ProfileResponse),
        (status = 400, response = BadRequestResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn get_my_profile<R: ProfileRepository>(
    State(service): State<Arc<ProfileService<R>>>,
    UserId(user_id): UserId,
) -> Envelope<ProfileResponse> {
    service.get_my_profile(user_id).await
}

/// All public, active profiles
#[utoipa::path(
    get,
    path = "/public",
    tag = "Profiles",
    responses(
        (status = 200, description = "Visible profiles", body = Vec<PublicProfileResponse>),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn get_public_profiles<R: ProfileRepository>(
    State(service): State<Arc<ProfileService<R>>>,
) -> Envelope<Vec<PublicProfileResponse>> {
    service.get_public_profiles().await
}

/// Search visible profiles by name
#[utoipa::path(
    get,
    path = "/search",
    tag = "Profiles",
    params(ProfileSearchParams),
    responses(
        (status = 200, description = "Matching profiles", body = Vec<PublicProfileResponse>),
        (status = 400, response = BadRequestResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn search_profiles<R: ProfileRepository>(
    State(service): State<Arc<ProfileService<R>>>,
    ValidatedQuery(params): ValidatedQuery<ProfileSearchParams>,
) -> Envelope<Vec<PublicProfileResponse>> {
    service.search_profiles(&params.q).await
}

/// Visible profiles at an exact location
#[utoipa::path(
    get,
    path = "/location/{location}",
    tag = "Profiles",
    params(("location" = String, Path, description = "Exact location")),
    responses(
        (status = 200, description = "Profiles at the location", body = Vec<PublicProfileResponse>),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn profiles_by_location<R: ProfileRepository>(
    State(service): State<Arc<ProfileService<R>>>,
    Path(location): Path<String>,
) -> Envelope<Vec<PublicProfileResponse>> {
    service.get_profiles_by_location(&location).await
}

/// Profile counts (active / public / private)
#[utoipa::path(
    get,
    path = "/stats",
    tag = "Profiles",
    responses(
        (status = 200, description = "Profile statistics", body = ProfileStats),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn get_profile_stats<R: ProfileRepository>(
    State(service): State<Arc<ProfileService<R>>>,
) -> Envelope<ProfileStats> {
    service.get_profile_stats().await
}

/// Public view of one profile
#[utoipa::path(
    get,
    path = "/{profile_id}",
    tag = "Profiles",
    params(("profile_id" = Uuid, Path, description = "Profile id")),
    responses(
        (status = 200, description = "Profile found", body = PublicProfileResponse),
        (status = 400, response = BadRequestResponse),
        (status = 403, response = ForbiddenResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn get_profile<R: ProfileRepository>(
    State(service): State<Arc<ProfileService<R>>>,
    UuidPath(profile_id): UuidPath,
) -> Envelope<PublicProfileResponse> {
    service.get_profile(profile_id).await
}
