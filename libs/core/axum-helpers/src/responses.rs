//! Reusable OpenAPI response types for consistent API documentation.

use crate::envelope::ErrorEnvelope;
#[allow(unused_imports)]
use serde_json::json;
use utoipa::ToResponse;

#[derive(ToResponse)]
#[response(
    description = "Bad Request",
    content_type = "application/json",
    example = json!({
        "data": null,
        "message": "the requested category does not exist",
        "success": false,
        "timestamp": "2025-01-01T00:00:00Z"
    })
)]
pub struct BadRequestResponse(pub ErrorEnvelope);

#[derive(ToResponse)]
#[response(
    description = "Resource not found",
    content_type = "application/json",
    example = json!({
        "data": null,
        "message": "product not found",
        "success": false,
        "timestamp": "2025-01-01T00:00:00Z"
    })
)]
pub struct NotFoundResponse(pub ErrorEnvelope);

#[derive(ToResponse)]
#[response(
    description = "Conflict - uniqueness or referential-integrity violation",
    content_type = "application/json",
    example = json!({
        "data": null,
        "message": "a category with that name already exists",
        "success": false,
        "timestamp": "2025-01-01T00:00:00Z"
    })
)]
pub struct ConflictResponse(pub ErrorEnvelope);

#[derive(ToResponse)]
#[response(
    description = "Forbidden - a visibility rule blocks the read",
    content_type = "application/json",
    example = json!({
        "data": null,
        "message": "profile is private",
        "success": false,
        "timestamp": "2025-01-01T00:00:00Z"
    })
)]
pub struct ForbiddenResponse(pub ErrorEnvelope);

#[derive(ToResponse)]
#[response(
    description = "Internal Server Error",
    content_type = "application/json",
    example = json!({
        "data": null,
        "message": "an internal error occurred",
        "success": false,
        "timestamp": "2025-01-01T00:00:00Z"
    })
)]
pub struct InternalServerErrorResponse(pub ErrorEnvelope);
