//! Uniform response envelope.
//!
//! Every service operation in this workspace returns an [`Envelope`]: a data
//! payload (or null), a human-readable message, a success flag, and a status
//! classification. Services construct envelopes through the constructors
//! below and never deal in transport status codes; the sole place a
//! classification becomes an HTTP code is this module's [`IntoResponse`]
//! impl.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;

/// Outcome classification carried by every envelope.
///
/// `Ok` and `Created` are the only success classifications; the rest are
/// failures. The boundary maps each variant to exactly one HTTP status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Ok,
    Created,
    BadRequest,
    NotFound,
    Conflict,
    Forbidden,
    InternalError,
}

impl Status {
    pub fn is_success(self) -> bool {
        matches!(self, Status::Ok | Status::Created)
    }
}

/// The uniform success/failure wrapper returned by every service operation.
///
/// Wire shape: `{ "data": …|null, "message": "…", "success": bool,
/// "timestamp": "…" }`. The classification itself is not serialized; it is
/// consumed by the boundary to pick the HTTP status code.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct Envelope<T> {
    /// Payload on success; always null on failure
    pub data: Option<T>,
    /// Human-readable outcome description
    pub message: String,
    /// Whether the operation succeeded
    pub success: bool,
    /// Server time the envelope was produced
    pub timestamp: DateTime<Utc>,
    #[serde(skip)]
    status: Status,
}

impl<T> Envelope<T> {
    fn success(status: Status, data: Option<T>, message: impl Into<String>) -> Self {
        Self {
            data,
            message: message.into(),
            success: true,
            timestamp: Utc::now(),
            status,
        }
    }

    fn failure(status: Status, message: impl Into<String>) -> Self {
        Self {
            data: None,
            message: message.into(),
            success: false,
            timestamp: Utc::now(),
            status,
        }
    }

    /// Successful read/update/delete with a payload
    pub fn ok(data: T, message: impl Into<String>) -> Self {
        Self::success(Status::Ok, Some(data), message)
    }

    /// Successful operation with no payload (e.g. a completed delete)
    pub fn ok_empty(message: impl Into<String>) -> Self {
        Self::success(Status::Ok, None, message)
    }

    /// Successful creation
    pub fn created(data: T, message: impl Into<String>) -> Self {
        Self::success(Status::Created, Some(data), message)
    }

    /// Caller supplied an unresolvable reference or out-of-range value
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::failure(Status::BadRequest, message)
    }

    /// Referenced entity is absent
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::failure(Status::NotFound, message)
    }

    /// Uniqueness or referential-integrity violation
    pub fn conflict(message: impl Into<String>) -> Self {
        Self::failure(Status::Conflict, message)
    }

    /// A visibility rule blocks the read
    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::failure(Status::Forbidden, message)
    }

    /// Unexpected store or mapping failure. The message must stay generic;
    /// the underlying fault is for logs, never for callers.
    pub fn internal_error(message: impl Into<String>) -> Self {
        Self::failure(Status::InternalError, message)
    }

    pub fn status(&self) -> Status {
        self.status
    }
}

impl<T: Serialize> IntoResponse for Envelope<T> {
    fn into_response(self) -> Response {
        let code = match self.status {
            Status::Ok => StatusCode::OK,
            Status::Created => StatusCode::CREATED,
            Status::BadRequest => StatusCode::BAD_REQUEST,
            Status::NotFound => StatusCode::NOT_FOUND,
            Status::Conflict => StatusCode::CONFLICT,
            Status::Forbidden => StatusCode::FORBIDDEN,
            Status::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
        };
        (code, Json(self)).into_response()
    }
}

/// Failure shape of the envelope, as a concrete schema for API docs.
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorEnvelope {
    /// Always null on failure
    pub data: Option<serde_json::Value>,
    pub message: String,
    /// Always false on failure
    pub success: bool,
    pub timestamp: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn success_constructors_set_flag_and_status() {
        let env = Envelope::ok(1, "found");
        assert!(env.success);
        assert_eq!(env.status(), Status::Ok);
        assert_eq!(env.data, Some(1));

        let env = Envelope::created("x", "made");
        assert!(env.success);
        assert_eq!(env.status(), Status::Created);

        let env: Envelope<i32> = Envelope::ok_empty("gone");
        assert!(env.success);
        assert!(env.data.is_none());
    }

    #[test]
    fn failure_constructors_never_carry_data() {
        let cases: Vec<(Envelope<i32>, Status)> = vec![
            (Envelope::bad_request("b"), Status::BadRequest),
            (Envelope::not_found("n"), Status::NotFound),
            (Envelope::conflict("c"), Status::Conflict),
            (Envelope::forbidden("f"), Status::Forbidden),
            (Envelope::internal_error("i"), Status::InternalError),
        ];
        for (env, status) in cases {
            assert!(!env.success);
            assert!(env.data.is_none());
            assert_eq!(env.status(), status);
            assert!(!status.is_success());
        }
    }

    #[test]
    fn wire_shape_has_no_status_field() {
        let env = Envelope::ok(7, "found");
        let json = serde_json::to_value(&env).unwrap();
        assert_eq!(json["data"], 7);
        assert_eq!(json["success"], true);
        assert_eq!(json["message"], "found");
        assert!(json.get("status").is_none());
        assert!(json.get("timestamp").is_some());
    }

    #[test]
    fn failure_serializes_null_data() {
        let env: Envelope<i32> = Envelope::not_found("missing");
        let json = serde_json::to_value(&env).unwrap();
        assert!(json["data"].is_null());
        assert_eq!(json["success"], false);
    }
}
