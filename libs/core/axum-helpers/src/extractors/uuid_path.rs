//! UUID path parameter extractor with automatic validation.

use axum::{
    extract::{FromRequestParts, Path},
    http::request::Parts,
    response::{IntoResponse, Response},
};
use uuid::Uuid;

use crate::envelope::Envelope;

/// Extractor for UUID path parameters.
///
/// Parses the single path parameter as a UUID and rejects malformed ids
/// with a `BadRequest` envelope before any handler code runs.
pub struct UuidPath(pub Uuid);

impl<S> FromRequestParts<S> for UuidPath
where
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(id) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|e| e.into_response())?;

        match Uuid::parse_str(&id) {
            Ok(uuid) => Ok(UuidPath(uuid)),
            Err(_) => {
                Err(Envelope::<()>::bad_request(format!("invalid UUID: {id}")).into_response())
            }
        }
    }
}
