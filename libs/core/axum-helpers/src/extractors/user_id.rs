//! Extractor for the gateway-forwarded user identity.

use axum::{
    extract::FromRequestParts,
    http::request::Parts,
    response::{IntoResponse, Response},
};
use uuid::Uuid;

use crate::envelope::Envelope;

/// Header the API gateway sets after resolving the caller's identity.
pub const USER_ID_HEADER: &str = "x-user-id";

/// The authenticated caller's user id, taken from [`USER_ID_HEADER`].
///
/// Identity resolution itself happens upstream; this layer only trusts the
/// forwarded id. A missing or malformed header is a caller error.
pub struct UserId(pub Uuid);

impl<S> FromRequestParts<S> for UserId
where
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let value = parts
            .headers
            .get(USER_ID_HEADER)
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| {
                Envelope::<()>::bad_request("missing X-User-Id header").into_response()
            })?;

        Uuid::parse_str(value).map(UserId).map_err(|_| {
            Envelope::<()>::bad_request(format!("invalid X-User-Id header: {value}"))
                .into_response()
        })
    }
}
