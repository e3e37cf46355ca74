//! Query-string extractor with automatic validation.

use axum::{
    extract::{FromRequestParts, Query},
    http::request::Parts,
    response::{IntoResponse, Response},
};
use serde::de::DeserializeOwned;
use validator::Validate;

use crate::envelope::Envelope;

/// Query-parameter extractor that validates the deserialized struct.
///
/// Used for pagination and search parameters, where the boundary contract
/// requires a zero-based page and a positive, bounded page size before the
/// service layer is invoked.
pub struct ValidatedQuery<T>(pub T);

impl<T, S> FromRequestParts<S> for ValidatedQuery<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(data) = Query::<T>::from_request_parts(parts, state)
            .await
            .map_err(|e| Envelope::<()>::bad_request(e.body_text()).into_response())?;

        data.validate().map_err(|e| {
            Envelope::<()>::bad_request(format!("invalid query parameters: {e}")).into_response()
        })?;

        Ok(ValidatedQuery(data))
    }
}
