//! JSON extractor with automatic validation using the validator crate.

use axum::{
    extract::{FromRequest, Json, Request},
    response::{IntoResponse, Response},
};
use serde::de::DeserializeOwned;
use validator::Validate;

use crate::envelope::Envelope;

/// JSON body extractor that runs the payload through its `Validate` impl.
///
/// Size and format constraints are enforced here, at the boundary, so the
/// service layer only re-checks business rules (existence, uniqueness).
/// Rejections are rendered as `BadRequest` envelopes.
///
/// # Example
/// ```ignore
/// use axum_helpers::ValidatedJson;
///
/// async fn create_category(ValidatedJson(request): ValidatedJson<CategoryRequest>) { … }
/// ```
pub struct ValidatedJson<T>(pub T);

impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(data) = Json::<T>::from_request(req, state)
            .await
            .map_err(|e| Envelope::<()>::bad_request(e.body_text()).into_response())?;

        data.validate().map_err(|e| {
            Envelope::<()>::bad_request(format!("request validation failed: {e}")).into_response()
        })?;

        Ok(ValidatedJson(data))
    }
}
