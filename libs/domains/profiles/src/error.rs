use axum_helpers::Envelope;
use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum ProfileError {
    #[error("user {0} already has a profile")]
    AlreadyExists(Uuid),

    #[error("profile not found")]
    NotFound,

    #[error("profile {0} is private")]
    Private(Uuid),

    #[error("storage error: {0}")]
    Store(String),
}

pub type ProfileResult<T> = Result<T, ProfileError>;

impl From<sea_orm::DbErr> for ProfileError {
    fn from(err: sea_orm::DbErr) -> Self {
        ProfileError::Store(err.to_string())
    }
}

impl ProfileError {
    /// Convert into a failure envelope.
    ///
    /// NotFound and Private map to distinct classifications: an absent
    /// profile is not the same outcome as an existing private one. Store
    /// faults are logged and reported with a generic message.
    pub fn envelope<T>(self) -> Envelope<T> {
        match self {
            ProfileError::AlreadyExists(_) => Envelope::conflict("user already has a profile"),
            ProfileError::NotFound => Envelope::not_found("profile not found"),
            ProfileError::Private(_) => Envelope::forbidden("profile is private"),
            ProfileError::Store(detail) => {
                tracing::error!(error = %detail, "profile storage failure");
                Envelope::internal_error("an internal error occurred")
            }
        }
    }
}
