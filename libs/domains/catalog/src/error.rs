use axum_helpers::Envelope;
use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("category not found: {0}")]
    CategoryNotFound(Uuid),

    #[error("product not found: {0}")]
    ProductNotFound(Uuid),

    #[error("category name '{0}' already in use")]
    DuplicateCategoryName(String),

    #[error("category {0} has associated products")]
    CategoryInUse(Uuid),

    #[error("category {0} does not exist")]
    UnknownCategory(Uuid),

    #[error("SKU '{0}' already in use")]
    DuplicateSku(String),

    #[error("stock cannot be negative: {0}")]
    NegativeStock(i32),

    #[error("storage error: {0}")]
    Store(String),
}

pub type CatalogResult<T> = Result<T, CatalogError>;

impl From<sea_orm::DbErr> for CatalogError {
    fn from(err: sea_orm::DbErr) -> Self {
        CatalogError::Store(err.to_string())
    }
}

impl CatalogError {
    /// Convert into a failure envelope.
    ///
    /// This is the single place catalog errors meet the status taxonomy.
    /// Store faults are logged here and reported with a generic message —
    /// raw driver text never reaches callers.
    pub fn envelope<T>(self) -> Envelope<T> {
        match self {
            CatalogError::CategoryNotFound(_) => Envelope::not_found("category not found"),
            CatalogError::ProductNotFound(_) => Envelope::not_found("product not found"),
            CatalogError::DuplicateCategoryName(_) => {
                Envelope::conflict("a category with that name already exists")
            }
            CatalogError::CategoryInUse(_) => Envelope::conflict(
                "the category cannot be deleted because it has associated products",
            ),
            CatalogError::UnknownCategory(_) => {
                Envelope::bad_request("the requested category does not exist")
            }
            CatalogError::DuplicateSku(_) => {
                Envelope::conflict("a product with that SKU already exists")
            }
            CatalogError::NegativeStock(_) => Envelope::bad_request("stock cannot be negative"),
            CatalogError::Store(detail) => {
                tracing::error!(error = %detail, "catalog storage failure");
                Envelope::internal_error("an internal error occurred")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum_helpers::Status;

    #[test]
    fn errors_map_to_the_taxonomy() {
        let id = Uuid::now_v7();
        let cases: Vec<(CatalogError, Status)> = vec![
            (CatalogError::CategoryNotFound(id), Status::NotFound),
            (CatalogError::ProductNotFound(id), Status::NotFound),
            (
                CatalogError::DuplicateCategoryName("Books".into()),
                Status::Conflict,
            ),
            (CatalogError::CategoryInUse(id), Status::Conflict),
            (CatalogError::UnknownCategory(id), Status::BadRequest),
            (CatalogError::DuplicateSku("SKU-1".into()), Status::Conflict),
            (CatalogError::NegativeStock(-1), Status::BadRequest),
            (CatalogError::Store("boom".into()), Status::InternalError),
        ];

        for (err, expected) in cases {
            let envelope: Envelope<()> = err.envelope();
            assert_eq!(envelope.status(), expected);
            assert!(!envelope.success);
        }
    }

    #[test]
    fn store_failures_keep_driver_text_out_of_the_message() {
        let envelope: Envelope<()> =
            CatalogError::Store("connection refused (os error 111)".into()).envelope();
        assert!(!envelope.message.contains("os error"));
    }
}
