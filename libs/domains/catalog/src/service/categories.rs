use std::sync::Arc;

use axum_helpers::Envelope;
use tracing::instrument;
use uuid::Uuid;

use crate::error::{CatalogError, CatalogResult};
use crate::models::{Category, CategoryRequest, CategoryResponse};
use crate::repository::{CategoryRepository, ProductRepository};

/// Category business logic.
///
/// Holds the product repository as well: the deletion guard must check
/// whether any product still references the category.
pub struct CategoryService<C, P> {
    categories: Arc<C>,
    products: Arc<P>,
}

impl<C: CategoryRepository, P: ProductRepository> CategoryService<C, P> {
    pub fn new(categories: C, products: P) -> Self {
        Self {
            categories: Arc::new(categories),
            products: Arc::new(products),
        }
    }

    /// Create a category; fails with Conflict when the name is taken
    #[instrument(skip(self, request), fields(category_name = %request.name))]
    pub async fn add_category(&self, request: CategoryRequest) -> Envelope<CategoryResponse> {
        self.try_add_category(request)
            .await
            .unwrap_or_else(CatalogError::envelope)
    }

    async fn try_add_category(
        &self,
        request: CategoryRequest,
    ) -> CatalogResult<Envelope<CategoryResponse>> {
        if self.categories.exists_by_name(&request.name).await? {
            return Err(CatalogError::DuplicateCategoryName(request.name));
        }

        let category = self.categories.insert(Category::new(request)).await?;
        Ok(Envelope::created(
            category.into(),
            "category created successfully",
        ))
    }

    #[instrument(skip(self))]
    pub async fn get_category(&self, id: Uuid) -> Envelope<CategoryResponse> {
        self.try_get_category(id)
            .await
            .unwrap_or_else(CatalogError::envelope)
    }

    async fn try_get_category(&self, id: Uuid) -> CatalogResult<Envelope<CategoryResponse>> {
        let category = self
            .categories
            .find_by_id(id)
            .await?
            .ok_or(CatalogError::CategoryNotFound(id))?;

        Ok(Envelope::ok(category.into(), "category found"))
    }

    /// Full unfiltered list — the category catalog is assumed small
    #[instrument(skip(self))]
    pub async fn get_all_categories(&self) -> Envelope<Vec<CategoryResponse>> {
        self.try_get_all_categories()
            .await
            .unwrap_or_else(CatalogError::envelope)
    }

    async fn try_get_all_categories(&self) -> CatalogResult<Envelope<Vec<CategoryResponse>>> {
        let categories = self.categories.find_all().await?;
        let responses = categories.into_iter().map(Into::into).collect();
        Ok(Envelope::ok(responses, "categories retrieved successfully"))
    }

    /// Overwrite both fields; a name collision with a *different* category
    /// is a Conflict, colliding with itself is permitted
    #[instrument(skip(self, request), fields(category_name = %request.name))]
    pub async fn update_category(
        &self,
        id: Uuid,
        request: CategoryRequest,
    ) -> Envelope<CategoryResponse> {
        self.try_update_category(id, request)
            .await
            .unwrap_or_else(CatalogError::envelope)
    }

    async fn try_update_category(
        &self,
        id: Uuid,
        request: CategoryRequest,
    ) -> CatalogResult<Envelope<CategoryResponse>> {
        let mut category = self
            .categories
            .find_by_id(id)
            .await?
            .ok_or(CatalogError::CategoryNotFound(id))?;

        if let Some(existing) = self.categories.find_by_name(&request.name).await? {
            if existing.id != id {
                return Err(CatalogError::DuplicateCategoryName(request.name));
            }
        }

        category.apply(request);
        let updated = self.categories.update(category).await?;

        Ok(Envelope::ok(
            updated.into(),
            "category updated successfully",
        ))
    }

    /// Hard delete, blocked while any product references the category
    #[instrument(skip(self))]
    pub async fn delete_category(&self, id: Uuid) -> Envelope<CategoryResponse> {
        self.try_delete_category(id)
            .await
            .unwrap_or_else(CatalogError::envelope)
    }

    async fn try_delete_category(&self, id: Uuid) -> CatalogResult<Envelope<CategoryResponse>> {
        if !self.categories.exists_by_id(id).await? {
            return Err(CatalogError::CategoryNotFound(id));
        }

        if self.products.exists_by_category(id).await? {
            return Err(CatalogError::CategoryInUse(id));
        }

        if !self.categories.delete_by_id(id).await? {
            // a concurrent delete won the race
            return Err(CatalogError::CategoryNotFound(id));
        }

        Ok(Envelope::ok_empty("category deleted successfully"))
    }
}

impl<C, P> Clone for CategoryService<C, P> {
    fn clone(&self) -> Self {
        Self {
            categories: Arc::clone(&self.categories),
            products: Arc::clone(&self.products),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::{MockCategoryRepository, MockProductRepository};
    use axum_helpers::Status;

    fn request(name: &str) -> CategoryRequest {
        CategoryRequest {
            name: name.to_string(),
            description: Some("shelf".to_string()),
        }
    }

    #[tokio::test]
    async fn add_category_with_taken_name_is_a_conflict() {
        let mut categories = MockCategoryRepository::new();
        // no insert expectation: a write would panic the mock
        categories
            .expect_exists_by_name()
            .withf(|name| name == "Books")
            .returning(|_| Ok(true));

        let service = CategoryService::new(categories, MockProductRepository::new());
        let envelope = service.add_category(request("Books")).await;

        assert_eq!(envelope.status(), Status::Conflict);
        assert!(!envelope.success);
        assert!(envelope.data.is_none());
    }

    #[tokio::test]
    async fn add_category_returns_created() {
        let mut categories = MockCategoryRepository::new();
        categories.expect_exists_by_name().returning(|_| Ok(false));
        categories.expect_insert().returning(|category| Ok(category));

        let service = CategoryService::new(categories, MockProductRepository::new());
        let envelope = service.add_category(request("Books")).await;

        assert_eq!(envelope.status(), Status::Created);
        assert_eq!(envelope.data.unwrap().name, "Books");
    }

    #[tokio::test]
    async fn get_category_reports_not_found() {
        let mut categories = MockCategoryRepository::new();
        categories.expect_find_by_id().returning(|_| Ok(None));

        let service = CategoryService::new(categories, MockProductRepository::new());
        let envelope = service.get_category(Uuid::now_v7()).await;

        assert_eq!(envelope.status(), Status::NotFound);
    }

    #[tokio::test]
    async fn update_category_permits_self_collision() {
        let id = Uuid::now_v7();
        let existing = Category {
            id,
            name: "Books".to_string(),
            description: None,
        };

        let mut categories = MockCategoryRepository::new();
        let found = existing.clone();
        categories
            .expect_find_by_id()
            .returning(move |_| Ok(Some(found.clone())));
        let by_name = existing.clone();
        categories
            .expect_find_by_name()
            .returning(move |_| Ok(Some(by_name.clone())));
        categories.expect_update().returning(|category| Ok(category));

        let service = CategoryService::new(categories, MockProductRepository::new());
        let envelope = service.update_category(id, request("Books")).await;

        assert_eq!(envelope.status(), Status::Ok);
    }

    #[tokio::test]
    async fn update_category_rejects_collision_with_other_category() {
        let id = Uuid::now_v7();
        let mut categories = MockCategoryRepository::new();
        categories.expect_find_by_id().returning(move |queried| {
            Ok(Some(Category {
                id: queried,
                name: "Magazines".to_string(),
                description: None,
            }))
        });
        categories.expect_find_by_name().returning(|name| {
            Ok(Some(Category {
                id: Uuid::now_v7(),
                name: name.to_string(),
                description: None,
            }))
        });
        // no update expectation

        let service = CategoryService::new(categories, MockProductRepository::new());
        let envelope = service.update_category(id, request("Books")).await;

        assert_eq!(envelope.status(), Status::Conflict);
    }

    #[tokio::test]
    async fn delete_category_is_blocked_while_referenced() {
        let id = Uuid::now_v7();
        let mut categories = MockCategoryRepository::new();
        categories.expect_exists_by_id().returning(|_| Ok(true));
        // no delete expectation

        let mut products = MockProductRepository::new();
        products
            .expect_exists_by_category()
            .returning(|_| Ok(true));

        let service = CategoryService::new(categories, products);
        let envelope = service.delete_category(id).await;

        assert_eq!(envelope.status(), Status::Conflict);
        assert!(envelope.message.contains("associated products"));
    }

    #[tokio::test]
    async fn delete_category_not_found() {
        let mut categories = MockCategoryRepository::new();
        categories.expect_exists_by_id().returning(|_| Ok(false));

        let service = CategoryService::new(categories, MockProductRepository::new());
        let envelope = service.delete_category(Uuid::now_v7()).await;

        assert_eq!(envelope.status(), Status::NotFound);
    }

    #[tokio::test]
    async fn delete_category_succeeds_when_unreferenced() {
        let mut categories = MockCategoryRepository::new();
        categories.expect_exists_by_id().returning(|_| Ok(true));
        categories.expect_delete_by_id().returning(|_| Ok(true));

        let mut products = MockProductRepository::new();
        products
            .expect_exists_by_category()
            .returning(|_| Ok(false));

        let service = CategoryService::new(categories, products);
        let envelope = service.delete_category(Uuid::now_v7()).await;

        assert_eq!(envelope.status(), Status::Ok);
        assert!(envelope.success);
        assert!(envelope.data.is_none());
    }

    #[tokio::test]
    async fn storage_faults_become_generic_internal_errors() {
        let mut categories = MockCategoryRepository::new();
        categories
            .expect_exists_by_name()
            .returning(|_| Err(CatalogError::Store("connection reset".to_string())));

        let service = CategoryService::new(categories, MockProductRepository::new());
        let envelope = service.add_category(request("Books")).await;

        assert_eq!(envelope.status(), Status::InternalError);
        assert!(!envelope.message.contains("connection reset"));
    }
}
