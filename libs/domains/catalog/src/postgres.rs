use async_trait::async_trait;
use database::BaseRepository;
use sea_orm::{
    ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter, QueryOrder, QuerySelect,
    SqlErr,
};
use uuid::Uuid;

use crate::{
    entity,
    error::{CatalogError, CatalogResult},
    models::{Category, PageRequest, Product},
    repository::{CategoryRepository, ProductRepository},
};

/// Translate a write rejection caused by a constraint into the typed
/// domain error the service-level pre-check would have produced. A race
/// between check and write lands here, and the caller still sees the
/// pre-check's classification.
fn map_constraint(
    err: DbErr,
    on_unique: impl FnOnce() -> CatalogError,
    on_foreign_key: impl FnOnce() -> CatalogError,
) -> CatalogError {
    match err.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(_)) => on_unique(),
        Some(SqlErr::ForeignKeyConstraintViolation(_)) => on_foreign_key(),
        _ => err.into(),
    }
}

pub struct PgCategoryRepository {
    base: BaseRepository<entity::category::Entity>,
}

impl PgCategoryRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }
}

#[async_trait]
impl CategoryRepository for PgCategoryRepository {
    async fn insert(&self, category: Category) -> CatalogResult<Category> {
        let name = category.name.clone();
        let model = self
            .base
            .insert(category.into())
            .await
            .map_err(|e| {
                map_constraint(
                    e,
                    || CatalogError::DuplicateCategoryName(name),
                    // categories reference nothing; any FK violation here is unexpected
                    || CatalogError::Store("unexpected constraint violation".to_string()),
                )
            })?;

        tracing::info!(category_id = %model.id, "created category");
        Ok(model.into())
    }

    async fn update(&self, category: Category) -> CatalogResult<Category> {
        let id = category.id;
        let name = category.name.clone();
        let model = self.base.update(category.into()).await.map_err(|e| match e {
            DbErr::RecordNotFound(_) => CatalogError::CategoryNotFound(id),
            other => map_constraint(
                other,
                || CatalogError::DuplicateCategoryName(name),
                || CatalogError::Store("unexpected constraint violation".to_string()),
            ),
        })?;

        Ok(model.into())
    }

    async fn find_by_id(&self, id: Uuid) -> CatalogResult<Option<Category>> {
        let model = self.base.find_by_id(id).await?;
        Ok(model.map(Into::into))
    }

    async fn exists_by_id(&self, id: Uuid) -> CatalogResult<bool> {
        Ok(self.base.exists_by_id(id).await?)
    }

    async fn find_by_name(&self, name: &str) -> CatalogResult<Option<Category>> {
        let model = entity::category::Entity::find()
            .filter(entity::category::Column::Name.eq(name))
            .one(self.base.db())
            .await?;
        Ok(model.map(Into::into))
    }

    async fn exists_by_name(&self, name: &str) -> CatalogResult<bool> {
        Ok(self.find_by_name(name).await?.is_some())
    }

    async fn find_all(&self) -> CatalogResult<Vec<Category>> {
        let models = entity::category::Entity::find()
            .order_by_asc(entity::category::Column::Name)
            .all(self.base.db())
            .await?;
        Ok(models.into_iter().map(Into::into).collect())
    }

    async fn delete_by_id(&self, id: Uuid) -> CatalogResult<bool> {
        let rows = self.base.delete_by_id(id).await.map_err(|e| {
            map_constraint(
                e,
                || CatalogError::Store("unexpected constraint violation".to_string()),
                || CatalogError::CategoryInUse(id),
            )
        })?;

        if rows > 0 {
            tracing::info!(category_id = %id, "deleted category");
        }
        Ok(rows > 0)
    }
}

pub struct PgProductRepository {
    base: BaseRepository<entity::product::Entity>,
}

impl PgProductRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Shared select for the four paginated listings: optional substring
    /// and category predicates, joined with the owning category, newest
    /// first, offset/limit from the page request.
    async fn select_page(
        &self,
        name: Option<&str>,
        category_id: Option<Uuid>,
        page: PageRequest,
    ) -> CatalogResult<Vec<(Product, Category)>> {
        let mut query =
            entity::product::Entity::find().find_also_related(entity::category::Entity);

        if let Some(name) = name {
            query = query.filter(entity::product::Column::Name.contains(name));
        }
        if let Some(category_id) = category_id {
            query = query.filter(entity::product::Column::CategoryId.eq(category_id));
        }

        let rows = query
            .order_by_desc(entity::product::Column::CreatedAt)
            .limit(page.limit())
            .offset(page.offset())
            .all(self.base.db())
            .await?;

        rows.into_iter().map(join_category).collect()
    }
}

fn join_category(
    (product, category): (entity::product::Model, Option<entity::category::Model>),
) -> CatalogResult<(Product, Category)> {
    let category = category.ok_or_else(|| {
        CatalogError::Store(format!("product {} has no category row", product.id))
    })?;
    Ok((product.into(), category.into()))
}

#[async_trait]
impl ProductRepository for PgProductRepository {
    async fn insert(&self, product: Product) -> CatalogResult<Product> {
        let sku = product.sku.clone().unwrap_or_default();
        let category_id = product.category_id;
        let model = self.base.insert(product.into()).await.map_err(|e| {
            map_constraint(
                e,
                || CatalogError::DuplicateSku(sku),
                || CatalogError::UnknownCategory(category_id),
            )
        })?;

        tracing::info!(product_id = %model.id, "created product");
        Ok(model.into())
    }

    async fn update(&self, product: Product) -> CatalogResult<Product> {
        let id = product.id;
        let sku = product.sku.clone().unwrap_or_default();
        let category_id = product.category_id;
        let model = self.base.update(product.into()).await.map_err(|e| match e {
            DbErr::RecordNotFound(_) => CatalogError::ProductNotFound(id),
            other => map_constraint(
                other,
                || CatalogError::DuplicateSku(sku),
                || CatalogError::UnknownCategory(category_id),
            ),
        })?;

        Ok(model.into())
    }

    async fn find_by_id(&self, id: Uuid) -> CatalogResult<Option<(Product, Category)>> {
        let row = entity::product::Entity::find_by_id(id)
            .find_also_related(entity::category::Entity)
            .one(self.base.db())
            .await?;

        row.map(join_category).transpose()
    }

    async fn exists_by_id(&self, id: Uuid) -> CatalogResult<bool> {
        Ok(self.base.exists_by_id(id).await?)
    }

    async fn delete_by_id(&self, id: Uuid) -> CatalogResult<bool> {
        let rows = self.base.delete_by_id(id).await?;
        if rows > 0 {
            tracing::info!(product_id = %id, "deleted product");
        }
        Ok(rows > 0)
    }

    async fn exists_by_category(&self, category_id: Uuid) -> CatalogResult<bool> {
        let row = entity::product::Entity::find()
            .filter(entity::product::Column::CategoryId.eq(category_id))
            .one(self.base.db())
            .await?;
        Ok(row.is_some())
    }

    async fn find_page(&self, page: PageRequest) -> CatalogResult<Vec<(Product, Category)>> {
        self.select_page(None, None, page).await
    }

    async fn find_by_name_containing(
        &self,
        name: &str,
        page: PageRequest,
    ) -> CatalogResult<Vec<(Product, Category)>> {
        self.select_page(Some(name), None, page).await
    }

    async fn find_by_category(
        &self,
        category_id: Uuid,
        page: PageRequest,
    ) -> CatalogResult<Vec<(Product, Category)>> {
        self.select_page(None, Some(category_id), page).await
    }

    async fn find_by_name_and_category(
        &self,
        name: &str,
        category_id: Uuid,
        page: PageRequest,
    ) -> CatalogResult<Vec<(Product, Category)>> {
        self.select_page(Some(name), Some(category_id), page).await
    }
}
