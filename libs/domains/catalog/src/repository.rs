use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::error::{CatalogError, CatalogResult};
use crate::models::{Category, PageRequest, Product};

/// Repository trait for category persistence
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CategoryRepository: Send + Sync {
    async fn insert(&self, category: Category) -> CatalogResult<Category>;

    async fn update(&self, category: Category) -> CatalogResult<Category>;

    async fn find_by_id(&self, id: Uuid) -> CatalogResult<Option<Category>>;

    async fn exists_by_id(&self, id: Uuid) -> CatalogResult<bool>;

    /// Case-sensitive exact match
    async fn find_by_name(&self, name: &str) -> CatalogResult<Option<Category>>;

    /// Case-sensitive exact match
    async fn exists_by_name(&self, name: &str) -> CatalogResult<bool>;

    async fn find_all(&self) -> CatalogResult<Vec<Category>>;

    /// Returns false when nothing was deleted
    async fn delete_by_id(&self, id: Uuid) -> CatalogResult<bool>;
}

/// Repository trait for product persistence.
///
/// Reads return the product joined with its owning category, which every
/// response representation embeds. Paginated listings return content only
/// (no totals), newest first.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProductRepository: Send + Sync {
    async fn insert(&self, product: Product) -> CatalogResult<Product>;

    async fn update(&self, product: Product) -> CatalogResult<Product>;

    async fn find_by_id(&self, id: Uuid) -> CatalogResult<Option<(Product, Category)>>;

    async fn exists_by_id(&self, id: Uuid) -> CatalogResult<bool>;

    async fn delete_by_id(&self, id: Uuid) -> CatalogResult<bool>;

    /// Whether any product references the category
    async fn exists_by_category(&self, category_id: Uuid) -> CatalogResult<bool>;

    async fn find_page(&self, page: PageRequest) -> CatalogResult<Vec<(Product, Category)>>;

    /// Substring match on the product name
    async fn find_by_name_containing(
        &self,
        name: &str,
        page: PageRequest,
    ) -> CatalogResult<Vec<(Product, Category)>>;

    async fn find_by_category(
        &self,
        category_id: Uuid,
        page: PageRequest,
    ) -> CatalogResult<Vec<(Product, Category)>>;

    async fn find_by_name_and_category(
        &self,
        name: &str,
        category_id: Uuid,
        page: PageRequest,
    ) -> CatalogResult<Vec<(Product, Category)>>;
}

/// In-memory catalog store (for tests and local development).
///
/// One struct implements both repository traits over shared state: the
/// product↔category join and the referential-integrity constraints need a
/// single source of truth. Constraint checks and writes happen under one
/// write guard, mirroring the store-level constraints the PostgreSQL
/// implementation relies on (unique name, unique sku, FK restrict).
#[derive(Debug, Default, Clone)]
pub struct InMemoryCatalog {
    state: Arc<RwLock<CatalogState>>,
}

#[derive(Debug, Default)]
struct CatalogState {
    categories: HashMap<Uuid, Category>,
    products: HashMap<Uuid, Product>,
}

impl InMemoryCatalog {
    pub fn new() -> Self {
        Self::default()
    }
}

impl CatalogState {
    fn join(&self, product: &Product) -> CatalogResult<(Product, Category)> {
        let category = self
            .categories
            .get(&product.category_id)
            .cloned()
            .ok_or_else(|| {
                CatalogError::Store(format!("product {} has no category row", product.id))
            })?;
        Ok((product.clone(), category))
    }

    fn page_of<F>(&self, page: PageRequest, filter: F) -> CatalogResult<Vec<(Product, Category)>>
    where
        F: Fn(&Product) -> bool,
    {
        let mut matches: Vec<&Product> = self.products.values().filter(|p| filter(p)).collect();

        // newest first, name as tiebreaker for deterministic pages
        matches.sort_by(|a, b| {
            b.created_at
                .cmp(&a.created_at)
                .then_with(|| a.name.cmp(&b.name))
        });

        matches
            .into_iter()
            .skip(page.offset() as usize)
            .take(page.limit() as usize)
            .map(|product| self.join(product))
            .collect()
    }
}

#[async_trait]
impl CategoryRepository for InMemoryCatalog {
    async fn insert(&self, category: Category) -> CatalogResult<Category> {
        let mut state = self.state.write().await;

        // unique-name backstop, as the store's index would reject it
        if state.categories.values().any(|c| c.name == category.name) {
            return Err(CatalogError::DuplicateCategoryName(category.name));
        }

        state.categories.insert(category.id, category.clone());
        tracing::info!(category_id = %category.id, "created category");
        Ok(category)
    }

    async fn update(&self, category: Category) -> CatalogResult<Category> {
        let mut state = self.state.write().await;

        if !state.categories.contains_key(&category.id) {
            return Err(CatalogError::CategoryNotFound(category.id));
        }

        if state
            .categories
            .values()
            .any(|c| c.id != category.id && c.name == category.name)
        {
            return Err(CatalogError::DuplicateCategoryName(category.name));
        }

        state.categories.insert(category.id, category.clone());
        Ok(category)
    }

    async fn find_by_id(&self, id: Uuid) -> CatalogResult<Option<Category>> {
        let state = self.state.read().await;
        Ok(state.categories.get(&id).cloned())
    }

    async fn exists_by_id(&self, id: Uuid) -> CatalogResult<bool> {
        let state = self.state.read().await;
        Ok(state.categories.contains_key(&id))
    }

    async fn find_by_name(&self, name: &str) -> CatalogResult<Option<Category>> {
        let state = self.state.read().await;
        Ok(state.categories.values().find(|c| c.name == name).cloned())
    }

    async fn exists_by_name(&self, name: &str) -> CatalogResult<bool> {
        let state = self.state.read().await;
        Ok(state.categories.values().any(|c| c.name == name))
    }

    async fn find_all(&self) -> CatalogResult<Vec<Category>> {
        let state = self.state.read().await;
        let mut categories: Vec<Category> = state.categories.values().cloned().collect();
        categories.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(categories)
    }

    async fn delete_by_id(&self, id: Uuid) -> CatalogResult<bool> {
        let mut state = self.state.write().await;

        // FK RESTRICT backstop
        if state.products.values().any(|p| p.category_id == id) {
            return Err(CatalogError::CategoryInUse(id));
        }

        Ok(state.categories.remove(&id).is_some())
    }
}

#[async_trait]
impl ProductRepository for InMemoryCatalog {
    async fn insert(&self, product: Product) -> CatalogResult<Product> {
        let mut state = self.state.write().await;

        // FK backstop
        if !state.categories.contains_key(&product.category_id) {
            return Err(CatalogError::UnknownCategory(product.category_id));
        }

        // unique-sku backstop
        if let Some(ref sku) = product.sku {
            if state
                .products
                .values()
                .any(|p| p.sku.as_deref() == Some(sku))
            {
                return Err(CatalogError::DuplicateSku(sku.clone()));
            }
        }

        state.products.insert(product.id, product.clone());
        tracing::info!(product_id = %product.id, "created product");
        Ok(product)
    }

    async fn update(&self, product: Product) -> CatalogResult<Product> {
        let mut state = self.state.write().await;

        if !state.products.contains_key(&product.id) {
            return Err(CatalogError::ProductNotFound(product.id));
        }

        if !state.categories.contains_key(&product.category_id) {
            return Err(CatalogError::UnknownCategory(product.category_id));
        }

        if let Some(ref sku) = product.sku {
            if state
                .products
                .values()
                .any(|p| p.id != product.id && p.sku.as_deref() == Some(sku))
            {
                return Err(CatalogError::DuplicateSku(sku.clone()));
            }
        }

        state.products.insert(product.id, product.clone());
        Ok(product)
    }

    async fn find_by_id(&self, id: Uuid) -> CatalogResult<Option<(Product, Category)>> {
        let state = self.state.read().await;
        state.products.get(&id).map(|p| state.join(p)).transpose()
    }

    async fn exists_by_id(&self, id: Uuid) -> CatalogResult<bool> {
        let state = self.state.read().await;
        Ok(state.products.contains_key(&id))
    }

    async fn delete_by_id(&self, id: Uuid) -> CatalogResult<bool> {
        let mut state = self.state.write().await;
        Ok(state.products.remove(&id).is_some())
    }

    async fn exists_by_category(&self, category_id: Uuid) -> CatalogResult<bool> {
        let state = self.state.read().await;
        Ok(state.products.values().any(|p| p.category_id == category_id))
    }

    async fn find_page(&self, page: PageRequest) -> CatalogResult<Vec<(Product, Category)>> {
        let state = self.state.read().await;
        state.page_of(page, |_| true)
    }

    async fn find_by_name_containing(
        &self,
        name: &str,
        page: PageRequest,
    ) -> CatalogResult<Vec<(Product, Category)>> {
        let state = self.state.read().await;
        state.page_of(page, |p| p.name.contains(name))
    }

    async fn find_by_category(
        &self,
        category_id: Uuid,
        page: PageRequest,
    ) -> CatalogResult<Vec<(Product, Category)>> {
        let state = self.state.read().await;
        state.page_of(page, |p| p.category_id == category_id)
    }

    async fn find_by_name_and_category(
        &self,
        name: &str,
        category_id: Uuid,
        page: PageRequest,
    ) -> CatalogResult<Vec<(Product, Category)>> {
        let state = self.state.read().await;
        state.page_of(page, |p| {
            p.category_id == category_id && p.name.contains(name)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CategoryRequest, ProductRequest};
    use rust_decimal::Decimal;

    fn category(name: &str) -> Category {
        Category::new(CategoryRequest {
            name: name.to_string(),
            description: None,
        })
    }

    fn product(name: &str, category_id: Uuid, sku: Option<&str>) -> Product {
        Product::new(ProductRequest {
            name: name.to_string(),
            description: "desc".to_string(),
            image_url: "https://img.example/p.png".to_string(),
            price: Decimal::new(1999, 2),
            category_id,
            stock: 5,
            sku: sku.map(String::from),
        })
    }

    #[tokio::test]
    async fn category_names_are_unique() {
        let repo = InMemoryCatalog::new();
        CategoryRepository::insert(&repo, category("Books")).await.unwrap();

        let result = CategoryRepository::insert(&repo, category("Books")).await;
        assert!(matches!(
            result,
            Err(CatalogError::DuplicateCategoryName(_))
        ));
    }

    #[tokio::test]
    async fn name_match_is_case_sensitive() {
        let repo = InMemoryCatalog::new();
        CategoryRepository::insert(&repo, category("Books")).await.unwrap();

        assert!(!repo.exists_by_name("books").await.unwrap());
        assert!(repo.exists_by_name("Books").await.unwrap());
    }

    #[tokio::test]
    async fn referenced_category_cannot_be_deleted() {
        let repo = InMemoryCatalog::new();
        let books = CategoryRepository::insert(&repo, category("Books")).await.unwrap();
        ProductRepository::insert(&repo, product("Go Guide", books.id, None))
            .await
            .unwrap();

        let result = CategoryRepository::delete_by_id(&repo, books.id).await;
        assert!(matches!(result, Err(CatalogError::CategoryInUse(_))));
    }

    #[tokio::test]
    async fn product_insert_rejects_missing_category() {
        let repo = InMemoryCatalog::new();
        let result = ProductRepository::insert(&repo, product("Go Guide", Uuid::now_v7(), None)).await;
        assert!(matches!(result, Err(CatalogError::UnknownCategory(_))));
    }

    #[tokio::test]
    async fn duplicate_sku_is_rejected_by_the_store() {
        let repo = InMemoryCatalog::new();
        let books = CategoryRepository::insert(&repo, category("Books")).await.unwrap();

        ProductRepository::insert(&repo, product("A", books.id, Some("SKU-1")))
            .await
            .unwrap();
        let result = ProductRepository::insert(&repo, product("B", books.id, Some("SKU-1"))).await;
        assert!(matches!(result, Err(CatalogError::DuplicateSku(_))));
    }

    #[tokio::test]
    async fn pages_are_bounded_and_joined() {
        let repo = InMemoryCatalog::new();
        let books = CategoryRepository::insert(&repo, category("Books")).await.unwrap();
        for i in 0..5 {
            ProductRepository::insert(&repo, product(&format!("Guide {i}"), books.id, None))
                .await
                .unwrap();
        }

        let first = repo.find_page(PageRequest::new(0, 2)).await.unwrap();
        assert_eq!(first.len(), 2);
        assert!(first.iter().all(|(_, c)| c.id == books.id));

        let last = repo.find_page(PageRequest::new(2, 2)).await.unwrap();
        assert_eq!(last.len(), 1);

        let beyond = repo.find_page(PageRequest::new(3, 2)).await.unwrap();
        assert!(beyond.is_empty());
    }

    #[tokio::test]
    async fn substring_search_is_contains_not_prefix() {
        let repo = InMemoryCatalog::new();
        let books = CategoryRepository::insert(&repo, category("Books")).await.unwrap();
        ProductRepository::insert(&repo, product("Advanced Go Guide", books.id, None))
            .await
            .unwrap();
        ProductRepository::insert(&repo, product("Rust Primer", books.id, None))
            .await
            .unwrap();

        let hits = repo
            .find_by_name_containing("Go", PageRequest::new(0, 10))
            .await
            .unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].0.name, "Advanced Go Guide");
    }
}
