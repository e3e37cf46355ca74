use std::sync::Arc;

use axum_helpers::Envelope;
use tracing::instrument;
use uuid::Uuid;

use crate::error::{CatalogError, CatalogResult};
use crate::models::{PageRequest, Product, ProductRequest, ProductResponse};
use crate::repository::{CategoryRepository, ProductRepository};

/// Product business logic.
///
/// Holds the category repository to enforce referential integrity on every
/// write: a product's category reference must resolve at write time.
pub struct ProductService<P, C> {
    products: Arc<P>,
    categories: Arc<C>,
}

impl<P: ProductRepository, C: CategoryRepository> ProductService<P, C> {
    pub fn new(products: P, categories: C) -> Self {
        Self {
            products: Arc::new(products),
            categories: Arc::new(categories),
        }
    }

    /// Create a product; the category reference must resolve
    #[instrument(skip(self, request), fields(product_name = %request.name))]
    pub async fn add_product(&self, request: ProductRequest) -> Envelope<ProductResponse> {
        self.try_add_product(request)
            .await
            .unwrap_or_else(CatalogError::envelope)
    }

    async fn try_add_product(
        &self,
        request: ProductRequest,
    ) -> CatalogResult<Envelope<ProductResponse>> {
        let category = self
            .categories
            .find_by_id(request.category_id)
            .await?
            .ok_or(CatalogError::UnknownCategory(request.category_id))?;

        let product = self.products.insert(Product::new(request)).await?;

        Ok(Envelope::created(
            (product, category).into(),
            "product created successfully",
        ))
    }

    #[instrument(skip(self))]
    pub async fn get_product(&self, id: Uuid) -> Envelope<ProductResponse> {
        self.try_get_product(id)
            .await
            .unwrap_or_else(CatalogError::envelope)
    }

    async fn try_get_product(&self, id: Uuid) -> CatalogResult<Envelope<ProductResponse>> {
        let pair = self
            .products
            .find_by_id(id)
            .await?
            .ok_or(CatalogError::ProductNotFound(id))?;

        Ok(Envelope::ok(pair.into(), "product found"))
    }

    /// One page of the unfiltered listing; content only, no totals
    #[instrument(skip(self))]
    pub async fn get_all_products(&self, page: PageRequest) -> Envelope<Vec<ProductResponse>> {
        self.try_get_all_products(page)
            .await
            .unwrap_or_else(CatalogError::envelope)
    }

    async fn try_get_all_products(
        &self,
        page: PageRequest,
    ) -> CatalogResult<Envelope<Vec<ProductResponse>>> {
        let rows = self.products.find_page(page).await?;
        Ok(Envelope::ok(
            rows.into_iter().map(Into::into).collect(),
            "products retrieved successfully",
        ))
    }

    /// Composes exactly one of four predicate branches; no filter
    /// combination is rejected, and no filters means plain pagination
    #[instrument(skip(self))]
    pub async fn search_products(
        &self,
        name: Option<String>,
        category_id: Option<Uuid>,
        page: PageRequest,
    ) -> Envelope<Vec<ProductResponse>> {
        self.try_search_products(name, category_id, page)
            .await
            .unwrap_or_else(CatalogError::envelope)
    }

    async fn try_search_products(
        &self,
        name: Option<String>,
        category_id: Option<Uuid>,
        page: PageRequest,
    ) -> CatalogResult<Envelope<Vec<ProductResponse>>> {
        let rows = match (name.as_deref(), category_id) {
            (Some(name), Some(category_id)) => {
                self.products
                    .find_by_name_and_category(name, category_id, page)
                    .await?
            }
            (Some(name), None) => self.products.find_by_name_containing(name, page).await?,
            (None, Some(category_id)) => {
                self.products.find_by_category(category_id, page).await?
            }
            (None, None) => self.products.find_page(page).await?,
        };

        Ok(Envelope::ok(
            rows.into_iter().map(Into::into).collect(),
            "product search completed",
        ))
    }

    /// Paginated listing scoped to one category, which must resolve
    #[instrument(skip(self))]
    pub async fn get_products_by_category(
        &self,
        category_id: Uuid,
        page: PageRequest,
    ) -> Envelope<Vec<ProductResponse>> {
        self.try_get_products_by_category(category_id, page)
            .await
            .unwrap_or_else(CatalogError::envelope)
    }

    async fn try_get_products_by_category(
        &self,
        category_id: Uuid,
        page: PageRequest,
    ) -> CatalogResult<Envelope<Vec<ProductResponse>>> {
        if !self.categories.exists_by_id(category_id).await? {
            return Err(CatalogError::UnknownCategory(category_id));
        }

        let rows = self.products.find_by_category(category_id, page).await?;
        Ok(Envelope::ok(
            rows.into_iter().map(Into::into).collect(),
            "products by category retrieved successfully",
        ))
    }

    /// Full replace of every mutable field (not a partial patch)
    #[instrument(skip(self, request))]
    pub async fn update_product(
        &self,
        id: Uuid,
        request: ProductRequest,
    ) -> Envelope<ProductResponse> {
        self.try_update_product(id, request)
            .await
            .unwrap_or_else(CatalogError::envelope)
    }

    async fn try_update_product(
        &self,
        id: Uuid,
        request: ProductRequest,
    ) -> CatalogResult<Envelope<ProductResponse>> {
        let (mut product, _) = self
            .products
            .find_by_id(id)
            .await?
            .ok_or(CatalogError::ProductNotFound(id))?;

        let category = self
            .categories
            .find_by_id(request.category_id)
            .await?
            .ok_or(CatalogError::UnknownCategory(request.category_id))?;

        product.apply(request);
        let updated = self.products.update(product).await?;

        Ok(Envelope::ok(
            (updated, category).into(),
            "product updated successfully",
        ))
    }

    /// Set stock to an exact value; negative stock never mutates anything
    #[instrument(skip(self))]
    pub async fn update_stock(&self, id: Uuid, stock: i32) -> Envelope<ProductResponse> {
        self.try_update_stock(id, stock)
            .await
            .unwrap_or_else(CatalogError::envelope)
    }

    async fn try_update_stock(
        &self,
        id: Uuid,
        stock: i32,
    ) -> CatalogResult<Envelope<ProductResponse>> {
        let (mut product, category) = self
            .products
            .find_by_id(id)
            .await?
            .ok_or(CatalogError::ProductNotFound(id))?;

        if stock < 0 {
            return Err(CatalogError::NegativeStock(stock));
        }

        product.set_stock(stock);
        let updated = self.products.update(product).await?;

        Ok(Envelope::ok(
            (updated, category).into(),
            "stock updated successfully",
        ))
    }

    /// Hard delete; nothing references a product
    #[instrument(skip(self))]
    pub async fn delete_product(&self, id: Uuid) -> Envelope<ProductResponse> {
        self.try_delete_product(id)
            .await
            .unwrap_or_else(CatalogError::envelope)
    }

    async fn try_delete_product(&self, id: Uuid) -> CatalogResult<Envelope<ProductResponse>> {
        if !self.products.exists_by_id(id).await? {
            return Err(CatalogError::ProductNotFound(id));
        }

        if !self.products.delete_by_id(id).await? {
            return Err(CatalogError::ProductNotFound(id));
        }

        Ok(Envelope::ok_empty("product deleted successfully"))
    }
}

impl<P, C> Clone for ProductService<P, C> {
    fn clone(&self) -> Self {
        Self {
            products: Arc::clone(&self.products),
            categories: Arc::clone(&self.categories),
        }
    }
}
