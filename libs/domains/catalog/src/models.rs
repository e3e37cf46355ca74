use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

/// Custom validator: prices are exact decimals and never negative
fn validate_price(price: &Decimal) -> Result<(), validator::ValidationError> {
    if price.is_sign_negative() {
        return Err(validator::ValidationError::new("negative_price"));
    }
    Ok(())
}

/// Product category
#[derive(Debug, Clone, PartialEq)]
pub struct Category {
    pub id: Uuid,
    /// Unique, case-sensitive
    pub name: String,
    pub description: Option<String>,
}

impl Category {
    /// Create a new category from a request; the id is system-assigned
    pub fn new(request: CategoryRequest) -> Self {
        Self {
            id: Uuid::now_v7(),
            name: request.name,
            description: request.description,
        }
    }

    /// Overwrite both mutable fields
    pub fn apply(&mut self, request: CategoryRequest) {
        self.name = request.name;
        self.description = request.description;
    }
}

/// Request body for creating or updating a category
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CategoryRequest {
    #[validate(length(min = 1, max = 50))]
    pub name: String,
    #[validate(length(max = 200))]
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct CategoryResponse {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
}

impl From<Category> for CategoryResponse {
    fn from(category: Category) -> Self {
        Self {
            id: category.id,
            name: category.name,
            description: category.description,
        }
    }
}

/// Product
#[derive(Debug, Clone, PartialEq)]
pub struct Product {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub image_url: String,
    /// Exact decimal, never binary floating point
    pub price: Decimal,
    /// Must always resolve to an existing category at write time
    pub category_id: Uuid,
    pub stock: i32,
    /// Unique where present; uniqueness enforced by the store
    pub sku: Option<String>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Product {
    /// Create a new product from a request; id and timestamps are
    /// system-assigned, never client-supplied
    pub fn new(request: ProductRequest) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::now_v7(),
            name: request.name,
            description: request.description,
            image_url: request.image_url,
            price: request.price,
            category_id: request.category_id,
            stock: request.stock,
            sku: request.sku,
            is_active: true,
            created_at: now,
            updated_at: now,
        }
    }

    /// Overwrite every mutable field — full-replace semantics, not a
    /// partial patch (profiles patch; products replace)
    pub fn apply(&mut self, request: ProductRequest) {
        self.name = request.name;
        self.description = request.description;
        self.image_url = request.image_url;
        self.price = request.price;
        self.category_id = request.category_id;
        self.stock = request.stock;
        self.sku = request.sku;
        self.updated_at = Utc::now();
    }

    pub fn set_stock(&mut self, stock: i32) {
        self.stock = stock;
        self.updated_at = Utc::now();
    }
}

/// Request body for creating or fully replacing a product
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct ProductRequest {
    #[validate(length(min = 1, max = 50))]
    pub name: String,
    #[validate(length(min = 1, max = 500))]
    pub description: String,
    #[validate(length(min = 1, max = 500))]
    pub image_url: String,
    #[validate(custom(function = "validate_price"))]
    pub price: Decimal,
    pub category_id: Uuid,
    #[validate(range(min = 0))]
    pub stock: i32,
    #[validate(length(min = 1, max = 20))]
    pub sku: Option<String>,
}

/// Request body for the stock-only update.
///
/// The non-negativity rule is deliberately not a field validation here:
/// rejecting negative stock is a business rule of the product service.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct StockUpdateRequest {
    pub stock: i32,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct ProductResponse {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub image_url: String,
    pub price: Decimal,
    /// The resolved owning category
    pub category: CategoryResponse,
    pub stock: i32,
    pub sku: Option<String>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<(Product, Category)> for ProductResponse {
    fn from((product, category): (Product, Category)) -> Self {
        Self {
            id: product.id,
            name: product.name,
            description: product.description,
            image_url: product.image_url,
            price: product.price,
            category: category.into(),
            stock: product.stock,
            sku: product.sku,
            is_active: product.is_active,
            created_at: product.created_at,
            updated_at: product.updated_at,
        }
    }
}

/// A page of a larger ordered result set: zero-based index, fixed size
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page: u64,
    pub size: u64,
}

impl PageRequest {
    pub fn new(page: u64, size: u64) -> Self {
        Self { page, size }
    }

    pub fn offset(&self) -> u64 {
        self.page * self.size
    }

    pub fn limit(&self) -> u64 {
        self.size
    }
}

fn default_page_size() -> u64 {
    10
}

/// Query parameters for paginated listings
#[derive(Debug, Clone, Deserialize, Validate, ToSchema, IntoParams)]
pub struct PageParams {
    /// Zero-based page index
    #[serde(default)]
    pub page: u64,
    /// Page length
    #[serde(default = "default_page_size")]
    #[validate(range(min = 1, max = 100))]
    pub size: u64,
}

impl PageParams {
    pub fn request(&self) -> PageRequest {
        PageRequest::new(self.page, self.size)
    }
}

/// Query parameters for product search
#[derive(Debug, Clone, Deserialize, Validate, ToSchema, IntoParams)]
pub struct ProductSearchParams {
    /// Substring match on the product name
    pub name: Option<String>,
    /// Restrict to one category
    pub category_id: Option<Uuid>,
    #[serde(default)]
    pub page: u64,
    #[serde(default = "default_page_size")]
    #[validate(range(min = 1, max = 100))]
    pub size: u64,
}

impl ProductSearchParams {
    pub fn request(&self) -> PageRequest {
        PageRequest::new(self.page, self.size)
    }
}
