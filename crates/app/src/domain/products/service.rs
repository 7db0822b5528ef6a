//! Products service.

use async_trait::async_trait;
use jiff::Timestamp;
use mockall::automock;

use crate::{
    database::Db,
    domain::{
        categories::models::CategoryId,
        products::{
            data::{NewProduct, ProductUpdate},
            errors::ProductsServiceError,
            models::{Product, ProductId, ProductSnapshot},
            repository::SqliteProductsRepository,
        },
    },
};

/// Most products shown as featured.
pub const FEATURED_LIMIT: u32 = 8;

/// New arrivals shown when the caller does not ask for a count.
pub const DEFAULT_NEW_ARRIVALS: u32 = 6;

#[derive(Debug, Clone)]
pub struct SqliteProductsService {
    db: Db,
    repository: SqliteProductsRepository,
}

impl SqliteProductsService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            repository: SqliteProductsRepository::new(),
        }
    }
}

/// `LIKE` pattern matching `term` anywhere, with wildcards in `term` taken literally.
fn contains_pattern(term: &str) -> String {
    let mut pattern = String::with_capacity(term.len() + 2);

    pattern.push('%');

    for ch in term.chars() {
        if matches!(ch, '%' | '_' | '\\') {
            pattern.push('\\');
        }

        pattern.push(ch);
    }

    pattern.push('%');

    pattern
}

#[async_trait]
impl ProductsService for SqliteProductsService {
    async fn list_products(&self) -> Result<Vec<Product>, ProductsServiceError> {
        self.db
            .within(async {
                let mut tx = self.db.begin().await?;

                let products = self.repository.list_products(&mut tx).await?;

                tx.commit().await?;

                Ok(products)
            })
            .await
    }

    async fn search_products(&self, term: &str) -> Result<Vec<Product>, ProductsServiceError> {
        let term = term.trim();

        if term.is_empty() {
            return Ok(Vec::new());
        }

        let pattern = contains_pattern(term);

        self.db
            .within(async {
                let mut tx = self.db.begin().await?;

                let products = self.repository.search_products(&mut tx, &pattern).await?;

                tx.commit().await?;

                Ok(products)
            })
            .await
    }

    async fn featured_products(&self) -> Result<Vec<Product>, ProductsServiceError> {
        self.db
            .within(async {
                let mut tx = self.db.begin().await?;

                let products = self
                    .repository
                    .featured_products(&mut tx, FEATURED_LIMIT)
                    .await?;

                tx.commit().await?;

                Ok(products)
            })
            .await
    }

    async fn new_arrivals(&self, limit: u32) -> Result<Vec<Product>, ProductsServiceError> {
        self.db
            .within(async {
                let mut tx = self.db.begin().await?;

                let products = self.repository.new_arrivals(&mut tx, limit).await?;

                tx.commit().await?;

                Ok(products)
            })
            .await
    }

    async fn list_products_by_category(
        &self,
        category: CategoryId,
    ) -> Result<Vec<Product>, ProductsServiceError> {
        self.db
            .within(async {
                let mut tx = self.db.begin().await?;

                if !self.repository.category_exists(&mut tx, category).await? {
                    return Err(ProductsServiceError::CategoryNotFound);
                }

                let products = self
                    .repository
                    .list_products_by_category(&mut tx, category)
                    .await?;

                tx.commit().await?;

                Ok(products)
            })
            .await
    }

    async fn get_product(&self, product: ProductId) -> Result<Product, ProductsServiceError> {
        self.db
            .within(async {
                let mut tx = self.db.begin().await?;

                let product = self.repository.get_product(&mut tx, product).await?;

                tx.commit().await?;

                Ok(product)
            })
            .await
    }

    async fn create_product(&self, product: NewProduct) -> Result<Product, ProductsServiceError> {
        if product.name.trim().is_empty() {
            return Err(ProductsServiceError::InvalidData);
        }

        self.db
            .within(async {
                let mut tx = self.db.begin().await?;

                let created = self
                    .repository
                    .create_product(&mut tx, &product, Timestamp::now())
                    .await?;

                tx.commit().await?;

                Ok(created)
            })
            .await
    }

    async fn update_product(
        &self,
        product: ProductId,
        update: ProductUpdate,
    ) -> Result<Product, ProductsServiceError> {
        if update.name.trim().is_empty() {
            return Err(ProductsServiceError::InvalidData);
        }

        self.db
            .within(async {
                let mut tx = self.db.begin().await?;

                let updated = self
                    .repository
                    .update_product(&mut tx, product, &update, Timestamp::now())
                    .await?;

                tx.commit().await?;

                Ok(updated)
            })
            .await
    }

    async fn delete_product(&self, product: ProductId) -> Result<(), ProductsServiceError> {
        self.db
            .within(async {
                let mut tx = self.db.begin().await?;

                let rows_affected = self
                    .repository
                    .delete_product(&mut tx, product, Timestamp::now())
                    .await?;

                if rows_affected == 0 {
                    return Err(ProductsServiceError::NotFound);
                }

                tx.commit().await?;

                Ok(())
            })
            .await
    }
}

#[async_trait]
impl ProductCatalog for SqliteProductsService {
    async fn resolve(
        &self,
        product: ProductId,
    ) -> Result<Option<ProductSnapshot>, ProductsServiceError> {
        self.db
            .within(async {
                let mut tx = self.db.begin().await?;

                let found = self.repository.find_product(&mut tx, product).await?;

                tx.commit().await?;

                Ok(found.as_ref().map(ProductSnapshot::from))
            })
            .await
    }
}

#[automock]
#[async_trait]
pub trait ProductsService: Send + Sync {
    /// Products a buyer can order: not deleted and in stock, newest first.
    async fn list_products(&self) -> Result<Vec<Product>, ProductsServiceError>;

    /// Orderable products whose name, description or category name contains
    /// `term`, newest first. A blank term finds nothing.
    async fn search_products(&self, term: &str) -> Result<Vec<Product>, ProductsServiceError>;

    /// Up to [`FEATURED_LIMIT`] orderable featured products, newest first.
    async fn featured_products(&self) -> Result<Vec<Product>, ProductsServiceError>;

    /// The `limit` most recently added orderable products.
    async fn new_arrivals(&self, limit: u32) -> Result<Vec<Product>, ProductsServiceError>;

    /// Orderable products in a category, newest first.
    async fn list_products_by_category(
        &self,
        category: CategoryId,
    ) -> Result<Vec<Product>, ProductsServiceError>;

    /// Retrieve a single product.
    async fn get_product(&self, product: ProductId) -> Result<Product, ProductsServiceError>;

    /// Creates a new product.
    async fn create_product(&self, product: NewProduct) -> Result<Product, ProductsServiceError>;

    /// Replaces the editable fields of a product.
    async fn update_product(
        &self,
        product: ProductId,
        update: ProductUpdate,
    ) -> Result<Product, ProductsServiceError>;

    /// Soft deletes a product. Carts and orders keep referring to it.
    async fn delete_product(&self, product: ProductId) -> Result<(), ProductsServiceError>;
}

/// Lookup used by the cart and checkout to freeze a product's current name and price.
#[automock]
#[async_trait]
pub trait ProductCatalog: Send + Sync {
    /// Resolve a live product, or `None` when it does not exist or was deleted.
    async fn resolve(
        &self,
        product: ProductId,
    ) -> Result<Option<ProductSnapshot>, ProductsServiceError>;
}
