//! Products Repository

use jiff::Timestamp;
use sqlx::{FromRow, Row, Sqlite, Transaction, query, query_as, query_scalar, sqlite::SqliteRow};

use crate::{
    database::{
        amount_param, try_get_amount, try_get_optional_timestamp, try_get_quantity,
        try_get_timestamp,
    },
    domain::{
        categories::models::CategoryId,
        products::{
            data::{NewProduct, ProductUpdate},
            models::{Product, ProductId},
        },
    },
};

const LIST_PRODUCTS_SQL: &str = include_str!("sql/list_products.sql");
const GET_PRODUCT_SQL: &str = include_str!("sql/get_product.sql");
const CREATE_PRODUCT_SQL: &str = include_str!("sql/create_product.sql");
const UPDATE_PRODUCT_SQL: &str = include_str!("sql/update_product.sql");
const DELETE_PRODUCT_SQL: &str = include_str!("sql/delete_product.sql");
const SEARCH_PRODUCTS_SQL: &str = include_str!("sql/search_products.sql");
const FEATURED_PRODUCTS_SQL: &str = include_str!("sql/featured_products.sql");
const NEW_ARRIVALS_SQL: &str = include_str!("sql/new_arrivals.sql");
const LIST_PRODUCTS_BY_CATEGORY_SQL: &str = include_str!("sql/list_products_by_category.sql");
const CATEGORY_EXISTS_SQL: &str = include_str!("sql/category_exists.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct SqliteProductsRepository;

impl SqliteProductsRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn list_products(
        &self,
        tx: &mut Transaction<'_, Sqlite>,
    ) -> Result<Vec<Product>, sqlx::Error> {
        query_as::<Sqlite, Product>(LIST_PRODUCTS_SQL)
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn get_product(
        &self,
        tx: &mut Transaction<'_, Sqlite>,
        product: ProductId,
    ) -> Result<Product, sqlx::Error> {
        query_as::<Sqlite, Product>(GET_PRODUCT_SQL)
            .bind(product.into_inner())
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn find_product(
        &self,
        tx: &mut Transaction<'_, Sqlite>,
        product: ProductId,
    ) -> Result<Option<Product>, sqlx::Error> {
        query_as::<Sqlite, Product>(GET_PRODUCT_SQL)
            .bind(product.into_inner())
            .fetch_optional(&mut **tx)
            .await
    }

    pub(crate) async fn create_product(
        &self,
        tx: &mut Transaction<'_, Sqlite>,
        product: &NewProduct,
        now: Timestamp,
    ) -> Result<Product, sqlx::Error> {
        query_as::<Sqlite, Product>(CREATE_PRODUCT_SQL)
            .bind(product.name.trim())
            .bind(&product.description)
            .bind(amount_param(product.price)?)
            .bind(i64::from(product.stock_quantity))
            .bind(product.category.map(CategoryId::into_inner))
            .bind(product.featured)
            .bind(now.to_string())
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn update_product(
        &self,
        tx: &mut Transaction<'_, Sqlite>,
        product: ProductId,
        update: &ProductUpdate,
        now: Timestamp,
    ) -> Result<Product, sqlx::Error> {
        query_as::<Sqlite, Product>(UPDATE_PRODUCT_SQL)
            .bind(product.into_inner())
            .bind(update.name.trim())
            .bind(&update.description)
            .bind(amount_param(update.price)?)
            .bind(i64::from(update.stock_quantity))
            .bind(update.category.map(CategoryId::into_inner))
            .bind(update.featured)
            .bind(now.to_string())
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn delete_product(
        &self,
        tx: &mut Transaction<'_, Sqlite>,
        product: ProductId,
        now: Timestamp,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(DELETE_PRODUCT_SQL)
            .bind(product.into_inner())
            .bind(now.to_string())
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }

    /// `pattern` is a `LIKE` pattern escaped with a backslash.
    pub(crate) async fn search_products(
        &self,
        tx: &mut Transaction<'_, Sqlite>,
        pattern: &str,
    ) -> Result<Vec<Product>, sqlx::Error> {
        query_as::<Sqlite, Product>(SEARCH_PRODUCTS_SQL)
            .bind(pattern)
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn featured_products(
        &self,
        tx: &mut Transaction<'_, Sqlite>,
        limit: u32,
    ) -> Result<Vec<Product>, sqlx::Error> {
        query_as::<Sqlite, Product>(FEATURED_PRODUCTS_SQL)
            .bind(i64::from(limit))
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn new_arrivals(
        &self,
        tx: &mut Transaction<'_, Sqlite>,
        limit: u32,
    ) -> Result<Vec<Product>, sqlx::Error> {
        query_as::<Sqlite, Product>(NEW_ARRIVALS_SQL)
            .bind(i64::from(limit))
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn list_products_by_category(
        &self,
        tx: &mut Transaction<'_, Sqlite>,
        category: CategoryId,
    ) -> Result<Vec<Product>, sqlx::Error> {
        query_as::<Sqlite, Product>(LIST_PRODUCTS_BY_CATEGORY_SQL)
            .bind(category.into_inner())
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn category_exists(
        &self,
        tx: &mut Transaction<'_, Sqlite>,
        category: CategoryId,
    ) -> Result<bool, sqlx::Error> {
        query_scalar::<Sqlite, bool>(CATEGORY_EXISTS_SQL)
            .bind(category.into_inner())
            .fetch_one(&mut **tx)
            .await
    }
}

impl<'r> FromRow<'r, SqliteRow> for Product {
    fn from_row(row: &'r SqliteRow) -> sqlx::Result<Self> {
        Ok(Self {
            id: ProductId::new(row.try_get("id")?),
            name: row.try_get("name")?,
            description: row.try_get("description")?,
            price: try_get_amount(row, "price")?,
            stock_quantity: try_get_quantity(row, "stock_quantity")?,
            category: row
                .try_get::<Option<i64>, _>("category_id")?
                .map(CategoryId::new),
            featured: row.try_get("featured")?,
            created_at: try_get_timestamp(row, "created_at")?,
            updated_at: try_get_timestamp(row, "updated_at")?,
            deleted_at: try_get_optional_timestamp(row, "deleted_at")?,
        })
    }
}
