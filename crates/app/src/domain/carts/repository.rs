//! Cart Repository

use jiff::Timestamp;
use sqlx::{FromRow, Row, Sqlite, Transaction, query, query_as, query_scalar, sqlite::SqliteRow};

use crate::{
    database::{try_get_amount, try_get_quantity, try_get_timestamp},
    domain::{
        carts::models::{CartItem, CartLine, CartLineId},
        products::models::ProductId,
    },
    ids::OwnerId,
};

const ADD_ITEM_SQL: &str = include_str!("sql/add_item.sql");
const LIST_ITEMS_SQL: &str = include_str!("sql/list_items.sql");
const UPDATE_QUANTITY_SQL: &str = include_str!("sql/update_quantity.sql");
const REMOVE_ITEM_SQL: &str = include_str!("sql/remove_item.sql");
const CLEAR_CART_SQL: &str = include_str!("sql/clear_cart.sql");
const DELETE_CHECKED_OUT_LINE_SQL: &str = include_str!("sql/delete_checked_out_line.sql");
const REDUCE_CHECKED_OUT_LINE_SQL: &str = include_str!("sql/reduce_checked_out_line.sql");
const CART_TOTAL_SQL: &str = include_str!("sql/cart_total.sql");
const ITEM_COUNT_SQL: &str = include_str!("sql/item_count.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct SqliteCartRepository;

impl SqliteCartRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn add_item(
        &self,
        tx: &mut Transaction<'_, Sqlite>,
        owner: OwnerId,
        product: ProductId,
        quantity: u32,
        now: Timestamp,
    ) -> Result<CartLine, sqlx::Error> {
        query_as::<Sqlite, CartLine>(ADD_ITEM_SQL)
            .bind(owner.into_inner())
            .bind(product.into_inner())
            .bind(i64::from(quantity))
            .bind(now.to_string())
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn list_items(
        &self,
        tx: &mut Transaction<'_, Sqlite>,
        owner: OwnerId,
    ) -> Result<Vec<CartItem>, sqlx::Error> {
        query_as::<Sqlite, CartItem>(LIST_ITEMS_SQL)
            .bind(owner.into_inner())
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn update_quantity(
        &self,
        tx: &mut Transaction<'_, Sqlite>,
        owner: OwnerId,
        line: CartLineId,
        quantity: u32,
        now: Timestamp,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(UPDATE_QUANTITY_SQL)
            .bind(line.into_inner())
            .bind(owner.into_inner())
            .bind(i64::from(quantity))
            .bind(now.to_string())
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }

    pub(crate) async fn remove_item(
        &self,
        tx: &mut Transaction<'_, Sqlite>,
        owner: OwnerId,
        line: CartLineId,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(REMOVE_ITEM_SQL)
            .bind(line.into_inner())
            .bind(owner.into_inner())
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }

    pub(crate) async fn clear(
        &self,
        tx: &mut Transaction<'_, Sqlite>,
        owner: OwnerId,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(CLEAR_CART_SQL)
            .bind(owner.into_inner())
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }

    /// Take `line.quantity` units off the stored line, deleting it when nothing
    /// would remain. Quantity added since the line was read stays in the cart.
    pub(crate) async fn release_line(
        &self,
        tx: &mut Transaction<'_, Sqlite>,
        line: &CartLine,
        now: Timestamp,
    ) -> Result<u64, sqlx::Error> {
        let deleted = query(DELETE_CHECKED_OUT_LINE_SQL)
            .bind(line.id.into_inner())
            .bind(line.owner.into_inner())
            .bind(i64::from(line.quantity))
            .execute(&mut **tx)
            .await?
            .rows_affected();

        if deleted > 0 {
            return Ok(deleted);
        }

        let reduced = query(REDUCE_CHECKED_OUT_LINE_SQL)
            .bind(line.id.into_inner())
            .bind(line.owner.into_inner())
            .bind(i64::from(line.quantity))
            .bind(now.to_string())
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(reduced)
    }

    pub(crate) async fn total(
        &self,
        tx: &mut Transaction<'_, Sqlite>,
        owner: OwnerId,
    ) -> Result<u64, sqlx::Error> {
        let total: i64 = query_scalar(CART_TOTAL_SQL)
            .bind(owner.into_inner())
            .fetch_one(&mut **tx)
            .await?;

        u64::try_from(total).map_err(|e| sqlx::Error::ColumnDecode {
            index: "total".to_string(),
            source: Box::new(e),
        })
    }

    pub(crate) async fn item_count(
        &self,
        tx: &mut Transaction<'_, Sqlite>,
        owner: OwnerId,
    ) -> Result<u64, sqlx::Error> {
        let count: i64 = query_scalar(ITEM_COUNT_SQL)
            .bind(owner.into_inner())
            .fetch_one(&mut **tx)
            .await?;

        u64::try_from(count).map_err(|e| sqlx::Error::ColumnDecode {
            index: "item_count".to_string(),
            source: Box::new(e),
        })
    }
}

impl<'r> FromRow<'r, SqliteRow> for CartLine {
    fn from_row(row: &'r SqliteRow) -> sqlx::Result<Self> {
        Ok(Self {
            id: CartLineId::new(row.try_get("id")?),
            owner: OwnerId::new(row.try_get("owner_id")?),
            product: ProductId::new(row.try_get("product_id")?),
            quantity: try_get_quantity(row, "quantity")?,
            created_at: try_get_timestamp(row, "created_at")?,
            updated_at: try_get_timestamp(row, "updated_at")?,
        })
    }
}

impl<'r> FromRow<'r, SqliteRow> for CartItem {
    fn from_row(row: &'r SqliteRow) -> sqlx::Result<Self> {
        Ok(Self {
            line: CartLine::from_row(row)?,
            product_name: row.try_get("product_name")?,
            unit_price: try_get_amount(row, "unit_price")?,
            available: row.try_get("available")?,
        })
    }
}
