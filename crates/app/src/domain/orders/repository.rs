//! Orders Repository

use jiff::Timestamp;
use rustc_hash::FxHashMap;
use sqlx::{FromRow, Row, Sqlite, Transaction, query, query_as, query_scalar, sqlite::SqliteRow};

use crate::{
    database::{amount_param, try_get_amount, try_get_quantity, try_get_timestamp},
    domain::{
        orders::{
            data::NewOrder,
            models::{Order, OrderId, OrderLine, OrderStatus},
        },
        products::models::ProductId,
    },
    ids::OwnerId,
};

const CREATE_ORDER_SQL: &str = include_str!("sql/create_order.sql");
const CREATE_ORDER_LINE_SQL: &str = include_str!("sql/create_order_line.sql");
const GET_ORDER_SQL: &str = include_str!("sql/get_order.sql");
const GET_ORDER_BY_ID_SQL: &str = include_str!("sql/get_order_by_id.sql");
const FIND_ORDER_BY_NUMBER_SQL: &str = include_str!("sql/find_order_by_number.sql");
const LIST_ORDERS_SQL: &str = include_str!("sql/list_orders.sql");
const GET_ORDER_LINES_SQL: &str = include_str!("sql/get_order_lines.sql");
const LIST_OWNER_ORDER_LINES_SQL: &str = include_str!("sql/list_owner_order_lines.sql");
const COUNT_ORDERS_SQL: &str = include_str!("sql/count_orders.sql");
const UPDATE_ORDER_STATUS_SQL: &str = include_str!("sql/update_order_status.sql");

/// Order line as stored, tagged with its order.
struct OrderLineRow {
    order: OrderId,
    line: OrderLine,
}

#[derive(Debug, Clone, Default)]
pub(crate) struct SqliteOrdersRepository;

impl SqliteOrdersRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    /// Insert the order header. Must be the first write of its transaction.
    pub(crate) async fn create_order(
        &self,
        tx: &mut Transaction<'_, Sqlite>,
        order: &NewOrder,
        order_number: &str,
    ) -> Result<Order, sqlx::Error> {
        query_as::<Sqlite, Order>(CREATE_ORDER_SQL)
            .bind(order_number)
            .bind(order.owner.into_inner())
            .bind(order.order_date.to_string())
            .bind(&order.shipping_address)
            .bind(&order.payment_method)
            .bind(order.status.as_str())
            .bind(amount_param(order.total_amount)?)
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn create_order_lines(
        &self,
        tx: &mut Transaction<'_, Sqlite>,
        order: OrderId,
        lines: &[OrderLine],
    ) -> Result<(), sqlx::Error> {
        for (position, line) in (0_i64..).zip(lines) {
            query(CREATE_ORDER_LINE_SQL)
                .bind(order.into_inner())
                .bind(position)
                .bind(line.product.into_inner())
                .bind(&line.product_name)
                .bind(i64::from(line.quantity))
                .bind(amount_param(line.unit_price)?)
                .execute(&mut **tx)
                .await?;
        }

        Ok(())
    }

    pub(crate) async fn get_order(
        &self,
        tx: &mut Transaction<'_, Sqlite>,
        owner: OwnerId,
        order: OrderId,
    ) -> Result<Order, sqlx::Error> {
        let mut found = query_as::<Sqlite, Order>(GET_ORDER_SQL)
            .bind(order.into_inner())
            .bind(owner.into_inner())
            .fetch_one(&mut **tx)
            .await?;

        found.lines = self.get_order_lines(tx, found.id).await?;

        Ok(found)
    }

    pub(crate) async fn get_order_by_id(
        &self,
        tx: &mut Transaction<'_, Sqlite>,
        order: OrderId,
    ) -> Result<Order, sqlx::Error> {
        let mut found = query_as::<Sqlite, Order>(GET_ORDER_BY_ID_SQL)
            .bind(order.into_inner())
            .fetch_one(&mut **tx)
            .await?;

        found.lines = self.get_order_lines(tx, found.id).await?;

        Ok(found)
    }

    pub(crate) async fn find_order_by_number(
        &self,
        tx: &mut Transaction<'_, Sqlite>,
        owner: OwnerId,
        order_number: &str,
    ) -> Result<Order, sqlx::Error> {
        let mut found = query_as::<Sqlite, Order>(FIND_ORDER_BY_NUMBER_SQL)
            .bind(order_number)
            .bind(owner.into_inner())
            .fetch_one(&mut **tx)
            .await?;

        found.lines = self.get_order_lines(tx, found.id).await?;

        Ok(found)
    }

    pub(crate) async fn list_orders(
        &self,
        tx: &mut Transaction<'_, Sqlite>,
        owner: OwnerId,
    ) -> Result<Vec<Order>, sqlx::Error> {
        let mut orders = query_as::<Sqlite, Order>(LIST_ORDERS_SQL)
            .bind(owner.into_inner())
            .fetch_all(&mut **tx)
            .await?;

        let rows = query_as::<Sqlite, OrderLineRow>(LIST_OWNER_ORDER_LINES_SQL)
            .bind(owner.into_inner())
            .fetch_all(&mut **tx)
            .await?;

        let mut lines_by_order: FxHashMap<OrderId, Vec<OrderLine>> = FxHashMap::default();

        for row in rows {
            lines_by_order.entry(row.order).or_default().push(row.line);
        }

        for order in &mut orders {
            if let Some(lines) = lines_by_order.remove(&order.id) {
                order.lines = lines;
            }
        }

        Ok(orders)
    }

    pub(crate) async fn count_orders(
        &self,
        tx: &mut Transaction<'_, Sqlite>,
    ) -> Result<u64, sqlx::Error> {
        let count: i64 = query_scalar(COUNT_ORDERS_SQL).fetch_one(&mut **tx).await?;

        u64::try_from(count).map_err(|e| sqlx::Error::ColumnDecode {
            index: "count".to_string(),
            source: Box::new(e),
        })
    }

    /// Compare-and-set the status. Returns the number of rows changed.
    pub(crate) async fn update_status(
        &self,
        tx: &mut Transaction<'_, Sqlite>,
        order: OrderId,
        expected: OrderStatus,
        status: OrderStatus,
        now: Timestamp,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(UPDATE_ORDER_STATUS_SQL)
            .bind(order.into_inner())
            .bind(status.as_str())
            .bind(now.to_string())
            .bind(expected.as_str())
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }

    async fn get_order_lines(
        &self,
        tx: &mut Transaction<'_, Sqlite>,
        order: OrderId,
    ) -> Result<Vec<OrderLine>, sqlx::Error> {
        let rows = query_as::<Sqlite, OrderLineRow>(GET_ORDER_LINES_SQL)
            .bind(order.into_inner())
            .fetch_all(&mut **tx)
            .await?;

        Ok(rows.into_iter().map(|row| row.line).collect())
    }
}

impl<'r> FromRow<'r, SqliteRow> for Order {
    fn from_row(row: &'r SqliteRow) -> sqlx::Result<Self> {
        let status: String = row.try_get("status")?;

        let status = status
            .parse::<OrderStatus>()
            .map_err(|e| sqlx::Error::ColumnDecode {
                index: "status".to_string(),
                source: Box::new(e),
            })?;

        Ok(Self {
            id: OrderId::new(row.try_get("id")?),
            order_number: row.try_get("order_number")?,
            owner: OwnerId::new(row.try_get("owner_id")?),
            order_date: try_get_timestamp(row, "order_date")?,
            shipping_address: row.try_get("shipping_address")?,
            payment_method: row.try_get("payment_method")?,
            status,
            total_amount: try_get_amount(row, "total_amount")?,
            lines: Vec::new(),
            updated_at: try_get_timestamp(row, "updated_at")?,
        })
    }
}

impl<'r> FromRow<'r, SqliteRow> for OrderLineRow {
    fn from_row(row: &'r SqliteRow) -> sqlx::Result<Self> {
        Ok(Self {
            order: OrderId::new(row.try_get("order_id")?),
            line: OrderLine {
                product: ProductId::new(row.try_get("product_id")?),
                product_name: row.try_get("product_name")?,
                quantity: try_get_quantity(row, "quantity")?,
                unit_price: try_get_amount(row, "unit_price")?,
            },
        })
    }
}
