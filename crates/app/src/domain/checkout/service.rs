//! Checkout service.

use std::{fmt, sync::Arc, time::Duration};

use async_trait::async_trait;
use jiff::Timestamp;
use mockall::automock;
use sqlx::error::{DatabaseError, ErrorKind};
use tokio::time::{sleep, timeout};
use tracing::{info, warn};

use crate::{
    database::Db,
    domain::{
        carts::{CartsService, models::CartLine},
        checkout::{
            data::{CheckoutDetails, CheckoutOutcome},
            errors::CheckoutError,
            locks::OwnerLocks,
            snapshot::{freeze_lines, order_total},
        },
        orders::{
            data::NewOrder,
            models::{Order, OrderStatus},
            numbers::{OrderNumberSource, RandomOrderNumbers},
            repository::SqliteOrdersRepository,
        },
        products::ProductCatalog,
    },
    ids::OwnerId,
};

/// Order number candidates tried before giving up.
pub const ORDER_NUMBER_ATTEMPTS: usize = 5;

/// Attempts at clearing the cart once the order is committed.
pub const CART_CLEAR_ATTEMPTS: u32 = 3;

const CART_CLEAR_BACKOFF: Duration = Duration::from_millis(50);

#[derive(Clone)]
pub struct SqliteCheckoutService {
    db: Db,
    carts: Arc<dyn CartsService>,
    catalog: Arc<dyn ProductCatalog>,
    numbers: Arc<dyn OrderNumberSource>,
    orders: SqliteOrdersRepository,
    locks: OwnerLocks,
}

impl SqliteCheckoutService {
    #[must_use]
    pub fn new(db: Db, carts: Arc<dyn CartsService>, catalog: Arc<dyn ProductCatalog>) -> Self {
        Self::with_order_numbers(db, carts, catalog, Arc::new(RandomOrderNumbers))
    }

    #[must_use]
    pub fn with_order_numbers(
        db: Db,
        carts: Arc<dyn CartsService>,
        catalog: Arc<dyn ProductCatalog>,
        numbers: Arc<dyn OrderNumberSource>,
    ) -> Self {
        Self {
            db,
            carts,
            catalog,
            numbers,
            orders: SqliteOrdersRepository::new(),
            locks: OwnerLocks::default(),
        }
    }

    /// Write the order and its lines in one transaction.
    async fn persist(&self, order: NewOrder) -> Result<Order, CheckoutError> {
        let mut tx = self.db.begin().await?;

        let mut created = None;

        for attempt in 1..=ORDER_NUMBER_ATTEMPTS {
            let number = self.numbers.next_number();

            match self.orders.create_order(&mut tx, &order, &number).await {
                Ok(row) => {
                    created = Some(row);
                    break;
                }
                Err(error) if is_unique_violation(&error) => {
                    warn!(attempt, order_number = %number, "order number taken, retrying");
                }
                Err(error) => return Err(error.into()),
            }
        }

        let Some(mut created) = created else {
            return Err(CheckoutError::OrderNumberExhausted(ORDER_NUMBER_ATTEMPTS));
        };

        self.orders
            .create_order_lines(&mut tx, created.id, &order.lines)
            .await?;

        tx.commit().await?;

        created.lines = order.lines;

        Ok(created)
    }

    /// Remove the checked out lines from the cart, retrying a few times.
    /// Returns whether they were removed.
    async fn clear_cart(&self, owner: OwnerId, checked_out: &[CartLine]) -> bool {
        for attempt in 1..=CART_CLEAR_ATTEMPTS {
            match self.carts.remove_checked_out(owner, checked_out).await {
                Ok(()) => return true,
                Err(error) => {
                    warn!(%owner, attempt, error = %error, "failed to clear cart after checkout");

                    if attempt < CART_CLEAR_ATTEMPTS {
                        sleep(CART_CLEAR_BACKOFF * attempt).await;
                    }
                }
            }
        }

        false
    }
}

impl fmt::Debug for SqliteCheckoutService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SqliteCheckoutService")
            .field("db", &self.db)
            .field("numbers", &self.numbers)
            .field("locks", &self.locks)
            .finish_non_exhaustive()
    }
}

fn is_unique_violation(error: &sqlx::Error) -> bool {
    error
        .as_database_error()
        .map(DatabaseError::kind)
        .is_some_and(|kind| matches!(kind, ErrorKind::UniqueViolation))
}

#[async_trait]
impl CheckoutService for SqliteCheckoutService {
    async fn checkout(
        &self,
        owner: OwnerId,
        details: CheckoutDetails,
    ) -> Result<CheckoutOutcome, CheckoutError> {
        let details = details.validated()?;

        let _guard = timeout(self.db.timeout(), self.locks.lock(owner)).await?;

        let items = self.carts.list_items(owner).await?;

        if items.is_empty() {
            return Err(CheckoutError::EmptyCart);
        }

        let lines = freeze_lines(self.catalog.as_ref(), owner, &items).await?;
        let total_amount = order_total(&lines).ok_or(CheckoutError::TotalOverflow)?;

        let new_order = NewOrder {
            owner,
            order_date: Timestamp::now(),
            shipping_address: details.shipping_address,
            payment_method: details.payment_method,
            status: OrderStatus::Completed,
            total_amount,
            lines,
        };

        let order = self.db.within(self.persist(new_order)).await?;

        info!(
            %owner,
            order_number = %order.order_number,
            total_amount = order.total_amount,
            lines = order.lines.len(),
            "order placed"
        );

        let checked_out: Vec<CartLine> = items.into_iter().map(|item| item.line).collect();
        let cart_cleared = self.clear_cart(owner, &checked_out).await;

        Ok(CheckoutOutcome {
            order,
            cart_cleared,
        })
    }
}

#[automock]
#[async_trait]
pub trait CheckoutService: Send + Sync {
    /// Convert the owner's cart into a completed order and clear the cart.
    async fn checkout(
        &self,
        owner: OwnerId,
        details: CheckoutDetails,
    ) -> Result<CheckoutOutcome, CheckoutError>;
}
