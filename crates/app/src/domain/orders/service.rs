//! Orders service.

use async_trait::async_trait;
use jiff::Timestamp;
use mockall::automock;
use tracing::info;

use crate::{
    database::Db,
    domain::orders::{
        errors::OrdersServiceError,
        models::{Order, OrderId, OrderStatus},
        repository::SqliteOrdersRepository,
    },
    ids::OwnerId,
};

#[derive(Debug, Clone)]
pub struct SqliteOrdersService {
    db: Db,
    repository: SqliteOrdersRepository,
}

impl SqliteOrdersService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            repository: SqliteOrdersRepository::new(),
        }
    }

    /// Compare-and-set the status. The update must stay the first statement of
    /// the transaction.
    async fn swap_status(
        &self,
        order: OrderId,
        from: OrderStatus,
        to: OrderStatus,
    ) -> Result<Order, OrdersServiceError> {
        let mut tx = self.db.begin().await?;

        let rows_affected = self
            .repository
            .update_status(&mut tx, order, from, to, Timestamp::now())
            .await?;

        if rows_affected == 0 {
            return Err(OrdersServiceError::StatusChanged { expected: from });
        }

        let updated = self.repository.get_order_by_id(&mut tx, order).await?;

        tx.commit().await?;

        Ok(updated)
    }
}

#[async_trait]
impl OrdersService for SqliteOrdersService {
    async fn get_order(&self, owner: OwnerId, order: OrderId) -> Result<Order, OrdersServiceError> {
        self.db
            .within(async {
                let mut tx = self.db.begin().await?;

                let order = self.repository.get_order(&mut tx, owner, order).await?;

                tx.commit().await?;

                Ok(order)
            })
            .await
    }

    async fn find_by_number(
        &self,
        owner: OwnerId,
        order_number: &str,
    ) -> Result<Order, OrdersServiceError> {
        let order_number = order_number.trim().to_ascii_uppercase();

        self.db
            .within(async {
                let mut tx = self.db.begin().await?;

                let order = self
                    .repository
                    .find_order_by_number(&mut tx, owner, &order_number)
                    .await?;

                tx.commit().await?;

                Ok(order)
            })
            .await
    }

    async fn list_orders(&self, owner: OwnerId) -> Result<Vec<Order>, OrdersServiceError> {
        self.db
            .within(async {
                let mut tx = self.db.begin().await?;

                let orders = self.repository.list_orders(&mut tx, owner).await?;

                tx.commit().await?;

                Ok(orders)
            })
            .await
    }

    async fn count_orders(&self) -> Result<u64, OrdersServiceError> {
        self.db
            .within(async {
                let mut tx = self.db.begin().await?;

                let count = self.repository.count_orders(&mut tx).await?;

                tx.commit().await?;

                Ok(count)
            })
            .await
    }

    async fn update_status(
        &self,
        order: OrderId,
        status: OrderStatus,
    ) -> Result<Order, OrdersServiceError> {
        let current = self
            .db
            .within(async {
                let mut tx = self.db.begin().await?;

                let current = self.repository.get_order_by_id(&mut tx, order).await?;

                tx.commit().await?;

                Ok::<_, OrdersServiceError>(current)
            })
            .await?;

        if current.status == status {
            return Ok(current);
        }

        if !current.status.can_transition_to(status) {
            return Err(OrdersServiceError::InvalidTransition {
                from: current.status,
                to: status,
            });
        }

        let updated = self.db.within(self.swap_status(order, current.status, status)).await?;

        info!(
            order_number = %updated.order_number,
            from = %current.status,
            to = %updated.status,
            "order status changed"
        );

        Ok(updated)
    }
}

#[automock]
#[async_trait]
pub trait OrdersService: Send + Sync {
    /// Retrieve one of the owner's orders with its lines.
    async fn get_order(&self, owner: OwnerId, order: OrderId) -> Result<Order, OrdersServiceError>;

    /// Retrieve one of the owner's orders by its order number.
    async fn find_by_number(
        &self,
        owner: OwnerId,
        order_number: &str,
    ) -> Result<Order, OrdersServiceError>;

    /// The owner's orders, newest first.
    async fn list_orders(&self, owner: OwnerId) -> Result<Vec<Order>, OrdersServiceError>;

    /// Number of persisted orders across all owners.
    async fn count_orders(&self) -> Result<u64, OrdersServiceError>;

    /// Move an order to a new status.
    async fn update_status(
        &self,
        order: OrderId,
        status: OrderStatus,
    ) -> Result<Order, OrdersServiceError>;
}
