//! Carts service.

use std::{fmt, sync::Arc};

use async_trait::async_trait;
use jiff::Timestamp;
use mockall::automock;

use crate::{
    database::Db,
    domain::{
        carts::{
            errors::CartsServiceError,
            models::{CartItem, CartLine, CartLineId},
            repository::SqliteCartRepository,
        },
        products::{ProductCatalog, models::ProductId},
    },
    ids::OwnerId,
};

#[derive(Clone)]
pub struct SqliteCartsService {
    db: Db,
    repository: SqliteCartRepository,
    catalog: Arc<dyn ProductCatalog>,
}

impl SqliteCartsService {
    #[must_use]
    pub fn new(db: Db, catalog: Arc<dyn ProductCatalog>) -> Self {
        Self {
            db,
            repository: SqliteCartRepository::new(),
            catalog,
        }
    }
}

impl fmt::Debug for SqliteCartsService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SqliteCartsService")
            .field("db", &self.db)
            .finish_non_exhaustive()
    }
}

fn positive_quantity(quantity: i64) -> Result<u32, CartsServiceError> {
    match u32::try_from(quantity) {
        Ok(value) if value >= 1 => Ok(value),
        _ => Err(CartsServiceError::InvalidQuantity(quantity)),
    }
}

#[async_trait]
impl CartsService for SqliteCartsService {
    async fn add_item(
        &self,
        owner: OwnerId,
        product: ProductId,
        quantity: i64,
    ) -> Result<CartLine, CartsServiceError> {
        let quantity = positive_quantity(quantity)?;

        if self.catalog.resolve(product).await?.is_none() {
            return Err(CartsServiceError::ProductNotFound);
        }

        self.db
            .within(async {
                let mut tx = self.db.begin().await?;

                let line = self
                    .repository
                    .add_item(&mut tx, owner, product, quantity, Timestamp::now())
                    .await?;

                tx.commit().await?;

                Ok(line)
            })
            .await
    }

    async fn update_quantity(
        &self,
        owner: OwnerId,
        line: CartLineId,
        quantity: i64,
    ) -> Result<bool, CartsServiceError> {
        if quantity <= 0 {
            return self.remove_item(owner, line).await;
        }

        let quantity = positive_quantity(quantity)?;

        self.db
            .within(async {
                let mut tx = self.db.begin().await?;

                let rows_affected = self
                    .repository
                    .update_quantity(&mut tx, owner, line, quantity, Timestamp::now())
                    .await?;

                tx.commit().await?;

                Ok(rows_affected > 0)
            })
            .await
    }

    async fn remove_item(
        &self,
        owner: OwnerId,
        line: CartLineId,
    ) -> Result<bool, CartsServiceError> {
        self.db
            .within(async {
                let mut tx = self.db.begin().await?;

                let rows_affected = self.repository.remove_item(&mut tx, owner, line).await?;

                tx.commit().await?;

                Ok(rows_affected > 0)
            })
            .await
    }

    async fn list_items(&self, owner: OwnerId) -> Result<Vec<CartItem>, CartsServiceError> {
        self.db
            .within(async {
                let mut tx = self.db.begin().await?;

                let items = self.repository.list_items(&mut tx, owner).await?;

                tx.commit().await?;

                Ok(items)
            })
            .await
    }

    async fn total(&self, owner: OwnerId) -> Result<u64, CartsServiceError> {
        self.db
            .within(async {
                let mut tx = self.db.begin().await?;

                let total = self.repository.total(&mut tx, owner).await?;

                tx.commit().await?;

                Ok(total)
            })
            .await
    }

    async fn item_count(&self, owner: OwnerId) -> Result<u64, CartsServiceError> {
        self.db
            .within(async {
                let mut tx = self.db.begin().await?;

                let count = self.repository.item_count(&mut tx, owner).await?;

                tx.commit().await?;

                Ok(count)
            })
            .await
    }

    async fn clear(&self, owner: OwnerId) -> Result<(), CartsServiceError> {
        self.db
            .within(async {
                let mut tx = self.db.begin().await?;

                self.repository.clear(&mut tx, owner).await?;

                tx.commit().await?;

                Ok(())
            })
            .await
    }

    async fn remove_checked_out(
        &self,
        owner: OwnerId,
        lines: &[CartLine],
    ) -> Result<(), CartsServiceError> {
        self.db
            .within(async {
                let mut tx = self.db.begin().await?;
                let now = Timestamp::now();

                for line in lines.iter().filter(|line| line.owner == owner) {
                    self.repository.release_line(&mut tx, line, now).await?;
                }

                tx.commit().await?;

                Ok(())
            })
            .await
    }
}

#[automock]
#[async_trait]
pub trait CartsService: Send + Sync {
    /// Adds `quantity` of a product, merging into the existing line for that product.
    async fn add_item(
        &self,
        owner: OwnerId,
        product: ProductId,
        quantity: i64,
    ) -> Result<CartLine, CartsServiceError>;

    /// Sets a line's quantity; zero or less removes it.
    ///
    /// Returns `false` when the line does not belong to `owner`.
    async fn update_quantity(
        &self,
        owner: OwnerId,
        line: CartLineId,
        quantity: i64,
    ) -> Result<bool, CartsServiceError>;

    /// Removes a line. Returns `false` when the line does not belong to `owner`.
    async fn remove_item(&self, owner: OwnerId, line: CartLineId)
    -> Result<bool, CartsServiceError>;

    /// Lines of the owner's cart joined with live product data.
    async fn list_items(&self, owner: OwnerId) -> Result<Vec<CartItem>, CartsServiceError>;

    /// Sum of quantity times live unit price over available products.
    async fn total(&self, owner: OwnerId) -> Result<u64, CartsServiceError>;

    /// Sum of quantities across the owner's lines.
    async fn item_count(&self, owner: OwnerId) -> Result<u64, CartsServiceError>;

    /// Removes every line for the owner. Clearing an empty cart succeeds.
    async fn clear(&self, owner: OwnerId) -> Result<(), CartsServiceError>;

    /// Removes the quantities of `lines` as they were read at checkout.
    ///
    /// Lines changed since then keep whatever was added on top; lines already
    /// gone are skipped.
    async fn remove_checked_out(
        &self,
        owner: OwnerId,
        lines: &[CartLine],
    ) -> Result<(), CartsServiceError>;
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use crate::{
        domain::products::{ProductsService, data::ProductUpdate},
        test::{TestContext, helpers::create_product},
    };

    use super::*;

    const OWNER: OwnerId = OwnerId::new(1);
    const OTHER_OWNER: OwnerId = OwnerId::new(2);

    #[tokio::test]
    async fn repeated_adds_merge_into_one_line() -> TestResult {
        let ctx = TestContext::new().await;
        let product = create_product(&ctx, "Laptop", 45_000).await?;

        for quantity in [1, 3, 2, 5] {
            ctx.carts.add_item(OWNER, product.id, quantity).await?;
        }

        let items = ctx.carts.list_items(OWNER).await?;

        assert_eq!(items.len(), 1, "one line per product");
        assert_eq!(items.first().map(|item| item.line.quantity), Some(11));

        Ok(())
    }

    #[tokio::test]
    async fn add_item_rejects_non_positive_quantity() -> TestResult {
        let ctx = TestContext::new().await;
        let product = create_product(&ctx, "Laptop", 45_000).await?;

        for quantity in [0, -1] {
            let result = ctx.carts.add_item(OWNER, product.id, quantity).await;

            assert!(
                matches!(result, Err(CartsServiceError::InvalidQuantity(q)) if q == quantity),
                "expected InvalidQuantity, got {result:?}"
            );
        }

        assert!(ctx.carts.list_items(OWNER).await?.is_empty());

        Ok(())
    }

    #[tokio::test]
    async fn add_item_unknown_product_returns_not_found() {
        let ctx = TestContext::new().await;

        let result = ctx.carts.add_item(OWNER, ProductId::new(999), 1).await;

        assert!(
            matches!(result, Err(CartsServiceError::ProductNotFound)),
            "expected ProductNotFound, got {result:?}"
        );
    }

    #[tokio::test]
    async fn update_quantity_sets_new_value() -> TestResult {
        let ctx = TestContext::new().await;
        let product = create_product(&ctx, "Mouse", 2_500).await?;
        let line = ctx.carts.add_item(OWNER, product.id, 1).await?;

        assert!(ctx.carts.update_quantity(OWNER, line.id, 4).await?);

        assert_eq!(ctx.carts.item_count(OWNER).await?, 4);

        Ok(())
    }

    #[tokio::test]
    async fn update_quantity_to_zero_removes_line() -> TestResult {
        let ctx = TestContext::new().await;
        let product = create_product(&ctx, "Mouse", 2_500).await?;
        let line = ctx.carts.add_item(OWNER, product.id, 2).await?;

        assert!(ctx.carts.update_quantity(OWNER, line.id, 0).await?);
        assert!(ctx.carts.list_items(OWNER).await?.is_empty());

        Ok(())
    }

    #[tokio::test]
    async fn other_owners_cannot_touch_a_line() -> TestResult {
        let ctx = TestContext::new().await;
        let product = create_product(&ctx, "Mouse", 2_500).await?;
        let line = ctx.carts.add_item(OWNER, product.id, 2).await?;

        assert!(!ctx.carts.update_quantity(OTHER_OWNER, line.id, 7).await?);
        assert!(!ctx.carts.update_quantity(OTHER_OWNER, line.id, 0).await?);
        assert!(!ctx.carts.remove_item(OTHER_OWNER, line.id).await?);

        let items = ctx.carts.list_items(OWNER).await?;
        assert_eq!(items.first().map(|item| item.line.quantity), Some(2));

        Ok(())
    }

    #[tokio::test]
    async fn remove_item_is_idempotent_by_final_state() -> TestResult {
        let ctx = TestContext::new().await;
        let product = create_product(&ctx, "Mouse", 2_500).await?;
        let line = ctx.carts.add_item(OWNER, product.id, 1).await?;

        assert!(ctx.carts.remove_item(OWNER, line.id).await?);
        assert!(!ctx.carts.remove_item(OWNER, line.id).await?);
        assert!(ctx.carts.list_items(OWNER).await?.is_empty());

        Ok(())
    }

    #[tokio::test]
    async fn list_items_for_unknown_owner_is_empty() -> TestResult {
        let ctx = TestContext::new().await;

        assert!(ctx.carts.list_items(OwnerId::new(77)).await?.is_empty());
        assert_eq!(ctx.carts.total(OwnerId::new(77)).await?, 0);
        assert_eq!(ctx.carts.item_count(OwnerId::new(77)).await?, 0);

        Ok(())
    }

    #[tokio::test]
    async fn total_uses_live_prices() -> TestResult {
        let ctx = TestContext::new().await;
        let laptop = create_product(&ctx, "Laptop", 50_000).await?;
        let dock = create_product(&ctx, "Dock", 30_000).await?;

        ctx.carts.add_item(OWNER, laptop.id, 2).await?;
        ctx.carts.add_item(OWNER, dock.id, 1).await?;

        assert_eq!(ctx.carts.total(OWNER).await?, 130_000);

        ctx.products
            .update_product(
                dock.id,
                ProductUpdate {
                    name: "Dock".to_string(),
                    description: String::new(),
                    price: 35_000,
                    stock_quantity: 10,
                    category: None,
                    featured: false,
                },
            )
            .await?;

        assert_eq!(ctx.carts.total(OWNER).await?, 135_000);

        Ok(())
    }

    #[tokio::test]
    async fn deleted_products_stay_listed_as_unavailable() -> TestResult {
        let ctx = TestContext::new().await;
        let laptop = create_product(&ctx, "Laptop", 45_000).await?;
        let dock = create_product(&ctx, "Dock", 30_000).await?;

        ctx.carts.add_item(OWNER, laptop.id, 2).await?;
        ctx.carts.add_item(OWNER, dock.id, 1).await?;
        ctx.products.delete_product(dock.id).await?;

        let items = ctx.carts.list_items(OWNER).await?;
        let availability: Vec<(ProductId, bool)> = items
            .iter()
            .map(|item| (item.line.product, item.available))
            .collect();

        assert_eq!(availability, vec![(laptop.id, true), (dock.id, false)]);
        assert_eq!(ctx.carts.total(OWNER).await?, 90_000);
        assert_eq!(
            items.iter().map(CartItem::line_total).collect::<Vec<_>>(),
            vec![Some(90_000), Some(0)]
        );

        Ok(())
    }

    #[tokio::test]
    async fn clear_empties_any_cart_and_is_idempotent() -> TestResult {
        let ctx = TestContext::new().await;
        let product = create_product(&ctx, "Mouse", 2_500).await?;

        ctx.carts.add_item(OWNER, product.id, 3).await?;
        ctx.carts.add_item(OTHER_OWNER, product.id, 1).await?;

        ctx.carts.clear(OWNER).await?;
        ctx.carts.clear(OWNER).await?;

        assert!(ctx.carts.list_items(OWNER).await?.is_empty());
        assert_eq!(ctx.carts.item_count(OTHER_OWNER).await?, 1);

        Ok(())
    }

    #[tokio::test]
    async fn remove_checked_out_keeps_later_additions() -> TestResult {
        let ctx = TestContext::new().await;
        let laptop = create_product(&ctx, "Laptop", 45_000).await?;
        let mouse = create_product(&ctx, "Mouse", 2_500).await?;
        let dock = create_product(&ctx, "Dock", 30_000).await?;

        let laptop_line = ctx.carts.add_item(OWNER, laptop.id, 2).await?;
        let dock_line = ctx.carts.add_item(OWNER, dock.id, 1).await?;

        ctx.carts.add_item(OWNER, laptop.id, 1).await?;
        ctx.carts.add_item(OWNER, mouse.id, 1).await?;

        ctx.carts
            .remove_checked_out(OWNER, &[laptop_line, dock_line])
            .await?;

        let remaining: Vec<(ProductId, u32)> = ctx
            .carts
            .list_items(OWNER)
            .await?
            .iter()
            .map(|item| (item.line.product, item.line.quantity))
            .collect();

        assert_eq!(remaining, vec![(laptop.id, 1), (mouse.id, 1)]);

        Ok(())
    }

    #[tokio::test]
    async fn remove_checked_out_ignores_missing_and_foreign_lines() -> TestResult {
        let ctx = TestContext::new().await;
        let mouse = create_product(&ctx, "Mouse", 2_500).await?;

        let mine = ctx.carts.add_item(OWNER, mouse.id, 2).await?;
        let theirs = ctx.carts.add_item(OTHER_OWNER, mouse.id, 1).await?;

        ctx.carts.remove_item(OWNER, mine.id).await?;
        ctx.carts
            .remove_checked_out(OWNER, &[mine, theirs])
            .await?;

        assert_eq!(ctx.carts.item_count(OTHER_OWNER).await?, 1);

        Ok(())
    }
}
