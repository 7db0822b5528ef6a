//! Pricing snapshot

use tracing::warn;

use crate::{
    domain::{
        carts::models::CartItem,
        orders::models::OrderLine,
        products::{ProductCatalog, ProductsServiceError},
    },
    ids::OwnerId,
};

/// Name frozen into an order line whose product no longer resolves.
pub const UNKNOWN_PRODUCT_NAME: &str = "Unknown Product";

/// Freeze each cart line against the catalog as it is right now.
///
/// A product that no longer resolves becomes a sentinel line priced at zero.
pub(crate) async fn freeze_lines(
    catalog: &dyn ProductCatalog,
    owner: OwnerId,
    items: &[CartItem],
) -> Result<Vec<OrderLine>, ProductsServiceError> {
    let mut lines = Vec::with_capacity(items.len());

    for item in items {
        let product = item.line.product;

        let line = match catalog.resolve(product).await? {
            Some(snapshot) => OrderLine {
                product,
                product_name: snapshot.name,
                quantity: item.line.quantity,
                unit_price: snapshot.unit_price,
            },
            None => {
                warn!(%owner, %product, "product missing at checkout, using placeholder line");

                OrderLine {
                    product,
                    product_name: UNKNOWN_PRODUCT_NAME.to_string(),
                    quantity: item.line.quantity,
                    unit_price: 0,
                }
            }
        };

        lines.push(line);
    }

    Ok(lines)
}

/// Exact sum of `quantity * unit_price`, or `None` on overflow.
pub(crate) fn order_total(lines: &[OrderLine]) -> Option<u64> {
    lines
        .iter()
        .try_fold(0_u64, |total, line| total.checked_add(line.line_total()?))
}
