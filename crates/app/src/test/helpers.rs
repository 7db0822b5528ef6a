//! Test Helpers

use jiff::Timestamp;

use crate::{
    domain::{
        categories::{
            CategoriesService, CategoriesServiceError, data::NewCategory, models::Category,
        },
        orders::{
            OrdersServiceError,
            data::NewOrder,
            models::{Order, OrderLine, OrderStatus},
            repository::SqliteOrdersRepository,
        },
        products::{
            ProductsService, ProductsServiceError,
            data::NewProduct,
            models::Product,
        },
    },
    ids::OwnerId,
    test::TestContext,
};

/// Uncategorised, unfeatured product with ten units in stock.
pub(crate) fn new_product(name: &str, price: u64) -> NewProduct {
    NewProduct {
        name: name.to_string(),
        description: String::new(),
        price,
        stock_quantity: 10,
        category: None,
        featured: false,
    }
}

pub(crate) async fn create_product(
    ctx: &TestContext,
    name: &str,
    price: u64,
) -> Result<Product, ProductsServiceError> {
    ctx.products.create_product(new_product(name, price)).await
}

pub(crate) async fn create_category(
    ctx: &TestContext,
    name: &str,
) -> Result<Category, CategoriesServiceError> {
    ctx.categories
        .create_category(NewCategory {
            name: name.to_string(),
            description: String::new(),
        })
        .await
}

/// Write an order directly, bypassing checkout.
pub(crate) async fn insert_order(
    ctx: &TestContext,
    owner: OwnerId,
    order_number: &str,
    status: OrderStatus,
    lines: Vec<OrderLine>,
) -> Result<Order, OrdersServiceError> {
    let repository = SqliteOrdersRepository::new();
    let mut tx = ctx.db.db().begin().await?;

    let total_amount = lines.iter().filter_map(OrderLine::line_total).sum();

    let order = NewOrder {
        owner,
        order_date: Timestamp::now(),
        shipping_address: "123 Main St".to_string(),
        payment_method: "Card".to_string(),
        status,
        total_amount,
        lines,
    };

    let mut created = repository.create_order(&mut tx, &order, order_number).await?;

    repository
        .create_order_lines(&mut tx, created.id, &order.lines)
        .await?;

    tx.commit().await?;

    created.lines = order.lines;

    Ok(created)
}
