//! Test helpers.

use std::sync::Arc;

use jiff::Timestamp;
use salvo::{affix_state::inject, prelude::*};
use storefront_app::{
    context::AppContext,
    domain::{
        carts::{
            MockCartsService,
            models::{CartItem, CartLine, CartLineId},
        },
        categories::{
            MockCategoriesService,
            models::{Category, CategoryId},
        },
        checkout::MockCheckoutService,
        customers::MockCustomersService,
        orders::{
            MockOrdersService,
            models::{Order, OrderId, OrderLine, OrderStatus},
        },
        products::{
            MockProductCatalog, MockProductsService,
            models::{Product, ProductId},
        },
    },
    ids::OwnerId,
    receipts::ReceiptRenderer,
};

use crate::{extensions::*, state::State};

pub(crate) const TEST_OWNER: OwnerId = OwnerId::new(1);

#[salvo::handler]
pub(crate) async fn inject_owner(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
    ctrl: &mut FlowCtrl,
) {
    depot.insert_owner(TEST_OWNER);
    ctrl.call_next(req, depot, res).await;
}

/// Service mocks; any call without a matching expectation fails the test.
#[derive(Default)]
pub(crate) struct TestMocks {
    pub(crate) products: MockProductsService,
    pub(crate) categories: MockCategoriesService,
    pub(crate) carts: MockCartsService,
    pub(crate) orders: MockOrdersService,
    pub(crate) customers: MockCustomersService,
    pub(crate) checkout: MockCheckoutService,
}

impl TestMocks {
    pub(crate) fn into_app(self) -> AppContext {
        AppContext {
            products: Arc::new(self.products),
            categories: Arc::new(self.categories),
            catalog: Arc::new(MockProductCatalog::new()),
            carts: Arc::new(self.carts),
            orders: Arc::new(self.orders),
            customers: Arc::new(self.customers),
            checkout: Arc::new(self.checkout),
            receipts: Arc::new(ReceiptRenderer::default()),
        }
    }

    /// Serve `route` as [`TEST_OWNER`].
    pub(crate) fn into_service(self, route: Router) -> Service {
        Service::new(
            Router::new()
                .hoop(inject(State::from_app_context(self.into_app())))
                .hoop(inject_owner)
                .push(route),
        )
    }
}

pub(crate) fn make_product(id: i64) -> Product {
    Product {
        id: ProductId::new(id),
        name: format!("Product {id}"),
        description: String::new(),
        price: 45_000,
        stock_quantity: 10,
        category: None,
        featured: false,
        created_at: Timestamp::UNIX_EPOCH,
        updated_at: Timestamp::UNIX_EPOCH,
        deleted_at: None,
    }
}

pub(crate) fn make_category(id: i64, name: &str) -> Category {
    Category {
        id: CategoryId::new(id),
        name: name.to_string(),
        description: String::new(),
        created_at: Timestamp::UNIX_EPOCH,
        updated_at: Timestamp::UNIX_EPOCH,
    }
}

pub(crate) fn make_cart_line(id: i64, product: i64, quantity: u32) -> CartLine {
    CartLine {
        id: CartLineId::new(id),
        owner: TEST_OWNER,
        product: ProductId::new(product),
        quantity,
        created_at: Timestamp::UNIX_EPOCH,
        updated_at: Timestamp::UNIX_EPOCH,
    }
}

pub(crate) fn make_cart_item(id: i64, product: i64, quantity: u32, unit_price: u64) -> CartItem {
    CartItem {
        line: make_cart_line(id, product, quantity),
        product_name: Some(format!("Product {product}")),
        unit_price,
        available: true,
    }
}

pub(crate) fn make_order(id: i64) -> Order {
    Order {
        id: OrderId::new(id),
        order_number: "AB12CD34".to_string(),
        owner: TEST_OWNER,
        order_date: Timestamp::UNIX_EPOCH,
        shipping_address: "123 Main St".to_string(),
        payment_method: "Card".to_string(),
        status: OrderStatus::Completed,
        total_amount: 90_000,
        lines: vec![OrderLine {
            product: ProductId::new(7),
            product_name: "Desk Lamp".to_string(),
            quantity: 2,
            unit_price: 45_000,
        }],
        updated_at: Timestamp::UNIX_EPOCH,
    }
}
