//! App Router

use salvo::Router;

use crate::{carts, categories, checkout, orders, owners, products};

/// Routes served on behalf of an owner named by the gateway.
pub(crate) fn app_router() -> Router {
    Router::new()
        .hoop(owners::middleware::handler)
        .push(
            Router::with_path("products")
                .get(products::index::handler)
                .push(Router::with_path("featured").get(products::featured::handler))
                .push(Router::with_path("new").get(products::new_arrivals::handler))
                .push(Router::with_path("{product}").get(products::get::handler)),
        )
        .push(
            Router::with_path("categories")
                .get(categories::handlers::index::handler)
                .push(
                    Router::with_path("{category}")
                        .get(categories::handlers::get::handler)
                        .push(
                            Router::with_path("products")
                                .get(categories::handlers::products::handler),
                        ),
                ),
        )
        .push(
            Router::with_path("cart")
                .get(carts::handlers::get::handler)
                .delete(carts::handlers::clear::handler)
                .push(
                    Router::with_path("items")
                        .post(carts::items::handlers::create::handler)
                        .push(
                            Router::with_path("{line}")
                                .put(carts::items::handlers::update::handler)
                                .delete(carts::items::handlers::delete::handler),
                        ),
                ),
        )
        .push(Router::with_path("checkout").post(checkout::handlers::create::handler))
        .push(
            Router::with_path("orders")
                .get(orders::handlers::index::handler)
                .push(
                    Router::with_path("{order}")
                        .get(orders::handlers::get::handler)
                        .push(Router::with_path("receipt").get(orders::handlers::receipt::handler)),
                ),
        )
}

#[cfg(test)]
mod tests {
    use salvo::{affix_state::inject, prelude::*, test::TestClient};
    use testresult::TestResult;

    use storefront_app::domain::{carts::MockCartsService, products::MockProductsService};

    use crate::{owners::middleware::OWNER_HEADER, state::State, test_helpers::TestMocks};

    use super::*;

    fn make_service(mocks: TestMocks) -> Service {
        Service::new(
            Router::new()
                .hoop(inject(State::from_app_context(mocks.into_app())))
                .push(app_router()),
        )
    }

    #[tokio::test]
    async fn test_routes_require_an_owner() -> TestResult {
        let mut carts = MockCartsService::new();

        carts.expect_list_items().never();

        let res = TestClient::get("http://example.com/cart")
            .send(&make_service(TestMocks {
                carts,
                ..TestMocks::default()
            }))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::UNAUTHORIZED));

        Ok(())
    }

    #[tokio::test]
    async fn test_owner_header_reaches_handlers() -> TestResult {
        let mut products = MockProductsService::new();

        products
            .expect_list_products()
            .once()
            .return_once(|| Ok(vec![]));

        let res = TestClient::get("http://example.com/products")
            .add_header(OWNER_HEADER, "9", true)
            .send(&make_service(TestMocks {
                products,
                ..TestMocks::default()
            }))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));

        Ok(())
    }

    #[tokio::test]
    async fn test_named_product_listings_win_over_product_ids() -> TestResult {
        let mut products = MockProductsService::new();

        products.expect_get_product().never();
        products
            .expect_featured_products()
            .once()
            .return_once(|| Ok(vec![]));
        products
            .expect_new_arrivals()
            .once()
            .return_once(|_| Ok(vec![]));

        let service = make_service(TestMocks {
            products,
            ..TestMocks::default()
        });

        for path in ["featured", "new"] {
            let res = TestClient::get(format!("http://example.com/products/{path}"))
                .add_header(OWNER_HEADER, "9", true)
                .send(&service)
                .await;

            assert_eq!(res.status_code, Some(StatusCode::OK), "{path}");
        }

        Ok(())
    }
}
