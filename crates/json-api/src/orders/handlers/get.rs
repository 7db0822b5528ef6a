//! Get Order Handler

use std::sync::Arc;

use salvo::{oapi::extract::PathParam, prelude::*};

use storefront_app::domain::orders::models::OrderId;

use crate::{
    extensions::*,
    orders::{OrderResponse, errors::into_status_error},
    state::State,
};

/// Get Order Handler
///
/// Returns one of the caller's orders. Orders of other owners are not found.
#[endpoint(
    tags("orders"),
    summary = "Get Order",
    responses(
        (status_code = StatusCode::OK, description = "Order found"),
        (status_code = StatusCode::NOT_FOUND, description = "Order not found"),
    )
)]
pub(crate) async fn handler(
    order: PathParam<i64>,
    depot: &mut Depot,
) -> Result<Json<OrderResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let owner = depot.owner_or_401()?;

    let order = state
        .app
        .orders
        .get_order(owner, OrderId::new(order.into_inner()))
        .await
        .map_err(into_status_error)?;

    Ok(Json(order.into()))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use storefront_app::domain::orders::{MockOrdersService, OrdersServiceError};

    use crate::test_helpers::{TEST_OWNER, TestMocks, make_order};

    use super::*;

    fn make_service(orders: MockOrdersService) -> Service {
        TestMocks {
            orders,
            ..TestMocks::default()
        }
        .into_service(Router::with_path("orders/{order}").get(handler))
    }

    #[tokio::test]
    async fn test_get_returns_frozen_lines() -> TestResult {
        let mut orders = MockOrdersService::new();

        orders
            .expect_get_order()
            .once()
            .withf(|owner, order| *owner == TEST_OWNER && *order == OrderId::new(5))
            .return_once(|_, _| Ok(make_order(5)));

        let mut res = TestClient::get("http://example.com/orders/5")
            .send(&make_service(orders))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));

        let body: OrderResponse = res.take_json().await?;

        assert_eq!(body.order_number, "AB12CD34");
        assert_eq!(body.status, "completed");
        assert_eq!(body.total_amount, 90_000);
        assert_eq!(body.lines.first().map(|line| line.unit_price), Some(45_000));

        Ok(())
    }

    #[tokio::test]
    async fn test_get_missing_order_returns_404() -> TestResult {
        let mut orders = MockOrdersService::new();

        orders
            .expect_get_order()
            .once()
            .return_once(|_, _| Err(OrdersServiceError::NotFound));

        let res = TestClient::get("http://example.com/orders/5")
            .send(&make_service(orders))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::NOT_FOUND));

        Ok(())
    }
}
