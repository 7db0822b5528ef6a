//! List Orders Handler

use std::sync::Arc;

use salvo::prelude::*;

use crate::{
    extensions::*,
    orders::{OrderResponse, errors::into_status_error},
    state::State,
};

/// List Orders Handler
///
/// Returns the caller's orders, newest first.
#[endpoint(tags("orders"), summary = "List Orders")]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<Vec<OrderResponse>>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let owner = depot.owner_or_401()?;

    let orders = state
        .app
        .orders
        .list_orders(owner)
        .await
        .map_err(into_status_error)?;

    Ok(Json(orders.into_iter().map(Into::into).collect()))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use storefront_app::domain::orders::MockOrdersService;

    use crate::test_helpers::{TEST_OWNER, TestMocks, make_order};

    use super::*;

    #[tokio::test]
    async fn test_index_returns_owner_orders() -> TestResult {
        let mut orders = MockOrdersService::new();

        orders
            .expect_list_orders()
            .once()
            .withf(|owner| *owner == TEST_OWNER)
            .return_once(|_| Ok(vec![make_order(2), make_order(1)]));

        let service = TestMocks {
            orders,
            ..TestMocks::default()
        }
        .into_service(Router::with_path("orders").get(handler));

        let mut res = TestClient::get("http://example.com/orders")
            .send(&service)
            .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));

        let body: Vec<OrderResponse> = res.take_json().await?;

        assert_eq!(
            body.iter().map(|order| order.id).collect::<Vec<_>>(),
            vec![2, 1]
        );

        Ok(())
    }
}
