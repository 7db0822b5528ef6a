//! List Products Handler

use std::sync::Arc;

use salvo::{oapi::extract::QueryParam, prelude::*};

use crate::{
    extensions::*,
    products::{errors::into_status_error, handlers::ProductResponse},
    state::State,
};

/// List Products Handler
///
/// Returns the products a buyer can order, newest first. With `q`, returns the
/// ones whose name, description or category contains it.
#[endpoint(tags("products"), summary = "List Products")]
pub(crate) async fn handler(
    q: QueryParam<String, false>,
    depot: &mut Depot,
) -> Result<Json<Vec<ProductResponse>>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let products = match q.into_inner().filter(|term| !term.trim().is_empty()) {
        Some(term) => state.app.products.search_products(&term).await,
        None => state.app.products.list_products().await,
    }
    .map_err(into_status_error)?;

    Ok(Json(products.into_iter().map(Into::into).collect()))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use storefront_app::domain::products::{MockProductsService, ProductsServiceError};

    use crate::test_helpers::{TestMocks, make_product};

    use super::*;

    fn make_service(products: MockProductsService) -> Service {
        TestMocks {
            products,
            ..TestMocks::default()
        }
        .into_service(Router::with_path("products").get(handler))
    }

    #[tokio::test]
    async fn test_index_returns_products() -> TestResult {
        let mut products = MockProductsService::new();

        products
            .expect_list_products()
            .once()
            .return_once(|| Ok(vec![make_product(2), make_product(1)]));

        let mut res = TestClient::get("http://example.com/products")
            .send(&make_service(products))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));

        let body: Vec<ProductResponse> = res.take_json().await?;

        assert_eq!(
            body.iter().map(|product| product.id).collect::<Vec<_>>(),
            vec![2, 1]
        );

        Ok(())
    }

    #[tokio::test]
    async fn test_index_with_query_searches() -> TestResult {
        let mut products = MockProductsService::new();

        products.expect_list_products().never();
        products
            .expect_search_products()
            .once()
            .withf(|term| term == "thinkpad")
            .return_once(|_| Ok(vec![make_product(3)]));

        let mut res = TestClient::get("http://example.com/products?q=thinkpad")
            .send(&make_service(products))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));

        let body: Vec<ProductResponse> = res.take_json().await?;

        assert_eq!(body.len(), 1);

        Ok(())
    }

    #[tokio::test]
    async fn test_index_with_blank_query_lists_everything() -> TestResult {
        let mut products = MockProductsService::new();

        products.expect_search_products().never();
        products
            .expect_list_products()
            .once()
            .return_once(|| Ok(vec![]));

        let res = TestClient::get("http://example.com/products?q=%20%20")
            .send(&make_service(products))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));

        Ok(())
    }

    #[tokio::test]
    async fn test_index_hides_storage_errors() -> TestResult {
        let mut products = MockProductsService::new();

        products
            .expect_list_products()
            .once()
            .return_once(|| Err(ProductsServiceError::Sql(sqlx::Error::PoolTimedOut)));

        let mut res = TestClient::get("http://example.com/products")
            .send(&make_service(products))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::INTERNAL_SERVER_ERROR));
        assert!(!res.take_string().await?.contains("pool"));

        Ok(())
    }
}
