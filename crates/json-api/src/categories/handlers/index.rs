//! List Categories Handler

use std::sync::Arc;

use salvo::prelude::*;

use crate::{
    categories::{errors::into_status_error, handlers::CategoryResponse},
    extensions::*,
    state::State,
};

/// List Categories Handler
///
/// Returns every category by name, with its count of orderable products.
#[endpoint(tags("categories"), summary = "List Categories")]
pub(crate) async fn handler(
    depot: &mut Depot,
) -> Result<Json<Vec<CategoryResponse>>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let categories = state
        .app
        .categories
        .list_categories()
        .await
        .map_err(into_status_error)?;

    Ok(Json(categories.into_iter().map(Into::into).collect()))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use storefront_app::domain::categories::{
        CategoriesServiceError, MockCategoriesService, models::CategorySummary,
    };

    use crate::test_helpers::{TestMocks, make_category};

    use super::*;

    fn make_service(categories: MockCategoriesService) -> Service {
        TestMocks {
            categories,
            ..TestMocks::default()
        }
        .into_service(Router::with_path("categories").get(handler))
    }

    #[tokio::test]
    async fn test_index_returns_categories_with_counts() -> TestResult {
        let mut categories = MockCategoriesService::new();

        categories.expect_list_categories().once().return_once(|| {
            Ok(vec![
                CategorySummary {
                    category: make_category(2, "Docks"),
                    product_count: 3,
                },
                CategorySummary {
                    category: make_category(1, "Laptops"),
                    product_count: 0,
                },
            ])
        });

        let mut res = TestClient::get("http://example.com/categories")
            .send(&make_service(categories))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));

        let body: Vec<CategoryResponse> = res.take_json().await?;

        assert_eq!(
            body.iter()
                .map(|category| (category.name.as_str(), category.product_count))
                .collect::<Vec<_>>(),
            vec![("Docks", Some(3)), ("Laptops", Some(0))]
        );

        Ok(())
    }

    #[tokio::test]
    async fn test_index_hides_storage_errors() -> TestResult {
        let mut categories = MockCategoriesService::new();

        categories
            .expect_list_categories()
            .once()
            .return_once(|| Err(CategoriesServiceError::Sql(sqlx::Error::PoolTimedOut)));

        let res = TestClient::get("http://example.com/categories")
            .send(&make_service(categories))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::INTERNAL_SERVER_ERROR));

        Ok(())
    }
}
