//! Categories service.

use async_trait::async_trait;
use jiff::Timestamp;
use mockall::automock;

use crate::{
    database::Db,
    domain::categories::{
        data::{DESCRIPTION_MAX_CHARS, NAME_MAX_CHARS, NewCategory},
        errors::CategoriesServiceError,
        models::{Category, CategoryId, CategorySummary},
        repository::SqliteCategoriesRepository,
    },
};

#[derive(Debug, Clone)]
pub struct SqliteCategoriesService {
    db: Db,
    repository: SqliteCategoriesRepository,
}

impl SqliteCategoriesService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            repository: SqliteCategoriesRepository::new(),
        }
    }
}

fn validate(category: &NewCategory) -> Result<(), CategoriesServiceError> {
    let name = category.name.trim().chars().count();

    if name == 0 || name > NAME_MAX_CHARS {
        return Err(CategoriesServiceError::InvalidLength {
            field: "name",
            max: NAME_MAX_CHARS,
        });
    }

    if category.description.trim().chars().count() > DESCRIPTION_MAX_CHARS {
        return Err(CategoriesServiceError::InvalidLength {
            field: "description",
            max: DESCRIPTION_MAX_CHARS,
        });
    }

    Ok(())
}

#[async_trait]
impl CategoriesService for SqliteCategoriesService {
    async fn list_categories(&self) -> Result<Vec<CategorySummary>, CategoriesServiceError> {
        self.db
            .within(async {
                let mut tx = self.db.begin().await?;

                let categories = self.repository.list_categories(&mut tx).await?;

                tx.commit().await?;

                Ok(categories)
            })
            .await
    }

    async fn get_category(&self, category: CategoryId) -> Result<Category, CategoriesServiceError> {
        self.db
            .within(async {
                let mut tx = self.db.begin().await?;

                let category = self.repository.get_category(&mut tx, category).await?;

                tx.commit().await?;

                Ok(category)
            })
            .await
    }

    async fn create_category(
        &self,
        category: NewCategory,
    ) -> Result<Category, CategoriesServiceError> {
        validate(&category)?;

        self.db
            .within(async {
                let mut tx = self.db.begin().await?;

                let created = self
                    .repository
                    .create_category(&mut tx, &category, Timestamp::now())
                    .await?;

                tx.commit().await?;

                Ok(created)
            })
            .await
    }
}

#[automock]
#[async_trait]
pub trait CategoriesService: Send + Sync {
    /// Every category by name, each with its count of orderable products.
    async fn list_categories(&self) -> Result<Vec<CategorySummary>, CategoriesServiceError>;

    /// Retrieve a single category.
    async fn get_category(&self, category: CategoryId) -> Result<Category, CategoriesServiceError>;

    /// Creates a category. Names are unique.
    async fn create_category(
        &self,
        category: NewCategory,
    ) -> Result<Category, CategoriesServiceError>;
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use crate::{
        domain::products::{ProductsService, data::NewProduct},
        test::{
            TestContext,
            helpers::{create_category, new_product},
        },
    };

    use super::*;

    #[tokio::test]
    async fn list_categories_orders_by_name_and_counts_orderable_products() -> TestResult {
        let ctx = TestContext::new().await;
        let laptops = create_category(&ctx, "Laptops").await?;
        let docks = create_category(&ctx, "Docks").await?;
        let empty = create_category(&ctx, "Monitors").await?;

        ctx.products
            .create_product(NewProduct {
                category: Some(laptops.id),
                ..new_product("Ultrabook", 90_000)
            })
            .await?;
        ctx.products
            .create_product(NewProduct {
                category: Some(laptops.id),
                stock_quantity: 0,
                ..new_product("Sold out", 80_000)
            })
            .await?;
        let removed = ctx
            .products
            .create_product(NewProduct {
                category: Some(laptops.id),
                ..new_product("Retired", 70_000)
            })
            .await?;
        ctx.products.delete_product(removed.id).await?;
        ctx.products
            .create_product(NewProduct {
                category: Some(docks.id),
                ..new_product("USB-C Dock", 30_000)
            })
            .await?;

        let listed: Vec<(CategoryId, u64)> = ctx
            .categories
            .list_categories()
            .await?
            .iter()
            .map(|summary| (summary.category.id, summary.product_count))
            .collect();

        assert_eq!(listed, vec![(docks.id, 1), (laptops.id, 1), (empty.id, 0)]);

        Ok(())
    }

    #[tokio::test]
    async fn create_category_trims_and_rejects_duplicates() -> TestResult {
        let ctx = TestContext::new().await;

        let created = ctx
            .categories
            .create_category(NewCategory {
                name: "  Laptops ".to_string(),
                description: "Portable computers".to_string(),
            })
            .await?;

        assert_eq!(created.name, "Laptops");
        assert_eq!(ctx.categories.get_category(created.id).await?, created);

        let duplicate = create_category(&ctx, "Laptops").await;

        assert!(
            matches!(duplicate, Err(CategoriesServiceError::AlreadyExists)),
            "got {duplicate:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn create_category_enforces_lengths() {
        let ctx = TestContext::new().await;
        let long_name = "x".repeat(51);
        let long_description = "d".repeat(201);

        for (name, description) in [
            ("  ", ""),
            (long_name.as_str(), ""),
            ("Ok", long_description.as_str()),
        ] {
            let result = ctx
                .categories
                .create_category(NewCategory {
                    name: name.to_string(),
                    description: description.to_string(),
                })
                .await;

            assert!(
                matches!(result, Err(CategoriesServiceError::InvalidLength { .. })),
                "got {result:?}"
            );
        }
    }

    #[tokio::test]
    async fn get_category_unknown_id_returns_not_found() {
        let ctx = TestContext::new().await;

        let result = ctx.categories.get_category(CategoryId::new(404)).await;

        assert!(
            matches!(result, Err(CategoriesServiceError::NotFound)),
            "got {result:?}"
        );
    }
}
