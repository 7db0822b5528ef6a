//! Categories Repository

use jiff::Timestamp;
use sqlx::{FromRow, Row, Sqlite, Transaction, query_as, sqlite::SqliteRow};

use crate::{
    database::try_get_timestamp,
    domain::categories::{
        data::NewCategory,
        models::{Category, CategoryId, CategorySummary},
    },
};

const LIST_CATEGORIES_SQL: &str = include_str!("sql/list_categories.sql");
const GET_CATEGORY_SQL: &str = include_str!("sql/get_category.sql");
const CREATE_CATEGORY_SQL: &str = include_str!("sql/create_category.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct SqliteCategoriesRepository;

impl SqliteCategoriesRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn list_categories(
        &self,
        tx: &mut Transaction<'_, Sqlite>,
    ) -> Result<Vec<CategorySummary>, sqlx::Error> {
        query_as::<Sqlite, CategorySummary>(LIST_CATEGORIES_SQL)
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn get_category(
        &self,
        tx: &mut Transaction<'_, Sqlite>,
        category: CategoryId,
    ) -> Result<Category, sqlx::Error> {
        query_as::<Sqlite, Category>(GET_CATEGORY_SQL)
            .bind(category.into_inner())
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn create_category(
        &self,
        tx: &mut Transaction<'_, Sqlite>,
        category: &NewCategory,
        now: Timestamp,
    ) -> Result<Category, sqlx::Error> {
        query_as::<Sqlite, Category>(CREATE_CATEGORY_SQL)
            .bind(category.name.trim())
            .bind(category.description.trim())
            .bind(now.to_string())
            .fetch_one(&mut **tx)
            .await
    }
}

impl<'r> FromRow<'r, SqliteRow> for Category {
    fn from_row(row: &'r SqliteRow) -> sqlx::Result<Self> {
        Ok(Self {
            id: CategoryId::new(row.try_get("id")?),
            name: row.try_get("name")?,
            description: row.try_get("description")?,
            created_at: try_get_timestamp(row, "created_at")?,
            updated_at: try_get_timestamp(row, "updated_at")?,
        })
    }
}

impl<'r> FromRow<'r, SqliteRow> for CategorySummary {
    fn from_row(row: &'r SqliteRow) -> sqlx::Result<Self> {
        let product_count: i64 = row.try_get("product_count")?;

        Ok(Self {
            category: Category::from_row(row)?,
            product_count: u64::try_from(product_count).map_err(|e| {
                sqlx::Error::ColumnDecode {
                    index: "product_count".to_string(),
                    source: Box::new(e),
                }
            })?,
        })
    }
}
