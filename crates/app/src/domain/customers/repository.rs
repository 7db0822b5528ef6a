//! Customers Repository

use jiff::Timestamp;
use sqlx::{FromRow, Row, Sqlite, Transaction, query_as, sqlite::SqliteRow};

use crate::{
    database::try_get_timestamp,
    domain::customers::models::{Customer, CustomerProfile},
    ids::OwnerId,
};

const GET_CUSTOMER_SQL: &str = include_str!("sql/get_customer.sql");
const UPSERT_CUSTOMER_SQL: &str = include_str!("sql/upsert_customer.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct SqliteCustomersRepository;

impl SqliteCustomersRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn get_customer(
        &self,
        tx: &mut Transaction<'_, Sqlite>,
        owner: OwnerId,
    ) -> Result<Customer, sqlx::Error> {
        query_as::<Sqlite, Customer>(GET_CUSTOMER_SQL)
            .bind(owner.into_inner())
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn upsert_customer(
        &self,
        tx: &mut Transaction<'_, Sqlite>,
        profile: &CustomerProfile,
        now: Timestamp,
    ) -> Result<Customer, sqlx::Error> {
        query_as::<Sqlite, Customer>(UPSERT_CUSTOMER_SQL)
            .bind(profile.owner.into_inner())
            .bind(&profile.first_name)
            .bind(&profile.last_name)
            .bind(&profile.email)
            .bind(now.to_string())
            .fetch_one(&mut **tx)
            .await
    }
}

impl<'r> FromRow<'r, SqliteRow> for Customer {
    fn from_row(row: &'r SqliteRow) -> sqlx::Result<Self> {
        Ok(Self {
            owner: OwnerId::new(row.try_get("owner_id")?),
            first_name: row.try_get("first_name")?,
            last_name: row.try_get("last_name")?,
            email: row.try_get("email")?,
            created_at: try_get_timestamp(row, "created_at")?,
            updated_at: try_get_timestamp(row, "updated_at")?,
        })
    }
}
