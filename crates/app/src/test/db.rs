//! Database test utilities

use std::time::Duration;

use sqlx::{Sqlite, SqlitePool, Transaction};
use tempfile::TempDir;

use crate::database::{self, DatabaseSettings, Db};

/// Isolated `SQLite` database for one test.
///
/// Every test gets its own database file with migrations applied, inside a
/// temporary directory that is removed when the `TestDb` is dropped.
#[derive(Debug)]
pub struct TestDb {
    pool: SqlitePool,
    timeout: Duration,
    _dir: TempDir,
}

impl TestDb {
    pub async fn new() -> Self {
        let dir = tempfile::tempdir().expect("Failed to create temporary directory");
        let url = format!("sqlite://{}", dir.path().join("storefront.db").display());
        let settings = DatabaseSettings::new(url);

        let pool = database::connect(&settings)
            .await
            .expect("Failed to create pool for database");

        database::migrate(&pool)
            .await
            .expect("Failed to run migrations on database");

        Self {
            pool,
            timeout: settings.timeout,
            _dir: dir,
        }
    }

    /// Service-level database handle.
    pub fn db(&self) -> Db {
        Db::new(self.pool.clone(), self.timeout)
    }

    /// Begin a transaction that rolls back when dropped.
    pub async fn begin_test_transaction(&self) -> Transaction<'_, Sqlite> {
        self.pool
            .begin()
            .await
            .expect("Failed to start test transaction")
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_database_is_migrated() {
        let test_db = TestDb::new().await;

        let result: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM orders")
            .fetch_one(test_db.pool())
            .await
            .expect("Failed to execute test query");

        assert_eq!(result, 0);
    }

    #[tokio::test]
    async fn test_transaction_rolls_back_on_drop() {
        let test_db = TestDb::new().await;

        {
            let mut tx = test_db.begin_test_transaction().await;

            sqlx::query(
                "INSERT INTO customers (owner_id, first_name, last_name, email, created_at, updated_at) \
                 VALUES (1, 'Ada', 'Lovelace', 'ada@example.com', 'x', 'x')",
            )
            .execute(&mut *tx)
            .await
            .expect("Failed to insert in transaction");
        }

        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM customers")
            .fetch_one(test_db.pool())
            .await
            .expect("Failed to execute test query");

        assert_eq!(count, 0);
    }

    #[tokio::test]
    async fn test_databases_are_isolated() {
        let a = TestDb::new().await;
        let b = TestDb::new().await;

        sqlx::query(
            "INSERT INTO customers (owner_id, first_name, last_name, email, created_at, updated_at) \
             VALUES (1, 'Ada', 'Lovelace', 'ada@example.com', 'x', 'x')",
        )
        .execute(a.pool())
        .await
        .expect("Failed to insert");

        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM customers")
            .fetch_one(b.pool())
            .await
            .expect("Failed to execute test query");

        assert_eq!(count, 0);
    }
}
