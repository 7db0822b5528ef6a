//! Database connection management

use std::{future::Future, str::FromStr, time::Duration};

use jiff::Timestamp;
use sqlx::{
    Row, Sqlite, SqlitePool, Transaction,
    migrate::MigrateError,
    sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteRow},
};
use tokio::time::{error::Elapsed, timeout};

/// Upper bound applied to a storage call when none is configured.
pub const DEFAULT_STORAGE_TIMEOUT: Duration = Duration::from_secs(5);

/// Connection settings for the storefront database.
#[derive(Debug, Clone)]
pub struct DatabaseSettings {
    /// `SQLite` connection string, e.g. `sqlite://storefront.db`.
    pub url: String,

    /// Maximum number of pooled connections.
    pub max_connections: u32,

    /// Deadline for a single service-level storage call.
    pub timeout: Duration,
}

impl DatabaseSettings {
    /// Settings for `url` with default pool size and timeout.
    #[must_use]
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            max_connections: 5,
            timeout: DEFAULT_STORAGE_TIMEOUT,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Db {
    pool: SqlitePool,
    timeout: Duration,
}

impl Db {
    #[must_use]
    pub fn new(pool: SqlitePool, timeout: Duration) -> Self {
        Self { pool, timeout }
    }

    #[must_use]
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Deadline applied by [`Db::within`].
    #[must_use]
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Begin a transaction.
    ///
    /// # Errors
    ///
    /// Returns an error when no connection could be acquired.
    pub async fn begin(&self) -> Result<Transaction<'static, Sqlite>, sqlx::Error> {
        self.pool.begin().await
    }

    /// Run a storage operation, failing with [`Elapsed`] once the configured deadline passes.
    ///
    /// # Errors
    ///
    /// Returns the operation's own error, or the converted [`Elapsed`] on timeout.
    pub async fn within<T, E, F>(&self, operation: F) -> Result<T, E>
    where
        F: Future<Output = Result<T, E>>,
        E: From<Elapsed>,
    {
        timeout(self.timeout, operation).await?
    }
}

/// Connect to `SQLite`, creating the database file when missing.
///
/// # Errors
///
/// Returns an error if the URL is malformed or the connection cannot be established.
pub async fn connect(settings: &DatabaseSettings) -> Result<SqlitePool, sqlx::Error> {
    let options = SqliteConnectOptions::from_str(&settings.url)?
        .create_if_missing(true)
        .journal_mode(SqliteJournalMode::Wal)
        .busy_timeout(settings.timeout)
        .foreign_keys(true);

    SqlitePoolOptions::new()
        .max_connections(settings.max_connections)
        .acquire_timeout(settings.timeout)
        .connect_with(options)
        .await
}

/// Apply the embedded schema migrations.
///
/// # Errors
///
/// Returns an error if a migration fails to apply.
pub async fn migrate(pool: &SqlitePool) -> Result<(), MigrateError> {
    sqlx::migrate!().run(pool).await
}

pub(crate) fn try_get_amount(row: &SqliteRow, col: &str) -> Result<u64, sqlx::Error> {
    let amount_i64: i64 = row.try_get(col)?;

    u64::try_from(amount_i64).map_err(|e| sqlx::Error::ColumnDecode {
        index: col.to_string(),
        source: Box::new(e),
    })
}

pub(crate) fn try_get_quantity(row: &SqliteRow, col: &str) -> Result<u32, sqlx::Error> {
    let quantity_i64: i64 = row.try_get(col)?;

    u32::try_from(quantity_i64).map_err(|e| sqlx::Error::ColumnDecode {
        index: col.to_string(),
        source: Box::new(e),
    })
}

pub(crate) fn try_get_timestamp(row: &SqliteRow, col: &str) -> Result<Timestamp, sqlx::Error> {
    let raw: String = row.try_get(col)?;

    raw.parse::<Timestamp>()
        .map_err(|e| sqlx::Error::ColumnDecode {
            index: col.to_string(),
            source: Box::new(e),
        })
}

pub(crate) fn try_get_optional_timestamp(
    row: &SqliteRow,
    col: &str,
) -> Result<Option<Timestamp>, sqlx::Error> {
    let raw: Option<String> = row.try_get(col)?;

    raw.map(|value| {
        value.parse::<Timestamp>().map_err(|e| sqlx::Error::ColumnDecode {
            index: col.to_string(),
            source: Box::new(e),
        })
    })
    .transpose()
}

pub(crate) fn amount_param(amount: u64) -> Result<i64, sqlx::Error> {
    i64::try_from(amount).map_err(|e| sqlx::Error::Encode(Box::new(e)))
}
