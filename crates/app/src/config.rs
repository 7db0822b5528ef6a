//! Shared command-line and environment settings.

use std::time::Duration;

use clap::Args;

use crate::{
    database::DatabaseSettings,
    receipts::{ReceiptSettings, RenderError},
};

/// Storage connection arguments.
#[derive(Debug, Clone, Args)]
pub struct DatabaseArgs {
    /// `SQLite` connection string
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    pub database_url: String,

    /// Maximum number of pooled connections
    #[arg(long, env = "DATABASE_MAX_CONNECTIONS", default_value_t = 5)]
    pub database_max_connections: u32,

    /// Deadline for a single storage call, in milliseconds
    #[arg(long, env = "STORAGE_TIMEOUT_MS", default_value_t = 5_000)]
    pub storage_timeout_ms: u64,
}

impl DatabaseArgs {
    #[must_use]
    pub fn settings(&self) -> DatabaseSettings {
        DatabaseSettings {
            url: self.database_url.clone(),
            max_connections: self.database_max_connections,
            timeout: Duration::from_millis(self.storage_timeout_ms),
        }
    }
}

/// Receipt presentation arguments.
#[derive(Debug, Clone, Args)]
pub struct ReceiptArgs {
    /// Store name printed at the top of every receipt
    #[arg(long, env = "STORE_NAME", default_value = "Storefront")]
    pub store_name: String,

    /// ISO 4217 currency code amounts are stored in
    #[arg(long, env = "CURRENCY", default_value = "USD")]
    pub currency: String,

    /// Tax rate as a fraction (`0.0825`) or percentage (`8.25%`)
    #[arg(long, env = "TAX_RATE", default_value = "0")]
    pub tax_rate: String,

    /// Flat shipping fee in minor units
    #[arg(long, env = "SHIPPING_FEE", default_value_t = 0)]
    pub shipping_fee: u64,

    /// IANA time zone receipt dates are displayed in
    #[arg(long, env = "DISPLAY_TIME_ZONE", default_value = "UTC")]
    pub display_time_zone: String,
}

impl ReceiptArgs {
    /// # Errors
    ///
    /// Returns an error when the currency, tax rate or time zone is invalid.
    pub fn settings(&self) -> Result<ReceiptSettings, RenderError> {
        ReceiptSettings::parse(
            &self.store_name,
            &self.currency,
            &self.tax_rate,
            self.shipping_fee,
            &self.display_time_zone,
        )
    }
}
