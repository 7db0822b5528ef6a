//! Server configuration module

use clap::Parser;
use storefront_app::config::{DatabaseArgs, ReceiptArgs};

use crate::config::{
    observability::{LoggingConfig, ObservabilityConfig},
    server::ServerRuntimeConfig,
};

pub(crate) mod observability;
pub(crate) mod server;

pub(crate) use observability::LogFormat;

/// Storefront JSON API Server configuration
#[derive(Debug, Parser)]
#[command(name = "storefront-json", about = "Storefront JSON API Server", long_about = None)]
pub struct ServerConfig {
    /// Server network settings.
    #[command(flatten)]
    pub server: ServerRuntimeConfig,

    /// Logging output settings.
    #[command(flatten)]
    pub logging: LoggingConfig,

    /// Request observability settings.
    #[command(flatten)]
    pub observability: ObservabilityConfig,

    /// Application database settings.
    #[command(flatten)]
    pub database: DatabaseArgs,

    /// Receipt presentation settings.
    #[command(flatten)]
    pub receipts: ReceiptArgs,
}

impl ServerConfig {
    /// Load configuration from environment and CLI arguments
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be parsed
    pub fn load() -> Result<Self, clap::Error> {
        // Load .env file if present (ignore if missing)
        _ = dotenvy::dotenv();

        Self::try_parse()
    }

    /// Get the socket address for binding
    #[must_use]
    pub fn socket_addr(&self) -> String {
        self.server.socket_addr()
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    #[test]
    fn test_defaults() -> TestResult {
        let config =
            ServerConfig::try_parse_from(["storefront-json", "--database-url", "sqlite://shop.db"])?;

        assert_eq!(config.socket_addr(), "0.0.0.0:8080");
        assert_eq!(config.logging.log_level, "info");
        assert!(matches!(config.logging.log_format, LogFormat::Compact));
        assert_eq!(config.observability.slow_request_threshold_ms, 1_000);
        assert_eq!(config.database.storage_timeout_ms, 5_000);
        assert_eq!(config.receipts.currency, "USD");

        Ok(())
    }

    #[test]
    fn test_missing_database_url_is_an_error() {
        assert!(ServerConfig::try_parse_from(["storefront-json"]).is_err());
    }
}
