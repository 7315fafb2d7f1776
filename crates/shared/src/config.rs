//! Application configuration management.

use chrono_tz::Tz;
use rust_decimal::Decimal;
use serde::Deserialize;

use crate::types::Currency;

/// Application configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Server configuration.
    #[serde(default)]
    pub server: ServerConfig,
    /// Report generation settings.
    #[serde(default)]
    pub reporting: ReportingConfig,
}

/// Server configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Host to bind to.
    #[serde(default = "default_host")]
    pub host: String,
    /// Port to listen on.
    #[serde(default = "default_port")]
    pub port: u16,
    /// Largest accepted request body, in bytes. Report requests carry the
    /// full booking and expense history, so this is well above axum's 2 MB.
    #[serde(default = "default_body_limit")]
    pub body_limit_bytes: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            body_limit_bytes: default_body_limit(),
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_body_limit() -> usize {
    16 * 1024 * 1024
}

/// Income statement settings.
#[derive(Debug, Clone, Deserialize)]
pub struct ReportingConfig {
    /// Currency the secondary amount leg is recorded in.
    #[serde(default)]
    pub currency: Currency,
    /// Largest gap between categorized and total expenses that is left
    /// unreconciled, in whole currency units.
    #[serde(default = "default_reconciliation_tolerance")]
    pub reconciliation_tolerance: Decimal,
    /// Timezone whose calendar date is "today" for year-to-date figures.
    #[serde(default = "default_timezone")]
    pub timezone: Tz,
    /// Vendor/description keyword identifying internet bills.
    #[serde(default = "default_internet_keyword")]
    pub internet_keyword: String,
    /// Vendor/description keyword identifying electricity bills.
    #[serde(default = "default_electricity_keyword")]
    pub electricity_keyword: String,
    /// Vendor/description keyword identifying water bills.
    #[serde(default = "default_water_keyword")]
    pub water_keyword: String,
}

impl Default for ReportingConfig {
    fn default() -> Self {
        Self {
            currency: Currency::default(),
            reconciliation_tolerance: default_reconciliation_tolerance(),
            timezone: default_timezone(),
            internet_keyword: default_internet_keyword(),
            electricity_keyword: default_electricity_keyword(),
            water_keyword: default_water_keyword(),
        }
    }
}

fn default_reconciliation_tolerance() -> Decimal {
    Decimal::ONE
}

fn default_timezone() -> Tz {
    chrono_tz::Africa::Douala
}

fn default_internet_keyword() -> String {
    "Internet".to_string()
}

fn default_electricity_keyword() -> String {
    "ENEO".to_string()
}

fn default_water_keyword() -> String {
    "camwater".to_string()
}

impl AppConfig {
    /// Loads configuration from environment and config files.
    ///
    /// Sources, later ones winning: `config/default`, `config/{RUN_MODE}`,
    /// then `LODGEBOOK__SECTION__KEY` environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be loaded.
    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = std::env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{run_mode}")).required(false))
            .add_source(config::Environment::with_prefix("LODGEBOOK").separator("__"))
            .build()?;

        config.try_deserialize()
    }

    /// Address the HTTP server binds to.
    #[must_use]
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}
