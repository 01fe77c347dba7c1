//! Configuration schema definitions

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use types::DbConnectionInformation;

/// Section every application setting lives under
pub const APP_SETTINGS_SECTION: &str = "AppSettings";

/// Folder holding the e-mail templates
pub const EMAIL_TEMPLATES_PATH_KEY: &str = "EmailTemplatesPath";
/// Base URL of the payment gateway service
pub const PAYMENT_GATEWAY_SERVICE_URL_KEY: &str = "PaymentGatewayServiceUrl";
/// First day of the fiscal year
pub const FISCAL_YEAR_START_KEY: &str = "FiscalYearStart";
/// Whether uploads trigger a notification
pub const NOTIFY_ON_UPLOAD_KEY: &str = "NotifyOnUpload";
/// Name of the application database connection
pub const DB_CONNECTION_KEY: &str = "MyDb";

/// Every setting the configuration provider knows about
pub const KNOWN_SETTING_KEYS: [&str; 5] = [
    EMAIL_TEMPLATES_PATH_KEY,
    PAYMENT_GATEWAY_SERVICE_URL_KEY,
    FISCAL_YEAR_START_KEY,
    NOTIFY_ON_UPLOAD_KEY,
    DB_CONNECTION_KEY,
];

/// Behaviour knobs of the typed settings accessor
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessorOptions {
    /// Section prefix prepended to every setting key
    #[serde(default = "default_section")]
    pub section: String,
    /// Provider identifier reported on connection descriptors
    #[serde(default = "default_provider_name")]
    pub provider_name: String,
    /// Short-date formats tried in order (chrono syntax)
    #[serde(default = "default_date_formats")]
    pub date_formats: Vec<String>,
}

/// Typed values of every known setting, resolved at one point in time
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppSettingsSnapshot {
    pub email_templates_path: String,
    pub payment_gateway_service_url: String,
    pub fiscal_year_start: NaiveDate,
    pub notify_on_upload: bool,
    pub db_connection: DbConnectionInformation,
}

// Default value functions
fn default_section() -> String {
    APP_SETTINGS_SECTION.to_string()
}

fn default_provider_name() -> String {
    types::connection::DEFAULT_PROVIDER_NAME.to_string()
}

fn default_date_formats() -> Vec<String> {
    vec![
        "%m/%d/%Y".to_string(), // en-US short date
        "%Y-%m-%d".to_string(),
    ]
}

/// Fiscal year start used when none is configured: October 1st of year 1
pub fn default_fiscal_year_start() -> NaiveDate {
    NaiveDate::from_ymd_opt(1, 10, 1).unwrap_or(NaiveDate::MIN)
}

impl Default for AccessorOptions {
    fn default() -> Self {
        Self {
            section: default_section(),
            provider_name: default_provider_name(),
            date_formats: default_date_formats(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Datelike;

    #[test]
    fn test_default_options() {
        let options = AccessorOptions::default();
        assert_eq!(options.section, "AppSettings");
        assert_eq!(options.provider_name, "System.Data.SqlClient");
        assert_eq!(options.date_formats[0], "%m/%d/%Y");
    }

    #[test]
    fn test_partial_options_fill_defaults() {
        let options: AccessorOptions = serde_yaml::from_str("provider_name: Npgsql\n").unwrap();
        assert_eq!(options.provider_name, "Npgsql");
        assert_eq!(options.section, "AppSettings");
        assert_eq!(options.date_formats.len(), 2);
    }

    #[test]
    fn test_default_fiscal_year_start() {
        let date = default_fiscal_year_start();
        assert_eq!((date.year(), date.month(), date.day()), (1, 10, 1));
    }
}
