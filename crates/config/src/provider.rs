//! Application settings exposed as typed getters

use crate::accessor::SettingsAccessor;
use crate::schema::{
    default_fiscal_year_start, AccessorOptions, AppSettingsSnapshot, DB_CONNECTION_KEY,
    EMAIL_TEMPLATES_PATH_KEY, FISCAL_YEAR_START_KEY, NOTIFY_ON_UPLOAD_KEY,
    PAYMENT_GATEWAY_SERVICE_URL_KEY,
};
use crate::source::SettingsSource;
use chrono::NaiveDate;
use types::{DbConnectionInformation, SettingResult};

/// Notifications are sent unless explicitly disabled
const DEFAULT_NOTIFY_ON_UPLOAD: bool = true;

/// Typed view over the application's settings
#[derive(Debug, Clone)]
pub struct ConfigurationProvider<S> {
    accessor: SettingsAccessor<S>,
}

impl<S: SettingsSource> ConfigurationProvider<S> {
    pub fn new(source: S) -> Self {
        Self::with_options(source, AccessorOptions::default())
    }

    pub fn with_options(source: S, options: AccessorOptions) -> Self {
        Self {
            accessor: SettingsAccessor::with_options(source, options),
        }
    }

    /// Underlying accessor, for settings without a dedicated getter
    pub fn accessor(&self) -> &SettingsAccessor<S> {
        &self.accessor
    }

    /// Folder holding the e-mail templates, with a leading separator
    pub fn email_templates_path(&self) -> SettingResult<String> {
        self.accessor.normalized_path(EMAIL_TEMPLATES_PATH_KEY)
    }

    /// Payment gateway base URL, with a trailing slash
    pub fn payment_gateway_service_url(&self) -> SettingResult<String> {
        self.accessor.normalized_url(PAYMENT_GATEWAY_SERVICE_URL_KEY)
    }

    /// First day of the fiscal year; October 1st of year 1 when unset
    pub fn fiscal_year_start(&self) -> SettingResult<NaiveDate> {
        self.accessor.date_or(FISCAL_YEAR_START_KEY, default_fiscal_year_start())
    }

    pub fn notify_on_upload(&self) -> SettingResult<bool> {
        self.accessor.bool_or(NOTIFY_ON_UPLOAD_KEY, DEFAULT_NOTIFY_ON_UPLOAD)
    }

    pub fn db_connection_information(&self) -> SettingResult<DbConnectionInformation> {
        self.accessor.connection_info(DB_CONNECTION_KEY)
    }

    /// Resolve every setting, stopping at the first failure
    pub fn snapshot(&self) -> SettingResult<AppSettingsSnapshot> {
        Ok(AppSettingsSnapshot {
            email_templates_path: self.email_templates_path()?,
            payment_gateway_service_url: self.payment_gateway_service_url()?,
            fiscal_year_start: self.fiscal_year_start()?,
            notify_on_upload: self.notify_on_upload()?,
            db_connection: self.db_connection_information()?,
        })
    }
}
