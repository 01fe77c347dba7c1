//! Configuration validation utilities

use crate::provider::ConfigurationProvider;
use crate::schema::{FISCAL_YEAR_START_KEY, NOTIFY_ON_UPLOAD_KEY, PAYMENT_GATEWAY_SERVICE_URL_KEY};
use crate::source::SettingsSource;
use serde::Serialize;
use types::{utils::is_http_url, ConfigurationSettingError, SettingErrorKind, SettingResult};

/// Configuration validator
pub struct ConfigValidator;

impl ConfigValidator {
    /// Evaluate every known setting and collect all problems
    pub fn validate<S: SettingsSource>(provider: &ConfigurationProvider<S>) -> ValidationReport {
        let mut report = ValidationReport::new();

        Self::check(&mut report, provider.email_templates_path());
        Self::validate_payment_gateway(provider, &mut report);
        Self::validate_fiscal_year(provider, &mut report);
        Self::validate_notify_on_upload(provider, &mut report);
        Self::check(&mut report, provider.db_connection_information());

        report
    }

    fn check<T>(report: &mut ValidationReport, result: SettingResult<T>) -> Option<T> {
        match result {
            Ok(value) => Some(value),
            Err(err) => {
                report.add_setting_error(&err);
                None
            }
        }
    }

    fn validate_payment_gateway<S: SettingsSource>(
        provider: &ConfigurationProvider<S>,
        report: &mut ValidationReport,
    ) {
        let Some(url) = Self::check(report, provider.payment_gateway_service_url()) else {
            return;
        };
        let field = provider.accessor().qualified_key(PAYMENT_GATEWAY_SERVICE_URL_KEY);

        if !is_http_url(&url) {
            report.add_warning(&field, "Payment gateway URL should start with http:// or https://");
        } else if url.to_ascii_lowercase().starts_with("http://") {
            report.add_warning(&field, "Payment gateway URL should use HTTPS");
        }
    }

    fn validate_fiscal_year<S: SettingsSource>(
        provider: &ConfigurationProvider<S>,
        report: &mut ValidationReport,
    ) {
        if Self::check(report, provider.fiscal_year_start()).is_none() {
            return;
        }
        if !provider.accessor().outcome(FISCAL_YEAR_START_KEY).is_present() {
            let field = provider.accessor().qualified_key(FISCAL_YEAR_START_KEY);
            report.add_warning(
                &field,
                "Fiscal year start not set, using the default of October 1st",
            );
        }
    }

    fn validate_notify_on_upload<S: SettingsSource>(
        provider: &ConfigurationProvider<S>,
        report: &mut ValidationReport,
    ) {
        if Self::check(report, provider.notify_on_upload()).is_none() {
            return;
        }
        if !provider.accessor().outcome(NOTIFY_ON_UPLOAD_KEY).is_present() {
            let field = provider.accessor().qualified_key(NOTIFY_ON_UPLOAD_KEY);
            report.add_warning(
                &field,
                "Upload notifications not configured, notifications are enabled",
            );
        }
    }
}

/// Validation report containing errors and warnings
#[derive(Debug, Clone, Serialize)]
pub struct ValidationReport {
    pub errors: Vec<ValidationIssue>,
    pub warnings: Vec<ValidationIssue>,
}

/// A validation issue (error or warning)
#[derive(Debug, Clone, Serialize)]
pub struct ValidationIssue {
    pub field: String,
    pub message: String,
    /// Set for issues raised by a failing setting
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kind: Option<SettingErrorKind>,
}

impl ValidationReport {
    pub fn new() -> Self {
        Self {
            errors: Vec::new(),
            warnings: Vec::new(),
        }
    }

    pub fn add_setting_error(&mut self, error: &ConfigurationSettingError) {
        self.errors.push(ValidationIssue {
            field: error.key().to_string(),
            message: error.to_string(),
            kind: Some(error.kind()),
        });
    }

    pub fn add_warning(&mut self, field: &str, message: &str) {
        self.warnings.push(ValidationIssue {
            field: field.to_string(),
            message: message.to_string(),
            kind: None,
        });
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }

    pub fn is_valid(&self) -> bool {
        !self.has_errors()
    }

    pub fn summary(&self) -> String {
        format!("Validation: {} errors, {} warnings", self.errors.len(), self.warnings.len())
    }
}

impl Default for ValidationReport {
    fn default() -> Self {
        Self::new()
    }
}
