//! Rendering of command output

use crate::cli::SettingKind;
use anyhow::{Context, Result};
use config::{
    default_fiscal_year_start, ConfigValidator, ConfigurationProvider, SettingsSource,
    ValidationReport,
};
use std::fmt::Write;
use types::{
    utils::{format_long_date, sanitize_for_logging},
    DbConnectionInformation,
};

/// Text or JSON listing of every setting
pub fn show<S: SettingsSource>(provider: &ConfigurationProvider<S>, json: bool) -> Result<String> {
    let snapshot = provider.snapshot()?;
    if json {
        return serde_json::to_string_pretty(&snapshot).context("Failed to serialize settings");
    }

    let mut out = String::new();
    writeln!(out, "{}", snapshot.email_templates_path)?;
    writeln!(out, "{}", snapshot.payment_gateway_service_url)?;
    writeln!(out, "{}", format_long_date(snapshot.fiscal_year_start))?;
    writeln!(out, "{}", snapshot.notify_on_upload)?;
    writeln!(out, "{}", describe_connection(&snapshot.db_connection))?;
    Ok(out)
}

/// Single setting interpreted as `kind`
pub fn get<S: SettingsSource>(
    provider: &ConfigurationProvider<S>,
    key: &str,
    kind: SettingKind,
) -> Result<String> {
    let accessor = provider.accessor();
    let value = match kind {
        SettingKind::String => accessor.required_string(key)?,
        SettingKind::Path => accessor.normalized_path(key)?,
        SettingKind::Url => accessor.normalized_url(key)?,
        SettingKind::Date => format_long_date(accessor.date_or(key, default_fiscal_year_start())?),
        SettingKind::Bool => accessor.bool_or(key, true)?.to_string(),
        SettingKind::Connection => describe_connection(&accessor.connection_info(key)?),
    };
    Ok(value)
}

/// Validation report as text or JSON
pub fn check<S: SettingsSource>(
    provider: &ConfigurationProvider<S>,
    json: bool,
) -> Result<(String, ValidationReport)> {
    let report = ConfigValidator::validate(provider);
    if json {
        let out = serde_json::to_string_pretty(&report)
            .context("Failed to serialize validation report")?;
        return Ok((out, report));
    }

    let mut out = String::new();
    for issue in &report.errors {
        writeln!(out, "error   {}: {}", issue.field, issue.message)?;
    }
    for issue in &report.warnings {
        writeln!(out, "warning {}: {}", issue.field, issue.message)?;
    }
    writeln!(out, "{}", report.summary())?;
    Ok((out, report))
}

fn describe_connection(info: &DbConnectionInformation) -> String {
    format!(
        "{} ({}): {}",
        info.name,
        info.provider_name,
        sanitize_for_logging(&info.connection_string)
    )
}
