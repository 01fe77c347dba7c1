//! Typed settings accessor
//!
//! Every getter fetches the raw value afresh, classifies it and then either
//! fails, substitutes a default, or normalizes/parses it. Required getters
//! fail on absent or blank values; default-bearing getters fall back instead.

use crate::schema::AccessorOptions;
use crate::source::SettingsSource;
use chrono::NaiveDate;
use tracing::{debug, trace};
use types::{BlankKind, ConfigurationSettingError, SettingResult, ValidationOutcome};

/// Leading character of a normalized folder path
pub const PATH_SEPARATOR: char = '\\';

/// Trailing character of a normalized base URL
pub const URL_SEPARATOR: char = '/';

/// Turns raw settings into validated, typed values
#[derive(Debug, Clone)]
pub struct SettingsAccessor<S> {
    source: S,
    options: AccessorOptions,
}

impl<S: SettingsSource> SettingsAccessor<S> {
    /// Create an accessor with default options
    pub fn new(source: S) -> Self {
        Self::with_options(source, AccessorOptions::default())
    }

    pub fn with_options(source: S, options: AccessorOptions) -> Self {
        Self { source, options }
    }

    pub fn options(&self) -> &AccessorOptions {
        &self.options
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// Key as it is looked up in the source
    pub fn qualified_key(&self, key: &str) -> String {
        types::utils::qualify_key(&self.options.section, key)
    }

    /// Fetch and classify the raw value of `key`
    pub fn outcome(&self, key: &str) -> ValidationOutcome {
        ValidationOutcome::classify(self.source.get(&self.qualified_key(key)))
    }

    /// Value that must be present and non-blank, returned untrimmed
    pub fn required_string(&self, key: &str) -> SettingResult<String> {
        let qualified = self.qualified_key(key);
        match ValidationOutcome::classify(self.source.get(&qualified)) {
            ValidationOutcome::Present(value) => Ok(value),
            ValidationOutcome::Absent => Err(ConfigurationSettingError::Missing { key: qualified }),
            ValidationOutcome::Blank(BlankKind::Empty) => {
                Err(ConfigurationSettingError::Empty { key: qualified })
            }
            ValidationOutcome::Blank(BlankKind::WhiteSpaceOnly) => {
                Err(ConfigurationSettingError::WhiteSpace { key: qualified })
            }
        }
    }

    /// Required folder path, always starting with [`PATH_SEPARATOR`]
    pub fn normalized_path(&self, key: &str) -> SettingResult<String> {
        let value = self.required_string(key)?;
        if value.starts_with(PATH_SEPARATOR) {
            return Ok(value);
        }
        trace!(key = key, "Prepending path separator");
        Ok(format!("{}{}", PATH_SEPARATOR, value))
    }

    /// Required base URL, always ending with [`URL_SEPARATOR`]
    pub fn normalized_url(&self, key: &str) -> SettingResult<String> {
        let mut value = self.required_string(key)?;
        if !value.ends_with(URL_SEPARATOR) {
            trace!(key = key, "Appending URL separator");
            value.push(URL_SEPARATOR);
        }
        Ok(value)
    }

    /// Calendar date, or `default` when the setting is absent or blank
    pub fn date_or(&self, key: &str, default: NaiveDate) -> SettingResult<NaiveDate> {
        let qualified = self.qualified_key(key);
        let raw = match ValidationOutcome::classify(self.source.get(&qualified)) {
            ValidationOutcome::Present(raw) => raw,
            outcome => {
                debug!(key = %qualified, ?outcome, default = %default, "Using default date");
                return Ok(default);
            }
        };

        let trimmed = raw.trim();
        self.options
            .date_formats
            .iter()
            .find_map(|format| NaiveDate::parse_from_str(trimmed, format).ok())
            .ok_or_else(|| ConfigurationSettingError::InvalidDate {
                key: qualified,
                value: raw.clone(),
                expected: self.options.date_formats.join(", "),
            })
    }

    /// Boolean (`true`/`false`, any case), or `default` when the setting is
    /// absent or blank
    pub fn bool_or(&self, key: &str, default: bool) -> SettingResult<bool> {
        let qualified = self.qualified_key(key);
        let raw = match ValidationOutcome::classify(self.source.get(&qualified)) {
            ValidationOutcome::Present(raw) => raw,
            outcome => {
                debug!(key = %qualified, ?outcome, default = default, "Using default boolean");
                return Ok(default);
            }
        };

        parse_bool(&raw).ok_or(ConfigurationSettingError::InvalidBoolean {
            key: qualified,
            value: raw,
        })
    }
}

fn parse_bool(raw: &str) -> Option<bool> {
    let trimmed = raw.trim();
    if trimmed.eq_ignore_ascii_case("true") {
        Some(true)
    } else if trimmed.eq_ignore_ascii_case("false") {
        Some(false)
    } else {
        None
    }
}
