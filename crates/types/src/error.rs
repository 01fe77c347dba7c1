//! Error types for the configuration provider

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Main error type for the configuration provider
#[derive(Error, Debug)]
pub enum ConfigProviderError {
    /// A typed setting failed validation
    #[error(transparent)]
    Setting(#[from] ConfigurationSettingError),

    /// Settings file not found
    #[error("Configuration file not found: {path}")]
    FileNotFound { path: String },

    /// The settings source could not be read or parsed
    #[error("Configuration source error: {0}")]
    Source(String),

    /// Unknown setting kind or key requested by a caller
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Internal errors
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Result type alias for configuration provider operations
pub type Result<T> = std::result::Result<T, ConfigProviderError>;

/// Result type alias for a single typed setting lookup
pub type SettingResult<T> = std::result::Result<T, ConfigurationSettingError>;

/// Failure raised when a setting cannot be turned into its typed value.
///
/// The message phrases ("is Missing", "is Empty", "is White Spaces",
/// "not a valid DateTime", "not a valid Boolean") are matched by callers and
/// must stay stable.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigurationSettingError {
    /// Key absent from the source
    #[error(
        "Configuration setting '{key}' is Missing. This setting is Required but its value \
         is Missing from the configuration source"
    )]
    Missing { key: String },

    /// Value present but zero-length
    #[error(
        "Configuration setting '{key}' is Empty. This setting is Required and must have a value"
    )]
    Empty { key: String },

    /// Value present but only whitespace
    #[error(
        "Configuration setting '{key}' is White Spaces. This setting is Required and must \
         have a non-blank value"
    )]
    WhiteSpace { key: String },

    /// Non-blank value that does not parse as a date
    #[error(
        "Configuration setting '{key}' has value '{value}' which is not a valid DateTime. \
         Expected a date matching one of: {expected}"
    )]
    InvalidDate {
        key: String,
        value: String,
        expected: String,
    },

    /// Non-blank value that does not parse as a boolean
    #[error(
        "Configuration setting '{key}' has value '{value}' which is not a valid Boolean. \
         The value must be parseable to a Boolean (true or false)"
    )]
    InvalidBoolean { key: String, value: String },
}

/// Coarse classification of a [`ConfigurationSettingError`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SettingErrorKind {
    Missing,
    Empty,
    WhiteSpace,
    InvalidFormat,
}

impl ConfigurationSettingError {
    /// Fully-qualified key of the failing setting
    pub fn key(&self) -> &str {
        match self {
            Self::Missing { key }
            | Self::Empty { key }
            | Self::WhiteSpace { key }
            | Self::InvalidDate { key, .. }
            | Self::InvalidBoolean { key, .. } => key,
        }
    }

    pub fn kind(&self) -> SettingErrorKind {
        match self {
            Self::Missing { .. } => SettingErrorKind::Missing,
            Self::Empty { .. } => SettingErrorKind::Empty,
            Self::WhiteSpace { .. } => SettingErrorKind::WhiteSpace,
            Self::InvalidDate { .. } | Self::InvalidBoolean { .. } => {
                SettingErrorKind::InvalidFormat
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_contains_all(message: &str, parts: &[&str]) {
        for part in parts {
            assert!(
                message.to_lowercase().contains(&part.to_lowercase()),
                "expected '{}' in message: {}",
                part,
                message
            );
        }
    }

    #[test]
    fn test_blank_messages_name_key_and_condition() {
        let key = "AppSettings:EmailTemplatesPath".to_string();

        let missing = ConfigurationSettingError::Missing { key: key.clone() }.to_string();
        assert_contains_all(
            &missing,
            &["EmailTemplatesPath", "is Missing", "value is Missing", "Required"],
        );

        let empty = ConfigurationSettingError::Empty { key: key.clone() }.to_string();
        assert_contains_all(&empty, &["EmailTemplatesPath", "is Empty", "Required"]);

        let white = ConfigurationSettingError::WhiteSpace { key }.to_string();
        assert_contains_all(&white, &["EmailTemplatesPath", "is White Spaces", "Required"]);
    }

    #[test]
    fn test_format_messages() {
        let date = ConfigurationSettingError::InvalidDate {
            key: "AppSettings:FiscalYearStart".to_string(),
            value: "13/24/1900".to_string(),
            expected: "%m/%d/%Y".to_string(),
        };
        assert_contains_all(
            &date.to_string(),
            &["FiscalYearStart", "13/24/1900", "not a valid DateTime"],
        );

        let boolean = ConfigurationSettingError::InvalidBoolean {
            key: "AppSettings:NotifyOnUpload".to_string(),
            value: "NotABool".to_string(),
        };
        assert_contains_all(
            &boolean.to_string(),
            &["not a valid Boolean", "parseable to a Boolean"],
        );
    }

    #[test]
    fn test_kind_and_key() {
        let err = ConfigurationSettingError::InvalidBoolean {
            key: "AppSettings:NotifyOnUpload".to_string(),
            value: "x".to_string(),
        };
        assert_eq!(err.kind(), SettingErrorKind::InvalidFormat);
        assert_eq!(err.key(), "AppSettings:NotifyOnUpload");

        let err = ConfigurationSettingError::WhiteSpace { key: "k".to_string() };
        assert_eq!(err.kind(), SettingErrorKind::WhiteSpace);
    }

    #[test]
    fn test_setting_error_converts_transparently() {
        let setting = ConfigurationSettingError::Missing { key: "AppSettings:MyDb".to_string() };
        let expected = setting.to_string();
        let err: ConfigProviderError = setting.into();
        assert_eq!(err.to_string(), expected);
    }
}
