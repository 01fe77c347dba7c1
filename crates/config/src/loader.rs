//! Configuration loader implementation

use crate::schema::{
    APP_SETTINGS_SECTION, DB_CONNECTION_KEY, EMAIL_TEMPLATES_PATH_KEY, FISCAL_YEAR_START_KEY,
    NOTIFY_ON_UPLOAD_KEY, PAYMENT_GATEWAY_SERVICE_URL_KEY,
};
use crate::source::InMemorySource;
use anyhow::{Context, Result};
use figment::{
    providers::{Env, Format, Yaml},
    value::{Dict, Value},
    Figment,
};
use std::collections::BTreeMap;
use std::path::Path;
use tracing::{debug, info};
use types::{utils::qualify_key, ConfigProviderError};

/// Environment variable prefix for setting overrides
pub const DEFAULT_ENV_PREFIX: &str = "CONFIG_PROVIDER_";

/// Separator for nested keys in environment variable names
pub const ENV_NESTING_SEPARATOR: &str = "__";

/// Builds settings sources from YAML files and environment variables
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load settings from a YAML file, then apply environment overrides.
    ///
    /// `CONFIG_PROVIDER_APPSETTINGS__NOTIFYONUPLOAD=false` overrides
    /// `AppSettings:NotifyOnUpload`. Environment values are kept exactly as
    /// set; file values follow [`ConfigLoader::load_from_str`].
    pub fn load<P: AsRef<Path>>(config_path: P, env_prefix: &str) -> Result<InMemorySource> {
        let config_path = config_path.as_ref();

        // Check if config file exists
        if !config_path.exists() {
            return Err(ConfigProviderError::FileNotFound {
                path: config_path.display().to_string(),
            }
            .into());
        }

        let source = InMemorySource::named(config_path.display().to_string());

        let file = Self::flatten(Figment::from(Yaml::file(config_path))).with_context(|| {
            format!("Failed to parse configuration file {}", config_path.display())
        })?;
        source.extend_from(&file);

        let env = Self::env_overrides(env_prefix);
        if !env.is_empty() {
            debug!(prefix = env_prefix, overrides = env.len(), "Applied environment overrides");
            source.extend_from(&env);
        }

        info!(path = %config_path.display(), settings = source.len(), "Configuration loaded");
        Ok(source)
    }

    /// Load settings from YAML text (for testing).
    ///
    /// Unquoted scalars are re-rendered from their YAML type, so `1.10` reads
    /// back as `1.1` and `0x1F` as `31`. Quote values whose exact text matters.
    pub fn load_from_str(yaml_content: &str) -> Result<InMemorySource> {
        Self::flatten(Figment::from(Yaml::string(yaml_content)))
            .context("Failed to parse configuration from string")
    }

    /// Flatten every value of a figment into `:`-joined keys
    fn flatten(figment: Figment) -> Result<InMemorySource> {
        let dict: Dict = figment
            .extract()
            .map_err(|e| ConfigProviderError::Source(e.to_string()))?;

        let source = InMemorySource::new();
        for (key, value) in &dict {
            flatten_value(&source, key, value);
        }
        Ok(source)
    }

    /// Raw prefixed environment variables, `__` nesting mapped to `:`
    fn env_overrides(env_prefix: &str) -> InMemorySource {
        let source = InMemorySource::named("environment");
        for (key, value) in Env::prefixed(env_prefix).split(ENV_NESTING_SEPARATOR).iter() {
            let key = key.as_str().split('.').fold(String::new(), |section, part| {
                qualify_key(&section, part)
            });
            source.set(key, value);
        }
        source
    }

    /// Create example configuration file
    pub fn create_example<P: AsRef<Path>>(path: P) -> Result<()> {
        let settings: BTreeMap<&str, &str> = [
            (EMAIL_TEMPLATES_PATH_KEY, "\\EmailTemplates"),
            (PAYMENT_GATEWAY_SERVICE_URL_KEY, "https://payments.example.com/"),
            (FISCAL_YEAR_START_KEY, "10/1/2026"),
            (NOTIFY_ON_UPLOAD_KEY, "true"),
            (DB_CONNECTION_KEY, "Server=localhost;Database=App;Integrated Security=true"),
        ]
        .into_iter()
        .collect();
        let document: BTreeMap<&str, BTreeMap<&str, &str>> =
            [(APP_SETTINGS_SECTION, settings)].into_iter().collect();

        let yaml_content = serde_yaml::to_string(&document)
            .context("Failed to serialize example configuration")?;

        std::fs::write(path.as_ref(), yaml_content)
            .context("Failed to write example configuration file")?;

        Ok(())
    }
}

fn flatten_value(source: &InMemorySource, key: &str, value: &Value) {
    match value {
        Value::Dict(_, dict) => {
            for (child, value) in dict {
                flatten_value(source, &qualify_key(key, child), value);
            }
        }
        Value::Array(_, items) => {
            for (index, value) in items.iter().enumerate() {
                flatten_value(source, &qualify_key(key, &index.to_string()), value);
            }
        }
        Value::Empty(_, _) => source.set_null(key),
        scalar => match scalar_to_string(scalar) {
            Some(text) => source.set(key, text),
            None => source.set_null(key),
        },
    }
}

fn scalar_to_string(value: &Value) -> Option<String> {
    if let Some(text) = value.as_str() {
        return Some(text.to_string());
    }
    if let Some(flag) = value.to_bool() {
        return Some(flag.to_string());
    }
    if let Some(number) = value.to_i128() {
        return Some(number.to_string());
    }
    if let Some(number) = value.to_u128() {
        return Some(number.to_string());
    }
    if let Some(number) = value.to_f64() {
        return Some(number.to_string());
    }
    value.to_char().map(|c| c.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::SettingsSource;
    use crate::ConfigurationProvider;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_load_from_string() {
        let yaml_content = r#"
AppSettings:
  EmailTemplatesPath: "SomeEmailTemplatesFolder"
  PaymentGatewayServiceUrl: "http://payments.matlus.com"
  NotifyOnUpload: false
  Retries: 3
  Ratio: 0.5
  MyDb: ~
"#;

        let source = ConfigLoader::load_from_str(yaml_content).unwrap();
        assert_eq!(
            source.get("AppSettings:EmailTemplatesPath").as_deref(),
            Some("SomeEmailTemplatesFolder")
        );
        assert_eq!(source.get("AppSettings:NotifyOnUpload").as_deref(), Some("false"));
        assert_eq!(source.get("AppSettings:Retries").as_deref(), Some("3"));
        assert_eq!(source.get("AppSettings:Ratio").as_deref(), Some("0.5"));
        assert_eq!(source.get("AppSettings:MyDb"), None);
        assert_eq!(source.get("AppSettings"), None);
    }

    #[test]
    fn test_nested_sections_and_arrays() {
        let yaml_content = r#"
AppSettings:
  Payments:
    Endpoints:
      - "https://a.example.com"
      - "https://b.example.com"
"#;
        let source = ConfigLoader::load_from_str(yaml_content).unwrap();
        assert_eq!(
            source.get("AppSettings:Payments:Endpoints:1").as_deref(),
            Some("https://b.example.com")
        );
    }

    #[test]
    fn test_loaded_source_feeds_provider() {
        let yaml_content = r#"
AppSettings:
  EmailTemplatesPath: "Templates"
  NotifyOnUpload: "NotABool"
"#;
        let source = ConfigLoader::load_from_str(yaml_content).unwrap();
        let provider = ConfigurationProvider::new(source);
        assert_eq!(provider.email_templates_path().unwrap(), "\\Templates");
        assert!(provider.notify_on_upload().is_err());
    }

    #[test]
    fn test_unquoted_scalars_are_rendered_from_their_type() {
        let yaml_content = r#"
AppSettings:
  Version: 1.10
  Mask: 0x1F
  QuotedVersion: "1.10"
"#;
        let source = ConfigLoader::load_from_str(yaml_content).unwrap();
        assert_eq!(source.get("AppSettings:Version").as_deref(), Some("1.1"));
        assert_eq!(source.get("AppSettings:Mask").as_deref(), Some("31"));
        assert_eq!(source.get("AppSettings:QuotedVersion").as_deref(), Some("1.10"));
    }

    #[test]
    fn test_invalid_yaml() {
        assert!(ConfigLoader::load_from_str("AppSettings: [unclosed").is_err());
    }

    #[test]
    fn test_missing_file() {
        let err = ConfigLoader::load("/definitely/not/here/appsettings.yaml", DEFAULT_ENV_PREFIX)
            .unwrap_err();
        assert!(err.to_string().contains("Configuration file not found"));
    }

    #[test]
    fn test_load_file_with_env_override() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "AppSettings:\n  NotifyOnUpload: \"true\"\n  MyDb: \"Server=file\"")
            .unwrap();

        let prefix = "CONFIG_PROVIDER_LOADER_TEST_";
        std::env::set_var(format!("{}APPSETTINGS__NOTIFYONUPLOAD", prefix), "false");
        let source = ConfigLoader::load(file.path(), prefix).unwrap();
        std::env::remove_var(format!("{}APPSETTINGS__NOTIFYONUPLOAD", prefix));

        assert_eq!(source.get("AppSettings:NotifyOnUpload").as_deref(), Some("false"));
        assert_eq!(source.get("AppSettings:MyDb").as_deref(), Some("Server=file"));
    }

    #[test]
    fn test_env_values_are_kept_verbatim() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "AppSettings:\n  MyDb: \"Server=file\"").unwrap();

        let prefix = "CONFIG_PROVIDER_RAW_ENV_TEST_";
        let vars = [
            ("APPSETTINGS__MYDB", "007"),
            ("APPSETTINGS__EMAILTEMPLATESPATH", "[a, b]"),
            ("APPSETTINGS__PAYMENTGATEWAYSERVICEURL", "\"quoted\""),
        ];
        for (name, value) in vars {
            std::env::set_var(format!("{}{}", prefix, name), value);
        }
        let source = ConfigLoader::load(file.path(), prefix).unwrap();
        for (name, _) in vars {
            std::env::remove_var(format!("{}{}", prefix, name));
        }

        assert_eq!(source.get("AppSettings:MyDb").as_deref(), Some("007"));
        assert_eq!(source.get("AppSettings:EmailTemplatesPath").as_deref(), Some("[a, b]"));
        assert_eq!(source.get("AppSettings:EmailTemplatesPath:0"), None);
        assert_eq!(
            source.get("AppSettings:PaymentGatewayServiceUrl").as_deref(),
            Some("\"quoted\"")
        );

        let provider = ConfigurationProvider::new(source);
        assert_eq!(provider.email_templates_path().unwrap(), "\\[a, b]");
        assert_eq!(provider.db_connection_information().unwrap().connection_string, "007");
    }

    #[test]
    fn test_create_example() {
        let temp_file = NamedTempFile::new().unwrap();
        let result = ConfigLoader::create_example(temp_file.path());
        assert!(result.is_ok());

        let content = std::fs::read_to_string(temp_file.path()).unwrap();
        assert!(content.contains("AppSettings:"));
        assert!(content.contains("MyDb:"));

        let provider = ConfigurationProvider::new(ConfigLoader::load_from_str(&content).unwrap());
        assert!(provider.snapshot().is_ok());
    }
}
