//! Command-line arguments

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "config-provider", version, about = "Print typed application settings")]
pub struct Cli {
    /// Settings file (YAML)
    #[arg(long, env = "CONFIG_PATH", default_value = "appsettings.yaml", global = true)]
    pub config: PathBuf,

    /// Prefix of environment variables overriding file settings
    #[arg(long, default_value = config::loader::DEFAULT_ENV_PREFIX, global = true)]
    pub env_prefix: String,

    /// Section every setting key is looked up under
    #[arg(long, default_value = config::APP_SETTINGS_SECTION, global = true)]
    pub section: String,

    /// Provider identifier reported for database connections
    #[arg(long, default_value = types::connection::DEFAULT_PROVIDER_NAME, global = true)]
    pub provider_name: String,

    /// Log level used when RUST_LOG is not set
    #[arg(long, env = "LOG_LEVEL", default_value = "warn", global = true)]
    pub log_level: String,

    #[arg(long, env = "LOG_FORMAT", value_enum, default_value_t = LogFormat::Pretty, global = true)]
    pub log_format: LogFormat,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    Pretty,
    Json,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Print every application setting
    Show {
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
    /// Print a single setting
    Get {
        /// Setting key, without the section prefix
        key: String,
        /// How to interpret the value
        #[arg(long = "as", value_enum, default_value_t = SettingKind::String)]
        kind: SettingKind,
    },
    /// Validate every setting and print the report
    Check {
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
    /// Write an example settings file
    Init {
        /// Destination path
        path: PathBuf,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SettingKind {
    /// Required, non-blank string
    String,
    /// Folder path with a leading separator
    Path,
    /// Base URL with a trailing slash
    Url,
    /// Short date, October 1st of year 1 when unset
    Date,
    /// Boolean, true when unset
    Bool,
    /// Database connection descriptor
    Connection,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cli = Cli::try_parse_from(["config-provider"]).unwrap();
        assert_eq!(cli.section, "AppSettings");
        assert_eq!(cli.provider_name, "System.Data.SqlClient");
        assert_eq!(cli.env_prefix, "CONFIG_PROVIDER_");
        assert!(cli.command.is_none());
    }

    #[test]
    fn test_get_with_kind() {
        let cli = Cli::try_parse_from(["config-provider", "get", "FiscalYearStart", "--as", "date"])
            .unwrap();
        match cli.command {
            Some(Command::Get { key, kind }) => {
                assert_eq!(key, "FiscalYearStart");
                assert_eq!(kind, SettingKind::Date);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_global_options_after_subcommand() {
        let args = ["config-provider", "show", "--json", "--config", "other.yaml"];
        let cli = Cli::try_parse_from(args).unwrap();
        assert_eq!(cli.config, PathBuf::from("other.yaml"));
        assert!(matches!(cli.command, Some(Command::Show { json: true })));
    }
}
