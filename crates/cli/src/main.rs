//! Config Provider CLI - prints typed application settings

use anyhow::{bail, Context, Result};
use clap::Parser;
use config::{AccessorOptions, ConfigLoader, ConfigurationProvider, InMemorySource};
use tracing::{debug, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod cli;
mod commands;

use cli::{Cli, Command, LogFormat};

fn main() -> Result<()> {
    // Load .env file if it exists
    let dotenv_result = dotenv::dotenv();

    let cli = Cli::parse();

    // Initialize logging
    init_logging(&cli.log_level, cli.log_format)?;

    match dotenv_result {
        Ok(path) => info!("Loaded environment variables from {}", path.display()),
        // Only warn if the error is not "file not found"
        Err(e) if !e.not_found() => warn!("Could not load .env file: {}", e),
        Err(_) => debug!("No .env file found"),
    }

    // Load configuration on demand; `init` runs without a settings file
    let load_provider = || -> Result<ConfigurationProvider<InMemorySource>> {
        let source = ConfigLoader::load(&cli.config, &cli.env_prefix)
            .context("Failed to load configuration")?;
        Ok(create_provider(source, &cli.section, &cli.provider_name))
    };

    match cli.command.clone().unwrap_or(Command::Show { json: false }) {
        Command::Init { path } => {
            ConfigLoader::create_example(&path)
                .with_context(|| format!("Failed to create {}", path.display()))?;
            println!("Wrote example configuration to {}", path.display());
        }
        Command::Show { json } => print!("{}", commands::show(&load_provider()?, json)?),
        Command::Get { key, kind } => println!("{}", commands::get(&load_provider()?, &key, kind)?),
        Command::Check { json } => {
            let (output, report) = commands::check(&load_provider()?, json)?;
            print!("{}", output);
            if json {
                println!();
            }
            if report.has_errors() {
                bail!("Configuration is invalid: {}", report.summary());
            }
        }
    }

    Ok(())
}

fn create_provider(
    source: InMemorySource,
    section: &str,
    provider_name: &str,
) -> ConfigurationProvider<InMemorySource> {
    let options = AccessorOptions {
        section: section.to_string(),
        provider_name: provider_name.to_string(),
        ..AccessorOptions::default()
    };
    ConfigurationProvider::with_options(source, options)
}

/// Initialize logging; events go to stderr so stdout only carries values
fn init_logging(log_level: &str, log_format: LogFormat) -> Result<()> {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level));

    let registry = tracing_subscriber::registry().with(env_filter);

    match log_format {
        LogFormat::Pretty => {
            registry
                .with(tracing_subscriber::fmt::layer().pretty().with_writer(std::io::stderr))
                .try_init()
                .context("Failed to initialize pretty logging")?;
        }
        LogFormat::Json => {
            registry
                .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
                .try_init()
                .context("Failed to initialize JSON logging")?;
        }
    }

    debug!(level = log_level, format = ?log_format, "Logging initialized");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_create_provider_applies_options() {
        let source = InMemorySource::new().with("Billing:MyDb", "Host=db");
        let provider = create_provider(source, "Billing", "Npgsql");
        let info = provider.db_connection_information().unwrap();
        assert_eq!(info.provider_name, "Npgsql");
        assert_eq!(info.connection_string, "Host=db");
    }

    #[test]
    fn test_file_to_output() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(
            file,
            "AppSettings:\n  EmailTemplatesPath: Templates\n  \
             PaymentGatewayServiceUrl: https://pay.example.com\n  MyDb: Server=."
        )
        .unwrap();

        let source = ConfigLoader::load(file.path(), "CONFIG_PROVIDER_CLI_TEST_").unwrap();
        let provider = create_provider(source, "AppSettings", "System.Data.SqlClient");
        let out = commands::show(&provider, false).unwrap();
        let expected = "\\Templates\nhttps://pay.example.com/\nMonday, October 1, 0001\ntrue\n";
        assert!(out.starts_with(expected), "unexpected output: {}", out);
    }
}
