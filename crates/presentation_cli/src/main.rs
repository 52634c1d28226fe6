//! Skycast CLI
//!
//! Command-line interface for administration and testing.

#![allow(clippy::print_stdout)]

use clap::Parser;
use infrastructure::{AppConfig, LogFormat, LoggingConfig, SecurityValidator, init_logging};
use presentation_cli::{
    ApiClient, ApiResponse, Cli, Commands, log_filter_from_verbosity, migrate_database,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    init_logging(&LoggingConfig {
        filter: log_filter_from_verbosity(cli.verbose).to_string(),
        format: LogFormat::Text,
    })?;

    match cli.command {
        Commands::Migrate { database } => {
            let mut config = AppConfig::load()?.database;
            if let Some(path) = database {
                config.path = path.to_string_lossy().into_owned();
            }

            let report = migrate_database(&config)?;
            if report.applied() {
                println!(
                    "Migrated {} from schema version {} to {}",
                    config.path, report.from_version, report.to_version
                );
            } else {
                println!(
                    "{} is up to date (schema version {})",
                    config.path, report.to_version
                );
            }
        },

        Commands::CheckConfig => {
            let config = AppConfig::load()?;
            let warnings = SecurityValidator::validate(&config);

            println!("Environment: {}", config.environment);
            if warnings.is_empty() {
                println!("No security findings");
            }
            for warning in &warnings {
                println!("{warning}");
            }

            let critical = warnings.iter().filter(|w| w.is_critical()).count();
            if critical > 0 {
                anyhow::bail!("{critical} critical security finding(s)");
            }
        },

        Commands::Current { city, url } => {
            let response = ApiClient::new(url).current(&city).await?;
            print_response(&response)?;
        },

        Commands::Forecast { city, date, url } => {
            let response = ApiClient::new(url).forecast(&city, &date).await?;
            print_response(&response)?;
        },

        Commands::SetForecast {
            city,
            date,
            min,
            max,
            url,
        } => {
            let response = ApiClient::new(url)
                .set_forecast(&city, &date, min, max)
                .await?;
            print_response(&response)?;
        },

        Commands::Health { url } => match ApiClient::new(url).ready().await {
            Ok(response) if response.is_success() => println!("Healthy"),
            Ok(response) => {
                println!("Unhealthy: HTTP {}", response.status);
                print_response(&response)?;
            },
            Err(e) => anyhow::bail!("Unhealthy: {e}"),
        },
    }

    Ok(())
}

/// Print the body and turn non-2xx statuses into an error exit
fn print_response(response: &ApiResponse) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(&response.body)?);

    if !response.is_success() {
        anyhow::bail!(
            "server returned HTTP {}: {}",
            response.status,
            response.error_message().unwrap_or("unknown error")
        );
    }
    Ok(())
}
