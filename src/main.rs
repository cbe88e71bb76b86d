//! RavenDB Tenant Backup/Restore Tool
//!
//! Drives the Raven.Smuggler executable once per tenant database and manages
//! restore targets through the server's admin API.

// raventool/src/main.rs
mod admin;
mod config;
mod errors;
mod export;
mod import;
mod smuggler;
#[cfg(test)]
mod test_support;

use anyhow::{Context, Result};
use config::AppConfig;
use std::env;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

/// Main entry point for the backup/restore tool
#[tokio::main]
async fn main() -> ExitCode {
    dotenv::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    match run_app().await {
        Ok(_) => {
            println!("✅ Operation completed successfully.");
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("❌ Error: {:?}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run_app() -> Result<()> {
    // Expects config.json in the same directory as the executable or the
    // project root if running with `cargo run`.
    let config_path = PathBuf::from("config.json");
    let app_config = AppConfig::load_from_json(&config_path).context(format!(
        "Failed to load application configuration from {}",
        config_path.display()
    ))?;

    let args: Vec<String> = env::args().collect();
    let choice = if args.len() > 1 {
        args[1].trim().to_string()
    } else {
        prompt_choice()?
    };
    let database_name = args.get(2).map(|name| name.trim().to_string());

    match choice.as_str() {
        "1" | "export" => {
            println!("🚀 Starting Export Process...");
            match database_name {
                Some(name) => export::run_export_one_flow(&app_config, &name)
                    .await
                    .context("Export process failed")?,
                None => export::run_export_flow(&app_config)
                    .await
                    .context("Export process failed")?,
            }
        }
        "2" | "import" => {
            println!("🔄 Starting Import Process...");
            match database_name {
                Some(name) => import::run_import_one_flow(&app_config, &name)
                    .await
                    .context("Import process failed")?,
                None => import::run_import_flow(&app_config)
                    .await
                    .context("Import process failed")?,
            }
        }
        _ => {
            println!("❌ Invalid choice. Please enter '1' (export) or '2' (import).");
            anyhow::bail!("Invalid operation choice");
        }
    }
    Ok(())
}

/// Prompts user to select export or import operation
///
/// Returns the user's choice as String
fn prompt_choice() -> Result<String> {
    use std::io::{Write, stdin, stdout};

    println!("Select an operation:");
    println!("1. Export All Databases (or type 'export')");
    println!("2. Import All Databases (or type 'import')");
    print!("Enter your choice: ");
    let _ = stdout().flush().context("Failed to flush stdout")?;

    let mut input = String::new();
    stdin()
        .read_line(&mut input)
        .context("Failed to read user input")?;
    Ok(input.trim().to_string())
}
