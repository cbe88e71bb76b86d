mod logic;

pub use logic::{ExportOptions, Exporter, NameFilter};

use anyhow::Result;
use tracing::info;

use crate::admin::http::HttpAdminClient;
use crate::config::AppConfig;
use crate::smuggler::{self, runner::ProcessRunner};

/// Public entry point for the export process: dumps every eligible tenant
/// database to the configured backup directory.
pub async fn run_export_flow(app_config: &AppConfig) -> Result<()> {
    let admin = HttpAdminClient::new(&app_config.server_url)?;
    let runner = ProcessRunner;

    let exported = build_exporter(app_config, &admin, &runner)?
        .export_all()
        .await?;
    info!(
        "Exported {exported} database(s) to {}",
        app_config.backup_dir.display()
    );
    Ok(())
}

/// Dumps a single named database.
pub async fn run_export_one_flow(app_config: &AppConfig, database_name: &str) -> Result<()> {
    let admin = HttpAdminClient::new(&app_config.server_url)?;
    let runner = ProcessRunner;

    build_exporter(app_config, &admin, &runner)?
        .export_one(database_name)
        .await
}

fn build_exporter<'a>(
    app_config: &AppConfig,
    admin: &'a HttpAdminClient,
    runner: &'a ProcessRunner,
) -> Result<Exporter<'a>> {
    let smuggler_path = smuggler::resolve_smuggler_path(app_config.smuggler_path.as_deref())?;

    let filter = app_config.database_list.clone().map(|list| -> NameFilter {
        Box::new(move |name| list.iter().any(|wanted| wanted == name))
    });

    let options = ExportOptions {
        filter,
        include_all_when_unfiltered: app_config.export_all_when_unfiltered,
        extra_smuggler_args: Vec::new(),
    };

    Ok(Exporter::new(
        admin,
        runner,
        smuggler_path,
        app_config.backup_dir.clone(),
        options,
    )
    .with_pacing(app_config.pacing()))
}
