mod logic;

pub use logic::{ImportOptions, Importer, PathFilter};

use anyhow::Result;
use std::path::Path;
use tracing::info;

use crate::admin::http::HttpAdminClient;
use crate::config::AppConfig;
use crate::smuggler::{self, paths, runner::ProcessRunner};

/// Public entry point for the import process: recreates and restores every
/// database whose dump is present in the backup directory.
pub async fn run_import_flow(app_config: &AppConfig) -> Result<()> {
    let admin = HttpAdminClient::new(&app_config.server_url)?;
    let runner = ProcessRunner;

    let imported = build_importer(app_config, &admin, &runner)?
        .import_all()
        .await?;
    info!(
        "Imported {imported} database(s) from {}",
        app_config.backup_dir.display()
    );
    Ok(())
}

/// Recreates and restores a single named database.
pub async fn run_import_one_flow(app_config: &AppConfig, database_name: &str) -> Result<()> {
    let admin = HttpAdminClient::new(&app_config.server_url)?;
    let runner = ProcessRunner;

    build_importer(app_config, &admin, &runner)?
        .import_one(database_name)
        .await
}

fn build_importer<'a>(
    app_config: &AppConfig,
    admin: &'a HttpAdminClient,
    runner: &'a ProcessRunner,
) -> Result<Importer<'a>> {
    let smuggler_path = smuggler::resolve_smuggler_path(app_config.smuggler_path.as_deref())?;

    let filter = app_config.database_list.clone().map(|list| -> PathFilter {
        Box::new(move |path| {
            paths::database_name_from_dump(Path::new(path))
                .map(|name| list.iter().any(|wanted| *wanted == name))
                .unwrap_or(false)
        })
    });

    let options = ImportOptions {
        filter,
        extra_smuggler_args: Vec::new(),
    };

    Ok(Importer::new(
        admin,
        runner,
        smuggler_path,
        app_config.backup_dir.clone(),
        options,
    )
    .with_pacing(app_config.pacing()))
}
