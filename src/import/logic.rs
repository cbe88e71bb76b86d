// raventool/src/import/logic.rs
use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{error, info, warn};

use crate::admin::{AdminClient, lifecycle};
use crate::smuggler::paths::{database_name_from_dump, dump_file_path, ensure_backup_dir};
use crate::smuggler::retry::run_with_retry;
use crate::smuggler::runner::CommandRunner;

const DISABLE_VERSIONING_ARG: &str = "--disable-versioning-during-import";
// The server writes this document itself when the encryption bundle comes up;
// restoring a stale copy would fail key verification.
const ENCRYPTION_VERIFICATION_FILTER: &str =
    "--negative-metadata-filter:@id=Raven/Encryption/Verification";

pub type PathFilter = Box<dyn Fn(&str) -> bool + Send + Sync>;

#[derive(Default)]
pub struct ImportOptions {
    /// Selects which dump file paths enter the import set.
    pub filter: Option<PathFilter>,
    /// Appended verbatim to every smuggler invocation.
    pub extra_smuggler_args: Vec<String>,
}

/// Restores tenant databases from the backup directory: every target is
/// deleted first, then each is recreated and fed its dump in turn.
pub struct Importer<'a> {
    admin: &'a dyn AdminClient,
    runner: &'a dyn CommandRunner,
    smuggler_path: PathBuf,
    backup_dir: PathBuf,
    pacing: Duration,
    options: ImportOptions,
}

impl<'a> Importer<'a> {
    pub fn new(
        admin: &'a dyn AdminClient,
        runner: &'a dyn CommandRunner,
        smuggler_path: PathBuf,
        backup_dir: PathBuf,
        options: ImportOptions,
    ) -> Self {
        Self {
            admin,
            runner,
            smuggler_path,
            backup_dir,
            pacing: Duration::from_secs(5),
            options,
        }
    }

    pub fn with_pacing(mut self, pacing: Duration) -> Self {
        self.pacing = pacing;
        self
    }

    /// Imports every dump found in the backup directory, in lexicographic
    /// order of the derived database names. Databases whose restore exhausts
    /// the retry are reported together once the batch finishes.
    pub async fn import_all(&self) -> Result<usize> {
        let database_names = self.discover_database_names()?;
        if database_names.is_empty() {
            info!(
                "No dump files found in {}",
                self.backup_dir.display()
            );
            return Ok(0);
        }

        for database_name in &database_names {
            lifecycle::delete_database(self.admin, database_name).await?;
        }
        info!("Done deleting {} database(s)", database_names.len());

        let mut failed = Vec::new();
        for database_name in &database_names {
            info!("The database to restore = {database_name}");

            lifecycle::create_database(self.admin, database_name, &[]).await?;

            if let Err(e) = self.restore_database(database_name).await {
                error!("An error occurred while trying to restore {database_name}: {e}");
                failed.push(database_name.clone());
            }
        }

        if !failed.is_empty() {
            anyhow::bail!(
                "Import failed for {} database(s): {}",
                failed.len(),
                failed.join(", ")
            );
        }

        Ok(database_names.len())
    }

    /// Deletes, recreates, and restores a single database. A blank name is a
    /// logged no-op; a restore failure propagates after the retry.
    pub async fn import_one(&self, database_name: &str) -> Result<()> {
        if database_name.trim().is_empty() {
            warn!("Database name is blank, nothing to import");
            return Ok(());
        }

        lifecycle::delete_database(self.admin, database_name).await?;
        lifecycle::create_database(self.admin, database_name, &[]).await?;
        self.restore_database(database_name).await
    }

    /// Non-recursive scan of the backup directory for dump files, sorted
    /// lexicographically by derived database name. This order is the single
    /// source of determinism for both the delete and the import phase.
    fn discover_database_names(&self) -> Result<Vec<String>> {
        ensure_backup_dir(&self.backup_dir)?;

        let mut names = Vec::new();
        let entries = fs::read_dir(&self.backup_dir).with_context(|| {
            format!(
                "Failed to read backup directory: {}",
                self.backup_dir.display()
            )
        })?;

        for entry in entries {
            let path = entry?.path();
            if !path.is_file() {
                continue;
            }
            let Some(name) = database_name_from_dump(&path) else {
                continue;
            };
            if let Some(filter) = &self.options.filter {
                if !filter(&path.display().to_string()) {
                    continue;
                }
            }
            names.push(name);
        }

        names.sort();
        Ok(names)
    }

    async fn restore_database(&self, database_name: &str) -> Result<()> {
        info!("Import database {database_name} with process");

        let dump_path = dump_file_path(&self.backup_dir, database_name);
        let args = self.import_args(database_name, &dump_path);
        info!("Smuggler Path = {}", self.smuggler_path.display());
        info!("Smuggler Args = {}", args.join(" "));

        let result = run_with_retry(self.runner, &self.smuggler_path, &args, self.pacing).await?;
        info!("Smuggler process output = {}", result.output);
        Ok(())
    }

    fn import_args(&self, database_name: &str, dump_path: &Path) -> Vec<String> {
        let mut args = vec![
            "in".to_string(),
            self.admin.server_url().to_string(),
            dump_path.display().to_string(),
            format!("--database={database_name}"),
            ENCRYPTION_VERIFICATION_FILTER.to_string(),
            DISABLE_VERSIONING_ARG.to_string(),
        ];
        args.extend(self.options.extra_smuggler_args.iter().cloned());
        args
    }
}
