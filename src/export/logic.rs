// raventool/src/export/logic.rs
use anyhow::Result;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{error, info, warn};

use crate::admin::AdminClient;
use crate::smuggler::paths::{dump_file_path, ensure_backup_dir};
use crate::smuggler::runner::CommandRunner;

/// Page size used when enumerating tenant databases.
pub const LISTING_PAGE_SIZE: usize = 100;

pub type NameFilter = Box<dyn Fn(&str) -> bool + Send + Sync>;

pub struct ExportOptions {
    /// Selects which database names enter the export set.
    pub filter: Option<NameFilter>,
    /// Behavior when no filter is supplied: `true` exports every enabled
    /// database, `false` yields an empty export set.
    pub include_all_when_unfiltered: bool,
    /// Appended verbatim to every smuggler invocation.
    pub extra_smuggler_args: Vec<String>,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            filter: None,
            include_all_when_unfiltered: true,
            extra_smuggler_args: Vec::new(),
        }
    }
}

/// Dumps tenant databases to the backup directory, one smuggler run each.
pub struct Exporter<'a> {
    admin: &'a dyn AdminClient,
    runner: &'a dyn CommandRunner,
    smuggler_path: PathBuf,
    backup_dir: PathBuf,
    pacing: Duration,
    page_size: usize,
    options: ExportOptions,
}

impl<'a> Exporter<'a> {
    pub fn new(
        admin: &'a dyn AdminClient,
        runner: &'a dyn CommandRunner,
        smuggler_path: PathBuf,
        backup_dir: PathBuf,
        options: ExportOptions,
    ) -> Self {
        Self {
            admin,
            runner,
            smuggler_path,
            backup_dir,
            pacing: Duration::from_secs(5),
            page_size: LISTING_PAGE_SIZE,
            options,
        }
    }

    pub fn with_pacing(mut self, pacing: Duration) -> Self {
        self.pacing = pacing;
        self
    }

    #[cfg(test)]
    fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size;
        self
    }

    /// Enumerates eligible databases and dumps each in discovery order.
    /// A failed dump is logged and the batch continues. Returns the number of
    /// databases exported successfully.
    pub async fn export_all(&self) -> Result<usize> {
        let database_names = self.collect_database_names().await?;
        info!("Total databases to backup = {}", database_names.len());

        if database_names.is_empty() {
            return Ok(0);
        }

        ensure_backup_dir(&self.backup_dir)?;

        let mut exported = 0;
        for database_name in &database_names {
            if self.export_database(database_name).await {
                exported += 1;
            }
        }

        Ok(exported)
    }

    /// Dumps a single database. A blank name is a logged no-op.
    pub async fn export_one(&self, database_name: &str) -> Result<()> {
        if database_name.trim().is_empty() {
            warn!("Database name is blank, nothing to export");
            return Ok(());
        }

        ensure_backup_dir(&self.backup_dir)?;
        self.export_database(database_name).await;
        Ok(())
    }

    async fn collect_database_names(&self) -> Result<Vec<String>> {
        let mut selected = Vec::new();
        let mut start = 0;

        loop {
            let page = self.admin.list_database_names(self.page_size, start).await?;
            if page.is_empty() {
                break;
            }
            start += page.len();

            for database_name in page {
                if !self.accepts(&database_name) {
                    continue;
                }
                if self.admin.is_database_disabled(&database_name).await? {
                    continue;
                }
                selected.push(database_name);
            }
        }

        Ok(selected)
    }

    fn accepts(&self, database_name: &str) -> bool {
        match &self.options.filter {
            Some(filter) => filter(database_name),
            None => self.options.include_all_when_unfiltered,
        }
    }

    async fn export_database(&self, database_name: &str) -> bool {
        info!("Export database {database_name} with process");

        let dump_path = dump_file_path(&self.backup_dir, database_name);
        let args = self.export_args(database_name, &dump_path);
        info!("Smuggler Path = {}", self.smuggler_path.display());
        info!("Smuggler Args = {}", args.join(" "));

        let succeeded = match self.runner.run(&self.smuggler_path, &args) {
            Ok(result) if result.is_success() => {
                info!("Smuggler process output = {}", result.output);
                true
            }
            Ok(result) => {
                warn!(
                    "Process {} didn't work with arguments {}",
                    self.smuggler_path.display(),
                    args.join(" ")
                );
                warn!("Smuggler process output = {}", result.output);
                false
            }
            Err(e) => {
                error!("An error occurred while trying to export {database_name}: {e}");
                false
            }
        };

        tokio::time::sleep(self.pacing).await;
        succeeded
    }

    fn export_args(&self, database_name: &str, dump_path: &Path) -> Vec<String> {
        let mut args = vec![
            "out".to_string(),
            self.admin.server_url().to_string(),
            dump_path.display().to_string(),
            format!("--database={database_name}"),
        ];
        args.extend(self.options.extra_smuggler_args.iter().cloned());
        args
    }
}
