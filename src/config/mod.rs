// raventool/src/config/mod.rs
use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use url::Url;

const DEFAULT_PACING_SECONDS: u64 = 5;

// Struct for deserializing config.json
#[derive(Debug, Clone, Deserialize)]
pub struct RawJsonConfig {
    pub server_url: Option<String>,
    pub backup_dir: Option<PathBuf>,
    pub smuggler_path: Option<PathBuf>,
    pub database_list: Option<Vec<String>>,
    pub pacing_seconds: Option<u64>,
    pub export_all_when_unfiltered: Option<bool>,
}

// Application's internal configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub server_url: String,
    pub backup_dir: PathBuf,
    pub smuggler_path: Option<PathBuf>,
    pub database_list: Option<Vec<String>>,
    pub pacing_seconds: u64,
    pub export_all_when_unfiltered: bool,
}

impl AppConfig {
    pub fn load_from_json(config_path: &Path) -> Result<Self> {
        let config_content = fs::read_to_string(config_path)
            .with_context(|| format!("Failed to read config file at {}", config_path.display()))?;
        let raw_json_config: RawJsonConfig = serde_json::from_str(&config_content)
            .with_context(|| {
                format!(
                    "Failed to parse JSON from config file at {}",
                    config_path.display()
                )
            })?;

        Self::from_raw(raw_json_config)
    }

    fn from_raw(raw: RawJsonConfig) -> Result<Self> {
        let server_url = raw
            .server_url
            .context("server_url must be set in config.json")?;
        Url::parse(&server_url)
            .with_context(|| format!("Invalid server_url in config.json: {}", server_url))?;

        let backup_dir = raw
            .backup_dir
            .context("backup_dir must be set in config.json")?;
        if backup_dir.as_os_str().is_empty() {
            anyhow::bail!("backup_dir cannot be empty in config.json.");
        }

        if let Some(list) = &raw.database_list {
            if list.iter().any(|name| name.trim().is_empty()) {
                anyhow::bail!("database_list in config.json contains a blank database name.");
            }
        }

        Ok(AppConfig {
            server_url: server_url.trim_end_matches('/').to_string(),
            backup_dir,
            smuggler_path: raw.smuggler_path,
            database_list: raw.database_list,
            pacing_seconds: raw.pacing_seconds.unwrap_or(DEFAULT_PACING_SECONDS),
            export_all_when_unfiltered: raw.export_all_when_unfiltered.unwrap_or(true),
        })
    }

    /// Delay applied after every smuggler invocation to throttle the server.
    pub fn pacing(&self) -> Duration {
        Duration::from_secs(self.pacing_seconds)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(json: &str) -> Result<AppConfig> {
        let raw: RawJsonConfig = serde_json::from_str(json)?;
        AppConfig::from_raw(raw)
    }

    #[test]
    fn test_full_config() -> Result<()> {
        let config = parse(
            r#"{
                "server_url": "http://raven.internal:8080/",
                "backup_dir": "/var/backups/raven",
                "smuggler_path": "/opt/raven/Raven.Smuggler",
                "database_list": ["Sales", "Inventory"],
                "pacing_seconds": 2,
                "export_all_when_unfiltered": false
            }"#,
        )?;

        assert_eq!(config.server_url, "http://raven.internal:8080");
        assert_eq!(config.backup_dir, PathBuf::from("/var/backups/raven"));
        assert_eq!(
            config.smuggler_path,
            Some(PathBuf::from("/opt/raven/Raven.Smuggler"))
        );
        assert_eq!(
            config.database_list,
            Some(vec!["Sales".to_string(), "Inventory".to_string()])
        );
        assert_eq!(config.pacing(), Duration::from_secs(2));
        assert!(!config.export_all_when_unfiltered);
        Ok(())
    }

    #[test]
    fn test_defaults() -> Result<()> {
        let config = parse(
            r#"{
                "server_url": "http://localhost:8080",
                "backup_dir": "backups"
            }"#,
        )?;

        assert_eq!(config.smuggler_path, None);
        assert_eq!(config.database_list, None);
        assert_eq!(config.pacing(), Duration::from_secs(5));
        assert!(config.export_all_when_unfiltered);
        Ok(())
    }

    #[test]
    fn test_missing_server_url() {
        let result = parse(r#"{"backup_dir": "backups"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_invalid_server_url() {
        let result = parse(r#"{"server_url": "not a url", "backup_dir": "backups"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_empty_backup_dir() {
        let result = parse(r#"{"server_url": "http://localhost:8080", "backup_dir": ""}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_blank_database_name_rejected() {
        let result = parse(
            r#"{
                "server_url": "http://localhost:8080",
                "backup_dir": "backups",
                "database_list": ["Sales", "  "]
            }"#,
        );
        assert!(result.is_err());
    }
}
