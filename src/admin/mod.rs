pub(crate) mod http;
pub(crate) mod lifecycle;

use anyhow::Result;
use async_trait::async_trait;
use serde::Serialize;
use std::collections::BTreeMap;

/// Provisioning document submitted when creating a tenant database.
/// Field names follow the server's PascalCase wire format.
#[derive(Debug, Clone, Serialize)]
pub struct DatabaseDocument {
    #[serde(rename = "Id")]
    pub id: String,
    #[serde(rename = "Settings")]
    pub settings: BTreeMap<String, String>,
    #[serde(rename = "SecuredSettings")]
    pub secured_settings: BTreeMap<String, String>,
}

/// Admin surface of the document-database server: tenant listing, the
/// per-database descriptor document, and create/delete.
#[async_trait]
pub trait AdminClient: Send + Sync {
    fn server_url(&self) -> &str;

    /// One page of tenant database names, `start` is an absolute offset.
    async fn list_database_names(&self, page_size: usize, start: usize) -> Result<Vec<String>>;

    async fn database_exists(&self, name: &str) -> Result<bool>;

    /// Reads the `Disabled` flag from the database's descriptor document.
    async fn is_database_disabled(&self, name: &str) -> Result<bool>;

    async fn create_database(&self, document: &DatabaseDocument) -> Result<()>;

    async fn delete_database(&self, name: &str, hard_delete: bool) -> Result<()>;
}
