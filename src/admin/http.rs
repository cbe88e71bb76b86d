// raventool/src/admin/http.rs
use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde_json::Value;
use url::Url;

use super::{AdminClient, DatabaseDocument};

/// Admin client over the server's HTTP management API.
pub struct HttpAdminClient {
    client: Client,
    server_url: String,
}

impl HttpAdminClient {
    pub fn new(server_url: &str) -> Result<Self> {
        let parsed = Url::parse(server_url)
            .with_context(|| format!("Invalid server URL: {}", server_url))?;

        Ok(Self {
            client: Client::new(),
            server_url: parsed.as_str().trim_end_matches('/').to_string(),
        })
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.server_url, path)
    }

    /// Fetches the tenant descriptor document, `None` when the database does
    /// not exist on the server.
    async fn get_database_document(&self, name: &str) -> Result<Option<Value>> {
        let url = self.endpoint(&format!("docs/Raven/Databases/{name}"));
        let response = self
            .client
            .get(&url)
            .send()
            .await
            .with_context(|| format!("Failed to fetch database document for '{name}'"))?;

        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }

        let document = response
            .error_for_status()
            .with_context(|| format!("Server rejected document fetch for '{name}'"))?
            .json::<Value>()
            .await
            .with_context(|| format!("Failed to decode database document for '{name}'"))?;

        Ok(Some(document))
    }
}

#[async_trait]
impl AdminClient for HttpAdminClient {
    fn server_url(&self) -> &str {
        &self.server_url
    }

    async fn list_database_names(&self, page_size: usize, start: usize) -> Result<Vec<String>> {
        let url = self.endpoint(&format!("databases?pageSize={page_size}&start={start}"));
        let names = self
            .client
            .get(&url)
            .send()
            .await
            .context("Failed to list databases")?
            .error_for_status()
            .context("Server rejected database listing")?
            .json::<Vec<String>>()
            .await
            .context("Failed to decode database listing")?;

        Ok(names)
    }

    async fn database_exists(&self, name: &str) -> Result<bool> {
        Ok(self.get_database_document(name).await?.is_some())
    }

    async fn is_database_disabled(&self, name: &str) -> Result<bool> {
        let document = self
            .get_database_document(name)
            .await?
            .with_context(|| format!("Database document not found for '{name}'"))?;

        Ok(document
            .get("Disabled")
            .and_then(Value::as_bool)
            .unwrap_or(false))
    }

    async fn create_database(&self, document: &DatabaseDocument) -> Result<()> {
        let url = self.endpoint(&format!("admin/databases/{}", document.id));
        self.client
            .put(&url)
            .json(document)
            .send()
            .await
            .with_context(|| format!("Failed to submit create request for '{}'", document.id))?
            .error_for_status()
            .with_context(|| format!("Server rejected creation of database '{}'", document.id))?;

        Ok(())
    }

    async fn delete_database(&self, name: &str, hard_delete: bool) -> Result<()> {
        let url = self.endpoint(&format!("admin/databases/{name}?hard-delete={hard_delete}"));
        self.client
            .delete(&url)
            .send()
            .await
            .with_context(|| format!("Failed to submit delete request for '{name}'"))?
            .error_for_status()
            .with_context(|| format!("Server rejected deletion of database '{name}'"))?;

        Ok(())
    }
}
