// raventool/src/admin/lifecycle.rs
use anyhow::{Context, Result};
use base64::{Engine as _, engine::general_purpose::STANDARD};
use rand::RngCore;
use rand::rngs::OsRng;
use std::collections::BTreeMap;
use tracing::info;

use super::{AdminClient, DatabaseDocument};

const DEFAULT_BUNDLES: &[&str] = &["Encryption", "Compression"];
const ENCRYPTION_ALGORITHM: &str = "System.Security.Cryptography.RijndaelManaged, mscorlib";
const ENCRYPTION_KEY_BITS: usize = 256;

/// Provisions a tenant database with encryption and compression enabled.
/// No-op when a database with that name already exists.
pub async fn create_database(
    admin: &dyn AdminClient,
    database_name: &str,
    additional_bundles: &[String],
) -> Result<()> {
    if admin.database_exists(database_name).await? {
        return Ok(());
    }

    let document = build_database_document(database_name, additional_bundles, generate_key());
    admin
        .create_database(&document)
        .await
        .with_context(|| format!("Failed to create database '{database_name}'"))?;

    Ok(())
}

/// Hard-deletes a tenant database and its data. No-op when it does not exist.
pub async fn delete_database(admin: &dyn AdminClient, database_name: &str) -> Result<()> {
    if !admin.database_exists(database_name).await? {
        return Ok(());
    }

    info!("Deleting database = {database_name}");
    admin
        .delete_database(database_name, true)
        .await
        .with_context(|| format!("Failed to delete database '{database_name}'"))?;
    info!("Deletion complete");

    Ok(())
}

fn build_database_document(
    database_name: &str,
    additional_bundles: &[String],
    encryption_key: String,
) -> DatabaseDocument {
    let mut settings = BTreeMap::new();
    settings.insert(
        "Raven/DataDir".to_string(),
        format!("~/{database_name}"),
    );
    settings.insert(
        "Raven/ActiveBundles".to_string(),
        active_bundles(additional_bundles),
    );

    let mut secured_settings = BTreeMap::new();
    secured_settings.insert("Raven/Encryption/Key".to_string(), encryption_key);
    secured_settings.insert(
        "Raven/Encryption/Algorithm".to_string(),
        ENCRYPTION_ALGORITHM.to_string(),
    );
    secured_settings.insert(
        "Raven/Encryption/KeyBitsPreference".to_string(),
        ENCRYPTION_KEY_BITS.to_string(),
    );
    secured_settings.insert(
        "Raven/Encryption/EncryptIndexes".to_string(),
        "True".to_string(),
    );

    DatabaseDocument {
        id: database_name.to_string(),
        settings,
        secured_settings,
    }
}

fn active_bundles(additional_bundles: &[String]) -> String {
    let mut bundles: Vec<&str> = DEFAULT_BUNDLES.to_vec();
    for bundle in additional_bundles {
        if !bundles.contains(&bundle.as_str()) {
            bundles.push(bundle);
        }
    }

    bundles.join(";")
}

/// Fresh symmetric key per created database, handed to the server's secured
/// settings and never persisted locally.
fn generate_key() -> String {
    let mut key = [0u8; ENCRYPTION_KEY_BITS / 8];
    OsRng.fill_bytes(&mut key);
    STANDARD.encode(key)
}
