//! MongoDB client factory for the bookstore service.
//!
//! One client is created at startup and shared for the lifetime of the
//! process; the driver's connection pool governs actual concurrency.

use anyhow::Context;
use mongodb::{Client, Database};

use bookstore_kernel::settings::DatabaseSettings;

/// Connect to MongoDB and return the configured database handle.
pub async fn connect(settings: &DatabaseSettings) -> anyhow::Result<Database> {
    let client = Client::with_uri_str(&settings.connection_string)
        .await
        .with_context(|| "failed to create MongoDB client")?;

    let database = client.database(&settings.database);

    tracing::info!(
        target: "bookstore-db",
        database = %settings.database,
        "MongoDB client ready"
    );

    Ok(database)
}

/// Report whether a collection already exists in the database.
///
/// The books collection gets its name index created only on first
/// creation, so callers need to observe existence before taking a handle.
pub async fn collection_exists(
    database: &Database,
    name: &str,
) -> mongodb::error::Result<bool> {
    let names = database.list_collection_names().await?;
    Ok(names.iter().any(|existing| existing == name))
}
