use std::sync::Arc;

use anyhow::Context;

use bookstore_app::modules;
use bookstore_app::modules::books::store::BookStore;
use bookstore_kernel::settings::Settings;
use bookstore_kernel::{InitCtx, ModuleRegistry};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let settings = Settings::load().with_context(|| "failed to load bookstore settings")?;

    bookstore_telemetry::init(&settings.telemetry);

    tracing::info!(
        env = ?settings.environment,
        db = %settings.database.database,
        "bookstore bootstrap starting"
    );

    let database = bookstore_db::connect(&settings.database).await?;
    let store = Arc::new(
        BookStore::connect(&database, &settings.database)
            .await
            .with_context(|| "failed to prepare catalog collections")?,
    );

    let mut registry = ModuleRegistry::new();
    modules::register_all(&mut registry, store);

    let ctx = InitCtx {
        settings: &settings,
    };
    registry.init_all(&ctx).await?;

    tracing::info!("bookstore bootstrap complete");

    bookstore_http::start_server(&registry, &settings).await
}
