use std::sync::Arc;

use sqlx::sqlite::SqlitePoolOptions;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use hr_training::api::router;
use hr_training::config::AppConfig;
use hr_training::remote::HttpMirror;
use hr_training::services::{CourseCatalog, SyncService};
use hr_training::state::AppState;
use hr_training::storage::SqliteStore;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "hr_training=debug".to_string()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = AppConfig::new_from_env()?;

    let pool = SqlitePoolOptions::new()
        .max_connections(5)
        .connect(&config.database_url)
        .await?;

    let store = SqliteStore::new(pool);
    store.migrate().await?;
    let store = Arc::new(store);

    let mirror = Arc::new(HttpMirror::new(config.mirror_timeout)?);
    let sync = Arc::new(SyncService::new(store.clone(), mirror));
    let catalog = Arc::new(CourseCatalog::open(sync).await?);

    let state = AppState { store, catalog };

    let app = router(state);

    info!("listening on http://{}", config.bind_addr);

    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
