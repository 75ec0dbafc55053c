use std::sync::Arc;

use anyhow::Context;
use tracing_subscriber::EnvFilter;

use storefront_api::{
    app,
    config::config,
    is_production,
    middleware::JwtAdminGate,
    store::{seed::seed_if_empty, CatalogStore, PgCatalogStore},
    AppState,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present so cargo run picks up DATABASE_URL, ADMIN_JWT_SECRET, etc.
    let _ = dotenvy::dotenv();

    // Initialize configuration (this loads the config singleton)
    let config = config();

    let default_filter = if config.api.enable_request_logging {
        "storefront_api=info,tower_http=debug"
    } else {
        "storefront_api=info,tower_http=info"
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .init();

    tracing::info!("Starting Storefront API in {:?} mode", config.environment);

    let store = PgCatalogStore::connect(&config.database)
        .await
        .context("failed to open catalog database")?;

    if config.catalog.seed_on_empty {
        if is_production!() {
            tracing::warn!("Seeding an empty catalog in production");
        }
        let inserted = seed_if_empty(&store).await.context("failed to seed catalog")?;
        if inserted > 0 {
            tracing::info!("Seeded {} products", inserted);
        }
    }

    let pool_store = store.clone();
    let store: Arc<dyn CatalogStore> = Arc::new(store);
    let gate = Arc::new(JwtAdminGate::from_config(&config.security));
    let app = app(AppState::new(store, gate), config);

    let bind_addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", bind_addr))?;

    tracing::info!("Storefront API listening on http://{}", bind_addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    pool_store.close().await;
    tracing::info!("Shut down cleanly");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
