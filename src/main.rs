use std::sync::Arc;

use condition_coach::{
    config::Config,
    db::{self, Cache, MemoryStore, PgStore},
    routes::{create_router, AppState},
};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("condition_coach=info,tower_http=info")),
        )
        .init();

    let config = Config::from_env()?;

    let mut state = match &config.database_url {
        Some(database_url) => {
            let pool = db::create_pool(database_url).await?;
            db::run_migrations(&pool).await?;
            tracing::info!("Using Postgres store");
            AppState::from_store(Arc::new(PgStore::new(pool)))
        }
        None => {
            let store = MemoryStore::new();
            if let Some(path) = &config.catalog_seed_path {
                let count = store.seed_from_file(path).await?;
                tracing::info!(path = %path, count, "Seeded in-memory catalog");
            }
            tracing::warn!("DATABASE_URL not set, using in-memory store");
            AppState::from_store(Arc::new(store))
        }
    };

    state = state.with_log_offset(config.log_offset()?);

    let mut cache_writer = None;
    if let Some(redis_url) = &config.redis_url {
        let client = db::create_redis_client(redis_url)?;
        let (cache, handle) = Cache::new(client);
        state = state.with_cache(cache, config.catalog_cache_ttl);
        cache_writer = Some(handle);
        tracing::info!(ttl = config.catalog_cache_ttl, "Catalog cache enabled");
    }

    let app = create_router(Arc::new(state));

    let listener = tokio::net::TcpListener::bind(config.bind_address()).await?;
    tracing::info!(address = %config.bind_address(), "Server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    if let Some(handle) = cache_writer {
        handle.shutdown().await;
    }

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
    }
    tracing::info!("Shutdown signal received");
}
