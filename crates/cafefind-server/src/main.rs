mod api;
mod middleware;

use std::sync::Arc;

use cafefind_overpass::OverpassClient;
use cafefind_search::{PgVenueStore, Searcher};
use tracing_subscriber::EnvFilter;

use crate::api::{build_app, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = cafefind_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let pool_config = cafefind_db::PoolConfig::from_app_config(&config);
    let pool = cafefind_db::connect_pool(&config.database_url, pool_config).await?;
    cafefind_db::run_migrations(&pool).await?;

    let searcher = Searcher::new(
        PgVenueStore::new(pool.clone()),
        OverpassClient::from_app_config(&config)?,
        config.staleness_days,
    );
    let state = AppState::new(pool, Arc::new(searcher), config.default_settings);
    let app = build_app(state);

    tracing::info!(bind_addr = %config.bind_addr, env = %config.env, "starting cafefind server");
    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to listen for ctrl-c");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    tracing::info!("received shutdown signal, starting graceful shutdown");
}
