mod api;
mod middleware;

use std::sync::Arc;
use std::time::Duration;

use ecam_catalog::{CatalogClient, MemoizedCatalog};
use ecam_core::AssetUrls;
use tracing_subscriber::EnvFilter;

use crate::{
    api::{build_app, AppState},
    middleware::Analytics,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = ecam_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let client = CatalogClient::new(&config)?;
    let catalog = MemoizedCatalog::new(client, Duration::from_secs(config.cache_ttl_secs));

    let state = AppState {
        catalog: Arc::new(catalog),
        assets: AssetUrls::from_config(&config),
        site_origin: config.site_origin.clone(),
        messenger_profile_id: config.messenger_profile_id.clone(),
    };
    let analytics = Analytics::new(config.pixel_id.as_deref());
    let app = build_app(state, analytics);

    tracing::info!(
        env = %config.env,
        bind_addr = %config.bind_addr,
        api = %config.api_base_url,
        store_id = %config.store_id,
        "starting ecam-server"
    );

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
