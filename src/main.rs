use std::{net::SocketAddr, sync::Arc};

use anyhow::Context;
use clinic_chat_relay::{config::Config, routes, state::AppState};
use tokio::signal;
use tracing::{info, warn};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,clinic_chat_relay=debug".into()),
        )
        .init();

    let config = Config::from_env();
    let port = config.port;
    info!(
        environment = %config.environment,
        openai_configured = config.openai_api_key.is_some(),
        database_configured = config.database.is_some(),
        "starting clinic chat relay"
    );

    let state = Arc::new(AppState::from_config(config));

    if state.usage.is_configured() {
        if let Err(e) = state.usage.prepare().await {
            warn!(error = %e, "database setup failed, continuing; usage checks fail open");
        }
    } else {
        info!("database configuration not found, running without database");
    }

    let janitor = state.rate_limiter.spawn_janitor();

    let app = routes::create_router(state.clone());

    let listener = tokio::net::TcpListener::bind(("0.0.0.0", port))
        .await
        .with_context(|| format!("failed to bind port {port}"))?;

    info!("server running on port {port}");
    axum::serve(listener, app.into_make_service_with_connect_info::<SocketAddr>())
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    janitor.abort();
    state.usage.close().await;
    info!("shutdown complete");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            warn!(error = %e, "failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                warn!(error = %e, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!("SIGINT received, shutting down gracefully"),
        _ = terminate => info!("SIGTERM received, shutting down gracefully"),
    }
}
