use anyhow::{Context, Result};
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::api::{self, AppState};
use crate::config::ServerConfig;
use crate::orchestrator::QueryOrchestrator;

/// Full application router with middleware
pub fn app(orchestrator: QueryOrchestrator) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    api::router(AppState { orchestrator })
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}

pub async fn run(config: &ServerConfig, orchestrator: QueryOrchestrator) -> Result<()> {
    let app = app(orchestrator);

    match (&config.tls_cert, &config.tls_key) {
        (Some(cert), Some(key)) => serve_tls(config, app, cert, key).await,
        _ => serve_plain(config, app).await,
    }
}

async fn serve_plain(config: &ServerConfig, app: Router) -> Result<()> {
    let addr = config.bind_address();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    tracing::info!("Web server running at http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Web server failed")
}

#[cfg(feature = "tls")]
async fn serve_tls(
    config: &ServerConfig,
    app: Router,
    cert: &std::path::Path,
    key: &std::path::Path,
) -> Result<()> {
    use axum_server::tls_rustls::RustlsConfig;
    use std::net::SocketAddr;
    use std::time::Duration;

    let addr: SocketAddr = config
        .bind_address()
        .parse()
        .with_context(|| format!("Invalid bind address {}", config.bind_address()))?;
    let tls = RustlsConfig::from_pem_file(cert, key)
        .await
        .context("Failed to load TLS certificate or key")?;

    let handle = axum_server::Handle::new();
    tokio::spawn({
        let handle = handle.clone();
        async move {
            shutdown_signal().await;
            handle.graceful_shutdown(Some(Duration::from_secs(10)));
        }
    });

    tracing::info!("Web server running at https://{}", addr);
    axum_server::bind_rustls(addr, tls)
        .handle(handle)
        .serve(app.into_make_service())
        .await
        .context("Web server failed")
}

#[cfg(not(feature = "tls"))]
async fn serve_tls(
    _config: &ServerConfig,
    _app: Router,
    _cert: &std::path::Path,
    _key: &std::path::Path,
) -> Result<()> {
    anyhow::bail!("TLS is configured but weatherbot was built without the `tls` feature")
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {e}");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutting down");
}
