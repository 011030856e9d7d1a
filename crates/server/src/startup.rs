use std::net::SocketAddr;

use axum::Router;
use configs::{AppConfig, StorageConfig};
use tower_http::cors::CorsLayer;
use tracing::info;

use crate::errors::StartupError;
use crate::routes::{self, AppState};
use service::{
    file::{CaseStore, DocumentStore},
    runtime,
};

fn build_cors() -> CorsLayer {
    CorsLayer::very_permissive()
}

/// Open both collection stores, creating empty files first when configured to.
pub async fn build_state(storage: &StorageConfig) -> Result<AppState, StartupError> {
    let cases_path = storage.cases_path();
    let documents_path = storage.documents_path();

    let cases = CaseStore::new(&cases_path);
    let documents = DocumentStore::new(&documents_path);

    if storage.init_missing {
        if cases.init_if_missing().await.map_err(|e| StartupError::Storage(e.to_string()))? {
            info!(file = %cases_path.display(), "created empty cases collection");
        }
        if documents.init_if_missing().await.map_err(|e| StartupError::Storage(e.to_string()))? {
            info!(file = %documents_path.display(), "created empty documents collection");
        }
    }

    runtime::ensure_env(&storage.data_dir, &[cases_path.as_path(), documents_path.as_path()]).await?;

    Ok(AppState { cases, documents })
}

/// Build the application router for the given configuration.
pub async fn build_app(cfg: &AppConfig) -> Result<Router, StartupError> {
    let state = build_state(&cfg.storage).await?;
    Ok(routes::build_router(state, build_cors()))
}

fn bind_addr(cfg: &AppConfig) -> Result<SocketAddr, StartupError> {
    cfg.bind_addr()
        .parse()
        .map_err(|e| StartupError::InvalidConfig(format!("bind address {}: {e}", cfg.bind_addr())))
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_ok() {
        info!(event = "shutdown_signal", "received Ctrl+C, shutting down");
    }
}

/// Public entry: build the app and run the HTTP server until Ctrl+C.
pub async fn run(cfg: AppConfig) -> anyhow::Result<()> {
    let app = build_app(&cfg).await?;

    let addr = bind_addr(&cfg)?;
    info!(%addr, data_dir = %cfg.storage.data_dir.display(), "starting dashboard api");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}
