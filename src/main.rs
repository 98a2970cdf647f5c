use salaah_web::config::{resolve_backend_url, resolve_port};
use salaah_web::{load_prefs, resolve_prefs_path, router, ApiClient, AppState, Controller};
use std::net::SocketAddr;
use tokio::fs;
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("info".parse()?))
        .init();

    let prefs_path = resolve_prefs_path()?;
    if let Some(parent) = prefs_path.parent() {
        fs::create_dir_all(parent).await?;
    }

    let prefs = load_prefs(&prefs_path).await;
    let backend_url = resolve_backend_url();
    let api = ApiClient::new(backend_url.as_str())?;
    let state = AppState::new(prefs_path, Controller::new(api, prefs.language));
    let app = router(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], resolve_port()));

    info!("backend at {backend_url}");
    info!("listening on http://{addr}");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!("failed to listen for ctrl-c: {err}");
        std::future::pending::<()>().await;
    }
    info!("shutting down");
}
