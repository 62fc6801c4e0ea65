//! HTTP API for the Folio document
//!
//! Routes live in [`app`], request handlers in [`handlers`]. Every JSON reply
//! from the `/api/*Item` routes has the shape
//! `{ "success": bool, "message": string, "config"?: SiteConfig }`.

pub mod app;
pub mod error;
pub mod extract;
pub mod handlers;
pub mod state;

use anyhow::Result;
use tokio::{net::TcpListener, signal};

pub use app::create_app;
pub use state::AppState;

/// Bind `addr` and serve the API until Ctrl+C or SIGTERM
pub async fn serve(addr: &str, state: AppState) -> Result<()> {
    let app = create_app(state);

    let listener = TcpListener::bind(addr).await?;
    tracing::info!("listening on {}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
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
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C, shutting down...");
        }
        _ = terminate => {
            tracing::info!("Received SIGTERM, shutting down...");
        }
    }
}
