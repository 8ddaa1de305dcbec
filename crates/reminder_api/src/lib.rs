//! HTTP API layer for the reminder backend.

pub mod api;
pub mod error;
pub mod paging;
pub mod settings;
pub mod state;

pub use api::router;
pub use error::ApiError;
pub use settings::{Settings, SettingsError};
pub use state::AppState;

use log::info;
use tokio::net::TcpListener;

/// Serves the API on `listener` until ctrl-c is received.
pub async fn serve(listener: TcpListener, state: AppState) -> std::io::Result<()> {
    if let Ok(addr) = listener.local_addr() {
        info!("event=http_serve module=api status=start addr={addr}");
    }
    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    info!("event=http_serve module=api status=ok");
    Ok(())
}

async fn shutdown_signal() {
    // A failed handler install means we can only stop by being killed.
    if tokio::signal::ctrl_c().await.is_err() {
        std::future::pending::<()>().await;
    }
}
