//! HTTP surface of Confidant.
//!
//! Two services run as separate processes and share state only through the
//! snapshot file behind [`Directory`]:
//!
//! - [`writer`] creates contacts and records or edits memories.
//! - [`reader`] lists, looks up, summarizes and counts contacts.

use std::net::SocketAddr;
use std::path::Path;

use anyhow::Result;
use axum::Router;
use confidant_model::NotificationStyle;
use confidant_store::Directory;
use tokio::signal;
use tracing::{info, warn};

pub mod error;
pub mod reader;
pub mod views;
pub mod writer;

pub use error::{ApiError, ApiResult};

#[derive(Clone)]
pub struct AppState {
    pub directory: Directory,
    pub style: NotificationStyle,
}

impl AppState {
    pub fn new(directory: Directory) -> Self {
        Self {
            directory,
            style: NotificationStyle::default(),
        }
    }

    pub fn with_style(mut self, style: NotificationStyle) -> Self {
        self.style = style;
        self
    }
}

/// JSON logs filtered by `RUST_LOG`.
pub fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .json()
        .init();
}

pub async fn serve(
    app: Router,
    listen: SocketAddr,
    service: &'static str,
    data_file: &Path,
) -> Result<()> {
    let listener = tokio::net::TcpListener::bind(listen).await?;
    info!(%listen, data_file = %data_file.display(), "{service} listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(service))
        .await?;

    Ok(())
}

/// Resolves on Ctrl+C or SIGTERM. A listener that cannot be installed is
/// logged and never fires, so it does not trigger a shutdown by itself.
async fn shutdown_signal(service: &'static str) {
    let interrupt = async {
        if let Err(error) = signal::ctrl_c().await {
            warn!(%error, "Ctrl+C listener unavailable");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(error) => {
                warn!(%error, "SIGTERM listener unavailable");
                std::future::pending::<()>().await;
            }
        }
    };
    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = interrupt => {}
        () = terminate => {}
    }
    info!(service, "shutdown requested, draining connections");
}
