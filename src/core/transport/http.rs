//! HTTP transport implementation.
//!
//! Binds a TCP listener and serves the API router until the process is
//! interrupted.

use tracing::info;

use super::{HttpConfig, TransportError, TransportResult};
use crate::core::ApiServer;

/// HTTP transport handler.
pub struct HttpTransport {
    config: HttpConfig,
}

impl HttpTransport {
    /// Create a new HTTP transport with the given config.
    pub fn new(config: HttpConfig) -> Self {
        Self { config }
    }

    /// Get the bind address.
    pub fn address(&self) -> String {
        self.config.address()
    }

    /// Run the HTTP transport.
    ///
    /// Returns once the server has shut down after Ctrl-C.
    pub async fn run(self, server: ApiServer) -> TransportResult<()> {
        let addr = self.address();
        info!("Starting transport: {}", self.config.description());

        let app = server.router();

        let listener = tokio::net::TcpListener::bind(&addr)
            .await
            .map_err(|e| TransportError::bind(&addr, e))?;

        let cors_status = if self.config.enable_cors {
            "enabled"
        } else {
            "disabled"
        };
        info!("Ready - listening on {} (CORS {})", addr, cors_status);
        info!("  → Status: GET {}/status", self.config.prefix);
        info!("  → Stats:  GET {}/stats", self.config.prefix);

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await
            .map_err(|e| TransportError::http(e.to_string()))?;

        Ok(())
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
