//! HTTP surface: upload page, JSON API and health check.

pub mod connection;
pub mod error;
pub mod health;
pub mod page;
pub mod router;
pub mod shutdown;
pub mod tracing;

use std::future::IntoFuture;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use tokio::net::TcpListener;

use crate::analysis::{GeminiClient, ModelSettings};
use crate::config::{Config, CredentialStatus};
use crate::server::connection::ConnectionCounter;
use crate::server::error::ServerError;
use crate::server::router::{build_router, AppState};
use crate::server::shutdown::ShutdownManager;

pub use self::tracing::init_tracing;

/// Number of ports above the configured one tried when it is busy.
const PORT_FALLBACK_RANGE: u16 = 100;

pub struct ReportServer {
    pub addr: SocketAddr,
    /// The bound listener, kept alive to prevent port race conditions.
    /// Populated by try_bind(), consumed by run().
    listener: Option<TcpListener>,
    state: AppState,
    shutdown: Arc<ShutdownManager>,
}

impl ReportServer {
    /// Build the server and its upstream client from `config`.
    ///
    /// `credential` is resolved by the caller so nothing here reads process state.
    pub fn new(config: &Config, credential: CredentialStatus) -> Result<Self, ServerError> {
        let settings = ModelSettings::from_config(config, credential);
        let client = GeminiClient::new(settings)?;
        Ok(Self::with_client(client, config.server.max_upload_bytes))
    }

    pub fn with_client(client: GeminiClient, max_upload_bytes: usize) -> Self {
        Self {
            addr: SocketAddr::from(([127, 0, 0, 1], 0)), // Will be determined at bind time
            listener: None,
            state: AppState::new(client, max_upload_bytes),
            shutdown: Arc::new(ShutdownManager::new()),
        }
    }

    /// Try to bind to `bind_addr`, falling back to incremental ports if busy.
    ///
    /// The listener is kept alive to prevent port race conditions - another process
    /// cannot claim the port between try_bind() and run().
    pub async fn try_bind(&mut self, bind_addr: &str) -> Result<SocketAddr, ServerError> {
        let bind_addr: SocketAddr = bind_addr
            .parse()
            .map_err(|e| ServerError::Bind(format!("Invalid bind address '{}': {}", bind_addr, e)))?;

        let start_port = bind_addr.port();
        let host = bind_addr.ip();

        // Port 0 asks the OS for any free port; no fallback needed.
        let last_port = if start_port == 0 {
            0
        } else {
            start_port.saturating_add(PORT_FALLBACK_RANGE)
        };

        for port in start_port..=last_port {
            let try_addr = SocketAddr::new(host, port);
            match TcpListener::bind(try_addr).await {
                Ok(listener) => {
                    let actual_addr = listener.local_addr()?;
                    self.addr = actual_addr;
                    self.listener = Some(listener);
                    ::tracing::info!("Server bound to {}", actual_addr);
                    return Ok(actual_addr);
                }
                Err(e) => {
                    ::tracing::debug!("Port {} busy: {}", port, e);
                    continue;
                }
            }
        }

        Err(ServerError::Bind(format!(
            "Could not find available port in range {}-{}",
            start_port, last_port
        )))
    }

    pub fn handle(&self) -> ServerHandle {
        ServerHandle {
            shutdown: self.shutdown.clone(),
        }
    }

    /// Run the server until shutdown is signaled.
    ///
    /// Consumes self to take ownership of the pre-bound listener.
    /// Call try_bind() before run() to bind to an available port.
    pub async fn run(self) -> Result<(), ServerError> {
        let listener = self
            .listener
            .ok_or_else(|| ServerError::Bind("try_bind() must be called before run()".to_string()))?;

        ::tracing::info!("Starting server on http://{}", self.addr);

        let app = build_router(self.state.clone());
        let make_service = app.into_make_service();
        let make_service = ConnectionCounter::new(make_service, self.shutdown.clone());

        let shutdown = self.shutdown.clone();
        axum::serve(listener, make_service)
            .with_graceful_shutdown(async move {
                if let Err(e) = shutdown.wait_for_shutdown().await {
                    ::tracing::error!("Failed to install signal handlers: {}", e);
                }
            })
            .into_future()
            .await?;

        self.shutdown.wait_for_connections(Duration::from_secs(10)).await;
        ::tracing::info!("Shut down gracefully");

        Ok(())
    }
}

#[derive(Clone)]
pub struct ServerHandle {
    shutdown: Arc<ShutdownManager>,
}

impl ServerHandle {
    pub fn shutdown(&self) {
        self.shutdown.signal_shutdown();
    }
}
