//! ServerBuilder for fluent API to build HTTP servers

use super::exposure::RestExposure;
use super::host::ServerHost;
use crate::core::{EventBus, RecordHook, RecordStore};
use anyhow::Result;
use axum::Router;
use std::sync::Arc;
use tokio::net::TcpListener;

/// Builder for creating the HTTP server
///
/// # Example
///
/// ```ignore
/// let app = ServerBuilder::new()
///     .with_store(InMemoryRecordStore::new())
///     .with_hooks(default_hooks())
///     .build()?;
/// ```
pub struct ServerBuilder {
    store: Option<Arc<dyn RecordStore>>,
    hooks: Vec<Arc<dyn RecordHook>>,
    custom_routes: Vec<Router>,
    event_bus_capacity: Option<usize>,
}

impl ServerBuilder {
    pub fn new() -> Self {
        Self {
            store: None,
            hooks: Vec::new(),
            custom_routes: Vec::new(),
            event_bus_capacity: None,
        }
    }

    /// Set the record store (required)
    pub fn with_store(mut self, store: impl RecordStore + 'static) -> Self {
        self.store = Some(Arc::new(store));
        self
    }

    /// Set the record store from a shared handle
    pub fn with_shared_store(mut self, store: Arc<dyn RecordStore>) -> Self {
        self.store = Some(store);
        self
    }

    /// Register a single hook; hooks run in registration order
    pub fn register_hook(mut self, hook: impl RecordHook + 'static) -> Self {
        self.hooks.push(Arc::new(hook));
        self
    }

    /// Register several hooks at once
    pub fn with_hooks(mut self, hooks: impl IntoIterator<Item = Arc<dyn RecordHook>>) -> Self {
        self.hooks.extend(hooks);
        self
    }

    /// Add routes that don't belong to the record API
    pub fn with_custom_routes(mut self, routes: Router) -> Self {
        self.custom_routes.push(routes);
        self
    }

    /// Broadcast committed mutations on an event bus of the given capacity
    ///
    /// The capacity must be non-zero; `build_host` fails otherwise.
    pub fn with_event_bus(mut self, capacity: usize) -> Self {
        self.event_bus_capacity = Some(capacity);
        self
    }

    /// Build the transport-agnostic host
    pub fn build_host(mut self) -> Result<ServerHost> {
        let store = self
            .store
            .take()
            .ok_or_else(|| anyhow::anyhow!("RecordStore is required. Call .with_store()"))?;

        if self.event_bus_capacity == Some(0) {
            anyhow::bail!("Event bus capacity must be greater than zero");
        }

        let mut host = std::mem::take(&mut self.hooks)
            .into_iter()
            .fold(ServerHost::new(store), |host, hook| host.with_hook(hook));

        if let Some(capacity) = self.event_bus_capacity {
            host = host.with_event_bus(EventBus::new(capacity));
        }

        tracing::info!(hooks = ?host.hooks.names(), "server host ready");
        Ok(host)
    }

    /// Build the final REST router
    pub fn build(mut self) -> Result<Router> {
        let custom_routes = std::mem::take(&mut self.custom_routes);
        let host = Arc::new(self.build_host()?);
        RestExposure::build_router(host, custom_routes)
    }

    /// Serve the application with graceful shutdown
    ///
    /// Handles SIGTERM and SIGINT (Ctrl+C).
    pub async fn serve(self, addr: &str) -> Result<()> {
        let app = self.build()?;
        let listener = TcpListener::bind(addr).await?;

        tracing::info!("Server listening on {}", addr);

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        tracing::info!("Server shutdown complete");
        Ok(())
    }
}

impl Default for ServerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "failed to install Ctrl+C handler");
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => tracing::error!(error = %e, "failed to install SIGTERM handler"),
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
