use std::future::IntoFuture;
use std::net::SocketAddr;
use std::sync::Arc;

use tokio::net::TcpListener;

use crate::api::cors::AllowedOrigins;
use crate::api::error::ServeError;
use crate::api::router::{build_router, AppState};
use crate::api::shutdown::ShutdownManager;
use crate::config::{Config, ConfigError};
use crate::store::{open_store, CounterStore};

pub struct CounterServer {
    pub addr: SocketAddr,
    /// The bound listener, kept alive so the port cannot be taken between
    /// try_bind() and run().
    listener: Option<TcpListener>,
    state: AppState,
    origins: AllowedOrigins,
    shutdown: Arc<ShutdownManager>,
}

impl CounterServer {
    pub fn new(config: &Config, store: Arc<dyn CounterStore>) -> Result<Self, ConfigError> {
        let addr = config.bind_addr()?;
        let origins = AllowedOrigins::parse(&config.server.cors_origin)
            .map_err(|message| ConfigError::ValidationError { message })?;
        Ok(Self {
            addr,
            listener: None,
            state: AppState::new(store),
            origins,
            shutdown: Arc::new(ShutdownManager::new()),
        })
    }

    /// Bind the configured address. Port 0 picks a free port; the actual
    /// address is returned and stored in `addr`.
    pub async fn try_bind(&mut self) -> Result<SocketAddr, std::io::Error> {
        let listener = TcpListener::bind(self.addr).await?;
        let actual_addr = listener.local_addr()?;
        self.addr = actual_addr;
        self.listener = Some(listener);
        tracing::info!("Counter API bound to {}", actual_addr);
        Ok(actual_addr)
    }

    pub fn handle(&self) -> ServerHandle {
        ServerHandle {
            shutdown: self.shutdown.clone(),
        }
    }

    /// Serve until shutdown is signalled, then drain in-flight requests.
    ///
    /// Binds first if try_bind() was not called.
    pub async fn run(mut self) -> Result<(), std::io::Error> {
        if self.listener.is_none() {
            self.try_bind().await?;
        }
        let Some(listener) = self.listener.take() else {
            return Err(std::io::Error::other("listener missing after bind"));
        };

        tracing::info!("Counter API listening on {}", self.addr);

        let app = build_router(self.state.clone(), &self.origins);
        let shutdown = self.shutdown.clone();
        axum::serve(listener, app)
            .with_graceful_shutdown(async move {
                shutdown.wait_for_shutdown().await;
            })
            .into_future()
            .await?;

        tracing::info!("Counter API stopped");
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

/// Full `serve` startup sequence.
///
/// Storage problems at startup are fatal: the store must open, the record
/// must be initialized, and it must be readable before the port is bound.
pub async fn serve(config: &Config) -> Result<(), ServeError> {
    let store = open_store(&config.storage.url, &config.storage.redis_prefix).await?;
    store.ensure_initialized().await?;
    let record = store.record().await?;
    tracing::info!(
        backend = store.backend(),
        value = record.value,
        updated_at = %record.updated_at,
        "Counter initialized"
    );

    let mut server = CounterServer::new(config, store.clone())?;
    server.try_bind().await?;
    let result = server.run().await;

    if let Err(err) = store.close().await {
        tracing::warn!(error = %err, "Failed to close counter store");
    }
    result.map_err(ServeError::from)
}
