//! Axum server setup
//!
//! Server skeleton with:
//! - Tracing middleware
//! - Frontend fallback
//! - Graceful shutdown on SIGTERM/Ctrl+C

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

use super::error::ApiError;
use super::routes;
use crate::config::ServerConfig;
use crate::db::{StoreError, TodoStore};

/// Shared application state
pub struct AppState {
    store: Box<dyn TodoStore>,
    store_timeout: Duration,
}

impl AppState {
    pub fn new(store: Box<dyn TodoStore>, store_timeout: Duration) -> Self {
        Self {
            store,
            store_timeout,
        }
    }

    pub fn store(&self) -> &dyn TodoStore {
        self.store.as_ref()
    }

    /// Run a store call under the request deadline.
    ///
    /// On expiry the call is dropped, which cancels the in-flight query.
    /// Pool checkout shares the same budget, so a checkout that times out
    /// is reported as the deadline, not as a store failure.
    pub async fn with_deadline<T>(
        &self,
        call: impl Future<Output = Result<T, StoreError>>,
    ) -> Result<T, ApiError> {
        match tokio::time::timeout(self.store_timeout, call).await {
            Ok(Err(StoreError::Sqlx(sqlx::Error::PoolTimedOut))) | Err(_) => {
                Err(ApiError::Timeout {
                    after: self.store_timeout,
                })
            }
            Ok(result) => result.map_err(ApiError::from),
        }
    }
}

/// Build the application router.
pub fn build_router(store: Box<dyn TodoStore>, config: &ServerConfig) -> Router {
    let state = AppState::new(store, config.store_timeout);

    Router::new()
        .merge(routes::health::router())
        .merge(routes::todos::router())
        .fallback_service(routes::assets::service(&config.public_dir))
        .layer(TraceLayer::new_for_http())
        .with_state(Arc::new(state))
}

/// Run the HTTP server until a shutdown signal arrives.
///
/// # Example
///
/// ```ignore
/// let store = connect(&config.database).await?;
/// run_server(store, config.server).await?;
/// ```
pub async fn run_server(store: Box<dyn TodoStore>, config: ServerConfig) -> Result<(), ServerError> {
    if !config.public_dir.is_dir() {
        tracing::warn!(
            path = %config.public_dir.display(),
            "Frontend directory not found, only the API will be useful"
        );
    }

    let app = build_router(store, &config);

    // Bind listener
    let listener = TcpListener::bind(config.bind_addr).await?;
    tracing::info!("Server listening on {}", config.bind_addr);

    // Run with graceful shutdown
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server shutdown complete");
    Ok(())
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM).
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C, starting shutdown");
        }
        _ = terminate => {
            tracing::info!("Received SIGTERM, starting shutdown");
        }
    }
}

/// Server error type
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::SqliteTodoStore;

    #[tokio::test]
    async fn deadline_passes_results_through() {
        let store = SqliteTodoStore::in_memory().await.unwrap();
        let state = AppState::new(Box::new(store), Duration::from_secs(5));

        let todos = state.with_deadline(state.store().list()).await.unwrap();
        assert!(todos.is_empty());
    }

    #[tokio::test]
    async fn deadline_expires_on_slow_calls() {
        let store = SqliteTodoStore::in_memory().await.unwrap();
        let state = AppState::new(Box::new(store), Duration::from_millis(10));

        let slow = async {
            tokio::time::sleep(Duration::from_secs(60)).await;
            Ok::<_, StoreError>(())
        };

        let err = state.with_deadline(slow).await.unwrap_err();
        assert!(matches!(err, ApiError::Timeout { after } if after == Duration::from_millis(10)));
    }

    #[tokio::test]
    async fn pool_checkout_timeout_counts_as_deadline() {
        let store = SqliteTodoStore::in_memory().await.unwrap();
        let state = AppState::new(Box::new(store), Duration::from_secs(5));

        let exhausted = async { Err::<(), _>(StoreError::from(sqlx::Error::PoolTimedOut)) };

        let err = state.with_deadline(exhausted).await.unwrap_err();
        assert!(matches!(err, ApiError::Timeout { .. }));
    }

    #[tokio::test]
    async fn other_store_errors_stay_store_errors() {
        let store = SqliteTodoStore::in_memory().await.unwrap();
        let state = AppState::new(Box::new(store), Duration::from_secs(5));

        let closed = async { Err::<(), _>(StoreError::from(sqlx::Error::PoolClosed)) };

        let err = state.with_deadline(closed).await.unwrap_err();
        assert!(matches!(err, ApiError::Store(_)));
    }
}
