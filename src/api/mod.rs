//! HTTP API server for the help widget

pub mod health;
pub mod help;

use std::sync::Arc;

use axum::Router;
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::engine::Engine;
use crate::scheduler::ResponseScheduler;
use crate::Result;

/// Shared state for API handlers
#[derive(Debug, Clone)]
pub struct ApiState {
    pub scheduler: ResponseScheduler,
}

impl ApiState {
    /// Engine behind the scheduler
    #[must_use]
    pub fn engine(&self) -> &Engine {
        self.scheduler.engine()
    }
}

/// Build the router with all routes
///
/// Every request is an independent turn; no conversation state is kept
/// between requests.
pub fn router(state: Arc<ApiState>) -> Router {
    // The widget is embedded in lesson pages on other origins
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .nest("/api/help", help::router(state))
        .merge(health::router())
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}

/// HTTP API server
#[derive(Debug)]
pub struct ApiServer {
    state: Arc<ApiState>,
    port: u16,
}

impl ApiServer {
    /// Create a server answering with `scheduler`
    #[must_use]
    pub fn new(scheduler: ResponseScheduler, port: u16) -> Self {
        Self {
            state: Arc::new(ApiState { scheduler }),
            port,
        }
    }

    /// Run the API server
    ///
    /// # Errors
    ///
    /// Returns error if server fails to bind or run
    pub async fn run(self) -> Result<()> {
        let addr = format!("0.0.0.0:{}", self.port);
        let listener = TcpListener::bind(&addr)
            .await
            .map_err(|e| crate::Error::Config(format!("failed to bind API server: {e}")))?;

        tracing::info!(port = self.port, "API server listening");

        axum::serve(listener, router(self.state))
            .await
            .map_err(|e| crate::Error::Config(format!("API server error: {e}")))?;

        Ok(())
    }
}
