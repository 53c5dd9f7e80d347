//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router with the invoke and health handlers
//! - Wire up middleware (tracing, request ID, CORS, body limit)
//! - Bind server to listener
//! - Stop on the shutdown signal

use std::sync::Arc;

use axum::{
    http::{HeaderName, StatusCode},
    response::IntoResponse,
    routing::{any, get},
    Json, Router,
};
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower::ServiceBuilder;
use tower_http::{
    request_id::{PropagateRequestIdLayer, SetRequestIdLayer},
    trace::TraceLayer,
};

use crate::config::validation::HEALTH_PATH;
use crate::config::AppConfig;
use crate::http::invoke::invoke_handler;
use crate::http::request::{MakeRequestUuidV4, X_REQUEST_ID};
use crate::observability::spans::request_span;
use crate::relay::Forwarder;
use crate::security::{with_body_limit, with_cors_headers};

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub forwarder: Arc<Forwarder>,
}

impl AppState {
    pub fn new(forwarder: Forwarder) -> Self {
        Self {
            forwarder: Arc::new(forwarder),
        }
    }
}

/// HTTP server for the invoke relay.
pub struct HttpServer {
    router: Router,
    config: AppConfig,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration.
    pub fn new(config: AppConfig) -> Result<Self, reqwest::Error> {
        let forwarder = Forwarder::new(&config.relay, &config.timeouts)?;
        let router = Self::build_router(&config, AppState::new(forwarder));
        Ok(Self { router, config })
    }

    /// Build the Axum router with all middleware layers.
    pub fn build_router(config: &AppConfig, state: AppState) -> Router {
        let request_id = HeaderName::from_static(X_REQUEST_ID);

        let routes = Router::new()
            .route(&config.relay.invoke_path, any(invoke_handler))
            .route(HEALTH_PATH, get(health))
            .with_state(state);

        let routes = with_body_limit(routes, config.relay.max_body_size);
        let routes = with_cors_headers(routes);

        routes.layer(
            ServiceBuilder::new()
                .layer(SetRequestIdLayer::new(request_id.clone(), MakeRequestUuidV4))
                .layer(TraceLayer::new_for_http().make_span_with(request_span))
                .layer(PropagateRequestIdLayer::new(request_id)),
        )
    }

    /// Run the server until `shutdown` fires.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            invoke_path = %self.config.relay.invoke_path,
            "HTTP server starting"
        );

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
                tracing::info!("Shutdown signal received");
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }

    /// A clone of the router, for driving it without a socket.
    pub fn router(&self) -> Router {
        self.router.clone()
    }
}

/// `GET /health`: liveness probe.
async fn health() -> impl IntoResponse {
    (StatusCode::OK, Json(serde_json::json!({"status": "ok"})))
}
