//! Shared utilities for integration testing.

use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::{
    body::Bytes,
    http::{HeaderMap, Method, StatusCode, Uri},
    Router,
};
use rx_relay::config::AppConfig;
use rx_relay::http::HttpServer;
use rx_relay::lifecycle::Shutdown;
use tokio::net::TcpListener;

/// One call received by the stub remote.
#[derive(Debug, Clone)]
#[allow(dead_code)]
pub struct Captured {
    pub method: Method,
    pub path: String,
    pub content_type: Option<String>,
    pub body: String,
}

/// Start a stub remote on an ephemeral port that answers every request
/// with `status` and `body`. Returns its address and a record of calls.
pub async fn start_stub_remote(
    status: u16,
    body: &'static str,
    delay: Duration,
) -> (SocketAddr, Arc<Mutex<Vec<Captured>>>) {
    let calls = Arc::new(Mutex::new(Vec::new()));
    let recorded = calls.clone();

    let app = Router::new().fallback(move |method: Method, uri: Uri, headers: HeaderMap, raw: Bytes| {
        let recorded = recorded.clone();
        async move {
            recorded.lock().unwrap().push(Captured {
                method,
                path: uri.path().to_string(),
                content_type: headers
                    .get("content-type")
                    .and_then(|v| v.to_str().ok())
                    .map(str::to_string),
                body: String::from_utf8_lossy(&raw).into_owned(),
            });
            if !delay.is_zero() {
                tokio::time::sleep(delay).await;
            }
            (StatusCode::from_u16(status).unwrap(), body)
        }
    });

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });

    (addr, calls)
}

/// Start the relay on an ephemeral port. Keep the returned `Shutdown`
/// alive for as long as the relay should run.
pub async fn start_relay() -> (SocketAddr, Shutdown) {
    let mut config = AppConfig::default();
    config.relay.use_env_proxy = false;

    let server = HttpServer::new(config).unwrap();
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let shutdown = Shutdown::new();
    let server_shutdown = shutdown.subscribe();
    tokio::spawn(async move {
        let _ = server.run(listener, server_shutdown).await;
    });

    (addr, shutdown)
}

/// An address nothing is listening on.
#[allow(dead_code)]
pub fn closed_addr() -> SocketAddr {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    listener.local_addr().unwrap()
}

pub fn client() -> reqwest::Client {
    reqwest::Client::builder().no_proxy().build().unwrap()
}
