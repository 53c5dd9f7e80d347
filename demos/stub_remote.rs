//! Offline stand-in for the remote prescription API.
//!
//! Run with `cargo run --example stub_remote`, start `rx-relay`, then
//! `rx-console --base-url http://127.0.0.1:8081 all`.

use axum::{http::StatusCode, routing::post, Json, Router};
use serde_json::{json, Value};
use std::net::SocketAddr;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let app = Router::new()
        .route(
            "/prescriptions/emit",
            post(|Json(_): Json<Value>| async {
                (StatusCode::ACCEPTED, Json(json!({"transactionId": "tx-demo-001"})))
            }),
        )
        .route(
            "/pharmacies/search",
            post(|| async {
                Json(json!({"pharmacies": [{"pharmacyId": "PHARM-01", "distanceKM": 1.2}]}))
            }),
        )
        .route(
            "/stock/check",
            post(|| async {
                Json(json!({"available": true, "items": [
                    {"medicineCode": "AMOX500", "available": 12},
                    {"medicineCode": "IBU400", "available": 0}
                ]}))
            }),
        )
        .route(
            "/redemptions/process",
            post(|| async { Json(json!({"status": "DISPENSED"})) }),
        );

    let addr = SocketAddr::from(([127, 0, 0, 1], 8081));
    println!("Stub remote API listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}
