//! Wire-level behavior of the invoke relay against a stub remote.

use std::time::Duration;

use axum::http::StatusCode;
use serde_json::{json, Value};

mod common;

async fn invoke(relay: std::net::SocketAddr, instruction: &Value) -> (StatusCode, reqwest::header::HeaderMap, Value) {
    let res = common::client()
        .post(format!("http://{relay}/api/invoke"))
        .json(instruction)
        .send()
        .await
        .expect("relay unreachable");
    let status = res.status();
    let headers = res.headers().clone();
    let body = res.json::<Value>().await.expect("relay replied with non-JSON");
    (status, headers, body)
}

fn assert_cors(headers: &reqwest::header::HeaderMap) {
    assert_eq!(headers["access-control-allow-origin"], "*");
    assert_eq!(headers["access-control-allow-methods"], "POST, OPTIONS");
    assert_eq!(headers["access-control-allow-headers"], "Content-Type");
}

#[tokio::test]
async fn test_forwards_single_json_post_and_wraps_reply() {
    let (remote, calls) = common::start_stub_remote(202, r#"{"transactionId":"tx-1"}"#, Duration::ZERO).await;
    let (relay, _shutdown) = common::start_relay().await;

    let (status, headers, body) = invoke(
        relay,
        &json!({
            "baseUrl": format!("http://{remote}"),
            "path": "/prescriptions/emit",
            "body": {"patientName": "Maria Lopez", "items": [{"quantity": 2}]},
        }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_cors(&headers);
    assert_eq!(
        body,
        json!({"ok": true, "awsStatus": 202, "awsBody": {"transactionId": "tx-1"}})
    );

    let calls = calls.lock().unwrap();
    assert_eq!(calls.len(), 1, "exactly one outbound call");
    assert_eq!(calls[0].method, axum::http::Method::POST);
    assert_eq!(calls[0].path, "/prescriptions/emit");
    assert_eq!(calls[0].content_type.as_deref(), Some("application/json"));
    assert_eq!(
        serde_json::from_str::<Value>(&calls[0].body).unwrap(),
        json!({"patientName": "Maria Lopez", "items": [{"quantity": 2}]})
    );
}

#[tokio::test]
async fn test_remote_failures_are_wrapped_not_surfaced() {
    let (relay, _shutdown) = common::start_relay().await;

    for remote_status in [400u16, 404, 422, 500, 503] {
        let (remote, _) = common::start_stub_remote(remote_status, r#"{"message":"rejected"}"#, Duration::ZERO).await;
        let (status, _, body) = invoke(
            relay,
            &json!({"baseUrl": format!("http://{remote}"), "path": "/stock/check", "body": {}}),
        )
        .await;

        assert_eq!(status, StatusCode::OK, "relay status for remote {remote_status}");
        assert_eq!(body["ok"], json!(true));
        assert_eq!(body["awsStatus"], json!(remote_status));
        assert_eq!(body["awsBody"], json!({"message": "rejected"}));
    }
}

#[tokio::test]
async fn test_non_json_reply_is_returned_verbatim() {
    let raw = "<html><body>upstream {broken</body></html>";
    let (remote, _) = common::start_stub_remote(502, raw, Duration::ZERO).await;
    let (relay, _shutdown) = common::start_relay().await;

    let (_, _, body) = invoke(
        relay,
        &json!({"baseUrl": format!("http://{remote}"), "path": "/x"}),
    )
    .await;

    assert_eq!(body["awsStatus"], json!(502));
    assert_eq!(body["awsBody"], json!(raw));
}

#[tokio::test]
async fn test_absent_or_null_body_is_sent_as_empty_object() {
    let (remote, calls) = common::start_stub_remote(200, "{}", Duration::ZERO).await;
    let (relay, _shutdown) = common::start_relay().await;
    let base = format!("http://{remote}");

    invoke(relay, &json!({"baseUrl": base, "path": "/a"})).await;
    invoke(relay, &json!({"baseUrl": base, "path": "/b", "body": null})).await;

    let calls = calls.lock().unwrap();
    assert_eq!(calls.len(), 2);
    assert!(calls.iter().all(|c| c.body == "{}"));
}

#[tokio::test]
async fn test_target_is_base_url_plus_path() {
    let (remote, calls) = common::start_stub_remote(200, "{}", Duration::ZERO).await;
    let (relay, _shutdown) = common::start_relay().await;

    invoke(
        relay,
        &json!({"baseUrl": format!("http://{remote}/prod"), "path": "/redemptions/process"}),
    )
    .await;

    assert_eq!(calls.lock().unwrap()[0].path, "/prod/redemptions/process");
}

#[tokio::test]
async fn test_unreachable_remote_is_proxy_error() {
    let (relay, _shutdown) = common::start_relay().await;
    let closed = common::closed_addr();

    let (status, headers, body) = invoke(
        relay,
        &json!({"baseUrl": format!("http://{closed}"), "path": "/prescriptions/emit"}),
    )
    .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_cors(&headers);
    assert_eq!(body["ok"], json!(false));
    assert_eq!(body["error"], json!("Proxy error"));
    assert!(body["details"].as_str().is_some_and(|d| !d.is_empty()));
}

#[tokio::test]
async fn test_missing_target_is_rejected_for_every_permutation() {
    let (relay, _shutdown) = common::start_relay().await;

    let permutations = [
        json!({}),
        json!({"body": {"a": 1}}),
        json!({"baseUrl": "http://127.0.0.1:1"}),
        json!({"baseUrl": "http://127.0.0.1:1", "body": {"a": 1}}),
        json!({"path": "/p"}),
        json!({"path": "/p", "body": null}),
        json!({"baseUrl": "", "path": "/p"}),
        json!({"baseUrl": "http://127.0.0.1:1", "path": ""}),
    ];

    for instruction in permutations {
        let (status, headers, body) = invoke(relay, &instruction).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{instruction}");
        assert_cors(&headers);
        assert_eq!(body, json!({"error": "Missing baseUrl or path"}));
    }
}

#[tokio::test]
async fn test_preflight_and_method_guard() {
    let (relay, _shutdown) = common::start_relay().await;
    let url = format!("http://{relay}/api/invoke");
    let client = common::client();

    let res = client
        .request(reqwest::Method::OPTIONS, &url)
        .header("Origin", "http://localhost:5173")
        .header("Access-Control-Request-Method", "POST")
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::NO_CONTENT);
    assert_cors(res.headers());
    assert!(res.bytes().await.unwrap().is_empty());

    for method in [reqwest::Method::GET, reqwest::Method::PUT, reqwest::Method::DELETE] {
        let res = client.request(method.clone(), &url).send().await.unwrap();
        assert_eq!(res.status(), StatusCode::METHOD_NOT_ALLOWED, "{method}");
        assert_cors(res.headers());
        assert_eq!(
            res.json::<Value>().await.unwrap(),
            json!({"error": "Method not allowed"})
        );
    }
}

#[tokio::test]
async fn test_shutdown_lets_in_flight_invocation_finish() {
    let (remote, _) = common::start_stub_remote(202, r#"{"transactionId":"tx-9"}"#, Duration::from_millis(400)).await;
    let (relay, shutdown) = common::start_relay().await;

    let pending = tokio::spawn(async move {
        invoke(
            relay,
            &json!({"baseUrl": format!("http://{remote}"), "path": "/prescriptions/emit"}),
        )
        .await
    });
    tokio::time::sleep(Duration::from_millis(100)).await;

    shutdown.trigger(rx_relay::lifecycle::ShutdownReason::Requested);
    assert!(shutdown.is_triggered());

    let (status, _, body) = pending.await.unwrap();
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["awsBody"], json!({"transactionId": "tx-9"}));
}
