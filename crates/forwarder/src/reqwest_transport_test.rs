use super::*;
use axum::Router;
use axum::routing::{get, post};
use pokeproxy_config::UpstreamConfig;
use std::net::SocketAddr;
use std::time::Duration;
use tokio::net::TcpListener;

async fn echo(
    headers: axum::http::HeaderMap,
    body: axum::body::Bytes,
) -> impl axum::response::IntoResponse {
    let reason = headers
        .get("x-grd-reason")
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string();
    let content_type = headers
        .get("content-type")
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string();

    (
        axum::http::StatusCode::OK,
        [("x-echo-reason", reason), ("x-echo-content-type", content_type)],
        body,
    )
}

async fn broken() -> (axum::http::StatusCode, &'static str) {
    (axum::http::StatusCode::INTERNAL_SERVER_ERROR, "boom")
}

async fn redirect() -> (axum::http::StatusCode, [(&'static str, &'static str); 1], &'static str) {
    (axum::http::StatusCode::FOUND, [("location", "/target")], "moved")
}

async fn target() -> &'static str {
    "followed"
}

async fn slow() -> &'static str {
    tokio::time::sleep(Duration::from_secs(5)).await;
    "too late"
}

/// Start a downstream server on an ephemeral port
async fn start_server() -> SocketAddr {
    let app = Router::new()
        .route("/echo", post(echo))
        .route("/broken", post(broken))
        .route("/slow", post(slow))
        .route("/redirect", post(redirect))
        .route("/target", get(target).post(target));

    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("failed to bind");
    let addr = listener.local_addr().expect("failed to get addr");

    tokio::spawn(async move {
        axum::serve(listener, app).await.ok();
    });

    addr
}

fn request(url: String, reason: &'static str, body: &'static [u8]) -> OutboundRequest {
    let headers = outbound_headers(&HeaderMap::new(), reason).unwrap();
    OutboundRequest {
        url,
        headers,
        body: bytes::Bytes::from_static(body),
    }
}

// =============================================================================
// Round trips against a real server
// =============================================================================

#[tokio::test]
async fn test_send_echoes_headers_and_body() {
    let addr = start_server().await;
    let transport = ReqwestTransport::new(&UpstreamConfig::default()).unwrap();

    let response = transport
        .send(request(
            format!("http://{addr}/echo"),
            "Legendary Pokemon",
            br#"{"name":"Mewtwo"}"#,
        ))
        .await
        .unwrap();

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(&response.body[..], br#"{"name":"Mewtwo"}"#);
    assert_eq!(response.headers["x-echo-reason"], "Legendary Pokemon");
    assert_eq!(response.headers["x-echo-content-type"], "application/json");
}

#[tokio::test]
async fn test_send_passes_error_status_through() {
    let addr = start_server().await;
    let transport = ReqwestTransport::new(&UpstreamConfig::default()).unwrap();

    let response = transport
        .send(request(format!("http://{addr}/broken"), "r", b"{}"))
        .await
        .unwrap();

    assert_eq!(response.status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(response.is_error());
    assert_eq!(&response.body[..], b"boom");
}

#[tokio::test]
async fn test_send_relays_redirect() {
    let addr = start_server().await;
    let transport = ReqwestTransport::new(&UpstreamConfig::default()).unwrap();

    let response = transport
        .send(request(format!("http://{addr}/redirect"), "r", b"{}"))
        .await
        .unwrap();

    assert_eq!(response.status, StatusCode::FOUND);
    assert_eq!(response.headers["location"], "/target");
    assert_eq!(&response.body[..], b"moved");
    assert!(!response.is_error());
}

// =============================================================================
// Failure classification
// =============================================================================

#[tokio::test]
async fn test_send_connection_refused() {
    // Bind then drop to get a port nobody listens on
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let transport = ReqwestTransport::new(&UpstreamConfig::default()).unwrap();
    let err = transport
        .send(request(format!("http://{addr}/echo"), "r", b"{}"))
        .await
        .unwrap_err();

    assert!(matches!(err, TransportError::Connect(_)), "got {err:?}");
}

#[tokio::test]
async fn test_send_times_out() {
    let addr = start_server().await;
    let config = UpstreamConfig {
        timeout: Duration::from_millis(100),
        ..UpstreamConfig::default()
    };
    let transport = ReqwestTransport::new(&config).unwrap();

    let err = transport
        .send(request(format!("http://{addr}/slow"), "r", b"{}"))
        .await
        .unwrap_err();

    assert!(matches!(err, TransportError::Timeout(_)), "got {err:?}");
}

#[tokio::test]
async fn test_dispatcher_over_reqwest() {
    let addr = start_server().await;
    let transport =
        std::sync::Arc::new(ReqwestTransport::new(&UpstreamConfig::default()).unwrap());
    let dispatcher = Dispatcher::new(transport, Duration::from_secs(5));

    let mut inbound = HeaderMap::new();
    inbound.insert("x-grd-signature", HeaderValue::from_static("abc"));

    let response = dispatcher
        .dispatch(
            &format!("http://{addr}/echo"),
            bytes::Bytes::from_static(b"{}"),
            "Powerful",
            &inbound,
        )
        .await
        .unwrap();

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.headers["x-echo-reason"], "Powerful");
}
