//! Integration tests for the signed-URL issuance endpoint.

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use serde_json::Value;
use tower::ServiceExt;

use xftts_gateway::config::ServerConfig;
use xftts_gateway::core::tts::xunfei::auth::{sign, signature_origin};
use xftts_gateway::routes;
use xftts_gateway::state::AppState;

fn test_config(
    api_key: Option<&str>,
    api_secret: Option<&str>,
    app_id: Option<&str>,
) -> ServerConfig {
    let mut config = ServerConfig::from_lookup(|_| None).unwrap();
    config.xunfei_api_key = api_key.map(str::to_string);
    config.xunfei_api_secret = api_secret.map(str::to_string);
    config.xunfei_app_id = app_id.map(str::to_string);
    config
}

fn app(config: ServerConfig) -> Router {
    // Same assembly as main.rs: public health route plus the API router.
    Router::new()
        .route(
            "/",
            axum::routing::get(xftts_gateway::handlers::api::health_check),
        )
        .merge(routes::api::create_api_router())
        .with_state(AppState::new(config))
}

async fn get_json(app: Router, uri: &str) -> (StatusCode, Value) {
    let response = app
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body = serde_json::from_slice(&bytes).unwrap();
    (status, body)
}

#[tokio::test]
async fn health_check_is_public() {
    let app = app(test_config(None, None, None));
    let (status, body) = get_json(app, "/").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
}

#[tokio::test]
async fn issues_signed_session_url() {
    let app = app(test_config(Some("key-id"), Some("key-secret"), Some("app1")));
    let (status, body) = get_json(app, "/api/xunfei/tts-ws-url").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["appId"], "app1");

    let ws_url = body["wsUrl"].as_str().unwrap();
    assert!(ws_url.starts_with("wss://tts-api.xfyun.cn/v2/tts?authorization="));
    assert!(ws_url.ends_with("&host=tts-api.xfyun.cn"));
}

#[tokio::test]
async fn issued_url_signature_is_verifiable() {
    use base64::Engine;
    use base64::engine::general_purpose::STANDARD as BASE64;

    let app = app(test_config(Some("key-id"), Some("key-secret"), Some("app1")));
    let (_, body) = get_json(app, "/api/xunfei/tts-ws-url").await;
    let ws_url = body["wsUrl"].as_str().unwrap();

    // Carve the three literal query components back out.
    let query = ws_url.split_once('?').unwrap().1;
    let (authorization, rest) = query
        .strip_prefix("authorization=")
        .unwrap()
        .split_once("&date=")
        .unwrap();
    let (date, host) = rest.split_once("&host=").unwrap();
    assert_eq!(host, "tts-api.xfyun.cn");

    // The signature must reproduce from the date the server placed in the
    // query, proving the signed date and the emitted date are identical.
    let decoded = String::from_utf8(BASE64.decode(authorization).unwrap()).unwrap();
    let expected = sign(&signature_origin(date), "key-secret");
    assert!(
        decoded.contains(&format!("signature=\"{expected}\"")),
        "authorization did not verify: {decoded}"
    );
    assert!(decoded.contains("api_key=\"key-id\""));
}

#[tokio::test]
async fn missing_all_credentials_yields_500_report() {
    let app = app(test_config(None, None, None));
    let (status, body) = get_json(app, "/api/xunfei/tts-ws-url").await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], "API credentials not configured on server.");
    assert_eq!(body["missing"]["apiKey"], true);
    assert_eq!(body["missing"]["apiSecret"], true);
    assert_eq!(body["missing"]["appId"], true);
}

#[tokio::test]
async fn missing_secret_only_is_named_exactly() {
    let app = app(test_config(Some("key-id"), None, Some("app1")));
    let (status, body) = get_json(app, "/api/xunfei/tts-ws-url").await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["missing"]["apiKey"], false);
    assert_eq!(body["missing"]["apiSecret"], true);
    assert_eq!(body["missing"]["appId"], false);
}

#[tokio::test]
async fn missing_two_credentials_are_both_named() {
    let app = app(test_config(None, Some("key-secret"), None));
    let (status, body) = get_json(app, "/api/xunfei/tts-ws-url").await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["missing"]["apiKey"], true);
    assert_eq!(body["missing"]["apiSecret"], false);
    assert_eq!(body["missing"]["appId"], true);
}

#[tokio::test]
async fn voice_catalog_is_served() {
    let app = app(test_config(None, None, None));
    let (status, body) = get_json(app, "/api/xunfei/voices").await;

    assert_eq!(status, StatusCode::OK);
    let voices = body.as_array().unwrap();
    assert_eq!(voices.len(), 6);
    assert_eq!(voices[0]["value"], "xiaoyan");
    assert!(voices.iter().any(|v| v["value"] == "catherine"));
}
