use super::*;
use axum::body::Body;
use axum::http::Request;
use tower::ServiceExt;

use crate::config::ServerConfig;

#[tokio::test]
async fn healthz_returns_ok() {
    let state = AppState::new(&ServerConfig::default()).unwrap();
    let response = api_routes(state)
        .oneshot(Request::get("/healthz").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn unknown_api_path_is_not_found() {
    let state = AppState::new(&ServerConfig::default()).unwrap();
    let response = api_routes(state)
        .oneshot(Request::get("/api/nope").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn messages_route_rejects_post() {
    let state = AppState::new(&ServerConfig::default()).unwrap();
    let response = api_routes(state)
        .oneshot(Request::post("/api/messages").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
}
