//! In-process HTTP tests against the full router.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

mod common;

use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use axum::Router;
use base64::Engine as _;
use serde_json::{json, Value};
use tower::ServiceExt;

use admitgate_gateway::{app_state::AppState, config, router};

fn app() -> (Router, AppState) {
    let cfg = config::load_from_str("version: 1\n").unwrap();
    let state = AppState::new(cfg).unwrap();
    (router::build_router(state.clone()), state)
}

async fn post(app: &Router, path: &str, body: Vec<u8>) -> (StatusCode, Value) {
    let req = Request::builder()
        .method("POST")
        .uri(path)
        .header("content-type", "application/json")
        .body(Body::from(body))
        .unwrap();
    let resp = app.clone().oneshot(req).await.unwrap();
    let status = resp.status();
    let bytes = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

#[tokio::test]
async fn healthz_is_empty_ok() {
    let (app, _) = app();
    let req = Request::builder().uri("/healthz").body(Body::empty()).unwrap();
    let resp = app.oneshot(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let bytes = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    assert!(bytes.is_empty());
}

#[tokio::test]
async fn validate_pods_denies_latest() {
    let (app, _) = app();
    let body = common::review("uid-a", "CREATE", Some(common::pod("default", &["app:latest"])), None);
    let (status, v) = post(&app, "/validate/pods", body).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(v["apiVersion"], json!("admission.k8s.io/v1"));
    assert_eq!(v["kind"], json!("AdmissionReview"));
    assert_eq!(
        v["response"],
        json!({
            "uid": "uid-a",
            "allowed": false,
            "status": { "message": "You cannot use the tag 'latest' in a container." }
        })
    );
}

#[tokio::test]
async fn mutate_pods_returns_base64_json_patch() {
    let (app, _) = app();
    let body = common::review("uid-b", "CREATE", Some(common::pod("special", &["app:1.0.0"])), None);
    let (_, v) = post(&app, "/mutate/pods", body).await;

    let resp = &v["response"];
    assert_eq!(resp["uid"], json!("uid-b"));
    assert_eq!(resp["allowed"], json!(true));
    assert_eq!(resp["patchType"], json!("JSONPatch"));

    let raw = base64::engine::general_purpose::STANDARD
        .decode(resp["patch"].as_str().unwrap())
        .unwrap();
    let patch: Value = serde_json::from_slice(&raw).unwrap();
    let ops = patch.as_array().unwrap();
    assert_eq!(ops.len(), 2);
    assert_eq!(ops[0]["op"], json!("replace"));
    assert_eq!(ops[0]["path"], json!("/spec/containers"));
    assert_eq!(ops[0]["value"][1]["name"], json!("test-sidecar"));
    assert_eq!(ops[1], json!({ "op": "add", "path": "/metadata/annotations", "value": { "origin": "fromMutation" } }));
}

#[tokio::test]
async fn unregistered_operation_denies_and_keeps_serving() {
    let (app, _) = app();
    let body = common::review("uid-c", "CONNECT", Some(json!({})), None);
    let (status, v) = post(&app, "/validate/deployments", body).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(v["response"]["uid"], json!("uid-c"));
    assert_eq!(v["response"]["allowed"], json!(false));
    assert_eq!(v["response"]["status"]["message"], json!("operation CONNECT is not registered"));

    let body = common::review("uid-c2", "CREATE", Some(common::deployment("default", json!({}))), None);
    let (_, v) = post(&app, "/validate/deployments", body).await;
    assert_eq!(v["response"]["uid"], json!("uid-c2"));
    assert_eq!(v["response"]["allowed"], json!(true));
}

#[tokio::test]
async fn malformed_body_is_answered_with_denial() {
    let (app, _) = app();
    let (status, v) = post(&app, "/validate/pods", b"{not json".to_vec()).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(v["response"]["uid"], json!(""));
    assert_eq!(v["response"]["allowed"], json!(false));
    assert_eq!(v["response"]["status"]["reason"], json!("BadRequest"));
    assert!(v["response"].get("patch").is_none());
}

#[tokio::test]
async fn malformed_object_keeps_uid() {
    let (app, _) = app();
    let bad = json!({ "spec": { "containers": 42 } });
    let body = common::review("uid-d", "CREATE", Some(bad), None);
    let (_, v) = post(&app, "/validate/pods", body).await;
    assert_eq!(v["response"]["uid"], json!("uid-d"));
    assert_eq!(v["response"]["allowed"], json!(false));
    assert!(v["response"]["status"]["message"].as_str().unwrap().contains("invalid type"));
}

#[tokio::test]
async fn unknown_webhook_path_is_not_routed() {
    let (app, _) = app();
    let req = Request::builder()
        .method("POST")
        .uri("/validate/services")
        .body(Body::from("{}"))
        .unwrap();
    let resp = app.oneshot(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn outcomes_are_counted_per_route() {
    let (app, state) = app();

    let allow = common::review("m-1", "CREATE", Some(common::pod("default", &["app:1"])), None);
    let deny = common::review("m-2", "CREATE", Some(common::pod("default", &["app:latest"])), None);
    post(&app, "/validate/pods", allow).await;
    post(&app, "/validate/pods", deny).await;
    post(&app, "/validate/pods", b"[]".to_vec()).await;

    let requests = &state.metrics().requests;
    let get = |result: &str| requests.get(&[("route", "/validate/pods"), ("result", result)]);
    assert_eq!(get("allowed"), 1);
    assert_eq!(get("denied"), 1);
    assert_eq!(get("error"), 1);

    let req = Request::builder().uri("/metrics").body(Body::empty()).unwrap();
    let resp = app.oneshot(req).await.unwrap();
    let text = String::from_utf8(to_bytes(resp.into_body(), usize::MAX).await.unwrap().to_vec()).unwrap();
    assert!(text.contains("admitgate_admission_requests_total{result=\"allowed\",route=\"/validate/pods\"} 1"));
    assert!(text.contains("# TYPE admitgate_admission_duration_micros histogram"));
}

#[tokio::test]
async fn concurrent_requests_share_the_route_table() {
    let (app, state) = app();

    let mut tasks = Vec::new();
    for i in 0..32 {
        let app = app.clone();
        tasks.push(tokio::spawn(async move {
            let image = if i % 2 == 0 { "app:latest" } else { "app:1.0.0" };
            let uid = format!("conc-{i}");
            let body = common::review(&uid, "CREATE", Some(common::pod("default", &[image])), None);
            let (status, v) = post(&app, "/validate/pods", body).await;
            assert_eq!(status, StatusCode::OK);
            assert_eq!(v["response"]["uid"], json!(uid));
            assert_eq!(v["response"]["allowed"], json!(i % 2 == 1));
        }));
    }
    for t in tasks {
        t.await.unwrap();
    }

    let requests = &state.metrics().requests;
    assert_eq!(requests.get(&[("route", "/validate/pods"), ("result", "allowed")]), 16);
    assert_eq!(requests.get(&[("route", "/validate/pods"), ("result", "denied")]), 16);
}

#[tokio::test]
async fn oversized_body_is_rejected_before_the_handler() {
    let cfg = config::load_from_str("version: 1\ngateway:\n  max_body_bytes: 1024\n").unwrap();
    let state = AppState::new(cfg).unwrap();
    let app = router::build_router(state.clone());

    let img = format!("app:{}", "1".repeat(2048));
    let body = common::review("big-1", "CREATE", Some(common::pod("default", &[img.as_str()])), None);
    assert!(body.len() > 1024);

    let req = Request::builder()
        .method("POST")
        .uri("/validate/pods")
        .header("content-type", "application/json")
        .body(Body::from(body))
        .unwrap();
    let resp = app.oneshot(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::PAYLOAD_TOO_LARGE);

    // the handler never ran, so nothing was recorded for the route
    assert_eq!(
        state.metrics().requests.get(&[("route", "/validate/pods"), ("result", "error")]),
        0
    );
}
