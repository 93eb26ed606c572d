//! Tests for the HTTP trace endpoint, driven through the router with
//! `tower::ServiceExt::oneshot` so no listener is needed for the endpoint itself.

use axum::{
    body::{to_bytes, Body},
    http::{Request, StatusCode},
    response::Redirect,
    routing::get,
    Router,
};
use httptest::{matchers::*, responders::*, Expectation, Server};
use serde_json::Value;
use tokio::net::TcpListener;
use tower::ServiceExt;

use redirect_trace::server::{router, ServerState};
use redirect_trace::RedirectTracer;

fn app() -> Router {
    let tracer = RedirectTracer::with_default_client().expect("Failed to create redirect client");
    router(ServerState::new(tracer))
}

async fn post_trace(body: &str) -> (StatusCode, Value) {
    let request = Request::post("/api/trace")
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .expect("Failed to build request");

    let response = app().oneshot(request).await.expect("router is infallible");
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("Failed to read response body");
    let json = serde_json::from_slice(&bytes).expect("response body should be JSON");
    (status, json)
}

#[tokio::test]
async fn test_missing_url_is_bad_request() {
    let (status, body) = post_trace(r#"{"options":{"maxRedirects":2}}"#).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "URL is required");
}

#[tokio::test]
async fn test_malformed_body_is_bad_request() {
    let (status, body) = post_trace("{not json").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"]
        .as_str()
        .expect("error string")
        .starts_with("Invalid request body"));
}

#[tokio::test]
async fn test_empty_url_returns_result_with_error() {
    let (status, body) = post_trace(r#"{"url":""}"#).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["redirectCount"], 0);
    assert_eq!(body["steps"].as_array().map(Vec::len), Some(0));
    assert!(body["error"]
        .as_str()
        .expect("error string")
        .starts_with("Invalid URL"));
}

#[tokio::test]
async fn test_unreachable_url_returns_result_with_error() {
    // Bind then drop to get a port nothing listens on
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("addr");
    drop(listener);

    let (status, body) = post_trace(&format!(r#"{{"url":"http://{}/"}}"#, addr)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["steps"].as_array().map(Vec::len), Some(0));
    assert_eq!(body["finalUrl"], format!("http://{}/", addr));
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn test_trace_result_shape() {
    let server = Server::run();
    server.expect(
        Expectation::matching(request::method_path("GET", "/old"))
            .respond_with(status_code(301).append_header("Location", "/new")),
    );
    server.expect(
        Expectation::matching(request::method_path("GET", "/new"))
            .respond_with(status_code(200).body("ok")),
    );

    let url = format!("http://{}/old", server.addr());
    let (status, body) = post_trace(&format!(r#"{{"url":"{}"}}"#, url)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["initialUrl"], url);
    assert_eq!(body["finalUrl"], format!("http://{}/new", server.addr()));
    assert_eq!(body["redirectCount"], 1);
    assert!(body["totalTime"].is_u64());
    assert!(body.get("error").is_none());

    let steps = body["steps"].as_array().expect("steps array");
    assert_eq!(steps.len(), 2);
    assert_eq!(steps[0]["statusCode"], 301);
    assert_eq!(steps[0]["statusText"], "Moved Permanently");
    assert_eq!(steps[0]["location"], "/new");
    assert_eq!(steps[0]["headers"]["location"], "/new");
    assert!(steps[0]["timing"]["duration"].is_i64());
    assert_eq!(steps[1]["statusCode"], 200);
    assert!(steps[1].get("location").is_none());
}

#[tokio::test]
async fn test_request_options_override_defaults() {
    let server = Server::run();
    server.expect(
        Expectation::matching(request::method_path("GET", "/"))
            .respond_with(status_code(302).append_header("Location", "/elsewhere")),
    );

    let url = format!("http://{}/", server.addr());
    let (status, body) = post_trace(&format!(
        r#"{{"url":"{}","options":{{"followRedirects":false}}}}"#,
        url
    ))
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["steps"].as_array().map(Vec::len), Some(1));
    assert_eq!(body["redirectCount"], 0);
    assert_eq!(body["finalUrl"], url);
}

#[tokio::test]
async fn test_redirect_limit_reported_in_body() {
    let redirecting = Router::new()
        .route("/a", get(|| async { Redirect::temporary("/b") }))
        .route("/b", get(|| async { Redirect::temporary("/c") }))
        .route("/c", get(|| async { "end" }));
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("addr");
    tokio::spawn(async move {
        axum::serve(listener, redirecting).await.ok();
    });

    let (status, body) = post_trace(&format!(
        r#"{{"url":"http://{}/a","options":{{"maxRedirects":1}}}}"#,
        addr
    ))
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["error"], "Maximum number of redirects (1) reached");
    assert_eq!(body["redirectCount"], 1);
    assert_eq!(body["steps"].as_array().map(Vec::len), Some(2));
}

#[tokio::test]
async fn test_health() {
    let request = Request::get("/health")
        .body(Body::empty())
        .expect("Failed to build request");
    let response = app().oneshot(request).await.expect("router is infallible");
    assert_eq!(response.status(), StatusCode::OK);

    let bytes = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("Failed to read response body");
    assert_eq!(&bytes[..], b"ok");
}

#[tokio::test]
async fn test_unknown_route_is_not_found() {
    let request = Request::get("/nope")
        .body(Body::empty())
        .expect("Failed to build request");
    let response = app().oneshot(request).await.expect("router is infallible");
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
