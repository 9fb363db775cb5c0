//! Integration tests for the webhook relay router

use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use tower::ServiceExt;

use pokedex::relay::{create_router, RelayConfig, RelayServer, WebhookAck};

async fn send(router: Router, request: Request<Body>) -> (StatusCode, Vec<u8>) {
    let response = router.oneshot(request).await.unwrap();
    let status = response.status();
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, body.to_vec())
}

fn post_webhook(body: &'static str, content_type: &str) -> Request<Body> {
    Request::builder()
        .method(Method::POST)
        .uri("/webhook")
        .header(header::CONTENT_TYPE, content_type)
        .body(Body::from(body))
        .unwrap()
}

#[tokio::test]
async fn test_json_event_is_acknowledged() {
    let (status, body) = send(
        create_router(),
        post_webhook(
            r#"{"event":"favorite_added","pokemonId":25,"timestamp":"2024-05-01T12:00:00.000Z"}"#,
            "application/json",
        ),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let ack: WebhookAck = serde_json::from_slice(&body).unwrap();
    assert_eq!(ack.message, "Webhook processed successfully");
}

#[tokio::test]
async fn test_non_json_body_is_still_acknowledged() {
    let (status, body) = send(create_router(), post_webhook("not json at all", "text/plain")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        serde_json::from_slice::<WebhookAck>(&body).unwrap(),
        WebhookAck::processed()
    );
}

#[tokio::test]
async fn test_empty_body_is_acknowledged() {
    let (status, _) = send(create_router(), post_webhook("", "application/json")).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_other_routes_and_methods() {
    let get = Request::builder()
        .method(Method::GET)
        .uri("/webhook")
        .body(Body::empty())
        .unwrap();
    let (status, _) = send(create_router(), get).await;
    assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);

    let elsewhere = Request::builder()
        .method(Method::POST)
        .uri("/events")
        .body(Body::empty())
        .unwrap();
    let (status, _) = send(create_router(), elsewhere).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_cors_allows_configured_origin() {
    let config = RelayConfig::builder()
        .allowed_origin("http://localhost:4200")
        .enable_request_logging(false)
        .build()
        .unwrap();
    let router = RelayServer::new(config).unwrap().build_router().unwrap();

    let preflight = Request::builder()
        .method(Method::OPTIONS)
        .uri("/webhook")
        .header(header::ORIGIN, "http://localhost:4200")
        .header(header::ACCESS_CONTROL_REQUEST_METHOD, "POST")
        .body(Body::empty())
        .unwrap();

    let response = router.oneshot(preflight).await.unwrap();
    assert_eq!(
        response
            .headers()
            .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
            .unwrap(),
        "http://localhost:4200"
    );
}

#[tokio::test]
async fn test_cors_rejects_other_origin() {
    let router = RelayServer::new(RelayConfig::default())
        .unwrap()
        .build_router()
        .unwrap();

    let request = Request::builder()
        .method(Method::POST)
        .uri("/webhook")
        .header(header::ORIGIN, "https://evil.example")
        .body(Body::from("{}"))
        .unwrap();

    let response = router.oneshot(request).await.unwrap();
    // the event is still processed; the browser just gets no CORS grant
    assert_eq!(response.status(), StatusCode::OK);
    assert!(response
        .headers()
        .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
        .is_none());
}
