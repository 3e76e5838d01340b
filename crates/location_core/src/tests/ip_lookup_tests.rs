use super::*;
use axum::{http::StatusCode as HttpStatus, routing::get, Json, Router};
use serde_json::{json, Value};
use shared::error::PositionErrorCode;
use tokio::net::TcpListener;

async fn serve(router: Router) -> Url {
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("local addr");
    tokio::spawn(async move {
        axum::serve(listener, router).await.expect("serve");
    });
    Url::parse(&format!("http://{addr}/json")).expect("endpoint url")
}

async fn serve_json(status: HttpStatus, body: Value) -> Url {
    serve(Router::new().route(
        "/json",
        get(move || {
            let body = body.clone();
            async move { (status, Json(body)) }
        }),
    ))
    .await
}

fn provider(endpoint: Url) -> IpLookupProvider {
    IpLookupProvider::new(endpoint, Duration::from_secs(5)).expect("provider")
}

#[tokio::test]
async fn resolves_position_from_success_payload() {
    let endpoint = serve_json(
        HttpStatus::OK,
        json!({ "status": "success", "lat": 10.0, "lon": 20.0, "city": "Somewhere" }),
    )
    .await;

    let position = provider(endpoint)
        .current_position()
        .await
        .expect("position");

    assert_eq!(position.coordinate, Coordinate::new(10.0, 20.0).expect("coordinate"));
    assert_eq!(position.source, "ip_lookup");
    assert_eq!(position.accuracy_m, None);
}

#[tokio::test]
async fn keeps_accuracy_when_endpoint_reports_it() {
    let endpoint = serve_json(
        HttpStatus::OK,
        json!({ "lat": -34.6037, "lon": -58.3816, "accuracy": 5000.0 }),
    )
    .await;

    let position = provider(endpoint)
        .current_position()
        .await
        .expect("position");

    assert_eq!(position.accuracy_m, Some(5000.0));
}

#[tokio::test]
async fn fail_status_maps_to_position_unavailable_with_message() {
    let endpoint = serve_json(
        HttpStatus::OK,
        json!({ "status": "fail", "message": "reserved range" }),
    )
    .await;

    let err = provider(endpoint)
        .current_position()
        .await
        .expect_err("fail payload");

    assert_eq!(err.code(), PositionErrorCode::PositionUnavailable);
    assert_eq!(err.message(), "reserved range");
}

#[tokio::test]
async fn forbidden_maps_to_permission_denied() {
    let endpoint = serve_json(HttpStatus::FORBIDDEN, json!({ "message": "quota" })).await;

    let err = provider(endpoint)
        .current_position()
        .await
        .expect_err("forbidden");

    assert_eq!(err.code(), PositionErrorCode::PermissionDenied);
}

#[tokio::test]
async fn server_error_maps_to_position_unavailable() {
    let endpoint = serve_json(HttpStatus::INTERNAL_SERVER_ERROR, json!({})).await;

    let err = provider(endpoint)
        .current_position()
        .await
        .expect_err("server error");

    assert_eq!(err.code(), PositionErrorCode::PositionUnavailable);
    assert!(err.message().contains("500"));
}

#[tokio::test]
async fn missing_coordinates_map_to_position_unavailable() {
    let endpoint = serve_json(HttpStatus::OK, json!({ "status": "success", "lat": 1.0 })).await;

    let err = provider(endpoint)
        .current_position()
        .await
        .expect_err("missing lon");

    assert_eq!(err.code(), PositionErrorCode::PositionUnavailable);
}

#[tokio::test]
async fn out_of_range_coordinates_are_rejected() {
    let endpoint = serve_json(HttpStatus::OK, json!({ "lat": 123.0, "lon": 20.0 })).await;

    let err = provider(endpoint)
        .current_position()
        .await
        .expect_err("invalid latitude");

    assert_eq!(err.code(), PositionErrorCode::InvalidCoordinate);
}

#[tokio::test]
async fn slow_endpoint_maps_to_timeout() {
    let endpoint = serve(Router::new().route(
        "/json",
        get(|| async {
            tokio::time::sleep(Duration::from_secs(3)).await;
            Json(json!({ "lat": 1.0, "lon": 2.0 }))
        }),
    ))
    .await;

    let err = IpLookupProvider::new(endpoint, Duration::from_millis(200))
        .expect("provider")
        .current_position()
        .await
        .expect_err("timeout");

    assert_eq!(err.code(), PositionErrorCode::Timeout);
}

#[tokio::test]
async fn unreachable_endpoint_maps_to_position_unavailable() {
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("local addr");
    drop(listener);
    let endpoint = Url::parse(&format!("http://{addr}/json")).expect("url");

    let err = provider(endpoint)
        .current_position()
        .await
        .expect_err("connection refused");

    assert_eq!(err.code(), PositionErrorCode::PositionUnavailable);
}
