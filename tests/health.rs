use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use pet_adoption_api::{
    app::build_router,
    config::AppConfig,
    middleware::auth::AuthKeys,
    routes::health::{HealthData, health_check},
    state::AppState,
};
use sea_orm::DatabaseConnection;
use tower::ServiceExt;

fn offline_state() -> AppState {
    AppState::new(
        DatabaseConnection::Disconnected,
        AuthKeys::from_secret(b"health-test"),
    )
}

fn test_config() -> AppConfig {
    AppConfig {
        database_url: "postgres://unused".into(),
        jwt_secret: "health-test".into(),
        host: "127.0.0.1".into(),
        port: 0,
        request_timeout_secs: 5,
    }
}

#[test]
fn probe_maps_to_status() {
    let up = HealthData::from_probe(true);
    assert_eq!(up.status, "ok");
    assert_eq!(up.database, "up");

    let down = HealthData::from_probe(false);
    assert_eq!(down.status, "degraded");
    assert_eq!(down.database, "down");
}

#[tokio::test]
async fn health_check_reports_unreachable_database() {
    let response = health_check(axum::extract::State(offline_state())).await;
    assert_eq!(response.0.message, "Health check");

    let data = response.0.data.expect("health data");
    assert_eq!(data.status, "degraded");
}

#[tokio::test]
async fn router_serves_health_and_tags_request_id() -> anyhow::Result<()> {
    let app = build_router(offline_state(), &test_config());

    let response = app
        .oneshot(Request::builder().uri("/health").body(Body::empty())?)
        .await?;

    assert_eq!(response.status(), StatusCode::OK);
    assert!(response.headers().contains_key("x-request-id"));
    Ok(())
}

#[tokio::test]
async fn unknown_paths_are_not_found() -> anyhow::Result<()> {
    let app = build_router(offline_state(), &test_config());

    let response = app
        .oneshot(Request::builder().uri("/nowhere").body(Body::empty())?)
        .await?;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let body = axum::body::to_bytes(response.into_body(), usize::MAX).await?;
    let json: serde_json::Value = serde_json::from_slice(&body)?;
    assert_eq!(json["message"], "Not Found");
    assert_eq!(json["data"]["path"], "/nowhere");
    Ok(())
}
