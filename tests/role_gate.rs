mod common;

use axum::{
    body::Body,
    http::{Request, StatusCode, header},
};
use chrono::Duration;
use pet_adoption_api::{
    app::build_router, config::AppConfig, entity::enums::Role, state::AppState,
};
use sea_orm::DatabaseConnection;
use tower::ServiceExt;

fn test_config() -> AppConfig {
    AppConfig {
        database_url: "postgres://unused".into(),
        jwt_secret: String::from_utf8_lossy(common::TEST_SECRET).into_owned(),
        host: "127.0.0.1".into(),
        port: 0,
        request_timeout_secs: 5,
    }
}

async fn body_json(response: axum::response::Response) -> anyhow::Result<serde_json::Value> {
    let body = axum::body::to_bytes(response.into_body(), usize::MAX).await?;
    Ok(serde_json::from_slice(&body)?)
}

#[tokio::test]
async fn missing_token_is_unauthorized_with_login_redirect() -> anyhow::Result<()> {
    let state = AppState::new(DatabaseConnection::Disconnected, common::keys());
    let app = build_router(state, &test_config());

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/admin/overview")
                .body(Body::empty())?,
        )
        .await?;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let json = body_json(response).await?;
    assert_eq!(json["data"]["redirect"], "/login");
    Ok(())
}

#[tokio::test]
async fn foreign_token_is_unauthorized() -> anyhow::Result<()> {
    let state = AppState::new(DatabaseConnection::Disconnected, common::keys());
    let app = build_router(state, &test_config());

    let forged = pet_adoption_api::middleware::auth::AuthKeys::from_secret(b"not-our-secret")
        .issue(uuid::Uuid::new_v4(), None, Duration::hours(1))?;
    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/profile")
                .header(header::AUTHORIZATION, format!("Bearer {forged}"))
                .body(Body::empty())?,
        )
        .await?;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    Ok(())
}

#[tokio::test]
async fn plain_user_is_forbidden_on_admin_routes() -> anyhow::Result<()> {
    let Some(state) = common::setup_state().await? else {
        return Ok(());
    };
    let user = common::account(&state, Role::User).await?;
    let admin = common::account(&state, Role::Admin).await?;
    let keys = common::keys();
    let app = build_router(state, &test_config());

    let user_token = keys.issue(user.user_id, user.email.as_deref(), Duration::hours(1))?;
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .uri("/api/admin/users")
                .header(header::AUTHORIZATION, format!("Bearer {user_token}"))
                .body(Body::empty())?,
        )
        .await?;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    let json = body_json(response).await?;
    assert_eq!(json["message"], "Access denied");
    assert_eq!(json["data"]["redirect"], "/");
    assert!(json["data"].get("items").is_none());

    let admin_token = keys.issue(admin.user_id, admin.email.as_deref(), Duration::hours(1))?;
    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/admin/overview")
                .header(header::AUTHORIZATION, format!("Bearer {admin_token}"))
                .body(Body::empty())?,
        )
        .await?;
    assert_eq!(response.status(), StatusCode::OK);
    Ok(())
}

#[tokio::test]
async fn vet_portal_rejects_volunteers() -> anyhow::Result<()> {
    let Some(state) = common::setup_state().await? else {
        return Ok(());
    };
    let volunteer = common::account(&state, Role::Volunteer).await?;
    let keys = common::keys();
    let app = build_router(state, &test_config());

    let token = keys.issue(volunteer.user_id, None, Duration::hours(1))?;
    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/vet/appointments")
                .header(header::AUTHORIZATION, format!("Bearer {token}"))
                .body(Body::empty())?,
        )
        .await?;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    Ok(())
}
