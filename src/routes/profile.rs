use axum::{
    Json, Router,
    extract::State,
    routing::get,
};

use crate::{
    dto::{
        dashboard::Dashboard,
        profile::{ProfileWithRole, UpdateProfileRequest},
    },
    error::{AppResult, ResultExt},
    middleware::auth::CurrentUser,
    response::ApiResponse,
    services::{dashboard_service, user_service},
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/profile", get(get_profile).put(update_profile))
        .route("/dashboard", get(dashboard))
}

#[utoipa::path(
    get,
    path = "/api/profile",
    responses(
        (status = 200, description = "My profile and role", body = ApiResponse<ProfileWithRole>),
        (status = 401, description = "Unauthorized"),
    ),
    security(("bearer_auth" = [])),
    tag = "Profile"
)]
pub async fn get_profile(
    State(state): State<AppState>,
    CurrentUser(ctx): CurrentUser,
) -> AppResult<Json<ApiResponse<ProfileWithRole>>> {
    let resp = user_service::get_profile(&state, &ctx)
        .await
        .operation("load profile")?;
    Ok(Json(resp))
}

#[utoipa::path(
    put,
    path = "/api/profile",
    request_body = UpdateProfileRequest,
    responses(
        (status = 200, description = "Profile saved", body = ApiResponse<ProfileWithRole>),
        (status = 401, description = "Unauthorized"),
    ),
    security(("bearer_auth" = [])),
    tag = "Profile"
)]
pub async fn update_profile(
    State(state): State<AppState>,
    CurrentUser(ctx): CurrentUser,
    Json(payload): Json<UpdateProfileRequest>,
) -> AppResult<Json<ApiResponse<ProfileWithRole>>> {
    let resp = user_service::update_profile(&state, &ctx, payload)
        .await
        .operation("save profile")?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/dashboard",
    responses(
        (status = 200, description = "Favorites, applications and upcoming appointments", body = ApiResponse<Dashboard>),
        (status = 401, description = "Unauthorized"),
    ),
    security(("bearer_auth" = [])),
    tag = "Profile"
)]
pub async fn dashboard(
    State(state): State<AppState>,
    CurrentUser(ctx): CurrentUser,
) -> AppResult<Json<ApiResponse<Dashboard>>> {
    let resp = dashboard_service::dashboard(&state, &ctx)
        .await
        .operation("load dashboard")?;
    Ok(Json(resp))
}
