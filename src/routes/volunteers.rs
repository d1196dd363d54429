use axum::{
    Json, Router,
    extract::State,
    routing::{get, post},
};

use crate::{
    dto::volunteers::VolunteerSignUpRequest,
    error::{AppResult, ResultExt},
    middleware::auth::CurrentUser,
    models::Volunteer,
    response::ApiResponse,
    services::volunteer_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(sign_up))
        .route("/me", get(my_application))
}

#[utoipa::path(
    post,
    path = "/api/volunteers",
    request_body = VolunteerSignUpRequest,
    responses(
        (status = 200, description = "Volunteer application submitted", body = ApiResponse<Volunteer>),
        (status = 409, description = "Already applied"),
    ),
    security(("bearer_auth" = [])),
    tag = "Volunteers"
)]
pub async fn sign_up(
    State(state): State<AppState>,
    CurrentUser(ctx): CurrentUser,
    Json(payload): Json<VolunteerSignUpRequest>,
) -> AppResult<Json<ApiResponse<Volunteer>>> {
    let resp = volunteer_service::sign_up(&state, &ctx, payload)
        .await
        .operation("submit volunteer application")?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/volunteers/me",
    responses(
        (status = 200, description = "My volunteer application", body = ApiResponse<Volunteer>),
        (status = 404, description = "No application yet"),
    ),
    security(("bearer_auth" = [])),
    tag = "Volunteers"
)]
pub async fn my_application(
    State(state): State<AppState>,
    CurrentUser(ctx): CurrentUser,
) -> AppResult<Json<ApiResponse<Volunteer>>> {
    let resp = volunteer_service::my_application(&state, &ctx)
        .await
        .operation("load volunteer application")?;
    Ok(Json(resp))
}
