use axum::{
    Json, Router,
    extract::{Path, Query, State},
    routing::{get, post},
};
use uuid::Uuid;

use crate::{
    dto::{
        applications::{
            ApplicationHistory, ApplicationList, ApplicationSummary, CreateApplicationRequest,
        },
        feedback::CreateFeedbackRequest,
    },
    error::{AppResult, ResultExt},
    middleware::auth::CurrentUser,
    models::{AdoptionApplication, Feedback},
    response::ApiResponse,
    routes::params::ApplicationListQuery,
    services::{application_service, feedback_service},
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(create_application).get(list_my_applications))
        .route("/{id}", get(get_application))
        .route("/{id}/history", get(application_history))
        .route("/{id}/feedback", post(create_feedback))
}

#[utoipa::path(
    post,
    path = "/api/applications",
    request_body = CreateApplicationRequest,
    responses(
        (status = 200, description = "Application submitted", body = ApiResponse<AdoptionApplication>),
        (status = 400, description = "Pet already adopted"),
        (status = 404, description = "Pet not found"),
        (status = 409, description = "An open application already exists"),
        (status = 422, description = "Validation failed"),
    ),
    security(("bearer_auth" = [])),
    tag = "Applications"
)]
pub async fn create_application(
    State(state): State<AppState>,
    CurrentUser(ctx): CurrentUser,
    Json(payload): Json<CreateApplicationRequest>,
) -> AppResult<Json<ApiResponse<AdoptionApplication>>> {
    let resp = application_service::create(&state, &ctx, payload)
        .await
        .operation("submit application")?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/applications",
    params(ApplicationListQuery),
    responses(
        (status = 200, description = "My applications", body = ApiResponse<ApplicationList>),
        (status = 401, description = "Unauthorized"),
    ),
    security(("bearer_auth" = [])),
    tag = "Applications"
)]
pub async fn list_my_applications(
    State(state): State<AppState>,
    CurrentUser(ctx): CurrentUser,
    Query(query): Query<ApplicationListQuery>,
) -> AppResult<Json<ApiResponse<ApplicationList>>> {
    let resp = application_service::list_mine(&state, &ctx, query)
        .await
        .operation("load applications")?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/applications/{id}",
    params(("id" = Uuid, Path, description = "Application ID")),
    responses(
        (status = 200, description = "Application with pet and applicant", body = ApiResponse<ApplicationSummary>),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "Not Found"),
    ),
    security(("bearer_auth" = [])),
    tag = "Applications"
)]
pub async fn get_application(
    State(state): State<AppState>,
    CurrentUser(ctx): CurrentUser,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<ApplicationSummary>>> {
    let resp = application_service::get(&state, &ctx, id)
        .await
        .operation("load application")?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/applications/{id}/history",
    params(("id" = Uuid, Path, description = "Application ID")),
    responses(
        (status = 200, description = "Status changes, oldest first", body = ApiResponse<ApplicationHistory>),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "Not Found"),
    ),
    security(("bearer_auth" = [])),
    tag = "Applications"
)]
pub async fn application_history(
    State(state): State<AppState>,
    CurrentUser(ctx): CurrentUser,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<ApplicationHistory>>> {
    let resp = application_service::history(&state, &ctx, id)
        .await
        .operation("load application history")?;
    Ok(Json(resp))
}

#[utoipa::path(
    post,
    path = "/api/applications/{id}/feedback",
    params(("id" = Uuid, Path, description = "Application ID")),
    request_body = CreateFeedbackRequest,
    responses(
        (status = 200, description = "Feedback recorded", body = ApiResponse<Feedback>),
        (status = 400, description = "Application is not approved"),
        (status = 403, description = "Not your application"),
        (status = 409, description = "Feedback already submitted"),
        (status = 422, description = "Validation failed"),
    ),
    security(("bearer_auth" = [])),
    tag = "Applications"
)]
pub async fn create_feedback(
    State(state): State<AppState>,
    CurrentUser(ctx): CurrentUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<CreateFeedbackRequest>,
) -> AppResult<Json<ApiResponse<Feedback>>> {
    let resp = feedback_service::create(&state, &ctx, id, payload)
        .await
        .operation("submit feedback")?;
    Ok(Json(resp))
}
