use axum::{
    Json, Router,
    extract::{Path, Query, State},
    routing::{get, patch},
};
use uuid::Uuid;

use crate::{
    dto::applications::{ApplicationList, TransitionOutcome, UpdateApplicationStatusRequest},
    error::{AppResult, ResultExt},
    middleware::auth::{Reviewer, RoleGate},
    response::ApiResponse,
    routes::params::ApplicationListQuery,
    services::application_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/applications", get(list_applications))
        .route("/applications/{id}/status", patch(update_application_status))
}

#[utoipa::path(
    get,
    path = "/api/review/applications",
    params(ApplicationListQuery),
    responses(
        (status = 200, description = "Applications awaiting or past review", body = ApiResponse<ApplicationList>),
        (status = 403, description = "Forbidden"),
    ),
    security(("bearer_auth" = [])),
    tag = "Review"
)]
pub async fn list_applications(
    State(state): State<AppState>,
    _gate: RoleGate<Reviewer>,
    Query(query): Query<ApplicationListQuery>,
) -> AppResult<Json<ApiResponse<ApplicationList>>> {
    let resp = application_service::list_for_review(&state, query)
        .await
        .operation("load applications")?;
    Ok(Json(resp))
}

#[utoipa::path(
    patch,
    path = "/api/review/applications/{id}/status",
    params(("id" = Uuid, Path, description = "Application ID")),
    request_body = UpdateApplicationStatusRequest,
    responses(
        (status = 200, description = "Status applied, or unchanged if already set", body = ApiResponse<TransitionOutcome>),
        (status = 400, description = "Transition not allowed"),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "Not Found"),
        (status = 409, description = "Pet already adopted"),
    ),
    security(("bearer_auth" = [])),
    tag = "Review"
)]
pub async fn update_application_status(
    State(state): State<AppState>,
    gate: RoleGate<Reviewer>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateApplicationStatusRequest>,
) -> AppResult<Json<ApiResponse<TransitionOutcome>>> {
    let ctx = gate.into_context();
    let resp = application_service::transition(&state, &ctx, id, payload.status)
        .await
        .operation("update application")?;
    Ok(Json(resp))
}
