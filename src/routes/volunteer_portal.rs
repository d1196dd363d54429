use axum::{
    Json, Router,
    extract::{Path, Query, State},
    routing::{get, post},
};
use uuid::Uuid;

use crate::{
    dto::volunteers::{ActivityList, AssignmentList},
    error::{AppResult, ResultExt},
    middleware::auth::{RoleGate, VolunteerOnly},
    models::VolunteerAssignment,
    response::ApiResponse,
    routes::params::Pagination,
    services::volunteer_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/activities", get(list_open_activities))
        .route("/activities/{id}/sign-up", post(sign_up_for_activity))
        .route("/assignments", get(list_my_assignments))
        .route("/assignments/{id}/complete", post(complete_assignment))
}

#[utoipa::path(
    get,
    path = "/api/volunteer-portal/activities",
    params(Pagination),
    responses(
        (status = 200, description = "Open activities by date", body = ApiResponse<ActivityList>),
        (status = 403, description = "Forbidden"),
    ),
    security(("bearer_auth" = [])),
    tag = "Volunteer portal"
)]
pub async fn list_open_activities(
    State(state): State<AppState>,
    _gate: RoleGate<VolunteerOnly>,
    Query(pagination): Query<Pagination>,
) -> AppResult<Json<ApiResponse<ActivityList>>> {
    let resp = volunteer_service::list_open_activities(&state, pagination)
        .await
        .operation("load activities")?;
    Ok(Json(resp))
}

#[utoipa::path(
    post,
    path = "/api/volunteer-portal/activities/{id}/sign-up",
    params(("id" = Uuid, Path, description = "Activity ID")),
    responses(
        (status = 200, description = "Signed up", body = ApiResponse<VolunteerAssignment>),
        (status = 400, description = "Activity is closed"),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "Not Found"),
        (status = 409, description = "Activity is full or already signed up"),
    ),
    security(("bearer_auth" = [])),
    tag = "Volunteer portal"
)]
pub async fn sign_up_for_activity(
    State(state): State<AppState>,
    gate: RoleGate<VolunteerOnly>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<VolunteerAssignment>>> {
    let resp = volunteer_service::sign_up_for_activity(&state, &gate.ctx, id)
        .await
        .operation("sign up for activity")?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/volunteer-portal/assignments",
    params(Pagination),
    responses(
        (status = 200, description = "My assignments, newest first", body = ApiResponse<AssignmentList>),
        (status = 403, description = "Forbidden"),
    ),
    security(("bearer_auth" = [])),
    tag = "Volunteer portal"
)]
pub async fn list_my_assignments(
    State(state): State<AppState>,
    gate: RoleGate<VolunteerOnly>,
    Query(pagination): Query<Pagination>,
) -> AppResult<Json<ApiResponse<AssignmentList>>> {
    let resp = volunteer_service::my_assignments(&state, &gate.ctx, pagination)
        .await
        .operation("load assignments")?;
    Ok(Json(resp))
}

#[utoipa::path(
    post,
    path = "/api/volunteer-portal/assignments/{id}/complete",
    params(("id" = Uuid, Path, description = "Assignment ID")),
    responses(
        (status = 200, description = "Assignment completed", body = ApiResponse<VolunteerAssignment>),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "Not Found"),
    ),
    security(("bearer_auth" = [])),
    tag = "Volunteer portal"
)]
pub async fn complete_assignment(
    State(state): State<AppState>,
    gate: RoleGate<VolunteerOnly>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<VolunteerAssignment>>> {
    let resp = volunteer_service::complete_assignment(&state, &gate.ctx, id)
        .await
        .operation("complete assignment")?;
    Ok(Json(resp))
}
