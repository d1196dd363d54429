use axum::{
    Json, Router,
    extract::{Path, Query, State},
    routing::post,
};
use uuid::Uuid;

use crate::{
    dto::appointments::{AppointmentList, CreateAppointmentRequest},
    error::{AppResult, ResultExt},
    middleware::auth::CurrentUser,
    models::Appointment,
    response::ApiResponse,
    routes::params::AppointmentListQuery,
    services::appointment_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(create_appointment).get(list_my_appointments))
        .route("/{id}/cancel", post(cancel_appointment))
}

#[utoipa::path(
    post,
    path = "/api/appointments",
    request_body = CreateAppointmentRequest,
    responses(
        (status = 200, description = "Appointment scheduled", body = ApiResponse<Appointment>),
        (status = 404, description = "Pet not found"),
        (status = 422, description = "Date is not in the future"),
    ),
    security(("bearer_auth" = [])),
    tag = "Appointments"
)]
pub async fn create_appointment(
    State(state): State<AppState>,
    CurrentUser(ctx): CurrentUser,
    Json(payload): Json<CreateAppointmentRequest>,
) -> AppResult<Json<ApiResponse<Appointment>>> {
    let resp = appointment_service::create(&state, &ctx, payload)
        .await
        .operation("schedule appointment")?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/appointments",
    params(AppointmentListQuery),
    responses(
        (status = 200, description = "My appointments by date", body = ApiResponse<AppointmentList>),
        (status = 401, description = "Unauthorized"),
    ),
    security(("bearer_auth" = [])),
    tag = "Appointments"
)]
pub async fn list_my_appointments(
    State(state): State<AppState>,
    CurrentUser(ctx): CurrentUser,
    Query(query): Query<AppointmentListQuery>,
) -> AppResult<Json<ApiResponse<AppointmentList>>> {
    let resp = appointment_service::list_mine(&state, &ctx, query)
        .await
        .operation("load appointments")?;
    Ok(Json(resp))
}

#[utoipa::path(
    post,
    path = "/api/appointments/{id}/cancel",
    params(("id" = Uuid, Path, description = "Appointment ID")),
    responses(
        (status = 200, description = "Appointment cancelled", body = ApiResponse<Appointment>),
        (status = 400, description = "Appointment already completed"),
        (status = 403, description = "Not your appointment"),
        (status = 404, description = "Not Found"),
    ),
    security(("bearer_auth" = [])),
    tag = "Appointments"
)]
pub async fn cancel_appointment(
    State(state): State<AppState>,
    CurrentUser(ctx): CurrentUser,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<Appointment>>> {
    let resp = appointment_service::cancel(&state, &ctx, id)
        .await
        .operation("cancel appointment")?;
    Ok(Json(resp))
}
