use axum::{
    Json, Router,
    extract::{Path, Query, State},
    routing::{get, patch, post},
};
use uuid::Uuid;

use crate::{
    dto::{
        appointments::{AppointmentList, UpdateAppointmentStatusRequest},
        medical::{CreateMedicalRecordRequest, CreateReminderRequest, MedicalRecordList},
    },
    error::{AppResult, ResultExt},
    middleware::auth::{RoleGate, VetOnly},
    models::{Appointment, MedicalRecord, VaccinationReminder},
    response::ApiResponse,
    routes::params::AppointmentListQuery,
    services::{appointment_service, medical_service},
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/appointments", get(list_appointments))
        .route("/appointments/{id}/status", patch(update_appointment_status))
        .route(
            "/pets/{id}/medical-records",
            get(list_medical_records).post(create_medical_record),
        )
        .route("/pets/{id}/vaccination-reminders", post(create_reminder))
}

#[utoipa::path(
    get,
    path = "/api/vet/appointments",
    params(AppointmentListQuery),
    responses(
        (status = 200, description = "All appointments by date", body = ApiResponse<AppointmentList>),
        (status = 403, description = "Forbidden"),
    ),
    security(("bearer_auth" = [])),
    tag = "Vet"
)]
pub async fn list_appointments(
    State(state): State<AppState>,
    _gate: RoleGate<VetOnly>,
    Query(query): Query<AppointmentListQuery>,
) -> AppResult<Json<ApiResponse<AppointmentList>>> {
    let resp = appointment_service::list_all(&state, query)
        .await
        .operation("load appointments")?;
    Ok(Json(resp))
}

#[utoipa::path(
    patch,
    path = "/api/vet/appointments/{id}/status",
    params(("id" = Uuid, Path, description = "Appointment ID")),
    request_body = UpdateAppointmentStatusRequest,
    responses(
        (status = 200, description = "Appointment updated", body = ApiResponse<Appointment>),
        (status = 400, description = "Transition not allowed"),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "Not Found"),
    ),
    security(("bearer_auth" = [])),
    tag = "Vet"
)]
pub async fn update_appointment_status(
    State(state): State<AppState>,
    gate: RoleGate<VetOnly>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateAppointmentStatusRequest>,
) -> AppResult<Json<ApiResponse<Appointment>>> {
    let resp = appointment_service::update_status(&state, &gate.ctx, id, payload)
        .await
        .operation("update appointment")?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/vet/pets/{id}/medical-records",
    params(("id" = Uuid, Path, description = "Pet ID")),
    responses(
        (status = 200, description = "Medical records, newest first", body = ApiResponse<MedicalRecordList>),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "Pet not found"),
    ),
    security(("bearer_auth" = [])),
    tag = "Vet"
)]
pub async fn list_medical_records(
    State(state): State<AppState>,
    _gate: RoleGate<VetOnly>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<MedicalRecordList>>> {
    let resp = medical_service::list_for_pet(&state, id)
        .await
        .operation("load medical records")?;
    Ok(Json(resp))
}

#[utoipa::path(
    post,
    path = "/api/vet/pets/{id}/medical-records",
    params(("id" = Uuid, Path, description = "Pet ID")),
    request_body = CreateMedicalRecordRequest,
    responses(
        (status = 200, description = "Record added", body = ApiResponse<MedicalRecord>),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "Pet not found"),
        (status = 422, description = "Validation failed"),
    ),
    security(("bearer_auth" = [])),
    tag = "Vet"
)]
pub async fn create_medical_record(
    State(state): State<AppState>,
    gate: RoleGate<VetOnly>,
    Path(id): Path<Uuid>,
    Json(payload): Json<CreateMedicalRecordRequest>,
) -> AppResult<Json<ApiResponse<MedicalRecord>>> {
    let resp = medical_service::create(&state, &gate.ctx, id, payload)
        .await
        .operation("add medical record")?;
    Ok(Json(resp))
}

#[utoipa::path(
    post,
    path = "/api/vet/pets/{id}/vaccination-reminders",
    params(("id" = Uuid, Path, description = "Pet ID")),
    request_body = CreateReminderRequest,
    responses(
        (status = 200, description = "Reminder scheduled", body = ApiResponse<VaccinationReminder>),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "Pet not found"),
        (status = 422, description = "Validation failed"),
    ),
    security(("bearer_auth" = [])),
    tag = "Vet"
)]
pub async fn create_reminder(
    State(state): State<AppState>,
    gate: RoleGate<VetOnly>,
    Path(id): Path<Uuid>,
    Json(payload): Json<CreateReminderRequest>,
) -> AppResult<Json<ApiResponse<VaccinationReminder>>> {
    let resp = medical_service::create_reminder(&state, &gate.ctx, id, payload)
        .await
        .operation("add vaccination reminder")?;
    Ok(Json(resp))
}
