use axum::{
    Json, Router,
    extract::{Path, Query, State},
    routing::get,
};
use uuid::Uuid;

use crate::{
    dto::{
        feedback::FeedbackList,
        pets::{PetDetail, PetList},
    },
    error::{AppResult, ResultExt},
    response::ApiResponse,
    routes::params::{Pagination, PetQuery},
    services::{feedback_service, pet_service},
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_pets))
        .route("/{id}", get(get_pet))
        .route("/{id}/feedback", get(list_pet_feedback))
}

#[utoipa::path(
    get,
    path = "/api/pets",
    params(PetQuery),
    responses(
        (status = 200, description = "Browse pets; available only unless a status is given", body = ApiResponse<PetList>),
    ),
    tag = "Pets"
)]
pub async fn list_pets(
    State(state): State<AppState>,
    Query(query): Query<PetQuery>,
) -> AppResult<Json<ApiResponse<PetList>>> {
    let resp = pet_service::list_pets(&state, query)
        .await
        .operation("load pets")?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/pets/{id}",
    params(("id" = Uuid, Path, description = "Pet ID")),
    responses(
        (status = 200, description = "Pet with medical records and feedback", body = ApiResponse<PetDetail>),
        (status = 404, description = "Not Found"),
    ),
    tag = "Pets"
)]
pub async fn get_pet(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<PetDetail>>> {
    let resp = pet_service::get_pet_detail(&state, id)
        .await
        .operation("load pet")?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/pets/{id}/feedback",
    params(("id" = Uuid, Path, description = "Pet ID"), Pagination),
    responses(
        (status = 200, description = "Adopter feedback for a pet", body = ApiResponse<FeedbackList>),
    ),
    tag = "Pets"
)]
pub async fn list_pet_feedback(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Query(pagination): Query<Pagination>,
) -> AppResult<Json<ApiResponse<FeedbackList>>> {
    let resp = feedback_service::list_for_pet(&state, id, pagination)
        .await
        .operation("load feedback")?;
    Ok(Json(resp))
}
