use axum::{Json, Router, extract::State, routing::post};

use crate::{
    dto::donations::CreateDonationRequest,
    error::{AppResult, ResultExt},
    middleware::auth::CurrentUser,
    models::Donation,
    response::ApiResponse,
    services::donation_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new().route("/", post(create_donation))
}

#[utoipa::path(
    post,
    path = "/api/donations",
    request_body = CreateDonationRequest,
    responses(
        (status = 200, description = "Donation recorded", body = ApiResponse<Donation>),
        (status = 422, description = "Amount must be positive"),
    ),
    security(("bearer_auth" = [])),
    tag = "Donations"
)]
pub async fn create_donation(
    State(state): State<AppState>,
    CurrentUser(ctx): CurrentUser,
    Json(payload): Json<CreateDonationRequest>,
) -> AppResult<Json<ApiResponse<Donation>>> {
    let resp = donation_service::create(&state, &ctx, payload)
        .await
        .operation("record donation")?;
    Ok(Json(resp))
}
