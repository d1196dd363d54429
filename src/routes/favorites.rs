use axum::{
    Json, Router,
    extract::{Path, Query, State},
    routing::{get, post, put},
};
use uuid::Uuid;

use crate::{
    dto::favorites::{FavoriteIds, FavoritePetList, FavoriteState},
    error::{AppResult, ResultExt},
    middleware::auth::CurrentUser,
    response::ApiResponse,
    routes::params::Pagination,
    services::favorite_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_favorites))
        .route("/ids", get(favorite_ids))
        .route("/{pet_id}", put(add_favorite).delete(remove_favorite))
        .route("/{pet_id}/toggle", post(toggle_favorite))
}

#[utoipa::path(
    get,
    path = "/api/favorites",
    params(Pagination),
    responses(
        (status = 200, description = "My favorite pets", body = ApiResponse<FavoritePetList>),
        (status = 401, description = "Unauthorized"),
    ),
    security(("bearer_auth" = [])),
    tag = "Favorites"
)]
pub async fn list_favorites(
    State(state): State<AppState>,
    CurrentUser(ctx): CurrentUser,
    Query(pagination): Query<Pagination>,
) -> AppResult<Json<ApiResponse<FavoritePetList>>> {
    let resp = favorite_service::list_favorites(&state, &ctx, pagination)
        .await
        .operation("load favorites")?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/favorites/ids",
    responses(
        (status = 200, description = "Ids of my favorite pets", body = ApiResponse<FavoriteIds>),
        (status = 401, description = "Unauthorized"),
    ),
    security(("bearer_auth" = [])),
    tag = "Favorites"
)]
pub async fn favorite_ids(
    State(state): State<AppState>,
    CurrentUser(ctx): CurrentUser,
) -> AppResult<Json<ApiResponse<FavoriteIds>>> {
    let resp = favorite_service::favorite_ids(&state, &ctx)
        .await
        .operation("load favorites")?;
    Ok(Json(resp))
}

#[utoipa::path(
    put,
    path = "/api/favorites/{pet_id}",
    params(("pet_id" = Uuid, Path, description = "Pet ID")),
    responses(
        (status = 200, description = "Pet is a favorite", body = ApiResponse<FavoriteState>),
        (status = 404, description = "Pet not found"),
    ),
    security(("bearer_auth" = [])),
    tag = "Favorites"
)]
pub async fn add_favorite(
    State(state): State<AppState>,
    CurrentUser(ctx): CurrentUser,
    Path(pet_id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<FavoriteState>>> {
    let resp = favorite_service::add_favorite(&state, &ctx, pet_id)
        .await
        .operation("update favorites")?;
    Ok(Json(resp))
}

#[utoipa::path(
    delete,
    path = "/api/favorites/{pet_id}",
    params(("pet_id" = Uuid, Path, description = "Pet ID")),
    responses(
        (status = 200, description = "Pet is not a favorite", body = ApiResponse<FavoriteState>),
    ),
    security(("bearer_auth" = [])),
    tag = "Favorites"
)]
pub async fn remove_favorite(
    State(state): State<AppState>,
    CurrentUser(ctx): CurrentUser,
    Path(pet_id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<FavoriteState>>> {
    let resp = favorite_service::remove_favorite(&state, &ctx, pet_id)
        .await
        .operation("update favorites")?;
    Ok(Json(resp))
}

#[utoipa::path(
    post,
    path = "/api/favorites/{pet_id}/toggle",
    params(("pet_id" = Uuid, Path, description = "Pet ID")),
    responses(
        (status = 200, description = "Favorite flipped; body holds the new state", body = ApiResponse<FavoriteState>),
        (status = 404, description = "Pet not found"),
    ),
    security(("bearer_auth" = [])),
    tag = "Favorites"
)]
pub async fn toggle_favorite(
    State(state): State<AppState>,
    CurrentUser(ctx): CurrentUser,
    Path(pet_id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<FavoriteState>>> {
    let resp = favorite_service::toggle_favorite(&state, &ctx, pet_id)
        .await
        .operation("update favorites")?;
    Ok(Json(resp))
}
