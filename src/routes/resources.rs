use axum::{
    Json, Router,
    extract::{Query, State},
    routing::get,
};

use crate::{
    dto::articles::ArticleList,
    error::{AppResult, ResultExt},
    response::ApiResponse,
    routes::params::ArticleQuery,
    services::article_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new().route("/articles", get(list_articles))
}

#[utoipa::path(
    get,
    path = "/api/resources/articles",
    params(ArticleQuery),
    responses(
        (status = 200, description = "Pet care articles, newest first", body = ApiResponse<ArticleList>),
    ),
    tag = "Resources"
)]
pub async fn list_articles(
    State(state): State<AppState>,
    Query(query): Query<ArticleQuery>,
) -> AppResult<Json<ApiResponse<ArticleList>>> {
    let resp = article_service::list_articles(&state, query)
        .await
        .operation("load articles")?;
    Ok(Json(resp))
}
