use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue::NotSet, ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, QuerySelect, Set,
};
use uuid::Uuid;

use crate::{
    audit,
    dto::articles::{ArticleList, CreateArticleRequest, UpdateArticleRequest},
    entity::{
        CareArticles,
        care_articles::{ActiveModel as ArticleActive, Column as ArticleCol},
    },
    error::{AppError, AppResult},
    middleware::auth::AuthContext,
    models::Article,
    response::{ApiResponse, Meta},
    routes::params::ArticleQuery,
    state::AppState,
};

pub async fn list_articles(
    state: &AppState,
    query: ArticleQuery,
) -> AppResult<ApiResponse<ArticleList>> {
    let window = query.window();
    let mut finder = CareArticles::find().order_by_desc(ArticleCol::PublishedAt);
    if let Some(category) = query.category {
        finder = finder.filter(ArticleCol::Category.eq(category));
    }

    let total = finder.clone().count(&state.orm).await?;
    let items = finder
        .limit(window.limit())
        .offset(window.skip())
        .all(&state.orm)
        .await?
        .into_iter()
        .map(Article::from)
        .collect();

    Ok(ApiResponse::paged(
        "Articles",
        ArticleList { items },
        &window,
        total,
    ))
}

pub async fn create_article(
    state: &AppState,
    ctx: &AuthContext,
    payload: CreateArticleRequest,
) -> AppResult<ApiResponse<Article>> {
    payload.validate()?;

    let article = ArticleActive {
        id: Set(Uuid::new_v4()),
        title: Set(payload.title.trim().to_owned()),
        content: Set(payload.content),
        category: Set(payload.category),
        image_url: Set(payload.image_url),
        author: Set(payload.author),
        published_at: Set(payload.published_at.unwrap_or_else(Utc::now).into()),
        created_at: NotSet,
    }
    .insert(&state.orm)
    .await?;

    audit::record(
        &state.orm,
        ctx.user_id,
        "article_create",
        "care_articles",
        serde_json::json!({ "article_id": article.id }),
    )
    .await;

    Ok(ApiResponse::success(
        "Article created",
        article.into(),
        Some(Meta::empty()),
    ))
}

pub async fn update_article(
    state: &AppState,
    ctx: &AuthContext,
    id: Uuid,
    payload: UpdateArticleRequest,
) -> AppResult<ApiResponse<Article>> {
    payload.validate()?;

    let existing = CareArticles::find_by_id(id).one(&state.orm).await?;
    let existing = match existing {
        Some(a) => a,
        None => return Err(AppError::NotFound),
    };

    let mut active: ArticleActive = existing.into();
    if let Some(title) = payload.title {
        active.title = Set(title.trim().to_owned());
    }
    if let Some(content) = payload.content {
        active.content = Set(content);
    }
    if let Some(category) = payload.category {
        active.category = Set(category);
    }
    if let Some(image_url) = payload.image_url {
        active.image_url = Set(Some(image_url));
    }
    if let Some(author) = payload.author {
        active.author = Set(Some(author));
    }
    if let Some(published_at) = payload.published_at {
        active.published_at = Set(published_at.into());
    }
    let article = active.update(&state.orm).await?;

    audit::record(
        &state.orm,
        ctx.user_id,
        "article_update",
        "care_articles",
        serde_json::json!({ "article_id": article.id }),
    )
    .await;

    Ok(ApiResponse::success("Updated", article.into(), Some(Meta::empty())))
}

pub async fn delete_article(
    state: &AppState,
    ctx: &AuthContext,
    id: Uuid,
) -> AppResult<ApiResponse<serde_json::Value>> {
    let result = CareArticles::delete_by_id(id).exec(&state.orm).await?;
    if result.rows_affected == 0 {
        return Err(AppError::NotFound);
    }

    audit::record(
        &state.orm,
        ctx.user_id,
        "article_delete",
        "care_articles",
        serde_json::json!({ "article_id": id }),
    )
    .await;

    Ok(ApiResponse::success(
        "Deleted",
        serde_json::json!({}),
        Some(Meta::empty()),
    ))
}
