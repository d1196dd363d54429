use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::{dto::require_text, entity::enums::ArticleCategory, error::AppResult, models::Article};

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateArticleRequest {
    pub title: String,
    pub content: String,
    pub category: ArticleCategory,
    pub image_url: Option<String>,
    pub author: Option<String>,
    /// Defaults to now
    pub published_at: Option<DateTime<Utc>>,
}

impl CreateArticleRequest {
    pub fn validate(&self) -> AppResult<()> {
        require_text("title", &self.title)?;
        require_text("content", &self.content)
    }
}

#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct UpdateArticleRequest {
    pub title: Option<String>,
    pub content: Option<String>,
    pub category: Option<ArticleCategory>,
    pub image_url: Option<String>,
    pub author: Option<String>,
    pub published_at: Option<DateTime<Utc>>,
}

impl UpdateArticleRequest {
    pub fn validate(&self) -> AppResult<()> {
        if let Some(title) = &self.title {
            require_text("title", title)?;
        }
        if let Some(content) = &self.content {
            require_text("content", content)?;
        }
        Ok(())
    }
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(transparent)]
pub struct ArticleList {
    #[schema(value_type = Vec<Article>)]
    pub items: Vec<Article>,
}
