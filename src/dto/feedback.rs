use chrono::{DateTime, Utc};
use sea_orm::FromQueryResult;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::{
    dto::require_text,
    error::{AppError, AppResult},
};

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateFeedbackRequest {
    pub rating: i32,
    pub comment: String,
}

impl CreateFeedbackRequest {
    pub fn validate(&self) -> AppResult<()> {
        if !(1..=5).contains(&self.rating) {
            return Err(AppError::Validation(
                "rating must be between 1 and 5".into(),
            ));
        }
        require_text("comment", &self.comment)
    }
}

/// Feedback joined with the pet and the adopter's name.
#[derive(Debug, Clone, Serialize, ToSchema, FromQueryResult)]
pub struct FeedbackView {
    pub id: Uuid,
    pub adoption_application_id: Uuid,
    pub pet_id: Uuid,
    pub pet_name: String,
    pub user_id: Uuid,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub rating: i32,
    pub comment: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(transparent)]
pub struct FeedbackList {
    #[schema(value_type = Vec<FeedbackView>)]
    pub items: Vec<FeedbackView>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rating_must_be_one_to_five() {
        for rating in [0, 6, -3] {
            let req = CreateFeedbackRequest {
                rating,
                comment: "Lovely dog".into(),
            };
            assert!(matches!(req.validate(), Err(AppError::Validation(_))));
        }
        let req = CreateFeedbackRequest {
            rating: 5,
            comment: "Lovely dog".into(),
        };
        assert!(req.validate().is_ok());
    }

    #[test]
    fn comment_is_required() {
        let req = CreateFeedbackRequest {
            rating: 4,
            comment: "  ".into(),
        };
        assert!(req.validate().is_err());
    }
}
