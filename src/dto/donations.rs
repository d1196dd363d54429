use chrono::{DateTime, Utc};
use sea_orm::FromQueryResult;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::{
    entity::enums::DonationType,
    error::{AppError, AppResult},
};

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateDonationRequest {
    /// Amount in cents
    pub amount: i64,
    pub donation_type: DonationType,
    pub message: Option<String>,
    #[serde(default)]
    pub is_anonymous: bool,
}

impl CreateDonationRequest {
    pub fn validate(&self) -> AppResult<()> {
        if self.amount <= 0 {
            return Err(AppError::Validation(
                "amount must be greater than zero".into(),
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, ToSchema, FromQueryResult)]
pub struct DonationView {
    pub id: Uuid,
    pub amount: i64,
    pub donation_type: DonationType,
    pub message: Option<String>,
    pub is_anonymous: bool,
    pub donor_email: Option<String>,
    pub donor_first_name: Option<String>,
    pub donor_last_name: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct DonationList {
    pub items: Vec<DonationView>,
    /// Sum of all donations in cents
    pub total_amount: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn amount_must_be_positive() {
        let req = CreateDonationRequest {
            amount: 0,
            donation_type: DonationType::OneTime,
            message: None,
            is_anonymous: false,
        };
        assert!(matches!(req.validate(), Err(AppError::Validation(_))));
    }
}
