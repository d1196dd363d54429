use chrono::{DateTime, Utc};
use sea_orm::FromQueryResult;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::{
    dto::require_text,
    entity::enums::{ApplicationStatus, Species},
    error::AppResult,
    models::{AdoptionApplication, ApplicationStatusEvent},
};

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct CreateApplicationRequest {
    pub pet_id: Uuid,
    pub home_type: String,
    #[serde(default)]
    pub has_yard: bool,
    #[serde(default)]
    pub has_other_pets: bool,
    #[serde(default)]
    pub has_children: bool,
    pub experience: Option<String>,
    pub reason: String,
    /// Applicant details copied onto the profile.
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
}

impl CreateApplicationRequest {
    pub fn validate(&self) -> AppResult<()> {
        require_text("home_type", &self.home_type)?;
        require_text("reason", &self.reason)
    }
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateApplicationStatusRequest {
    pub status: ApplicationStatus,
}

#[derive(Debug, Clone, Serialize, ToSchema, FromQueryResult)]
pub struct ApplicationSummary {
    pub id: Uuid,
    pub pet_id: Uuid,
    pub pet_name: String,
    pub pet_species: Species,
    pub pet_image_url: Option<String>,
    pub user_id: Uuid,
    pub applicant_email: Option<String>,
    pub applicant_first_name: Option<String>,
    pub applicant_last_name: Option<String>,
    pub home_type: String,
    pub has_yard: bool,
    pub has_other_pets: bool,
    pub has_children: bool,
    pub experience: Option<String>,
    pub reason: String,
    pub status: ApplicationStatus,
    pub submitted_at: DateTime<Utc>,
    pub reviewed_at: Option<DateTime<Utc>>,
    pub reviewed_by: Option<Uuid>,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(transparent)]
pub struct ApplicationList {
    #[schema(value_type = Vec<ApplicationSummary>)]
    pub items: Vec<ApplicationSummary>,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(transparent)]
pub struct ApplicationHistory {
    #[schema(value_type = Vec<ApplicationStatusEvent>)]
    pub items: Vec<ApplicationStatusEvent>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct TransitionOutcome {
    pub application: AdoptionApplication,
    pub changed: bool,
}
