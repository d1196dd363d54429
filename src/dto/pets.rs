use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::{
    dto::{feedback::FeedbackView, require_text},
    entity::enums::{PetSize, PetStatus, Species},
    error::{AppError, AppResult},
    models::{MedicalRecord, Pet},
};

#[derive(Debug, Serialize, ToSchema)]
#[serde(transparent)]
pub struct PetList {
    #[schema(value_type = Vec<Pet>)]
    pub items: Vec<Pet>,
}

/// Everything the pet detail page shows, gathered in one request.
#[derive(Debug, Serialize, ToSchema)]
pub struct PetDetail {
    pub pet: Pet,
    pub medical_records: Vec<MedicalRecord>,
    pub feedback: Vec<FeedbackView>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreatePetRequest {
    pub name: String,
    pub species: Species,
    pub breed: Option<String>,
    pub age: Option<i32>,
    pub gender: Option<String>,
    pub size: Option<PetSize>,
    pub color: Option<String>,
    pub description: Option<String>,
    pub health_status: Option<String>,
    pub vaccination_status: Option<String>,
    pub spayed_neutered: Option<bool>,
    pub good_with_kids: Option<bool>,
    pub good_with_pets: Option<bool>,
    pub energy_level: Option<String>,
    pub image_url: Option<String>,
    pub status: Option<PetStatus>,
}

impl CreatePetRequest {
    pub fn validate(&self) -> AppResult<()> {
        require_text("name", &self.name)?;
        validate_age(self.age)
    }
}

#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct UpdatePetRequest {
    pub name: Option<String>,
    pub species: Option<Species>,
    pub breed: Option<String>,
    pub age: Option<i32>,
    pub gender: Option<String>,
    pub size: Option<PetSize>,
    pub color: Option<String>,
    pub description: Option<String>,
    pub health_status: Option<String>,
    pub vaccination_status: Option<String>,
    pub spayed_neutered: Option<bool>,
    pub good_with_kids: Option<bool>,
    pub good_with_pets: Option<bool>,
    pub energy_level: Option<String>,
    pub image_url: Option<String>,
    pub status: Option<PetStatus>,
}

impl UpdatePetRequest {
    pub fn validate(&self) -> AppResult<()> {
        if let Some(name) = &self.name {
            require_text("name", name)?;
        }
        validate_age(self.age)
    }
}

fn validate_age(age: Option<i32>) -> AppResult<()> {
    match age {
        Some(age) if age < 0 => Err(AppError::Validation("age must not be negative".into())),
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn negative_age_is_invalid() {
        let update = UpdatePetRequest {
            age: Some(-1),
            ..Default::default()
        };
        assert!(matches!(update.validate(), Err(AppError::Validation(_))));

        let update = UpdatePetRequest {
            name: Some("Luna".into()),
            age: Some(4),
            ..Default::default()
        };
        assert!(update.validate().is_ok());
    }
}
