use chrono::NaiveDate;
use sea_orm::FromQueryResult;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::{
    dto::require_text,
    entity::enums::{MedicalRecordType, ReminderStatus},
    error::{AppError, AppResult},
    models::MedicalRecord,
};

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateMedicalRecordRequest {
    pub record_type: MedicalRecordType,
    pub description: String,
    pub date: NaiveDate,
    pub veterinarian: Option<String>,
}

impl CreateMedicalRecordRequest {
    pub fn validate(&self) -> AppResult<()> {
        require_text("description", &self.description)
    }
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(transparent)]
pub struct MedicalRecordList {
    #[schema(value_type = Vec<MedicalRecord>)]
    pub items: Vec<MedicalRecord>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateReminderRequest {
    /// Owner who sees the reminder on their dashboard.
    pub user_id: Uuid,
    pub vaccine_name: String,
    pub due_date: NaiveDate,
}

impl CreateReminderRequest {
    pub fn validate(&self, today: NaiveDate) -> AppResult<()> {
        require_text("vaccine_name", &self.vaccine_name)?;
        if self.due_date < today {
            return Err(AppError::Validation("due_date must not be in the past".into()));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, ToSchema, FromQueryResult)]
pub struct ReminderView {
    pub id: Uuid,
    pub pet_id: Uuid,
    pub pet_name: String,
    pub vaccine_name: String,
    pub due_date: NaiveDate,
    pub status: ReminderStatus,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reminder(name: &str, due_date: NaiveDate) -> CreateReminderRequest {
        CreateReminderRequest {
            user_id: Uuid::new_v4(),
            vaccine_name: name.into(),
            due_date,
        }
    }

    #[test]
    fn reminders_need_a_name_and_a_current_date() {
        let today = NaiveDate::from_ymd_opt(2025, 3, 10).unwrap();
        let yesterday = NaiveDate::from_ymd_opt(2025, 3, 9).unwrap();

        assert!(reminder("Rabies", today).validate(today).is_ok());
        assert!(matches!(
            reminder("Rabies", yesterday).validate(today),
            Err(AppError::Validation(_))
        ));
        assert!(matches!(
            reminder(" ", today).validate(today),
            Err(AppError::Validation(_))
        ));
    }
}
