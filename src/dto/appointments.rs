use chrono::{DateTime, Utc};
use sea_orm::FromQueryResult;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::{
    entity::enums::{AppointmentStatus, AppointmentType},
    error::{AppError, AppResult},
};

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateAppointmentRequest {
    pub pet_id: Uuid,
    pub appointment_date: DateTime<Utc>,
    pub appointment_type: AppointmentType,
    pub reason: Option<String>,
}

impl CreateAppointmentRequest {
    pub fn validate(&self, now: DateTime<Utc>) -> AppResult<()> {
        if self.appointment_date <= now {
            return Err(AppError::Validation(
                "appointment_date must be in the future".into(),
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateAppointmentStatusRequest {
    pub status: AppointmentStatus,
    pub notes: Option<String>,
}

/// Appointment joined with the pet and the owner's name.
#[derive(Debug, Clone, Serialize, ToSchema, FromQueryResult)]
pub struct AppointmentView {
    pub id: Uuid,
    pub pet_id: Uuid,
    pub pet_name: String,
    pub user_id: Uuid,
    pub owner_email: Option<String>,
    pub owner_first_name: Option<String>,
    pub owner_last_name: Option<String>,
    pub appointment_date: DateTime<Utc>,
    pub appointment_type: AppointmentType,
    pub reason: Option<String>,
    pub notes: Option<String>,
    pub status: AppointmentStatus,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(transparent)]
pub struct AppointmentList {
    #[schema(value_type = Vec<AppointmentView>)]
    pub items: Vec<AppointmentView>,
}

#[cfg(test)]
mod tests {
    use chrono::Duration;

    use super::*;

    #[test]
    fn appointments_must_be_in_the_future() {
        let now = Utc::now();
        let mut req = CreateAppointmentRequest {
            pet_id: Uuid::new_v4(),
            appointment_date: now - Duration::minutes(5),
            appointment_type: AppointmentType::Checkup,
            reason: None,
        };
        assert!(matches!(req.validate(now), Err(AppError::Validation(_))));

        req.appointment_date = now + Duration::days(2);
        assert!(req.validate(now).is_ok());
    }
}
