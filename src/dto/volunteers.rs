use chrono::{DateTime, NaiveDate, Utc};
use sea_orm::FromQueryResult;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::{
    dto::require_text,
    entity::enums::{ActivityStatus, AssignmentStatus, VolunteerStatus},
    error::{AppError, AppResult},
    models::VolunteerActivity,
};

#[derive(Debug, Deserialize, ToSchema)]
pub struct VolunteerSignUpRequest {
    pub availability: Option<String>,
    pub skills: Option<String>,
    pub experience: Option<String>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateVolunteerStatusRequest {
    pub status: VolunteerStatus,
}

#[derive(Debug, Clone, Serialize, ToSchema, FromQueryResult)]
pub struct VolunteerView {
    pub id: Uuid,
    pub user_id: Uuid,
    pub email: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub availability: Option<String>,
    pub skills: Option<String>,
    pub experience: Option<String>,
    pub status: VolunteerStatus,
    pub application_date: DateTime<Utc>,
    pub approved_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(transparent)]
pub struct VolunteerList {
    #[schema(value_type = Vec<VolunteerView>)]
    pub items: Vec<VolunteerView>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateActivityRequest {
    pub title: String,
    pub description: Option<String>,
    pub date: NaiveDate,
    pub time: Option<String>,
    pub location: Option<String>,
    pub volunteers_needed: i32,
}

impl CreateActivityRequest {
    pub fn validate(&self) -> AppResult<()> {
        require_text("title", &self.title)?;
        if self.volunteers_needed < 1 {
            return Err(AppError::Validation(
                "volunteers_needed must be at least 1".into(),
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(transparent)]
pub struct ActivityList {
    #[schema(value_type = Vec<VolunteerActivity>)]
    pub items: Vec<VolunteerActivity>,
}

#[derive(Debug, Clone, Serialize, ToSchema, FromQueryResult)]
pub struct AssignmentView {
    pub id: Uuid,
    pub volunteer_id: Uuid,
    pub activity_id: Uuid,
    pub activity_title: String,
    pub activity_date: NaiveDate,
    pub activity_time: Option<String>,
    pub activity_location: Option<String>,
    pub status: AssignmentStatus,
    pub assigned_at: DateTime<Utc>,
    pub completed_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(transparent)]
pub struct AssignmentList {
    #[schema(value_type = Vec<AssignmentView>)]
    pub items: Vec<AssignmentView>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActivityCapacity {
    pub status: ActivityStatus,
    pub needed: i32,
    pub assigned: i32,
}

impl ActivityCapacity {
    /// Validates a new sign-up and returns the counters after it.
    pub fn admit(self) -> AppResult<ActivityCapacity> {
        if self.status == ActivityStatus::Closed {
            return Err(AppError::BadRequest("Activity is closed".into()));
        }
        if self.status == ActivityStatus::Full || self.assigned >= self.needed {
            return Err(AppError::Conflict("Activity is full".into()));
        }
        let assigned = self.assigned + 1;
        let status = if assigned >= self.needed {
            ActivityStatus::Full
        } else {
            ActivityStatus::Open
        };
        Ok(ActivityCapacity {
            status,
            needed: self.needed,
            assigned,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn capacity(status: ActivityStatus, needed: i32, assigned: i32) -> ActivityCapacity {
        ActivityCapacity {
            status,
            needed,
            assigned,
        }
    }

    #[test]
    fn last_slot_flips_activity_to_full() {
        let next = capacity(ActivityStatus::Open, 2, 1).admit().unwrap();
        assert_eq!(next.assigned, 2);
        assert_eq!(next.status, ActivityStatus::Full);

        let next = capacity(ActivityStatus::Open, 3, 0).admit().unwrap();
        assert_eq!(next.status, ActivityStatus::Open);
    }

    #[test]
    fn full_activity_rejects_sign_up() {
        let err = capacity(ActivityStatus::Open, 2, 2).admit().unwrap_err();
        assert!(matches!(err, AppError::Conflict(msg) if msg == "Activity is full"));

        let err = capacity(ActivityStatus::Full, 2, 2).admit().unwrap_err();
        assert!(matches!(err, AppError::Conflict(_)));
    }

    #[test]
    fn closed_activity_rejects_sign_up() {
        let err = capacity(ActivityStatus::Closed, 5, 0).admit().unwrap_err();
        assert!(matches!(err, AppError::BadRequest(_)));
    }
}
