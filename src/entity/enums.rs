use std::fmt;

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, EnumIter, DeriveActiveEnum, Serialize, Deserialize, ToSchema,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
#[serde(rename_all = "snake_case")]
pub enum Role {
    #[sea_orm(string_value = "admin")]
    Admin,
    #[sea_orm(string_value = "vet")]
    Vet,
    #[sea_orm(string_value = "volunteer")]
    Volunteer,
    #[default]
    #[sea_orm(string_value = "user")]
    User,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize, ToSchema)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
#[serde(rename_all = "snake_case")]
pub enum Species {
    #[sea_orm(string_value = "dog")]
    Dog,
    #[sea_orm(string_value = "cat")]
    Cat,
    #[sea_orm(string_value = "bird")]
    Bird,
    #[sea_orm(string_value = "rabbit")]
    Rabbit,
    #[sea_orm(string_value = "other")]
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize, ToSchema)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
#[serde(rename_all = "snake_case")]
pub enum PetSize {
    #[sea_orm(string_value = "small")]
    Small,
    #[sea_orm(string_value = "medium")]
    Medium,
    #[sea_orm(string_value = "large")]
    Large,
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, EnumIter, DeriveActiveEnum, Serialize, Deserialize, ToSchema,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
#[serde(rename_all = "snake_case")]
pub enum PetStatus {
    #[default]
    #[sea_orm(string_value = "available")]
    Available,
    #[sea_orm(string_value = "under_review")]
    UnderReview,
    #[sea_orm(string_value = "adopted")]
    Adopted,
    #[sea_orm(string_value = "in_care")]
    InCare,
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, EnumIter, DeriveActiveEnum, Serialize, Deserialize, ToSchema,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
#[serde(rename_all = "snake_case")]
pub enum ApplicationStatus {
    #[default]
    #[sea_orm(string_value = "pending")]
    Pending,
    #[sea_orm(string_value = "under_review")]
    UnderReview,
    #[sea_orm(string_value = "approved")]
    Approved,
    #[sea_orm(string_value = "rejected")]
    Rejected,
}

impl ApplicationStatus {
    pub fn is_open(self) -> bool {
        matches!(self, Self::Pending | Self::UnderReview)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize, ToSchema)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
#[serde(rename_all = "snake_case")]
pub enum AppointmentType {
    #[sea_orm(string_value = "checkup")]
    Checkup,
    #[sea_orm(string_value = "vaccination")]
    Vaccination,
    #[sea_orm(string_value = "grooming")]
    Grooming,
    #[sea_orm(string_value = "emergency")]
    Emergency,
    #[sea_orm(string_value = "followup")]
    Followup,
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, EnumIter, DeriveActiveEnum, Serialize, Deserialize, ToSchema,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
#[serde(rename_all = "snake_case")]
pub enum AppointmentStatus {
    #[default]
    #[sea_orm(string_value = "scheduled")]
    Scheduled,
    #[sea_orm(string_value = "completed")]
    Completed,
    #[sea_orm(string_value = "cancelled")]
    Cancelled,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize, ToSchema)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
#[serde(rename_all = "snake_case")]
pub enum MedicalRecordType {
    #[sea_orm(string_value = "checkup")]
    Checkup,
    #[sea_orm(string_value = "vaccination")]
    Vaccination,
    #[sea_orm(string_value = "prescription")]
    Prescription,
    #[sea_orm(string_value = "consultation")]
    Consultation,
    #[sea_orm(string_value = "surgery")]
    Surgery,
    #[sea_orm(string_value = "other")]
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize, ToSchema)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
#[serde(rename_all = "snake_case")]
pub enum ReminderStatus {
    #[sea_orm(string_value = "pending")]
    Pending,
    #[sea_orm(string_value = "completed")]
    Completed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize, ToSchema)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
#[serde(rename_all = "snake_case")]
pub enum ProductCategory {
    #[sea_orm(string_value = "food")]
    Food,
    #[sea_orm(string_value = "toys")]
    Toys,
    #[sea_orm(string_value = "accessories")]
    Accessories,
    #[sea_orm(string_value = "health")]
    Health,
    #[sea_orm(string_value = "grooming")]
    Grooming,
    #[sea_orm(string_value = "other")]
    Other,
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, EnumIter, DeriveActiveEnum, Serialize, Deserialize, ToSchema,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    #[default]
    #[sea_orm(string_value = "pending")]
    Pending,
    #[sea_orm(string_value = "processing")]
    Processing,
    #[sea_orm(string_value = "delivered")]
    Delivered,
    #[sea_orm(string_value = "cancelled")]
    Cancelled,
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, EnumIter, DeriveActiveEnum, Serialize, Deserialize, ToSchema,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
#[serde(rename_all = "snake_case")]
pub enum VolunteerStatus {
    #[default]
    #[sea_orm(string_value = "pending")]
    Pending,
    #[sea_orm(string_value = "approved")]
    Approved,
    #[sea_orm(string_value = "rejected")]
    Rejected,
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, EnumIter, DeriveActiveEnum, Serialize, Deserialize, ToSchema,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
#[serde(rename_all = "snake_case")]
pub enum ActivityStatus {
    #[default]
    #[sea_orm(string_value = "open")]
    Open,
    #[sea_orm(string_value = "full")]
    Full,
    #[sea_orm(string_value = "closed")]
    Closed,
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, EnumIter, DeriveActiveEnum, Serialize, Deserialize, ToSchema,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
#[serde(rename_all = "snake_case")]
pub enum AssignmentStatus {
    #[default]
    #[sea_orm(string_value = "assigned")]
    Assigned,
    #[sea_orm(string_value = "completed")]
    Completed,
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, EnumIter, DeriveActiveEnum, Serialize, Deserialize, ToSchema,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
#[serde(rename_all = "snake_case")]
pub enum DonationType {
    #[default]
    #[sea_orm(string_value = "one_time")]
    OneTime,
    #[sea_orm(string_value = "monthly")]
    Monthly,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize, ToSchema)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
#[serde(rename_all = "snake_case")]
pub enum ArticleCategory {
    #[sea_orm(string_value = "health")]
    Health,
    #[sea_orm(string_value = "nutrition")]
    Nutrition,
    #[sea_orm(string_value = "training")]
    Training,
    #[sea_orm(string_value = "behavior")]
    Behavior,
    #[sea_orm(string_value = "grooming")]
    Grooming,
    #[sea_orm(string_value = "general")]
    General,
}

// Status enums print as their stored value.
macro_rules! display_as_value {
    ($($ty:ty),* $(,)?) => {
        $(
            impl fmt::Display for $ty {
                fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                    f.write_str(&self.to_value())
                }
            }
        )*
    };
}

display_as_value!(
    Role,
    PetStatus,
    ApplicationStatus,
    AppointmentStatus,
    OrderStatus,
    VolunteerStatus,
    ActivityStatus,
    AssignmentStatus,
    ReminderStatus,
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn statuses_display_as_stored_value() {
        assert_eq!(ApplicationStatus::UnderReview.to_string(), "under_review");
        assert_eq!(Role::Vet.to_string(), "vet");
        assert_eq!(OrderStatus::Processing.to_string(), "processing");
    }

    #[test]
    fn serde_uses_snake_case_values() {
        let status: ApplicationStatus = serde_json::from_str("\"under_review\"").unwrap();
        assert_eq!(status, ApplicationStatus::UnderReview);
        assert_eq!(
            serde_json::to_string(&DonationType::OneTime).unwrap(),
            "\"one_time\""
        );
    }

    #[test]
    fn stored_values_round_trip_through_active_enum() {
        let role = Role::try_from_value(&"volunteer".to_string()).unwrap();
        assert_eq!(role, Role::Volunteer);
        assert!(Role::try_from_value(&"root".to_string()).is_err());
    }

    #[test]
    fn only_pending_and_under_review_are_open() {
        assert!(ApplicationStatus::Pending.is_open());
        assert!(ApplicationStatus::UnderReview.is_open());
        assert!(!ApplicationStatus::Approved.is_open());
        assert!(!ApplicationStatus::Rejected.is_open());
    }
}
