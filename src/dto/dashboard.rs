use serde::Serialize;
use utoipa::ToSchema;

use crate::{
    dto::{
        applications::ApplicationSummary, appointments::AppointmentView, medical::ReminderView,
    },
    entity::enums::Role,
    models::Pet,
};

/// The signed-in user's landing page.
#[derive(Debug, Serialize, ToSchema)]
pub struct Dashboard {
    pub role: Role,
    pub favorites: Vec<Pet>,
    pub applications: Vec<ApplicationSummary>,
    pub upcoming_appointments: Vec<AppointmentView>,
    pub vaccination_reminders: Vec<ReminderView>,
}

#[derive(Debug, Default, Serialize, ToSchema, PartialEq, Eq)]
pub struct AdminOverview {
    pub pending_applications: i64,
    pub available_pets: i64,
    pub pending_volunteers: i64,
    pub scheduled_appointments: i64,
    pub pending_orders: i64,
}
