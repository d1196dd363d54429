use sea_orm::entity::prelude::*;

use super::enums::VolunteerStatus;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "volunteers")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(unique)]
    pub user_id: Uuid,
    pub availability: Option<String>,
    pub skills: Option<String>,
    pub experience: Option<String>,
    pub status: VolunteerStatus,
    pub application_date: DateTimeWithTimeZone,
    pub approved_at: Option<DateTimeWithTimeZone>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
