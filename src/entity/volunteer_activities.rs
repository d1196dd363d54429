use sea_orm::entity::prelude::*;

use super::enums::ActivityStatus;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "volunteer_activities")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub date: Date,
    pub time: Option<String>,
    pub location: Option<String>,
    pub volunteers_needed: i32,
    pub volunteers_assigned: i32,
    pub status: ActivityStatus,
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::volunteer_assignments::Entity")]
    VolunteerAssignments,
}

impl Related<super::volunteer_assignments::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::VolunteerAssignments.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
