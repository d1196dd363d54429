use sea_orm::entity::prelude::*;

use super::enums::AssignmentStatus;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "volunteer_assignments")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub volunteer_id: Uuid,
    pub activity_id: Uuid,
    pub status: AssignmentStatus,
    pub assigned_at: DateTimeWithTimeZone,
    pub completed_at: Option<DateTimeWithTimeZone>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::volunteer_activities::Entity",
        from = "Column::ActivityId",
        to = "super::volunteer_activities::Column::Id"
    )]
    VolunteerActivities,
}

impl Related<super::volunteer_activities::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::VolunteerActivities.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
