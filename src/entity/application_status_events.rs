use sea_orm::entity::prelude::*;

use super::enums::{ApplicationStatus, Role};

/// One row per effective adoption-application transition.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "application_status_events")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub application_id: Uuid,
    pub from_status: ApplicationStatus,
    pub to_status: ApplicationStatus,
    pub actor_id: Uuid,
    pub actor_role: Role,
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::adoption_applications::Entity",
        from = "Column::ApplicationId",
        to = "super::adoption_applications::Column::Id"
    )]
    AdoptionApplications,
}

impl Related<super::adoption_applications::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::AdoptionApplications.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
