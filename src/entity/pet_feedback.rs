use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "pet_feedback")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(unique)]
    pub adoption_application_id: Uuid,
    pub pet_id: Uuid,
    pub user_id: Uuid,
    pub rating: i32,
    pub comment: String,
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::adoption_applications::Entity",
        from = "Column::AdoptionApplicationId",
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
