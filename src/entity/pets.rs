use sea_orm::entity::prelude::*;

use super::enums::{PetSize, PetStatus, Species};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "pets")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub name: String,
    pub species: Species,
    pub breed: Option<String>,
    pub age: Option<i32>,
    pub gender: Option<String>,
    pub size: Option<PetSize>,
    pub color: Option<String>,
    pub description: Option<String>,
    pub health_status: Option<String>,
    pub vaccination_status: Option<String>,
    pub spayed_neutered: Option<bool>,
    pub good_with_kids: Option<bool>,
    pub good_with_pets: Option<bool>,
    pub energy_level: Option<String>,
    pub image_url: Option<String>,
    pub status: PetStatus,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::adoption_applications::Entity")]
    AdoptionApplications,
    #[sea_orm(has_many = "super::user_favorites::Entity")]
    UserFavorites,
    #[sea_orm(has_many = "super::medical_records::Entity")]
    MedicalRecords,
    #[sea_orm(has_many = "super::vet_appointments::Entity")]
    VetAppointments,
}

impl Related<super::adoption_applications::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::AdoptionApplications.def()
    }
}

impl Related<super::user_favorites::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::UserFavorites.def()
    }
}

impl Related<super::medical_records::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::MedicalRecords.def()
    }
}

impl Related<super::vet_appointments::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::VetAppointments.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
