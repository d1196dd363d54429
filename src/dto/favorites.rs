use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::models::Pet;

#[derive(Debug, Serialize, ToSchema)]
#[serde(transparent)]
pub struct FavoritePetList {
    #[schema(value_type = Vec<Pet>)]
    pub items: Vec<Pet>,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(transparent)]
pub struct FavoriteIds {
    #[schema(value_type = Vec<Uuid>)]
    pub items: Vec<Uuid>,
}

/// Membership of one pet in the caller's favorites after a write.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
pub struct FavoriteState {
    pub pet_id: Uuid,
    pub favorited: bool,
}
