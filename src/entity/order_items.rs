use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "order_items")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub order_id: Uuid,
    pub product_id: Uuid,
    pub quantity: i32,
    pub price: i64,
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::store_orders::Entity",
        from = "Column::OrderId",
        to = "super::store_orders::Column::Id"
    )]
    StoreOrders,
    #[sea_orm(
        belongs_to = "super::store_products::Entity",
        from = "Column::ProductId",
        to = "super::store_products::Column::Id"
    )]
    StoreProducts,
}

impl Related<super::store_orders::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::StoreOrders.def()
    }
}

impl Related<super::store_products::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::StoreProducts.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
