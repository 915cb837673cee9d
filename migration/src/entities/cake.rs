//! Cake entity: one mandatory slot each for level/shape/topping,
//! optional berries and decor, plus free-text inscription.

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq)]
#[sea_orm(table_name = "cakes")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Catalog cake (true) vs customer-composed cake (false)
    pub is_original: bool,
    pub title: Option<String>,
    pub image: Option<String>,
    #[sea_orm(column_type = "Text", nullable)]
    pub description: Option<String>,
    /// Inscription baked onto the cake
    pub text: Option<String>,
    pub level_id: i64,
    pub shape_id: i64,
    pub topping_id: i64,
    pub berries_id: Option<i64>,
    pub decor_id: Option<i64>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::level::Entity",
        from = "Column::LevelId",
        to = "super::level::Column::Id",
        on_update = "Cascade",
        on_delete = "Restrict"
    )]
    Level,
    #[sea_orm(
        belongs_to = "super::shape::Entity",
        from = "Column::ShapeId",
        to = "super::shape::Column::Id",
        on_update = "Cascade",
        on_delete = "Restrict"
    )]
    Shape,
    #[sea_orm(
        belongs_to = "super::topping::Entity",
        from = "Column::ToppingId",
        to = "super::topping::Column::Id",
        on_update = "Cascade",
        on_delete = "Restrict"
    )]
    Topping,
    #[sea_orm(
        belongs_to = "super::berries::Entity",
        from = "Column::BerriesId",
        to = "super::berries::Column::Id",
        on_update = "Cascade",
        on_delete = "SetNull"
    )]
    Berries,
    #[sea_orm(
        belongs_to = "super::decor::Entity",
        from = "Column::DecorId",
        to = "super::decor::Column::Id",
        on_update = "Cascade",
        on_delete = "SetNull"
    )]
    Decor,
}

impl Related<super::level::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Level.def()
    }
}

impl Related<super::shape::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Shape.def()
    }
}

impl Related<super::topping::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Topping.def()
    }
}

impl Related<super::berries::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Berries.def()
    }
}

impl Related<super::decor::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Decor.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
