use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "people")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(column_type = "String(StringLen::N(100))")]
    pub name: String,
    pub height: Option<i32>,
    pub mass: Option<i32>,
    #[sea_orm(column_type = "String(StringLen::N(50))", nullable)]
    pub hair_color: Option<String>,
    #[sea_orm(column_type = "String(StringLen::N(50))", nullable)]
    pub skin_color: Option<String>,
    #[sea_orm(column_type = "String(StringLen::N(50))", nullable)]
    pub eye_color: Option<String>,
    /// Free-form, e.g. "19BBY".
    #[sea_orm(column_type = "String(StringLen::N(20))", nullable)]
    pub birth_year: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::favorite_people::Entity")]
    FavoritePeople,
}

impl Related<super::favorite_people::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::FavoritePeople.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
