use sea_orm::entity::prelude::*;

/// A registered match result.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "match_result")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub guild: i64,
    pub enemy: String,
    pub score: i32,
    pub enemy_score: i32,
    pub date: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
