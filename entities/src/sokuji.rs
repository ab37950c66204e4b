use sea_orm::entity::prelude::*;

/// One live (or archived) sokuji per channel. `data` is the serialized
/// match state; `message` is the id of the summary message currently
/// representing it in the channel.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "sokuji")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub channel: i64,
    pub guild: i64,
    pub message: Option<i64>,
    #[sea_orm(column_type = "Text")]
    pub data: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
