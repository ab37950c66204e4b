use sea_orm_migration::prelude::*;

pub struct Migration;

impl MigrationName for Migration {
    fn name(&self) -> &str {
        "m20260705_000001_init_database"
    }
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Sokuji::Table)
                    .col(
                        ColumnDef::new(Sokuji::Channel)
                            .primary_key()
                            .not_null()
                            .big_unsigned(),
                    )
                    .col(ColumnDef::new(Sokuji::Guild).not_null().big_unsigned())
                    .col(ColumnDef::new(Sokuji::Message).big_unsigned().unique_key())
                    .col(ColumnDef::new(Sokuji::Data).not_null().text())
                    .to_owned(),
            )
            .await?;
        manager
            .create_table(
                Table::create()
                    .table(MatchResult::Table)
                    .col(
                        ColumnDef::new(MatchResult::Id)
                            .primary_key()
                            .not_null()
                            .integer()
                            .auto_increment(),
                    )
                    .col(ColumnDef::new(MatchResult::Guild).not_null().big_unsigned())
                    .col(ColumnDef::new(MatchResult::Enemy).not_null().text())
                    .col(ColumnDef::new(MatchResult::Score).not_null().integer())
                    .col(
                        ColumnDef::new(MatchResult::EnemyScore)
                            .not_null()
                            .integer(),
                    )
                    .col(ColumnDef::new(MatchResult::Date).not_null().text())
                    .to_owned(),
            )
            .await?;
        manager
            .create_table(
                Table::create()
                    .table(Guild::Table)
                    .col(
                        ColumnDef::new(Guild::Id)
                            .primary_key()
                            .not_null()
                            .big_unsigned(),
                    )
                    .col(ColumnDef::new(Guild::Name).not_null().text())
                    .to_owned(),
            )
            .await?;
        manager
            .create_index(
                Index::create()
                    .table(Sokuji::Table)
                    .col(Sokuji::Guild)
                    .name("idx-sokuji-guild")
                    .to_owned(),
            )
            .await?;
        manager
            .create_index(
                Index::create()
                    .table(MatchResult::Table)
                    .col(MatchResult::Guild)
                    .name("idx-result-guild")
                    .to_owned(),
            )
            .await
    }
    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Sokuji::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(MatchResult::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Guild::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
pub enum Sokuji {
    Table,
    Channel,
    Guild,
    Message,
    Data,
}
#[derive(Iden)]
pub enum MatchResult {
    Table,
    Id,
    Guild,
    Enemy,
    Score,
    EnemyScore,
    Date,
}
#[derive(Iden)]
pub enum Guild {
    Table,
    Id,
    Name,
}
