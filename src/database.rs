#![allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]

use std::sync::Arc;

use ahash::RandomState;
use dashmap::DashMap;
use entities::{guild, prelude::*, result, sokuji};
use migration::{Migrator, MigratorTrait};
use moka::future::Cache;
use poise::serenity_prelude::{ChannelId, GuildId, MessageId};
use sea_orm::{
    prelude::*,
    ActiveValue::{NotSet, Set},
    QueryOrder,
};
use sea_query::OnConflict;
use tokio::sync::{Mutex, OnceCell};

use crate::{commands::CommandError, constants::DATABASE_URL};

static DATABASE: OnceCell<Database> = OnceCell::const_new();

pub async fn db() -> &'static Database {
    DATABASE
        .get_or_init(|| async {
            Database::new()
                .await
                .expect("Database should initialize successfully")
        })
        .await
}

impl From<DbErr> for CommandError {
    fn from(value: DbErr) -> Self {
        Self::Unexpected(value.into())
    }
}

impl From<Arc<DbErr>> for CommandError {
    fn from(value: Arc<DbErr>) -> Self {
        Self::Unexpected(value.into())
    }
}

pub struct Database {
    db: DatabaseConnection,
    team_names: Cache<GuildId, Option<String>, RandomState>,
    channel_locks: DashMap<ChannelId, Arc<Mutex<()>>, RandomState>,
}

impl Database {
    async fn new() -> Result<Self, DbErr> {
        let db = sea_orm::Database::connect(DATABASE_URL).await?;
        Migrator::up(&db, None).await?;
        Ok(Self {
            db,
            team_names: Cache::builder()
                .max_capacity(1000)
                .build_with_hasher(RandomState::new()),
            channel_locks: DashMap::with_hasher(RandomState::new()),
        })
    }

    /// Serializes the recover-mutate-persist sequence for one channel, so
    /// two commands racing on the same mogi cannot interleave.
    pub fn channel_lock(&self, channel: ChannelId) -> Arc<Mutex<()>> {
        self.channel_locks.entry(channel).or_default().clone()
    }

    pub async fn load_sokuji(&self, channel: ChannelId) -> Result<Option<sokuji::Model>, DbErr> {
        Sokuji::find_by_id(channel.get() as i64).one(&self.db).await
    }

    pub async fn save_sokuji(
        &self,
        channel: ChannelId,
        guild: GuildId,
        message: Option<MessageId>,
        data: String,
    ) -> Result<(), DbErr> {
        Sokuji::insert(sokuji::ActiveModel {
            channel: Set(channel.get() as i64),
            guild: Set(guild.get() as i64),
            message: Set(message.map(|id| id.get() as i64)),
            data: Set(data),
        })
        .on_conflict(
            OnConflict::column(sokuji::Column::Channel)
                .update_columns([
                    sokuji::Column::Guild,
                    sokuji::Column::Message,
                    sokuji::Column::Data,
                ])
                .to_owned(),
        )
        .exec_without_returning(&self.db)
        .await?;
        Ok(())
    }

    pub async fn team_name(&self, guild: GuildId) -> Result<Option<String>, Arc<DbErr>> {
        self.team_names
            .try_get_with(guild, async {
                Ok(Guild::find_by_id(guild.get() as i64)
                    .one(&self.db)
                    .await?
                    .map(|row| row.name))
            })
            .await
    }

    pub async fn set_team_name(&self, guild: GuildId, name: String) -> Result<(), DbErr> {
        Guild::insert(guild::ActiveModel {
            id: Set(guild.get() as i64),
            name: Set(name),
        })
        .on_conflict(
            OnConflict::column(guild::Column::Id)
                .update_column(guild::Column::Name)
                .to_owned(),
        )
        .exec_without_returning(&self.db)
        .await?;
        self.team_names.invalidate(&guild).await;
        Ok(())
    }

    pub async fn add_result(
        &self,
        guild: GuildId,
        enemy: String,
        score: i32,
        enemy_score: i32,
        date: String,
    ) -> Result<(), DbErr> {
        MatchResult::insert(result::ActiveModel {
            id: NotSet,
            guild: Set(guild.get() as i64),
            enemy: Set(enemy),
            score: Set(score),
            enemy_score: Set(enemy_score),
            date: Set(date),
        })
        .exec_without_returning(&self.db)
        .await?;
        Ok(())
    }

    pub async fn results(&self, guild: GuildId) -> Result<Vec<result::Model>, DbErr> {
        MatchResult::find()
            .filter(result::Column::Guild.eq(guild.get() as i64))
            .order_by_asc(result::Column::Date)
            .all(&self.db)
            .await
    }
}
