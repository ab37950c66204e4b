use std::collections::BTreeSet;

use poise::serenity_prelude::{self, RoleId};
use thiserror::Error;

use crate::sokuji::SokujiError;

pub mod banner;
pub mod help;
pub mod mogi;
pub mod penalty;
pub mod race;
pub mod result;
pub mod tag;
pub mod team;

pub type Context<'a> = poise::Context<'a, (), CommandError>;

#[derive(Debug, Error)]
pub enum CommandError {
    #[error("{0}")]
    Expected(String),
    #[error(transparent)]
    Unexpected(anyhow::Error),
}

impl From<serenity_prelude::Error> for CommandError {
    fn from(value: serenity_prelude::Error) -> Self {
        Self::Unexpected(value.into())
    }
}

impl From<SokujiError> for CommandError {
    fn from(value: SokujiError) -> Self {
        Self::Expected(value.bilingual())
    }
}

pub type CommandResult = Result<(), CommandError>;

fn require_guild(ctx: Context<'_>) -> Result<serenity_prelude::GuildId, CommandError> {
    ctx.guild_id().ok_or_else(|| {
        CommandError::Expected(String::from("This command can only be used in a server."))
    })
}

/// Usernames of every cached member holding `role`.
fn role_member_names(ctx: Context<'_>, role: RoleId) -> BTreeSet<String> {
    ctx.guild().map_or_else(BTreeSet::new, |guild| {
        guild
            .members
            .values()
            .filter(|member| member.roles.contains(&role))
            .map(|member| member.user.name.clone())
            .collect()
    })
}
