use poise::{command, serenity_prelude::Role, CreateReply};

use super::{banner, penalty, race, require_guild, role_member_names, Context, CommandResult};
use crate::{
    database::db,
    message_utils::success_message,
    sokuji::{
        session::{banner_embed, SokujiSession},
        Lang, Mogi,
    },
};

#[derive(Debug, Clone, Copy, poise::ChoiceParameter)]
pub enum LangChoice {
    #[name = "Japanese"]
    Japanese,
    #[name = "English"]
    English,
}

impl From<LangChoice> for Lang {
    fn from(value: LangChoice) -> Self {
        match value {
            LangChoice::Japanese => Self::Ja,
            LangChoice::English => Self::En,
        }
    }
}

#[allow(clippy::unused_async)]
#[command(
    slash_command,
    subcommands(
        "start",
        "end",
        "resume",
        "edit",
        "race::race",
        "penalty::penalty",
        "banner::banner"
    ),
    guild_only
)]
/// Live scoring for a 6v6 war
pub async fn mogi(_: Context<'_>) -> CommandResult {
    Ok(())
}

#[command(
    slash_command,
    guild_only,
    required_bot_permissions = "VIEW_CHANNEL | SEND_MESSAGES"
)]
/// Start scoring a mogi in this channel
pub async fn start(
    ctx: Context<'_>,
    #[description = "Enemy team name"] enemy: String,
    #[description = "Role whose members get banner updates"] role: Option<Role>,
) -> CommandResult {
    let guild = require_guild(ctx)?;
    let channel = ctx.channel_id();
    let _guard = db().await.channel_lock(channel).lock_owned().await;
    let name = match db().await.team_name(guild).await? {
        Some(name) => name,
        None => ctx
            .guild()
            .map_or_else(|| String::from("Home"), |guild| guild.name.clone()),
    };
    let mut mogi = Mogi::new([name, enemy], Lang::from_locale(ctx.locale()));
    if let Some(role) = &role {
        mogi.banner_users = role_member_names(ctx, role.id);
    }
    let mut session = SokujiSession::new(channel, guild, mogi);
    session.send(ctx.serenity_context(), None).await?;
    session.update_viewers().await;
    if session.mogi.banner_users.is_empty() {
        ctx.send(success_message(
            session
                .mogi
                .lang
                .pick("即時集計を開始しました。", "Started sokuji."),
        ))
        .await?;
    } else {
        ctx.send(CreateReply::default().embed(banner_embed(&session.mogi.banner_users)))
            .await?;
    }
    Ok(())
}

#[command(
    slash_command,
    guild_only,
    required_bot_permissions = "VIEW_CHANNEL | SEND_MESSAGES"
)]
/// Finish the mogi in this channel
pub async fn end(ctx: Context<'_>) -> CommandResult {
    let guild = require_guild(ctx)?;
    let channel = ctx.channel_id();
    let _guard = db().await.channel_lock(channel).lock_owned().await;
    let mut session = SokujiSession::get(ctx.serenity_context(), channel, guild, false).await?;
    session.mogi.is_archive = true;
    session.refresh(ctx.serenity_context()).await?;
    ctx.send(success_message(
        session
            .mogi
            .lang
            .pick("即時を終了しました。", "Finished sokuji."),
    ))
    .await?;
    Ok(())
}

#[command(
    slash_command,
    guild_only,
    required_bot_permissions = "VIEW_CHANNEL | SEND_MESSAGES"
)]
/// Reopen an archived mogi
pub async fn resume(ctx: Context<'_>) -> CommandResult {
    let guild = require_guild(ctx)?;
    let channel = ctx.channel_id();
    let _guard = db().await.channel_lock(channel).lock_owned().await;
    let mut session = SokujiSession::get(ctx.serenity_context(), channel, guild, true).await?;
    session.mogi.is_archive = false;
    session.refresh(ctx.serenity_context()).await?;
    ctx.send(success_message(
        session
            .mogi
            .lang
            .pick("即時を再開します。", "Resumed sokuji."),
    ))
    .await?;
    Ok(())
}

#[command(
    slash_command,
    guild_only,
    required_bot_permissions = "VIEW_CHANNEL | SEND_MESSAGES"
)]
/// Change the running mogi's settings
pub async fn edit(
    ctx: Context<'_>,
    #[description = "Enemy team name"] enemy: Option<String>,
    #[description = "Role whose members get banner updates"] role: Option<Role>,
    #[description = "Summary language"] language: Option<LangChoice>,
) -> CommandResult {
    let guild = require_guild(ctx)?;
    let channel = ctx.channel_id();
    let _guard = db().await.channel_lock(channel).lock_owned().await;
    let mut session = SokujiSession::get(ctx.serenity_context(), channel, guild, false).await?;
    if let Some(enemy) = enemy {
        session.mogi.tags[1] = enemy;
    }
    let mut lineup = None;
    if let Some(role) = &role {
        session.mogi.banner_users = role_member_names(ctx, role.id);
        lineup = Some(banner_embed(&session.mogi.banner_users));
    }
    if let Some(language) = language {
        session.mogi.lang = language.into();
    }
    session.refresh(ctx.serenity_context()).await?;
    session.update_viewers().await;
    let mut reply = CreateReply::default().content(
        session
            .mogi
            .lang
            .pick("即時を編集しました。", "Edited sokuji."),
    );
    if let Some(embed) = lineup {
        reply = reply.embed(embed);
    }
    ctx.send(reply).await?;
    Ok(())
}
