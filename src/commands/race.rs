use poise::command;

use super::{require_guild, Context, CommandResult};
use crate::{database::db, message_utils::success_message, sokuji::session::SokujiSession};

#[allow(clippy::unused_async)]
#[command(slash_command, subcommands("add", "delete", "edit"), guild_only)]
/// Race operations on the running mogi
pub async fn race(_: Context<'_>) -> CommandResult {
    Ok(())
}

#[command(
    slash_command,
    guild_only,
    required_bot_permissions = "VIEW_CHANNEL | SEND_MESSAGES"
)]
/// Record a race result
pub async fn add(
    ctx: Context<'_>,
    #[description = "Finishing positions without spaces (e.g. 12456 or 1-5)"] rank: String,
    #[description = "Course name"] track: Option<String>,
    #[description = "1-based slot to insert at; appended when omitted"]
    #[min = 1]
    #[max = 12]
    race_num: Option<u32>,
) -> CommandResult {
    let guild = require_guild(ctx)?;
    let channel = ctx.channel_id();
    let _guard = db().await.channel_lock(channel).lock_owned().await;
    let mut session = SokujiSession::get(ctx.serenity_context(), channel, guild, false).await?;
    session
        .mogi
        .add_race(&rank, track.as_deref(), race_num.map(|n| n as usize))?;
    session.send(ctx.serenity_context(), None).await?;
    session.update_viewers().await;
    ctx.send(success_message(
        session
            .mogi
            .lang
            .pick("レースを追加しました。", "Added race."),
    ))
    .await?;
    Ok(())
}

#[command(
    slash_command,
    guild_only,
    required_bot_permissions = "VIEW_CHANNEL | SEND_MESSAGES"
)]
/// Delete a race
pub async fn delete(
    ctx: Context<'_>,
    #[description = "1-based slot to delete; the last race when omitted"]
    #[min = 1]
    #[max = 12]
    race_num: Option<u32>,
) -> CommandResult {
    let guild = require_guild(ctx)?;
    let channel = ctx.channel_id();
    let _guard = db().await.channel_lock(channel).lock_owned().await;
    let mut session = SokujiSession::get(ctx.serenity_context(), channel, guild, false).await?;
    session.mogi.back(race_num.map(|n| n as usize))?;
    session.refresh(ctx.serenity_context()).await?;
    session.update_viewers().await;
    ctx.send(success_message(
        session
            .mogi
            .lang
            .pick("レースを削除しました。", "Deleted race."),
    ))
    .await?;
    Ok(())
}

#[command(
    slash_command,
    guild_only,
    required_bot_permissions = "VIEW_CHANNEL | SEND_MESSAGES"
)]
/// Replace a recorded race
pub async fn edit(
    ctx: Context<'_>,
    #[description = "Finishing positions without spaces"] rank: Option<String>,
    #[description = "Course name"] track: Option<String>,
    #[description = "1-based slot to edit; the last race when omitted"]
    #[min = 1]
    #[max = 12]
    race_num: Option<u32>,
) -> CommandResult {
    let guild = require_guild(ctx)?;
    let channel = ctx.channel_id();
    let _guard = db().await.channel_lock(channel).lock_owned().await;
    let mut session = SokujiSession::get(ctx.serenity_context(), channel, guild, false).await?;
    session.mogi.edit_race(
        race_num.map(|n| n as usize),
        rank.as_deref(),
        track.as_deref(),
    )?;
    session.refresh(ctx.serenity_context()).await?;
    session.update_viewers().await;
    ctx.send(success_message(
        session
            .mogi
            .lang
            .pick("レースを編集しました。", "Edited race."),
    ))
    .await?;
    Ok(())
}
