use poise::command;

use super::{require_guild, Context, CommandResult};
use crate::{
    constants::DEFAULT_PENALTY,
    database::db,
    message_utils::success_message,
    sokuji::session::SokujiSession,
};

#[derive(Debug, Clone, Copy, poise::ChoiceParameter)]
pub enum PenaltyKind {
    #[name = "Repick"]
    Repick,
    #[name = "Penalty"]
    Penalty,
}

#[derive(Debug, Clone, Copy, poise::ChoiceParameter)]
pub enum PenaltyTarget {
    #[name = "Your team"]
    Own,
    #[name = "Enemy"]
    Enemy,
}

#[allow(clippy::unused_async)]
#[command(slash_command, subcommands("add", "clear"), guild_only)]
/// Score adjustments on the running mogi
pub async fn penalty(_: Context<'_>) -> CommandResult {
    Ok(())
}

#[command(
    slash_command,
    guild_only,
    required_bot_permissions = "VIEW_CHANNEL | SEND_MESSAGES"
)]
/// Add a repick or penalty adjustment
pub async fn add(
    ctx: Context<'_>,
    #[description = "Adjustment kind; repick when omitted"] kind: Option<PenaltyKind>,
    #[description = "Team to adjust; your team when omitted"] target: Option<PenaltyTarget>,
    #[description = "Points; -15 when omitted"] amount: Option<i32>,
) -> CommandResult {
    let guild = require_guild(ctx)?;
    let channel = ctx.channel_id();
    let _guard = db().await.channel_lock(channel).lock_owned().await;
    let mut session = SokujiSession::get(ctx.serenity_context(), channel, guild, false).await?;
    let index = usize::from(matches!(target, Some(PenaltyTarget::Enemy)));
    let amount = amount.unwrap_or(DEFAULT_PENALTY);
    match kind.unwrap_or(PenaltyKind::Repick) {
        PenaltyKind::Repick => session.mogi.repick[index] += amount,
        PenaltyKind::Penalty => session.mogi.penalty[index] += amount,
    }
    session.refresh(ctx.serenity_context()).await?;
    session.update_viewers().await;
    ctx.send(success_message(
        session
            .mogi
            .lang
            .pick("ペナルティを追加しました。", "Added penalty."),
    ))
    .await?;
    Ok(())
}

#[command(
    slash_command,
    guild_only,
    required_bot_permissions = "VIEW_CHANNEL | SEND_MESSAGES"
)]
/// Reset an adjustment to zero
pub async fn clear(
    ctx: Context<'_>,
    #[description = "Adjustment kind; repick when omitted"] kind: Option<PenaltyKind>,
) -> CommandResult {
    let guild = require_guild(ctx)?;
    let channel = ctx.channel_id();
    let _guard = db().await.channel_lock(channel).lock_owned().await;
    let mut session = SokujiSession::get(ctx.serenity_context(), channel, guild, false).await?;
    match kind.unwrap_or(PenaltyKind::Repick) {
        PenaltyKind::Repick => session.mogi.repick = [0, 0],
        PenaltyKind::Penalty => session.mogi.penalty = [0, 0],
    }
    session.refresh(ctx.serenity_context()).await?;
    session.update_viewers().await;
    ctx.send(success_message(
        session
            .mogi
            .lang
            .pick("ペナルティを削除しました。", "Cleared penalty."),
    ))
    .await?;
    Ok(())
}
