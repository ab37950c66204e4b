use poise::command;

use super::{require_guild, Context, CommandResult};
use crate::{database::db, message_utils::success_message, sokuji::session::SokujiSession};

#[command(
    slash_command,
    prefix_command,
    guild_only,
    required_bot_permissions = "VIEW_CHANNEL | SEND_MESSAGES"
)]
/// Change the enemy team's tag
pub async fn tag(
    ctx: Context<'_>,
    #[description = "New enemy tag"]
    #[rest]
    name: String,
) -> CommandResult {
    let guild = require_guild(ctx)?;
    let channel = ctx.channel_id();
    let _guard = db().await.channel_lock(channel).lock_owned().await;
    let mut session = SokujiSession::get(ctx.serenity_context(), channel, guild, false).await?;
    session.mogi.tags[1] = name.clone();
    session.refresh(ctx.serenity_context()).await?;
    session.update_viewers().await;
    ctx.send(success_message(session.mogi.lang.pick(
        &format!("タグを**{name}**へ変更しました。"),
        &format!("Changed tag **{name}**."),
    )))
    .await?;
    Ok(())
}
