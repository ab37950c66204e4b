use std::collections::BTreeSet;

use poise::{
    command,
    serenity_prelude::{Member, Role},
    CreateReply,
};

use super::{require_guild, role_member_names, Context, CommandResult};
use crate::{
    database::db,
    message_utils::success_message,
    sokuji::session::{banner_embed, SokujiSession},
};

#[allow(clippy::unused_async)]
#[command(slash_command, subcommands("add", "remove"), guild_only)]
/// Stream-overlay subscriptions for the running mogi
pub async fn banner(_: Context<'_>) -> CommandResult {
    Ok(())
}

fn requested_users(
    ctx: Context<'_>,
    member: Option<&Member>,
    role: Option<&Role>,
) -> BTreeSet<String> {
    let mut users: BTreeSet<String> = match member {
        Some(member) => [member.user.name.clone()].into(),
        None => [ctx.author().name.clone()].into(),
    };
    if let Some(role) = role {
        users.extend(role_member_names(ctx, role.id));
    }
    users
}

#[command(
    slash_command,
    guild_only,
    required_bot_permissions = "VIEW_CHANNEL | SEND_MESSAGES"
)]
/// Subscribe to live score updates (you, when nobody is named)
pub async fn add(
    ctx: Context<'_>,
    #[description = "User to subscribe"] member: Option<Member>,
    #[description = "Role whose members to subscribe"] role: Option<Role>,
) -> CommandResult {
    let guild = require_guild(ctx)?;
    let channel = ctx.channel_id();
    let _guard = db().await.channel_lock(channel).lock_owned().await;
    let users = requested_users(ctx, member.as_ref(), role.as_ref());
    let mut session = SokujiSession::get(ctx.serenity_context(), channel, guild, false).await?;
    session.mogi.banner_users.extend(users.iter().cloned());
    session.refresh(ctx.serenity_context()).await?;
    session.update_viewers().await;
    ctx.send(CreateReply::default().embed(banner_embed(&users)))
        .await?;
    Ok(())
}

#[command(
    slash_command,
    guild_only,
    required_bot_permissions = "VIEW_CHANNEL | SEND_MESSAGES"
)]
/// Unsubscribe from live score updates (you, when nobody is named)
pub async fn remove(
    ctx: Context<'_>,
    #[description = "User to unsubscribe"] member: Option<Member>,
    #[description = "Role whose members to unsubscribe"] role: Option<Role>,
) -> CommandResult {
    let guild = require_guild(ctx)?;
    let channel = ctx.channel_id();
    let _guard = db().await.channel_lock(channel).lock_owned().await;
    let users = requested_users(ctx, member.as_ref(), role.as_ref());
    let mut session = SokujiSession::get(ctx.serenity_context(), channel, guild, false).await?;
    session.mogi.banner_users.retain(|user| !users.contains(user));
    session.update_viewers().await;
    session.refresh(ctx.serenity_context()).await?;
    ctx.send(success_message(session.mogi.lang.pick(
        "バナーの更新を停止しました。",
        "Finished updating banner.",
    )))
    .await?;
    Ok(())
}
