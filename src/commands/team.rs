use poise::command;

use super::{require_guild, Context, CommandResult};
use crate::{database::db, message_utils::success_message};

#[allow(clippy::unused_async)]
#[command(slash_command, subcommands("set", "show"), guild_only)]
/// This server's own team name
pub async fn team(_: Context<'_>) -> CommandResult {
    Ok(())
}

#[command(slash_command, guild_only, default_member_permissions = "MANAGE_GUILD")]
/// Set the team name used as your tag when a mogi starts
pub async fn set(
    ctx: Context<'_>,
    #[description = "Team name"] name: String,
) -> CommandResult {
    let guild = require_guild(ctx)?;
    db().await.set_team_name(guild, name.clone()).await?;
    ctx.send(success_message(format!("Team name set to **{name}**.")))
        .await?;
    Ok(())
}

#[command(slash_command, guild_only)]
/// Show the stored team name
pub async fn show(ctx: Context<'_>) -> CommandResult {
    let guild = require_guild(ctx)?;
    let name = db().await.team_name(guild).await?;
    let response = name.map_or_else(
        || String::from("No team name is stored; the server name is used instead."),
        |name| format!("Team name: **{name}**"),
    );
    ctx.send(success_message(response)).await?;
    Ok(())
}
