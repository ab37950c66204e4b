use chrono::DateTime;
use poise::{command, serenity_prelude::Message};

use super::{require_guild, Context, CommandResult};
use crate::{
    database::db,
    message_utils::{info_embed, success_message},
    sokuji::{session::summary_from_embed, Mogi, SokujiError},
};

/// UTC offset applied when formatting result timestamps for a locale.
fn locale_offset_hours(locale: Option<&str>) -> i64 {
    match locale {
        Some(locale) if locale.starts_with("ja") => 9,
        _ => 0,
    }
}

#[command(context_menu_command = "Register Result", guild_only)]
/// Store a finished mogi's score from its summary message
pub async fn register_result(ctx: Context<'_>, message: Message) -> CommandResult {
    let guild = require_guild(ctx)?;
    if !message.author.bot {
        return Err(SokujiError::InvalidMessage.into());
    }
    let summary = message
        .embeds
        .first()
        .map(summary_from_embed)
        .ok_or(SokujiError::InvalidMessage)?;
    let mogi = Mogi::from_summary(&summary)?;
    let total = mogi.total();
    let posted = message.timestamp.unix_timestamp();
    let date = DateTime::from_timestamp(posted + locale_offset_hours(ctx.locale()) * 3600, 0)
        .map_or_else(String::new, |when| {
            when.format("%Y-%m-%d %H:%M:%S").to_string()
        });
    db().await
        .add_result(guild, mogi.tags[1].clone(), total[0], total[1], date)
        .await?;
    ctx.send(success_message(format!(
        "{}\n{} vs {}\n`{}`",
        mogi.lang.pick("戦績を登録しました。", "Result registered."),
        mogi.tags[0],
        mogi.tags[1],
        Mogi::score_line(total, false),
    )))
    .await?;
    Ok(())
}

#[command(slash_command, guild_only)]
/// List this server's most recent registered results
pub async fn results(ctx: Context<'_>) -> CommandResult {
    let guild = require_guild(ctx)?;
    let rows = db().await.results(guild).await?;
    if rows.is_empty() {
        ctx.send(success_message("No results registered yet.")).await?;
        return Ok(());
    }
    let lines: Vec<String> = rows
        .iter()
        .rev()
        .take(10)
        .map(|row| {
            format!(
                "{} vs **{}** `{}`",
                row.date,
                row.enemy,
                Mogi::score_line([row.score, row.enemy_score], false),
            )
        })
        .collect();
    ctx.send(
        poise::CreateReply::default()
            .embed(info_embed(lines.join("\n")).title(format!("Latest results ({})", rows.len()))),
    )
    .await?;
    Ok(())
}
