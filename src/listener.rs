use poise::serenity_prelude::{Context, GuildId, Message};
use tracing::error;

use crate::{
    commands::CommandError,
    database::db,
    sokuji::{session::SokujiSession, Track},
};

/// Passive scoring: while a mogi runs, any chat line may be a race result,
/// a `back`, or a course name. Everything that does not parse is ordinary
/// chatter and stays silent.
pub async fn on_message(ctx: &Context, message: &Message) {
    if message.author.bot {
        return;
    }
    let Some(guild) = message.guild_id else {
        return;
    };
    if let Err(err) = handle(ctx, message, guild).await {
        match err {
            CommandError::Expected(_) => {}
            CommandError::Unexpected(err) => error!("passive sokuji update failed: {err:?}"),
        }
    }
}

async fn handle(ctx: &Context, message: &Message, guild: GuildId) -> Result<(), CommandError> {
    let channel = message.channel_id;
    let _guard = db().await.channel_lock(channel).lock_owned().await;
    let mut session = SokujiSession::get(ctx, channel, guild, false).await?;
    if message.content == "back" {
        session.mogi.back(None)?;
    } else if let Some(track) = Track::from_nick(&message.content) {
        // Not a result yet, just the course the next race will run on.
        session.mogi.loaded_track = Some(track);
        return session.persist().await;
    } else {
        session.mogi.add_race(&message.content, None, None)?;
    }
    session.send(ctx, None).await?;
    session.update_viewers().await;
    Ok(())
}
